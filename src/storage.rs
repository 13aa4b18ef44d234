//! Loading chart input and props from disk, saving the derived layout.

use crate::error::{ChartError, ChartResult};
use crate::models::ChartData;
use crate::viz::{ChartLayout, ChartProps};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load chart input from JSON: `{"series": [[..]], "seriesLabels": [..], "tickLabels": [[..]]}`.
///
/// A missing `seriesLabels` defaults to `Series-0`, `Series-1`, ...
pub fn load_json<P: AsRef<Path>>(path: P) -> ChartResult<ChartData> {
    let reader = BufReader::new(File::open(path)?);
    let mut data: ChartData = serde_json::from_reader(reader)?;
    if data.series_labels.is_empty() {
        data.series_labels = (0..data.series.len()).map(|i| format!("Series-{i}")).collect();
    }
    Ok(data)
}

/// Load chart input from a wide CSV table.
///
/// The first column holds the category, every further column one series with
/// its label in the header. An empty cell means the series has no value for
/// that row's category.
///
/// ```text
/// year,Germany,France
/// 2019,3.2,2.7
/// 2020,,2.6
/// ```
pub fn load_csv<P: AsRef<Path>>(path: P) -> ChartResult<ChartData> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(ChartError::Parse(
            "CSV needs a category column and at least one series column".into(),
        ));
    }
    let series_labels: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut series = vec![Vec::new(); series_labels.len()];
    let mut tick_labels = vec![Vec::new(); series_labels.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let category = record.get(0).unwrap_or_default();
        for (col, cell) in record.iter().skip(1).enumerate() {
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| {
                ChartError::Parse(format!(
                    "row {}, column '{}': '{cell}' is not a number",
                    row + 2,
                    series_labels[col]
                ))
            })?;
            series[col].push(value);
            tick_labels[col].push(category.to_string());
        }
    }

    Ok(ChartData::new(series, series_labels, tick_labels))
}

/// Load chart input by file extension (`.csv`, anything else is JSON).
pub fn load_data<P: AsRef<Path>>(path: P) -> ChartResult<ChartData> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => load_csv(path),
        _ => load_json(path),
    }
}

/// Load layout properties from a camelCase JSON object.
pub fn load_props<P: AsRef<Path>>(path: P) -> ChartResult<ChartProps> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Save the derived layout as pretty JSON.
pub fn save_layout_json<P: AsRef<Path>>(layout: &ChartLayout, path: P) -> ChartResult<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(layout)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_empty_cells_skip_values() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        fs::write(&p, "year,Germany,France\n2019,3.2,2.7\n2020,,2.6\n").unwrap();
        let data = load_csv(&p).unwrap();
        assert_eq!(data.series_labels, vec!["Germany", "France"]);
        assert_eq!(data.series, vec![vec![3.2], vec![2.7, 2.6]]);
        assert_eq!(data.tick_labels[0], vec!["2019"]);
        assert_eq!(data.tick_labels[1], vec!["2019", "2020"]);
    }

    #[test]
    fn csv_rejects_text_values() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        fs::write(&p, "k,A\nx,abc\n").unwrap();
        let err = load_csv(&p).unwrap_err();
        assert!(matches!(err, ChartError::Parse(ref m) if m.contains("row 2")));
    }

    #[test]
    fn json_without_labels_gets_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.json");
        fs::write(&p, r#"{"series":[[1],[2]],"tickLabels":[["a"],["a"]]}"#).unwrap();
        let data = load_json(&p).unwrap();
        assert_eq!(data.series_labels, vec!["Series-0", "Series-1"]);
    }
}
