use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colchart_rs::viz::LegendPosition;
use colchart_rs::{stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "colchart",
    version,
    about = "Lay out and render grouped column charts to SVG or PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart from a data file (and optionally dump layout and stats).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input data: .json ({series, seriesLabels, tickLabels}) or a wide .csv table
    #[arg(short, long)]
    data: PathBuf,
    /// Output chart (.svg or .png)
    #[arg(short, long)]
    out: PathBuf,
    /// Container width in pixels
    #[arg(long, default_value_t = 960)]
    width: u32,
    /// Container height in pixels
    #[arg(long, default_value_t = 500)]
    height: u32,
    /// Class of the chart element
    #[arg(long, default_value = "chart")]
    class: String,
    /// JSON file with layout properties (camelCase keys); flags below override it
    #[arg(long)]
    props: Option<PathBuf>,
    /// Show the legend
    #[arg(long, default_value_t = false)]
    legend: bool,
    /// Legend position: n, e, s, w (or north, east, south, west)
    #[arg(long)]
    legend_position: Option<LegendPosition>,
    /// Chart title
    #[arg(long)]
    title: Option<String>,
    /// Caption below the title
    #[arg(long)]
    caption: Option<String>,
    /// Counter-clockwise rotation of category labels, in degrees
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<f64>,
    /// Gap between the columns of a group, percent of the column slot [0, 100)
    #[arg(long)]
    gap: Option<f64>,
    /// Locale for value ticks (en, de, fr, es, it, pt, nl)
    #[arg(long)]
    locale: Option<String>,
    /// TrueType font used for PNG text
    #[arg(long)]
    font: Option<PathBuf>,
    /// Write the derived layout as JSON
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Print per-series statistics to stdout
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let data = storage::load_data(&args.data)
        .with_context(|| format!("reading {}", args.data.display()))?;

    let mut props = match args.props.as_ref() {
        Some(path) => storage::load_props(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => viz::ChartProps::default(),
    };
    if args.legend {
        props.display_legend = true;
    }
    if let Some(pos) = args.legend_position {
        props.legend_position = pos;
    }
    if args.title.is_some() {
        props.chart_title = args.title;
    }
    if args.caption.is_some() {
        props.caption_text = args.caption;
    }
    if let Some(r) = args.rotation {
        props.x_axis_tick_label_rotation = r;
    }
    if let Some(g) = args.gap {
        props.multi_series_gap = g;
    }
    if let Some(l) = args.locale {
        props.locale = l;
    }

    let layout = viz::plot_column_chart(
        &data,
        &args.out,
        args.width,
        args.height,
        &args.class,
        &props,
        args.font.as_deref(),
    )?;
    eprintln!(
        "Wrote {} columns to {}",
        layout.bars.len(),
        args.out.display()
    );

    if let Some(path) = args.layout.as_ref() {
        storage::save_layout_json(&layout, path)?;
        eprintln!("Saved layout to {}", path.display());
    }

    if args.stats {
        for s in stats::series_summary(&data.series, &data.series_labels) {
            println!(
                "{}  count={}  min={} max={} mean={} median={}",
                s.label,
                s.count,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
