use colchart_rs::viz::{ChartProps, Container, LegendPosition, render_column_chart};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

/// Up to five series over a shared set of categories, values in [0, 1000).
fn chart_input() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<String>>)> {
    (1usize..=5, 1usize..=6).prop_flat_map(|(n_series, n_cats)| {
        prop::collection::vec(prop::collection::vec(0.0f64..1000.0, n_cats), n_series).prop_map(
            move |series| {
                let cats: Vec<String> = (0..n_cats).map(|i| format!("c{i}")).collect();
                let ticks = vec![cats; series.len()];
                (series, ticks)
            },
        )
    })
}

fn legend_position() -> impl Strategy<Value = LegendPosition> {
    prop_oneof![
        Just(LegendPosition::North),
        Just(LegendPosition::East),
        Just(LegendPosition::South),
        Just(LegendPosition::West),
    ]
}

proptest! {
    #[test]
    fn layout_invariants_hold(
        (series, ticks) in chart_input(),
        gap in 0.0f64..99.9,
        display_legend in any::<bool>(),
        legend_position in legend_position(),
    ) {
        let labels: Vec<String> = (0..series.len()).map(|i| format!("S{i}")).collect();
        let props = ChartProps {
            display_legend,
            legend_position,
            multi_series_gap: gap,
            ..ChartProps::default()
        };
        let mut c = Container::new(800, 500);
        let layout = render_column_chart(&series, &labels, &ticks, "chart", &mut c, &props).unwrap();

        // one column per value
        let total: usize = series.iter().map(Vec::len).sum();
        prop_assert_eq!(layout.bars.len(), total);
        prop_assert_eq!(c.chart().unwrap().columns().len(), total);

        // a group never overflows its band
        let n = series.len() as f64;
        prop_assert!(layout.bar_width * n + layout.gap * n <= layout.band_width + EPS);

        // columns rest on the baseline and stay inside the plot
        let baseline = layout.plot_top + layout.plot_height;
        for bar in &layout.bars {
            prop_assert!((bar.y + bar.height - baseline).abs() < EPS);
            prop_assert!(bar.y >= layout.plot_top - EPS);
            prop_assert!(bar.x >= layout.plot_left - EPS);
            prop_assert!(bar.x + bar.width <= layout.plot_left + layout.plot_width + EPS);
        }

        // the maximum reaches the top of the plot
        let max = series.iter().flatten().copied().fold(0.0f64, f64::max);
        if max > 0.0 {
            let tallest = layout.bars.iter().map(|b| b.height).fold(0.0f64, f64::max);
            prop_assert!((tallest - layout.plot_height).abs() < EPS);
        }

        let expected_shift = if display_legend && legend_position == LegendPosition::West {
            layout.legend_width
        } else {
            0.0
        };
        prop_assert_eq!(layout.chart_translate_x, expected_shift);
    }
}
