//! Builders for the two-column chart kinds.

use crate::api::{
    BubblePoint, CategoryBox, GridCell, GroupedBarEntry, Label, MosaicCell, NumericCell,
    StackedRow, XyPoint,
};
use crate::core::{Annotation, AxisSpec, ChartConfig, ChartSpec, Layout};
use crate::stats::correlation_and_regression;
use crate::trace::{
    AxisValues, BarTrace, BoxPoints, BoxTrace, HeatmapTrace, LineStyle, Marker, ScatterTrace,
    SizeAttr, Trace,
};

use super::format_number;

/// Marker cloud with a dashed trend line and correlation annotation when
/// the data has spread in both columns.
pub fn scatter(points: &[XyPoint], x_col: &str, y_col: &str) -> ChartSpec {
    if points.is_empty() {
        return ChartSpec::empty(format!("Scatter: {y_col} vs {x_col} (no data)"));
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    let cloud = ScatterTrace {
        marker: Some(Marker::colored("#3b82f6")),
        name: Some(format!("{y_col} vs {x_col}")),
        ..ScatterTrace::markers(xs.clone(), ys.clone())
    };
    let mut data = vec![Trace::Scatter(cloud)];

    let mut layout = Layout::titled(format!("Scatter: {y_col} vs {x_col}"))
        .with_xaxis(AxisSpec::titled(x_col))
        .with_yaxis(AxisSpec::titled(y_col));

    if let Ok(fit) = correlation_and_regression(&xs, &ys) {
        if fit.r != 0.0 {
            data.push(Trace::Scatter(ScatterTrace {
                name: Some("Trend".into()),
                line: Some(LineStyle::dashed("rgba(59, 130, 246, 0.7)", 2.0, "dash")),
                showlegend: Some(false),
                hoverinfo: Some("skip".into()),
                ..ScatterTrace::lines(fit.line_x.to_vec(), fit.line_y.to_vec())
            }));
            layout = layout.with_annotation(Annotation {
                xanchor: Some("left".into()),
                yanchor: Some("top".into()),
                ..Annotation::paper(0.02, 0.98, format!("r = {}", format_number(fit.r)))
            });
        }
    }

    ChartSpec::new(data, layout, ChartConfig::default())
}

/// Ordered spline through the points.
pub fn line(points: &[XyPoint], x_col: &str, y_col: &str) -> ChartSpec {
    if points.is_empty() {
        return ChartSpec::empty(format!("Line: {y_col} over {x_col} (no data)"));
    }
    let trace = ScatterTrace {
        mode: Some("lines+markers".into()),
        name: Some(y_col.to_string()),
        line: Some(LineStyle {
            shape: Some("spline".into()),
            ..LineStyle::default()
        }),
        ..ScatterTrace::markers(
            points.iter().map(|p| p.x).collect::<Vec<f64>>(),
            points.iter().map(|p| p.y).collect::<Vec<f64>>(),
        )
    };

    let layout = Layout::titled(format!("Line: {y_col} over {x_col}"))
        .with_xaxis(AxisSpec::titled(x_col))
        .with_yaxis(AxisSpec::titled(y_col));

    ChartSpec::new(vec![Trace::Scatter(trace)], layout, ChartConfig::default())
}

/// One box per category from server-side five-number summaries.
pub fn box_by_category(rows: &[CategoryBox], category_col: &str, value_col: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!(
            "Box plot of {value_col} grouped by {category_col} (no data)"
        ));
    }
    let data = rows
        .iter()
        .map(|row| {
            Trace::Box(BoxTrace {
                name: Some(row.category.0.clone()),
                q1: Some(vec![row.q1]),
                median: Some(vec![row.median]),
                q3: Some(vec![row.q3]),
                lowerfence: Some(vec![row.min]),
                upperfence: Some(vec![row.max]),
                boxpoints: Some(BoxPoints::Flag(false)),
                ..BoxTrace::default()
            })
        })
        .collect();

    ChartSpec::new(
        data,
        Layout::titled(format!(
            "Box plot of {value_col} grouped by {category_col}"
        )),
        ChartConfig::default(),
    )
}

fn distinct<'a>(labels: impl Iterator<Item = &'a Label>) -> Vec<&'a Label> {
    let mut seen: Vec<&Label> = Vec::new();
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

/// One bar series per distinct group over the distinct categories.
pub fn grouped_bar(rows: &[GroupedBarEntry], category_col: &str, group_col: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!(
            "Grouped bar: {category_col} by {group_col} (no data)"
        ));
    }
    let groups = distinct(rows.iter().map(|r| &r.group));
    let categories = distinct(rows.iter().map(|r| &r.category));
    let category_axis: Vec<String> = categories.iter().map(|c| c.0.clone()).collect();

    let data = groups
        .iter()
        .map(|group| {
            let values: Vec<f64> = categories
                .iter()
                .map(|category| {
                    rows.iter()
                        .find(|r| r.group == **group && r.category == **category)
                        .map(|r| r.value)
                        .unwrap_or(0.0)
                })
                .collect();
            Trace::Bar(BarTrace {
                name: Some(group.0.clone()),
                ..BarTrace::new(category_axis.clone(), values)
            })
        })
        .collect();

    let layout = Layout {
        barmode: Some("group".into()),
        ..Layout::titled(format!("Grouped bar: {category_col} by {group_col}"))
    }
    .with_xaxis(AxisSpec::titled(category_col))
    .with_yaxis(AxisSpec::titled("Count"));

    ChartSpec::new(data, layout, ChartConfig::default())
}

/// Pairwise-value matrix over the label grid, missing cells at zero.
pub fn heatmap(cells: &[GridCell], cols: &[String]) -> ChartSpec {
    let joined = cols.join(", ");
    if cells.is_empty() {
        return ChartSpec::empty(format!("Correlation Heatmap ({joined}) (no data)"));
    }
    let x_labels = distinct(cells.iter().map(|c| &c.x));
    let y_labels = distinct(cells.iter().map(|c| &c.y));

    let z: Vec<Vec<f64>> = y_labels
        .iter()
        .map(|y| {
            x_labels
                .iter()
                .map(|x| {
                    cells
                        .iter()
                        .find(|c| c.x == **x && c.y == **y)
                        .map(|c| c.value)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    let trace = HeatmapTrace {
        x: AxisValues::Cats(x_labels.iter().map(|l| l.0.clone()).collect()),
        y: AxisValues::Cats(y_labels.iter().map(|l| l.0.clone()).collect()),
        z,
        colorscale: Some("Viridis".into()),
        ..HeatmapTrace::default()
    };

    ChartSpec::new(
        vec![Trace::Heatmap(trace)],
        Layout::titled(format!("Correlation Heatmap ({joined})")),
        ChartConfig::default(),
    )
}

/// Stack keys come from the first row; every row contributes one bar per key.
pub fn stacked_bar(rows: &[StackedRow], x_col: &str, stack_col: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!(
            "Stacked Bar: {x_col} split by {stack_col} (no data)"
        ));
    }
    let x_values: Vec<String> = rows.iter().map(|r| r.x.0.clone()).collect();
    let stack_keys: Vec<&String> = rows[0].stacks.keys().collect();

    let data = stack_keys
        .iter()
        .map(|key| {
            let values: Vec<f64> = rows.iter().map(|r| r.stack_value(key)).collect();
            Trace::Bar(BarTrace {
                name: Some((*key).clone()),
                ..BarTrace::new(x_values.clone(), values)
            })
        })
        .collect();

    let layout = Layout {
        barmode: Some("stack".into()),
        ..Layout::titled(format!("Stacked Bar: {x_col} split by {stack_col}"))
    }
    .with_xaxis(AxisSpec::titled(x_col))
    .with_yaxis(AxisSpec::titled("Count"));

    ChartSpec::new(data, layout, ChartConfig::default())
}

/// Density matrix over numeric bin centers, both axes sorted ascending.
pub fn hexbin(cells: &[NumericCell], x_col: &str, y_col: &str) -> ChartSpec {
    if cells.is_empty() {
        return ChartSpec::empty(format!("Hexbin density: {y_col} vs {x_col} (no data)"));
    }
    let mut x_bins: Vec<f64> = cells.iter().map(|c| c.x).collect();
    x_bins.sort_by(f64::total_cmp);
    x_bins.dedup();
    let mut y_bins: Vec<f64> = cells.iter().map(|c| c.y).collect();
    y_bins.sort_by(f64::total_cmp);
    y_bins.dedup();

    let z: Vec<Vec<f64>> = y_bins
        .iter()
        .map(|y| {
            x_bins
                .iter()
                .map(|x| {
                    cells
                        .iter()
                        .find(|c| c.x == *x && c.y == *y)
                        .map(|c| c.value)
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    let trace = HeatmapTrace {
        x: x_bins.into(),
        y: y_bins.into(),
        z,
        colorscale: Some("Blues".into()),
        ..HeatmapTrace::default()
    };

    let layout = Layout::titled(format!("Hexbin density: {y_col} vs {x_col}"))
        .with_xaxis(AxisSpec::titled(x_col))
        .with_yaxis(AxisSpec::titled(y_col));

    ChartSpec::new(vec![Trace::Heatmap(trace)], layout, ChartConfig::default())
}

/// Area-scaled marker sizes relative to the largest bubble.
pub fn bubble(points: &[BubblePoint], x_col: &str, y_col: &str, size_col: &str) -> ChartSpec {
    if points.is_empty() {
        return ChartSpec::empty(format!("Bubble plot ({size_col} sized) (no data)"));
    }
    let sizes: Vec<f64> = points.iter().map(|p| p.size).collect();
    let max_size = sizes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let trace = ScatterTrace {
        marker: Some(Marker {
            size: Some(SizeAttr::PerPoint(sizes.clone())),
            sizemode: Some("area".into()),
            sizeref: Some(2.0 * max_size / (100.0 * 100.0)),
            sizemin: Some(4.0),
            color: Some("#6366f1".into()),
            opacity: Some(0.7),
            ..Marker::default()
        }),
        text: Some(sizes.iter().map(|s| format!("size: {s}")).collect()),
        ..ScatterTrace::markers(
            points.iter().map(|p| p.x).collect::<Vec<f64>>(),
            points.iter().map(|p| p.y).collect::<Vec<f64>>(),
        )
    };

    let layout = Layout::titled(format!("Bubble plot ({size_col} sized)"))
        .with_xaxis(AxisSpec::titled(x_col))
        .with_yaxis(AxisSpec::titled(y_col));

    ChartSpec::new(vec![Trace::Scatter(trace)], layout, ChartConfig::default())
}

/// Stacked composition of the second column within each first-column
/// category.
pub fn mosaic(cells: &[MosaicCell], x_col: &str, y_col: &str) -> ChartSpec {
    if cells.is_empty() {
        return ChartSpec::empty(format!(
            "Mosaic / Stacked bar: {x_col} vs {y_col} (no data)"
        ));
    }
    let x_categories = distinct(cells.iter().map(|c| &c.x));
    let y_categories = distinct(cells.iter().map(|c| &c.y));
    let x_axis: Vec<String> = x_categories.iter().map(|c| c.0.clone()).collect();

    let data = y_categories
        .iter()
        .map(|y| {
            let values: Vec<f64> = x_categories
                .iter()
                .map(|x| {
                    cells
                        .iter()
                        .find(|c| c.x == **x && c.y == **y)
                        .map(|c| c.value)
                        .unwrap_or(0.0)
                })
                .collect();
            Trace::Bar(BarTrace {
                name: Some(y.0.clone()),
                ..BarTrace::new(x_axis.clone(), values)
            })
        })
        .collect();

    let layout = Layout {
        barmode: Some("stack".into()),
        ..Layout::titled(format!("Mosaic / Stacked bar: {x_col} vs {y_col}"))
    }
    .with_xaxis(AxisSpec::titled(x_col))
    .with_yaxis(AxisSpec::titled("Count"));

    ChartSpec::new(data, layout, ChartConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(pairs: &[(f64, f64)]) -> Vec<XyPoint> {
        pairs.iter().map(|(x, y)| XyPoint { x: *x, y: *y }).collect()
    }

    #[test]
    fn scatter_adds_a_trend_line_for_correlated_data() {
        let spec = scatter(&xy(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]), "a", "b");
        assert_eq!(spec.trace_count(), 2);
        match &spec.data[1] {
            Trace::Scatter(trend) => {
                assert_eq!(trend.x, Some(vec![1.0, 3.0].into()));
                assert_eq!(trend.y, Some(vec![2.0, 6.0].into()));
            }
            other => panic!("expected the trend line, got {other:?}"),
        }
        assert_eq!(spec.layout.annotations[0].text, "r = 1");
    }

    #[test]
    fn scatter_on_flat_data_keeps_just_the_cloud() {
        let spec = scatter(&xy(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]), "a", "b");
        assert_eq!(spec.trace_count(), 1);
        assert!(spec.layout.annotations.is_empty());
    }

    #[test]
    fn box_by_category_builds_one_trace_per_row() {
        let rows = vec![
            CategoryBox {
                category: Label::from("east"),
                min: 1.0,
                q1: 2.0,
                median: 3.0,
                q3: 4.0,
                max: 5.0,
            },
            CategoryBox {
                category: Label::from("west"),
                min: 0.0,
                q1: 1.0,
                median: 2.0,
                q3: 3.0,
                max: 4.0,
            },
        ];
        let spec = box_by_category(&rows, "region", "total");
        assert_eq!(spec.trace_count(), 2);
        match &spec.data[0] {
            Trace::Box(b) => {
                assert_eq!(b.name.as_deref(), Some("east"));
                assert_eq!(b.lowerfence, Some(vec![1.0]));
                assert_eq!(b.upperfence, Some(vec![5.0]));
            }
            other => panic!("expected a box trace, got {other:?}"),
        }
    }

    #[test]
    fn grouped_bar_fills_missing_pairs_with_zero() {
        let rows = vec![
            GroupedBarEntry {
                category: Label::from("jan"),
                group: Label::from("north"),
                value: 3.0,
            },
            GroupedBarEntry {
                category: Label::from("feb"),
                group: Label::from("south"),
                value: 5.0,
            },
        ];
        let spec = grouped_bar(&rows, "month", "region");
        assert_eq!(spec.trace_count(), 2);
        match (&spec.data[0], &spec.data[1]) {
            (Trace::Bar(north), Trace::Bar(south)) => {
                assert_eq!(north.y, Some(vec![3.0, 0.0].into()));
                assert_eq!(south.y, Some(vec![0.0, 5.0].into()));
            }
            other => panic!("expected two bar traces, got {other:?}"),
        }
        assert_eq!(spec.layout.barmode.as_deref(), Some("group"));
    }

    #[test]
    fn heatmap_orders_labels_by_first_appearance() {
        let cells = vec![
            GridCell {
                x: Label::from("b"),
                y: Label::from("b"),
                value: 1.0,
            },
            GridCell {
                x: Label::from("a"),
                y: Label::from("a"),
                value: 0.5,
            },
        ];
        let spec = heatmap(&cells, &["a".into(), "b".into()]);
        match &spec.data[0] {
            Trace::Heatmap(map) => {
                assert_eq!(map.x, AxisValues::Cats(vec!["b".into(), "a".into()]));
                assert_eq!(map.z, vec![vec![1.0, 0.0], vec![0.0, 0.5]]);
            }
            other => panic!("expected a heatmap trace, got {other:?}"),
        }
        assert!(
            spec.layout
                .title
                .as_ref()
                .unwrap()
                .text
                .contains("(a, b)")
        );
    }

    #[test]
    fn stacked_bar_takes_keys_from_the_first_row() {
        let rows: Vec<StackedRow> = serde_json::from_value(serde_json::json!([
            {"x": "q1", "credit": 4, "cash": 2},
            {"x": "q2", "credit": 1}
        ]))
        .unwrap();
        let spec = stacked_bar(&rows, "quarter", "payment");
        assert_eq!(spec.trace_count(), 2);
        match (&spec.data[0], &spec.data[1]) {
            (Trace::Bar(credit), Trace::Bar(cash)) => {
                assert_eq!(credit.name.as_deref(), Some("credit"));
                assert_eq!(credit.y, Some(vec![4.0, 1.0].into()));
                // q2 has no cash entry.
                assert_eq!(cash.y, Some(vec![2.0, 0.0].into()));
            }
            other => panic!("expected two bar traces, got {other:?}"),
        }
    }

    #[test]
    fn hexbin_sorts_bins_numerically() {
        let cells = vec![
            NumericCell {
                x: 10.0,
                y: 1.0,
                value: 2.0,
            },
            NumericCell {
                x: 2.0,
                y: 1.0,
                value: 7.0,
            },
        ];
        let spec = hexbin(&cells, "a", "b");
        match &spec.data[0] {
            Trace::Heatmap(map) => {
                assert_eq!(map.x, AxisValues::from(vec![2.0, 10.0]));
                assert_eq!(map.z, vec![vec![7.0, 2.0]]);
            }
            other => panic!("expected a heatmap trace, got {other:?}"),
        }
    }

    #[test]
    fn bubble_scales_sizes_by_area() {
        let points = vec![
            BubblePoint {
                x: 1.0,
                y: 1.0,
                size: 10.0,
            },
            BubblePoint {
                x: 2.0,
                y: 2.0,
                size: 50.0,
            },
        ];
        let spec = bubble(&points, "a", "b", "volume");
        match &spec.data[0] {
            Trace::Scatter(trace) => {
                let marker = trace.marker.as_ref().unwrap();
                assert_eq!(marker.sizeref, Some(2.0 * 50.0 / 10_000.0));
                assert_eq!(marker.sizemin, Some(4.0));
                assert_eq!(trace.text.as_ref().unwrap()[1], "size: 50");
            }
            other => panic!("expected a scatter trace, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_a_no_data_spec() {
        let spec = mosaic(&[], "a", "b");
        assert_eq!(spec.trace_count(), 0);
        assert!(
            spec.layout
                .title
                .as_ref()
                .unwrap()
                .text
                .ends_with("(no data)")
        );
    }
}
