//! Builders for the single-column chart kinds.

use crate::api::{BoxSummary, DensityPoint, Histogram, LabelledValue, ParetoEntry, SampleValue};
use crate::core::{
    Annotation, AxisSpec, ChartConfig, ChartSpec, Coord, Font, HoverLabel, Layout, Legend, Margin,
    Shape, ShapeLine,
};
use crate::stats::{basic_stats, cumulative_percentages, pareto_threshold};
use crate::trace::{
    AxisValues, BarTrace, BoxPoints, BoxTrace, ColorAttr, LineStyle, Marker, MarkerLine, MeanLine,
    PaletteMarker, PieTrace, ScatterTrace, SizeAttr, Trace, ViolinInnerBox, ViolinTrace,
};

use super::{format_number, palette, PaletteColor};

const BANNER_Y: f64 = 1.12;
const SUB_BANNER_Y: f64 = 1.05;

/// Frequency bars over the bin edges with a dashed mean reference line.
pub fn histogram(data: &Histogram, column: &str) -> ChartSpec {
    if data.bins.len() < 2 || data.counts.is_empty() {
        return ChartSpec::empty(format!("Histogram of {column} (no data)"));
    }
    let edges = &data.bins[..data.bins.len() - 1];
    let counts = &data.counts;

    // Mean estimated from bin midpoints weighted by their counts.
    let total: f64 = counts.iter().sum();
    let weighted: f64 = edges
        .iter()
        .zip(&data.bins[1..])
        .zip(counts)
        .map(|((start, end), count)| (start + end) / 2.0 * count)
        .sum();
    let mean = if total > 0.0 { weighted / total } else { 0.0 };
    let max_count = counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let labels: Vec<String> = edges
        .iter()
        .zip(&data.bins[1..])
        .map(|(start, end)| format!("{} to {}", format_number(*start), format_number(*end)))
        .collect();
    let colors: Vec<String> = counts
        .iter()
        .map(|count| {
            let intensity = if max_count > 0.0 {
                0.3 + count / max_count * 0.7
            } else {
                0.3
            };
            format!("rgba(59, 130, 246, {intensity})")
        })
        .collect();

    let bars = BarTrace {
        text: Some(labels),
        hovertemplate: Some("<b>Range:</b> %{text}<br><b>Count:</b> %{y}<extra></extra>".into()),
        marker: Some(Marker {
            color: Some(ColorAttr::PerPoint(colors)),
            line: Some(MarkerLine {
                color: Some("rgba(59, 130, 246, 1)".into()),
                width: Some(1.0),
            }),
            ..Marker::default()
        }),
        name: Some("Frequency".into()),
        ..BarTrace::new(edges.to_vec(), counts.clone())
    };
    let mean_line = ScatterTrace {
        hovertemplate: Some(format!(
            "<b>Mean:</b> {}<extra></extra>",
            format_number(mean)
        )),
        ..ScatterTrace::vline(
            mean,
            0.0,
            max_count * 1.05,
            LineStyle::dashed("red", 2.0, "dash"),
            "Mean",
        )
    };

    let layout = Layout {
        bargap: Some(0.05),
        hovermode: Some("closest".into()),
        ..Layout::headline(format!("Histogram of {column}"))
    }
    .with_xaxis(AxisSpec::titled_grid(column))
    .with_yaxis(AxisSpec::titled_grid("Frequency"))
    .with_legend(Legend::horizontal_below(-0.15))
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Statistics:</b> Total count: {}, Mean: {}, Bins: {}",
            total,
            format_number(mean),
            data.bins.len() - 1
        ),
    ));

    ChartSpec::new(
        vec![Trace::Bar(bars), Trace::Scatter(mean_line)],
        layout,
        ChartConfig::export_png(format!("histogram_{column}")).with_draw_tools(),
    )
}

/// Category frequencies sorted descending, with a Pareto callout when few
/// categories dominate.
pub fn bar(rows: &[LabelledValue], column: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!("Bar chart of {column} (no data)"));
    }
    let mut sorted: Vec<&LabelledValue> = rows.iter().collect();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));

    let labels: Vec<String> = sorted.iter().map(|r| r.label.0.clone()).collect();
    let values: Vec<f64> = sorted.iter().map(|r| r.value).collect();
    let total: f64 = values.iter().sum();
    let percentages: Vec<String> = values
        .iter()
        .map(|v| {
            let share = if total > 0.0 { v / total * 100.0 } else { 0.0 };
            format!("{share:.1}")
        })
        .collect();

    let cumulative = cumulative_percentages(&values);
    let pareto_count = pareto_threshold(&cumulative)
        .map(|i| i + 1)
        .unwrap_or(values.len());

    let trace = BarTrace {
        text: Some(percentages.iter().map(|p| format!("{p}%")).collect()),
        textposition: Some("auto".into()),
        hovertemplate: Some(
            "<b>%{x}</b><br>Count: %{y}<br>Percentage: %{text}<extra></extra>".into(),
        ),
        marker: Some(Marker {
            color: Some(ColorAttr::PerPoint(palette(
                PaletteColor::Orange,
                sorted.len(),
            ))),
            line: Some(MarkerLine {
                color: Some("rgba(58, 58, 58, 0.5)".into()),
                width: Some(1.0),
            }),
            ..Marker::default()
        }),
        name: Some("Frequency".into()),
        ..BarTrace::new(labels.clone(), values.clone())
    };

    let mut layout = Layout {
        bargap: Some(0.2),
        ..Layout::headline(format!("Bar Chart of {column}"))
    }
    .with_xaxis(AxisSpec {
        tickangle: Some(if sorted.len() > 10 { -45.0 } else { 0.0 }),
        automargin: Some(true),
        ..AxisSpec::titled(column)
    })
    .with_yaxis(AxisSpec::titled_grid("Frequency"))
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Statistics:</b> Categories={}, Most frequent: {} ({}%), Total count: {}",
            sorted.len(),
            labels[0],
            percentages[0],
            total
        ),
    ));
    if (pareto_count as f64) < sorted.len() as f64 * 0.4 {
        layout = layout.with_annotation(Annotation::paper(
            0.5,
            SUB_BANNER_Y,
            format!(
                "<b>Pareto observation:</b> {pareto_count} out of {} categories account for 80% of occurrences",
                sorted.len()
            ),
        ));
    }

    ChartSpec::new(
        vec![Trace::Bar(trace)],
        layout,
        ChartConfig::export_png(format!("bar_chart_{column}")).with_select_tools(),
    )
}

/// Single box built from the server-side five-number summary.
pub fn box_plot(summary: &BoxSummary, column: &str) -> ChartSpec {
    let iqr = summary.iqr();
    let (lower_whisker, upper_whisker) = summary.fences();

    let trace = BoxTrace {
        y: Some(vec![
            summary.min,
            summary.q1,
            summary.median,
            summary.q3,
            summary.max,
        ]),
        // No raw samples server-side, so points stay hidden and the mean
        // marker is the renderer's approximation.
        boxpoints: Some(BoxPoints::Flag(false)),
        boxmean: Some(true),
        name: Some(column.to_string()),
        marker: Some(Marker::colored("rgba(74, 144, 226, 0.7)")),
        line: Some(LineStyle {
            width: Some(1.0),
            ..LineStyle::default()
        }),
        fillcolor: Some("rgba(74, 144, 226, 0.5)".into()),
        hoverinfo: Some("y".into()),
        hovertemplate: Some(format!(
            "<b>Min:</b> {}<br><b>Q1:</b> {}<br><b>Median:</b> {}<br><b>Q3:</b> {}<br><b>Max:</b> {}<br><b>IQR:</b> {}<extra></extra>",
            format_number(summary.min),
            format_number(summary.q1),
            format_number(summary.median),
            format_number(summary.q3),
            format_number(summary.max),
            format_number(iqr),
        )),
        ..BoxTrace::default()
    };

    let layout = Layout::headline(format!("Box Plot of {column}"))
        .with_yaxis(AxisSpec {
            zeroline: Some(false),
            ..AxisSpec::titled_grid(column)
        })
        .with_annotation(Annotation::stats_banner(
            BANNER_Y,
            format!(
                "<b>Box Plot Statistics:</b> Min={}, Q1={}, Median={}, Q3={}, Max={}",
                format_number(summary.min),
                format_number(summary.q1),
                format_number(summary.median),
                format_number(summary.q3),
                format_number(summary.max),
            ),
        ))
        .with_annotation(Annotation::stats_banner(
            SUB_BANNER_Y,
            format!(
                "<b>Additional Statistics:</b> IQR={}, Lower Whisker={}, Upper Whisker={}",
                format_number(iqr),
                format_number(lower_whisker),
                format_number(upper_whisker),
            ),
        ));

    ChartSpec::new(
        vec![Trace::Box(trace)],
        layout,
        ChartConfig::export_png(format!("boxplot_{column}")),
    )
}

/// Share-of-total pie, largest slice pulled out; slices under 3% fold into
/// an "Other" slice once there are more than ten categories.
pub fn pie(rows: &[LabelledValue], column: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!("Pie chart of {column} (no data)"));
    }
    let mut sorted: Vec<&LabelledValue> = rows.iter().collect();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    let total: f64 = sorted.iter().map(|r| r.value).sum();
    let share = |value: f64| if total > 0.0 { value / total } else { 0.0 };

    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut percents: Vec<String> = Vec::new();
    let mut other_count = 0usize;
    let mut other_value = 0.0;
    for item in &sorted {
        if share(item.value) < 0.03 && sorted.len() > 10 {
            other_count += 1;
            other_value += item.value;
        } else {
            labels.push(item.label.0.clone());
            values.push(item.value);
            percents.push(format!("{:.1}", share(item.value) * 100.0));
        }
    }
    if other_count > 0 {
        labels.push(format!("Other ({other_count} categories)"));
        values.push(other_value);
        percents.push(format!("{:.1}", share(other_value) * 100.0));
    }

    let mut colors = palette(PaletteColor::Blue, sorted.len());
    colors.truncate(labels.len());
    let slice_count = labels.len();

    let trace = PieTrace {
        labels,
        values,
        text: Some(percents.iter().map(|p| format!("{p}%")).collect()),
        textinfo: Some("label+percent".into()),
        hovertemplate: Some(
            "<b>%{label}</b><br>Count: %{value}<br>Percentage: %{text}<extra></extra>".into(),
        ),
        marker: Some(PaletteMarker {
            colors,
            line: Some(MarkerLine {
                color: Some("rgba(255, 255, 255, 0.8)".into()),
                width: Some(1.5),
            }),
        }),
        pull: Some(
            (0..slice_count)
                .map(|i| if i == 0 { 0.1 } else { 0.0 })
                .collect(),
        ),
        direction: Some("clockwise".into()),
        showlegend: Some(true),
    };

    let legend = if slice_count > 10 {
        Legend {
            orientation: Some("v".into()),
            y: Some(0.5),
            x: Some(1.1),
            xanchor: Some("left".into()),
            yanchor: Some("middle".into()),
            ..Legend::default()
        }
    } else {
        Legend {
            orientation: Some("h".into()),
            y: Some(-0.1),
            x: Some(0.5),
            xanchor: Some("center".into()),
            yanchor: Some("top".into()),
            ..Legend::default()
        }
    };

    let layout = Layout {
        margin: Some(Margin::ltrb(20.0, 100.0, 20.0, 20.0)),
        ..Layout::headline(format!("Pie Chart of {column}"))
    }
    .with_legend(legend)
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Category Statistics:</b> Total categories: {}, Total count: {}, Most frequent: {} ({:.1}%)",
            sorted.len(),
            total,
            sorted[0].label,
            share(sorted[0].value) * 100.0,
        ),
    ));

    ChartSpec::new(
        vec![Trace::Pie(trace)],
        layout,
        ChartConfig::export_png(format!("pie_chart_{column}")),
    )
}

/// Filled density curve with median line and shaded interquartile band.
pub fn density(points: &[DensityPoint], summary: &BoxSummary, column: &str) -> ChartSpec {
    if points.is_empty() {
        return ChartSpec::empty(format!("Density plot of {column} (no data)"));
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let top = max_y * 1.1;
    let iqr = summary.iqr();

    let curve = ScatterTrace {
        name: Some("Density".into()),
        line: Some(LineStyle::solid("rgba(16, 185, 129, 1)", 2.0)),
        hovertemplate: Some("<b>x</b>: %{x}<br><b>Density</b>: %{y}<extra></extra>".into()),
        fill: Some("tozeroy".into()),
        fillcolor: Some("rgba(16, 185, 129, 0.2)".into()),
        ..ScatterTrace::lines(xs, ys)
    };
    let median_line = ScatterTrace {
        hovertemplate: Some(format!(
            "<b>Median</b>: {}<extra></extra>",
            format_number(summary.median)
        )),
        ..ScatterTrace::vline(
            summary.median,
            0.0,
            top,
            LineStyle::dashed("rgba(37, 99, 235, 1)", 2.0, "dot"),
            "Median",
        )
    };
    let iqr_band = ScatterTrace {
        x: Some(vec![summary.q1, summary.q1, summary.q3, summary.q3].into()),
        y: Some(vec![0.0, top, top, 0.0].into()),
        fill: Some("toself".into()),
        fillcolor: Some("rgba(59, 130, 246, 0.2)".into()),
        line: Some(LineStyle {
            width: Some(0.0),
            ..LineStyle::default()
        }),
        name: Some("IQR Range".into()),
        hovertemplate: Some(format!(
            "<b>IQR Range</b><br>Q1: {}<br>Q3: {}<br>IQR: {}<extra></extra>",
            format_number(summary.q1),
            format_number(summary.q3),
            format_number(iqr),
        )),
        hoverlabel: Some(HoverLabel {
            bgcolor: Some("rgba(59, 130, 246, 0.8)".into()),
            ..HoverLabel::default()
        }),
        ..ScatterTrace::default()
    };
    let quartile_line = |value: f64, name: &str| ScatterTrace {
        showlegend: Some(true),
        hovertemplate: Some(format!(
            "<b>{name}</b>: {}<extra></extra>",
            format_number(value)
        )),
        ..ScatterTrace::vline(
            value,
            0.0,
            top,
            LineStyle::dashed("rgba(59, 130, 246, 0.8)", 1.0, "dot"),
            name,
        )
    };

    let layout = Layout {
        hovermode: Some("closest".into()),
        ..Layout::headline(format!("Density Plot of {column}"))
    }
    .with_xaxis(AxisSpec::titled_grid(column))
    .with_yaxis(AxisSpec::titled_grid("Density"))
    .with_legend(Legend::horizontal_below(-0.15))
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Distribution Statistics:</b> Min={}, Median={}, Max={}",
            format_number(summary.min),
            format_number(summary.median),
            format_number(summary.max),
        ),
    ))
    .with_annotation(Annotation::stats_banner(
        SUB_BANNER_Y,
        format!(
            "<b>Quartiles:</b> Q1={}, Q3={}, IQR={}",
            format_number(summary.q1),
            format_number(summary.q3),
            format_number(iqr),
        ),
    ));

    ChartSpec::new(
        vec![
            Trace::Scatter(curve),
            Trace::Scatter(median_line),
            Trace::Scatter(iqr_band),
            Trace::Scatter(quartile_line(summary.q1, "Q1")),
            Trace::Scatter(quartile_line(summary.q3, "Q3")),
        ],
        layout,
        ChartConfig::export_png(format!("density_plot_{column}")).with_draw_tools(),
    )
}

/// Pseudo-random but reproducible vertical offset in ±0.25 for the jittered
/// dot layer.
fn index_jitter(i: usize) -> f64 {
    let hashed = (i as u64).wrapping_mul(2_654_435_761) % 1000;
    (hashed as f64 / 1000.0 - 0.5) * 0.5
}

/// One-dimensional strip of values on a hidden y axis, with a jittered
/// shadow layer to expose clusters and a dotted median line.
pub fn dot(samples: &[SampleValue], summary: &BoxSummary, column: &str) -> ChartSpec {
    if samples.is_empty() {
        return ChartSpec::empty(format!("Dot plot of {column} (no data)"));
    }
    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let range = summary.max - summary.min;
    let colors: Vec<String> = values
        .iter()
        .map(|val| {
            let normalized = if range > 0.0 {
                (val - summary.min) / range
            } else {
                0.0
            };
            let r = (64.0 + normalized * (178.0 - 64.0)).floor();
            let g = (68.0 + normalized * (24.0 - 68.0)).floor();
            let b = (68.0 + normalized * (220.0 - 68.0)).floor();
            format!("rgb({r}, {g}, {b})")
        })
        .collect();

    let dots = ScatterTrace {
        marker: Some(Marker {
            color: Some(ColorAttr::PerPoint(colors.clone())),
            size: Some(SizeAttr::Fixed(10.0)),
            symbol: Some("circle".into()),
            line: Some(MarkerLine {
                color: Some("rgba(0,0,0,0.3)".into()),
                width: Some(1.0),
            }),
            opacity: Some(0.8),
            ..Marker::default()
        }),
        hovertemplate: Some("<b>Value:</b> %{x}<extra></extra>".into()),
        name: Some(column.to_string()),
        ..ScatterTrace::markers(values.clone(), vec![0.0; values.len()])
    };
    let jittered = ScatterTrace {
        marker: Some(Marker {
            color: Some(ColorAttr::PerPoint(colors)),
            size: Some(SizeAttr::Fixed(6.0)),
            opacity: Some(0.4),
            symbol: Some("circle".into()),
            ..Marker::default()
        }),
        hovertemplate: Some("<b>Value:</b> %{x}<extra></extra>".into()),
        name: Some("Distribution".into()),
        showlegend: Some(false),
        ..ScatterTrace::markers(
            values.clone(),
            (0..values.len()).map(index_jitter).collect::<Vec<f64>>(),
        )
    };
    let median_line = ScatterTrace {
        hovertemplate: Some(format!(
            "<b>Median:</b> {}<extra></extra>",
            format_number(summary.median)
        )),
        ..ScatterTrace::vline(
            summary.median,
            -1.0,
            1.0,
            LineStyle::dashed("green", 2.0, "dot"),
            "Median",
        )
    };

    let layout = Layout {
        hovermode: Some("closest".into()),
        margin: Some(Margin {
            t: Some(100.0),
            b: Some(80.0),
            ..Margin::default()
        }),
        ..Layout::headline(format!("Dot Plot of {column}"))
    }
    .with_xaxis(AxisSpec {
        zeroline: Some(false),
        ..AxisSpec::titled_grid(column)
    })
    .with_yaxis(AxisSpec {
        visible: Some(false),
        zeroline: Some(false),
        range: Some([-1.0, 1.0]),
        ..AxisSpec::default()
    })
    .with_legend(Legend::horizontal_below(-0.15))
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Statistics:</b> Min={}, Max={}, Median={}",
            format_number(summary.min),
            format_number(summary.max),
            format_number(summary.median),
        ),
    ))
    .with_annotation(Annotation {
        font: Some(Font::sized(10.0)),
        ..Annotation::stats_banner(
            -0.15,
            "Points are jittered vertically to show density. Darker points show actual positions.",
        )
    });

    ChartSpec::new(
        vec![
            Trace::Scatter(dots),
            Trace::Scatter(jittered),
            Trace::Scatter(median_line),
        ],
        layout,
        ChartConfig::export_png(format!("dot_plot_{column}")),
    )
}

/// Descending frequency bars with the cumulative-percent line on a second
/// axis and the 80% threshold marked.
pub fn pareto(rows: &[ParetoEntry], column: &str) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!("Pareto chart of {column} (no data)"));
    }
    let categories: Vec<String> = rows.iter().map(|r| r.category.0.clone()).collect();
    let counts: Vec<f64> = rows.iter().map(|r| r.count).collect();
    let total: f64 = counts.iter().sum();
    let max_count = counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let threshold = rows.iter().position(|r| r.cumulative_pct >= 80.0);
    let pareto_categories = threshold.map(|i| i + 1).unwrap_or(rows.len());
    let pareto_ratio = pareto_categories as f64 / rows.len() as f64 * 100.0;

    let hover_texts: Vec<String> = rows
        .iter()
        .map(|r| {
            let pct = if total > 0.0 {
                r.count / total * 100.0
            } else {
                0.0
            };
            format!(
                "<b>{}</b><br>Count: {}<br>Percentage: {pct:.1}%<br>Cumulative: {:.1}%",
                r.category, r.count, r.cumulative_pct
            )
        })
        .collect();

    let bars = BarTrace {
        text: Some(
            counts
                .iter()
                .map(|c| {
                    let pct = if total > 0.0 { c / total * 100.0 } else { 0.0 };
                    format!("{pct:.1}%")
                })
                .collect(),
        ),
        textposition: Some("auto".into()),
        hovertext: Some(hover_texts),
        hoverinfo: Some("text".into()),
        marker: Some(Marker {
            color: Some(ColorAttr::PerPoint(palette(PaletteColor::Purple, rows.len()))),
            line: Some(MarkerLine {
                color: Some("rgba(58, 58, 58, 0.5)".into()),
                width: Some(1.0),
            }),
            ..Marker::default()
        }),
        name: Some("Frequency".into()),
        ..BarTrace::new(categories.clone(), counts.clone())
    };
    let cumulative = ScatterTrace {
        mode: Some("lines+markers".into()),
        yaxis: Some("y2".into()),
        marker: Some(Marker {
            color: Some(ColorAttr::Fixed("rgba(239, 68, 68, 1)".into())),
            size: Some(SizeAttr::Fixed(8.0)),
            symbol: Some("circle".into()),
            ..Marker::default()
        }),
        line: Some(LineStyle {
            shape: Some("linear".into()),
            ..LineStyle::solid("rgba(239, 68, 68, 1)", 3.0)
        }),
        name: Some("Cumulative %".into()),
        hovertemplate: Some("<b>%{x}</b><br>Cumulative: %{y:.1f}%<extra></extra>".into()),
        x: Some(categories.clone().into()),
        y: Some(rows.iter().map(|r| r.cumulative_pct).collect::<Vec<f64>>().into()),
        ..ScatterTrace::default()
    };
    let guide = ScatterTrace {
        mode: Some("lines".into()),
        yaxis: Some("y2".into()),
        x: Some(AxisValues::Cats(vec![
            categories[0].clone(),
            categories[categories.len() - 1].clone(),
        ])),
        y: Some(vec![80.0, 80.0].into()),
        line: Some(LineStyle::dashed("rgba(0, 0, 0, 0.5)", 1.0, "dash")),
        name: Some("80% Line".into()),
        hoverinfo: Some("skip".into()),
        ..ScatterTrace::default()
    };

    let mut layout = Layout {
        hovermode: Some("closest".into()),
        bargap: Some(0.2),
        yaxis2: Some(AxisSpec {
            ticksuffix: Some("%".into()),
            overlaying: Some("y".into()),
            side: Some("right".into()),
            range: Some([0.0, 105.0]),
            ..AxisSpec::titled("Cumulative %")
        }),
        ..Layout::headline(format!("Pareto Chart of {column}"))
    }
    .with_xaxis(AxisSpec {
        tickangle: Some(if rows.len() > 10 { -45.0 } else { 0.0 }),
        automargin: Some(true),
        ..AxisSpec::titled(column)
    })
    .with_yaxis(AxisSpec::titled_grid("Frequency").with_range(0.0, max_count * 1.1))
    .with_legend(Legend::horizontal_below(-0.15))
    .with_annotation(Annotation::stats_banner(
        BANNER_Y,
        format!(
            "<b>Pareto Analysis:</b> {pareto_categories} out of {} categories ({pareto_ratio:.1}%) account for 80% of the total frequency",
            rows.len()
        ),
    ));
    if let Some(at) = threshold {
        layout.shapes.push(Shape {
            shape_type: "line".into(),
            x0: Coord::Cat(categories[at].clone()),
            x1: Coord::Cat(categories[at].clone()),
            y0: Coord::Num(0.0),
            y1: Coord::Num(1.0),
            yref: Some("paper".into()),
            line: Some(ShapeLine {
                color: Some("rgba(0, 0, 0, 0.5)".into()),
                width: Some(1.0),
                dash: Some("dot".into()),
            }),
            ..Shape::default()
        });
    }

    ChartSpec::new(
        vec![
            Trace::Bar(bars),
            Trace::Scatter(cumulative),
            Trace::Scatter(guide),
        ],
        layout,
        ChartConfig::export_png(format!("pareto_chart_{column}")).with_select_tools(),
    )
}

/// Distribution shape of the raw samples with inner box and mean line.
pub fn violin(samples: &[SampleValue], column: &str) -> ChartSpec {
    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let Ok(stats) = basic_stats(&values) else {
        return ChartSpec::empty(format!("Violin plot of {column} (no data)"));
    };

    let trace = ViolinTrace {
        y: values,
        name: Some(column.to_string()),
        inner_box: Some(ViolinInnerBox { visible: true }),
        meanline: Some(MeanLine { visible: true }),
        points: Some(BoxPoints::Flag(false)),
        line: Some(LineStyle::solid("rgba(74, 144, 226, 1)", 1.0)),
        fillcolor: Some("rgba(74, 144, 226, 0.5)".into()),
        hoverinfo: Some("y".into()),
        ..ViolinTrace::default()
    };

    let layout = Layout::headline(format!("Violin Plot of {column}"))
        .with_yaxis(AxisSpec {
            zeroline: Some(false),
            ..AxisSpec::titled_grid(column)
        })
        .with_annotation(Annotation::stats_banner(
            BANNER_Y,
            format!(
                "<b>Statistics:</b> Min={}, Median={}, Max={}",
                format_number(stats.min),
                format_number(stats.median),
                format_number(stats.max),
            ),
        ));

    ChartSpec::new(
        vec![Trace::Violin(trace)],
        layout,
        ChartConfig::export_png(format!("violin_plot_{column}")),
    )
}

/// Vertical stems from a zero baseline to each sample, with marker heads.
pub fn stem(samples: &[SampleValue], column: &str) -> ChartSpec {
    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let Ok(stats) = basic_stats(&values) else {
        return ChartSpec::empty(format!("Stem plot of {column} (no data)"));
    };

    // One null-broken segment per sample.
    let mut stem_x: Vec<Option<f64>> = Vec::with_capacity(values.len() * 3);
    let mut stem_y: Vec<Option<f64>> = Vec::with_capacity(values.len() * 3);
    for (i, value) in values.iter().enumerate() {
        stem_x.extend([Some(i as f64), Some(i as f64), None]);
        stem_y.extend([Some(0.0), Some(*value), None]);
    }

    let stems = ScatterTrace {
        mode: Some("lines".into()),
        x: Some(AxisValues::Holey(stem_x)),
        y: Some(AxisValues::Holey(stem_y)),
        line: Some(LineStyle::solid("#1f77b4", 1.0)),
        name: Some("Stems".into()),
        hoverinfo: Some("skip".into()),
        showlegend: Some(false),
        ..ScatterTrace::default()
    };
    let heads = ScatterTrace {
        marker: Some(Marker {
            color: Some(ColorAttr::Fixed("#1f77b4".into())),
            size: Some(SizeAttr::Fixed(6.0)),
            ..Marker::default()
        }),
        name: Some(column.to_string()),
        hovertemplate: Some("<b>Index:</b> %{x}<br><b>Value:</b> %{y}<extra></extra>".into()),
        ..ScatterTrace::markers(
            (0..values.len()).map(|i| i as f64).collect::<Vec<f64>>(),
            values.clone(),
        )
    };

    let layout = Layout::headline(format!("Stem Plot of {column}"))
        .with_xaxis(AxisSpec::titled_grid("Index"))
        .with_yaxis(AxisSpec::titled_grid(column))
        .with_annotation(Annotation::stats_banner(
            BANNER_Y,
            format!(
                "<b>Statistics:</b> Count={}, Mean={}, Max={}",
                stats.count,
                format_number(stats.mean),
                format_number(stats.max),
            ),
        ));

    ChartSpec::new(
        vec![Trace::Scatter(stems), Trace::Scatter(heads)],
        layout,
        ChartConfig::export_png(format!("stem_plot_{column}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Label;

    fn summary() -> BoxSummary {
        BoxSummary {
            min: 1.0,
            q1: 2.0,
            median: 3.0,
            q3: 4.0,
            max: 10.0,
        }
    }

    fn labelled(pairs: &[(&str, f64)]) -> Vec<LabelledValue> {
        pairs
            .iter()
            .map(|(label, value)| LabelledValue {
                label: Label::from(*label),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn histogram_pairs_bars_with_a_mean_line() {
        let data = Histogram {
            bins: vec![0.0, 10.0, 20.0],
            counts: vec![1.0, 3.0],
        };
        let spec = histogram(&data, "total");
        assert_eq!(spec.trace_count(), 2);

        match &spec.data[0] {
            Trace::Bar(bar) => {
                assert_eq!(bar.x, Some(vec![0.0, 10.0].into()));
                assert_eq!(bar.text.as_ref().unwrap()[0], "0.00 to 10");
            }
            other => panic!("expected a bar trace, got {other:?}"),
        }
        match &spec.data[1] {
            // Weighted midpoint mean: (5*1 + 15*3) / 4 = 12.5
            Trace::Scatter(line) => assert_eq!(line.x, Some(vec![12.5, 12.5].into())),
            other => panic!("expected a scatter trace, got {other:?}"),
        }
        assert!(spec.layout.title.as_ref().unwrap().text.contains("total"));
    }

    #[test]
    fn histogram_without_bins_is_empty() {
        let spec = histogram(
            &Histogram {
                bins: vec![1.0],
                counts: vec![],
            },
            "total",
        );
        assert_eq!(spec.trace_count(), 0);
        assert!(
            spec.layout
                .title
                .as_ref()
                .unwrap()
                .text
                .contains("no data")
        );
    }

    #[test]
    fn bar_sorts_descending_and_reports_the_leader() {
        let spec = bar(&labelled(&[("b", 2.0), ("a", 8.0)]), "city");
        match &spec.data[0] {
            Trace::Bar(trace) => {
                assert_eq!(
                    trace.x,
                    Some(AxisValues::Cats(vec!["a".into(), "b".into()]))
                );
                assert_eq!(trace.text.as_ref().unwrap()[0], "80.0%");
            }
            other => panic!("expected a bar trace, got {other:?}"),
        }
        let banner = &spec.layout.annotations[0];
        assert!(banner.text.contains("Most frequent: a (80.0%)"));
    }

    #[test]
    fn bar_pareto_callout_needs_a_dominant_head() {
        // 3 of 12 categories reach 80%: callout present.
        let mut rows = vec![("x", 40.0), ("y", 30.0), ("z", 12.0)];
        for _ in 0..9 {
            rows.push(("t", 2.0));
        }
        let dominant = bar(&labelled(&rows), "c");
        assert_eq!(dominant.layout.annotations.len(), 2);
        assert!(dominant.layout.annotations[1].text.contains("Pareto observation"));

        // Uniform distribution: no callout.
        let uniform = bar(&labelled(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]), "c");
        assert_eq!(uniform.layout.annotations.len(), 1);
    }

    #[test]
    fn box_plot_carries_the_five_number_summary() {
        let spec = box_plot(&summary(), "total");
        match &spec.data[0] {
            Trace::Box(trace) => {
                assert_eq!(trace.y, Some(vec![1.0, 2.0, 3.0, 4.0, 10.0]));
                assert_eq!(trace.boxpoints, Some(BoxPoints::Flag(false)));
                assert_eq!(trace.boxmean, Some(true));
            }
            other => panic!("expected a box trace, got {other:?}"),
        }
        // Upper whisker clamps to q3 + 1.5*IQR = 7.
        assert!(spec.layout.annotations[1].text.contains("Upper Whisker=7"));
    }

    #[test]
    fn pie_groups_small_slices_past_ten_categories() {
        let mut rows = vec![("big", 900.0)];
        for _ in 0..11 {
            rows.push(("tiny", 1.0));
        }
        let spec = pie(&labelled(&rows), "city");
        match &spec.data[0] {
            Trace::Pie(trace) => {
                assert_eq!(trace.labels.len(), 2);
                assert_eq!(trace.labels[1], "Other (11 categories)");
                assert_eq!(trace.values[1], 11.0);
                assert_eq!(trace.pull.as_ref().unwrap()[0], 0.1);
            }
            other => panic!("expected a pie trace, got {other:?}"),
        }
    }

    #[test]
    fn density_builds_curve_median_and_iqr_overlays() {
        let points = vec![
            DensityPoint { x: 0.0, y: 0.1 },
            DensityPoint { x: 5.0, y: 0.4 },
        ];
        let spec = density(&points, &summary(), "total");
        assert_eq!(spec.trace_count(), 5);
        match &spec.data[2] {
            Trace::Scatter(band) => {
                assert_eq!(band.x, Some(vec![2.0, 2.0, 4.0, 4.0].into()));
                assert_eq!(band.fill.as_deref(), Some("toself"));
            }
            other => panic!("expected the IQR band, got {other:?}"),
        }
    }

    #[test]
    fn dot_jitter_is_reproducible() {
        let samples = vec![
            SampleValue { value: 1.0 },
            SampleValue { value: 5.0 },
            SampleValue { value: 10.0 },
        ];
        assert_eq!(dot(&samples, &summary(), "v"), dot(&samples, &summary(), "v"));

        let spec = dot(&samples, &summary(), "v");
        assert_eq!(spec.trace_count(), 3);
        let yaxis = spec.layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.visible, Some(false));
        assert_eq!(yaxis.range, Some([-1.0, 1.0]));
        for i in 0..100 {
            assert!(index_jitter(i).abs() <= 0.25);
        }
    }

    #[test]
    fn pareto_marks_the_threshold_category() {
        let rows = vec![
            ParetoEntry {
                category: Label::from("a"),
                count: 50.0,
                cumulative_pct: 50.0,
            },
            ParetoEntry {
                category: Label::from("b"),
                count: 35.0,
                cumulative_pct: 85.0,
            },
            ParetoEntry {
                category: Label::from("c"),
                count: 15.0,
                cumulative_pct: 100.0,
            },
        ];
        let spec = pareto(&rows, "city");
        assert_eq!(spec.trace_count(), 3);
        assert_eq!(spec.layout.shapes.len(), 1);
        assert_eq!(spec.layout.shapes[0].x0, Coord::Cat("b".into()));

        let second = spec.layout.yaxis2.as_ref().unwrap();
        assert_eq!(second.range, Some([0.0, 105.0]));
        assert_eq!(second.ticksuffix.as_deref(), Some("%"));
        assert!(spec.layout.annotations[0].text.contains("2 out of 3"));
    }

    #[test]
    fn stem_breaks_segments_with_nulls() {
        let samples = vec![SampleValue { value: 2.0 }, SampleValue { value: 4.0 }];
        let spec = stem(&samples, "v");
        match &spec.data[0] {
            Trace::Scatter(stems) => {
                assert_eq!(
                    stems.y,
                    Some(AxisValues::Holey(vec![
                        Some(0.0),
                        Some(2.0),
                        None,
                        Some(0.0),
                        Some(4.0),
                        None,
                    ]))
                );
            }
            other => panic!("expected the stem trace, got {other:?}"),
        }
    }

    #[test]
    fn violin_of_nothing_is_empty() {
        let spec = violin(&[], "v");
        assert_eq!(spec.trace_count(), 0);
        let with_data = violin(&[SampleValue { value: 3.0 }], "v");
        assert_eq!(with_data.trace_count(), 1);
    }
}
