//! Builders for the many-column chart kinds.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::api::{
    ChordLink, ColumnRows, FlowLink, Label, NestedCounts, PairBlock, Point3, RadarEntry,
    UpsetEntry,
};
use crate::core::{
    Annotation, AxisSpec, Camera, CameraEye, ChartConfig, ChartSpec, Coord, Font, GridSpec,
    HoverLabel, Layout, Legend, Margin, Polar, PolarAxis, Scene, SceneAxis, Title,
};
use crate::hierarchy::{self, FlatHierarchy};
use crate::stats::{basic_stats, column_summary};
use crate::trace::{
    BarTrace, ColorAttr, Colorbar, ContourSettings, ContourTrace, CustomData, Dimension,
    LineStyle, Marker, MarkerLine, PaletteMarker, ParcoordsLine, ParcoordsTrace, PathBar,
    SankeyLink, SankeyNode, SankeyTrace, Scatter3dTrace, ScatterPolarTrace, ScatterTrace,
    SizeAttr, SunburstTrace, Trace, TreemapTrace,
};

use super::{categorical_colors, hex_to_rgba};

const HIERARCHY_HOVER: &str = "<b>%{label}</b><br>Value: %{value:,.2f}<br>Path: %{id}<br>Percentage of parent: %{percentParent:.1%}<br>Percentage of total: %{percentRoot:.1%}<extra></extra>";

/// Hover styling shared by the dense multivariate charts.
fn white_hover() -> HoverLabel {
    HoverLabel {
        bgcolor: Some("white".to_string()),
        bordercolor: Some("#888".to_string()),
        font: Some(Font {
            family: Some("Arial".to_string()),
            ..Font::sized(12.0)
        }),
    }
}

/// Re-express a palette color at the given opacity. Hex colors expand to
/// `rgba(...)`; overflow palette entries already in rgba form get their
/// alpha replaced.
fn with_alpha(color: &str, alpha: f64) -> String {
    if color.starts_with('#') {
        return hex_to_rgba(color, alpha);
    }
    match color.rfind(',') {
        Some(at) if color.starts_with("rgba(") => format!("{}, {alpha})", &color[..at]),
        _ => color.to_string(),
    }
}

fn numeric_cell(row: &Map<String, Value>, col: &str) -> Option<f64> {
    row.get(col).and_then(Value::as_f64)
}

/// Display form of a raw category cell, matching how labels are normalized
/// when decoded.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Per-node colors interpolated between two rgb endpoints by nesting depth.
fn depth_colors(flat: &FlatHierarchy, from: [f64; 3], to: [f64; 3]) -> Vec<String> {
    let max_depth = flat.max_depth() as f64;
    flat.depths()
        .iter()
        .map(|&depth| {
            let ratio = depth as f64 / max_depth;
            let channel = |i: usize| (from[i] + ratio * (to[i] - from[i])).round();
            format!("rgb({},{},{})", channel(0), channel(1), channel(2))
        })
        .collect()
}

/// All requested column pairs as one near-square subplot grid, each panel
/// annotated with the range of both columns.
pub fn pair_plot(blocks: &[PairBlock]) -> ChartSpec {
    if blocks.is_empty() {
        return ChartSpec::empty("Pair Plot (no data)");
    }
    let colors = categorical_colors(blocks.len());
    let side = (blocks.len() as f64).sqrt().ceil() as usize;

    let mut data = Vec::with_capacity(blocks.len());
    let mut layout = Layout {
        grid: Some(GridSpec {
            rows: side,
            columns: side,
            pattern: Some("independent".to_string()),
            roworder: None,
        }),
        showlegend: Some(false),
        margin: Some(Margin::ltrb(60.0, 50.0, 30.0, 60.0)),
        hoverlabel: Some(HoverLabel {
            bgcolor: Some("#FFF".to_string()),
            font: Some(Font::sized(12.0)),
            ..HoverLabel::default()
        }),
        ..Layout::headline("Pair Plot")
    };

    for (i, block) in blocks.iter().enumerate() {
        let xs: Vec<f64> = block.data.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = block.data.iter().map(|p| p.y).collect();
        let (xref, yref) = if i == 0 {
            ("x".to_string(), "y".to_string())
        } else {
            (format!("x{}", i + 1), format!("y{}", i + 1))
        };

        data.push(Trace::Scatter(ScatterTrace {
            name: Some(format!("{} vs {}", block.x_col, block.y_col)),
            marker: Some(Marker {
                color: Some(ColorAttr::Fixed(colors[i].clone())),
                size: Some(SizeAttr::Fixed(8.0)),
                opacity: Some(0.7),
                line: Some(MarkerLine {
                    color: Some("white".to_string()),
                    width: Some(1.0),
                }),
                ..Marker::default()
            }),
            hovertemplate: Some(format!(
                "<b>{}</b>: %{{x}}<br><b>{}</b>: %{{y}}<extra></extra>",
                block.x_col, block.y_col
            )),
            xaxis: Some(xref.clone()),
            yaxis: Some(yref.clone()),
            ..ScatterTrace::markers(xs.clone(), ys.clone())
        }));

        if let (Ok(x_stats), Ok(y_stats)) = (basic_stats(&xs), basic_stats(&ys)) {
            layout.annotations.push(Annotation {
                x: Some(Coord::Num(0.5)),
                y: Some(Coord::Num(-0.17)),
                xref: Some(format!("{xref} domain")),
                yref: Some(format!("{yref} domain")),
                text: format!(
                    "{} (Min: {:.2}, Max: {:.2}, Avg: {:.2})",
                    block.x_col, x_stats.min, x_stats.max, x_stats.mean
                ),
                showarrow: false,
                font: Some(Font::sized(10.0)),
                ..Annotation::default()
            });
            layout.annotations.push(Annotation {
                x: Some(Coord::Num(-0.17)),
                y: Some(Coord::Num(0.5)),
                xref: Some(format!("{xref} domain")),
                yref: Some(format!("{yref} domain")),
                text: format!(
                    "{} (Min: {:.2}, Max: {:.2}, Avg: {:.2})",
                    block.y_col, y_stats.min, y_stats.max, y_stats.mean
                ),
                showarrow: false,
                font: Some(Font::sized(10.0)),
                textangle: Some(-90.0),
                ..Annotation::default()
            });
        }
    }

    ChartSpec::new(
        data,
        layout,
        ChartConfig::export_png("pair_plot").with_draw_tools(),
    )
}

/// One parcoords trace per category (or a single blue trace), every
/// dimension labelled with its five-number summary as tick text.
pub fn parallel_coordinates(
    rows: &ColumnRows,
    cols: &[String],
    category_col: Option<&str>,
) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty("Parallel Coordinates (no data)");
    }

    let summaries: Vec<_> = cols
        .iter()
        .map(|col| {
            let values: Vec<f64> = rows.iter().filter_map(|row| numeric_cell(row, col)).collect();
            column_summary(&values)
        })
        .collect();

    let dimensions_for = |subset: &[&Map<String, Value>]| -> Vec<Dimension> {
        cols.iter()
            .zip(&summaries)
            .map(|(col, summary)| {
                let values: Vec<Option<f64>> =
                    subset.iter().map(|row| numeric_cell(row, col)).collect();
                match summary {
                    Some(s) => Dimension {
                        label: col.clone(),
                        values,
                        range: [s.min, s.max],
                        tickvals: vec![s.min, s.q1, s.median, s.q3, s.max],
                        ticktext: vec![
                            format!("Min: {:.2}", s.min),
                            format!("Q1: {:.2}", s.q1),
                            format!("Med: {:.2}", s.median),
                            format!("Q3: {:.2}", s.q3),
                            format!("Max: {:.2}", s.max),
                        ],
                    },
                    None => Dimension {
                        label: col.clone(),
                        values,
                        range: [0.0, 100.0],
                        ..Dimension::default()
                    },
                }
            })
            .collect()
    };

    let mut data = Vec::new();
    match category_col {
        Some(category) => {
            let mut seen: Vec<&Value> = Vec::new();
            for row in rows {
                if let Some(value) = row.get(category) {
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
            }
            let colors = categorical_colors(seen.len());
            for (idx, cat) in seen.iter().enumerate() {
                let subset: Vec<&Map<String, Value>> = rows
                    .iter()
                    .filter(|row| row.get(category) == Some(*cat))
                    .collect();
                data.push(Trace::Parcoords(ParcoordsTrace {
                    line: ParcoordsLine::constant(colors[idx].clone()),
                    dimensions: dimensions_for(&subset),
                    name: Some(format!("{category}: {}", cell_text(cat))),
                }));
            }
        }
        None => {
            let everything: Vec<&Map<String, Value>> = rows.iter().collect();
            data.push(Trace::Parcoords(ParcoordsTrace {
                line: ParcoordsLine::constant("#1f77b4"),
                dimensions: dimensions_for(&everything),
                name: None,
            }));
        }
    }

    let layout = Layout {
        title: Some(Title::sized(
            match category_col {
                Some(category) => format!("Parallel Coordinates by {category}"),
                None => "Parallel Coordinates".to_string(),
            },
            18.0,
        )),
        margin: Some(Margin::ltrb(80.0, 100.0, 80.0, 80.0)),
        showlegend: Some(category_col.is_some()),
        legend: Some(Legend {
            title: category_col.map(Title::from),
            ..Legend::horizontal_below(-0.2)
        }),
        ..Layout::default()
    };

    ChartSpec::new(
        data,
        layout,
        ChartConfig::export_png_auto("parallel_coordinates"),
    )
}

/// One polygon per category row. With several value columns each dimension
/// is rescaled to 0-1 so the shapes stay comparable; the raw readings ride
/// along in hover text and customdata.
pub fn radar_chart(rows: &[RadarEntry], category_col: &str, value_cols: &[String]) -> ChartSpec {
    if rows.is_empty() {
        return ChartSpec::empty(format!("Radar Comparison by {category_col} (no data)"));
    }
    let normalize = value_cols.len() > 1;

    let mut bounds: HashMap<&str, (f64, f64)> = HashMap::new();
    if normalize {
        for col in value_cols {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for row in rows {
                if let Some(v) = row.numeric(col) {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            if min.is_finite() {
                bounds.insert(col.as_str(), (min, max));
            }
        }
    }
    // Zero-spread dimensions pass through unscaled.
    let rescaled = |col: &str, value: f64| -> f64 {
        match bounds.get(col) {
            Some((min, max)) if max > min => (value - min) / (max - min),
            _ => value,
        }
    };

    let max_value = if normalize {
        1.0
    } else {
        let mut raw = f64::NEG_INFINITY;
        for row in rows {
            for key in row.values.keys() {
                raw = raw.max(row.numeric(key).unwrap_or(0.0));
            }
        }
        if raw.is_finite() { raw } else { 0.0 }
    };

    let colors = categorical_colors(rows.len());
    let mut data = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let color = colors[idx].clone();
        let mut r = Vec::with_capacity(row.values.len());
        let mut theta = Vec::with_capacity(row.values.len());
        let mut hover = Vec::with_capacity(row.values.len());
        let mut raw_values = Vec::with_capacity(row.values.len());

        for key in row.values.keys() {
            theta.push(key.clone());
            match row.numeric(key) {
                Some(value) => {
                    let scaled = rescaled(key, value);
                    r.push(scaled);
                    hover.push(if normalize {
                        format!("<b>{key}</b>: {value:.2} <i>(normalized: {scaled:.2})</i>")
                    } else {
                        format!("<b>{key}</b>: {value:.2}")
                    });
                    raw_values.push(value.to_string());
                }
                None => {
                    r.push(0.0);
                    hover.push(if normalize {
                        format!("<b>{key}</b>: N/A <i>(normalized: 0.00)</i>")
                    } else {
                        format!("<b>{key}</b>: N/A")
                    });
                    raw_values.push("N/A".to_string());
                }
            }
        }

        data.push(Trace::Scatterpolar(ScatterPolarTrace {
            r,
            theta,
            name: Some(row.category.0.clone()),
            mode: Some("lines+markers".to_string()),
            fill: Some("toself".to_string()),
            fillcolor: Some(with_alpha(&color, 0.4)),
            line: Some(LineStyle {
                shape: Some("spline".to_string()),
                ..LineStyle::solid(color.clone(), 2.5)
            }),
            marker: Some(Marker {
                size: Some(SizeAttr::Fixed(5.0)),
                color: Some(ColorAttr::Fixed(color.clone())),
                symbol: Some("circle".to_string()),
                ..Marker::default()
            }),
            hovertemplate: Some(format!(
                "{}<br><b>Category: </b>%{{fullData.name}}<extra></extra>",
                hover.join("<br>")
            )),
            hoverlabel: Some(HoverLabel {
                bgcolor: Some("white".to_string()),
                bordercolor: Some(color),
                font: Some(Font {
                    family: Some("Arial".to_string()),
                    ..Font::sized(12.0)
                }),
            }),
            customdata: Some(CustomData::Text(raw_values)),
        }));
    }

    let note = if normalize {
        format!(
            "Variables: {} (normalized to 0-1 scale)",
            value_cols.join(", ")
        )
    } else {
        format!("Variables: {}", value_cols.join(", "))
    };
    let layout = Layout {
        title: Some(Title::sized(
            format!("Radar Comparison by {category_col}"),
            20.0,
        )),
        polar: Some(Polar {
            radialaxis: Some(PolarAxis {
                visible: Some(true),
                range: Some([0.0, max_value * 1.05]),
                tickfont: Some(Font {
                    color: Some("#444".to_string()),
                    ..Font::sized(10.0)
                }),
                tickangle: Some(45.0),
                gridcolor: Some("rgba(0,0,0,0.1)".to_string()),
                linecolor: Some("rgba(0,0,0,0.15)".to_string()),
                nticks: Some(5),
                tickformat: normalize.then(|| ".1f".to_string()),
                ..PolarAxis::default()
            }),
            angularaxis: Some(PolarAxis {
                tickfont: Some(Font {
                    color: Some("#333".to_string()),
                    ..Font::sized(12.0)
                }),
                linecolor: Some("rgba(0,0,0,0.2)".to_string()),
                gridcolor: Some("rgba(0,0,0,0.05)".to_string()),
                rotation: Some(90.0),
                direction: Some("clockwise".to_string()),
                ..PolarAxis::default()
            }),
            bgcolor: Some("rgba(240,240,250,0.2)".to_string()),
            hole: Some(0.05),
        }),
        margin: Some(Margin::ltrb(80.0, 100.0, 100.0, 80.0)),
        paper_bgcolor: Some("rgba(255,255,255,0)".to_string()),
        plot_bgcolor: Some("rgba(255,255,255,0)".to_string()),
        dragmode: Some(false),
        ..Layout::default()
    }
    .with_legend(Legend {
        orientation: Some("v".to_string()),
        x: Some(1.05),
        y: Some(1.0),
        xanchor: Some("left".to_string()),
        yanchor: Some("top".to_string()),
        bgcolor: Some("rgba(255,255,255,0.8)".to_string()),
        bordercolor: Some("rgba(0,0,0,0.1)".to_string()),
        borderwidth: Some(1.0),
        title: Some(Title::sized(category_col, 14.0)),
    })
    .with_annotation(Annotation {
        font: Some(Font {
            color: Some("#666".to_string()),
            ..Font::sized(12.0)
        }),
        ..Annotation::paper(0.5, -0.12, note)
    });

    let config = ChartConfig {
        mode_bar_buttons_to_add: vec!["resetScale".to_string(), "hoverClosest".to_string()],
        mode_bar_buttons_to_remove: vec![
            "zoom2d".to_string(),
            "pan2d".to_string(),
            "select2d".to_string(),
            "lasso2d".to_string(),
        ],
        ..ChartConfig::export_png_auto("radar_chart")
    };
    ChartSpec::new(data, layout, config)
}

/// Rectangular hierarchy sized by total value, shaded teal to blue by depth.
pub fn treemap(tree: &NestedCounts, path_cols: &[String], value_col: &str) -> ChartSpec {
    let path = path_cols.join(" → ");
    let title = format!("Treemap of {value_col} by {path}");
    let flat = hierarchy::flatten(tree);
    if flat.is_empty() {
        return ChartSpec::empty(format!("{title} (no data)"));
    }

    let trace = TreemapTrace {
        marker: Some(PaletteMarker {
            colors: depth_colors(&flat, [65.0, 146.0, 153.0], [0.0, 46.0, 233.0]),
            line: Some(MarkerLine {
                color: Some("rgba(255,255,255,0.7)".to_string()),
                width: Some(1.0),
            }),
        }),
        ids: flat.ids,
        labels: flat.labels,
        parents: flat.parents,
        values: flat.values,
        textinfo: Some("label+value+percent parent+percent root".to_string()),
        branchvalues: Some("total".to_string()),
        pathbar: Some(PathBar { visible: true }),
        hovertemplate: Some(HIERARCHY_HOVER.to_string()),
        hoverlabel: Some(white_hover()),
    };

    let layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        margin: Some(Margin::ltrb(10.0, 50.0, 10.0, 10.0)),
        ..Layout::default()
    }
    .with_annotation(Annotation::paper(
        0.5,
        -0.05,
        format!("Path hierarchy: {path} | Value: {value_col}"),
    ));

    ChartSpec::new(
        vec![Trace::Treemap(trace)],
        layout,
        ChartConfig::export_png_auto("treemap"),
    )
}

/// Radial variant of the treemap, shaded orange to violet by depth.
pub fn sunburst(tree: &NestedCounts, path_cols: &[String], value_col: &str) -> ChartSpec {
    let path = path_cols.join(" → ");
    let title = format!("Sunburst Chart of {value_col} by {path}");
    let flat = hierarchy::flatten(tree);
    if flat.is_empty() {
        return ChartSpec::empty(format!("{title} (no data)"));
    }

    let trace = SunburstTrace {
        marker: Some(PaletteMarker {
            colors: depth_colors(&flat, [255.0, 165.0, 0.0], [100.0, 30.0, 220.0]),
            line: Some(MarkerLine {
                color: Some("rgba(255,255,255,0.7)".to_string()),
                width: Some(1.0),
            }),
        }),
        ids: flat.ids,
        labels: flat.labels,
        parents: flat.parents,
        values: flat.values,
        textinfo: Some("label+value+percent parent".to_string()),
        branchvalues: Some("total".to_string()),
        hovertemplate: Some(HIERARCHY_HOVER.to_string()),
        hoverlabel: Some(white_hover()),
    };

    let layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        margin: Some(Margin::ltrb(10.0, 50.0, 10.0, 10.0)),
        ..Layout::default()
    }
    .with_annotation(Annotation::paper(
        0.5,
        -0.05,
        format!("Path hierarchy: {path} | Value: {value_col}"),
    ));

    ChartSpec::new(
        vec![Trace::Sunburst(trace)],
        layout,
        ChartConfig::export_png_auto("sunburst"),
    )
}

/// Category-to-category flows rendered as a sankey; links without a weight
/// column count as 1 each.
pub fn chord_diagram(
    links: &[ChordLink],
    source_col: &str,
    target_col: &str,
    value_col: Option<&str>,
) -> ChartSpec {
    let title = match value_col {
        Some(value) => format!("Flow of {value} between {source_col} and {target_col}"),
        None => format!("Connections between {source_col} and {target_col}"),
    };
    if links.is_empty() {
        return ChartSpec::empty(format!("{title} (no data)"));
    }

    let mut nodes: Vec<&Label> = Vec::new();
    for link in links {
        if !nodes.contains(&&link.source) {
            nodes.push(&link.source);
        }
    }
    for link in links {
        if !nodes.contains(&&link.target) {
            nodes.push(&link.target);
        }
    }
    let colors = categorical_colors(nodes.len());
    let index_of = |label: &Label| nodes.iter().position(|n| *n == label).unwrap_or(0);

    let values: Vec<f64> = links.iter().map(|l| l.value.unwrap_or(1.0)).collect();
    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let shares: Vec<f64> = values
        .iter()
        .map(|v| if max_value > 0.0 { v / max_value } else { 0.0 })
        .collect();
    let source_indices: Vec<usize> = links.iter().map(|l| index_of(&l.source)).collect();

    let trace = SankeyTrace {
        orientation: Some("h".to_string()),
        node: SankeyNode {
            label: nodes.iter().map(|n| n.0.clone()).collect(),
            color: Some(colors.clone()),
            pad: 15.0,
            thickness: 20.0,
            line: Some(MarkerLine {
                color: Some("black".to_string()),
                width: Some(0.5),
            }),
            hovertemplate: Some(format!(
                "<b>%{{label}}</b><br>Total flow: {}%{{value}}<extra></extra>",
                value_col.map(|v| format!("{v}: ")).unwrap_or_default()
            )),
        },
        link: SankeyLink {
            source: source_indices.clone(),
            target: links.iter().map(|l| index_of(&l.target)).collect(),
            value: values,
            color: Some(
                source_indices
                    .iter()
                    .map(|&i| with_alpha(&colors[i], 0.4))
                    .collect(),
            ),
            hovertemplate: Some(format!(
                "<b>%{{source.label}} → %{{target.label}}</b><br>{}: %{{value}}<br>Percentage: %{{customdata:.1%}}<extra></extra>",
                value_col.unwrap_or("Value")
            )),
            customdata: Some(CustomData::Nums(shares)),
        },
    };

    let note = match value_col {
        Some(value) => format!("Source: {source_col} | Target: {target_col} | Value: {value}"),
        None => format!("Source: {source_col} | Target: {target_col}"),
    };
    let layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        margin: Some(Margin::ltrb(25.0, 50.0, 25.0, 50.0)),
        ..Layout::default()
    }
    .with_annotation(Annotation::paper(0.5, -0.1, note));

    ChartSpec::new(
        vec![Trace::Sankey(trace)],
        layout,
        ChartConfig::export_png_auto("chord_diagram"),
    )
}

/// Multi-stage flow diagram; link colors inherit the source node hue.
pub fn sankey(links: &[FlowLink], cols: &[String]) -> ChartSpec {
    let path = cols.join(" → ");
    let title = format!("Sankey Diagram: {path}");
    if links.is_empty() {
        return ChartSpec::empty(format!("{title} (no data)"));
    }

    let mut labels: Vec<&Label> = Vec::new();
    let mut sources: Vec<&Label> = Vec::new();
    for link in links {
        if !labels.contains(&&link.source) {
            labels.push(&link.source);
        }
        if !labels.contains(&&link.target) {
            labels.push(&link.target);
        }
        if !sources.contains(&&link.source) {
            sources.push(&link.source);
        }
    }
    let source_colors = categorical_colors(sources.len());
    let color_of = |label: &Label| -> &str {
        sources
            .iter()
            .position(|s| *s == label)
            .map(|i| source_colors[i].as_str())
            .unwrap_or("#1f77b4")
    };

    let total: f64 = links.iter().map(|l| l.value).sum();
    let mut source_totals: HashMap<&Label, f64> = HashMap::new();
    for link in links {
        *source_totals.entry(&link.source).or_insert(0.0) += link.value;
    }
    let shares: Vec<[f64; 2]> = links
        .iter()
        .map(|link| {
            let of_total = if total > 0.0 { link.value / total } else { 0.0 };
            let of_source = source_totals
                .get(&link.source)
                .copied()
                .filter(|t| *t > 0.0)
                .map(|t| link.value / t)
                .unwrap_or(0.0);
            [of_total, of_source]
        })
        .collect();

    let index_of = |label: &Label| labels.iter().position(|n| *n == label).unwrap_or(0);
    let trace = SankeyTrace {
        orientation: Some("h".to_string()),
        node: SankeyNode {
            label: labels.iter().map(|n| n.0.clone()).collect(),
            color: None,
            pad: 15.0,
            thickness: 20.0,
            line: Some(MarkerLine {
                color: Some("black".to_string()),
                width: Some(0.5),
            }),
            hovertemplate: Some("<b>%{label}</b><extra></extra>".to_string()),
        },
        link: SankeyLink {
            source: links.iter().map(|l| index_of(&l.source)).collect(),
            target: links.iter().map(|l| index_of(&l.target)).collect(),
            value: links.iter().map(|l| l.value).collect(),
            color: Some(
                links
                    .iter()
                    .map(|l| with_alpha(color_of(&l.source), 0.6))
                    .collect(),
            ),
            hovertemplate: Some(
                "<b>%{source.label} → %{target.label}</b><br>Value: %{value:,}<br>% of total: %{customdata[0]:.1%}<br>% of source category: %{customdata[1]:.1%}<extra></extra>"
                    .to_string(),
            ),
            customdata: Some(CustomData::Pairs(shares)),
        },
    };

    let layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        margin: Some(Margin::ltrb(25.0, 50.0, 25.0, 25.0)),
        ..Layout::default()
    }
    .with_annotation(Annotation::paper(0.5, -0.1, format!("Flow path: {path}")));

    ChartSpec::new(
        vec![Trace::Sankey(trace)],
        layout,
        ChartConfig::export_png_auto("sankey_diagram"),
    )
}

/// 2x2 composite: singleton set sizes below, intersection sizes beside a
/// dot matrix marking which sets make up each intersection.
pub fn upset_plot(entries: &[UpsetEntry]) -> ChartSpec {
    if entries.is_empty() {
        return ChartSpec::empty("UpSet Plot: Set Intersections (no data)");
    }

    let mut set_names: Vec<&Label> = Vec::new();
    for entry in entries {
        for set in &entry.sets {
            if !set_names.contains(&set) {
                set_names.push(set);
            }
        }
    }
    let set_sizes: Vec<f64> = set_names
        .iter()
        .map(|name| {
            entries
                .iter()
                .find(|e| e.sets.len() == 1 && e.sets[0] == **name)
                .map(|e| e.size)
                .unwrap_or(0.0)
        })
        .collect();
    let indices: Vec<f64> = (0..entries.len()).map(|i| i as f64).collect();
    let combo_label = |entry: &UpsetEntry| -> String {
        entry
            .sets
            .iter()
            .map(|s| s.0.as_str())
            .collect::<Vec<_>>()
            .join(" ∩ ")
    };

    let mut data = vec![
        Trace::Bar(BarTrace {
            name: Some("Set Sizes".to_string()),
            marker: Some(Marker::colored("#1f77b4")),
            xaxis: Some("x".to_string()),
            yaxis: Some("y".to_string()),
            hovertemplate: Some("<b>%{x}</b><br>Size: %{y}<extra></extra>".to_string()),
            ..BarTrace::new(
                set_names.iter().map(|n| n.0.clone()).collect::<Vec<String>>(),
                set_sizes,
            )
        }),
        Trace::Bar(BarTrace {
            orientation: Some("h".to_string()),
            name: Some("Intersection Sizes".to_string()),
            marker: Some(Marker::colored("#2ca02c")),
            xaxis: Some("x2".to_string()),
            yaxis: Some("y2".to_string()),
            hovertemplate: Some(
                "<b>Intersection Size</b>: %{x}<br>Sets: %{customdata}<extra></extra>".to_string(),
            ),
            customdata: Some(CustomData::Text(
                entries
                    .iter()
                    .map(|e| {
                        let label = combo_label(e);
                        if label.is_empty() { "Empty".to_string() } else { label }
                    })
                    .collect(),
            )),
            ..BarTrace::new(
                entries.iter().map(|e| e.size).collect::<Vec<f64>>(),
                indices.clone(),
            )
        }),
    ];

    for (idx, &name) in set_names.iter().enumerate() {
        let dots: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.sets.contains(name) {
                    "#d62728".to_string()
                } else {
                    "rgba(240,240,240,0.8)".to_string()
                }
            })
            .collect();
        data.push(Trace::Scatter(ScatterTrace {
            name: Some(name.0.clone()),
            marker: Some(Marker {
                symbol: Some("circle".to_string()),
                size: Some(SizeAttr::Fixed(15.0)),
                color: Some(ColorAttr::PerPoint(dots)),
                ..Marker::default()
            }),
            showlegend: Some(false),
            xaxis: Some("x3".to_string()),
            yaxis: Some("y2".to_string()),
            hoverinfo: Some("none".to_string()),
            ..ScatterTrace::markers(vec![idx as f64; entries.len()], indices.clone())
        }));
    }

    let mut layout = Layout {
        title: Some(Title::sized("UpSet Plot: Set Intersections", 18.0)),
        grid: Some(GridSpec {
            rows: 2,
            columns: 2,
            pattern: Some("independent".to_string()),
            roworder: Some("bottom to top".to_string()),
        }),
        xaxis: Some(AxisSpec {
            domain: Some([0.0, 0.7]),
            anchor: Some("y".to_string()),
            ..AxisSpec::titled("Sets")
        }),
        yaxis: Some(AxisSpec {
            domain: Some([0.0, 0.3]),
            anchor: Some("x".to_string()),
            ..AxisSpec::titled("Set Size")
        }),
        xaxis2: Some(AxisSpec {
            domain: Some([0.7, 1.0]),
            anchor: Some("y2".to_string()),
            ..AxisSpec::titled("Intersection Size")
        }),
        yaxis2: Some(AxisSpec {
            domain: Some([0.4, 1.0]),
            anchor: Some("x2".to_string()),
            ..AxisSpec::titled("Intersections")
        }),
        xaxis3: Some(AxisSpec {
            domain: Some([0.0, 0.7]),
            anchor: Some("y2".to_string()),
            showticklabels: Some(false),
            showgrid: Some(false),
            zeroline: Some(false),
            ..AxisSpec::default()
        }),
        showlegend: Some(true),
        legend: Some(Legend {
            x: Some(0.8),
            y: Some(0.1),
            ..Legend::default()
        }),
        ..Layout::default()
    };
    for (idx, entry) in entries.iter().enumerate() {
        layout.annotations.push(Annotation {
            x: Some(Coord::Num(entry.size)),
            y: Some(Coord::Num(idx as f64)),
            xref: Some("x2".to_string()),
            yref: Some("y2".to_string()),
            xanchor: Some("left".to_string()),
            yanchor: Some("middle".to_string()),
            text: format!(" {}", combo_label(entry)),
            showarrow: false,
            font: Some(Font::sized(10.0)),
            ..Annotation::default()
        });
    }

    ChartSpec::new(data, layout, ChartConfig::export_png_auto("upset_plot"))
}

/// Point cloud over three columns, colored by the z column, with per-axis
/// range summaries pinned to the top left.
pub fn scatter_3d(points: &[Point3], x_col: &str, y_col: &str, z_col: &str) -> ChartSpec {
    let title = format!("3D Scatter Plot: {x_col} vs {y_col} vs {z_col}");
    if points.is_empty() {
        return ChartSpec::empty(format!("{title} (no data)"));
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = points.iter().map(|p| p.z).collect();

    let stat_line = |col: &str, values: &[f64]| {
        basic_stats(values)
            .map(|s| format!("{col}: Min={:.2}, Max={:.2}, Mean={:.2}", s.min, s.max, s.mean))
            .unwrap_or_default()
    };
    let mut layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        scene: Some(Scene {
            xaxis: Some(SceneAxis {
                title: Some(Title::new(x_col)),
                backgroundcolor: Some("rgba(240,240,240,0.5)".to_string()),
            }),
            yaxis: Some(SceneAxis {
                title: Some(Title::new(y_col)),
                backgroundcolor: Some("rgba(240,240,240,0.5)".to_string()),
            }),
            zaxis: Some(SceneAxis {
                title: Some(Title::new(z_col)),
                backgroundcolor: Some("rgba(240,240,240,0.5)".to_string()),
            }),
            camera: Some(Camera {
                eye: Some(CameraEye {
                    x: 1.5,
                    y: 1.5,
                    z: 1.0,
                }),
            }),
        }),
        margin: Some(Margin::ltrb(0.0, 50.0, 0.0, 0.0)),
        ..Layout::default()
    };
    for (slot, (col, values)) in [(x_col, &xs), (y_col, &ys), (z_col, &zs)]
        .into_iter()
        .enumerate()
    {
        layout.annotations.push(Annotation {
            font: Some(Font::sized(10.0)),
            ..Annotation::paper(0.1, 0.95 - slot as f64 * 0.05, stat_line(col, values))
        });
    }

    let trace = Scatter3dTrace {
        mode: Some("markers".to_string()),
        name: Some("Data points".to_string()),
        marker: Some(Marker {
            size: Some(SizeAttr::Fixed(5.0)),
            opacity: Some(0.8),
            color: Some(ColorAttr::Mapped(zs.clone())),
            colorscale: Some("Viridis".to_string()),
            colorbar: Some(Colorbar {
                title: Some(Title::new(z_col)),
                thickness: Some(15.0),
                len: Some(0.5),
                y: Some(0.5),
            }),
            line: Some(MarkerLine {
                color: Some("rgba(40,40,40,0.2)".to_string()),
                width: Some(0.5),
            }),
            ..Marker::default()
        }),
        hovertemplate: Some(format!(
            "<b>{x_col}</b>: %{{x:.4f}}<br><b>{y_col}</b>: %{{y:.4f}}<br><b>{z_col}</b>: %{{z:.4f}}<extra></extra>"
        )),
        hoverlabel: Some(white_hover()),
        x: xs,
        y: ys,
        z: zs,
    };

    ChartSpec::new(
        vec![Trace::Scatter3d(trace)],
        layout,
        ChartConfig::export_png_auto("3d_scatter"),
    )
}

/// Interpolated z surface over the unique x/y positions, with the actual
/// samples overlaid as faint white dots.
pub fn contour(rows: &ColumnRows, x_col: &str, y_col: &str, z_col: &str) -> ChartSpec {
    let title = format!("Contour Plot: {z_col} as a function of {x_col} and {y_col}");
    let points: Vec<(f64, f64, f64)> = rows
        .iter()
        .filter_map(|row| {
            Some((
                numeric_cell(row, x_col)?,
                numeric_cell(row, y_col)?,
                numeric_cell(row, z_col)?,
            ))
        })
        .collect();
    if points.len() < 10 {
        return ChartSpec::empty(format!("{title} (not enough data)"));
    }

    let mut grid_x: Vec<f64> = points.iter().map(|p| p.0).collect();
    grid_x.sort_by(f64::total_cmp);
    grid_x.dedup();
    let mut grid_y: Vec<f64> = points.iter().map(|p| p.1).collect();
    grid_y.sort_by(f64::total_cmp);
    grid_y.dedup();

    // Exact sample where one exists, otherwise the nearest sample's z.
    let nearest = |xv: f64, yv: f64| -> f64 {
        let mut best = f64::INFINITY;
        let mut value = 0.0;
        for p in &points {
            let d = (p.0 - xv).powi(2) + (p.1 - yv).powi(2);
            if d < best {
                best = d;
                value = p.2;
            }
        }
        value
    };
    let mut z: Vec<Vec<f64>> = grid_y
        .iter()
        .map(|&yv| {
            grid_x
                .iter()
                .map(|&xv| {
                    points
                        .iter()
                        .find(|p| p.0 == xv && p.1 == yv)
                        .map(|p| p.2)
                        .unwrap_or_else(|| nearest(xv, yv))
                })
                .collect()
        })
        .collect();

    // Patch any non-finite cells with the average of their valid neighbors;
    // a fully isolated cell reads as 0.
    for i in 0..z.len() {
        for j in 0..z[i].len() {
            if z[i][j].is_finite() {
                continue;
            }
            let mut sum = 0.0;
            let mut count = 0u32;
            for di in -1i32..=1 {
                for dj in -1i32..=1 {
                    if di == 0 && dj == 0 {
                        continue;
                    }
                    let ni = i as i32 + di;
                    let nj = j as i32 + dj;
                    if ni < 0 || nj < 0 || ni as usize >= z.len() || nj as usize >= z[i].len() {
                        continue;
                    }
                    let v = z[ni as usize][nj as usize];
                    if v.is_finite() {
                        sum += v;
                        count += 1;
                    }
                }
            }
            z[i][j] = if count > 0 { sum / f64::from(count) } else { 0.0 };
        }
    }

    let surface = ContourTrace {
        x: grid_x,
        y: grid_y,
        z,
        contours: Some(ContourSettings {
            coloring: "heatmap".to_string(),
            showlabels: true,
            labelfont: Some(Font {
                family: Some("Arial".to_string()),
                color: Some("white".to_string()),
                ..Font::sized(10.0)
            }),
        }),
        colorscale: Some("Viridis".to_string()),
        colorbar: Some(Colorbar {
            title: Some(Title {
                side: Some("right".to_string()),
                ..Title::new(z_col)
            }),
            thickness: Some(15.0),
            len: Some(0.9),
            y: Some(0.5),
        }),
        hovertemplate: Some(format!(
            "<b>{x_col}</b>: %{{x:.4f}}<br><b>{y_col}</b>: %{{y:.4f}}<br><b>{z_col}</b>: %{{z:.4f}}<extra></extra>"
        )),
        hoverlabel: Some(white_hover()),
    };
    let samples = ScatterTrace {
        name: Some("Data points".to_string()),
        marker: Some(Marker {
            color: Some(ColorAttr::Fixed("rgba(255,255,255,0.5)".to_string())),
            size: Some(SizeAttr::Fixed(3.0)),
            line: Some(MarkerLine {
                color: Some("rgba(0,0,0,0.2)".to_string()),
                width: Some(0.5),
            }),
            ..Marker::default()
        }),
        hovertemplate: Some(format!(
            "<b>{x_col}</b>: %{{x:.4f}}<br><b>{y_col}</b>: %{{y:.4f}}<br><b>{z_col}</b>: %{{customdata:.4f}}<extra></extra>"
        )),
        customdata: Some(CustomData::Nums(points.iter().map(|p| p.2).collect())),
        ..ScatterTrace::markers(
            points.iter().map(|p| p.0).collect::<Vec<f64>>(),
            points.iter().map(|p| p.1).collect::<Vec<f64>>(),
        )
    };

    let layout = Layout {
        title: Some(Title::sized(title, 18.0)),
        showlegend: Some(true),
        legend: Some(Legend {
            x: Some(0.01),
            y: Some(0.99),
            bgcolor: Some("rgba(255,255,255,0.7)".to_string()),
            bordercolor: Some("rgba(0,0,0,0.2)".to_string()),
            borderwidth: Some(1.0),
            ..Legend::default()
        }),
        ..Layout::default()
    }
    .with_xaxis(AxisSpec {
        showgrid: Some(true),
        zeroline: Some(false),
        ..AxisSpec::titled_grid(x_col)
    })
    .with_yaxis(AxisSpec {
        showgrid: Some(true),
        zeroline: Some(false),
        ..AxisSpec::titled_grid(y_col)
    })
    .with_annotation(Annotation::paper(
        0.5,
        -0.15,
        format!(
            "{z_col} values are represented by colors, with contour lines showing equal {z_col} values"
        ),
    ));

    let config = ChartConfig {
        scroll_zoom: Some(true),
        mode_bar_buttons_to_add: vec![
            "drawline".to_string(),
            "drawopenpath".to_string(),
            "drawclosedpath".to_string(),
            "drawcircle".to_string(),
            "drawrect".to_string(),
            "eraseshape".to_string(),
        ],
        ..ChartConfig::export_png_auto("contour_plot")
    };
    ChartSpec::new(vec![Trace::Contour(surface), Trace::Scatter(samples)], layout, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::XyPoint;
    use serde_json::json;

    fn pair_block(x_col: &str, y_col: &str, points: &[(f64, f64)]) -> PairBlock {
        PairBlock {
            x_col: x_col.to_string(),
            y_col: y_col.to_string(),
            data: points.iter().map(|&(x, y)| XyPoint { x, y }).collect(),
        }
    }

    #[test]
    fn pair_plot_lays_pairs_on_a_square_grid() {
        let blocks: Vec<PairBlock> = (0..5)
            .map(|i| {
                pair_block(
                    &format!("c{i}"),
                    &format!("d{i}"),
                    &[(1.0, 2.0), (3.0, 4.0)],
                )
            })
            .collect();
        let spec = pair_plot(&blocks);

        assert_eq!(spec.trace_count(), 5);
        let grid = spec.layout.grid.as_ref().unwrap();
        assert_eq!((grid.rows, grid.columns), (3, 3));

        match &spec.data[0] {
            Trace::Scatter(t) => assert_eq!(t.xaxis.as_deref(), Some("x")),
            other => panic!("expected scatter, got {other:?}"),
        }
        match &spec.data[1] {
            Trace::Scatter(t) => {
                assert_eq!(t.xaxis.as_deref(), Some("x2"));
                assert_eq!(t.yaxis.as_deref(), Some("y2"));
            }
            other => panic!("expected scatter, got {other:?}"),
        }

        // Two range annotations per pair, anchored to that pair's domain.
        assert_eq!(spec.layout.annotations.len(), 10);
        assert_eq!(spec.layout.annotations[0].xref.as_deref(), Some("x domain"));
        assert_eq!(
            spec.layout.annotations[2].xref.as_deref(),
            Some("x2 domain")
        );
        assert_eq!(spec.layout.annotations[3].textangle, Some(-90.0));
        assert!(spec.layout.annotations[0].text.starts_with("c0 (Min: 1.00"));
    }

    #[test]
    fn parallel_coordinates_ticks_carry_the_summary() {
        let rows: ColumnRows = serde_json::from_value(json!([
            {"speed": 1.0, "grade": "a"},
            {"speed": 2.0, "grade": "b"},
            {"speed": 3.0, "grade": "c"},
            {"speed": 4.0, "grade": "d"},
            {"speed": 5.0, "grade": "e"}
        ]))
        .unwrap();
        let spec = parallel_coordinates(&rows, &["speed".to_string(), "grade".to_string()], None);

        assert_eq!(spec.trace_count(), 1);
        match &spec.data[0] {
            Trace::Parcoords(t) => {
                assert_eq!(t.line.color, "#1f77b4");
                assert!(t.name.is_none());
                assert_eq!(t.dimensions[0].range, [1.0, 5.0]);
                assert_eq!(t.dimensions[0].tickvals, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
                assert_eq!(t.dimensions[0].ticktext[0], "Min: 1.00");
                // Non-numeric column falls back to a fixed range, no ticks.
                assert_eq!(t.dimensions[1].range, [0.0, 100.0]);
                assert!(t.dimensions[1].tickvals.is_empty());
                assert_eq!(t.dimensions[1].values, vec![None; 5]);
            }
            other => panic!("expected parcoords, got {other:?}"),
        }
        assert_eq!(spec.layout.showlegend, Some(false));
    }

    #[test]
    fn parallel_coordinates_splits_traces_by_category() {
        let rows: ColumnRows = serde_json::from_value(json!([
            {"v": 1.0, "group": "a"},
            {"v": 2.0, "group": "b"},
            {"v": 3.0, "group": "a"}
        ]))
        .unwrap();
        let spec = parallel_coordinates(&rows, &["v".to_string()], Some("group"));

        assert_eq!(spec.trace_count(), 2);
        match (&spec.data[0], &spec.data[1]) {
            (Trace::Parcoords(a), Trace::Parcoords(b)) => {
                assert_eq!(a.name.as_deref(), Some("group: a"));
                assert_eq!(b.name.as_deref(), Some("group: b"));
                assert_eq!(a.dimensions[0].values, vec![Some(1.0), Some(3.0)]);
                assert_eq!(b.dimensions[0].values, vec![Some(2.0)]);
                // Shared ranges come from the whole dataset, not the subset.
                assert_eq!(b.dimensions[0].range, [1.0, 3.0]);
            }
            other => panic!("expected two parcoords traces, got {other:?}"),
        }
        assert_eq!(spec.layout.showlegend, Some(true));
        let legend = spec.layout.legend.as_ref().unwrap();
        assert_eq!(legend.title.as_ref().map(|t| t.text.as_str()), Some("group"));
    }

    #[test]
    fn radar_normalizes_with_several_value_columns() {
        let rows: Vec<RadarEntry> = serde_json::from_value(json!([
            {"category": "one", "values": {"a": 0.0, "b": 5.0}},
            {"category": "two", "values": {"a": 10.0, "b": 5.0}}
        ]))
        .unwrap();
        let spec = radar_chart(&rows, "city", &["a".to_string(), "b".to_string()]);

        match &spec.data[0] {
            Trace::Scatterpolar(t) => {
                // a spans 0..10 and rescales; b has zero spread and passes through.
                assert_eq!(t.r, vec![0.0, 5.0]);
                assert_eq!(t.theta, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(t.fillcolor.as_deref(), Some("rgba(31,119,180,0.4)"));
                let hover = t.hovertemplate.as_deref().unwrap();
                assert!(hover.contains("(normalized: 0.00)"));
                match t.customdata.as_ref().unwrap() {
                    CustomData::Text(raw) => assert_eq!(raw, &vec!["0".to_string(), "5".to_string()]),
                    other => panic!("expected text customdata, got {other:?}"),
                }
            }
            other => panic!("expected scatterpolar, got {other:?}"),
        }
        match &spec.data[1] {
            Trace::Scatterpolar(t) => assert_eq!(t.r, vec![1.0, 5.0]),
            other => panic!("expected scatterpolar, got {other:?}"),
        }

        let polar = spec.layout.polar.as_ref().unwrap();
        let radial = polar.radialaxis.as_ref().unwrap();
        assert_eq!(radial.range, Some([0.0, 1.05]));
        assert_eq!(radial.tickformat.as_deref(), Some(".1f"));
        assert_eq!(spec.layout.dragmode, Some(false));
        assert!(
            spec.layout.annotations[0]
                .text
                .ends_with("(normalized to 0-1 scale)")
        );
    }

    #[test]
    fn radar_keeps_raw_values_for_one_column() {
        let rows: Vec<RadarEntry> = serde_json::from_value(json!([
            {"category": "one", "values": {"score": 4.0}},
            {"category": "two", "values": {"score": 8.0}},
            {"category": "three", "values": {"score": null}}
        ]))
        .unwrap();
        let spec = radar_chart(&rows, "city", &["score".to_string()]);

        match &spec.data[1] {
            Trace::Scatterpolar(t) => {
                assert_eq!(t.r, vec![8.0]);
                assert!(t.hovertemplate.as_deref().unwrap().contains("<b>score</b>: 8.00"));
            }
            other => panic!("expected scatterpolar, got {other:?}"),
        }
        match &spec.data[2] {
            Trace::Scatterpolar(t) => {
                assert_eq!(t.r, vec![0.0]);
                match t.customdata.as_ref().unwrap() {
                    CustomData::Text(raw) => assert_eq!(raw[0], "N/A"),
                    other => panic!("expected text customdata, got {other:?}"),
                }
            }
            other => panic!("expected scatterpolar, got {other:?}"),
        }

        let radial = spec
            .layout
            .polar
            .as_ref()
            .unwrap()
            .radialaxis
            .as_ref()
            .unwrap();
        assert_eq!(radial.range, Some([0.0, 8.0 * 1.05]));
        assert!(radial.tickformat.is_none());
    }

    #[test]
    fn treemap_shades_teal_to_blue_by_depth() {
        let tree: NestedCounts =
            serde_json::from_value(json!({"a": {"b": 2.0, "c": 3.0}})).unwrap();
        let spec = treemap(&tree, &["region".to_string(), "city".to_string()], "sales");

        match &spec.data[0] {
            Trace::Treemap(t) => {
                assert_eq!(t.ids, vec!["a", "a-b", "a-c"]);
                assert_eq!(t.values, vec![None, Some(2.0), Some(3.0)]);
                let colors = &t.marker.as_ref().unwrap().colors;
                assert_eq!(colors[0], "rgb(65,146,153)");
                assert_eq!(colors[1], "rgb(0,46,233)");
                assert_eq!(t.textinfo.as_deref(), Some("label+value+percent parent+percent root"));
                assert!(t.pathbar.as_ref().unwrap().visible);
            }
            other => panic!("expected treemap, got {other:?}"),
        }
        assert_eq!(
            spec.layout.title.as_ref().map(|t| t.text.as_str()),
            Some("Treemap of sales by region → city")
        );
    }

    #[test]
    fn sunburst_shades_orange_to_violet_by_depth() {
        let tree: NestedCounts =
            serde_json::from_value(json!({"a": {"b": 2.0, "c": 3.0}})).unwrap();
        let spec = sunburst(&tree, &["region".to_string(), "city".to_string()], "sales");

        match &spec.data[0] {
            Trace::Sunburst(t) => {
                let colors = &t.marker.as_ref().unwrap().colors;
                assert_eq!(colors[0], "rgb(255,165,0)");
                assert_eq!(colors[1], "rgb(100,30,220)");
                // Sunburst text skips the percent-of-root part.
                assert_eq!(t.textinfo.as_deref(), Some("label+value+percent parent"));
            }
            other => panic!("expected sunburst, got {other:?}"),
        }
    }

    #[test]
    fn chord_defaults_missing_weights_to_one() {
        let links = vec![
            ChordLink {
                source: "a".into(),
                target: "b".into(),
                value: None,
            },
            ChordLink {
                source: "b".into(),
                target: "c".into(),
                value: Some(4.0),
            },
        ];
        let spec = chord_diagram(&links, "from", "to", None);

        match &spec.data[0] {
            Trace::Sankey(t) => {
                assert_eq!(t.node.label, vec!["a", "b", "c"]);
                assert_eq!(t.link.value, vec![1.0, 4.0]);
                let colors = t.link.color.as_ref().unwrap();
                assert_eq!(colors[0], "rgba(31,119,180,0.4)");
                match t.link.customdata.as_ref().unwrap() {
                    CustomData::Nums(shares) => assert_eq!(shares, &vec![0.25, 1.0]),
                    other => panic!("expected numeric customdata, got {other:?}"),
                }
            }
            other => panic!("expected sankey, got {other:?}"),
        }
        assert_eq!(
            spec.layout.title.as_ref().map(|t| t.text.as_str()),
            Some("Connections between from and to")
        );
    }

    #[test]
    fn sankey_reports_total_and_source_shares() {
        let links = vec![
            FlowLink {
                source: "a".into(),
                target: "x".into(),
                value: 3.0,
            },
            FlowLink {
                source: "a".into(),
                target: "y".into(),
                value: 1.0,
            },
            FlowLink {
                source: "b".into(),
                target: "x".into(),
                value: 4.0,
            },
        ];
        let spec = sankey(&links, &["stage".to_string(), "outcome".to_string()]);

        match &spec.data[0] {
            Trace::Sankey(t) => {
                assert_eq!(t.node.label, vec!["a", "x", "y", "b"]);
                assert!(t.node.color.is_none());
                assert_eq!(t.link.source, vec![0, 0, 3]);
                let colors = t.link.color.as_ref().unwrap();
                assert_eq!(colors[0], "rgba(31,119,180,0.6)");
                assert_eq!(colors[2], "rgba(255,127,14,0.6)");
                match t.link.customdata.as_ref().unwrap() {
                    CustomData::Pairs(shares) => {
                        assert_eq!(shares[0], [3.0 / 8.0, 0.75]);
                        assert_eq!(shares[2], [0.5, 1.0]);
                    }
                    other => panic!("expected pair customdata, got {other:?}"),
                }
            }
            other => panic!("expected sankey, got {other:?}"),
        }
    }

    #[test]
    fn upset_derives_set_names_from_combinations() {
        let entries = vec![
            UpsetEntry {
                sets: vec!["A".into()],
                size: 10.0,
            },
            UpsetEntry {
                sets: vec!["A".into(), "B".into()],
                size: 4.0,
            },
            UpsetEntry {
                sets: vec!["B".into()],
                size: 7.0,
            },
        ];
        let spec = upset_plot(&entries);

        // Two bars plus one dot column per set.
        assert_eq!(spec.trace_count(), 4);
        match &spec.data[0] {
            Trace::Bar(t) => {
                assert_eq!(t.x, Some(vec!["A".to_string(), "B".to_string()].into()));
                assert_eq!(t.y, Some(vec![10.0, 7.0].into()));
            }
            other => panic!("expected bar, got {other:?}"),
        }
        match &spec.data[1] {
            Trace::Bar(t) => {
                assert_eq!(t.orientation.as_deref(), Some("h"));
                match t.customdata.as_ref().unwrap() {
                    CustomData::Text(labels) => assert_eq!(labels[1], "A ∩ B"),
                    other => panic!("expected text customdata, got {other:?}"),
                }
            }
            other => panic!("expected bar, got {other:?}"),
        }
        match &spec.data[2] {
            Trace::Scatter(t) => {
                let marker = t.marker.as_ref().unwrap();
                match marker.color.as_ref().unwrap() {
                    ColorAttr::PerPoint(dots) => {
                        assert_eq!(dots[0], "#d62728");
                        assert_eq!(dots[2], "rgba(240,240,240,0.8)");
                    }
                    other => panic!("expected per-point colors, got {other:?}"),
                }
            }
            other => panic!("expected scatter, got {other:?}"),
        }

        let grid = spec.layout.grid.as_ref().unwrap();
        assert_eq!(grid.roworder.as_deref(), Some("bottom to top"));
        assert_eq!(spec.layout.annotations[1].text, " A ∩ B");
        assert_eq!(
            spec.layout.xaxis3.as_ref().unwrap().showticklabels,
            Some(false)
        );
    }

    #[test]
    fn scatter_3d_sets_camera_and_colorbar() {
        let points = vec![
            Point3 {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
            Point3 {
                x: 4.0,
                y: 5.0,
                z: 6.0,
            },
        ];
        let spec = scatter_3d(&points, "depth", "temp", "salinity");

        match &spec.data[0] {
            Trace::Scatter3d(t) => {
                assert_eq!(t.z, vec![3.0, 6.0]);
                let marker = t.marker.as_ref().unwrap();
                assert_eq!(marker.color, Some(ColorAttr::Mapped(vec![3.0, 6.0])));
                let colorbar = marker.colorbar.as_ref().unwrap();
                assert_eq!(colorbar.title.as_ref().map(|t| t.text.as_str()), Some("salinity"));
            }
            other => panic!("expected scatter3d, got {other:?}"),
        }

        let scene = spec.layout.scene.as_ref().unwrap();
        let eye = scene.camera.as_ref().unwrap().eye.as_ref().unwrap();
        assert_eq!((eye.x, eye.y, eye.z), (1.5, 1.5, 1.0));
        assert_eq!(spec.layout.annotations.len(), 3);
        assert!(spec.layout.annotations[0].text.starts_with("depth: Min=1.00"));
    }

    #[test]
    fn contour_needs_ten_points() {
        let rows: ColumnRows = serde_json::from_value(json!([
            {"x": 1.0, "y": 1.0, "z": 1.0}
        ]))
        .unwrap();
        let spec = contour(&rows, "x", "y", "z");
        assert_eq!(spec.trace_count(), 0);
        assert!(
            spec.layout
                .title
                .as_ref()
                .unwrap()
                .text
                .ends_with("(not enough data)")
        );
    }

    #[test]
    fn contour_fills_the_grid_from_nearest_points() {
        let mut raw = vec![
            json!({"x": 0.0, "y": 0.0, "z": 1.0}),
            json!({"x": 0.0, "y": 1.0, "z": 2.0}),
            json!({"x": 1.0, "y": 0.0, "z": 3.0}),
            json!({"x": 1.0, "y": 1.0, "z": 4.0}),
            json!({"x": 2.0, "y": 0.0, "z": 9.0}),
        ];
        for _ in 0..5 {
            raw.push(json!({"x": 0.0, "y": 0.0, "z": 1.0}));
        }
        let rows: ColumnRows = serde_json::from_value(Value::Array(raw)).unwrap();
        let spec = contour(&rows, "x", "y", "z");

        assert_eq!(spec.trace_count(), 2);
        match &spec.data[0] {
            Trace::Contour(t) => {
                assert_eq!(t.x, vec![0.0, 1.0, 2.0]);
                assert_eq!(t.y, vec![0.0, 1.0]);
                // The (2,1) cell has no sample; the tied nearest neighbors
                // resolve to the first one seen, (1,1).
                assert_eq!(t.z, vec![vec![1.0, 3.0, 9.0], vec![2.0, 4.0, 4.0]]);
            }
            other => panic!("expected contour, got {other:?}"),
        }
        match &spec.data[1] {
            Trace::Scatter(t) => {
                assert_eq!(t.name.as_deref(), Some("Data points"));
                match t.customdata.as_ref().unwrap() {
                    CustomData::Nums(zs) => assert_eq!(zs.len(), 10),
                    other => panic!("expected numeric customdata, got {other:?}"),
                }
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn empty_inputs_yield_no_data_specs() {
        let empty_rows = ColumnRows::new();
        let empty_tree = NestedCounts::new();
        let specs = [
            pair_plot(&[]),
            parallel_coordinates(&empty_rows, &["a".to_string()], None),
            radar_chart(&[], "city", &["a".to_string()]),
            treemap(&empty_tree, &["p".to_string()], "v"),
            sunburst(&empty_tree, &["p".to_string()], "v"),
            chord_diagram(&[], "s", "t", None),
            sankey(&[], &["s".to_string(), "t".to_string()]),
            upset_plot(&[]),
            scatter_3d(&[], "x", "y", "z"),
        ];
        for spec in &specs {
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
}
