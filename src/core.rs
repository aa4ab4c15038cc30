//! Declarative chart specification model.
//!
//! A [`ChartSpec`] is the unit handed to the rendering layer: an ordered
//! list of drawable traces, presentation metadata, and interaction options.
//! Field names mirror the consumer's JSON schema (Plotly figure objects)
//! verbatim, so a spec serializes straight into something the renderer can
//! draw without translation. Specs are produced fresh per fetch+transform
//! cycle and are immutable once handed over; the next selection change
//! supersedes them wholesale.

use serde::Serialize;

use crate::trace::Trace;

/// Declarative chart bundle: traces + layout + interaction config.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Ordered drawable traces.
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: ChartConfig,
}

impl ChartSpec {
    pub fn new(data: Vec<Trace>, layout: Layout, config: ChartConfig) -> Self {
        Self {
            data,
            layout,
            config,
        }
    }

    /// Zero-trace spec whose title explains why there is nothing to draw.
    /// Builders return this instead of failing on missing or empty input.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::titled(title),
            config: ChartConfig::default(),
        }
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }
}

/// Either a numeric or a categorical coordinate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coord {
    Num(f64),
    Cat(String),
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<&str> for Coord {
    fn from(v: &str) -> Self {
        Self::Cat(v.to_string())
    }
}

impl From<String> for Coord {
    fn from(v: String) -> Self {
        Self::Cat(v)
    }
}

impl Default for Coord {
    fn default() -> Self {
        Self::Num(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl Font {
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }
}

/// Title for the figure, an axis, or a colorbar.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn sized(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            font: Some(Font::sized(size)),
            ..Self::default()
        }
    }
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AxisSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticksuffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automargin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    /// Overlay this axis on another ("y" for a secondary y axis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Paper fraction occupied by this axis, for subplot grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl AxisSpec {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::sized(text, 14.0)),
            ..Self::default()
        }
    }

    /// Titled axis with the standard faint grid.
    pub fn titled_grid(text: impl Into<String>) -> Self {
        Self {
            gridcolor: Some("rgba(0,0,0,0.1)".to_string()),
            ..Self::titled(text)
        }
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some([lo, hi]);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

impl Legend {
    /// Horizontal legend below the plot area.
    pub fn horizontal_below(y: f64) -> Self {
        Self {
            orientation: Some("h".to_string()),
            y: Some(y),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
}

impl Margin {
    pub fn ltrb(l: f64, t: f64, r: f64, b: f64) -> Self {
        Self {
            l: Some(l),
            r: Some(r),
            t: Some(t),
            b: Some(b),
        }
    }
}

/// Free-floating text, usually anchored to paper coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    pub text: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderpad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textangle: Option<f64>,
}

impl Annotation {
    /// Plain paper-anchored text without an arrow.
    pub fn paper(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x: Some(Coord::Num(x)),
            y: Some(Coord::Num(y)),
            xref: Some("paper".to_string()),
            yref: Some("paper".to_string()),
            text: text.into(),
            showarrow: false,
            font: Some(Font::sized(12.0)),
            ..Self::default()
        }
    }

    /// Bordered statistics banner above the plot area.
    pub fn stats_banner(y: f64, text: impl Into<String>) -> Self {
        Self {
            bgcolor: Some("rgba(255,255,255,0.8)".to_string()),
            bordercolor: Some("rgba(0,0,0,0.2)".to_string()),
            borderwidth: Some(1.0),
            borderpad: Some(4.0),
            ..Self::paper(0.5, y, text)
        }
    }
}

/// Reference line or region drawn behind/over the traces.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub x0: Coord,
    pub x1: Coord,
    pub y0: Coord,
    pub y1: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<ShapeLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ShapeLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HoverLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// Subplot grid placement for figures composed of independent axes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridSpec {
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roworder: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PolarAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Polar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radialaxis: Option<PolarAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angularaxis: Option<PolarAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SceneAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backgroundcolor: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CameraEye {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Camera {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye: Option<CameraEye>,
}

/// 3D plot scene: per-axis titles plus the initial camera position.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<SceneAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<SceneAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zaxis: Option<SceneAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
}

/// Presentation metadata for a whole figure.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis3: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
    /// Only ever set to `false` to disable pan/zoom entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<bool>,
}

impl Layout {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            ..Self::default()
        }
    }

    /// Bold 18pt figure title, the house style for generated charts.
    pub fn headline(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::sized(format!("<b>{}</b>", text.into()), 18.0)),
            ..Self::default()
        }
    }

    pub fn with_xaxis(mut self, axis: AxisSpec) -> Self {
        self.xaxis = Some(axis);
        self
    }

    pub fn with_yaxis(mut self, axis: AxisSpec) -> Self {
        self.yaxis = Some(axis);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.showlegend = Some(true);
        self.legend = Some(legend);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToImageButtonOptions {
    pub format: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub scale: u32,
}

/// Interaction options for the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    pub responsive: bool,
    #[serde(rename = "displayModeBar", skip_serializing_if = "Option::is_none")]
    pub display_mode_bar: Option<bool>,
    pub displaylogo: bool,
    #[serde(rename = "scrollZoom", skip_serializing_if = "Option::is_none")]
    pub scroll_zoom: Option<bool>,
    #[serde(
        rename = "modeBarButtonsToAdd",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub mode_bar_buttons_to_add: Vec<String>,
    #[serde(
        rename = "modeBarButtonsToRemove",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub mode_bar_buttons_to_remove: Vec<String>,
    #[serde(
        rename = "toImageButtonOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_image_button_options: Option<ToImageButtonOptions>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: None,
            displaylogo: false,
            scroll_zoom: None,
            mode_bar_buttons_to_add: Vec::new(),
            mode_bar_buttons_to_remove: Vec::new(),
            to_image_button_options: None,
        }
    }
}

impl ChartConfig {
    /// Standard config with a named PNG export button.
    pub fn export_png(filename: impl Into<String>) -> Self {
        Self {
            display_mode_bar: Some(true),
            to_image_button_options: Some(ToImageButtonOptions {
                format: "png".to_string(),
                filename: filename.into(),
                height: Some(500),
                width: Some(700),
                scale: 2,
            }),
            ..Self::default()
        }
    }

    /// PNG export without fixed dimensions; the export picks up the
    /// rendered size.
    pub fn export_png_auto(filename: impl Into<String>) -> Self {
        Self {
            to_image_button_options: Some(ToImageButtonOptions {
                format: "png".to_string(),
                filename: filename.into(),
                height: None,
                width: None,
                scale: 2,
            }),
            ..Self::default()
        }
    }

    pub fn with_draw_tools(mut self) -> Self {
        self.mode_bar_buttons_to_add = vec![
            "drawline".to_string(),
            "drawopenpath".to_string(),
            "eraseshape".to_string(),
        ];
        self
    }

    pub fn with_select_tools(mut self) -> Self {
        self.mode_bar_buttons_to_add = vec![
            "select2d".to_string(),
            "lasso2d".to_string(),
            "resetScale2d".to_string(),
        ];
        self
    }
}
