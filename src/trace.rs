//! Drawable trace model.
//!
//! One [`Trace`] per drawable series inside a [`ChartSpec`](crate::core::ChartSpec).
//! The enum is internally tagged with `"type"` so a serialized trace carries
//! its kind discriminator exactly where the rendering layer expects it.
//! As in the layout model, field names follow the consumer's JSON schema.

use serde::Serialize;

use crate::core::{Font, HoverLabel, Title};

/// Values along one trace axis: numeric, numeric with gaps, or categorical.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    Nums(Vec<f64>),
    /// `None` entries serialize as `null`, which breaks line segments.
    Holey(Vec<Option<f64>>),
    Cats(Vec<String>),
}

impl From<Vec<f64>> for AxisValues {
    fn from(v: Vec<f64>) -> Self {
        Self::Nums(v)
    }
}

impl From<Vec<Option<f64>>> for AxisValues {
    fn from(v: Vec<Option<f64>>) -> Self {
        Self::Holey(v)
    }
}

impl From<Vec<String>> for AxisValues {
    fn from(v: Vec<String>) -> Self {
        Self::Cats(v)
    }
}

impl Default for AxisValues {
    fn default() -> Self {
        Self::Nums(Vec::new())
    }
}

/// Marker color: one color for the whole trace, one per point, or a numeric
/// vector mapped through a colorscale.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorAttr {
    Fixed(String),
    PerPoint(Vec<String>),
    Mapped(Vec<f64>),
}

impl From<&str> for ColorAttr {
    fn from(c: &str) -> Self {
        Self::Fixed(c.to_string())
    }
}

impl From<String> for ColorAttr {
    fn from(c: String) -> Self {
        Self::Fixed(c)
    }
}

impl From<Vec<String>> for ColorAttr {
    fn from(c: Vec<String>) -> Self {
        Self::PerPoint(c)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SizeAttr {
    Fixed(f64),
    PerPoint(Vec<f64>),
}

/// Per-point payload threaded through to hover templates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CustomData {
    Nums(Vec<f64>),
    Pairs(Vec<[f64; 2]>),
    Text(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MarkerLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Colorbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorAttr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<Colorbar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeAttr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

impl Marker {
    pub fn colored(color: impl Into<ColorAttr>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// Marker shape for traces that color a fixed palette list (pie, treemap,
/// sunburst), where the consumer expects `colors` rather than `color`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PaletteMarker {
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl LineStyle {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: Some(color.into()),
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dash: &str) -> Self {
        Self {
            dash: Some(dash.to_string()),
            ..Self::solid(color, width)
        }
    }
}

/// One drawable data series. Tagged with `"type"` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Scatter(ScatterTrace),
    Box(BoxTrace),
    Pie(PieTrace),
    Violin(ViolinTrace),
    Heatmap(HeatmapTrace),
    Contour(ContourTrace),
    Scatterpolar(ScatterPolarTrace),
    Parcoords(ParcoordsTrace),
    Sankey(SankeyTrace),
    Treemap(TreemapTrace),
    Sunburst(SunburstTrace),
    Scatter3d(Scatter3dTrace),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BarTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<CustomData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Subplot axis references ("x2"/"y2") for gridded figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl BarTrace {
    pub fn new(x: impl Into<AxisValues>, y: impl Into<AxisValues>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScatterTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<CustomData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl ScatterTrace {
    pub fn markers(x: impl Into<AxisValues>, y: impl Into<AxisValues>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            mode: Some("markers".to_string()),
            ..Self::default()
        }
    }

    pub fn lines(x: impl Into<AxisValues>, y: impl Into<AxisValues>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            mode: Some("lines".to_string()),
            ..Self::default()
        }
    }

    /// Vertical reference line spanning `y0..y1` at `x`.
    pub fn vline(x: f64, y0: f64, y1: f64, line: LineStyle, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            line: Some(line),
            ..Self::lines(vec![x, x], vec![y0, y1])
        }
    }
}

/// Whether individual sample points are drawn beside a box.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoxPoints {
    Flag(bool),
    Mode(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoxTrace {
    /// Five-number summary samples when built from a single aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Precomputed per-box statistics; the renderer expects one entry per
    /// box, so single-box traces still carry one-element arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q3: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowerfence: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upperfence: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxpoints: Option<BoxPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxmean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<PaletteMarker>,
    /// Radial offset per slice; used to pull out the largest one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ViolinInnerBox {
    pub visible: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MeanLine {
    pub visible: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ViolinTrace {
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    pub inner_box: Option<ViolinInnerBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meanline: Option<MeanLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<BoxPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HeatmapTrace {
    pub x: AxisValues,
    pub y: AxisValues,
    /// Row-major over (y, x).
    pub z: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<Colorbar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContourSettings {
    pub coloring: String,
    pub showlabels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labelfont: Option<Font>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContourTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contours: Option<ContourSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<Colorbar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScatterPolarTrace {
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
    /// Original (pre-normalization) values for hover display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<CustomData>,
}

/// Two-stop colorscale pinning a parcoords trace to one constant color.
pub type ColorStops = Vec<(f64, String)>;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParcoordsLine {
    pub color: String,
    pub colorscale: ColorStops,
    pub showscale: bool,
}

impl ParcoordsLine {
    pub fn constant(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            colorscale: vec![(0.0, color.clone()), (1.0, color.clone())],
            color,
            showscale: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Dimension {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub range: [f64; 2],
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tickvals: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ticktext: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParcoordsTrace {
    pub line: ParcoordsLine,
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SankeyNode {
    pub label: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
    pub pad: f64,
    pub thickness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SankeyLink {
    /// Node indices into the node label list.
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<CustomData>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SankeyTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    pub node: SankeyNode,
    pub link: SankeyLink,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PathBar {
    pub visible: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TreemapTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branchvalues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<PaletteMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathbar: Option<PathBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branchvalues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<PaletteMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scatter3dTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
}
