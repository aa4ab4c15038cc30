//! Multi-column endpoint payloads (`/multivariate/...`).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Label, XyPoint};

/// Raw row objects keyed by column name, as returned by
/// `/multivariate/{parallel_coordinates,contour}`.
pub type ColumnRows = Vec<Map<String, Value>>;

/// Nested category mapping returned by `/multivariate/{treemap,sunburst}`.
pub type NestedCounts = Map<String, Value>;

/// One column pair of the `/multivariate/pair_plot` response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PairBlock {
    pub x_col: String,
    pub y_col: String,
    pub data: Vec<XyPoint>,
}

/// `/multivariate/radar_chart` row: one polygon per category.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RadarEntry {
    pub category: Label,
    pub values: Map<String, Value>,
}

impl RadarEntry {
    /// Numeric reading for one value column, `None` for null or
    /// non-numeric cells.
    pub fn numeric(&self, col: &str) -> Option<f64> {
        self.values.get(col).and_then(Value::as_f64)
    }
}

/// `/multivariate/chord_diagram` link; weight is optional and defaults to 1
/// at build time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChordLink {
    pub source: Label,
    pub target: Label,
    #[serde(default)]
    pub value: Option<f64>,
}

/// `/multivariate/sankey` link.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FlowLink {
    pub source: Label,
    pub target: Label,
    pub value: f64,
}

/// `/multivariate/upset_plot` row: one observed set combination.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpsetEntry {
    pub sets: Vec<Label>,
    pub size: f64,
}

/// `/multivariate/scatter_3d` row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
