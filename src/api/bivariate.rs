//! Two-column endpoint payloads (`/bivariate/...`).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::Label;

/// `/bivariate/{scatter,line}` row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

/// `/bivariate/box_by_category` row: a five-number summary per category.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CategoryBox {
    pub category: Label,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// `/bivariate/grouped_bar` row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GroupedBarEntry {
    pub category: Label,
    pub group: Label,
    pub value: f64,
}

/// One cell of the `/bivariate/heatmap` aggregation grid.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GridCell {
    pub x: Label,
    pub y: Label,
    pub value: f64,
}

/// One `/bivariate/hexbin` bin: numeric bin centers plus the bin count.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NumericCell {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// `/bivariate/stacked_bar` row: the x label plus one key per stack segment.
/// Key order follows the response (`preserve_order`), which fixes the
/// stacking order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StackedRow {
    pub x: Label,
    #[serde(flatten)]
    pub stacks: Map<String, Value>,
}

impl StackedRow {
    pub fn stack_value(&self, key: &str) -> f64 {
        self.stacks.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }
}

/// `/bivariate/bubble` row.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// `/bivariate/mosaic` cell: co-occurrence count plus its share of the total.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MosaicCell {
    pub x: Label,
    pub y: Label,
    pub value: f64,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stacked_rows_keep_stack_keys_in_response_order() {
        let row: StackedRow = serde_json::from_value(json!({
            "x": "2021",
            "west": 4,
            "east": 2,
            "north": 1
        }))
        .unwrap();
        let keys: Vec<&str> = row.stacks.keys().map(String::as_str).collect();
        assert_eq!(keys, ["west", "east", "north"]);
        assert_eq!(row.stack_value("east"), 2.0);
        assert_eq!(row.stack_value("south"), 0.0);
    }

    #[test]
    fn grid_cells_accept_numeric_axis_labels() {
        let cell: GridCell =
            serde_json::from_value(json!({"x": 1.5, "y": "high", "value": 12})).unwrap();
        assert_eq!(cell.x.as_str(), "1.5");
        assert_eq!(cell.value, 12.0);
    }
}
