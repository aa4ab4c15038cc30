//! Single-column endpoint payloads (`/univariate/...`).

use serde::Deserialize;

use super::Label;

/// `/univariate/histogram`: parallel bin-edge and count arrays.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Histogram {
    pub bins: Vec<f64>,
    pub counts: Vec<f64>,
}

/// One category with its aggregate, as returned by `/univariate/bar`
/// and `/univariate/pie`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LabelledValue {
    pub label: Label,
    pub value: f64,
}

/// `/univariate/box`: five-number summary computed server-side.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whisker ends clamped to 1.5·IQR beyond the quartiles.
    pub fn fences(&self) -> (f64, f64) {
        let iqr = self.iqr();
        (
            self.min.max(self.q1 - 1.5 * iqr),
            self.max.min(self.q3 + 1.5 * iqr),
        )
    }
}

/// One point of the `/univariate/density` curve.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

/// Bare sample rows, shared by `/univariate/{dot,violin,stem}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SampleValue {
    pub value: f64,
}

/// One `/univariate/pareto` row; rows arrive sorted by descending count.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ParetoEntry {
    pub category: Label,
    pub count: f64,
    pub cumulative_pct: f64,
}
