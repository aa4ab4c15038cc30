//! Pure statistics helpers shared by the chart builders.
//!
//! Everything here works on plain `&[f64]` slices and never touches the
//! network or the cache, so builders stay deterministic and trivially
//! testable.

use crate::{Error, Result};

/// Summary of a single numeric series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub sum: f64,
    pub count: usize,
}

/// Pearson correlation plus a two-point trend line over the x extremes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regression {
    pub r: f64,
    pub line_x: [f64; 2],
    pub line_y: [f64; 2],
}

/// Extended per-column summary used for parallel-coordinates axis ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
}

pub fn basic_stats(values: &[f64]) -> Result<BasicStats> {
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Ok(BasicStats {
        min,
        max,
        mean: sum / values.len() as f64,
        median: median_of_sorted(&sorted),
        sum,
        count: values.len(),
    })
}

/// Correlation coefficient and trend line for a scatter overlay.
///
/// The line is NOT a least-squares fit: its slope is
/// `r * (max(y) - min(y)) / (max(x) - min(x))`, anchored at the means and
/// evaluated at the x extremes. Degenerate series (zero variance on either
/// axis) yield `r = 0` and a flat line at `mean(y)`. Unequal-length inputs
/// are truncated to the shorter series.
pub fn correlation_and_regression(xs: &[f64], ys: &[f64]) -> Result<Regression> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let xs = &xs[..n];
    let ys = &ys[..n];

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(Regression {
            r: 0.0,
            line_x: [min_x, max_x],
            line_y: [mean_y, mean_y],
        });
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let slope = r * (max_y - min_y) / (max_x - min_x);
    let intercept = mean_y - slope * mean_x;

    Ok(Regression {
        r,
        line_x: [min_x, max_x],
        line_y: [slope * min_x + intercept, slope * max_x + intercept],
    })
}

/// Running share of the total, in input order, as percentages.
/// A zero total yields all zeros rather than NaN.
pub fn cumulative_percentages(counts: &[f64]) -> Vec<f64> {
    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        return vec![0.0; counts.len()];
    }
    let mut running = 0.0;
    counts
        .iter()
        .map(|c| {
            running += c;
            running / total * 100.0
        })
        .collect()
}

/// Index of the first entry whose cumulative percentage reaches 80.
pub fn pareto_threshold(percentages: &[f64]) -> Option<usize> {
    percentages.iter().position(|p| *p >= 80.0)
}

/// Value at quantile `q` of a non-empty ascending-sorted slice, by the
/// `sorted[floor(q * n)]` rule.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Summarize one column's numeric values; non-finite entries are dropped
/// first. `None` when nothing numeric remains.
pub fn column_summary(values: &[f64]) -> Option<ColumnSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(ColumnSummary {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        median: median_of_sorted(&sorted),
        std_dev: variance.sqrt(),
        q1: percentile(&sorted, 0.25),
        q3: percentile(&sorted, 0.75),
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}
