//! Chart-spec builders.
//!
//! One pure function per chart kind: typed response in, [`ChartSpec`] out.
//! Builders never fetch or mutate their input, and they never fail: empty
//! raw data produces a zero-trace spec whose title says so. Trace count and
//! order depend only on input cardinality, so rebuilding from the same data
//! yields the same spec.
//!
//! [`ChartSpec`]: crate::core::ChartSpec

mod bivariate;
mod multivariate;
mod univariate;

pub use bivariate::*;
pub use multivariate::*;
pub use univariate::*;

/// Base hue for the six-color presentation palettes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaletteColor {
    Blue,
    Orange,
    Green,
    Red,
    Purple,
    Brown,
    Pink,
    Gray,
}

impl PaletteColor {
    fn colors(self) -> [&'static str; 6] {
        match self {
            Self::Blue => ["#1f77b4", "#aec7e8", "#3a6fbf", "#5d9ad3", "#1b4779", "#9cc7ff"],
            Self::Orange => ["#ff7f0e", "#ffbb78", "#e86e00", "#ffaa45", "#a94b00", "#ffc285"],
            Self::Green => ["#2ca02c", "#98df8a", "#208020", "#78cc78", "#165016", "#b3e6a8"],
            Self::Red => ["#d62728", "#ff9896", "#bd1919", "#f75b5c", "#8c1212", "#ff7775"],
            Self::Purple => ["#9467bd", "#c5b0d5", "#7c51a2", "#b38cd8", "#5e3b7c", "#d7c7e8"],
            Self::Brown => ["#8c564b", "#c49c94", "#6d3c32", "#ad7164", "#4a2921", "#dbb7ac"],
            Self::Pink => ["#e377c2", "#f7b6d2", "#d74ea2", "#ef90be", "#a3377e", "#fcd3e7"],
            Self::Gray => ["#7f7f7f", "#c7c7c7", "#646464", "#a6a6a6", "#4a4a4a", "#e0e0e0"],
        }
    }
}

/// `n` presentation colors drawn from one base palette. Requests beyond the
/// six base colors cycle through them as rgba variants with descending
/// opacity, so any count stays deterministic.
pub fn palette(base: PaletteColor, n: usize) -> Vec<String> {
    let list = base.colors();
    if n <= list.len() {
        return list[..n].iter().map(|c| c.to_string()).collect();
    }

    let mut result: Vec<String> = list.iter().map(|c| c.to_string()).collect();
    let mut i = 0usize;
    while result.len() < n {
        let (r, g, b) = hex_rgb(list[i % list.len()]);
        let opacity = 0.9 - (i / list.len()) as f64 * 0.2;
        result.push(format!("rgba({r}, {g}, {b}, {opacity})"));
        i += 1;
    }
    result
}

const CATEGORICAL: [&str; 28] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#d1e5f0",
    "#92c5de", "#4393c3", "#2166ac", "#053061", "#7fc97f", "#beaed4", "#fdc086", "#ffff99",
    "#386cb0", "#f0027f", "#bf5b17", "#666666",
];

/// `n` distinct series colors for categorical traces. Past the 28 base
/// colors, entries repeat as rgba variants cycling through 0.8/0.6/0.4
/// opacity.
pub fn categorical_colors(n: usize) -> Vec<String> {
    if n <= CATEGORICAL.len() {
        return CATEGORICAL[..n].iter().map(|c| c.to_string()).collect();
    }

    let mut colors: Vec<String> = CATEGORICAL.iter().map(|c| c.to_string()).collect();
    let opacities = [0.8, 0.6, 0.4];
    let mut opacity_index = 0usize;
    while colors.len() < n {
        let (r, g, b) = hex_rgb(CATEGORICAL[colors.len() % CATEGORICAL.len()]);
        let opacity = opacities[opacity_index % opacities.len()];
        colors.push(format!("rgba({r},{g},{b},{opacity})"));
        opacity_index += 1;
    }
    colors
}

/// Hover/annotation number formatting: tiny magnitudes in scientific
/// notation, everything else with thousands separators and at most four
/// fraction digits (at least two below 1). Non-finite values print "N/A".
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "N/A".to_string();
    }
    if n != 0.0 && n.abs() < 0.01 {
        return format!("{n:.2e}");
    }

    let min_frac = if n.abs() < 1.0 { 2 } else { 0 };
    let fixed = format!("{:.4}", n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), ""),
    };

    let trimmed = frac_part.trim_end_matches('0');
    let frac = if trimmed.len() < min_frac {
        &frac_part[..min_frac]
    } else {
        trimmed
    };

    let sign = if n < 0.0 { "-" } else { "" };
    let grouped = group_thousands(int_part);
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `#rrggbb` to channel triple. Unparsable channels read as 0, which only
/// matters if a palette constant were malformed.
pub(crate) fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let channel = |lo: usize, hi: usize| {
        hex.get(lo..hi)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    (channel(1, 3), channel(3, 5), channel(5, 7))
}

/// Hex color to `rgba(r,g,b,alpha)` with the given opacity.
pub(crate) fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let (r, g, b) = hex_rgb(hex);
    format!("rgba({r},{g},{b},{alpha})")
}
