//! Chart-kind vocabulary and per-panel column selections.
//!
//! A selection binds logical roles (x, y, category, …) to column names for
//! one chart kind. Selections validate themselves before any request is
//! derived: an incomplete selection yields no [`Endpoint`] and therefore no
//! fetch. Switching chart kind starts from a fresh selection, so stale role
//! bindings cannot leak across kinds.

use std::fmt;
use std::str::FromStr;

use crate::client::Endpoint;
use crate::Error;

/// Single-column chart kinds served under `/univariate/`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnivariateKind {
    Histogram,
    Bar,
    Box,
    Pie,
    Density,
    Dot,
    Pareto,
    Violin,
    Stem,
}

impl UnivariateKind {
    pub const ALL: [Self; 9] = [
        Self::Histogram,
        Self::Bar,
        Self::Box,
        Self::Pie,
        Self::Density,
        Self::Dot,
        Self::Pareto,
        Self::Violin,
        Self::Stem,
    ];

    /// Route segment, also the user-facing kind string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Bar => "bar",
            Self::Box => "box",
            Self::Pie => "pie",
            Self::Density => "density",
            Self::Dot => "dot",
            Self::Pareto => "pareto",
            Self::Violin => "violin",
            Self::Stem => "stem",
        }
    }
}

impl fmt::Display for UnivariateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnivariateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedChartType(s.to_string()))
    }
}

/// Two-column chart kinds served under `/bivariate/`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BivariateKind {
    Scatter,
    Line,
    BoxByCategory,
    GroupedBar,
    Heatmap,
    StackedBar,
    Hexbin,
    Bubble,
    Mosaic,
}

impl BivariateKind {
    pub const ALL: [Self; 9] = [
        Self::Scatter,
        Self::Line,
        Self::BoxByCategory,
        Self::GroupedBar,
        Self::Heatmap,
        Self::StackedBar,
        Self::Hexbin,
        Self::Bubble,
        Self::Mosaic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::Line => "line",
            Self::BoxByCategory => "box_by_category",
            Self::GroupedBar => "grouped_bar",
            Self::Heatmap => "heatmap",
            Self::StackedBar => "stacked_bar",
            Self::Hexbin => "hexbin",
            Self::Bubble => "bubble",
            Self::Mosaic => "mosaic",
        }
    }
}

impl fmt::Display for BivariateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BivariateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedChartType(s.to_string()))
    }
}

/// Many-column chart kinds served under `/multivariate/`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MultivariateKind {
    PairPlot,
    ParallelCoordinates,
    RadarChart,
    Treemap,
    Sunburst,
    ChordDiagram,
    Sankey,
    UpsetPlot,
    Scatter3d,
    Contour,
}

impl MultivariateKind {
    pub const ALL: [Self; 10] = [
        Self::PairPlot,
        Self::ParallelCoordinates,
        Self::RadarChart,
        Self::Treemap,
        Self::Sunburst,
        Self::ChordDiagram,
        Self::Sankey,
        Self::UpsetPlot,
        Self::Scatter3d,
        Self::Contour,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PairPlot => "pair_plot",
            Self::ParallelCoordinates => "parallel_coordinates",
            Self::RadarChart => "radar_chart",
            Self::Treemap => "treemap",
            Self::Sunburst => "sunburst",
            Self::ChordDiagram => "chord_diagram",
            Self::Sankey => "sankey",
            Self::UpsetPlot => "upset_plot",
            Self::Scatter3d => "scatter_3d",
            Self::Contour => "contour",
        }
    }
}

impl fmt::Display for MultivariateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MultivariateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedChartType(s.to_string()))
    }
}

/// Column selection for a univariate panel.
#[derive(Clone, Debug, PartialEq)]
pub struct UnivariateSelection {
    pub kind: UnivariateKind,
    pub column: Option<String>,
}

impl UnivariateSelection {
    pub fn new(kind: UnivariateKind) -> Self {
        Self { kind, column: None }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.column.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Primary request, `None` while the selection is incomplete.
    pub fn endpoint(&self) -> Option<Endpoint> {
        if !self.is_valid() {
            return None;
        }
        let column = self.column.as_deref()?;
        Some(
            Endpoint::new(format!("/univariate/{}", self.kind)).param("column", column),
        )
    }

    /// Companion five-number-summary request, needed by the density and dot
    /// charts for their median/quartile overlays.
    pub fn secondary_endpoint(&self) -> Option<Endpoint> {
        if !matches!(self.kind, UnivariateKind::Density | UnivariateKind::Dot) {
            return None;
        }
        let column = self.column.as_deref().filter(|c| !c.is_empty())?;
        Some(Endpoint::new("/univariate/box").param("column", column))
    }
}

/// Column selection for a bivariate panel.
#[derive(Clone, Debug, PartialEq)]
pub struct BivariateSelection {
    pub kind: BivariateKind,
    pub x: Option<String>,
    pub y: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub value: Option<String>,
    pub group: Option<String>,
    pub stack: Option<String>,
    pub cols: Vec<String>,
}

impl BivariateSelection {
    pub fn new(kind: BivariateKind) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            size: None,
            category: None,
            value: None,
            group: None,
            stack: None,
            cols: Vec::new(),
        }
    }

    pub fn with_x(mut self, col: impl Into<String>) -> Self {
        self.x = Some(col.into());
        self
    }

    pub fn with_y(mut self, col: impl Into<String>) -> Self {
        self.y = Some(col.into());
        self
    }

    pub fn with_size(mut self, col: impl Into<String>) -> Self {
        self.size = Some(col.into());
        self
    }

    pub fn with_category(mut self, col: impl Into<String>) -> Self {
        self.category = Some(col.into());
        self
    }

    pub fn with_value(mut self, col: impl Into<String>) -> Self {
        self.value = Some(col.into());
        self
    }

    pub fn with_group(mut self, col: impl Into<String>) -> Self {
        self.group = Some(col.into());
        self
    }

    pub fn with_stack(mut self, col: impl Into<String>) -> Self {
        self.stack = Some(col.into());
        self
    }

    pub fn with_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_valid(&self) -> bool {
        use BivariateKind::*;
        match self.kind {
            Scatter | Line | Hexbin | Mosaic => filled(&self.x) && filled(&self.y),
            Bubble => filled(&self.x) && filled(&self.y) && filled(&self.size),
            BoxByCategory => filled(&self.category) && filled(&self.value),
            GroupedBar => filled(&self.category) && filled(&self.group),
            StackedBar => filled(&self.x) && filled(&self.stack),
            Heatmap => self.cols.len() >= 2,
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        use BivariateKind::*;
        if !self.is_valid() {
            return None;
        }
        let base = Endpoint::new(format!("/bivariate/{}", self.kind));
        let endpoint = match self.kind {
            Scatter | Line | Hexbin | Mosaic => base
                .param("x_col", self.x.as_deref()?)
                .param("y_col", self.y.as_deref()?),
            Bubble => base
                .param("x_col", self.x.as_deref()?)
                .param("y_col", self.y.as_deref()?)
                .param("size_col", self.size.as_deref()?),
            BoxByCategory => base
                .param("category_col", self.category.as_deref()?)
                .param("value_col", self.value.as_deref()?),
            GroupedBar => base
                .param("category_col", self.category.as_deref()?)
                .param("group_col", self.group.as_deref()?),
            StackedBar => base
                .param("x_col", self.x.as_deref()?)
                .param("stack_col", self.stack.as_deref()?),
            Heatmap => base.param("cols", self.cols.join(",")),
        };
        Some(endpoint)
    }
}

/// Column selection for a multivariate panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MultivariateSelection {
    pub kind: MultivariateKind,
    pub cols: Vec<String>,
    pub category: Option<String>,
    pub value_cols: Vec<String>,
    pub path_cols: Vec<String>,
    pub value: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
}

impl MultivariateSelection {
    pub fn new(kind: MultivariateKind) -> Self {
        Self {
            kind,
            cols: Vec::new(),
            category: None,
            value_cols: Vec::new(),
            path_cols: Vec::new(),
            value: None,
            source: None,
            target: None,
            x: None,
            y: None,
            z: None,
        }
    }

    pub fn with_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, col: impl Into<String>) -> Self {
        self.category = Some(col.into());
        self
    }

    pub fn with_value_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_path_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path_cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value(mut self, col: impl Into<String>) -> Self {
        self.value = Some(col.into());
        self
    }

    pub fn with_source(mut self, col: impl Into<String>) -> Self {
        self.source = Some(col.into());
        self
    }

    pub fn with_target(mut self, col: impl Into<String>) -> Self {
        self.target = Some(col.into());
        self
    }

    pub fn with_x(mut self, col: impl Into<String>) -> Self {
        self.x = Some(col.into());
        self
    }

    pub fn with_y(mut self, col: impl Into<String>) -> Self {
        self.y = Some(col.into());
        self
    }

    pub fn with_z(mut self, col: impl Into<String>) -> Self {
        self.z = Some(col.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        use MultivariateKind::*;
        match self.kind {
            PairPlot | Sankey | UpsetPlot => self.cols.len() >= 2,
            ParallelCoordinates => self.cols.len() >= 2,
            RadarChart => filled(&self.category) && !self.value_cols.is_empty(),
            Treemap | Sunburst => !self.path_cols.is_empty() && filled(&self.value),
            ChordDiagram => filled(&self.source) && filled(&self.target),
            Scatter3d | Contour => {
                filled(&self.x) && filled(&self.y) && filled(&self.z)
            }
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        use MultivariateKind::*;
        if !self.is_valid() {
            return None;
        }
        let base = Endpoint::new(format!("/multivariate/{}", self.kind));
        let endpoint = match self.kind {
            PairPlot | Sankey | UpsetPlot => base.repeated("cols", self.cols.clone()),
            ParallelCoordinates => {
                let mut ep = base.repeated("cols", self.cols.clone());
                if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
                    ep = ep.param("category_col", category);
                }
                ep
            }
            RadarChart => base
                .param("category_col", self.category.as_deref()?)
                .repeated("value_cols", self.value_cols.clone()),
            Treemap | Sunburst => base
                .repeated("path_cols", self.path_cols.clone())
                .param("value_col", self.value.as_deref()?),
            ChordDiagram => {
                let mut ep = base
                    .param("source_col", self.source.as_deref()?)
                    .param("target_col", self.target.as_deref()?);
                if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
                    ep = ep.param("value_col", value);
                }
                ep
            }
            Scatter3d | Contour => base
                .param("x_col", self.x.as_deref()?)
                .param("y_col", self.y.as_deref()?)
                .param("z_col", self.z.as_deref()?),
        };
        Some(endpoint)
    }
}

fn filled(role: &Option<String>) -> bool {
    role.as_deref().is_some_and(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_round_trip() {
        for kind in UnivariateKind::ALL {
            assert_eq!(kind.as_str().parse::<UnivariateKind>().unwrap(), kind);
        }
        for kind in BivariateKind::ALL {
            assert_eq!(kind.as_str().parse::<BivariateKind>().unwrap(), kind);
        }
        for kind in MultivariateKind::ALL {
            assert_eq!(kind.as_str().parse::<MultivariateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected_by_name() {
        let err = "ridgeline".parse::<UnivariateKind>().unwrap_err();
        match err {
            Error::UnsupportedChartType(name) => assert_eq!(name, "ridgeline"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn univariate_selection_requires_a_column() {
        let bare = UnivariateSelection::new(UnivariateKind::Histogram);
        assert!(!bare.is_valid());
        assert!(bare.endpoint().is_none());

        let chosen = bare.with_column("total");
        let url = chosen.endpoint().unwrap().canonical_url("http://x");
        assert_eq!(url, "http://x/univariate/histogram?column=total");
    }

    #[test]
    fn secondary_endpoint_only_for_density_and_dot() {
        let dot = UnivariateSelection::new(UnivariateKind::Dot).with_column("total");
        let url = dot.secondary_endpoint().unwrap().canonical_url("http://x");
        assert_eq!(url, "http://x/univariate/box?column=total");

        let bar = UnivariateSelection::new(UnivariateKind::Bar).with_column("total");
        assert!(bar.secondary_endpoint().is_none());
    }

    #[test]
    fn bubble_needs_all_three_roles() {
        let partial = BivariateSelection::new(BivariateKind::Bubble)
            .with_x("height")
            .with_y("weight");
        assert!(!partial.is_valid());
        assert!(partial.endpoint().is_none());

        let full = partial.with_size("population");
        let url = full.endpoint().unwrap().canonical_url("http://x");
        assert_eq!(
            url,
            "http://x/bivariate/bubble?size_col=population&x_col=height&y_col=weight"
        );
    }

    #[test]
    fn heatmap_joins_columns_into_one_parameter() {
        let too_few = BivariateSelection::new(BivariateKind::Heatmap).with_cols(["a"]);
        assert!(!too_few.is_valid());

        let url = BivariateSelection::new(BivariateKind::Heatmap)
            .with_cols(["a", "b", "c"])
            .endpoint()
            .unwrap()
            .canonical_url("http://x");
        assert_eq!(url, "http://x/bivariate/heatmap?cols=a%2Cb%2Cc");
    }

    #[test]
    fn radar_repeats_its_value_columns() {
        let url = MultivariateSelection::new(MultivariateKind::RadarChart)
            .with_category("city")
            .with_value_cols(["rain", "wind"])
            .endpoint()
            .unwrap()
            .canonical_url("http://x");
        assert_eq!(
            url,
            "http://x/multivariate/radar_chart?category_col=city&value_cols=rain&value_cols=wind"
        );
    }

    #[test]
    fn chord_weight_column_is_optional() {
        let without = MultivariateSelection::new(MultivariateKind::ChordDiagram)
            .with_source("from")
            .with_target("to");
        assert!(without.is_valid());
        let url = without.endpoint().unwrap().canonical_url("http://x");
        assert_eq!(
            url,
            "http://x/multivariate/chord_diagram?source_col=from&target_col=to"
        );

        let with = MultivariateSelection::new(MultivariateKind::ChordDiagram)
            .with_source("from")
            .with_target("to")
            .with_value("amount");
        assert!(
            with.endpoint()
                .unwrap()
                .canonical_url("http://x")
                .contains("value_col=amount")
        );
    }

    #[test]
    fn contour_requires_three_axes() {
        let partial = MultivariateSelection::new(MultivariateKind::Contour)
            .with_x("a")
            .with_y("b");
        assert!(!partial.is_valid());

        let url = partial
            .with_z("c")
            .endpoint()
            .unwrap()
            .canonical_url("http://x");
        assert_eq!(
            url,
            "http://x/multivariate/contour?x_col=a&y_col=b&z_col=c"
        );
    }
}
