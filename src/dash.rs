//! Dashboard session facade.
//!
//! [`DashSession`] turns a validated selection into a [`ChartSpec`]: build
//! the endpoint, fetch through the session cache, decode the payload, hand
//! it to the matching chart builder. The `render_*` methods run the same
//! pipeline against a [`ChartView`], so a failed or stale request lands in
//! the view's phase instead of propagating to the caller.

use std::sync::Arc;

use tracing::info;

use crate::api::{
    self, BoxSummary, BubblePoint, CategoryBox, ChordLink, ColumnRows, DensityPoint, FlowLink,
    GridCell, GroupedBarEntry, Histogram, LabelledValue, MosaicCell, NestedCounts, NumericCell,
    PairBlock, ParetoEntry, Point3, ProjectColumns, ProjectList, RadarEntry, SampleValue,
    StackedRow, UpsetEntry, XyPoint,
};
use crate::charts;
use crate::client::{Endpoint, FetchClient, HttpTransport, Transport};
use crate::core::ChartSpec;
use crate::select::{
    BivariateKind, BivariateSelection, MultivariateKind, MultivariateSelection, UnivariateKind,
    UnivariateSelection,
};
use crate::view::ChartView;
use crate::{Error, Result};

/// One dashboard session against a statistics backend.
///
/// Each selection domain owns its own [`FetchClient`], so cached bodies never
/// cross domains. Project listing and loading go straight to the transport:
/// loading repoints the backend at another dataset, so those responses must
/// not be memoized.
pub struct DashSession {
    base_url: String,
    transport: Arc<dyn Transport>,
    univariate_client: FetchClient,
    bivariate_client: FetchClient,
    multivariate_client: FetchClient,
}

impl DashSession {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Arc::new(HttpTransport::new()))
    }

    /// Build around an explicit transport, letting callers stub the backend.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into();
        Self {
            univariate_client: FetchClient::new(base_url.clone(), Arc::clone(&transport)),
            bivariate_client: FetchClient::new(base_url.clone(), Arc::clone(&transport)),
            multivariate_client: FetchClient::new(base_url.clone(), Arc::clone(&transport)),
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the datasets the backend can serve (`GET /get_projects`).
    pub fn projects(&self) -> Result<Vec<String>> {
        let endpoint = Endpoint::new("/get_projects");
        let body = self
            .transport
            .get_json(&endpoint.canonical_url(&self.base_url))?;
        let list: ProjectList = api::decode(endpoint.path(), &body)?;
        Ok(list.projects)
    }

    /// Point the backend at a dataset and get its column names back
    /// (`POST /load_project/`).
    pub fn load_project(&self, name: &str) -> Result<Vec<String>> {
        let endpoint =
            Endpoint::new("/load_project/").param("path", format!("Projects/{name}/data.csv"));
        let body = self
            .transport
            .post_json(&endpoint.canonical_url(&self.base_url))?;
        let loaded: ProjectColumns = api::decode(endpoint.path(), &body)?;
        info!(project = name, columns = loaded.columns.len(), "project loaded");
        Ok(loaded.columns)
    }

    /// Fetch and build the chart for a single-column selection.
    pub fn univariate(&self, selection: &UnivariateSelection) -> Result<ChartSpec> {
        let endpoint = selection
            .endpoint()
            .ok_or(Error::IncompleteSelection(selection.kind.as_str()))?;
        let body = self.univariate_client.fetch(&endpoint)?;
        let path = endpoint.path();
        let column = selection.column.as_deref().unwrap_or_default();

        let spec = match selection.kind {
            UnivariateKind::Histogram => {
                let data: Histogram = api::decode(path, &body)?;
                charts::histogram(&data, column)
            }
            UnivariateKind::Bar => {
                let rows: Vec<LabelledValue> = api::decode(path, &body)?;
                charts::bar(&rows, column)
            }
            UnivariateKind::Box => {
                let summary: BoxSummary = api::decode(path, &body)?;
                charts::box_plot(&summary, column)
            }
            UnivariateKind::Pie => {
                let rows: Vec<LabelledValue> = api::decode(path, &body)?;
                charts::pie(&rows, column)
            }
            UnivariateKind::Density => {
                let points: Vec<DensityPoint> = api::decode(path, &body)?;
                let summary = self.summary_for(selection)?;
                charts::density(&points, &summary, column)
            }
            UnivariateKind::Dot => {
                let samples: Vec<SampleValue> = api::decode(path, &body)?;
                let summary = self.summary_for(selection)?;
                charts::dot(&samples, &summary, column)
            }
            UnivariateKind::Pareto => {
                let rows: Vec<ParetoEntry> = api::decode(path, &body)?;
                charts::pareto(&rows, column)
            }
            UnivariateKind::Violin => {
                let samples: Vec<SampleValue> = api::decode(path, &body)?;
                charts::violin(&samples, column)
            }
            UnivariateKind::Stem => {
                let samples: Vec<SampleValue> = api::decode(path, &body)?;
                charts::stem(&samples, column)
            }
        };
        Ok(spec)
    }

    /// Fetch and build the chart for a two-column selection.
    pub fn bivariate(&self, selection: &BivariateSelection) -> Result<ChartSpec> {
        let endpoint = selection
            .endpoint()
            .ok_or(Error::IncompleteSelection(selection.kind.as_str()))?;
        let body = self.bivariate_client.fetch(&endpoint)?;
        let path = endpoint.path();
        let x = selection.x.as_deref().unwrap_or_default();
        let y = selection.y.as_deref().unwrap_or_default();

        let spec = match selection.kind {
            BivariateKind::Scatter => {
                let points: Vec<XyPoint> = api::decode(path, &body)?;
                charts::scatter(&points, x, y)
            }
            BivariateKind::Line => {
                let points: Vec<XyPoint> = api::decode(path, &body)?;
                charts::line(&points, x, y)
            }
            BivariateKind::BoxByCategory => {
                let rows: Vec<CategoryBox> = api::decode(path, &body)?;
                charts::box_by_category(
                    &rows,
                    selection.category.as_deref().unwrap_or_default(),
                    selection.value.as_deref().unwrap_or_default(),
                )
            }
            BivariateKind::GroupedBar => {
                let rows: Vec<GroupedBarEntry> = api::decode(path, &body)?;
                charts::grouped_bar(
                    &rows,
                    selection.category.as_deref().unwrap_or_default(),
                    selection.group.as_deref().unwrap_or_default(),
                )
            }
            BivariateKind::Heatmap => {
                let cells: Vec<GridCell> = api::decode(path, &body)?;
                charts::heatmap(&cells, &selection.cols)
            }
            BivariateKind::StackedBar => {
                let rows: Vec<StackedRow> = api::decode(path, &body)?;
                charts::stacked_bar(&rows, x, selection.stack.as_deref().unwrap_or_default())
            }
            BivariateKind::Hexbin => {
                let cells: Vec<NumericCell> = api::decode(path, &body)?;
                charts::hexbin(&cells, x, y)
            }
            BivariateKind::Bubble => {
                let points: Vec<BubblePoint> = api::decode(path, &body)?;
                charts::bubble(&points, x, y, selection.size.as_deref().unwrap_or_default())
            }
            BivariateKind::Mosaic => {
                let cells: Vec<MosaicCell> = api::decode(path, &body)?;
                charts::mosaic(&cells, x, y)
            }
        };
        Ok(spec)
    }

    /// Fetch and build the chart for a many-column selection.
    pub fn multivariate(&self, selection: &MultivariateSelection) -> Result<ChartSpec> {
        let endpoint = selection
            .endpoint()
            .ok_or(Error::IncompleteSelection(selection.kind.as_str()))?;
        let body = self.multivariate_client.fetch(&endpoint)?;
        let path = endpoint.path();

        let spec = match selection.kind {
            MultivariateKind::PairPlot => {
                let blocks: Vec<PairBlock> = api::decode(path, &body)?;
                charts::pair_plot(&blocks)
            }
            MultivariateKind::ParallelCoordinates => {
                let rows: ColumnRows = api::decode(path, &body)?;
                charts::parallel_coordinates(&rows, &selection.cols, selection.category.as_deref())
            }
            MultivariateKind::RadarChart => {
                let rows: Vec<RadarEntry> = api::decode(path, &body)?;
                charts::radar_chart(
                    &rows,
                    selection.category.as_deref().unwrap_or_default(),
                    &selection.value_cols,
                )
            }
            MultivariateKind::Treemap => {
                let tree: NestedCounts = api::decode(path, &body)?;
                charts::treemap(
                    &tree,
                    &selection.path_cols,
                    selection.value.as_deref().unwrap_or_default(),
                )
            }
            MultivariateKind::Sunburst => {
                let tree: NestedCounts = api::decode(path, &body)?;
                charts::sunburst(
                    &tree,
                    &selection.path_cols,
                    selection.value.as_deref().unwrap_or_default(),
                )
            }
            MultivariateKind::ChordDiagram => {
                let links: Vec<ChordLink> = api::decode(path, &body)?;
                charts::chord_diagram(
                    &links,
                    selection.source.as_deref().unwrap_or_default(),
                    selection.target.as_deref().unwrap_or_default(),
                    selection.value.as_deref(),
                )
            }
            MultivariateKind::Sankey => {
                let links: Vec<FlowLink> = api::decode(path, &body)?;
                charts::sankey(&links, &selection.cols)
            }
            MultivariateKind::UpsetPlot => {
                let entries: Vec<UpsetEntry> = api::decode(path, &body)?;
                charts::upset_plot(&entries)
            }
            MultivariateKind::Scatter3d => {
                let points: Vec<Point3> = api::decode(path, &body)?;
                charts::scatter_3d(
                    &points,
                    selection.x.as_deref().unwrap_or_default(),
                    selection.y.as_deref().unwrap_or_default(),
                    selection.z.as_deref().unwrap_or_default(),
                )
            }
            MultivariateKind::Contour => {
                let rows: ColumnRows = api::decode(path, &body)?;
                charts::contour(
                    &rows,
                    selection.x.as_deref().unwrap_or_default(),
                    selection.y.as_deref().unwrap_or_default(),
                    selection.z.as_deref().unwrap_or_default(),
                )
            }
        };
        Ok(spec)
    }

    /// Drive `view` through one univariate request. An incomplete selection
    /// resets the view without touching the backend.
    pub fn render_univariate(&self, view: &mut ChartView, selection: &UnivariateSelection) {
        if !selection.is_valid() {
            view.reset();
            return;
        }
        let token = view.begin();
        view.resolve(token, self.univariate(selection));
    }

    /// Bivariate counterpart of [`render_univariate`](Self::render_univariate).
    pub fn render_bivariate(&self, view: &mut ChartView, selection: &BivariateSelection) {
        if !selection.is_valid() {
            view.reset();
            return;
        }
        let token = view.begin();
        view.resolve(token, self.bivariate(selection));
    }

    /// Multivariate counterpart of [`render_univariate`](Self::render_univariate).
    pub fn render_multivariate(&self, view: &mut ChartView, selection: &MultivariateSelection) {
        if !selection.is_valid() {
            view.reset();
            return;
        }
        let token = view.begin();
        view.resolve(token, self.multivariate(selection));
    }

    /// Density and dot plots overlay quartile guides, which come from the box
    /// endpoint for the same column.
    fn summary_for(&self, selection: &UnivariateSelection) -> Result<BoxSummary> {
        let endpoint = selection
            .secondary_endpoint()
            .ok_or(Error::IncompleteSelection(selection.kind.as_str()))?;
        let body = self.univariate_client.fetch(&endpoint)?;
        api::decode(endpoint.path(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::{Value, json};

    use crate::trace::Trace;
    use crate::view::Phase;

    /// Pops canned results in order and records every URL it serves.
    struct RecordingTransport {
        calls: Mutex<Vec<String>>,
        results: Mutex<Vec<Result<Value>>>,
    }

    impl RecordingTransport {
        fn with_results(results: Vec<Result<Value>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                results: Mutex::new(results),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn get_json(&self, url: &str) -> Result<Value> {
            self.calls.lock().push(url.to_string());
            let mut results = self.results.lock();
            if results.is_empty() {
                Ok(json!({"ok": true}))
            } else {
                results.remove(0)
            }
        }

        fn post_json(&self, url: &str) -> Result<Value> {
            self.get_json(url)
        }
    }

    fn session(results: Vec<Result<Value>>) -> (DashSession, Arc<RecordingTransport>) {
        let transport = RecordingTransport::with_results(results);
        let session =
            DashSession::with_transport("http://stats.test", Arc::clone(&transport) as Arc<dyn Transport>);
        (session, transport)
    }

    #[test]
    fn projects_hits_the_list_endpoint() {
        let (session, transport) = session(vec![Ok(json!({"projects": ["iris", "cars"]}))]);
        let projects = session.projects().unwrap();
        assert_eq!(projects, ["iris", "cars"]);
        assert_eq!(transport.calls(), ["http://stats.test/get_projects"]);
    }

    #[test]
    fn load_project_posts_the_encoded_dataset_path() {
        let (session, transport) = session(vec![Ok(json!({"columns": ["age", "fare"]}))]);
        let columns = session.load_project("My Project").unwrap();
        assert_eq!(columns, ["age", "fare"]);
        assert_eq!(
            transport.calls(),
            ["http://stats.test/load_project/?path=Projects%2FMy%20Project%2Fdata.csv"]
        );
    }

    #[test]
    fn incomplete_selections_never_reach_the_backend() {
        let (session, transport) = session(vec![]);

        let err = session
            .univariate(&UnivariateSelection::new(UnivariateKind::Histogram))
            .unwrap_err();
        match err {
            Error::IncompleteSelection(kind) => assert_eq!(kind, "histogram"),
            other => panic!("unexpected error: {other}"),
        }

        let no_size = BivariateSelection::new(BivariateKind::Bubble)
            .with_x("a")
            .with_y("b");
        assert!(matches!(
            session.bivariate(&no_size),
            Err(Error::IncompleteSelection("bubble"))
        ));

        let one_col = MultivariateSelection::new(MultivariateKind::Sankey).with_cols(["alone"]);
        assert!(matches!(
            session.multivariate(&one_col),
            Err(Error::IncompleteSelection("sankey"))
        ));

        assert!(transport.calls().is_empty());
    }

    #[test]
    fn univariate_round_trip_memoizes_the_body() {
        let (session, transport) = session(vec![Ok(json!({
            "bins": [0.0, 10.0, 20.0],
            "counts": [3, 7]
        }))]);
        let selection = UnivariateSelection::new(UnivariateKind::Histogram).with_column("age");

        let spec = session.univariate(&selection).unwrap();
        assert_eq!(spec.trace_count(), 2);
        assert!(matches!(spec.data[0], Trace::Bar(_)));

        let again = session.univariate(&selection).unwrap();
        assert_eq!(again.trace_count(), 2);
        assert_eq!(
            transport.calls(),
            ["http://stats.test/univariate/histogram?column=age"]
        );
    }

    #[test]
    fn density_overlays_fetch_the_box_summary_too() {
        let (session, transport) = session(vec![
            Ok(json!([{"x": 0.0, "y": 0.1}, {"x": 1.0, "y": 0.4}])),
            Ok(json!({"min": 0.0, "q1": 0.2, "median": 0.5, "q3": 0.7, "max": 1.0})),
        ]);
        let selection = UnivariateSelection::new(UnivariateKind::Density).with_column("fare");
        session.univariate(&selection).unwrap();
        assert_eq!(
            transport.calls(),
            [
                "http://stats.test/univariate/density?column=fare",
                "http://stats.test/univariate/box?column=fare"
            ]
        );
    }

    #[test]
    fn bivariate_roles_flow_into_the_builder() {
        let (session, _transport) = session(vec![Ok(json!([
            {"category": "west", "group": "2021", "value": 4.0},
            {"category": "west", "group": "2022", "value": 6.0},
            {"category": "east", "group": "2021", "value": 2.0}
        ]))]);
        let selection = BivariateSelection::new(BivariateKind::GroupedBar)
            .with_category("region")
            .with_group("year");

        let spec = session.bivariate(&selection).unwrap();
        let names: Vec<&str> = spec
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Bar(bar) => bar.name.as_deref().unwrap_or(""),
                other => panic!("unexpected trace: {other:?}"),
            })
            .collect();
        assert_eq!(names, ["2021", "2022"]);
    }

    #[test]
    fn multivariate_hierarchies_decode_into_flat_ids() {
        let (session, _transport) = session(vec![Ok(json!({
            "west": {"sf": 2.0, "la": 1.0},
            "east": {"nyc": 5.0}
        }))]);
        let selection = MultivariateSelection::new(MultivariateKind::Treemap)
            .with_path_cols(["region", "city"])
            .with_value("sales");

        let spec = session.multivariate(&selection).unwrap();
        match &spec.data[0] {
            Trace::Treemap(tree) => {
                assert_eq!(tree.ids, ["west", "west-sf", "west-la", "east", "east-nyc"]);
            }
            other => panic!("unexpected trace: {other:?}"),
        }
    }

    #[test]
    fn render_drives_the_view_through_its_phases() {
        let (session, transport) = session(vec![
            Ok(json!({"bins": [0.0, 1.0, 2.0], "counts": [1, 2]})),
            Err(Error::Http { status: 502 }),
        ]);
        let mut view = ChartView::new();

        session.render_univariate(
            &mut view,
            &UnivariateSelection::new(UnivariateKind::Histogram).with_column("age"),
        );
        assert_eq!(*view.phase(), Phase::Ready);
        assert!(view.spec().is_some());

        session.render_univariate(
            &mut view,
            &UnivariateSelection::new(UnivariateKind::Histogram).with_column("fare"),
        );
        match view.phase() {
            Phase::Error(message) => assert!(message.contains("502")),
            other => panic!("unexpected phase: {other:?}"),
        }
        assert!(view.spec().is_some());

        session.render_univariate(
            &mut view,
            &UnivariateSelection::new(UnivariateKind::Histogram),
        );
        assert_eq!(*view.phase(), Phase::Idle);
        assert!(view.spec().is_none());
        assert_eq!(transport.calls().len(), 2);
    }
}
