//! Chart-data transformation layer for dataset dashboards.
//!
//! A remote statistics backend does the heavy numeric lifting (binning,
//! quartiles, density estimation, hierarchical aggregation); this crate is
//! the client-side half: it builds canonical request URLs, memoizes parsed
//! responses for the session, reshapes them with pure statistics and
//! hierarchy helpers, and assembles declarative chart specifications
//! (traces + layout + interaction config) that a Plotly-compatible renderer
//! consumes verbatim. A small display state machine tracks the
//! loading/ready/error lifecycle per panel and discards stale responses.
//!
//! ```no_run
//! use specto::prelude::*;
//!
//! let session = DashSession::new("http://127.0.0.1:8000");
//! let sel = UnivariateSelection::new(UnivariateKind::Histogram).with_column("age");
//! let spec = session.univariate(&sel)?;
//! println!("{}", serde_json::to_string(&spec)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod charts;
pub mod client;
pub mod core;
pub mod dash;
pub mod hierarchy;
pub mod select;
pub mod stats;
pub mod trace;
pub mod view;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("backend returned status {status}")]
    Http { status: u16 },

    #[error("transport failure: {0}")]
    Transport(Box<ureq::Error>),

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("statistics input is empty")]
    EmptyInput,

    #[error("unsupported chart type: {0}")]
    UnsupportedChartType(String),

    #[error("selection for {0} is missing required columns")]
    IncompleteSelection(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::core::*;
    pub use crate::dash::*;
    pub use crate::select::*;
    pub use crate::trace::*;
    pub use crate::view::*;
    pub use crate::{Error, Result};
}
