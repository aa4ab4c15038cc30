//! Typed response schemas for the statistics backend.
//!
//! Every endpoint's payload is decoded into one of these structs at the fetch
//! boundary, so shape mismatches surface as [`Error::Decode`](crate::Error)
//! instead of leaking into the chart builders.

mod bivariate;
mod multivariate;
mod univariate;

pub use bivariate::*;
pub use multivariate::*;
pub use univariate::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Decode a cached response body into its endpoint schema.
pub(crate) fn decode<T>(endpoint: &str, value: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map_err(|source| Error::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Categorical cell value. The backend emits whatever dtype the source column
/// holds, so labels accept strings, numbers, bools, or null and normalize to
/// their text form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Label(pub String);

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self(label_text(&raw)))
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn label_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `GET /get_projects`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<String>,
}

/// `POST /load_project/?path=…`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProjectColumns {
    #[serde(default)]
    pub columns: Vec<String>,
}
