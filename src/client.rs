//! Canonical endpoint construction, session cache, and the cache-backed
//! fetch client.
//!
//! Requests are keyed by their fully resolved URL: two logically identical
//! requests always serialize to the same string, so they share one cache
//! entry and at most one network round trip per session.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Error, Result};

/// A backend route plus its `(role, column)` query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    path: String,
    params: Vec<(&'static str, String)>,
}

impl Endpoint {
    /// `path` is the route relative to the base URL, leading slash included.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Append one `name=` parameter per value, e.g. repeated `cols=`.
    pub fn repeated<I, S>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.params.push((name, value.into()));
        }
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fully resolved request URL, which doubles as the cache key.
    ///
    /// Parameters are emitted sorted by name (stable, so repeated parameters
    /// keep their relative order) with percent-encoded values.
    pub fn canonical_url(&self, base: &str) -> String {
        let mut params = self.params.clone();
        params.sort_by_key(|(name, _)| *name);

        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path);
        for (i, (name, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

/// How request bodies reach the backend. Production uses [`HttpTransport`];
/// tests substitute a recording mock.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value>;
    fn post_json(&self, url: &str) -> Result<Value>;
}

/// Blocking HTTP transport over a shared [`ureq::Agent`].
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.agent.get(url).call().map_err(request_error)?;
        response.into_body().read_json().map_err(request_error)
    }

    fn post_json(&self, url: &str) -> Result<Value> {
        let response = self
            .agent
            .post(url)
            .send(&[] as &[u8])
            .map_err(request_error)?;
        response.into_body().read_json().map_err(request_error)
    }
}

fn request_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::StatusCode(status) => Error::Http { status },
        other => Error::Transport(Box::new(other)),
    }
}

/// Session-lifetime response store. Append-only: entries are never evicted
/// or invalidated, and failures are never stored.
#[derive(Default)]
pub struct SessionCache {
    entries: Mutex<HashMap<String, Arc<Value>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        self.entries.lock().insert(key, Arc::clone(&value));
        value
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Cache-first client for the statistics backend. No retries, no eviction:
/// a hit returns the memoized body, a miss performs one GET and stores the
/// body only on success.
pub struct FetchClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: SessionCache,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self::with_cache(base_url, transport, SessionCache::new())
    }

    /// Build around an explicit cache, letting callers scope or share it.
    pub fn with_cache(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        cache: SessionCache,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn fetch(&self, endpoint: &Endpoint) -> Result<Arc<Value>> {
        let url = endpoint.canonical_url(&self.base_url);
        if let Some(hit) = self.cache.get(&url) {
            debug!(%url, "cache hit");
            return Ok(hit);
        }
        debug!(%url, "cache miss");
        match self.transport.get_json(&url) {
            Ok(body) => Ok(self.cache.insert(url, body)),
            Err(err) => {
                warn!(%url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Records every URL it sees and pops canned results in order.
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

        fn call_count(&self) -> usize {
            self.calls.lock().len()
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

    #[test]
    fn canonical_url_is_order_insensitive() {
        let a = Endpoint::new("/bivariate/scatter")
            .param("x_col", "height")
            .param("y_col", "weight");
        let b = Endpoint::new("/bivariate/scatter")
            .param("y_col", "weight")
            .param("x_col", "height");
        assert_eq!(
            a.canonical_url("http://localhost:8000"),
            b.canonical_url("http://localhost:8000/")
        );
    }

    #[test]
    fn repeated_params_keep_their_relative_order() {
        let url = Endpoint::new("/multivariate/pair_plot")
            .repeated("cols", ["b", "a", "c"])
            .canonical_url("http://x");
        assert_eq!(url, "http://x/multivariate/pair_plot?cols=b&cols=a&cols=c");
    }

    #[test]
    fn values_are_percent_encoded() {
        let url = Endpoint::new("/univariate/histogram")
            .param("column", "unit price ($)")
            .canonical_url("http://x");
        assert_eq!(
            url,
            "http://x/univariate/histogram?column=unit%20price%20%28%24%29"
        );
    }

    #[test]
    fn identical_requests_share_one_transport_call() {
        let transport = RecordingTransport::with_results(vec![Ok(json!({"n": 1}))]);
        let client = FetchClient::new("http://x", Arc::clone(&transport) as Arc<dyn Transport>);
        let first = Endpoint::new("/univariate/bar").param("column", "city");
        let second = Endpoint::new("/univariate/bar").param("column", "city");

        let a = client.fetch(&first).unwrap();
        let b = client.fetch(&second).unwrap();
        assert_eq!(*a, *b);
        assert_eq!(transport.call_count(), 1);
        assert_eq!(client.cache().len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let transport = RecordingTransport::with_results(vec![
            Err(Error::Http { status: 500 }),
            Ok(json!({"n": 2})),
        ]);
        let client = FetchClient::new("http://x", Arc::clone(&transport) as Arc<dyn Transport>);
        let endpoint = Endpoint::new("/univariate/box").param("column", "total");

        assert!(matches!(
            client.fetch(&endpoint),
            Err(Error::Http { status: 500 })
        ));
        assert!(client.cache().is_empty());

        let ok = client.fetch(&endpoint).unwrap();
        assert_eq!(ok["n"], 2);
        assert_eq!(transport.call_count(), 2);
    }
}
