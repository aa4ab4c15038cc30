//! Per-panel display lifecycle.
//!
//! A panel cycles `Idle` → `Loading` → `Ready`/`Error` indefinitely as the
//! user changes selections. Responses arrive whenever the transport gets
//! around to them, so every cycle is ticketed: the view hands out a
//! [`RequestToken`] on `begin` and ignores any resolution presenting an
//! outdated one. An older response can therefore never overwrite a newer
//! chart.

use tracing::debug;

use crate::core::ChartSpec;
use crate::Result;

/// Display phase of one chart panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Ticket for one request cycle, issued by [`ChartView::begin`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RequestToken(u64);

/// Tracks what one panel should currently display.
///
/// The last ready spec stays available through `Loading` and `Error`, so a
/// failed refresh keeps the previous chart on screen next to the error
/// message. Only [`reset`](Self::reset) drops it.
#[derive(Default)]
pub struct ChartView {
    phase: Phase,
    spec: Option<ChartSpec>,
    generation: u64,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Most recent successfully built spec, if any.
    pub fn spec(&self) -> Option<&ChartSpec> {
        self.spec.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Start a request cycle: enter `Loading` and return the token the
    /// eventual outcome must present. Starting a new cycle invalidates all
    /// previously issued tokens.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.phase = Phase::Loading;
        RequestToken(self.generation)
    }

    /// Deliver the outcome of a request cycle. Returns false, changing
    /// nothing, when a newer cycle started after the token was issued.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<ChartSpec>) -> bool {
        if token.0 != self.generation {
            debug!(
                stale = token.0,
                current = self.generation,
                "discarding stale chart response"
            );
            return false;
        }
        match outcome {
            Ok(spec) => {
                self.spec = Some(spec);
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.phase = Phase::Error(err.to_string());
            }
        }
        true
    }

    /// Back to `Idle`, dropping the retained spec and invalidating any
    /// in-flight cycle. Used when the panel's chart kind changes or the
    /// selection becomes incomplete.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.spec = None;
    }
}
