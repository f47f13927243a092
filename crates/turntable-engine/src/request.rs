//! Request lifecycle tracking.
//!
//! Each screen owns one [`RequestTracker`]. Submissions move it to
//! `Pending`; completions move it to `Succeeded` or `Failed`. Requests are
//! never serialized, so several may be outstanding and whichever resolves
//! last decides what is displayed.

use crate::client::RequestError;
use serde_json::Value;

/// Identifier of a single submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Displayed state of the most recent request activity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request to resolve succeeded with this body.
    Succeeded(Value),
    /// The last request to resolve failed.
    Failed(RequestError),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Tracks outstanding requests and the displayed [`RequestState`].
#[derive(Debug, Default)]
pub struct RequestTracker {
    state: RequestState,
    next_id: u64,
    outstanding: Vec<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Number of requests submitted but not yet resolved.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    pub fn has_outstanding(&self) -> bool {
        !self.outstanding.is_empty()
    }

    /// Start tracking a new request.
    pub fn begin(&mut self) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.outstanding.push(id);
        self.state = RequestState::Pending;
        id
    }

    /// Record the result of a request.
    ///
    /// Returns `false` if the id was not outstanding, in which case nothing
    /// changes.
    pub fn resolve(&mut self, id: RequestId, result: Result<Value, RequestError>) -> bool {
        let Some(pos) = self.outstanding.iter().position(|o| *o == id) else {
            return false;
        };
        self.outstanding.remove(pos);
        self.state = match result {
            Ok(body) => RequestState::Succeeded(body),
            Err(e) => RequestState::Failed(e),
        };
        true
    }
}
