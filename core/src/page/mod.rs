//! Per-page fetch/mutate lifecycles.
//!
//! # Overview
//! Each routed page owns its own state: there is no shared cache. A page
//! hands the host at most one `HttpRequest` at a time per kind of work and
//! is told about the result through an `Outcome`:
//!
//! ```text
//! Idle -> Loading -> Loaded | NotFound | Failed
//! Loaded -> Saving | Deleting -> Loaded (+ notice or inline error)
//! ```
//!
//! # Design
//! - Duplicate submissions are impossible because a page returns `None`
//!   instead of a request while one of the same kind is in flight.
//! - Every failure becomes visible page state; no method returns an error.
//! - Time is passed in by the host (`now: Instant`), so the transient
//!   success notice can be tested without sleeping.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};

use crate::error::ApiError;
use crate::http::{HttpResponse, Outcome};

pub mod create;
pub mod detail;
pub mod list;

pub use create::{CreatePage, CreateView};
pub use detail::{DetailPage, DetailPanel, DetailView, DELETE_PROMPT};
pub use list::{ListPage, ListView, PostLink};

/// How long a success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Read-path state of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    /// The requested record does not exist. Terminal.
    NotFound,
    /// Message shown in place of the page.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// A success message that hides itself after `NOTICE_TTL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    shown_at: Instant,
}

impl Notice {
    pub fn new(now: Instant) -> Self {
        Self { shown_at: now }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// Drop `notice` once it has been visible long enough.
fn expire(notice: &mut Option<Notice>, now: Instant) {
    if notice.is_some_and(|n| n.is_expired(now)) {
        *notice = None;
    }
}

/// Calendar date of a server timestamp in the viewer's time zone.
fn local_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Combine a transport outcome with the client's parser.
fn resolve<T>(
    outcome: Outcome,
    parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    outcome.map_err(ApiError::from).and_then(parse)
}
