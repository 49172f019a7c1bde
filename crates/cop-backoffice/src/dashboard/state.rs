use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{DashboardReport, DashboardSnapshot};

/// Lifecycle of one dashboard view as a tagged union rather than a pile of
/// independent boolean flags, so "loading while ready" and similar invalid
/// combinations cannot be represented.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DashboardState {
    /// No refresh requested yet. Distinct from loaded-but-empty: callers
    /// must render "not ready", never a zeroed dashboard.
    Idle,
    Loading {
        since: DateTime<Utc>,
    },
    Ready(DashboardReport),
    Failed {
        reason: String,
    },
}

/// Transitions accepted by the dashboard state machine.
#[derive(Debug)]
pub enum DashboardEvent {
    RefreshRequested {
        at: DateTime<Utc>,
    },
    /// All collections resolved; a full aggregation pass replaces whatever
    /// report was held before.
    CollectionsResolved {
        snapshot: DashboardSnapshot,
        at: DateTime<Utc>,
    },
    FetchFailed {
        reason: String,
    },
}

impl DashboardState {
    pub fn apply(self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::RefreshRequested { at } => Self::Loading { since: at },
            DashboardEvent::CollectionsResolved { snapshot, at } => {
                Self::Ready(DashboardReport::from_snapshot(snapshot, at))
            }
            DashboardEvent::FetchFailed { reason } => Self::Failed { reason },
        }
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        match self {
            Self::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Bounded-wait check for the loading phase: once `timeout` has passed
    /// the UI surfaces a non-blocking "still waiting" indicator instead of
    /// hanging on a spinner.
    pub fn is_stalled(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        match self {
            Self::Loading { since } => now.signed_duration_since(*since) > timeout,
            _ => false,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::Idle
    }
}
