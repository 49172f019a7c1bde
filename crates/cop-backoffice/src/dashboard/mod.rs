pub mod metrics;
pub mod state;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Demand, Enterprise, Event, Pole, VisitStats};
use crate::store::{DemandStore, EnterpriseStore, EventStore, PoleStore, StoreError, VisitStatsSource};

pub use metrics::{
    compute_demand_metrics, compute_enterprise_metrics, compute_event_metrics, DemandMetrics,
    EnterpriseMetrics, EventMetrics, TopEnterprise,
};
pub use state::{DashboardEvent, DashboardState};

/// Immutable copy of every collection the engine consumes. Each refresh
/// produces a fresh snapshot; results replace rather than merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub events: Vec<Event>,
    pub enterprises: Vec<Enterprise>,
    pub demands: Vec<Demand>,
    pub poles: Vec<Pole>,
    pub visit_stats: VisitStats,
}

impl DashboardSnapshot {
    /// Pull a fresh snapshot from the record stores.
    pub fn load(
        events: &dyn EventStore,
        enterprises: &dyn EnterpriseStore,
        demands: &dyn DemandStore,
        poles: &dyn PoleStore,
        visits: &dyn VisitStatsSource,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            events: events.list_events()?,
            enterprises: enterprises.list_enterprises()?,
            demands: demands.list_demands()?,
            poles: poles.list_poles()?,
            visit_stats: visits.visit_stats()?,
        })
    }
}

/// The three metric summaries produced by one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub events: EventMetrics,
    pub enterprises: EnterpriseMetrics,
    pub demands: DemandMetrics,
}

impl DashboardMetrics {
    /// Run the full aggregation pass. Pure recomputation: no state is
    /// carried over from previous passes.
    pub fn compute(snapshot: &DashboardSnapshot) -> Self {
        Self {
            events: compute_event_metrics(&snapshot.events, &snapshot.poles),
            enterprises: compute_enterprise_metrics(&snapshot.enterprises, &snapshot.visit_stats),
            demands: compute_demand_metrics(&snapshot.demands),
        }
    }
}

/// A completed aggregation: metrics plus the raw snapshot they came from,
/// kept together so exports can lay out both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub metrics: DashboardMetrics,
    pub snapshot: DashboardSnapshot,
}

impl DashboardReport {
    pub fn from_snapshot(snapshot: DashboardSnapshot, generated_at: DateTime<Utc>) -> Self {
        let metrics = DashboardMetrics::compute(&snapshot);
        Self {
            generated_at,
            metrics,
            snapshot,
        }
    }
}
