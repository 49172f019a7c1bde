use crate::domain::{Demand, Enterprise, Event, Pole, VisitStats};

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record not found")]
    NotFound,
}

/// Narrow read gateway per entity so the aggregation engine and the HTTP
/// layer depend on an abstraction that an in-memory fake can satisfy.
pub trait EventStore: Send + Sync {
    fn list_events(&self) -> Result<Vec<Event>, StoreError>;
    fn add_events(&self, events: Vec<Event>) -> Result<usize, StoreError>;
}

pub trait EnterpriseStore: Send + Sync {
    fn list_enterprises(&self) -> Result<Vec<Enterprise>, StoreError>;
}

pub trait DemandStore: Send + Sync {
    fn list_demands(&self) -> Result<Vec<Demand>, StoreError>;
}

pub trait PoleStore: Send + Sync {
    fn list_poles(&self) -> Result<Vec<Pole>, StoreError>;
}

/// Visit statistics arrive pre-aggregated from the visit-tracking
/// collaborator; the store only hands the snapshot over.
pub trait VisitStatsSource: Send + Sync {
    fn visit_stats(&self) -> Result<VisitStats, StoreError>;
}
