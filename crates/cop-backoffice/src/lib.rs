pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod export;
pub mod import;
pub mod store;
pub mod telemetry;
