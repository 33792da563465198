//! # Console Health
//!
//! Turns polled gateway resource snapshots into the health indicators and
//! issue lists shown by the admin console.
//!
//! ## Key Features
//! - Status code classification across the resource, placement and failover
//!   enumerations
//! - Notification derivation from a status and its reason
//! - Check summary aggregation with Rejected > Warning > Accepted precedence
//! - Issue collection with deep links into the console
//! - Instance, Envoy replica and federated placement views
//! - Snapshot loading and a reporting binary
//!
//! Everything in [`status`], [`notification`], [`aggregator`] and
//! [`views`] is pure: no I/O, no shared state, and no failure path.

pub mod status;
pub mod notification;
pub mod aggregator;
pub mod routes;
pub mod views;
pub mod collector;
pub mod config;
pub mod report;

// Re-export main types
pub use status::{
    classify_state, FailoverState, HealthColor, PlacementState, ResourceState, ResourceStatus, StatusType,
};
pub use notification::{derive_notification, NotificationIssue, NotificationType};
pub use aggregator::{
    aggregate_checks, collect_issues, CheckSummaries, CheckSummary, Issue, IssueSet, ObjectRef,
    OverallState, ResourceReport,
};
pub use routes::{ConsoleRoutes, IssueLink, LinkResolver};
pub use views::{GlooInstance, PlacementStatus, PlacementNotification};
pub use collector::{ClusterDetails, SnapshotCollector};
pub use config::{ConsoleConfig, OutputFormat};
pub use report::{HealthReport, InstanceReport};

use thiserror::Error;

/// Errors raised by the loading surfaces (snapshots and configuration)
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HealthError>;
