//! Placement status of federated resources
//!
//! Federated resources are written to many clusters and namespaces. Each
//! write target reports its own placement state, and the federation
//! controller reports one state for the resource as a whole.

use crate::notification::{derive_notification, NotificationIssue};
use crate::status::{classify_state, HealthColor, PlacementState, StatusType};
use serde::{Deserialize, Serialize};

/// Placement status as served by the API server. Maps arrive as ordered
/// `[key, value]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStatus {
    #[serde(rename = "clustersMap", default)]
    pub clusters: Vec<(String, ClusterPlacement)>,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub observed_generation: i64,
    #[serde(default)]
    pub written_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterPlacement {
    #[serde(rename = "namespacesMap", default)]
    pub namespaces: Vec<(String, NamespacePlacement)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacePlacement {
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub message: String,
}

/// A notification tied to where it was reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementNotification {
    /// `None` for the resource-level status
    pub cluster: Option<String>,
    pub namespace: Option<String>,
    pub notification: NotificationIssue,
}

impl PlacementStatus {
    pub fn placement_state(&self) -> Option<PlacementState> {
        PlacementState::from_code(self.state)
    }

    /// Color of the resource-level state
    pub fn color(&self) -> HealthColor {
        classify_state(self.state, StatusType::Placement)
    }

    /// Resource-level notification followed by one per write target, in
    /// cluster then namespace order
    pub fn notifications(&self) -> Vec<PlacementNotification> {
        let top = derive_notification(self.state, StatusType::Placement, Some(self.message.as_str()))
            .map(|notification| PlacementNotification {
                cluster: None,
                namespace: None,
                notification,
            });

        let targets = self.clusters.iter().flat_map(|(cluster, placement)| {
            placement.namespaces.iter().filter_map(move |(namespace, status)| {
                derive_notification(status.state, StatusType::Placement, Some(status.message.as_str()))
                    .map(|notification| PlacementNotification {
                        cluster: Some(cluster.clone()),
                        namespace: Some(namespace.clone()),
                        notification,
                    })
            })
        });

        top.into_iter().chain(targets).collect()
    }

    /// Number of write targets in each bucket: (success, warning, error, unknown)
    pub fn target_counts(&self) -> (usize, usize, usize, usize) {
        let mut counts = (0, 0, 0, 0);
        for (_, placement) in &self.clusters {
            for (_, status) in &placement.namespaces {
                match classify_state(status.state, StatusType::Placement) {
                    HealthColor::Success => counts.0 += 1,
                    HealthColor::Warning => counts.1 += 1,
                    HealthColor::Error => counts.2 += 1,
                    HealthColor::Unknown => counts.3 += 1,
                }
            }
        }
        counts
    }
}
