//! Snapshot collection
//!
//! Reads Gloo instance snapshots exported from the API server. Three shapes
//! are accepted: a bare array of instances, an object with a
//! `glooInstances` array, or the cluster listing (`clusterDetailsList`)
//! where instances are grouped per cluster.

use crate::views::GlooInstance;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Instances grouped under one cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetails {
    #[serde(default)]
    pub cluster: String,
    #[serde(rename = "glooInstancesList", default)]
    pub gloo_instances: Vec<GlooInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Instances(Vec<GlooInstance>),
    Wrapped {
        #[serde(rename = "glooInstances")]
        gloo_instances: Vec<GlooInstance>,
    },
    Clusters {
        #[serde(rename = "clusterDetailsList")]
        clusters: Vec<ClusterDetails>,
    },
}

impl SnapshotDocument {
    fn into_instances(self) -> Vec<GlooInstance> {
        match self {
            Self::Instances(instances) | Self::Wrapped { gloo_instances: instances } => instances,
            Self::Clusters { clusters } => clusters
                .into_iter()
                .flat_map(|details| details.gloo_instances)
                .collect(),
        }
    }
}

/// Loads snapshots into instance lists, one self-consistent snapshot per call
#[derive(Debug, Clone, Default)]
pub struct SnapshotCollector;

impl SnapshotCollector {
    pub fn new() -> Self {
        Self
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(&self, json: &str) -> Result<Vec<GlooInstance>> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        Ok(document.into_instances())
    }

    /// Parse a snapshot from any reader
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<GlooInstance>> {
        let document: SnapshotDocument = serde_json::from_reader(reader)?;
        Ok(document.into_instances())
    }

    /// Load a snapshot file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<GlooInstance>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading snapshot");
        let file = File::open(path)?;
        let instances = self.from_reader(BufReader::new(file))?;
        info!(path = %path.display(), instances = instances.len(), "snapshot loaded");
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HealthError;

    #[test]
    fn test_bare_array() {
        let instances = SnapshotCollector::new()
            .from_json(r#"[{"metadata": {"name": "a", "namespace": "gloo-system"}}]"#)
            .unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].display_name(), "a");
    }

    #[test]
    fn test_wrapped() {
        let instances = SnapshotCollector::new()
            .from_json(r#"{"glooInstances": [{}, {}]}"#)
            .unwrap();
        assert_eq!(instances.len(), 2);
    }

    #[test]
    fn test_cluster_listing_flattens_in_order() {
        let json = r#"{"clusterDetailsList": [
            {"cluster": "east", "glooInstancesList": [{"metadata": {"name": "e1"}}]},
            {"cluster": "west", "glooInstancesList": [{"metadata": {"name": "w1"}}, {"metadata": {"name": "w2"}}]}
        ]}"#;
        let instances = SnapshotCollector::new().from_json(json).unwrap();
        let names: Vec<_> = instances.iter().map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["e1", "w1", "w2"]);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let err = SnapshotCollector::new().from_json("{\"nope\": 1").unwrap_err();
        assert!(matches!(err, HealthError::Snapshot(_)));
    }
}
