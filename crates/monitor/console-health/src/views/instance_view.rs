//! Gloo instance view
//!
//! A Gloo instance is the composite resource the console's landing page is
//! built around: one control plane, its Envoy proxies, and a check summary
//! for every kind of resource it manages.

use crate::aggregator::{aggregate_checks, collect_issues, CheckSummaries, IssueSet, ObjectRef, OverallState};
use crate::routes::LinkResolver;
use crate::status::ResourceState;
use serde::{Deserialize, Serialize};

/// Snapshot of a Gloo instance as served by the API server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlooInstance {
    /// Identity; `None` when the API server omitted it
    #[serde(default)]
    pub metadata: Option<ObjectMeta>,
    /// Instance details; `None` until the instance has been discovered
    #[serde(default)]
    pub spec: Option<InstanceSpec>,
}

/// Kubernetes-style object metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Resource name
    #[serde(default)]
    pub name: String,
    /// Resource namespace
    #[serde(default)]
    pub namespace: String,
    /// Cluster-assigned identifier
    #[serde(default)]
    pub uid: String,
}

/// Desired and observed state of a Gloo instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Cluster the instance runs in
    #[serde(default)]
    pub cluster: String,

    /// Cloud region of the cluster
    #[serde(default)]
    pub region: String,

    /// Whether this is an enterprise installation
    #[serde(default)]
    pub is_enterprise: bool,

    /// Control plane deployment
    #[serde(default)]
    pub control_plane: Option<ControlPlane>,

    /// Envoy proxy deployments
    #[serde(rename = "proxiesList", default)]
    pub proxies: Vec<Proxy>,

    /// Per-category check summaries; absent until the first check completes
    #[serde(default)]
    pub check: Option<CheckSummaries>,
}

/// The Gloo control plane deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlane {
    /// Gloo version
    #[serde(default)]
    pub version: String,
    /// Namespace the control plane is installed in
    #[serde(default)]
    pub namespace: String,
    /// Namespaces watched for configuration; empty means all
    #[serde(rename = "watchedNamespacesList", default)]
    pub watched_namespaces: Vec<String>,
}

/// An Envoy proxy deployment managed by the instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    /// Deployment name
    #[serde(default)]
    pub name: String,

    /// Deployment namespace
    #[serde(default)]
    pub namespace: String,

    /// Requested replicas
    #[serde(default)]
    pub replicas: u32,

    /// Replicas available to serve traffic
    #[serde(default)]
    pub available_replicas: u32,

    /// Replicas passing readiness checks
    #[serde(default)]
    pub ready_replicas: u32,

    /// Envoy image version
    #[serde(default)]
    pub version: String,

    /// Availability zones the replicas are scheduled in
    #[serde(rename = "zonesList", default)]
    pub zones: Vec<String>,
}

impl GlooInstance {
    /// Reference to the instance itself
    pub fn object_ref(&self) -> ObjectRef {
        self.metadata
            .as_ref()
            .map(|meta| ObjectRef::new(meta.name.clone(), meta.namespace.clone()))
            .unwrap_or_default()
    }

    /// Display name, with a placeholder for instances missing metadata
    pub fn display_name(&self) -> &str {
        match &self.metadata {
            Some(meta) => &meta.name,
            None => "An instance without a UID was found!",
        }
    }

    fn proxies(&self) -> &[Proxy] {
        self.spec.as_ref().map(|spec| spec.proxies.as_slice()).unwrap_or_default()
    }

    fn check(&self) -> Option<&CheckSummaries> {
        self.spec.as_ref().and_then(|spec| spec.check.as_ref())
    }

    /// Overall instance health from its check summaries
    pub fn status(&self) -> OverallState {
        aggregate_checks(self.check())
    }

    /// Errors and warnings across every check category
    pub fn issues<R>(&self, resolver: &R) -> IssueSet
    where
        R: LinkResolver + ?Sized,
    {
        collect_issues(self.check(), resolver)
    }

    /// Replicas across all proxies, saturating at `u32::MAX`
    pub fn replicas(&self) -> u32 {
        self.proxies().iter().map(|p| p.replicas).fold(0, u32::saturating_add)
    }

    /// Available replicas across all proxies, saturating at `u32::MAX`
    pub fn available_replicas(&self) -> u32 {
        self.proxies()
            .iter()
            .map(|p| p.available_replicas)
            .fold(0, u32::saturating_add)
    }

    pub fn unavailable_replicas(&self) -> u32 {
        self.replicas().saturating_sub(self.available_replicas())
    }

    /// Envoy health: `None` when the instance lists no proxies, Rejected
    /// while any replica is unavailable, Accepted otherwise
    pub fn envoy_health(&self) -> Option<ResourceState> {
        if self.proxies().is_empty() {
            return None;
        }
        if self.available_replicas() < self.replicas() {
            Some(ResourceState::Rejected)
        } else {
            Some(ResourceState::Accepted)
        }
    }

    /// Zones across all proxies, in proxy order
    pub fn zones(&self) -> Vec<&str> {
        self.proxies()
            .iter()
            .flat_map(|p| p.zones.iter().map(String::as_str))
            .collect()
    }
}
