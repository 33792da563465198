//! Health reports over a snapshot of Gloo instances

use crate::aggregator::{IssueSet, OverallState};
use crate::routes::{ConsoleRoutes, LinkResolver};
use crate::status::{HealthColor, ResourceState};
use crate::views::GlooInstance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluated health of one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceReport {
    pub name: String,
    pub namespace: String,
    pub cluster: String,
    /// Rolled-up check state
    pub status: OverallState,
    pub color: HealthColor,
    /// `None` when the instance lists no proxies
    pub envoy: Option<ResourceState>,
    pub unavailable_replicas: u32,
    /// Console landing page of the instance
    pub link: String,
    pub issues: IssueSet,
}

impl InstanceReport {
    pub fn evaluate(instance: &GlooInstance, route_prefix: &str) -> Self {
        let routes = ConsoleRoutes::new(route_prefix, instance.object_ref());
        Self::evaluate_with(instance, &routes, routes.instance_link())
    }

    /// Evaluate with a custom link resolver
    pub fn evaluate_with<R>(instance: &GlooInstance, resolver: &R, link: String) -> Self
    where
        R: LinkResolver + ?Sized,
    {
        let target = instance.object_ref();
        let status = instance.status();
        Self {
            name: instance.display_name().to_string(),
            namespace: target.namespace,
            cluster: instance
                .spec
                .as_ref()
                .map(|spec| spec.cluster.clone())
                .unwrap_or_default(),
            status,
            color: status.health_color(),
            envoy: instance.envoy_health(),
            unavailable_replicas: instance.unavailable_replicas(),
            link,
            issues: instance.issues(resolver),
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let headline = match self.status {
            ResourceState::Pending => format!("{} has not reported checks yet.", self.name),
            ResourceState::Accepted => format!("{} is healthy.", self.name),
            ResourceState::Warning => format!(
                "{} is healthy with {} warning(s).",
                self.name,
                self.issues.warnings.len()
            ),
            ResourceState::Rejected => format!(
                "{} has {} error(s) and {} warning(s).",
                self.name,
                self.issues.errors.len(),
                self.issues.warnings.len()
            ),
        };

        match self.unavailable_replicas {
            0 => headline,
            1 => format!("{} 1 Envoy instance is unavailable.", headline),
            n => format!("{} {} Envoy instances are unavailable.", headline, n),
        }
    }
}

/// Report over every instance in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall: OverallState,
    pub instances: Vec<InstanceReport>,
    pub generated_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn evaluate(instances: &[GlooInstance], route_prefix: &str) -> Self {
        let instances: Vec<_> = instances
            .iter()
            .map(|instance| InstanceReport::evaluate(instance, route_prefix))
            .collect();
        Self::from_instances(instances)
    }

    pub fn from_instances(instances: Vec<InstanceReport>) -> Self {
        let overall = instances
            .iter()
            .map(|report| report.status)
            .fold(ResourceState::Pending, ResourceState::worst);

        tracing::info!(instances = instances.len(), %overall, "health report evaluated");

        Self {
            overall,
            instances,
            generated_at: Utc::now(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.overall == ResourceState::Rejected
    }

    /// Multi-line text rendering: a summary per instance followed by its issues
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall: {} ({} instances)", self.overall, self.instances.len())?;

        for report in &self.instances {
            writeln!(f)?;
            writeln!(f, "[{}] {}", report.color, report.summary())?;
            if !report.link.is_empty() {
                writeln!(f, "  {}", report.link)?;
            }
            for issue in &report.issues.errors {
                writeln!(f, "  error: {} ({}: {})", issue.message, issue.link_title, issue.details_link)?;
            }
            for issue in &report.issues.warnings {
                writeln!(f, "  warning: {} ({}: {})", issue.message, issue.link_title, issue.details_link)?;
            }
        }
        Ok(())
    }
}
