//! Deep links from issues back into the console

use crate::aggregator::ObjectRef;
use serde::{Deserialize, Serialize};

/// Link attached to an issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    pub details_link: String,
    pub link_title: String,
}

/// Resolves a category and target reference into a console link
pub trait LinkResolver {
    fn resolve(&self, category: &str, target: &ObjectRef) -> IssueLink;
}

impl<F> LinkResolver for F
where
    F: Fn(&str, &ObjectRef) -> IssueLink,
{
    fn resolve(&self, category: &str, target: &ObjectRef) -> IssueLink {
        self(category, target)
    }
}

/// Console section a check category lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Admin pages addressed by the instance alone
    Admin(&'static str),
    /// Resource pages addressed by `<namespace>/<name>`
    Resource(&'static str),
}

/// Map a check category to its console section and display name
pub fn section_for(category: &str) -> Option<(Section, &'static str)> {
    let section = match category {
        "gateways" => (Section::Admin("gloo-admin/gateways"), "Gateway"),
        "proxies" => (Section::Admin("gloo-admin/proxy"), "Proxy"),
        "settings" => (Section::Admin("gloo-admin/settings"), "Settings"),
        "deployments" => (Section::Admin("gloo-admin/deployments"), "Deployment"),
        "pods" => (Section::Admin("gloo-admin/pods"), "Pod"),
        "authConfigs" => (Section::Resource("auth-configs"), "Auth Config"),
        "rateLimitConfigs" => (Section::Resource("rate-limit-configs"), "Rate Limit Config"),
        "matchableHttpGateways" => (Section::Admin("gloo-admin/gateways"), "HTTP Gateway"),
        "virtualServices" => (Section::Resource("virtual-services"), "Virtual Service"),
        "routeTables" => (Section::Resource("route-tables"), "Route Table"),
        "upstreams" => (Section::Resource("upstreams"), "Upstream"),
        "upstreamGroups" => (Section::Resource("upstream-groups"), "Upstream Group"),
        _ => return None,
    };
    Some(section)
}

/// Builds links under `<prefix>/gloo-instances/<namespace>/<name>/` for one
/// Gloo instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleRoutes {
    prefix: String,
    instance: ObjectRef,
}

impl ConsoleRoutes {
    pub fn new(prefix: impl Into<String>, instance: ObjectRef) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        Self { prefix, instance }
    }

    /// Landing page of the instance
    pub fn instance_link(&self) -> String {
        format!(
            "{}/gloo-instances/{}/{}/",
            self.prefix, self.instance.namespace, self.instance.name
        )
    }
}

impl LinkResolver for ConsoleRoutes {
    fn resolve(&self, category: &str, target: &ObjectRef) -> IssueLink {
        let base = self.instance_link();
        match section_for(category) {
            Some((Section::Admin(path), title)) => IssueLink {
                details_link: format!("{}{}/", base, path),
                link_title: format!("View {}", title),
            },
            Some((Section::Resource(path), title)) => IssueLink {
                details_link: format!("{}{}/{}/{}/", base, path, target.namespace, target.name),
                link_title: format!("View {}", title),
            },
            None => {
                tracing::debug!(category, "no console section for category, linking to instance");
                IssueLink {
                    details_link: base,
                    link_title: "View Gloo Instance".to_string(),
                }
            }
        }
    }
}
