//! Check summary aggregation and issue collection
//!
//! A composite resource (a Gloo instance) reports one [`CheckSummary`] per
//! category of sub-resource. This module rolls those summaries into one
//! [`OverallState`] and flattens their error and warning entries into
//! displayable [`Issue`]s.

use crate::routes::LinkResolver;
use crate::status::ResourceState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Overall state of a composite resource
pub type OverallState = ResourceState;

/// Category name -> summary, in the order the API server reported them.
/// A `None` value means the category has not been fetched yet.
pub type CheckSummaries = IndexMap<String, Option<CheckSummary>>;

/// Reference to the resource an error or warning points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Name of the referenced resource
    #[serde(default)]
    pub name: String,
    /// Namespace of the referenced resource
    #[serde(default)]
    pub namespace: String,
}

impl ObjectRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// A single error or warning entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReport {
    /// What is wrong with the resource
    #[serde(default)]
    pub message: String,
    /// The resource the entry is about
    #[serde(rename = "ref", default)]
    pub target: ObjectRef,
}

impl ResourceReport {
    pub fn new(message: impl Into<String>, target: ObjectRef) -> Self {
        Self {
            message: message.into(),
            target,
        }
    }
}

/// Errors and warnings for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    /// Resources of this category the check looked at
    #[serde(default)]
    pub total: u32,

    /// Resources in an error state
    #[serde(default)]
    pub errors_list: Vec<ResourceReport>,

    /// Resources accepted with warnings
    #[serde(default)]
    pub warnings_list: Vec<ResourceReport>,
}

impl CheckSummary {
    /// State this category contributes on its own
    pub fn state(&self) -> ResourceState {
        if !self.errors_list.is_empty() {
            ResourceState::Rejected
        } else if !self.warnings_list.is_empty() {
            ResourceState::Warning
        } else {
            ResourceState::Accepted
        }
    }
}

/// A displayable problem with a link to its source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Text shown to the user
    pub message: String,
    /// Console path of the offending resource; empty when there is none
    pub details_link: String,
    /// Label for the link
    pub link_title: String,
}

impl Issue {
    /// An issue that carries only a message
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Issues split by severity, in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSet {
    /// Issues from `errorsList` entries
    pub errors: Vec<Issue>,
    /// Issues from `warningsList` entries
    pub warnings: Vec<Issue>,
}

impl IssueSet {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Roll category summaries into one state.
///
/// Any rejected category wins, then any warning, then accepted. Missing
/// data (no mapping, an empty mapping, or only unfetched categories) is
/// Pending.
pub fn aggregate_checks(check_summaries: Option<&CheckSummaries>) -> OverallState {
    let Some(summaries) = check_summaries else {
        return ResourceState::Pending;
    };

    let mut fetched = summaries.values().flatten().peekable();
    if fetched.peek().is_none() {
        return ResourceState::Pending;
    }

    let mut overall = ResourceState::Accepted;
    for summary in fetched {
        overall = overall.worst(summary.state());
        if overall == ResourceState::Rejected {
            break;
        }
    }
    overall
}

/// Flatten every error and warning entry into issues with resolved links.
///
/// Order follows category order, then list order. Nothing is dropped or
/// deduplicated.
pub fn collect_issues<R>(check_summaries: Option<&CheckSummaries>, resolver: &R) -> IssueSet
where
    R: LinkResolver + ?Sized,
{
    let mut issues = IssueSet::default();
    let Some(summaries) = check_summaries else {
        return issues;
    };

    for (category, summary) in summaries {
        let Some(summary) = summary else {
            continue;
        };
        let to_issue = |report: &ResourceReport| {
            let link = resolver.resolve(category, &report.target);
            Issue {
                message: report.message.clone(),
                details_link: link.details_link,
                link_title: link.link_title,
            }
        };
        issues.errors.extend(summary.errors_list.iter().map(to_issue));
        issues.warnings.extend(summary.warnings_list.iter().map(to_issue));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::IssueLink;

    fn report(message: &str) -> ResourceReport {
        ResourceReport::new(message, ObjectRef::new(message, "gloo-system"))
    }

    fn summary(errors: &[&str], warnings: &[&str]) -> CheckSummary {
        CheckSummary {
            total: (errors.len() + warnings.len()) as u32,
            errors_list: errors.iter().map(|m| report(m)).collect(),
            warnings_list: warnings.iter().map(|m| report(m)).collect(),
        }
    }

    #[test]
    fn test_missing_data_is_pending() {
        assert_eq!(aggregate_checks(None), ResourceState::Pending);
        assert_eq!(aggregate_checks(Some(&CheckSummaries::new())), ResourceState::Pending);

        let mut unfetched = CheckSummaries::new();
        unfetched.insert("gateways".to_string(), None);
        assert_eq!(aggregate_checks(Some(&unfetched)), ResourceState::Pending);
    }

    #[test]
    fn test_empty_lists_are_accepted() {
        let mut summaries = CheckSummaries::new();
        summaries.insert("a".to_string(), Some(summary(&[], &[])));
        assert_eq!(aggregate_checks(Some(&summaries)), ResourceState::Accepted);
    }

    #[test]
    fn test_error_dominates_warning() {
        let mut summaries = CheckSummaries::new();
        summaries.insert("a".to_string(), Some(summary(&[], &["x"])));
        summaries.insert("b".to_string(), Some(summary(&["y"], &[])));
        assert_eq!(aggregate_checks(Some(&summaries)), ResourceState::Rejected);
    }

    #[test]
    fn test_warning_beats_accepted_and_unfetched() {
        let mut summaries = CheckSummaries::new();
        summaries.insert("a".to_string(), Some(summary(&[], &[])));
        summaries.insert("b".to_string(), None);
        summaries.insert("c".to_string(), Some(summary(&[], &["w"])));
        assert_eq!(aggregate_checks(Some(&summaries)), ResourceState::Warning);
    }

    #[test]
    fn test_collect_issues_keeps_order_and_duplicates() {
        let mut summaries = CheckSummaries::new();
        summaries.insert("a".to_string(), Some(summary(&["a1", "a2"], &["aw1", "aw2"])));
        summaries.insert("skipped".to_string(), None);
        summaries.insert("b".to_string(), Some(summary(&["b1", "a1"], &["bw1", "bw2"])));

        let resolver = |category: &str, target: &ObjectRef| IssueLink {
            details_link: format!("/{}/{}", category, target.name),
            link_title: category.to_string(),
        };
        let issues = collect_issues(Some(&summaries), &resolver);

        let errors: Vec<_> = issues.errors.iter().map(|i| i.message.as_str()).collect();
        let warnings: Vec<_> = issues.warnings.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(errors, vec!["a1", "a2", "b1", "a1"]);
        assert_eq!(warnings, vec!["aw1", "aw2", "bw1", "bw2"]);
        assert_eq!(issues.errors[2].details_link, "/b/b1");
        assert_eq!(issues.errors[3].link_title, "b");
        assert_eq!(issues.len(), 8);
    }

    #[test]
    fn test_collect_issues_without_data() {
        let resolver = |_: &str, _: &ObjectRef| IssueLink::default();
        assert!(collect_issues(None, &resolver).is_empty());
    }

    #[test]
    fn test_summary_from_console_json() {
        let json = r#"{
            "upstreams": {"total": 2, "errorsList": [{"ref": {"name": "petstore", "namespace": "gloo-system"}, "message": "bad host"}], "warningsList": []},
            "gateways": {"total": 1, "errorsList": [], "warningsList": []},
            "proxies": null
        }"#;
        let summaries: CheckSummaries = serde_json::from_str(json).unwrap();
        let categories: Vec<_> = summaries.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["upstreams", "gateways", "proxies"]);
        assert_eq!(aggregate_checks(Some(&summaries)), ResourceState::Rejected);
        let upstreams = summaries["upstreams"].as_ref().unwrap();
        assert_eq!(upstreams.errors_list[0].target.name, "petstore");
    }
}
