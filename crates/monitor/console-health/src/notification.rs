//! Notifications derived from a single status and its reason

use crate::aggregator::Issue;
use crate::status::{classify_state, HealthColor, StatusType};
use serde::{Deserialize, Serialize};

/// Severity of a surfaced notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    Warning,
    Error,
}

impl NotificationType {
    /// Notification type for a bucket, if the bucket is worth surfacing
    pub fn from_color(color: HealthColor) -> Option<Self> {
        match color {
            HealthColor::Warning => Some(Self::Warning),
            HealthColor::Error => Some(Self::Error),
            HealthColor::Success | HealthColor::Unknown => None,
        }
    }
}

/// A notification shown next to a health indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIssue {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub issue: Issue,
}

/// Build the notification for a status, if there is anything to show.
///
/// Returns `None` when the reason is absent or empty, or when the state
/// classifies as success or unknown.
pub fn derive_notification(
    state: i32,
    status_type: StatusType,
    reason: Option<&str>,
) -> Option<NotificationIssue> {
    let reason = reason.filter(|r| !r.is_empty())?;
    let kind = NotificationType::from_color(classify_state(state, status_type))?;

    Some(NotificationIssue {
        kind,
        issue: Issue::from_message(reason),
    })
}
