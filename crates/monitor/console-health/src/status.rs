//! Status enumerations and their classification into display buckets
//!
//! Three independently numbered enumerations reach the console: the solo-kit
//! resource status, the federation placement status and the failover scheme
//! status. Codes are only meaningful together with their [`StatusType`], so
//! classification always dispatches on the `(type, code)` pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which enumeration a raw status code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    /// Resource status (upstreams, virtual services, gateways, ...)
    #[default]
    Default,
    /// Federated placement status
    Placement,
    /// Failover scheme status
    Failover,
}

/// Display bucket for a single status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthColor {
    Success,
    Warning,
    Error,
    Unknown,
}

impl HealthColor {
    /// Only warnings and errors are surfaced to the user as notifications
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl fmt::Display for HealthColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Resource status state (solo-kit `core.Status.State`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceState {
    /// No data yet
    #[default]
    Pending,
    /// Healthy
    Accepted,
    /// Invalid or failed
    Rejected,
    /// Healthy with caveats
    Warning,
}

impl ResourceState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Accepted),
            2 => Some(Self::Rejected),
            3 => Some(Self::Warning),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Rejected => 2,
            Self::Warning => 3,
        }
    }

    pub fn health_color(&self) -> HealthColor {
        match self {
            Self::Accepted => HealthColor::Success,
            Self::Warning => HealthColor::Warning,
            Self::Rejected => HealthColor::Error,
            Self::Pending => HealthColor::Unknown,
        }
    }

    /// Rank used when rolling several states into one. Pending ranks lowest
    /// so any real data outweighs it.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Warning => 2,
            Self::Rejected => 3,
        }
    }

    /// Keep the more severe of two states
    pub fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Warning => "Warning",
        };
        write!(f, "{}", label)
    }
}

/// Federated placement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementState {
    Unknown,
    Placed,
    Failed,
    Stale,
    Invalid,
    Pending,
}

impl PlacementState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Placed),
            2 => Some(Self::Failed),
            3 => Some(Self::Stale),
            4 => Some(Self::Invalid),
            5 => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Placed => 1,
            Self::Failed => 2,
            Self::Stale => 3,
            Self::Invalid => 4,
            Self::Pending => 5,
        }
    }

    pub fn health_color(&self) -> HealthColor {
        match self {
            Self::Placed => HealthColor::Success,
            Self::Stale | Self::Pending => HealthColor::Warning,
            Self::Failed | Self::Invalid => HealthColor::Error,
            Self::Unknown => HealthColor::Unknown,
        }
    }
}

/// Failover scheme state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailoverState {
    Pending,
    Processing,
    Invalid,
    Failed,
    Accepted,
}

impl FailoverState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Processing),
            2 => Some(Self::Invalid),
            3 => Some(Self::Failed),
            4 => Some(Self::Accepted),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Invalid => 2,
            Self::Failed => 3,
            Self::Accepted => 4,
        }
    }

    pub fn health_color(&self) -> HealthColor {
        match self {
            Self::Accepted => HealthColor::Success,
            Self::Processing => HealthColor::Warning,
            Self::Failed | Self::Invalid => HealthColor::Error,
            Self::Pending => HealthColor::Unknown,
        }
    }
}

/// A raw code decoded against its enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Resource(ResourceState),
    Placement(PlacementState),
    Failover(FailoverState),
    Unrecognized { status_type: StatusType, code: i32 },
}

impl StatusCode {
    pub fn decode(code: i32, status_type: StatusType) -> Self {
        let decoded = match status_type {
            StatusType::Default => ResourceState::from_code(code).map(Self::Resource),
            StatusType::Placement => PlacementState::from_code(code).map(Self::Placement),
            StatusType::Failover => FailoverState::from_code(code).map(Self::Failover),
        };
        decoded.unwrap_or(Self::Unrecognized { status_type, code })
    }

    pub fn health_color(&self) -> HealthColor {
        match self {
            Self::Resource(state) => state.health_color(),
            Self::Placement(state) => state.health_color(),
            Self::Failover(state) => state.health_color(),
            // Unrecognized codes stay visible instead of reading as healthy
            Self::Unrecognized { .. } => HealthColor::Warning,
        }
    }
}

/// Classify a raw status code of the given enumeration
pub fn classify_state(state: i32, status_type: StatusType) -> HealthColor {
    let decoded = StatusCode::decode(state, status_type);
    if let StatusCode::Unrecognized { status_type, code } = decoded {
        tracing::debug!(?status_type, code, "unrecognized status code, classifying as warning");
    }
    decoded.health_color()
}

/// A resource's reported status as received from the API server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    /// Raw `core.Status.State` code
    #[serde(default)]
    pub state: i32,
    /// Why the resource is in this state, if the server said
    #[serde(default)]
    pub reason: Option<String>,
}

impl ResourceStatus {
    /// Decoded state; codes outside the enumeration read as Pending
    pub fn resource_state(&self) -> ResourceState {
        ResourceState::from_code(self.state).unwrap_or_default()
    }
}
