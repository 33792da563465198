//! View models for the resources the console polls

mod instance_view;
mod placement_view;

pub use instance_view::{ControlPlane, GlooInstance, InstanceSpec, ObjectMeta, Proxy};
pub use placement_view::{ClusterPlacement, NamespacePlacement, PlacementNotification, PlacementStatus};
