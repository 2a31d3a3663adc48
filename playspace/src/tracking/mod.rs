//! Tracking-system types, contracts, and the simulated backend

pub mod interface;
pub mod sim;
pub mod types;

pub use interface::{OriginMutator, PoseSource, TrackingBackend};
pub use sim::{MutatorCall, SimTracking};
pub use types::{ControllerButtons, DevicePose, TrackedRole, TrackingResult, TrackingUniverse};
