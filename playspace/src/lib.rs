//! Live recentering and rotation of a tracked VR play space
//!
//! This crate implements the play-space mover of a VR settings overlay:
//! grab-and-drag translation driven by either controller, optional rotation
//! taken from the held hand's yaw, per-axis locks, chaperone-bounds
//! adjustment, and jitter-free rotation of the tracking origin around the
//! user's head. The tracking system is only ever reached through the
//! contracts in [`tracking::interface`]; [`tracking::SimTracking`] is a
//! software stand-in for tests and demos.

pub mod config;
pub mod core;
pub mod events;
pub mod input;
pub mod io;
pub mod mover;
pub mod tracking;

// Re-export commonly used types
pub mod prelude {
    // Mover types
    pub use crate::mover::{MoveCenter, OriginApplier};

    // State and math types
    pub use crate::core::rotation::{rotate_yaw, unrotated_yaw, wrap_degrees, yaw_matrix};
    pub use crate::core::state::{Axis, PlaySpaceState};

    // Math types
    pub use glam::{DAffine3, DMat3, DVec3, Vec3};

    // Tracking types
    pub use crate::tracking::{
        ControllerButtons, DevicePose, MutatorCall, OriginMutator, PoseSource, SimTracking,
        TrackedRole, TrackingBackend, TrackingResult, TrackingUniverse,
    };

    // Input types
    pub use crate::input::{Hand, MoveHandArbiter};

    // Event types
    pub use crate::events::{ChangeEvent, ChangeNotifier, ChangeObserver};

    // IO types
    pub use crate::io::{JsonSettingsStore, MemorySettings, SettingsError, SettingsStore};

    // Config types
    pub use crate::config::{MoveShortcutConfig, MoverTiming};
}

/// Initialize logging for the play-space mover
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
