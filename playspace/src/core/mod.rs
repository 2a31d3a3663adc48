//! Core play-space math and state

pub mod rotation;
pub mod state;

pub use rotation::{rotate_yaw, unrotated_yaw, wrap_degrees, yaw_matrix};
pub use state::{Axis, PlaySpaceState};
