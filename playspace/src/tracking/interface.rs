//! Contracts to the external tracking system
//!
//! The mover core never talks to tracking hardware directly; it receives an
//! implementation of these traits at construction. [`OriginMutator`] covers
//! the transactional origin and chaperone mutation API, [`PoseSource`] the
//! read-only pose, input, and mode queries.

use glam::Vec3;

use crate::input::Hand;
use crate::tracking::types::{ControllerButtons, DevicePose, TrackedRole, TrackingUniverse};

/// Mutation API for the tracking origin and its chaperone working copy
///
/// `commit = false` stages the change in the working copy. Callers must pair
/// every staged change with a commit inside the same operation so that no
/// uncommitted working copy survives across ticks.
pub trait OriginMutator {
    /// Rotate the universe center about the vertical axis by `angle` radians.
    fn rotate_origin(
        &mut self,
        universe: TrackingUniverse,
        angle: f32,
        adjust_chaperone: bool,
        commit: bool,
    );

    /// Translate the universe center by `offset` in world coordinates.
    fn add_offset(
        &mut self,
        universe: TrackingUniverse,
        offset: Vec3,
        adjust_chaperone: bool,
        commit: bool,
    );

    /// Translate the chaperone bounds alone, leaving the origin in place.
    fn add_chaperone_offset(&mut self, offset: Vec3);

    /// Discard any staged working-copy changes.
    fn revert_working_copy(&mut self);

    /// Atomically apply all staged working-copy changes.
    fn commit_working_copy(&mut self);
}

/// Read-only pose, input, and mode queries against the tracking system
pub trait PoseSource {
    /// Current coordinate-space mode.
    fn universe(&self) -> TrackingUniverse;

    /// Pose for a device role; `None` when no device holds the role.
    fn device_pose(&self, role: TrackedRole) -> Option<DevicePose>;

    /// Button state of a hand controller; the released mask when
    /// disconnected.
    fn controller_buttons(&self, hand: Hand) -> ControllerButtons;
}

/// Full tracking backend: mutation plus queries
pub trait TrackingBackend: OriginMutator + PoseSource {}

impl<T: OriginMutator + PoseSource> TrackingBackend for T {}
