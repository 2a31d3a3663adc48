//! Simulated tracking backend
//!
//! Implements the origin-mutation and pose-source contracts in software: raw
//! device poses are set by the caller, reported poses have the accumulated
//! origin transform applied, and the working-copy protocol is modeled with a
//! staged copy of the origin state. Every mutation is recorded so tests can
//! assert on exact call sequences.

use std::collections::HashMap;

use glam::{DAffine3, DMat3, DVec3, Vec3};
use tracing::{debug, trace};

use crate::core::rotation::{rotate_yaw, yaw_matrix};
use crate::input::Hand;
use crate::tracking::interface::{OriginMutator, PoseSource};
use crate::tracking::types::{ControllerButtons, DevicePose, TrackedRole, TrackingUniverse};

/// One recorded call against the origin-mutation contract
#[derive(Debug, Clone, PartialEq)]
pub enum MutatorCall {
    RotateOrigin {
        universe: TrackingUniverse,
        angle: f32,
        adjust_chaperone: bool,
        commit: bool,
    },
    AddOffset {
        universe: TrackingUniverse,
        offset: Vec3,
        adjust_chaperone: bool,
        commit: bool,
    },
    AddChaperoneOffset {
        offset: Vec3,
    },
    RevertWorkingCopy,
    CommitWorkingCopy,
}

/// Accumulated origin transform: reported = rotate_yaw(raw, rotation) + offset
#[derive(Debug, Clone, Copy, PartialEq)]
struct OriginState {
    rotation: f64,
    offset: DVec3,
}

impl OriginState {
    const IDENTITY: OriginState = OriginState {
        rotation: 0.0,
        offset: DVec3::ZERO,
    };

    fn apply(&self, pose: DevicePose) -> DevicePose {
        let translation = rotate_yaw(pose.transform.translation, self.rotation) + self.offset;
        let matrix3 = yaw_matrix(self.rotation) * pose.transform.matrix3;
        DevicePose {
            transform: DAffine3 {
                matrix3,
                translation,
            },
            ..pose
        }
    }

    fn rotate(&mut self, angle: f64) {
        self.rotation += angle;
        self.offset = rotate_yaw(self.offset, angle);
    }

    fn translate(&mut self, offset: DVec3) {
        self.offset -= offset;
    }
}

/// Software tracking system for tests and demos
pub struct SimTracking {
    universe: TrackingUniverse,
    devices: HashMap<TrackedRole, DevicePose>,
    buttons: [ControllerButtons; 2],
    live: OriginState,
    working: OriginState,
    chaperone_offset: DVec3,
    calls: Vec<MutatorCall>,
    commits: u32,
    reverts: u32,
}

impl SimTracking {
    pub fn new() -> Self {
        Self {
            universe: TrackingUniverse::Standing,
            devices: HashMap::new(),
            buttons: [ControllerButtons::NONE; 2],
            live: OriginState::IDENTITY,
            working: OriginState::IDENTITY,
            chaperone_offset: DVec3::ZERO,
            calls: Vec::new(),
            commits: 0,
            reverts: 0,
        }
    }

    /// Change the reported coordinate-space mode.
    pub fn set_universe(&mut self, universe: TrackingUniverse) {
        self.universe = universe;
    }

    /// Add or replace a device with a healthy pose at `position`, facing
    /// `yaw` radians from straight ahead.
    pub fn place_device(&mut self, role: TrackedRole, position: DVec3, yaw: f64) {
        let transform = DAffine3 {
            matrix3: DMat3::from_rotation_y(yaw),
            translation: position,
        };
        self.devices.insert(role, DevicePose::tracked(transform));
    }

    /// Translate a device's raw pose.
    pub fn move_device(&mut self, role: TrackedRole, delta: DVec3) {
        if let Some(pose) = self.devices.get_mut(&role) {
            pose.transform.translation += delta;
        }
    }

    /// Point a device's raw pose at a new yaw, keeping its position.
    pub fn set_device_yaw(&mut self, role: TrackedRole, yaw: f64) {
        if let Some(pose) = self.devices.get_mut(&role) {
            pose.transform.matrix3 = DMat3::from_rotation_y(yaw);
        }
    }

    /// Remove a device entirely; its role reports no pose afterwards.
    pub fn remove_device(&mut self, role: TrackedRole) -> Option<DevicePose> {
        self.devices.remove(&role)
    }

    /// Mutable access to a device's raw pose, e.g. to degrade its flags.
    pub fn device_mut(&mut self, role: TrackedRole) -> Option<&mut DevicePose> {
        self.devices.get_mut(&role)
    }

    /// Press the shortcut button on a hand controller.
    pub fn press_shortcut(&mut self, hand: Hand) {
        self.buttons[hand.index()].press(ControllerButtons::SHORTCUT);
    }

    /// Release the shortcut button on a hand controller.
    pub fn release_shortcut(&mut self, hand: Hand) {
        self.buttons[hand.index()].release(ControllerButtons::SHORTCUT);
    }

    /// Recorded mutation calls, oldest first.
    pub fn calls(&self) -> &[MutatorCall] {
        &self.calls
    }

    /// Drain the recorded mutation calls.
    pub fn take_calls(&mut self) -> Vec<MutatorCall> {
        std::mem::take(&mut self.calls)
    }

    /// Total working-copy commits, including one-shot mutations.
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    /// Total working-copy reverts.
    pub fn revert_count(&self) -> u32 {
        self.reverts
    }

    /// Accumulated chaperone-bounds translation.
    pub fn chaperone_offset(&self) -> DVec3 {
        self.chaperone_offset
    }

    fn commit(&mut self) {
        self.live = self.working;
        self.commits += 1;
        trace!(
            rotation = self.live.rotation,
            offset = ?self.live.offset,
            "committed origin working copy"
        );
    }

    fn revert(&mut self) {
        self.working = self.live;
        self.reverts += 1;
    }
}

impl Default for SimTracking {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginMutator for SimTracking {
    fn rotate_origin(
        &mut self,
        universe: TrackingUniverse,
        angle: f32,
        adjust_chaperone: bool,
        commit: bool,
    ) {
        self.calls.push(MutatorCall::RotateOrigin {
            universe,
            angle,
            adjust_chaperone,
            commit,
        });
        self.working.rotate(angle as f64);
        debug!(angle, commit, "sim: rotate origin");
        if commit {
            self.commit();
        }
    }

    fn add_offset(
        &mut self,
        universe: TrackingUniverse,
        offset: Vec3,
        adjust_chaperone: bool,
        commit: bool,
    ) {
        self.calls.push(MutatorCall::AddOffset {
            universe,
            offset,
            adjust_chaperone,
            commit,
        });
        self.working.translate(offset.as_dvec3());
        debug!(?offset, commit, "sim: add origin offset");
        if commit {
            self.commit();
        }
    }

    fn add_chaperone_offset(&mut self, offset: Vec3) {
        self.calls.push(MutatorCall::AddChaperoneOffset { offset });
        self.chaperone_offset += offset.as_dvec3();
        debug!(?offset, "sim: add chaperone offset");
    }

    fn revert_working_copy(&mut self) {
        self.calls.push(MutatorCall::RevertWorkingCopy);
        self.revert();
    }

    fn commit_working_copy(&mut self) {
        self.calls.push(MutatorCall::CommitWorkingCopy);
        self.commit();
    }
}

impl PoseSource for SimTracking {
    fn universe(&self) -> TrackingUniverse {
        self.universe
    }

    fn device_pose(&self, role: TrackedRole) -> Option<DevicePose> {
        self.devices.get(&role).map(|pose| self.live.apply(*pose))
    }

    fn controller_buttons(&self, hand: Hand) -> ControllerButtons {
        self.buttons[hand.index()]
    }
}
