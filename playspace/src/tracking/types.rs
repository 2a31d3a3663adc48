//! Tracking-system data types

use glam::{DAffine3, DVec3};

/// Coordinate-space mode of the tracking system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingUniverse {
    /// Seated-origin space
    Seated,
    /// Standing-origin space
    Standing,
    /// Raw, uncalibrated space
    Raw,
}

impl Default for TrackingUniverse {
    fn default() -> Self {
        TrackingUniverse::Standing
    }
}

/// Role a tracked device is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedRole {
    Hmd,
    LeftHand,
    RightHand,
}

/// Tracking quality reported alongside a device pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingResult {
    Uninitialized,
    Calibrating,
    RunningOk,
    RunningOutOfRange,
}

/// Buttons pressed on a controller, as a bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerButtons(u64);

impl ControllerButtons {
    /// No buttons pressed.
    pub const NONE: ControllerButtons = ControllerButtons(0);
    /// The application-menu button, bound to the move-space shortcut.
    pub const SHORTCUT: ControllerButtons = ControllerButtons(1 << 1);

    /// Whether every button in `mask` is pressed.
    pub fn contains(self, mask: ControllerButtons) -> bool {
        self.0 & mask.0 == mask.0
    }

    /// Whether the shortcut button is pressed.
    pub fn shortcut_pressed(self) -> bool {
        self.contains(Self::SHORTCUT)
    }

    /// Add pressed buttons.
    pub fn press(&mut self, mask: ControllerButtons) {
        self.0 |= mask.0;
    }

    /// Remove released buttons.
    pub fn release(&mut self, mask: ControllerButtons) {
        self.0 &= !mask.0;
    }
}

/// A device pose as reported by the tracking system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePose {
    /// Device-to-world basis and translation
    pub transform: DAffine3,
    /// Pose data is usable this frame
    pub valid: bool,
    /// Device is physically connected
    pub connected: bool,
    /// Tracking quality
    pub result: TrackingResult,
}

impl DevicePose {
    /// A healthy tracked pose with the given transform.
    pub fn tracked(transform: DAffine3) -> Self {
        Self {
            transform,
            valid: true,
            connected: true,
            result: TrackingResult::RunningOk,
        }
    }

    /// A healthy tracked pose at `position` with identity orientation.
    pub fn at(position: DVec3) -> Self {
        Self::tracked(DAffine3::from_translation(position))
    }

    /// Device world position.
    pub fn position(&self) -> DVec3 {
        self.transform.translation
    }

    /// Usable for integration this frame: valid, connected, tracking OK.
    pub fn is_ok(&self) -> bool {
        self.valid && self.connected && self.result == TrackingResult::RunningOk
    }
}
