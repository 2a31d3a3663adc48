//! Committed play-space state
//!
//! [`PlaySpaceState`] is plain data: setters mutate memory and report whether
//! the value actually changed, leaving persistence and tracking-system calls
//! to the layer that owns those contracts. Offsets are stored in the
//! un-rotated frame so they stay meaningful no matter how far the space has
//! been rotated.

use glam::{DVec3, Vec3};

use crate::tracking::types::TrackingUniverse;

/// One translation axis of the play space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in emission order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along this axis.
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Committed play-space offset and rotation, plus the lock and chaperone flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaySpaceState {
    offset: Vec3,
    rotation: i32,
    temp_rotation: i32,
    locks: [bool; 3],
    adjust_chaperone: bool,
    universe: TrackingUniverse,
}

impl Default for PlaySpaceState {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: 0,
            temp_rotation: 0,
            locks: [false; 3],
            adjust_chaperone: false,
            universe: TrackingUniverse::Standing,
        }
    }
}

impl PlaySpaceState {
    /// Accumulated offset in the un-rotated frame, meters.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Offset along one axis.
    pub fn offset_on(&self, axis: Axis) -> f32 {
        self.offset[axis.index()]
    }

    /// Committed rotation in whole degrees, within [-180, 180].
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Committed rotation in radians.
    pub fn rotation_radians(&self) -> f64 {
        (self.rotation as f64).to_radians()
    }

    /// UI preview rotation; never applied to the tracking system.
    pub fn temp_rotation(&self) -> i32 {
        self.temp_rotation
    }

    /// Whether drag motion on `axis` is frozen.
    pub fn locked(&self, axis: Axis) -> bool {
        self.locks[axis.index()]
    }

    /// Whether origin changes also move the chaperone bounds.
    pub fn adjust_chaperone(&self) -> bool {
        self.adjust_chaperone
    }

    /// Universe the committed transform belongs to.
    pub fn universe(&self) -> TrackingUniverse {
        self.universe
    }

    pub fn add_offset(&mut self, axis: Axis, delta: f32) {
        self.offset[axis.index()] += delta;
    }

    pub fn set_rotation(&mut self, degrees: i32) -> bool {
        if self.rotation == degrees {
            return false;
        }
        self.rotation = degrees;
        true
    }

    pub fn set_temp_rotation(&mut self, degrees: i32) -> bool {
        if self.temp_rotation == degrees {
            return false;
        }
        self.temp_rotation = degrees;
        true
    }

    pub fn set_lock(&mut self, axis: Axis, locked: bool) -> bool {
        if self.locks[axis.index()] == locked {
            return false;
        }
        self.locks[axis.index()] = locked;
        true
    }

    pub fn set_adjust_chaperone(&mut self, value: bool) -> bool {
        if self.adjust_chaperone == value {
            return false;
        }
        self.adjust_chaperone = value;
        true
    }

    pub fn set_universe(&mut self, universe: TrackingUniverse) -> bool {
        if self.universe == universe {
            return false;
        }
        self.universe = universe;
        true
    }

    /// Zero the committed offset and rotation, after the origin has been
    /// restored to identity.
    pub fn clear_transform(&mut self) {
        self.offset = Vec3::ZERO;
        self.rotation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_report_changes() {
        let mut state = PlaySpaceState::default();
        assert!(state.set_rotation(90));
        assert!(!state.set_rotation(90));
        assert!(state.set_lock(Axis::Y, true));
        assert!(!state.set_lock(Axis::Y, true));
        assert!(state.set_universe(TrackingUniverse::Seated));
        assert!(!state.set_universe(TrackingUniverse::Seated));
    }

    #[test]
    fn test_offsets_accumulate_per_axis() {
        let mut state = PlaySpaceState::default();
        state.add_offset(Axis::X, 0.5);
        state.add_offset(Axis::X, 0.25);
        state.add_offset(Axis::Z, -1.0);
        assert_eq!(state.offset_on(Axis::X), 0.75);
        assert_eq!(state.offset_on(Axis::Y), 0.0);
        assert_eq!(state.offset_on(Axis::Z), -1.0);
    }

    #[test]
    fn test_clear_transform_keeps_flags() {
        let mut state = PlaySpaceState::default();
        state.add_offset(Axis::X, 1.0);
        state.set_rotation(45);
        state.set_temp_rotation(90);
        state.set_lock(Axis::Z, true);

        state.clear_transform();
        assert_eq!(state.offset(), Vec3::ZERO);
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.temp_rotation(), 90, "preview must survive a reset");
        assert!(state.locked(Axis::Z), "locks must survive a reset");
    }
}
