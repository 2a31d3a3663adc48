//! Play-space mover: property setters and the per-tick integrator
//!
//! [`MoveCenter`] owns the committed play-space state and is the single path
//! through which offset and rotation changes reach the tracking system,
//! whether they come from UI property setters or from the per-frame
//! controller drag.

use std::time::Instant;

use glam::{DVec3, Vec3};
use tracing::{debug, info, trace, warn};

use crate::config::{keys, MoveShortcutConfig, MoverTiming, SETTINGS_GROUP};
use crate::core::rotation::{rotate_yaw, unrotated_yaw, wrap_degrees};
use crate::core::state::{Axis, PlaySpaceState};
use crate::events::{ChangeEvent, ChangeNotifier};
use crate::input::{Hand, MoveHandArbiter};
use crate::io::settings::SettingsStore;
use crate::mover::applier::OriginApplier;
use crate::tracking::interface::{OriginMutator, PoseSource, TrackingBackend};
use crate::tracking::types::{TrackedRole, TrackingUniverse};

/// Marks the hand-yaw baseline as invalid. atan2 output lies in [-pi, pi],
/// so anything below -9 can never be a real yaw.
const YAW_SENTINEL: f64 = -10.0;

/// Per-tick controller baselines
#[derive(Debug, Clone, Copy)]
struct TickContext {
    last_position: DVec3,
    last_yaw: f64,
    yaw: f64,
}

impl TickContext {
    fn new() -> Self {
        Self {
            last_position: DVec3::ZERO,
            last_yaw: YAW_SENTINEL,
            yaw: 0.0,
        }
    }
}

/// Live recentering and rotation of the play space
pub struct MoveCenter<T, S> {
    tracking: T,
    settings: S,
    notifier: ChangeNotifier,
    state: PlaySpaceState,
    shortcuts: MoveShortcutConfig,
    timing: MoverTiming,
    arbiter: MoveHandArbiter,
    context: TickContext,
    resync_counter: u32,
}

impl<T: TrackingBackend, S: SettingsStore> MoveCenter<T, S> {
    /// Create a mover with default timing.
    pub fn new(tracking: T, settings: S, notifier: ChangeNotifier) -> Self {
        Self::with_timing(tracking, settings, notifier, MoverTiming::default())
    }

    /// Create a mover, loading persisted flags and adopting the backend's
    /// current universe.
    pub fn with_timing(
        tracking: T,
        settings: S,
        notifier: ChangeNotifier,
        timing: MoverTiming,
    ) -> Self {
        let mut state = PlaySpaceState::default();
        let mut shortcuts = MoveShortcutConfig::default();

        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::ADJUST_CHAPERONE) {
            state.set_adjust_chaperone(value);
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::ROTATE_HAND) {
            shortcuts.rotate_hand = value;
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::MOVE_SHORTCUT_RIGHT) {
            shortcuts.right_enabled = value;
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::MOVE_SHORTCUT_LEFT) {
            shortcuts.left_enabled = value;
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::REQUIRE_DOUBLE_CLICK) {
            shortcuts.require_double_click = value;
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::LOCK_X) {
            state.set_lock(Axis::X, value);
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::LOCK_Y) {
            state.set_lock(Axis::Y, value);
        }
        if let Some(value) = settings.get_bool(SETTINGS_GROUP, keys::LOCK_Z) {
            state.set_lock(Axis::Z, value);
        }

        let mut center = Self {
            tracking,
            settings,
            notifier,
            state,
            shortcuts,
            arbiter: MoveHandArbiter::new(timing.double_click_window, Instant::now()),
            timing,
            context: TickContext::new(),
            resync_counter: 0,
        };

        let universe = center.tracking.universe();
        center.set_tracking_universe(universe, true);
        info!(
            universe = ?center.state.universe(),
            adjust_chaperone = center.state.adjust_chaperone(),
            rotate_hand = center.shortcuts.rotate_hand,
            "play-space mover initialized"
        );
        center
    }

    pub fn offset_x(&self) -> f32 {
        self.state.offset_on(Axis::X)
    }

    pub fn offset_y(&self) -> f32 {
        self.state.offset_on(Axis::Y)
    }

    pub fn offset_z(&self) -> f32 {
        self.state.offset_on(Axis::Z)
    }

    /// Committed rotation in whole degrees.
    pub fn rotation(&self) -> i32 {
        self.state.rotation()
    }

    /// UI preview rotation.
    pub fn temp_rotation(&self) -> i32 {
        self.state.temp_rotation()
    }

    pub fn tracking_universe(&self) -> TrackingUniverse {
        self.state.universe()
    }

    pub fn adjust_chaperone(&self) -> bool {
        self.state.adjust_chaperone()
    }

    pub fn rotate_hand(&self) -> bool {
        self.shortcuts.rotate_hand
    }

    pub fn move_shortcut_right(&self) -> bool {
        self.shortcuts.right_enabled
    }

    pub fn move_shortcut_left(&self) -> bool {
        self.shortcuts.left_enabled
    }

    pub fn require_double_click(&self) -> bool {
        self.shortcuts.require_double_click
    }

    pub fn lock_x(&self) -> bool {
        self.state.locked(Axis::X)
    }

    pub fn lock_y(&self) -> bool {
        self.state.locked(Axis::Y)
    }

    pub fn lock_z(&self) -> bool {
        self.state.locked(Axis::Z)
    }

    /// Hand currently holding the move gesture.
    pub fn active_hand(&self) -> Option<Hand> {
        self.arbiter.active_hand()
    }

    /// Register an observer for field changes.
    pub fn subscribe(&mut self, observer: impl Fn(ChangeEvent) + Send + Sync + 'static) {
        self.notifier.subscribe(observer);
    }

    /// The tracking backend.
    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    /// Mutable tracking backend, e.g. to drive a simulated session.
    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    /// The settings store.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Target offset on X in meters; a locked axis ignores the change.
    pub fn set_offset_x(&mut self, value: f32, notify: bool) {
        let current = self.state.offset_on(Axis::X);
        if current != value {
            self.mod_offset(Axis::X, value - current, notify);
        }
    }

    /// Target offset on Y in meters; a locked axis ignores the change.
    pub fn set_offset_y(&mut self, value: f32, notify: bool) {
        let current = self.state.offset_on(Axis::Y);
        if current != value {
            self.mod_offset(Axis::Y, value - current, notify);
        }
    }

    /// Target offset on Z in meters; a locked axis ignores the change.
    pub fn set_offset_z(&mut self, value: f32, notify: bool) {
        let current = self.state.offset_on(Axis::Z);
        if current != value {
            self.mod_offset(Axis::Z, value - current, notify);
        }
    }

    /// Shift the play space along its X axis by `delta` meters.
    pub fn mod_offset_x(&mut self, delta: f32, notify: bool) {
        self.mod_offset(Axis::X, delta, notify);
    }

    /// Shift the play space along Y by `delta` meters.
    pub fn mod_offset_y(&mut self, delta: f32, notify: bool) {
        self.mod_offset(Axis::Y, delta, notify);
    }

    /// Shift the play space along its Z axis by `delta` meters.
    pub fn mod_offset_z(&mut self, delta: f32, notify: bool) {
        self.mod_offset(Axis::Z, delta, notify);
    }

    fn mod_offset(&mut self, axis: Axis, delta: f32, notify: bool) {
        if self.state.locked(axis) {
            return;
        }
        // X and Z deltas are given in the un-rotated frame and must be
        // rotated into world coordinates; Y passes through either way.
        let world = rotate_yaw(axis.unit() * delta as f64, self.state.rotation_radians());
        let universe = self.state.universe();
        let adjust = self.state.adjust_chaperone();
        OriginApplier::new(&mut self.tracking, universe, adjust).translate(world.as_vec3());

        self.state.add_offset(axis, delta);
        if notify {
            self.notifier
                .emit(ChangeEvent::offset(axis, self.state.offset_on(axis)));
        }
    }

    /// Rotate the play space to `value` degrees, keeping the headset's world
    /// position fixed.
    ///
    /// The offset correction is computed from the headset position in the
    /// old and new un-rotated frames, re-rotated into world coordinates, and
    /// applied together with the rotation in a single commit. Committing
    /// rotation and offset separately would let a frame render in between as
    /// a visible jump.
    pub fn set_rotation(&mut self, value: i32, notify: bool) {
        if self.state.rotation() == value {
            return;
        }
        let old = self.state.rotation();
        let delta = ((value - old) as f64).to_radians();
        let old_angle = -(old as f64).to_radians();

        let hmd = self
            .tracking
            .device_pose(TrackedRole::Hmd)
            .filter(|pose| pose.is_ok())
            .map(|pose| pose.position())
            .unwrap_or(DVec3::ZERO);

        let old_hmd = rotate_yaw(hmd, old_angle);
        let new_hmd = rotate_yaw(hmd, old_angle - delta);
        let correction = DVec3::new(old_hmd.x - new_hmd.x, 0.0, old_hmd.z - new_hmd.z);
        let world_correction = rotate_yaw(correction, (value as f64).to_radians());

        let universe = self.state.universe();
        let adjust = self.state.adjust_chaperone();
        OriginApplier::new(&mut self.tracking, universe, adjust)
            .rotate_and_translate(delta as f32, world_correction.as_vec3());

        self.state.set_rotation(value);
        debug!(rotation = value, correction = ?correction, "rotated play space");
        if notify {
            self.notifier.emit(ChangeEvent::Rotation(value));
        }

        self.state.add_offset(Axis::X, correction.x as f32);
        self.state.add_offset(Axis::Z, correction.z as f32);
        if notify {
            self.notifier
                .emit(ChangeEvent::OffsetX(self.state.offset_on(Axis::X)));
            self.notifier
                .emit(ChangeEvent::OffsetZ(self.state.offset_on(Axis::Z)));
        }
    }

    /// Preview rotation shown by the UI; never applied to the tracking
    /// system.
    pub fn set_temp_rotation(&mut self, value: i32, notify: bool) {
        self.state.set_temp_rotation(value);
        if notify {
            self.notifier.emit(ChangeEvent::TempRotation(value));
        }
    }

    /// Whether origin changes also move the chaperone bounds.
    ///
    /// Toggling while standing retroactively compensates the bounds by the
    /// already-applied offset so the safety boundary does not jump.
    pub fn set_adjust_chaperone(&mut self, value: bool, notify: bool) {
        if !self.state.set_adjust_chaperone(value) {
            return;
        }
        if self.state.universe() == TrackingUniverse::Standing {
            let direction = if value { -1.0 } else { 1.0 };
            let offset = self.state.offset().as_dvec3() * direction;
            let world = rotate_yaw(offset, self.state.rotation_radians());
            self.tracking.add_chaperone_offset(world.as_vec3());
        }
        self.persist_bool(keys::ADJUST_CHAPERONE, value);
        if notify {
            self.notifier.emit(ChangeEvent::AdjustChaperone(value));
        }
    }

    /// Derive rotation from the held hand's yaw while dragging.
    pub fn set_rotate_hand(&mut self, value: bool, notify: bool) {
        if self.shortcuts.rotate_hand == value {
            return;
        }
        self.shortcuts.rotate_hand = value;
        self.persist_bool(keys::ROTATE_HAND, value);
        if notify {
            self.notifier.emit(ChangeEvent::RotateHand(value));
        }
    }

    /// Allow the right controller to hold the move gesture.
    pub fn set_move_shortcut_right(&mut self, value: bool, notify: bool) {
        if self.shortcuts.right_enabled == value {
            return;
        }
        self.shortcuts.right_enabled = value;
        self.persist_bool(keys::MOVE_SHORTCUT_RIGHT, value);
        if notify {
            self.notifier.emit(ChangeEvent::MoveShortcutRight(value));
        }
    }

    /// Allow the left controller to hold the move gesture.
    pub fn set_move_shortcut_left(&mut self, value: bool, notify: bool) {
        if self.shortcuts.left_enabled == value {
            return;
        }
        self.shortcuts.left_enabled = value;
        self.persist_bool(keys::MOVE_SHORTCUT_LEFT, value);
        if notify {
            self.notifier.emit(ChangeEvent::MoveShortcutLeft(value));
        }
    }

    /// Require a double press of the shortcut button before arming.
    pub fn set_require_double_click(&mut self, value: bool, notify: bool) {
        if self.shortcuts.require_double_click == value {
            return;
        }
        self.shortcuts.require_double_click = value;
        self.persist_bool(keys::REQUIRE_DOUBLE_CLICK, value);
        if notify {
            self.notifier.emit(ChangeEvent::RequireDoubleClick(value));
        }
    }

    /// Freeze drag motion along X.
    pub fn set_lock_x(&mut self, value: bool, notify: bool) {
        self.set_lock(Axis::X, value, notify);
    }

    /// Freeze drag motion along Y.
    pub fn set_lock_y(&mut self, value: bool, notify: bool) {
        self.set_lock(Axis::Y, value, notify);
    }

    /// Freeze drag motion along Z.
    pub fn set_lock_z(&mut self, value: bool, notify: bool) {
        self.set_lock(Axis::Z, value, notify);
    }

    fn set_lock(&mut self, axis: Axis, value: bool, notify: bool) {
        if !self.state.set_lock(axis, value) {
            return;
        }
        self.persist_bool(lock_key(axis), value);
        if notify {
            self.notifier.emit(ChangeEvent::lock(axis, value));
        }
    }

    /// Adopt a new tracking universe; the committed transform is reset first
    /// under the old universe.
    pub fn set_tracking_universe(&mut self, universe: TrackingUniverse, notify: bool) {
        if self.state.universe() == universe {
            return;
        }
        self.reset();
        self.state.set_universe(universe);
        info!(?universe, "tracking universe changed");
        if notify {
            self.notifier.emit(ChangeEvent::TrackingUniverse(universe));
        }
    }

    /// Restore the origin to identity and zero the offset/rotation state.
    pub fn reset(&mut self) {
        let angle = self.state.rotation_radians();
        let offset = self.state.offset();
        let universe = self.state.universe();
        let adjust = self.state.adjust_chaperone();
        OriginApplier::new(&mut self.tracking, universe, adjust)
            .rotate_and_translate(-angle as f32, -offset);

        self.state.clear_transform();
        info!("play space reset");
        self.notifier.emit(ChangeEvent::OffsetX(0.0));
        self.notifier.emit(ChangeEvent::OffsetY(0.0));
        self.notifier.emit(ChangeEvent::OffsetZ(0.0));
        self.notifier.emit(ChangeEvent::Rotation(0));
    }

    /// Integrate one frame of controller input.
    ///
    /// Reads the active hand's pose, converts it into the un-rotated frame,
    /// and forwards the frame-to-frame delta, plus optionally a yaw-derived
    /// rotation, to the tracking origin. Invalid or missing poses skip the
    /// frame without touching accumulated state.
    pub fn tick(&mut self) {
        if self.resync_counter >= self.timing.universe_resync_interval {
            let universe = self.tracking.universe();
            self.set_tracking_universe(universe, true);
            self.resync_counter = 0;
        } else {
            self.resync_counter += 1;
        }

        let old_hand = self.arbiter.active_hand();
        let right_pressed = self.shortcuts.right_enabled
            && self.tracking.controller_buttons(Hand::Right).shortcut_pressed();
        let left_pressed = self.shortcuts.left_enabled
            && self.tracking.controller_buttons(Hand::Left).shortcut_pressed();
        let new_hand = self.arbiter.update(
            right_pressed,
            left_pressed,
            self.shortcuts.require_double_click,
            Instant::now(),
        );

        let Some(hand) = new_hand else {
            // Idle: keep the UI in sync and invalidate the yaw baseline.
            self.emit_offsets();
            if self.shortcuts.rotate_hand {
                self.context.last_yaw = YAW_SENTINEL;
            }
            return;
        };

        let Some(pose) = self.tracking.device_pose(hand.role()) else {
            trace!(?hand, "active hand has no device");
            if old_hand.is_some() {
                self.emit_offsets();
                if self.shortcuts.rotate_hand {
                    self.context.last_yaw = YAW_SENTINEL;
                }
            }
            return;
        };
        if !pose.is_ok() {
            trace!(?hand, "pose not usable, skipping frame");
            return;
        }

        let angle = self.state.rotation_radians();
        let unrotated = rotate_yaw(pose.position(), -angle);
        let absolute = unrotated + self.state.offset().as_dvec3();

        if self.shortcuts.rotate_hand {
            self.context.yaw = unrotated_yaw(pose.transform.matrix3, angle);
        }

        if old_hand == Some(hand) {
            let diff = absolute - self.context.last_position;

            // Offset state is bookkept in the un-rotated frame; locked axes
            // stay frozen there while the world-frame vector below is zeroed
            // per rotated axis.
            if !self.state.locked(Axis::X) {
                self.state.add_offset(Axis::X, diff.x as f32);
            }
            if !self.state.locked(Axis::Y) {
                self.state.add_offset(Axis::Y, diff.y as f32);
            }
            if !self.state.locked(Axis::Z) {
                self.state.add_offset(Axis::Z, diff.z as f32);
            }

            let mut world = rotate_yaw(diff, angle).as_vec3();
            if self.state.locked(Axis::X) {
                world.x = 0.0;
            }
            if self.state.locked(Axis::Y) {
                world.y = 0.0;
            }
            if self.state.locked(Axis::Z) {
                world.z = 0.0;
            }

            if world != Vec3::ZERO {
                let universe = self.state.universe();
                let adjust = self.state.adjust_chaperone();
                OriginApplier::new(&mut self.tracking, universe, adjust).translate(world);
            }

            if self.shortcuts.rotate_hand {
                if self.context.last_yaw < -9.0 {
                    // No baseline yet: capture without rotating.
                    self.context.last_yaw = self.context.yaw;
                } else {
                    let yaw_diff = self.context.yaw - self.context.last_yaw;
                    let degrees = wrap_degrees(
                        yaw_diff.to_degrees().round() as i32 + self.state.rotation(),
                    );
                    self.set_rotation(degrees, true);
                }
            }
        }

        self.context.last_position = absolute;
        self.context.last_yaw = self.context.yaw;
    }

    fn emit_offsets(&self) {
        for axis in Axis::ALL {
            self.notifier
                .emit(ChangeEvent::offset(axis, self.state.offset_on(axis)));
        }
    }

    fn persist_bool(&mut self, key: &str, value: bool) {
        self.settings.set_bool(SETTINGS_GROUP, key, value);
        debug!(key, value, "persisting setting");
        if let Err(error) = self.settings.flush() {
            warn!(%error, key, "failed to flush settings");
        }
    }
}

fn lock_key(axis: Axis) -> &'static str {
    match axis {
        Axis::X => keys::LOCK_X,
        Axis::Y => keys::LOCK_Y,
        Axis::Z => keys::LOCK_Z,
    }
}
