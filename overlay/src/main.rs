//! Play-space mover demo
//!
//! Drives a scripted session against the simulated tracking backend:
//! grab-and-drag translation, double-click arming, hand-yaw rotation,
//! direct UI-style setters, and a final reset. Settings persist to
//! `playspace_settings.json` in the working directory across runs.

use std::thread;
use std::time::Duration;

use glam::DVec3;
use playspace::prelude::*;
use tracing::info;

fn main() {
    playspace::init_logging();
    info!("starting play-space mover demo");

    let settings =
        JsonSettingsStore::open("playspace_settings.json").expect("Failed to open settings store");

    let mut tracking = SimTracking::new();
    tracking.place_device(TrackedRole::Hmd, DVec3::new(0.0, 1.7, 0.0), 0.0);
    tracking.place_device(TrackedRole::RightHand, DVec3::new(0.25, 1.15, -0.35), 0.0);
    tracking.place_device(TrackedRole::LeftHand, DVec3::new(-0.25, 1.15, -0.35), 0.0);

    let mut center = MoveCenter::new(tracking, settings, ChangeNotifier::new());
    center.subscribe(|event| info!(?event, "field changed"));
    info!(
        rotate_hand = center.rotate_hand(),
        require_double_click = center.require_double_click(),
        "loaded persisted settings"
    );
    // The script below assumes single-press arming.
    center.set_require_double_click(false, true);
    center.set_rotate_hand(false, true);

    // Grab with the right hand and drag the play space half a meter.
    center.tracking_mut().press_shortcut(Hand::Right);
    for _ in 0..30 {
        center
            .tracking_mut()
            .move_device(TrackedRole::RightHand, DVec3::new(0.5 / 30.0, 0.0, 0.0));
        center.tick();
    }
    center.tracking_mut().release_shortcut(Hand::Right);
    center.tick();
    info!(offset_x = center.offset_x(), "drag finished");

    // Same grip, now with rotation taken from the hand's yaw.
    center.set_rotate_hand(true, true);
    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();
    for step in 1..=30 {
        let yaw = (step as f64).to_radians();
        center
            .tracking_mut()
            .set_device_yaw(TrackedRole::RightHand, yaw);
        center.tick();
    }
    center.tracking_mut().release_shortcut(Hand::Right);
    center.tick();
    info!(rotation = center.rotation(), "hand rotation finished");

    // Double-click arming: a lone press is ignored, a quick second press
    // grabs the space.
    center.set_require_double_click(true, true);
    thread::sleep(Duration::from_millis(300));
    center.tracking_mut().press_shortcut(Hand::Left);
    center.tick();
    info!(active = ?center.active_hand(), "single press");
    center.tracking_mut().release_shortcut(Hand::Left);
    center.tick();
    center.tracking_mut().press_shortcut(Hand::Left);
    center.tick();
    info!(active = ?center.active_hand(), "second press within the window");
    center.tracking_mut().release_shortcut(Hand::Left);
    center.tick();

    // Direct UI-style adjustments: preview, apply, nudge.
    center.set_temp_rotation(90, true);
    center.set_rotation(center.temp_rotation(), true);
    center.mod_offset_x(0.25, true);
    info!(
        offset_x = center.offset_x(),
        offset_z = center.offset_z(),
        rotation = center.rotation(),
        "after direct adjustments"
    );

    // Back to identity; restore defaults for the next run.
    center.reset();
    center.set_require_double_click(false, true);
    center.set_rotate_hand(false, true);
    info!(path = ?center.settings().path(), "settings persisted for the next run");
    info!(
        offset_x = center.offset_x(),
        offset_y = center.offset_y(),
        offset_z = center.offset_z(),
        rotation = center.rotation(),
        "demo finished"
    );
}
