//! Rotation driven by the held hand's yaw

use playspace::prelude::*;

fn session() -> MoveCenter<SimTracking, MemorySettings> {
    let _ = tracing_subscriber::fmt().try_init();

    let mut tracking = SimTracking::new();
    tracking.place_device(TrackedRole::Hmd, DVec3::new(0.0, 1.7, 0.0), 0.0);
    tracking.place_device(TrackedRole::RightHand, DVec3::new(0.3, 1.2, -0.4), 0.0);
    let mut center = MoveCenter::new(tracking, MemorySettings::new(), ChangeNotifier::new());
    center.set_rotate_hand(true, false);
    center
}

#[test]
fn test_hand_yaw_drives_rotation() {
    let mut center = session();

    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick(); // baseline capture, no rotation yet
    assert_eq!(center.rotation(), 0);

    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 30.0_f64.to_radians());
    center.tick();
    assert_eq!(center.rotation(), 30);

    // A quiet tick must not oscillate: the extracted yaw compensates for
    // the play-space rotation that was just applied.
    center.tracking_mut().take_calls();
    center.tick();
    assert_eq!(center.rotation(), 30);
    assert!(
        !center
            .tracking()
            .calls()
            .iter()
            .any(|c| matches!(c, MutatorCall::RotateOrigin { .. })),
        "quiet tick re-rotated the origin"
    );
}

#[test]
fn test_incremental_yaw_accumulates() {
    let mut center = session();
    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();

    for step in 1..=30 {
        let yaw = (step as f64).to_radians();
        center
            .tracking_mut()
            .set_device_yaw(TrackedRole::RightHand, yaw);
        center.tick();
    }
    println!("rotation after 30 one-degree steps: {}", center.rotation());
    assert_eq!(center.rotation(), 30);
}

#[test]
fn test_hmd_stays_put_while_hand_rotates() {
    let mut center = session();
    let initial = center
        .tracking()
        .device_pose(TrackedRole::Hmd)
        .unwrap()
        .position();

    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();

    for step in 1..=12 {
        let yaw = (step as f64 * 5.0).to_radians();
        center
            .tracking_mut()
            .set_device_yaw(TrackedRole::RightHand, yaw);
        center.tick();

        let hmd = center
            .tracking()
            .device_pose(TrackedRole::Hmd)
            .unwrap()
            .position();
        assert!(
            (hmd - initial).length() < 1e-4,
            "step {step}: hmd drifted {initial} -> {hmd}"
        );
    }
    assert_eq!(center.rotation(), 60);
}

#[test]
fn test_yaw_baseline_recaptured_after_release() {
    let mut center = session();

    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();
    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 30.0_f64.to_radians());
    center.tick();
    assert_eq!(center.rotation(), 30);

    center.tracking_mut().release_shortcut(Hand::Right);
    center.tick();
    center.tick();

    // The hand turns to 80 degrees while nothing is held. Re-grabbing must
    // not apply that idle motion.
    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 80.0_f64.to_radians());
    center.tick();
    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();
    assert_eq!(center.rotation(), 30, "idle yaw must be discarded");
    center.tick();
    assert_eq!(center.rotation(), 30);

    // Motion after re-grabbing applies again.
    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 90.0_f64.to_radians());
    center.tick();
    assert_eq!(center.rotation(), 40);
}

#[test]
fn test_rotation_wraps_into_signed_half_circle() {
    let mut center = session();
    center.set_rotation(170, true);

    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();

    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 20.0_f64.to_radians());
    center.tick();
    assert_eq!(center.rotation(), -170, "170 + 20 must wrap to -170");
}

#[test]
fn test_drag_and_rotate_combine() {
    let mut center = session();

    center.tracking_mut().press_shortcut(Hand::Right);
    center.tick();

    // Translate and twist in the same gesture.
    center
        .tracking_mut()
        .move_device(TrackedRole::RightHand, DVec3::new(0.2, 0.0, 0.0));
    center
        .tracking_mut()
        .set_device_yaw(TrackedRole::RightHand, 15.0_f64.to_radians());
    center.tick();

    assert_eq!(center.rotation(), 15);
    assert!(center.offset_x() > 0.1, "x offset: {}", center.offset_x());
}
