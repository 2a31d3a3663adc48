//! Shortcut-hand arbitration
//!
//! Two physical controllers feed one logical mover. The arbiter tracks which
//! hand currently holds the move gesture and disambiguates simultaneous
//! presses, hand swaps mid-drag, and the optional double-click arming
//! requirement.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::tracking::types::TrackedRole;

/// A physical controller hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    /// Tracked-device role for this hand.
    pub fn role(self) -> TrackedRole {
        match self {
            Hand::Right => TrackedRole::RightHand,
            Hand::Left => TrackedRole::LeftHand,
        }
    }

    /// Stable index for per-hand bookkeeping arrays.
    pub fn index(self) -> usize {
        match self {
            Hand::Right => 0,
            Hand::Left => 1,
        }
    }
}

/// Decides which hand, if any, holds the move gesture
///
/// Fed once per tick with the gated button state of both controllers.
/// Transition rules, evaluated in order:
///
/// 1. A rising edge on the right button arms Right, subject to the
///    double-click gate, and always refreshes Right's press timestamp.
/// 2. A rising edge on the left button is symmetric and evaluated second,
///    so simultaneous rising edges resolve to Left. A rising edge while the
///    other hand is active steals the gesture.
/// 3. A falling edge on the hand that was active hands the gesture to the
///    other hand if it is still held, otherwise releases it.
/// 4. With neither button held the gesture is released; if a hand had been
///    active, both timestamps are refreshed so a fast hand swap re-arms
///    without a fresh double click.
///
/// The double-click gate only applies while no hand is active: a held
/// gesture never has to re-arm.
#[derive(Debug, Clone)]
pub struct MoveHandArbiter {
    active: Option<Hand>,
    right_was_pressed: bool,
    left_was_pressed: bool,
    last_click: [Instant; 2],
    double_click_window: Duration,
}

impl MoveHandArbiter {
    /// Create an arbiter; `now` seeds both press timestamps.
    pub fn new(double_click_window: Duration, now: Instant) -> Self {
        Self {
            active: None,
            right_was_pressed: false,
            left_was_pressed: false,
            last_click: [now; 2],
            double_click_window,
        }
    }

    /// Hand currently holding the move gesture.
    pub fn active_hand(&self) -> Option<Hand> {
        self.active
    }

    /// Feed one tick of button state and return the new active hand.
    pub fn update(
        &mut self,
        right_pressed: bool,
        left_pressed: bool,
        require_double_click: bool,
        now: Instant,
    ) -> Option<Hand> {
        let mut active = self.active;
        let check_double_click = require_double_click && active.is_none();

        if right_pressed && !self.right_was_pressed {
            let elapsed = now.duration_since(self.last_click[Hand::Right.index()]);
            if !check_double_click || elapsed < self.double_click_window {
                active = Some(Hand::Right);
            }
            self.last_click[Hand::Right.index()] = now;
        }
        if left_pressed && !self.left_was_pressed {
            let elapsed = now.duration_since(self.last_click[Hand::Left.index()]);
            if !check_double_click || elapsed < self.double_click_window {
                active = Some(Hand::Left);
            }
            self.last_click[Hand::Left.index()] = now;
        }

        if !right_pressed && self.right_was_pressed && self.active == Some(Hand::Right) {
            active = left_pressed.then_some(Hand::Left);
        }
        if !left_pressed && self.left_was_pressed && self.active == Some(Hand::Left) {
            active = right_pressed.then_some(Hand::Right);
        }

        if !right_pressed && !left_pressed {
            active = None;
            if self.active.is_some() {
                // Grace window: a quick re-press while swapping hands must
                // not need a fresh double click.
                self.last_click = [now; 2];
            }
        }

        if active != self.active {
            trace!(from = ?self.active, to = ?active, "move gesture hand changed");
        }
        self.active = active;
        self.right_was_pressed = right_pressed;
        self.left_was_pressed = left_pressed;
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(250);

    fn arbiter(start: Instant) -> MoveHandArbiter {
        MoveHandArbiter::new(WINDOW, start)
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_single_press_arms_without_double_click() {
        let start = Instant::now();
        let mut arb = arbiter(start);
        let armed = arb.update(true, false, false, start + ms(1000));
        assert_eq!(armed, Some(Hand::Right));
    }

    #[test]
    fn test_double_click_arms_on_second_press_within_window() {
        let start = Instant::now();
        let mut arb = arbiter(start);

        // First press is stale relative to the seeded timestamp: no arm.
        assert_eq!(arb.update(true, false, true, start + ms(1000)), None);
        assert_eq!(arb.update(false, false, true, start + ms(1050)), None);
        // Second press 100ms after the first: arm.
        assert_eq!(
            arb.update(true, false, true, start + ms(1100)),
            Some(Hand::Right)
        );
    }

    #[test]
    fn test_press_outside_window_does_not_arm() {
        let start = Instant::now();
        let mut arb = arbiter(start);

        assert_eq!(arb.update(true, false, true, start + ms(1000)), None);
        assert_eq!(arb.update(false, false, true, start + ms(1100)), None);
        // 300ms after the first press: too late.
        assert_eq!(arb.update(true, false, true, start + ms(1300)), None);
        assert_eq!(arb.update(false, false, true, start + ms(1350)), None);
        // But the late press refreshed the timestamp, so this one arms.
        assert_eq!(
            arb.update(true, false, true, start + ms(1400)),
            Some(Hand::Right)
        );
    }

    #[test]
    fn test_held_gesture_survives_window_expiry() {
        let start = Instant::now();
        let mut arb = arbiter(start);
        assert_eq!(arb.update(true, false, true, start + ms(100)), Some(Hand::Right));

        // Held for seconds with no edges: stays armed.
        for i in 1..=10 {
            let now = start + ms(100 + i * 1000);
            assert_eq!(arb.update(true, false, true, now), Some(Hand::Right));
        }
    }

    #[test]
    fn test_simultaneous_rising_edges_favor_left() {
        let start = Instant::now();
        let mut arb = arbiter(start);
        assert_eq!(arb.update(true, true, false, start + ms(10)), Some(Hand::Left));
    }

    #[test]
    fn test_rising_edge_steals_gesture_from_other_hand() {
        let start = Instant::now();
        let mut arb = arbiter(start);
        assert_eq!(arb.update(true, false, false, start + ms(10)), Some(Hand::Right));
        assert_eq!(arb.update(true, true, false, start + ms(20)), Some(Hand::Left));
    }

    #[test]
    fn test_falling_edge_hands_gesture_to_remaining_hand() {
        let start = Instant::now();
        let mut arb = arbiter(start);
        assert_eq!(arb.update(false, true, false, start + ms(10)), Some(Hand::Left));
        assert_eq!(arb.update(true, true, false, start + ms(20)), Some(Hand::Right));

        // Right releases while left is still held: back to Left.
        assert_eq!(arb.update(false, true, false, start + ms(30)), Some(Hand::Left));
        // Left releases too: gone.
        assert_eq!(arb.update(false, false, false, start + ms(40)), None);
    }

    #[test]
    fn test_dual_release_grants_rearm_grace() {
        let start = Instant::now();
        let mut arb = arbiter(start);

        // Arm via double click, then release both.
        assert_eq!(arb.update(true, false, true, start + ms(100)), Some(Hand::Right));
        assert_eq!(arb.update(false, false, true, start + ms(1000)), None);

        // A single left press shortly after the release arms thanks to the
        // refreshed timestamps.
        assert_eq!(
            arb.update(false, true, true, start + ms(1100)),
            Some(Hand::Left)
        );
    }

    #[test]
    fn test_release_of_inactive_hand_changes_nothing() {
        let start = Instant::now();
        let mut arb = arbiter(start);

        // Stale presses on both hands, nothing armed.
        assert_eq!(arb.update(true, false, true, start + ms(1000)), None);
        assert_eq!(arb.update(true, true, true, start + ms(1400)), None);
        // Right falls while inactive; left stays held.
        assert_eq!(arb.update(false, true, true, start + ms(1450)), None);
        assert_eq!(arb.active_hand(), None);
    }
}
