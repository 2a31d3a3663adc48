//! Configuration types and persisted key names for the play-space mover

use std::time::Duration;

/// Settings group holding every persisted play-space key.
pub const SETTINGS_GROUP: &str = "playspaceSettings";

/// Persisted key names inside [`SETTINGS_GROUP`].
pub mod keys {
    pub const ADJUST_CHAPERONE: &str = "adjustChaperone";
    pub const ROTATE_HAND: &str = "rotateHand";
    pub const MOVE_SHORTCUT_RIGHT: &str = "moveShortcutRight";
    pub const MOVE_SHORTCUT_LEFT: &str = "moveShortcutLeft";
    pub const REQUIRE_DOUBLE_CLICK: &str = "requireDoubleClick";
    pub const LOCK_X: &str = "lockXToggle";
    pub const LOCK_Y: &str = "lockYToggle";
    pub const LOCK_Z: &str = "lockZToggle";
}

/// Which controllers may hold the move gesture and how it arms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveShortcutConfig {
    /// Right controller may hold the move gesture
    pub right_enabled: bool,
    /// Left controller may hold the move gesture
    pub left_enabled: bool,
    /// Require a double press of the shortcut button before arming
    pub require_double_click: bool,
    /// Derive play-space rotation from the held hand's yaw
    pub rotate_hand: bool,
}

impl Default for MoveShortcutConfig {
    fn default() -> Self {
        Self {
            right_enabled: true,
            left_enabled: true,
            require_double_click: false,
            rotate_hand: false,
        }
    }
}

/// Timing constants for input arbitration and universe resync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverTiming {
    /// Window within which a second shortcut press counts as a double click
    pub double_click_window: Duration,
    /// Ticks between re-reads of the tracking system's universe mode
    pub universe_resync_interval: u32,
}

impl Default for MoverTiming {
    fn default() -> Self {
        Self {
            double_click_window: Duration::from_millis(250),
            universe_resync_interval: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shortcut_config() {
        let config = MoveShortcutConfig::default();
        assert!(config.right_enabled);
        assert!(config.left_enabled);
        assert!(!config.require_double_click);
        assert!(!config.rotate_hand);
    }

    #[test]
    fn test_default_timing() {
        let timing = MoverTiming::default();
        assert_eq!(timing.double_click_window, Duration::from_millis(250));
        assert_eq!(timing.universe_resync_interval, 100);
    }
}
