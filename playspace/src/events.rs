//! Field-change notification
//!
//! Replaces GUI property signals with an explicit observer list: setters emit
//! one [`ChangeEvent`] per mutated field unless the caller passes
//! `notify = false` to fold several changes into a higher-level operation.

use crate::core::state::Axis;
use crate::tracking::types::TrackingUniverse;

/// A single field change, carrying the new value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeEvent {
    TrackingUniverse(TrackingUniverse),
    OffsetX(f32),
    OffsetY(f32),
    OffsetZ(f32),
    Rotation(i32),
    TempRotation(i32),
    AdjustChaperone(bool),
    RotateHand(bool),
    MoveShortcutRight(bool),
    MoveShortcutLeft(bool),
    RequireDoubleClick(bool),
    LockX(bool),
    LockY(bool),
    LockZ(bool),
}

impl ChangeEvent {
    /// Offset event for one axis.
    pub fn offset(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => ChangeEvent::OffsetX(value),
            Axis::Y => ChangeEvent::OffsetY(value),
            Axis::Z => ChangeEvent::OffsetZ(value),
        }
    }

    /// Lock event for one axis.
    pub fn lock(axis: Axis, value: bool) -> Self {
        match axis {
            Axis::X => ChangeEvent::LockX(value),
            Axis::Y => ChangeEvent::LockY(value),
            Axis::Z => ChangeEvent::LockZ(value),
        }
    }
}

/// Observer callback invoked on every emitted change
pub type ChangeObserver = Box<dyn Fn(ChangeEvent) + Send + Sync>;

/// Dispatches field changes to observers in subscription order
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<ChangeObserver>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all subsequent emissions.
    pub fn subscribe(&mut self, observer: impl Fn(ChangeEvent) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver an event to every observer.
    pub fn emit(&self, event: ChangeEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}
