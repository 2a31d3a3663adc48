//! Batched application of origin transforms
//!
//! [`OriginApplier`] is the single gateway between play-space state changes
//! and the tracking system. Plain translations commit immediately; combined
//! rotation-plus-translation updates are staged in the working copy and
//! committed once, because two separate commits would let a frame render
//! between them as a visible jump.

use glam::Vec3;
use tracing::debug;

use crate::tracking::interface::OriginMutator;
use crate::tracking::types::TrackingUniverse;

/// Applies translations and rotations to the tracking origin
pub struct OriginApplier<'a, M: OriginMutator + ?Sized> {
    mutator: &'a mut M,
    universe: TrackingUniverse,
    adjust_chaperone: bool,
}

impl<'a, M: OriginMutator + ?Sized> OriginApplier<'a, M> {
    /// Bind an applier to the current universe and chaperone-adjust flag.
    pub fn new(mutator: &'a mut M, universe: TrackingUniverse, adjust_chaperone: bool) -> Self {
        Self {
            mutator,
            universe,
            adjust_chaperone,
        }
    }

    /// Apply a world-frame translation as a single committed call.
    pub fn translate(&mut self, world_offset: Vec3) {
        debug!(offset = ?world_offset, "translating origin");
        self.mutator
            .add_offset(self.universe, world_offset, self.adjust_chaperone, true);
    }

    /// Apply a rotation and a world-frame translation as one atomic commit.
    ///
    /// Reverts first so no stale staged change rides along, stages both
    /// mutations, then commits once.
    pub fn rotate_and_translate(&mut self, angle: f32, world_offset: Vec3) {
        debug!(angle, offset = ?world_offset, "rotating and translating origin");
        self.mutator.revert_working_copy();
        self.mutator
            .rotate_origin(self.universe, angle, self.adjust_chaperone, false);
        self.mutator
            .add_offset(self.universe, world_offset, self.adjust_chaperone, false);
        self.mutator.commit_working_copy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::sim::{MutatorCall, SimTracking};

    #[test]
    fn test_translate_commits_in_one_call() {
        let mut sim = SimTracking::new();
        OriginApplier::new(&mut sim, TrackingUniverse::Standing, false)
            .translate(Vec3::new(1.0, 0.0, 0.0));

        let calls = sim.take_calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(
            calls[0],
            MutatorCall::AddOffset { commit: true, .. }
        ));
        assert_eq!(sim.commit_count(), 1);
    }

    #[test]
    fn test_rotate_and_translate_is_one_commit() {
        let mut sim = SimTracking::new();
        OriginApplier::new(&mut sim, TrackingUniverse::Standing, true)
            .rotate_and_translate(0.5, Vec3::new(0.0, 0.0, -1.0));

        let calls = sim.take_calls();
        assert_eq!(calls.len(), 4);
        assert!(matches!(calls[0], MutatorCall::RevertWorkingCopy));
        assert!(matches!(
            calls[1],
            MutatorCall::RotateOrigin {
                adjust_chaperone: true,
                commit: false,
                ..
            }
        ));
        assert!(matches!(
            calls[2],
            MutatorCall::AddOffset { commit: false, .. }
        ));
        assert!(matches!(calls[3], MutatorCall::CommitWorkingCopy));
        assert_eq!(sim.commit_count(), 1);
        assert_eq!(sim.revert_count(), 1);
    }
}
