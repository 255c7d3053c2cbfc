//! Step observer trait for monitoring simulation progress.

use crate::float::Float;

/// Hooks called by [`World::update_observed`](crate::world::World::update_observed).
///
/// All methods default to no-ops, so implementors override only what they
/// watch (profiling, visualization, tests counting substeps).
pub trait StepObserver<F: Float = f32> {
    /// Called after all particles have been integrated in a substep.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over the constraint list.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when a fixed substep finishes, with the world time it reached.
    fn on_substep(&mut self, _world_time: F) {}

    /// Called after pruning, with the number of constraints removed.
    fn on_expired(&mut self, _removed: usize) {}

    /// Called when an update is fully complete.
    fn on_step_complete(&mut self, _substeps: usize) {}
}

/// A no-op observer. Used by [`World::update`](crate::world::World::update).
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
