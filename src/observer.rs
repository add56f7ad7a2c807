//! Step observer trait for watching chain updates.

/// Hooks called by [`ConstraintChain::update_observed`](crate::chain::ConstraintChain::update_observed).
///
/// All methods default to no-ops; implement the ones you need for debugging
/// overlays or profiling.
pub trait StepObserver {
    /// Called after every free body was integrated and clamped to the bounds.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over the links.
    fn on_relax_pass(&mut self, _pass: usize) {}

    /// Called when the update is complete.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
