//! Configuration types for the Verlet solver.

use crate::constraint::Bounds;
use crate::float::Float;

/// World-level settings shared by every chain in an update.
///
/// # Builder Pattern
/// ```
/// use tactile::config::SolverConfig;
/// use tactile::constraint::Bounds;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_gravity_y(2000.0)
///     .with_bounds(Bounds::bottom(1080.0))
///     .with_iterations(4);
/// assert_eq!(config.iterations, 4);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverConfig<F: Float> {
    /// Downward acceleration in units/s² (canvas y grows downward). Default: 0.
    pub gravity_y: F,
    /// Edges bodies are clamped to after integration. Default: unbounded.
    pub bounds: Bounds<F>,
    /// Relaxation passes over the links per update. Default: 1.
    pub iterations: usize,
}

impl<F: Float> SolverConfig<F> {
    pub fn new() -> Self {
        SolverConfig {
            gravity_y: F::zero(),
            bounds: Bounds::default(),
            iterations: 1,
        }
    }

    pub fn with_gravity_y(mut self, gravity_y: F) -> Self {
        self.gravity_y = gravity_y;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds<F>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the number of relaxation passes. Clamped to at least one.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
