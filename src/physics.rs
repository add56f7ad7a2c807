//! A world of Verlet chains sharing gravity, bounds and relaxation settings.

use crate::chain::{BodyOptions, ConstraintChain, LinkOptions};
use crate::config::SolverConfig;
use crate::constraint::Bounds;
use crate::error::ConfigError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Handle to a chain owned by a [`VerletPhysics`] world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainId(usize);

impl ChainId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns chains and steps them together with one [`SolverConfig`].
#[derive(Clone, Debug, Default)]
pub struct VerletPhysics<F: Float> {
    pub config: SolverConfig<F>,
    chains: AllocVec<ConstraintChain<F>>,
}

impl<F: Float> VerletPhysics<F> {
    pub fn new(config: SolverConfig<F>) -> Self {
        VerletPhysics { config, chains: AllocVec::new() }
    }

    pub fn create_chain(
        &mut self,
        start: Vec2<F>,
        end: Vec2<F>,
        element_count: usize,
        link_options: LinkOptions<F>,
        body_options: BodyOptions<F>,
    ) -> Result<ChainId, ConfigError> {
        let chain = ConstraintChain::new(start, end, element_count, link_options, body_options)?;
        Ok(self.add_chain(chain))
    }

    pub fn add_chain(&mut self, chain: ConstraintChain<F>) -> ChainId {
        let id = ChainId(self.chains.len());
        self.chains.push(chain);
        id
    }

    pub fn set_gravity_y(&mut self, gravity_y: F) {
        self.config.gravity_y = gravity_y;
    }

    /// Bounds may change every frame, e.g. when the canvas is resized.
    pub fn set_bounds(&mut self, bounds: Bounds<F>) {
        self.config.bounds = bounds;
    }

    pub fn update(&mut self, dt: F) {
        for chain in self.chains.iter_mut() {
            chain.update(dt, &self.config);
        }
    }

    pub fn update_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        for chain in self.chains.iter_mut() {
            chain.update_observed(dt, &self.config, observer);
        }
    }

    pub fn chain(&self, id: ChainId) -> &ConstraintChain<F> {
        &self.chains[id.0]
    }

    pub fn chain_mut(&mut self, id: ChainId) -> &mut ConstraintChain<F> {
        &mut self.chains[id.0]
    }

    pub fn try_chain(&self, id: ChainId) -> Result<&ConstraintChain<F>, ConfigError> {
        self.chains.get(id.0).ok_or(ConfigError::UnknownChain(id.0))
    }

    pub fn chains(&self) -> &[ConstraintChain<F>] {
        &self.chains
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }
}
