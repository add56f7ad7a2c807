//! Verlet chain (rope, punching-bag strap) built from bodies and distance links.

use crate::body::Body;
use crate::config::SolverConfig;
use crate::constraint::Link;
use crate::error::ConfigError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Options applied to every link of a new chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkOptions<F: Float> {
    pub stiffness: F,
}

impl<F: Float> Default for LinkOptions<F> {
    fn default() -> Self {
        LinkOptions { stiffness: F::one() }
    }
}

/// Options applied to every body of a new chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyOptions<F: Float> {
    pub radius: F,
    pub drag: F,
}

impl<F: Float> Default for BodyOptions<F> {
    fn default() -> Self {
        BodyOptions { radius: F::from_f32(10.0), drag: F::zero() }
    }
}

/// An ordered run of bodies where body `i` is linked to body `i + 1`.
#[derive(Clone, Debug)]
pub struct ConstraintChain<F: Float> {
    bodies: AllocVec<Body<F>>,
    links: AllocVec<Link<F>>,
}

impl<F: Float> ConstraintChain<F> {
    /// Lay out `element_count` bodies from `start` toward `end`, spaced by
    /// `|end - start| / element_count`, which is also every link's rest length.
    pub fn new(
        start: Vec2<F>,
        end: Vec2<F>,
        element_count: usize,
        link_options: LinkOptions<F>,
        body_options: BodyOptions<F>,
    ) -> Result<Self, ConfigError> {
        if element_count < 2 {
            return Err(ConfigError::TooFewElements { count: element_count });
        }
        if !(body_options.radius.is_finite() && body_options.radius >= F::zero()) {
            return Err(ConfigError::InvalidRadius);
        }
        let drag = body_options.drag;
        if !(drag.is_finite() && drag >= F::zero() && drag <= F::one()) {
            return Err(ConfigError::InvalidDrag);
        }

        let count = F::from_f32(element_count as f32);
        let rest_length = start.distance(end) / count;

        let mut links = AllocVec::with_capacity(element_count - 1);
        for i in 0..element_count - 1 {
            links.push(Link::new(i, i + 1, rest_length, link_options.stiffness)?);
        }

        let bodies = (0..element_count)
            .map(|i| {
                let t = F::from_f32(i as f32) / count;
                Body::new(start.lerp(end, t), body_options.radius, drag)
            })
            .collect();

        log::debug!(
            "created chain: {} bodies, rest length {}",
            element_count,
            rest_length.to_f32()
        );

        Ok(ConstraintChain { bodies, links })
    }

    /// Advance the chain by `dt` seconds.
    pub fn update(&mut self, dt: F, config: &SolverConfig<F>) {
        self.update_observed(dt, config, &mut NoOpStepObserver);
    }

    /// [`update`](Self::update) with hooks after integration and each relaxation pass.
    pub fn update_observed<O: StepObserver>(
        &mut self,
        dt: F,
        config: &SolverConfig<F>,
        observer: &mut O,
    ) {
        if !dt.is_positive_finite() {
            return;
        }

        let gravity = Vec2::new(F::zero(), config.gravity_y);
        let bounded = !config.bounds.is_unbounded();
        for body in self.bodies.iter_mut() {
            body.integrate(gravity, dt);
            if bounded {
                config.bounds.clamp(body);
            }
        }
        observer.on_integrate();

        for pass in 0..config.iterations.max(1) {
            for link in self.links.iter() {
                link.relax(&mut self.bodies);
            }
            observer.on_relax_pass(pass);
        }

        observer.on_step_complete();
    }

    pub fn pin(&mut self, index: usize) {
        self.bodies[index].pin();
    }

    pub fn unpin(&mut self, index: usize) {
        self.bodies[index].unpin();
    }

    /// Take a body out of the simulation so a pointer can drive it.
    pub fn grab(&mut self, index: usize) {
        self.bodies[index].pin();
    }

    /// Move a grabbed body. Call before [`update`](Self::update) so the
    /// relaxation pass drags the neighbours along.
    pub fn drag_to(&mut self, index: usize, position: Vec2<F>) {
        let body = &mut self.bodies[index];
        if body.is_fixed {
            body.place(position);
        }
    }

    /// Hand a grabbed body back to the integrator with zero velocity.
    pub fn release(&mut self, index: usize) {
        self.bodies[index].unpin();
    }

    pub fn try_grab(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check(index)?;
        self.grab(index);
        Ok(())
    }

    pub fn try_release(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check(index)?;
        self.release(index);
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.bodies.len() {
            Ok(())
        } else {
            Err(ConfigError::BodyOutOfBounds { index, count: self.bodies.len() })
        }
    }

    /// Index of the first body whose pick radius contains `point`.
    pub fn body_at(&self, point: Vec2<F>) -> Option<usize> {
        self.bodies.iter().position(|b| b.contains(point))
    }

    /// Index of the body closest to `point`.
    pub fn nearest_body(&self, point: Vec2<F>) -> usize {
        let mut best = 0;
        let mut best_dist = self.bodies[0].position.distance_sq(point);
        for (i, body) in self.bodies.iter().enumerate().skip(1) {
            let d = body.position.distance_sq(point);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best
    }

    /// Largest relative deviation of any link from its rest length.
    pub fn max_link_error(&self) -> F {
        self.links
            .iter()
            .fold(F::zero(), |acc, link| acc.max(link.strain(&self.bodies)))
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    pub fn bodies(&self) -> &[Body<F>] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body<F>] {
        &mut self.bodies
    }

    pub fn links(&self) -> &[Link<F>] {
        &self.links
    }

    pub fn body(&self, index: usize) -> &Body<F> {
        &self.bodies[index]
    }

    pub fn body_mut(&mut self, index: usize) -> &mut Body<F> {
        &mut self.bodies[index]
    }

    pub fn first(&self) -> &Body<F> {
        &self.bodies[0]
    }

    pub fn last(&self) -> &Body<F> {
        &self.bodies[self.bodies.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.bodies.len() - 1
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false: construction guarantees at least two bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
