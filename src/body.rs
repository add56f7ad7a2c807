//! Verlet bodies: position-based particles with implicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// A chain element. Velocity is implicit in `position - previous`.
#[derive(Clone, Debug, PartialEq)]
pub struct Body<F: Float> {
    pub position: Vec2<F>,
    pub previous: Vec2<F>,
    /// Fixed bodies are skipped by integration and absorb no link correction.
    pub is_fixed: bool,
    /// Pick radius for drag hit tests and collision drawing.
    pub radius: F,
    /// Air resistance in [0, 1]; the fraction of implicit velocity lost per update.
    pub drag: F,
}

impl<F: Float> Body<F> {
    pub fn new(position: Vec2<F>, radius: F, drag: F) -> Self {
        Body {
            position,
            previous: position,
            is_fixed: false,
            radius,
            drag,
        }
    }

    /// Verlet step: `next = pos + (pos - prev) * (1 - drag) + accel * dt²`.
    pub fn integrate(&mut self, acceleration: Vec2<F>, dt: F) {
        if self.is_fixed {
            return;
        }
        let inertia = (self.position - self.previous).scale(F::one() - self.drag);
        let next = self.position + inertia + acceleration.scale(dt * dt);
        self.previous = self.position;
        self.position = next;
    }

    /// Displacement over the last update.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.position - self.previous
    }

    /// Velocity in units per second, given the step that produced it.
    pub fn velocity(&self, dt: F) -> Vec2<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec2::zero();
        }
        self.velocity_raw().scale(F::one() / dt)
    }

    /// Forget the stored motion so the next integration starts at rest.
    pub fn settle(&mut self) {
        self.previous = self.position;
    }

    /// Teleport while keeping zero implicit velocity.
    pub fn place(&mut self, position: Vec2<F>) {
        self.position = position;
        self.previous = position;
    }

    pub fn pin(&mut self) {
        self.is_fixed = true;
        self.settle();
    }

    pub fn unpin(&mut self) {
        self.is_fixed = false;
        self.settle();
    }

    /// Whether `point` lies within the pick radius (inclusive).
    pub fn contains(&self, point: Vec2<F>) -> bool {
        self.position.distance_sq(point) <= self.radius * self.radius
    }
}
