//! Constraints applied to Verlet bodies: distance links and edge bounds.

use crate::body::Body;
use crate::error::ConfigError;
use crate::float::Float;
use crate::vec::Vec2;

/// A distance constraint between two bodies of the same chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Link<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    /// 1 is rigid; lower values only remove part of the error per pass.
    pub stiffness: F,
}

impl<F: Float> Link<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F) -> Result<Self, ConfigError> {
        if !rest_length.is_positive_finite() {
            return Err(ConfigError::DegenerateLink);
        }
        if !(stiffness.is_positive_finite() && stiffness <= F::one()) {
            return Err(ConfigError::InvalidStiffness);
        }
        Ok(Link { a, b, rest_length, stiffness })
    }

    pub fn length(&self, bodies: &[Body<F>]) -> F {
        bodies[self.a].position.distance(bodies[self.b].position)
    }

    /// Relative deviation from the rest length.
    pub fn strain(&self, bodies: &[Body<F>]) -> F {
        (self.length(bodies) - self.rest_length).abs() / self.rest_length
    }

    /// One relaxation step. Each movable endpoint takes half the scaled error;
    /// a lone movable endpoint takes all of it.
    pub fn relax(&self, bodies: &mut [Body<F>]) {
        let a_movable = !bodies[self.a].is_fixed;
        let b_movable = !bodies[self.b].is_fixed;
        if !a_movable && !b_movable {
            return;
        }

        let delta = bodies[self.b].position - bodies[self.a].position;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-10)) {
            return; // degenerate
        }

        let error = dist - self.rest_length;
        let share = if a_movable && b_movable { F::half() } else { F::one() };
        let correction = delta.scale(error * self.stiffness * share / dist);

        if a_movable {
            bodies[self.a].position += correction;
        }
        if b_movable {
            bodies[self.b].position -= correction;
        }
    }
}

/// Optional edges bodies may not cross. Unset edges are unbounded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds<F: Float> {
    pub left: Option<F>,
    pub top: Option<F>,
    pub right: Option<F>,
    pub bottom: Option<F>,
}

impl<F: Float> Bounds<F> {
    /// Only a floor, the common case for hanging sketches.
    pub fn bottom(bottom: F) -> Self {
        Bounds { bottom: Some(bottom), ..Default::default() }
    }

    /// All four edges.
    pub fn rect(min: Vec2<F>, max: Vec2<F>) -> Self {
        Bounds {
            left: Some(min.x),
            top: Some(min.y),
            right: Some(max.x),
            bottom: Some(max.y),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }

    /// Clamp a free body onto the allowed region, zeroing its velocity
    /// component into any edge it touched.
    pub fn clamp(&self, body: &mut Body<F>) {
        if body.is_fixed {
            return;
        }
        if let Some(left) = self.left {
            if body.position.x < left {
                body.position.x = left;
                body.previous.x = left;
            }
        }
        if let Some(right) = self.right {
            if body.position.x > right {
                body.position.x = right;
                body.previous.x = right;
            }
        }
        if let Some(top) = self.top {
            if body.position.y < top {
                body.position.y = top;
                body.previous.y = top;
            }
        }
        if let Some(bottom) = self.bottom {
            if body.position.y > bottom {
                body.position.y = bottom;
                body.previous.y = bottom;
            }
        }
    }
}
