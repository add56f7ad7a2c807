//! Analytic damped springs parameterized by frequency and half-life.
//!
//! The state after `dt` seconds is computed from the closed-form solution of
//! the continuous oscillator, so a long or irregular frame can never make the
//! spring overshoot more than the continuous motion would, or diverge.

use crate::error::ConfigError;
use crate::float::Float;
use crate::vec::Vec2;

/// Shared tuning for one or more springs.
///
/// `frequency` is in oscillations per second; `half_life` is the time for
/// the oscillation amplitude to halve. With `wrap` set (e.g. `360.0` for
/// degrees) the spring travels the shortest way around the circle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringSettings<F: Float> {
    frequency: F,
    half_life: F,
    wrap: Option<F>,
}

impl<F: Float> SpringSettings<F> {
    pub fn new(frequency: F, half_life: F) -> Result<Self, ConfigError> {
        if !frequency.is_positive_finite() {
            return Err(ConfigError::InvalidFrequency);
        }
        if !half_life.is_positive_finite() {
            return Err(ConfigError::InvalidHalfLife);
        }
        Ok(SpringSettings { frequency, half_life, wrap: None })
    }

    /// Wrap positions modulo `modulus`.
    pub fn with_wrap(mut self, modulus: F) -> Result<Self, ConfigError> {
        if !modulus.is_positive_finite() {
            return Err(ConfigError::InvalidWrap);
        }
        self.wrap = Some(modulus);
        Ok(self)
    }

    pub fn frequency(&self) -> F { self.frequency }
    pub fn half_life(&self) -> F { self.half_life }
    pub fn wrap(&self) -> Option<F> { self.wrap }

    /// Exponential decay rate `ln 2 / half_life`.
    pub fn decay_rate(&self) -> F {
        F::ln_2() / self.half_life
    }

    /// Angular frequency `2π · frequency`.
    pub fn angular_freq(&self) -> F {
        F::two() * F::pi() * self.frequency
    }
}

/// A single-degree-of-freedom damped spring.
///
/// ```
/// use tactile::{Spring, SpringSettings};
///
/// let settings = SpringSettings::new(1.5f32, 0.05).unwrap();
/// let mut y = Spring::new(-800.0, 0.0, settings);
/// for _ in 0..120 {
///     y.step(1.0 / 60.0);
/// }
/// assert!(y.position().abs() < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    position: F,
    velocity: F,
    target: F,
    settings: SpringSettings<F>,
}

impl<F: Float> Spring<F> {
    pub fn new(position: F, target: F, settings: SpringSettings<F>) -> Self {
        let mut spring = Spring {
            position,
            velocity: F::zero(),
            target,
            settings,
        };
        spring.normalize();
        spring
    }

    /// A spring already resting at `position`.
    pub fn at_rest(position: F, settings: SpringSettings<F>) -> Self {
        Self::new(position, position, settings)
    }

    /// Advance the spring by `dt` seconds. Non-positive or non-finite `dt` is ignored.
    pub fn step(&mut self, dt: F) {
        if !dt.is_positive_finite() {
            return;
        }

        let goal = self.position + self.offset_to_target();
        let x0 = self.position - goal;
        let v0 = self.velocity;
        let lambda = self.settings.decay_rate();
        let w = self.settings.angular_freq();

        let exp_term = (-lambda * dt).exp();
        if !(exp_term > F::zero()) {
            // Fully decayed within this step.
            self.settle_at(goal);
            return;
        }
        let cos_term = (w * dt).cos();
        let sin_term = (w * dt).sin();

        // Scale by the decay before combining; `lambda` alone may be near overflow.
        let x_e = x0 * exp_term;
        let lambda_e = lambda * exp_term;
        let b_e = (v0 * exp_term + x0 * lambda_e) / w;
        let new_x = x_e * cos_term + b_e * sin_term;
        let new_v =
            (b_e * w - x0 * lambda_e) * cos_term - b_e * (lambda * sin_term) - x_e * w * sin_term;

        if !(new_x.is_finite() && new_v.is_finite()) {
            self.settle_at(goal);
            return;
        }
        self.position = goal + new_x;
        self.velocity = new_v;
        self.normalize();
    }

    fn settle_at(&mut self, goal: F) {
        self.position = goal;
        self.velocity = F::zero();
        self.normalize();
    }

    /// Signed distance from position to target; the shortest way round when wrapping.
    pub fn offset_to_target(&self) -> F {
        let delta = self.target - self.position;
        match self.settings.wrap {
            Some(wrap) => {
                let half = wrap * F::half();
                (delta + half).rem_euclid(wrap) - half
            }
            None => delta,
        }
    }

    fn normalize(&mut self) {
        if let Some(wrap) = self.settings.wrap {
            self.position = self.position.rem_euclid(wrap);
        }
    }

    pub fn set_target(&mut self, target: F) { self.target = target; }
    pub fn target(&self) -> F { self.target }
    pub fn position(&self) -> F { self.position }
    pub fn velocity(&self) -> F { self.velocity }
    pub fn settings(&self) -> &SpringSettings<F> { &self.settings }

    /// Overwrite the position, e.g. while a sketch drives the value ballistically.
    pub fn set_position(&mut self, position: F) {
        self.position = position;
        self.normalize();
    }

    pub fn set_velocity(&mut self, velocity: F) {
        self.velocity = velocity;
    }

    pub fn is_settled(&self, eps_pos: F, eps_vel: F) -> bool {
        self.offset_to_target().abs() < eps_pos && self.velocity.abs() < eps_vel
    }

    pub fn reset(&mut self, position: F) {
        self.position = position;
        self.velocity = F::zero();
        self.normalize();
    }

    pub fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = F::zero();
        self.normalize();
    }
}

/// Two independent axis springs sharing one set of settings.
#[derive(Clone, Debug)]
pub struct Spring2D<F: Float> {
    pub x: Spring<F>,
    pub y: Spring<F>,
}

impl<F: Float> Spring2D<F> {
    pub fn new(position: Vec2<F>, target: Vec2<F>, settings: SpringSettings<F>) -> Self {
        Spring2D {
            x: Spring::new(position.x, target.x, settings),
            y: Spring::new(position.y, target.y, settings),
        }
    }

    pub fn step(&mut self, dt: F) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn set_target(&mut self, target: Vec2<F>) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn target(&self) -> Vec2<F> { Vec2::new(self.x.target(), self.y.target()) }
    pub fn position(&self) -> Vec2<F> { Vec2::new(self.x.position(), self.y.position()) }
    pub fn velocity(&self) -> Vec2<F> { Vec2::new(self.x.velocity(), self.y.velocity()) }

    pub fn is_settled(&self, eps_pos: F, eps_vel: F) -> bool {
        self.x.is_settled(eps_pos, eps_vel) && self.y.is_settled(eps_pos, eps_vel)
    }

    pub fn reset(&mut self, position: Vec2<F>) {
        self.x.reset(position.x);
        self.y.reset(position.y);
    }
}
