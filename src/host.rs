//! Frame host: clock, input sampling and the run/finish lifecycle.
//!
//! The platform owns the display loop and calls [`FrameHost::tick`] once per
//! refresh with its timestamp. Input events are queued as they arrive and only
//! folded into the pointer snapshot at the start of a tick, so a sketch's
//! update always sees one consistent sample.

use crate::error::HostError;
use crate::float::Float;
use crate::input::{Input, KeyEvent, Pointer, PointerEvent};
use crate::resources::ResourceBarrier;
use alloc::boxed::Box;
use core::cell::Cell;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HostConfig<F: Float> {
    /// Longest step handed to a sketch, in seconds. Default: 0.1.
    pub max_dt: F,
}

impl<F: Float> HostConfig<F> {
    pub fn new() -> Self {
        HostConfig { max_dt: F::from_f32(0.1) }
    }

    pub fn with_max_dt(mut self, max_dt: F) -> Self {
        self.max_dt = max_dt;
        self
    }
}

impl<F: Float> Default for HostConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts platform timestamps into frame deltas.
///
/// Timestamps stay `f64` until the delta is taken: page clocks run for hours
/// and `f32` cannot resolve one frame at that magnitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameClock<F: Float> {
    last: Option<f64>,
    max_dt: F,
    elapsed: F,
    frames: u64,
}

impl<F: Float> FrameClock<F> {
    pub fn new(max_dt: F) -> Self {
        FrameClock { last: None, max_dt, elapsed: F::zero(), frames: 0 }
    }

    /// Seconds since the previous call, in `[0, max_dt]`. The first call yields 0.
    pub fn advance(&mut self, timestamp: f64) -> F {
        let dt = match self.last {
            Some(last) if timestamp.is_finite() => {
                F::from_f64((timestamp - last).clamp(0.0, self.max_dt.to_f64()))
            }
            _ => F::zero(),
        };
        if timestamp.is_finite() {
            self.last = Some(timestamp);
        }
        self.elapsed = self.elapsed + dt;
        self.frames += 1;
        dt
    }

    pub fn elapsed(&self) -> F {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Lifecycle of a sketch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostState {
    /// Waiting for resources; no frames are delivered.
    Loading,
    Running,
    /// Terminal. No further updates.
    Finished,
}

/// Everything a sketch update receives.
pub struct Frame<'a, F: Float> {
    /// Seconds since the previous frame, always `>= 0`.
    pub dt: F,
    pub elapsed: F,
    pub index: u64,
    pub pointer: Pointer<F>,
    pub keys: &'a [KeyEvent],
    finish: &'a Cell<bool>,
}

impl<F: Float> Frame<'_, F> {
    /// Ask the host to finish once this update returns.
    pub fn finish(&self) {
        self.finish.set(true);
    }

    pub fn was_key_pressed(&self, key: char) -> bool {
        self.keys.iter().any(|k| k.key == key)
    }
}

type UpdateFn<F> = Box<dyn FnMut(&Frame<'_, F>)>;
type FinishFn = Box<dyn FnOnce()>;

pub struct FrameHost<F: Float> {
    state: HostState,
    clock: FrameClock<F>,
    input: Input<F>,
    resources: ResourceBarrier,
    update: Option<UpdateFn<F>>,
    on_finish: Option<FinishFn>,
}

impl<F: Float> FrameHost<F> {
    pub fn new(config: HostConfig<F>) -> Self {
        FrameHost {
            state: HostState::Loading,
            clock: FrameClock::new(config.max_dt),
            input: Input::new(),
            resources: ResourceBarrier::new(),
            update: None,
            on_finish: None,
        }
    }

    pub fn resources(&self) -> &ResourceBarrier {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceBarrier {
        &mut self.resources
    }

    /// Notification for the embedding page (navigation, parent frame message).
    pub fn on_finish(&mut self, callback: impl FnOnce() + 'static) {
        self.on_finish = Some(Box::new(callback));
    }

    /// Start delivering frames to `update`. Refused while loads are pending,
    /// after any load failed, twice, or after finishing.
    pub fn run(&mut self, update: impl FnMut(&Frame<'_, F>) + 'static) -> Result<(), HostError> {
        match self.state {
            HostState::Running => return Err(HostError::AlreadyRunning),
            HostState::Finished => return Err(HostError::Finished),
            HostState::Loading => {}
        }
        if let Err(error) = self.resources.check() {
            log::warn!("refusing to start: {}", error);
            return Err(error);
        }
        self.update = Some(Box::new(update));
        self.state = HostState::Running;
        log::info!("frame loop started ({} resources loaded)", self.resources.loaded());
        Ok(())
    }

    /// One display refresh, `timestamp` in seconds. Returns whether the sketch update ran.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        if self.state != HostState::Running {
            return false;
        }
        let dt = self.clock.advance(timestamp);
        let pointer = self.input.sample();
        let finish = Cell::new(false);

        if let Some(update) = self.update.as_mut() {
            let frame = Frame {
                dt,
                elapsed: self.clock.elapsed(),
                index: self.clock.frames() - 1,
                pointer,
                keys: self.input.keys(),
                finish: &finish,
            };
            update(&frame);
        }

        if finish.get() {
            self.finish();
        }
        true
    }

    /// Stop the sketch. Idempotent; returns `true` only on the first call.
    pub fn finish(&mut self) -> bool {
        if self.state == HostState::Finished {
            return false;
        }
        self.state = HostState::Finished;
        self.update = None;
        log::info!("sketch finished after {} frames", self.clock.frames());
        if let Some(callback) = self.on_finish.take() {
            callback();
        }
        true
    }

    pub fn push_pointer(&mut self, event: PointerEvent<F>) {
        self.input.push_pointer(event);
    }

    pub fn push_key(&mut self, event: KeyEvent) {
        self.input.push_key(event);
    }

    /// Pointer as sampled at the start of the last tick.
    pub fn pointer(&self) -> Pointer<F> {
        self.input.pointer()
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == HostState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == HostState::Finished
    }

    pub fn clock(&self) -> &FrameClock<F> {
        &self.clock
    }
}
