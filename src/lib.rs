//! Springs, Verlet chains and pointer drags for frame-driven interactive sketches.
//!
//! `tactile` is the small engine under a gallery of canvas sketches. Each
//! sketch owns its state and, once per display refresh, lets the drag manager
//! resolve the pointer, steps its chains and springs, then draws.
//!
//! # Features
//!
//! - **Analytic springs**: closed-form response from frequency and half-life,
//!   stable for any `dt`, optional wrap-around (angles)
//! - **Verlet chains**: gravity, drag, bounds, pinned and pointer-dragged bodies,
//!   configurable relaxation passes
//! - **Drag manager**: first-registered-wins picking with radius or predicate hit tests
//! - **Frame host**: clamped frame clock, once-per-frame input sampling, a
//!   resource barrier gating startup, idempotent finish
//! - **Audio boundary**: clip/voice traits and a fade helper
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod math;
pub mod spring;
pub mod body;
pub mod constraint;
pub mod chain;
pub mod physics;
pub mod drag;
pub mod input;
pub mod resources;
pub mod audio;
pub mod host;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use spring::{Spring, Spring2D, SpringSettings};
pub use body::Body;
pub use constraint::{Bounds, Link};
pub use chain::{BodyOptions, ConstraintChain, LinkOptions};
pub use physics::{ChainId, VerletPhysics};
pub use drag::{ActiveDrag, Circle, DragEvent, DragId, DragManager, DragObject, HitTest};
pub use input::{Input, KeyEvent, Pointer, PointerEvent, Viewport};
pub use resources::{LoadTicket, ResourceBarrier};
pub use audio::{AudioBackend, Clip, PlayOptions, Voice, VolumeFade};
pub use host::{Frame, FrameClock, FrameHost, HostConfig, HostState};
pub use config::SolverConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::{AssetError, ConfigError, HostError};
