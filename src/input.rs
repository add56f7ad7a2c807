//! Pointer and keyboard input, queued by the platform and sampled once per frame.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::collections::VecDeque;
use alloc::vec::Vec as AllocVec;

/// Snapshot of the pointer handed to the sketch each frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer<F: Float> {
    pub x: F,
    pub y: F,
    pub pressed: bool,
    /// Latches on the first press or move; sketches wait on it before reacting.
    pub has_started: bool,
}

impl<F: Float> Pointer<F> {
    pub fn position(&self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }
}

/// Raw pointer events in canvas coordinates (see [`Viewport::to_canvas`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent<F: Float> {
    Down { x: F, y: F },
    Move { x: F, y: F },
    Up { x: F, y: F },
    /// The platform took the pointer away (touch cancel, lost capture).
    Cancel,
}

/// A key press, identified by the character it produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: char,
}

/// Maps element-relative client coordinates to canvas pixels when the canvas
/// is displayed at a different size than its backing store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport<F: Float> {
    /// Top-left corner of the canvas element in client space.
    pub origin: Vec2<F>,
    /// Displayed size of the element.
    pub display_size: Vec2<F>,
    /// Backing-store size in canvas pixels.
    pub canvas_size: Vec2<F>,
}

impl<F: Float> Viewport<F> {
    /// A viewport where client and canvas coordinates coincide.
    pub fn identity(size: Vec2<F>) -> Self {
        Viewport { origin: Vec2::zero(), display_size: size, canvas_size: size }
    }

    pub fn to_canvas(&self, client: Vec2<F>) -> Vec2<F> {
        let local = client - self.origin;
        Vec2::new(
            scale_axis(local.x, self.canvas_size.x, self.display_size.x),
            scale_axis(local.y, self.canvas_size.y, self.display_size.y),
        )
    }
}

fn scale_axis<F: Float>(value: F, canvas: F, display: F) -> F {
    if display.is_near_zero(F::from_f32(1e-10)) {
        value
    } else {
        value * canvas / display
    }
}

/// Event queue plus the pointer state it folds into.
#[derive(Clone, Debug, Default)]
pub struct Input<F: Float> {
    pointer: Pointer<F>,
    pending: VecDeque<PointerEvent<F>>,
    pending_keys: AllocVec<KeyEvent>,
    keys: AllocVec<KeyEvent>,
}

impl<F: Float> Input<F> {
    pub fn new() -> Self {
        Input {
            pointer: Pointer::default(),
            pending: VecDeque::new(),
            pending_keys: AllocVec::new(),
            keys: AllocVec::new(),
        }
    }

    /// Queue an event; it takes effect at the next [`sample`](Self::sample).
    pub fn push_pointer(&mut self, event: PointerEvent<F>) {
        self.pending.push_back(event);
    }

    pub fn push_key(&mut self, event: KeyEvent) {
        self.pending_keys.push(event);
    }

    /// Fold every queued event into the snapshot, in arrival order.
    pub fn sample(&mut self) -> Pointer<F> {
        while let Some(event) = self.pending.pop_front() {
            match event {
                PointerEvent::Down { x, y } => {
                    self.pointer.x = x;
                    self.pointer.y = y;
                    self.pointer.pressed = true;
                    self.pointer.has_started = true;
                }
                PointerEvent::Move { x, y } => {
                    self.pointer.x = x;
                    self.pointer.y = y;
                    self.pointer.has_started = true;
                }
                PointerEvent::Up { x, y } => {
                    self.pointer.x = x;
                    self.pointer.y = y;
                    self.pointer.pressed = false;
                }
                PointerEvent::Cancel => {
                    self.pointer.pressed = false;
                }
            }
        }
        self.keys.clear();
        self.keys.append(&mut self.pending_keys);
        self.pointer
    }

    /// The snapshot from the last sample.
    pub fn pointer(&self) -> Pointer<F> {
        self.pointer
    }

    /// Keys pressed since the previous sample.
    pub fn keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    pub fn was_key_pressed(&self, key: char) -> bool {
        self.keys.iter().any(|k| k.key == key)
    }
}
