//! Pointer drag management: which registered target, if any, is being dragged.
//!
//! The manager never moves anything. Each frame it turns the sampled pointer
//! into at most one drag start or stop, running the owner's callbacks with
//! mutable access to the sketch state `S`. Candidates are tested in
//! registration order and the first hit wins, so register higher-priority
//! targets first, or give a lower-priority target a [`HitTest::Predicate`]
//! that vetoes the overlapping region.
//!
//! ```
//! use tactile::drag::{Circle, DragManager, DragObject, HitTest};
//! use tactile::Vec2;
//!
//! struct Scene { ball: Vec2<f32>, held: bool }
//!
//! let mut scene = Scene { ball: Vec2::new(100.0, 100.0), held: false };
//! let mut drags = DragManager::new();
//! drags.create_drag_object(
//!     DragObject::new("ball", HitTest::radius(|s: &Scene| Circle::new(s.ball, 50.0)))
//!         .on_start_drag(|s: &mut Scene, _| s.held = true)
//!         .on_stop_drag(|s: &mut Scene, _| s.held = false),
//! );
//!
//! drags.update(&mut scene, 120.0, 100.0, true);
//! assert!(scene.held);
//! drags.update(&mut scene, 500.0, 500.0, false);
//! assert!(!scene.held);
//! ```

use crate::float::Float;
use crate::vec::Vec2;
use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;

/// A circular pick area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle<F: Float> {
    pub center: Vec2<F>,
    pub radius: F,
}

impl<F: Float> Circle<F> {
    pub fn new(center: Vec2<F>, radius: F) -> Self {
        Circle { center, radius }
    }

    /// Inclusive: a point on the rim counts as inside.
    pub fn contains(&self, point: Vec2<F>) -> bool {
        self.center.distance_sq(point) <= self.radius * self.radius
    }
}

/// How a candidate decides whether the pointer picked it.
pub enum HitTest<S, F: Float> {
    /// Geometric: pointer within the circle located in the current sketch state.
    Radius(Box<dyn Fn(&S) -> Circle<F>>),
    /// Owner-supplied predicate; may veto regardless of distance.
    Predicate(Box<dyn Fn(&S, Vec2<F>) -> bool>),
}

impl<S, F: Float> HitTest<S, F> {
    pub fn radius(locate: impl Fn(&S) -> Circle<F> + 'static) -> Self {
        HitTest::Radius(Box::new(locate))
    }

    pub fn predicate(test: impl Fn(&S, Vec2<F>) -> bool + 'static) -> Self {
        HitTest::Predicate(Box::new(test))
    }

    /// `Some(grab_offset)` on a hit. The offset points from the pointer to the
    /// circle center; predicates have no center and report zero.
    fn hit(&self, scene: &S, point: Vec2<F>) -> Option<Vec2<F>> {
        match self {
            HitTest::Radius(locate) => {
                let circle = locate(scene);
                circle.contains(point).then(|| circle.center - point)
            }
            HitTest::Predicate(test) => test(scene, point).then(Vec2::zero),
        }
    }
}

/// Callback run on drag start or stop with the sketch state and the target key.
pub type DragCallback<S, K> = Box<dyn FnMut(&mut S, K)>;

/// A registered drag candidate.
pub struct DragObject<S, K, F: Float> {
    key: K,
    hit_test: HitTest<S, F>,
    on_start_drag: Option<DragCallback<S, K>>,
    on_stop_drag: Option<DragCallback<S, K>>,
}

impl<S, K: Copy, F: Float> DragObject<S, K, F> {
    /// `key` identifies the target to the owner (a body index, an enum tag).
    pub fn new(key: K, hit_test: HitTest<S, F>) -> Self {
        DragObject { key, hit_test, on_start_drag: None, on_stop_drag: None }
    }

    pub fn on_start_drag(mut self, callback: impl FnMut(&mut S, K) + 'static) -> Self {
        self.on_start_drag = Some(Box::new(callback));
        self
    }

    pub fn on_stop_drag(mut self, callback: impl FnMut(&mut S, K) + 'static) -> Self {
        self.on_stop_drag = Some(Box::new(callback));
        self
    }

    pub fn key(&self) -> K {
        self.key
    }
}

/// Registration handle; also the priority rank (lower wins).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DragId(usize);

impl DragId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The drag in progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveDrag<K, F: Float> {
    pub id: DragId,
    pub key: K,
    /// Target center minus pointer at the moment of the grab.
    pub grab_offset: Vec2<F>,
    /// Pointer position that started the drag.
    pub origin: Vec2<F>,
}

/// Transition reported by [`DragManager::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragEvent<K> {
    Started { id: DragId, key: K },
    Stopped { id: DragId, key: K },
}

pub struct DragManager<S, K, F: Float> {
    objects: AllocVec<DragObject<S, K, F>>,
    active: Option<ActiveDrag<K, F>>,
    pointer: Vec2<F>,
    was_pressed: bool,
}

impl<S, K: Copy, F: Float> DragManager<S, K, F> {
    pub fn new() -> Self {
        DragManager {
            objects: AllocVec::new(),
            active: None,
            pointer: Vec2::zero(),
            was_pressed: false,
        }
    }

    pub fn create_drag_object(&mut self, object: DragObject<S, K, F>) -> DragId {
        let id = DragId(self.objects.len());
        self.objects.push(object);
        id
    }

    /// Feed this frame's pointer sample.
    pub fn update(&mut self, scene: &mut S, x: F, y: F, pressed: bool) -> Option<DragEvent<K>> {
        let point = Vec2::new(x, y);
        self.pointer = point;
        let rising = pressed && !self.was_pressed;
        let falling = !pressed && self.was_pressed;
        self.was_pressed = pressed;

        if rising && self.active.is_none() {
            return self.start(scene, point);
        }
        if falling {
            return self.stop(scene);
        }
        None
    }

    /// End the active drag (pointer cancel, sketch teardown). The press edge
    /// is kept, so a pointer still held down must be released before it can
    /// start another drag.
    pub fn cancel(&mut self, scene: &mut S) -> Option<DragEvent<K>> {
        self.stop(scene)
    }

    fn start(&mut self, scene: &mut S, point: Vec2<F>) -> Option<DragEvent<K>> {
        let view: &S = scene;
        let (index, grab_offset) = self
            .objects
            .iter()
            .enumerate()
            .find_map(|(i, o)| o.hit_test.hit(view, point).map(|offset| (i, offset)))?;

        let id = DragId(index);
        let object = &mut self.objects[index];
        let key = object.key;
        if let Some(callback) = object.on_start_drag.as_mut() {
            callback(scene, key);
        }
        self.active = Some(ActiveDrag { id, key, grab_offset, origin: point });
        log::debug!("drag started on candidate {}", index);
        Some(DragEvent::Started { id, key })
    }

    fn stop(&mut self, scene: &mut S) -> Option<DragEvent<K>> {
        let active = self.active.take()?;
        if let Some(callback) = self.objects[active.id.0].on_stop_drag.as_mut() {
            callback(scene, active.key);
        }
        log::debug!("drag stopped on candidate {}", active.id.0);
        Some(DragEvent::Stopped { id: active.id, key: active.key })
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag<K, F>> {
        self.active.as_ref()
    }

    pub fn active_key(&self) -> Option<K> {
        self.active.map(|a| a.key)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Where the grabbed target's center should go: pointer plus grab offset.
    pub fn drag_position(&self) -> Option<Vec2<F>> {
        self.active.map(|a| self.pointer + a.grab_offset)
    }

    /// Last pointer position seen by [`update`](Self::update).
    pub fn pointer(&self) -> Vec2<F> {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<S, K: Copy, F: Float> Default for DragManager<S, K, F> {
    fn default() -> Self {
        Self::new()
    }
}
