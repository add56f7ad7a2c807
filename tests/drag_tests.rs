use pretty_assertions::assert_eq;
use tactile::drag::{Circle, DragEvent, DragManager, DragObject, HitTest};
use tactile::Vec2;

#[derive(Default)]
struct Scene {
    a: Vec2<f32>,
    b: Vec2<f32>,
    started: Vec<&'static str>,
    stopped: Vec<&'static str>,
    blocked: bool,
}

fn scene() -> Scene {
    Scene {
        a: Vec2::new(100.0, 100.0),
        b: Vec2::new(120.0, 100.0),
        ..Scene::default()
    }
}

fn logged(key: &'static str, hit: HitTest<Scene, f32>) -> DragObject<Scene, &'static str, f32> {
    DragObject::new(key, hit)
        .on_start_drag(|s: &mut Scene, k| s.started.push(k))
        .on_stop_drag(|s: &mut Scene, k| s.stopped.push(k))
}

#[test]
fn press_drag_release() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    let id = drags.create_drag_object(logged(
        "a",
        HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0)),
    ));

    assert_eq!(
        drags.update(&mut scene, 120.0, 100.0, true),
        Some(DragEvent::Started { id, key: "a" })
    );
    assert_eq!(drags.active_key(), Some("a"));

    assert_eq!(drags.update(&mut scene, 500.0, 500.0, true), None);
    assert!(drags.is_dragging(), "leaving the circle keeps the drag");

    assert_eq!(
        drags.update(&mut scene, 500.0, 500.0, false),
        Some(DragEvent::Stopped { id, key: "a" })
    );
    assert!(!drags.is_dragging());
    assert_eq!(scene.started, vec!["a"]);
    assert_eq!(scene.stopped, vec!["a"]);
}

#[test]
fn press_outside_everything_starts_nothing() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));

    assert_eq!(drags.update(&mut scene, 400.0, 400.0, true), None);
    // Sliding into the target while held does not start a drag.
    assert_eq!(drags.update(&mut scene, 100.0, 100.0, true), None);
    assert_eq!(drags.update(&mut scene, 100.0, 100.0, false), None);
    assert!(scene.started.is_empty());
    assert!(scene.stopped.is_empty());
}

#[test]
fn first_registered_wins_overlap() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    let a = drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));
    drags.create_drag_object(logged("b", HitTest::radius(|s: &Scene| Circle::new(s.b, 50.0))));

    // (115, 100) is inside both circles and closer to B.
    assert_eq!(
        drags.update(&mut scene, 115.0, 100.0, true),
        Some(DragEvent::Started { id: a, key: "a" })
    );
    drags.update(&mut scene, 115.0, 100.0, false);
    assert_eq!(scene.started, vec!["a"]);
    assert_eq!(scene.stopped, vec!["a"]);
}

#[test]
fn only_one_drag_at_a_time() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));
    drags.create_drag_object(logged("b", HitTest::radius(|s: &Scene| Circle::new(s.b, 50.0))));

    drags.update(&mut scene, 100.0, 100.0, true);
    for _ in 0..5 {
        drags.update(&mut scene, 120.0, 100.0, true);
    }
    assert_eq!(drags.active_key(), Some("a"));
    assert_eq!(scene.started.len(), 1);
}

#[test]
fn predicate_can_veto_a_hit() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    let b = drags.create_drag_object(logged(
        "b",
        HitTest::predicate(|s: &Scene, p: Vec2<f32>| !s.blocked && Circle::new(s.b, 50.0).contains(p)),
    ));

    scene.blocked = true;
    assert_eq!(drags.update(&mut scene, 120.0, 100.0, true), None);
    drags.update(&mut scene, 120.0, 100.0, false);

    scene.blocked = false;
    assert_eq!(
        drags.update(&mut scene, 120.0, 100.0, true),
        Some(DragEvent::Started { id: b, key: "b" })
    );
}

#[test]
fn vetoed_candidate_falls_through_to_the_next() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(logged("a", HitTest::predicate(|_: &Scene, _| false)));
    let b = drags.create_drag_object(logged("b", HitTest::radius(|s: &Scene| Circle::new(s.b, 50.0))));

    assert_eq!(
        drags.update(&mut scene, 120.0, 100.0, true),
        Some(DragEvent::Started { id: b, key: "b" })
    );
}

#[test]
fn rim_counts_as_a_hit() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));
    assert!(drags.update(&mut scene, 150.0, 100.0, true).is_some());
}

#[test]
fn grab_offset_keeps_the_target_under_the_finger() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));

    drags.update(&mut scene, 110.0, 90.0, true);
    let active = drags.active_drag().copied().unwrap();
    assert_eq!(active.grab_offset, Vec2::new(-10.0, 10.0));
    assert_eq!(active.origin, Vec2::new(110.0, 90.0));

    drags.update(&mut scene, 210.0, 190.0, true);
    assert_eq!(drags.drag_position(), Some(Vec2::new(200.0, 200.0)));
    assert_eq!(drags.pointer(), Vec2::new(210.0, 190.0));

    drags.update(&mut scene, 210.0, 190.0, false);
    assert_eq!(drags.drag_position(), None);
}

#[test]
fn callbacks_can_move_the_target() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    drags.create_drag_object(
        DragObject::new("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0)))
            .on_stop_drag(|s: &mut Scene, _| s.a = Vec2::new(0.0, 0.0)),
    );

    drags.update(&mut scene, 100.0, 100.0, true);
    drags.update(&mut scene, 100.0, 100.0, false);
    assert_eq!(scene.a, Vec2::new(0.0, 0.0));

    // The hit test reads the moved state.
    assert_eq!(drags.update(&mut scene, 100.0, 100.0, true), None);
}

#[test]
fn cancel_ends_the_drag_once() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    let id = drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));

    drags.update(&mut scene, 100.0, 100.0, true);
    assert_eq!(drags.cancel(&mut scene), Some(DragEvent::Stopped { id, key: "a" }));
    assert_eq!(drags.cancel(&mut scene), None);
    // The release after a cancel is not a second stop.
    assert_eq!(drags.update(&mut scene, 100.0, 100.0, false), None);
    assert_eq!(scene.stopped, vec!["a"]);
}

#[test]
fn held_pointer_does_not_regrab_after_cancel() {
    let mut scene = scene();
    let mut drags = DragManager::new();
    let id = drags.create_drag_object(logged("a", HitTest::radius(|s: &Scene| Circle::new(s.a, 50.0))));

    drags.update(&mut scene, 100.0, 100.0, true);
    drags.cancel(&mut scene);
    for _ in 0..3 {
        assert_eq!(drags.update(&mut scene, 100.0, 100.0, true), None);
    }
    assert!(!drags.is_dragging());

    assert_eq!(drags.update(&mut scene, 100.0, 100.0, false), None);
    assert_eq!(
        drags.update(&mut scene, 100.0, 100.0, true),
        Some(DragEvent::Started { id, key: "a" })
    );
    assert_eq!(scene.started, vec!["a", "a"]);
}

#[test]
fn objects_without_callbacks_still_report_events() {
    let mut scene = scene();
    let mut drags: DragManager<Scene, usize, f32> = DragManager::default();
    assert!(drags.is_empty());
    let id = drags.create_drag_object(DragObject::new(
        7,
        HitTest::radius(|s: &Scene| Circle::new(s.a, 10.0)),
    ));
    assert_eq!(drags.len(), 1);
    assert_eq!(id.index(), 0);
    assert_eq!(
        drags.update(&mut scene, 100.0, 100.0, true),
        Some(DragEvent::Started { id, key: 7 })
    );
}
