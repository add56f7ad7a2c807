use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use tactile::math::{delta_angle_deg, deg_to_rad, map_range};
use tactile::{
    BodyOptions, Bounds, ChainId, Circle, ConstraintChain, DragManager, DragObject, Frame,
    FrameHost, HitTest, HostConfig, LinkOptions, PointerEvent, SolverConfig, Spring,
    SpringSettings, Vec2, VerletPhysics, Viewport,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

fn js_error(error: impl Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Host plus the client-to-canvas mapping every sketch shares.
struct Page {
    host: FrameHost<f32>,
    viewport: Viewport<f32>,
}

impl Page {
    fn new(width: f32, height: f32) -> Self {
        Page {
            host: FrameHost::new(HostConfig::default()),
            viewport: Viewport::identity(Vec2::new(width, height)),
        }
    }

    fn set_viewport(&mut self, left: f32, top: f32, display_width: f32, display_height: f32) {
        self.viewport.origin = Vec2::new(left, top);
        self.viewport.display_size = Vec2::new(display_width, display_height);
    }

    fn pointer(&mut self, kind: fn(f32, f32) -> PointerEvent<f32>, client_x: f32, client_y: f32) {
        let p = self.viewport.to_canvas(Vec2::new(client_x, client_y));
        self.host.push_pointer(kind(p.x, p.y));
    }
}

fn down(x: f32, y: f32) -> PointerEvent<f32> {
    PointerEvent::Down { x, y }
}

fn moved(x: f32, y: f32) -> PointerEvent<f32> {
    PointerEvent::Move { x, y }
}

fn up(x: f32, y: f32) -> PointerEvent<f32> {
    PointerEvent::Up { x, y }
}

// ---- Punching Bag ----

const CHAIN_LENGTH: f32 = 600.0;
const CHAIN_OFFSET_X: f32 = 40.0;
const LINK_LENGTH: f32 = 40.0;
const BAG_SIZE: Vec2<f32> = Vec2 { x: 500.0, y: 1000.0 };

/// What a drag grabbed.
#[derive(Copy, Clone, Debug, PartialEq)]
enum BagTarget {
    Link(usize),
    Bag,
}

struct BagScene {
    physics: VerletPhysics<f32>,
    chain: ChainId,
    /// Center of the bag rectangle; hangs from the last body unless dragged.
    bag_center: Vec2<f32>,
    bag_dragging: bool,
    floor: f32,
}

impl BagScene {
    fn chain(&self) -> &ConstraintChain<f32> {
        self.physics.chain(self.chain)
    }

    fn chain_mut(&mut self) -> &mut ConstraintChain<f32> {
        self.physics.chain_mut(self.chain)
    }

    fn bag_contains(&self, p: Vec2<f32>) -> bool {
        let half = BAG_SIZE.scale(0.5);
        let min = self.bag_center - half;
        let max = self.bag_center + half;
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

struct PunchingBag {
    scene: BagScene,
    drags: DragManager<BagScene, BagTarget, f32>,
}

impl PunchingBag {
    fn new(width: f32, height: f32) -> Result<Self, JsValue> {
        let segments = ((CHAIN_LENGTH / LINK_LENGTH).round() as usize).max(2);
        let start = Vec2::new(width / 2.0, 0.0);
        let end = start + Vec2::new(CHAIN_OFFSET_X, CHAIN_LENGTH);

        let mut physics = VerletPhysics::new(SolverConfig::new().with_gravity_y(2000.0));
        let chain = physics
            .create_chain(
                start,
                end,
                segments,
                LinkOptions { stiffness: 1.0 },
                BodyOptions { radius: 50.0, drag: 0.1 },
            )
            .map_err(js_error)?;
        physics.chain_mut(chain).pin(0);

        let mut scene = BagScene {
            physics,
            chain,
            bag_center: Vec2::zero(),
            bag_dragging: false,
            floor: height,
        };
        scene.bag_center = scene.chain().last().position + Vec2::new(0.0, BAG_SIZE.y / 2.0);

        let mut drags = DragManager::new();
        for i in 0..segments {
            drags.create_drag_object(
                DragObject::new(
                    BagTarget::Link(i),
                    HitTest::radius(move |s: &BagScene| {
                        let body = s.chain().body(i);
                        Circle::new(body.position, body.radius)
                    }),
                )
                .on_start_drag(|s: &mut BagScene, target| {
                    if let BagTarget::Link(i) = target {
                        s.chain_mut().grab(i);
                    }
                })
                .on_stop_drag(|s: &mut BagScene, target| {
                    if let BagTarget::Link(i) = target {
                        // The anchor stays pinned after being dragged.
                        if i != 0 {
                            s.chain_mut().release(i);
                        }
                    }
                }),
            );
        }
        drags.create_drag_object(
            DragObject::new(BagTarget::Bag, HitTest::predicate(|s: &BagScene, p| s.bag_contains(p)))
                .on_start_drag(|s: &mut BagScene, _| {
                    s.bag_dragging = true;
                    let last = s.chain().last_index();
                    s.chain_mut().grab(last);
                })
                .on_stop_drag(|s: &mut BagScene, _| {
                    s.bag_dragging = false;
                    let last = s.chain().last_index();
                    s.chain_mut().release(last);
                }),
        );

        Ok(PunchingBag { scene, drags })
    }

    fn update(&mut self, frame: &Frame<'_, f32>) {
        let scene = &mut self.scene;
        scene.physics.set_bounds(Bounds::bottom(scene.floor));

        // Hit tests must see the bag where it is drawn.
        if !scene.bag_dragging {
            scene.bag_center = scene.chain().last().position + Vec2::new(0.0, BAG_SIZE.y / 2.0);
        }

        let pointer = frame.pointer;
        self.drags.update(scene, pointer.x, pointer.y, pointer.pressed);

        if let (Some(target), Some(position)) = (self.drags.active_key(), self.drags.drag_position()) {
            match target {
                BagTarget::Link(i) => scene.chain_mut().drag_to(i, position),
                BagTarget::Bag => {
                    scene.bag_center = position;
                    let last = scene.chain().last_index();
                    let anchor = position - Vec2::new(0.0, BAG_SIZE.y / 2.0);
                    scene.chain_mut().drag_to(last, anchor);
                }
            }
        }

        scene.physics.update(frame.dt);
    }
}

#[wasm_bindgen]
pub struct PunchingBagDemo {
    page: Page,
    sketch: Rc<RefCell<PunchingBag>>,
}

#[wasm_bindgen]
impl PunchingBagDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<PunchingBagDemo, JsValue> {
        let sketch = Rc::new(RefCell::new(PunchingBag::new(width, height)?));
        let mut page = Page::new(width, height);
        let running = sketch.clone();
        page.host
            .run(move |frame| running.borrow_mut().update(frame))
            .map_err(js_error)?;
        Ok(PunchingBagDemo { page, sketch })
    }

    /// Call from `requestAnimationFrame` with its timestamp in milliseconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        self.page.host.tick(timestamp_ms / 1000.0)
    }

    pub fn set_viewport(&mut self, left: f32, top: f32, display_width: f32, display_height: f32) {
        self.page.set_viewport(left, top, display_width, display_height);
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(down, client_x, client_y);
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(moved, client_x, client_y);
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(up, client_x, client_y);
    }

    pub fn pointer_cancel(&mut self) {
        self.page.host.push_pointer(PointerEvent::Cancel);
    }

    /// Returns flat [x0, y0, x1, y1, ...] chain positions
    pub fn positions(&self) -> Vec<f32> {
        let sketch = self.sketch.borrow();
        let mut out = Vec::with_capacity(sketch.scene.chain().len() * 2);
        for p in sketch.scene.chain().positions() {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Returns [x, y, width, height]; the top edge hangs from the last body.
    pub fn bag_rect(&self) -> Vec<f32> {
        let sketch = self.sketch.borrow();
        let anchor = sketch.scene.chain().last().position;
        vec![anchor.x - BAG_SIZE.x / 2.0, anchor.y, BAG_SIZE.x, BAG_SIZE.y]
    }
}

// ---- Spinning Grid ----

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    WaitingForInput,
    Interactive,
    Falling,
    Finished,
}

/// What the stage machine looks at each frame.
#[derive(Copy, Clone, Debug, Default)]
struct StageInput {
    has_started: bool,
    upright: bool,
    fallen: bool,
}

fn transition(stage: Stage, input: StageInput) -> Stage {
    match stage {
        Stage::WaitingForInput if input.has_started => Stage::Interactive,
        Stage::Interactive if input.upright => Stage::Falling,
        Stage::Falling if input.fallen => Stage::Finished,
        stage => stage,
    }
}

const FALL_DRAG: f32 = 0.1;
const SPIN_FORCE: f32 = 200.0;

struct SpinningGrid {
    size: Vec2<f32>,
    stage: Stage,
    y: Spring<f32>,
    scale: Spring<f32>,
    rotation: Spring<f32>,
    start_x: f32,
    fall_position: f32,
    fall_velocity: f32,
}

impl SpinningGrid {
    fn new(width: f32, height: f32) -> Result<Self, JsValue> {
        let slide = SpringSettings::new(1.5, 0.05).map_err(js_error)?;
        let pop = SpringSettings::new(1.5, 0.1).map_err(js_error)?;
        let spin = SpringSettings::new(0.5, 0.805)
            .and_then(|s| s.with_wrap(360.0))
            .map_err(js_error)?;
        Ok(SpinningGrid {
            size: Vec2::new(width, height),
            stage: Stage::WaitingForInput,
            y: Spring::new(-height, 0.0, slide),
            scale: Spring::at_rest(1.0, pop),
            rotation: Spring::at_rest(180.0, spin),
            start_x: 0.0,
            fall_position: 0.0,
            fall_velocity: 0.0,
        })
    }

    fn update(&mut self, frame: &Frame<'_, f32>) {
        let dt = frame.dt;
        self.y.step(dt);
        self.scale.step(dt);

        match self.stage {
            Stage::Interactive => {
                let offset = frame.pointer.x - self.start_x;
                let target = map_range(offset, 0.0, self.size.x, 0.0, 360.0) + 180.0;
                self.rotation.set_target(target);
                self.rotation.step(dt);
            }
            Stage::Falling => {
                // Ballistic: keep spinning the way it was going while the grid drops.
                let v = self.rotation.velocity();
                let push = if v > 0.0 {
                    SPIN_FORCE
                } else if v < 0.0 {
                    -SPIN_FORCE
                } else {
                    0.0
                };
                let v = (v + push * dt) * (-dt * FALL_DRAG).exp();
                self.rotation.set_velocity(v);
                self.rotation.set_position(self.rotation.position() + v * dt);

                self.fall_velocity += self.size.y * 3.0 * dt;
                self.fall_position += self.fall_velocity * dt;
            }
            Stage::WaitingForInput | Stage::Finished => {}
        }

        let input = StageInput {
            has_started: frame.pointer.has_started,
            upright: delta_angle_deg(self.rotation.position(), 0.0).abs() < 5.0
                && self.rotation.velocity().abs() < 10.0,
            fallen: self.fall_position > self.size.y,
        };
        let next = transition(self.stage, input);
        if next == self.stage {
            return;
        }
        log::debug!("spinning grid: {:?} -> {:?}", self.stage, next);
        self.stage = next;
        match next {
            Stage::Interactive => self.start_x = frame.pointer.x,
            Stage::Falling => self.scale.set_target(1.2),
            Stage::Finished => frame.finish(),
            Stage::WaitingForInput => {}
        }
    }
}

#[wasm_bindgen]
pub struct SpinningGridDemo {
    page: Page,
    sketch: Rc<RefCell<SpinningGrid>>,
    finished: Rc<RefCell<bool>>,
}

#[wasm_bindgen]
impl SpinningGridDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<SpinningGridDemo, JsValue> {
        let sketch = Rc::new(RefCell::new(SpinningGrid::new(width, height)?));
        let finished = Rc::new(RefCell::new(false));
        let mut page = Page::new(width, height);

        let flag = finished.clone();
        page.host.on_finish(move || *flag.borrow_mut() = true);
        let running = sketch.clone();
        page.host
            .run(move |frame| running.borrow_mut().update(frame))
            .map_err(js_error)?;
        Ok(SpinningGridDemo { page, sketch, finished })
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        self.page.host.tick(timestamp_ms / 1000.0)
    }

    pub fn set_viewport(&mut self, left: f32, top: f32, display_width: f32, display_height: f32) {
        self.page.set_viewport(left, top, display_width, display_height);
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(down, client_x, client_y);
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(moved, client_x, client_y);
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) {
        self.page.pointer(up, client_x, client_y);
    }

    /// Returns [y_offset, scale, rotation_rad, fall_offset], ready for `ctx.rotate`
    pub fn transform(&self) -> Vec<f32> {
        let grid = self.sketch.borrow();
        vec![
            grid.y.position(),
            grid.scale.position(),
            deg_to_rad(grid.rotation.position()),
            grid.fall_position,
        ]
    }

    pub fn stage(&self) -> String {
        format!("{:?}", self.sketch.borrow().stage)
    }

    /// Set once the grid has dropped off the canvas; the page navigates on.
    pub fn is_finished(&self) -> bool {
        *self.finished.borrow()
    }
}
