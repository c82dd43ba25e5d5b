//! Robot-style driver for pointer input tests
//!
//! Scripts pointer frames against a [`PointerInputEventProcessor`] the way a
//! platform would deliver them: every frame reports every known pointer, and
//! time advances by a fixed frame interval between frames.
//!
//! # Example
//!
//! ```
//! use presskit_testing::GestureRobot;
//! use presskit_ui::{Rect, Size, TapGestureFilter};
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! let mut robot = GestureRobot::new(Size::new(200.0, 200.0));
//! let button = robot.add_region(Rect::new(10.0, 10.0, 50.0, 20.0));
//!
//! let taps = Rc::new(Cell::new(0));
//! let counter = taps.clone();
//! robot.add_filter(
//!     button,
//!     Rc::new(RefCell::new(TapGestureFilter::new(move || counter.set(counter.get() + 1)))),
//! );
//!
//! robot.click_at(20.0, 15.0);
//! assert_eq!(taps.get(), 1);
//! ```

use std::collections::BTreeMap;

use presskit_foundation::{
    PointerId, PointerInputEvent, PointerInputEventData, PointerInputFilterHandle, ProcessResult,
};
use presskit_ui::{FilterId, PointerInputEventProcessor, RegionId, RegionTree};
use presskit_ui_graphics::{Point, Rect, Size};
use web_time::Duration;

/// Default spacing between scripted frames (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct GestureRobot {
    processor: PointerInputEventProcessor,
    uptime: Duration,
    frame_interval: Duration,
    pointers: BTreeMap<PointerId, PointerInputEventData>,
    last_result: ProcessResult,
}

impl GestureRobot {
    pub fn new(root_size: Size) -> Self {
        Self::with_processor(PointerInputEventProcessor::new(root_size))
    }

    pub fn with_processor(processor: PointerInputEventProcessor) -> Self {
        Self {
            processor,
            uptime: Duration::ZERO,
            frame_interval: FRAME_INTERVAL,
            pointers: BTreeMap::new(),
            last_result: ProcessResult::default(),
        }
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn processor(&self) -> &PointerInputEventProcessor {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut PointerInputEventProcessor {
        &mut self.processor
    }

    pub fn regions(&self) -> &RegionTree {
        self.processor.regions()
    }

    pub fn regions_mut(&mut self) -> &mut RegionTree {
        self.processor.regions_mut()
    }

    pub fn root(&self) -> RegionId {
        self.processor.regions().root()
    }

    /// Adds a region under the root.
    ///
    /// Panics if the tree rejects it; robots are only used in tests.
    pub fn add_region(&mut self, bounds: Rect) -> RegionId {
        let root = self.root();
        self.add_child_region(root, bounds)
    }

    pub fn add_child_region(&mut self, parent: RegionId, bounds: Rect) -> RegionId {
        self.regions_mut()
            .add_region(parent, bounds)
            .unwrap_or_else(|err| panic!("add_region under #{parent} failed: {err}"))
    }

    pub fn add_filter(&mut self, region: RegionId, filter: PointerInputFilterHandle) -> FilterId {
        self.add_filter_with_priority(region, filter, 0)
    }

    pub fn add_filter_with_priority(
        &mut self,
        region: RegionId,
        filter: PointerInputFilterHandle,
        priority: i32,
    ) -> FilterId {
        self.regions_mut()
            .add_filter_with_priority(region, filter, priority)
            .unwrap_or_else(|err| panic!("add_filter on #{region} failed: {err}"))
    }

    pub fn set_bounds(&mut self, region: RegionId, bounds: Rect) {
        self.regions_mut()
            .set_bounds(region, bounds)
            .unwrap_or_else(|err| panic!("set_bounds on #{region} failed: {err}"));
    }

    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn last_result(&self) -> ProcessResult {
        self.last_result
    }

    pub fn is_pointer_down(&self, id: PointerId) -> bool {
        self.pointers.get(&id).is_some_and(|pointer| pointer.down)
    }

    /// Advance frame time without sending a frame.
    pub fn advance_time(&mut self, duration: Duration) {
        self.uptime += duration;
    }

    pub fn pointer_down(&mut self, id: PointerId, x: f32, y: f32) -> ProcessResult {
        self.press_all(&[(id, Point::new(x, y))])
    }

    pub fn pointer_move(&mut self, id: PointerId, x: f32, y: f32) -> ProcessResult {
        self.move_all(&[(id, Point::new(x, y))])
    }

    pub fn pointer_up(&mut self, id: PointerId) -> ProcessResult {
        self.release_all(&[id])
    }

    /// Puts several pointers down in the same frame.
    pub fn press_all(&mut self, pointers: &[(PointerId, Point)]) -> ProcessResult {
        for (id, position) in pointers {
            self.pointers
                .insert(*id, PointerInputEventData::new(*id, *position, true));
        }
        self.send_frame()
    }

    /// Moves several pointers in the same frame. Unknown pointers are
    /// reported as hovering.
    pub fn move_all(&mut self, pointers: &[(PointerId, Point)]) -> ProcessResult {
        for (id, position) in pointers {
            self.pointers
                .entry(*id)
                .and_modify(|pointer| pointer.position = *position)
                .or_insert_with(|| PointerInputEventData::new(*id, *position, false));
        }
        self.send_frame()
    }

    /// Lifts several pointers in the same frame.
    pub fn release_all(&mut self, ids: &[PointerId]) -> ProcessResult {
        for id in ids {
            match self.pointers.get_mut(id) {
                Some(pointer) => pointer.down = false,
                None => log::warn!("robot asked to release unknown pointer {id}"),
            }
        }
        self.send_frame()
    }

    /// Stops reporting a pointer without lifting it, as when a device is
    /// unplugged or the platform drops a touch.
    pub fn lose_pointer(&mut self, id: PointerId) -> ProcessResult {
        if self.pointers.remove(&id).is_none() {
            log::warn!("robot asked to lose unknown pointer {id}");
        }
        self.send_frame()
    }

    /// Sends a frame where nothing changed, e.g. to let filters observe
    /// region changes.
    pub fn idle_frame(&mut self) -> ProcessResult {
        self.send_frame()
    }

    pub fn click_at(&mut self, x: f32, y: f32) -> ProcessResult {
        self.pointer_down(0, x, y);
        self.pointer_up(0)
    }

    /// Press at `from`, move in `steps` equal increments to `to`, release.
    pub fn drag(&mut self, from: Point, to: Point, steps: u32) -> ProcessResult {
        self.pointer_down(0, from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.pointer_move(0, from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        }
        self.pointer_up(0)
    }

    /// Simulates the platform cancelling the pointer stream.
    pub fn cancel(&mut self) {
        self.pointers.clear();
        self.processor.process_cancel();
    }

    fn send_frame(&mut self) -> ProcessResult {
        self.uptime += self.frame_interval;
        let event = PointerInputEvent::new(self.uptime, self.pointers.values().cloned().collect());
        self.last_result = self.processor.process(event);
        self.pointers.retain(|_, pointer| pointer.down);
        self.last_result
    }
}
