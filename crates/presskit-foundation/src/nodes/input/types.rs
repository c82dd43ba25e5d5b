use presskit_ui_graphics::Point;
use smallvec::SmallVec;
use web_time::Duration;

pub type PointerId = u64;

/// Changes delivered to a single filter for one pass.
///
/// Most frames carry one or two pointers, so the batch stays inline.
pub type ChangeBatch = SmallVec<[PointerInputChange; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    Mouse,
    Touch,
    Stylus,
    #[default]
    Unknown,
}

/// Snapshot of one pointer at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerInputData {
    pub uptime: Duration,
    pub position: Point,
    pub down: bool,
}

impl PointerInputData {
    pub const fn new(uptime: Duration, position: Point, down: bool) -> Self {
        Self {
            uptime,
            position,
            down,
        }
    }
}

/// What has already been claimed from a change by some filter.
///
/// `position_change` is the consumed part of the movement; anything non-zero
/// means distance was consumed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ConsumedData {
    pub position_change: Point,
    pub down_change: bool,
}

/// Describes a change in a pointer between the previous frame and this one.
///
/// Changes are plain values. A filter takes ownership of its batch and gives
/// it back, so consumption travels with the data instead of through shared
/// cells.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInputChange {
    pub id: PointerId,
    pub type_: PointerType,
    pub current: PointerInputData,
    pub previous: PointerInputData,
    pub consumed: ConsumedData,
}

impl PointerInputChange {
    /// A pointer that just touched down at `position`.
    pub fn down(id: PointerId, uptime: Duration, position: Point) -> Self {
        Self {
            id,
            type_: PointerType::Unknown,
            current: PointerInputData::new(uptime, position, true),
            previous: PointerInputData::new(uptime, position, false),
            consumed: ConsumedData::default(),
        }
    }

    /// The change for the following frame, with fresh consumption.
    pub fn next(&self, uptime: Duration, position: Point, down: bool) -> Self {
        Self {
            id: self.id,
            type_: self.type_,
            current: PointerInputData::new(uptime, position, down),
            previous: self.current,
            consumed: ConsumedData::default(),
        }
    }

    pub fn moved_to(&self, uptime: Duration, position: Point) -> Self {
        self.next(uptime, position, self.current.down)
    }

    pub fn released(&self, uptime: Duration) -> Self {
        self.next(uptime, self.current.position, false)
    }

    pub fn changed_to_down(&self) -> bool {
        !self.consumed.down_change && self.changed_to_down_ignore_consumed()
    }

    pub fn changed_to_down_ignore_consumed(&self) -> bool {
        !self.previous.down && self.current.down
    }

    pub fn changed_to_up(&self) -> bool {
        !self.consumed.down_change && self.changed_to_up_ignore_consumed()
    }

    pub fn changed_to_up_ignore_consumed(&self) -> bool {
        self.previous.down && !self.current.down
    }

    /// Movement since the previous frame that nobody has consumed yet.
    pub fn position_change(&self) -> Point {
        self.position_change_ignore_consumed() - self.consumed.position_change
    }

    pub fn position_change_ignore_consumed(&self) -> Point {
        self.current.position - self.previous.position
    }

    pub fn position_changed(&self) -> bool {
        !self.position_change().is_zero()
    }

    pub fn position_changed_ignore_consumed(&self) -> bool {
        !self.position_change_ignore_consumed().is_zero()
    }

    pub fn any_position_change_consumed(&self) -> bool {
        !self.consumed.position_change.is_zero()
    }

    pub fn consume_down_change(mut self) -> Self {
        self.consumed.down_change = true;
        self
    }

    pub fn consume_position_change(mut self, dx: f32, dy: f32) -> Self {
        self.consumed.position_change += Point::new(dx, dy);
        self
    }

    /// Consumes whatever movement is still unclaimed.
    pub fn consume_all_position_change(self) -> Self {
        let remaining = self.position_change();
        self.consume_position_change(remaining.x, remaining.y)
    }

    /// Shifts both positions by `-offset`, moving the change into the
    /// coordinate space of a region whose origin is at `offset`.
    pub fn translated(mut self, offset: Point) -> Self {
        self.current.position -= offset;
        self.previous.position -= offset;
        self
    }
}

/// Order in which a pass visits the regions on a hit path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    /// Ancestors before descendants.
    Down,
    /// Descendants before ancestors.
    Up,
}

/// One phase of the per-frame dispatch.
///
/// The declaration order is the dispatch order; `Ord` follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointerEventPass {
    InitialDown,
    PreUp,
    PreDown,
    PostUp,
    PostDown,
}

impl PointerEventPass {
    pub const ALL: [PointerEventPass; 5] = [
        PointerEventPass::InitialDown,
        PointerEventPass::PreUp,
        PointerEventPass::PreDown,
        PointerEventPass::PostUp,
        PointerEventPass::PostDown,
    ];

    pub fn direction(self) -> TraversalDirection {
        match self {
            PointerEventPass::InitialDown
            | PointerEventPass::PreDown
            | PointerEventPass::PostDown => TraversalDirection::Down,
            PointerEventPass::PreUp | PointerEventPass::PostUp => TraversalDirection::Up,
        }
    }

    pub fn next(self) -> Option<PointerEventPass> {
        match self {
            PointerEventPass::InitialDown => Some(PointerEventPass::PreUp),
            PointerEventPass::PreUp => Some(PointerEventPass::PreDown),
            PointerEventPass::PreDown => Some(PointerEventPass::PostUp),
            PointerEventPass::PostUp => Some(PointerEventPass::PostDown),
            PointerEventPass::PostDown => None,
        }
    }
}

/// Data that describes a particular pointer as reported by the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInputEventData {
    pub id: PointerId,
    pub position: Point,
    pub down: bool,
    pub type_: PointerType,
}

impl PointerInputEventData {
    pub fn new(id: PointerId, position: Point, down: bool) -> Self {
        Self {
            id,
            position,
            down,
            type_: PointerType::Unknown,
        }
    }
}

/// Raw platform frame: every pointer the platform currently knows about.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInputEvent {
    pub uptime: Duration,
    pub pointers: Vec<PointerInputEventData>,
}

impl PointerInputEvent {
    pub fn new(uptime: Duration, pointers: Vec<PointerInputEventData>) -> Self {
        Self { uptime, pointers }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProcessResult {
    pub dispatched_to_a_pointer_input_filter: bool,
    pub any_movement_consumed: bool,
    pub any_change_consumed: bool,
}

impl ProcessResult {
    pub const fn new(dispatched: bool, movement_consumed: bool, change_consumed: bool) -> Self {
        Self {
            dispatched_to_a_pointer_input_filter: dispatched,
            any_movement_consumed: movement_consumed,
            any_change_consumed: change_consumed,
        }
    }
}
