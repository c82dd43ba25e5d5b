//! Region tree and multi-pass pointer dispatch for Presskit
//!
//! [`PointerInputEventProcessor`] turns raw platform frames into pointer
//! changes, hit tests new contacts against the [`RegionTree`], and drives
//! every filter on the hit paths through all [`PointerEventPass`]es.

pub mod error;
pub mod input;
pub mod region;

pub use error::RegionTreeError;
pub use input::hit_path_tracker::HitPathTracker;
pub use input::pointer_input_event_processor::{
    PointerInputChangeEventProducer, PointerInputEventProcessor,
};
pub use presskit_foundation::{
    ChangeBatch, ClaimPolicy, GestureError, PointerEventPass, PointerId, PointerInputChange,
    PointerInputEvent, PointerInputEventData, PointerInputFilter, PointerInputFilterHandle,
    PressIndicatorCallbacks, PressIndicatorConfig, PressIndicatorGestureFilter, ProcessResult,
    TapGestureConfig, TapGestureFilter,
};
pub use presskit_ui_graphics::{Point, Rect, Size};
pub use region::{FilterId, RegionId, RegionTree};

pub mod prelude {
    pub use crate::input::pointer_input_event_processor::PointerInputEventProcessor;
    pub use crate::region::{FilterId, RegionId, RegionTree};
    pub use presskit_foundation::prelude::*;
}
