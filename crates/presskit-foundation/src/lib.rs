//! Pointer change model and gesture filters for Presskit
//!
//! Gesture filters receive batches of [`PointerInputChange`]s once per
//! [`PointerEventPass`] and hand the batch back with updated consumption.
//! The dispatcher that drives them lives in `presskit-ui`.

pub mod error;
pub mod nodes;

pub use error::GestureError;
pub use nodes::input::consumption::*;
pub use nodes::input::filter::{PointerInputFilter, PointerInputFilterHandle};
pub use nodes::input::gestures::{
    ClaimPolicy, PressIndicatorCallbacks, PressIndicatorConfig, PressIndicatorGestureFilter,
    TapGestureBuilder, TapGestureConfig, TapGestureFilter,
};
pub use nodes::input::types::{
    ChangeBatch, ConsumedData, PointerEventPass, PointerId, PointerInputChange, PointerInputData,
    PointerInputEvent, PointerInputEventData, PointerType, ProcessResult, TraversalDirection,
};
pub use presskit_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::nodes::input::filter::PointerInputFilter;
    pub use crate::nodes::input::gestures::{
        PressIndicatorCallbacks, PressIndicatorGestureFilter, TapGestureFilter,
    };
    pub use crate::nodes::input::types::{
        ChangeBatch, PointerEventPass, PointerId, PointerInputChange,
    };
}
