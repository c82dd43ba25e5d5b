pub mod consumption;
pub mod filter;
pub mod gestures;
pub mod types;

pub use types::{
    ChangeBatch, ConsumedData, PointerEventPass, PointerId, PointerInputChange, PointerInputData,
    TraversalDirection,
};

pub mod prelude {
    pub use super::consumption::*;
    pub use super::filter::{PointerInputFilter, PointerInputFilterHandle};
    pub use super::types::{
        ChangeBatch, ConsumedData, PointerEventPass, PointerId, PointerInputChange,
        PointerInputData, TraversalDirection,
    };
}
