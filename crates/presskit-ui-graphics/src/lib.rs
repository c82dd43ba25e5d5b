//! Pure geometry for Presskit
//!
//! Points, sizes and rectangles shared by the pointer input crates. Positions
//! are logical pixels; region bounds are half-open.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
