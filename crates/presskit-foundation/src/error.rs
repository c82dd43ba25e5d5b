//! Setup-time errors for gesture filters.
//!
//! Dispatch itself never fails; these only surface while a filter is being
//! configured by its owner.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("tap gesture filter requires an on_tap callback")]
    MissingTapCallback,
}
