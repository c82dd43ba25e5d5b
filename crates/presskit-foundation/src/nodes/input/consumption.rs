//! Batch-level predicates and consumption helpers used by gesture filters.

use presskit_ui_graphics::Size;

use super::types::{ChangeBatch, PointerInputChange};

/// True if any pointer's current position lies within `bounds`.
pub fn any_pointer_in_bounds(changes: &[PointerInputChange], bounds: Size) -> bool {
    changes
        .iter()
        .any(|change| bounds.contains(change.current.position))
}

/// True if every pointer's current position lies within `bounds`.
pub fn all_pointers_in_bounds(changes: &[PointerInputChange], bounds: Size) -> bool {
    changes
        .iter()
        .all(|change| bounds.contains(change.current.position))
}

/// Non-empty batch where every pointer went down and nobody claimed it.
pub fn all_changed_to_down(changes: &[PointerInputChange]) -> bool {
    !changes.is_empty() && changes.iter().all(PointerInputChange::changed_to_down)
}

/// Non-empty batch where every pointer went up and nobody claimed it.
pub fn all_changed_to_up(changes: &[PointerInputChange]) -> bool {
    !changes.is_empty() && changes.iter().all(PointerInputChange::changed_to_up)
}

pub fn all_changed_to_up_ignore_consumed(changes: &[PointerInputChange]) -> bool {
    !changes.is_empty()
        && changes
            .iter()
            .all(PointerInputChange::changed_to_up_ignore_consumed)
}

pub fn any_down_change_consumed(changes: &[PointerInputChange]) -> bool {
    changes.iter().any(|change| change.consumed.down_change)
}

pub fn any_position_change_consumed(changes: &[PointerInputChange]) -> bool {
    changes
        .iter()
        .any(PointerInputChange::any_position_change_consumed)
}

pub fn consume_down_changes(changes: ChangeBatch) -> ChangeBatch {
    changes
        .into_iter()
        .map(PointerInputChange::consume_down_change)
        .collect()
}

pub fn consume_all_position_changes(changes: ChangeBatch) -> ChangeBatch {
    changes
        .into_iter()
        .map(PointerInputChange::consume_all_position_change)
        .collect()
}
