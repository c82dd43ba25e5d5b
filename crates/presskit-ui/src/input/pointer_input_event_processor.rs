use std::collections::HashMap;

use presskit_foundation::{
    ConsumedData, PointerId, PointerInputChange, PointerInputData, PointerInputEvent,
    PointerInputFilterHandle, ProcessResult,
};
use presskit_ui_graphics::Size;

use crate::error::RegionTreeError;
use crate::input::hit_path_tracker::HitPathTracker;
use crate::region::{FilterId, RegionId, RegionTree};

/// Orchestrates pointer input processing for one region tree.
pub struct PointerInputEventProcessor {
    regions: RegionTree,
    hit_path_tracker: HitPathTracker,
    pointer_input_change_event_producer: PointerInputChangeEventProducer,
}

impl PointerInputEventProcessor {
    pub fn new(root_size: Size) -> Self {
        Self::with_regions(RegionTree::new(root_size))
    }

    pub fn with_regions(regions: RegionTree) -> Self {
        Self {
            regions,
            hit_path_tracker: HitPathTracker::new(),
            pointer_input_change_event_producer: PointerInputChangeEventProducer::new(),
        }
    }

    pub fn regions(&self) -> &RegionTree {
        &self.regions
    }

    /// Regions may be reshaped freely between frames; pointers keep the hit
    /// paths they went down with. Removal goes through
    /// [`remove_region`](Self::remove_region) and
    /// [`remove_filter`](Self::remove_filter) so active gestures are cancelled.
    pub fn regions_mut(&mut self) -> &mut RegionTree {
        &mut self.regions
    }

    /// Removes a region subtree and cancels its filters.
    pub fn remove_region(&mut self, id: RegionId) -> Result<(), RegionTreeError> {
        let removed = self.regions.remove_region(id)?;
        self.hit_path_tracker.remove_region(id);
        cancel_all(&removed);
        Ok(())
    }

    /// Detaches one filter from a region and cancels it.
    pub fn remove_filter(
        &mut self,
        region: RegionId,
        filter: FilterId,
    ) -> Result<PointerInputFilterHandle, RegionTreeError> {
        let removed = self.regions.remove_filter(region, filter)?;
        cancel_all(std::slice::from_ref(&removed));
        Ok(removed)
    }

    pub fn process(&mut self, event: PointerInputEvent) -> ProcessResult {
        let mut changes = self.pointer_input_change_event_producer.produce(&event);

        // Pointer order decides batch order, so hit test new contacts by id.
        let mut new_contacts: Vec<&PointerInputChange> = changes
            .values()
            .filter(|change| change.changed_to_down_ignore_consumed())
            .collect();
        new_contacts.sort_by_key(|change| change.id);
        for change in new_contacts {
            let path = self.regions.hit_test(change.current.position);
            log::debug!(
                "pointer {} down at ({}, {}) hit {} region(s)",
                change.id,
                change.current.position.x,
                change.current.position.y,
                path.len()
            );
            if !path.is_empty() {
                self.hit_path_tracker.add_hit_path(change.id, &path);
            }
        }

        let dispatched = self
            .hit_path_tracker
            .dispatch_changes(&mut changes, &self.regions);

        let any_movement_consumed = changes
            .values()
            .any(PointerInputChange::any_position_change_consumed);
        let any_change_consumed = any_movement_consumed
            || changes.values().any(|change| change.consumed.down_change);

        for region in self.hit_path_tracker.cleanup_hits(&changes) {
            log::debug!("region #{region} lost a pointer that never went up");
            let filters: Vec<PointerInputFilterHandle> =
                self.regions.filters(region).cloned().collect();
            cancel_all(&filters);
        }

        ProcessResult::new(dispatched, any_movement_consumed, any_change_consumed)
    }

    /// The platform abandoned the pointer stream: every filter on a tracked
    /// path is cancelled and all pointer history is dropped.
    pub fn process_cancel(&mut self) {
        let tracked = self.hit_path_tracker.tracked_regions();
        log::debug!("cancelling pointer input on {} region(s)", tracked.len());
        for region in tracked {
            let filters: Vec<PointerInputFilterHandle> =
                self.regions.filters(region).cloned().collect();
            cancel_all(&filters);
        }
        self.hit_path_tracker.clear();
        self.pointer_input_change_event_producer.clear();
    }
}

fn cancel_all(filters: &[PointerInputFilterHandle]) {
    for filter in filters {
        match filter.try_borrow_mut() {
            Ok(mut filter) => filter.on_cancel(),
            Err(_) => log::warn!("filter already borrowed; cancel skipped"),
        }
    }
}

/// Produces per-pointer changes by pairing each reported pointer with what
/// was last seen for it.
#[derive(Default)]
pub struct PointerInputChangeEventProducer {
    previous_pointer_input_data: HashMap<PointerId, PointerInputData>,
}

impl PointerInputChangeEventProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn produce(&mut self, event: &PointerInputEvent) -> HashMap<PointerId, PointerInputChange> {
        let mut changes = HashMap::with_capacity(event.pointers.len());

        for pointer in &event.pointers {
            let current = PointerInputData::new(event.uptime, pointer.position, pointer.down);
            let previous = self
                .previous_pointer_input_data
                .get(&pointer.id)
                .copied()
                .unwrap_or(PointerInputData::new(event.uptime, pointer.position, false));

            changes.insert(
                pointer.id,
                PointerInputChange {
                    id: pointer.id,
                    type_: pointer.type_,
                    current,
                    previous,
                    consumed: ConsumedData::default(),
                },
            );

            if pointer.down {
                self.previous_pointer_input_data.insert(pointer.id, current);
            } else {
                self.previous_pointer_input_data.remove(&pointer.id);
            }
        }

        self.previous_pointer_input_data
            .retain(|id, _| changes.contains_key(id));
        changes
    }

    pub fn clear(&mut self) {
        self.previous_pointer_input_data.clear();
    }
}
