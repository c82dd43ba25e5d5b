//! HitPathTracker - multi-pass dispatch over the regions pointers landed in
//!
//! Pointers are attached to the hit path of the region stack they went down
//! in, and stay attached until they are released. Paths sharing ancestors are
//! merged into one tree so each region sees a single batch per pass holding
//! every pointer that hit it.

use std::collections::HashMap;

use presskit_foundation::{
    ChangeBatch, PointerEventPass, PointerId, PointerInputChange, TraversalDirection,
};
use smallvec::SmallVec;

use crate::region::{RegionId, RegionTree};

/// A region on some pointer's hit path.
struct Node {
    region_id: RegionId,

    /// Pointers whose hit path goes through this region.
    pointer_ids: SmallVec<[PointerId; 4]>,

    /// Inner regions, in the order their pointers first hit them.
    children: Vec<Node>,
}

impl Node {
    fn new(region_id: RegionId) -> Self {
        Self {
            region_id,
            pointer_ids: SmallVec::new(),
            children: Vec::new(),
        }
    }

    fn dispatch(
        &self,
        changes: &mut HashMap<PointerId, PointerInputChange>,
        regions: &RegionTree,
        pass: PointerEventPass,
    ) -> bool {
        let mut dispatched = false;
        match pass.direction() {
            TraversalDirection::Down => {
                dispatched |= self.dispatch_to_region(changes, regions, pass);
                for child in &self.children {
                    dispatched |= child.dispatch(changes, regions, pass);
                }
            }
            TraversalDirection::Up => {
                for child in &self.children {
                    dispatched |= child.dispatch(changes, regions, pass);
                }
                dispatched |= self.dispatch_to_region(changes, regions, pass);
            }
        }
        dispatched
    }

    /// Runs this region's filters on its batch and writes the resulting
    /// consumption back into the frame's changes.
    fn dispatch_to_region(
        &self,
        changes: &mut HashMap<PointerId, PointerInputChange>,
        regions: &RegionTree,
        pass: PointerEventPass,
    ) -> bool {
        let (Some(bounds), Some(origin)) = (
            regions.bounds(self.region_id),
            regions.global_origin(self.region_id),
        ) else {
            log::debug!("region #{} vanished mid-gesture; skipping", self.region_id);
            return false;
        };

        let mut batch: ChangeBatch = self
            .pointer_ids
            .iter()
            .filter_map(|id| changes.get(id))
            .map(|change| change.clone().translated(origin))
            .collect();
        if batch.is_empty() {
            return false;
        }

        let mut dispatched = false;
        for filter in regions.filters(self.region_id) {
            batch = match filter.try_borrow_mut() {
                Ok(mut filter) => {
                    log::trace!(
                        "dispatching {} change(s) to {} on region #{} ({:?})",
                        batch.len(),
                        filter.debug_name(),
                        self.region_id,
                        pass
                    );
                    dispatched = true;
                    filter.on_pointer_event(batch, pass, bounds.size())
                }
                Err(_) => {
                    log::warn!(
                        "filter on region #{} is already borrowed; skipping {:?}",
                        self.region_id,
                        pass
                    );
                    batch
                }
            };
        }

        for change in batch {
            if let Some(master) = changes.get_mut(&change.id) {
                master.consumed = change.consumed;
            }
        }
        dispatched
    }

    /// Drops pointers that were released or are no longer reported, then
    /// prunes children left without pointers. Regions that lost a pointer
    /// without seeing it go up are pushed onto `abandoned`.
    fn cleanup(
        &mut self,
        changes: &HashMap<PointerId, PointerInputChange>,
        abandoned: &mut Vec<RegionId>,
    ) {
        let mut lost = false;
        self.pointer_ids.retain(|id| match changes.get(id) {
            Some(change) => change.current.down,
            None => {
                lost = true;
                false
            }
        });
        if lost {
            abandoned.push(self.region_id);
        }
        for child in &mut self.children {
            child.cleanup(changes, abandoned);
        }
        self.children.retain(|child| !child.pointer_ids.is_empty());
    }

    fn remove_region(&mut self, region_id: RegionId) {
        self.children.retain(|child| child.region_id != region_id);
        for child in &mut self.children {
            child.remove_region(region_id);
        }
    }

    fn collect_regions(&self, out: &mut Vec<RegionId>) {
        out.push(self.region_id);
        for child in &self.children {
            child.collect_regions(out);
        }
    }
}

/// Tracks hit paths and dispatches changes through them.
#[derive(Default)]
pub struct HitPathTracker {
    roots: Vec<Node>,
}

impl HitPathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Attaches `pointer_id` to every region in `path` (outermost first),
    /// reusing nodes already present for a shared prefix.
    pub fn add_hit_path(&mut self, pointer_id: PointerId, path: &[RegionId]) {
        let mut level = &mut self.roots;
        for region_id in path {
            let index = match level.iter().position(|node| node.region_id == *region_id) {
                Some(index) => index,
                None => {
                    level.push(Node::new(*region_id));
                    level.len() - 1
                }
            };
            let node = &mut level[index];
            if !node.pointer_ids.contains(&pointer_id) {
                node.pointer_ids.push(pointer_id);
            }
            level = &mut node.children;
        }
    }

    /// Runs every pass in order over the tracked paths.
    ///
    /// Within a pass, consumption written by one region is visible to every
    /// region visited after it, and to all later passes.
    pub fn dispatch_changes(
        &self,
        changes: &mut HashMap<PointerId, PointerInputChange>,
        regions: &RegionTree,
    ) -> bool {
        if self.roots.is_empty() || changes.is_empty() {
            return false;
        }

        let mut dispatched = false;
        for pass in PointerEventPass::ALL {
            for root in &self.roots {
                dispatched |= root.dispatch(changes, regions, pass);
            }
        }
        dispatched
    }

    /// Forgets pointers that went up or were not reported this frame.
    ///
    /// Returns the regions, ancestors first, that lost a pointer which
    /// vanished while still down; their gestures can no longer complete.
    pub fn cleanup_hits(
        &mut self,
        changes: &HashMap<PointerId, PointerInputChange>,
    ) -> Vec<RegionId> {
        let mut abandoned = Vec::new();
        for root in &mut self.roots {
            root.cleanup(changes, &mut abandoned);
        }
        self.roots.retain(|root| !root.pointer_ids.is_empty());
        abandoned
    }

    /// Forgets a region and everything tracked beneath it.
    pub fn remove_region(&mut self, region_id: RegionId) {
        self.roots.retain(|root| root.region_id != region_id);
        for root in &mut self.roots {
            root.remove_region(region_id);
        }
    }

    /// Every region currently on some hit path, ancestors before descendants.
    pub fn tracked_regions(&self) -> Vec<RegionId> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_regions(&mut out);
        }
        out
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }
}
