//! Regions that anchor gesture filters in the UI hierarchy.
//!
//! A region is a rectangle in its parent's coordinate space with an ordered
//! list of filters. The owning layer creates, resizes and removes regions
//! between frames; the processor reads them while dispatching.

use std::collections::HashMap;

use presskit_foundation::PointerInputFilterHandle;
use presskit_ui_graphics::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::error::RegionTreeError;

pub type RegionId = u64;

/// Path of regions from outermost to innermost.
pub type HitPath = SmallVec<[RegionId; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FilterId(u64);

struct FilterEntry {
    id: FilterId,
    priority: i32,
    handle: PointerInputFilterHandle,
}

struct Region {
    parent: Option<RegionId>,
    bounds: Rect,
    children: Vec<RegionId>,
    /// Sorted by descending priority; equal priorities keep insertion order.
    filters: Vec<FilterEntry>,
}

impl Region {
    fn new(parent: Option<RegionId>, bounds: Rect) -> Self {
        Self {
            parent,
            bounds,
            children: Vec::new(),
            filters: Vec::new(),
        }
    }
}

pub struct RegionTree {
    regions: HashMap<RegionId, Region>,
    root: RegionId,
    next_region_id: RegionId,
    next_filter_id: u64,
}

impl RegionTree {
    pub fn new(root_size: Size) -> Self {
        let root = 0;
        let mut regions = HashMap::new();
        regions.insert(root, Region::new(None, Rect::from_size(root_size)));
        Self {
            regions,
            root,
            next_region_id: root + 1,
            next_filter_id: 0,
        }
    }

    pub fn root(&self) -> RegionId {
        self.root
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Adds a child region. `bounds` are in the parent's coordinates; later
    /// children sit on top of earlier ones for hit testing.
    pub fn add_region(
        &mut self,
        parent: RegionId,
        bounds: Rect,
    ) -> Result<RegionId, RegionTreeError> {
        let id = self.next_region_id;
        self.region_mut(parent)?.children.push(id);
        self.regions.insert(id, Region::new(Some(parent), bounds));
        self.next_region_id += 1;
        Ok(id)
    }

    /// Removes a region and its whole subtree, returning the filters that
    /// were attached so the caller can cancel them.
    pub(crate) fn remove_region(
        &mut self,
        id: RegionId,
    ) -> Result<Vec<PointerInputFilterHandle>, RegionTreeError> {
        if id == self.root {
            return Err(RegionTreeError::RootRemoval);
        }
        let parent = self.region(id)?.parent;
        if let Some(parent) = parent.and_then(|parent| self.regions.get_mut(&parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(region) = self.regions.remove(&next) {
                pending.extend(region.children);
                removed.extend(region.filters.into_iter().map(|entry| entry.handle));
            }
        }
        Ok(removed)
    }

    pub fn bounds(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(&id).map(|region| region.bounds)
    }

    pub fn set_bounds(&mut self, id: RegionId, bounds: Rect) -> Result<(), RegionTreeError> {
        self.region_mut(id)?.bounds = bounds;
        Ok(())
    }

    pub fn set_root_size(&mut self, size: Size) {
        if let Some(root) = self.regions.get_mut(&self.root) {
            root.bounds = Rect::from_size(size);
        }
    }

    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.regions.get(&id).and_then(|region| region.parent)
    }

    pub fn children(&self, id: RegionId) -> &[RegionId] {
        self.regions
            .get(&id)
            .map(|region| region.children.as_slice())
            .unwrap_or(&[])
    }

    /// Origin of the region in root coordinates.
    pub fn global_origin(&self, id: RegionId) -> Option<Point> {
        let mut region = self.regions.get(&id)?;
        let mut origin = region.bounds.origin();
        while let Some(parent) = region.parent {
            region = self.regions.get(&parent)?;
            origin += region.bounds.origin();
        }
        Some(origin)
    }

    pub fn add_filter(
        &mut self,
        region: RegionId,
        handle: PointerInputFilterHandle,
    ) -> Result<FilterId, RegionTreeError> {
        self.add_filter_with_priority(region, handle, 0)
    }

    /// Higher priorities see each pass first within the region.
    pub fn add_filter_with_priority(
        &mut self,
        region: RegionId,
        handle: PointerInputFilterHandle,
        priority: i32,
    ) -> Result<FilterId, RegionTreeError> {
        let id = FilterId(self.next_filter_id);
        let filters = &mut self.region_mut(region)?.filters;
        let index = filters
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(filters.len());
        filters.insert(
            index,
            FilterEntry {
                id,
                priority,
                handle,
            },
        );
        self.next_filter_id += 1;
        Ok(id)
    }

    pub(crate) fn remove_filter(
        &mut self,
        region: RegionId,
        id: FilterId,
    ) -> Result<PointerInputFilterHandle, RegionTreeError> {
        let filters = &mut self.region_mut(region)?.filters;
        let index = filters
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(RegionTreeError::UnknownFilter { region, id })?;
        Ok(filters.remove(index).handle)
    }

    /// Filters of a region in dispatch order.
    pub fn filters(&self, id: RegionId) -> impl Iterator<Item = &PointerInputFilterHandle> + '_ {
        self.regions
            .get(&id)
            .into_iter()
            .flat_map(|region| region.filters.iter().map(|entry| &entry.handle))
    }

    pub fn has_filters(&self, id: RegionId) -> bool {
        self.regions
            .get(&id)
            .is_some_and(|region| !region.filters.is_empty())
    }

    /// Regions with filters under `position` (root coordinates), outermost
    /// first. Only the topmost child is followed at each level.
    pub fn hit_test(&self, position: Point) -> HitPath {
        let mut path = HitPath::new();
        let Some(root) = self.regions.get(&self.root) else {
            return path;
        };
        if !root.bounds.contains_point(position) {
            return path;
        }

        let mut current = self.root;
        let mut local = position - root.bounds.origin();
        loop {
            if self.has_filters(current) {
                path.push(current);
            }
            let next = self.children(current).iter().rev().find_map(|child| {
                let bounds = self.regions.get(child)?.bounds;
                bounds.contains_point(local).then_some((*child, bounds))
            });
            match next {
                Some((child, bounds)) => {
                    current = child;
                    local -= bounds.origin();
                }
                None => break,
            }
        }
        path
    }

    fn region(&self, id: RegionId) -> Result<&Region, RegionTreeError> {
        self.regions
            .get(&id)
            .ok_or(RegionTreeError::UnknownRegion { id })
    }

    fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, RegionTreeError> {
        self.regions
            .get_mut(&id)
            .ok_or(RegionTreeError::UnknownRegion { id })
    }
}
