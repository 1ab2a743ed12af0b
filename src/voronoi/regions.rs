use slotmap::SecondaryMap;

use crate::kernel::{area, Region};
use crate::objects::ObjectId;

/// Regions keyed by object identity, iterated in object creation order.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: SecondaryMap<ObjectId, Region>,
    order: Vec<ObjectId>,
}

impl RegionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the region of `id`.
    pub fn insert(&mut self, id: ObjectId, region: Region) {
        if self.regions.insert(id, region).is_none() {
            self.order.push(id);
        }
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Region> {
        self.regions.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Region)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.regions.get(id).map(|region| (id, region)))
    }

    /// Sum of all region areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.iter().map(|(_, region)| area(region)).sum()
    }
}
