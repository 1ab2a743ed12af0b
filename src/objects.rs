use slotmap::{new_key_type, SlotMap};

use crate::geometry::Polygon;

new_key_type! {
    /// Stable identity of an object for the lifetime of one approximation run.
    pub struct ObjectId;
}

/// A polygon together with the identity its region is merged under.
#[derive(Debug, Clone)]
pub struct IdentifiedObject {
    pub polygon: Polygon,
}

/// Arena owning the objects of one approximation run.
///
/// Iteration follows creation order, which fixes the order samples are
/// concatenated in and therefore makes runs deterministic.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: SlotMap<ObjectId, IdentifiedObject>,
    order: Vec<ObjectId>,
}

impl ObjectStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object and returns its identity.
    pub fn add(&mut self, polygon: Polygon) -> ObjectId {
        let id = self.objects.insert(IdentifiedObject { polygon });
        self.order.push(id);
        id
    }

    /// Returns the object with the given identity.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&IdentifiedObject> {
        self.objects.get(id)
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Objects in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &IdentifiedObject)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|obj| (id, obj)))
    }

    /// Identities in creation order.
    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }
}
