use crate::models::BoundingBox;
use std::collections::BTreeMap;

/// Broad-phase index over collision-object boxes.
///
/// Static entries are the world's collision objects; dynamic entries stand for
/// fast-moving game objects the host tracks itself. The two kinds have separate
/// id spaces. Queries may return duplicates.
pub trait SpatialIndex {
    fn add(&mut self, id: usize, bbox: BoundingBox, dynamic: bool);

    fn remove(&mut self, id: usize, dynamic: bool);

    /// Ids of entries of the requested kind whose box overlaps `region` under the
    /// signed tolerance `toler` (see `BoundingBox::intersects`), except `exclude`.
    fn query(&self, region: &BoundingBox, exclude: Option<usize>, toler: f64, want_dynamic: bool) -> Vec<usize>;
}

/// Linear-scan index, fine for small scenes and tests. Results come back in
/// ascending id order.
#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    entries: BTreeMap<(bool, usize), BoundingBox>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: usize, dynamic: bool) -> bool {
        self.entries.contains_key(&(dynamic, id))
    }
}

impl SpatialIndex for LinearIndex {
    fn add(&mut self, id: usize, bbox: BoundingBox, dynamic: bool) {
        self.entries.insert((dynamic, id), bbox);
    }

    fn remove(&mut self, id: usize, dynamic: bool) {
        self.entries.remove(&(dynamic, id));
    }

    fn query(&self, region: &BoundingBox, exclude: Option<usize>, toler: f64, want_dynamic: bool) -> Vec<usize> {
        self.entries
            .range((want_dynamic, 0)..=(want_dynamic, usize::MAX))
            .filter(|(key, bbox)| Some(key.1) != exclude && region.intersects(bbox, toler))
            .map(|(key, _)| key.1)
            .collect()
    }
}
