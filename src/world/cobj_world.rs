use crate::errors::CobjError;
use crate::models::{BoundingBox, CobjStatus, CollisionObject};
use crate::utils::Point;
use crate::world::{LinearIndex, SpatialIndex};
use log::{debug, trace};

/// Owns every collision object and keeps the spatial index in sync with their
/// geometry.
///
/// Geometry only changes through `move_cobj` and `rotate_cobj`, which
/// deregister the object, mutate it, recompute its box and reregister it, so the
/// index never holds a stale shape.
pub struct CobjWorld {
    cobjs: Vec<CollisionObject>,
    index: Box<dyn SpatialIndex>,
    shadow_dirty: bool,
}

impl Default for CobjWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CobjWorld {
    /// Creates an empty world backed by a `LinearIndex`.
    pub fn new() -> Self {
        Self::with_index(Box::new(LinearIndex::new()))
    }

    pub fn with_index(index: Box<dyn SpatialIndex>) -> Self {
        CobjWorld { cobjs: Vec::new(), index, shadow_dirty: false }
    }

    /// Adds an object, assigns its id and registers it in the index.
    ///
    /// # Returns
    /// The new object's id.
    pub fn add_cobj(&mut self, mut cobj: CollisionObject) -> usize {
        let id = self.cobjs.len();
        cobj.id = id;
        cobj.status = CobjStatus::Static;
        cobj.bbox = cobj.calc_bbox();
        self.index.add(id, cobj.bbox, false);
        debug!("Added cobj {} ({:?}, movable: {})", id, cobj.kind(), cobj.movable);
        self.cobjs.push(cobj);
        id
    }

    pub fn get_cobj(&self, id: usize) -> Result<&CollisionObject, CobjError> {
        self.cobjs.get(id).ok_or(CobjError::UnknownCobj(id))
    }

    fn get_cobj_mut(&mut self, id: usize) -> Result<&mut CollisionObject, CobjError> {
        self.cobjs.get_mut(id).ok_or(CobjError::UnknownCobj(id))
    }

    pub fn len(&self) -> usize {
        self.cobjs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cobjs.is_empty()
    }

    /// All objects, destroyed ones included.
    pub fn iter(&self) -> impl Iterator<Item = &CollisionObject> {
        self.cobjs.iter()
    }

    /// Translates an object, keeping the index in sync.
    pub fn move_cobj(&mut self, id: usize, delta: Point) -> Result<(), CobjError> {
        self.get_cobj(id)?;
        self.index.remove(id, false);
        let cobj = self.get_cobj_mut(id)?;
        cobj.shift_by(delta);
        cobj.bbox = cobj.calc_bbox();
        let (bbox, active) = (cobj.bbox, cobj.is_active());

        if active {
            self.index.add(id, bbox, false);
        }
        trace!("Moved cobj {} by {:?}", id, delta);
        Ok(())
    }

    /// Rotates an object about `pt`. On error the object and index are untouched.
    pub fn rotate_cobj(&mut self, id: usize, pt: Point, axis: Point, angle: f64) -> Result<(), CobjError> {
        let mut rotated = self.get_cobj(id)?.clone();
        rotated.rotate_about(pt, axis, angle)?;
        self.index.remove(id, false);

        if rotated.is_active() {
            self.index.add(id, rotated.bbox, false);
        }
        debug!("Rotated cobj {} by {} rad, now {:?}", id, angle, rotated.kind());
        self.cobjs[id] = rotated;
        Ok(())
    }

    /// Marks an object destroyed and removes it from the index.
    pub fn destroy_cobj(&mut self, id: usize) -> Result<(), CobjError> {
        self.get_cobj_mut(id)?.status = CobjStatus::Destroyed;
        self.index.remove(id, false);
        debug!("Destroyed cobj {}", id);
        Ok(())
    }

    pub fn set_v_fall(&mut self, id: usize, v_fall: f64) -> Result<(), CobjError> {
        self.get_cobj_mut(id)?.v_fall = v_fall;
        Ok(())
    }

    /// Ids of objects whose box overlaps `region`; may contain duplicates.
    pub fn query(&self, region: &BoundingBox, exclude: Option<usize>, toler: f64) -> Vec<usize> {
        self.index.query(region, exclude, toler, false)
    }

    /// Whether any dynamic entry of the index overlaps `region`.
    pub fn any_dynamic_in(&self, region: &BoundingBox) -> bool {
        !self.index.query(region, None, 0.0, true).is_empty()
    }

    /// Index access for hosts that register dynamic entries.
    pub fn index_mut(&mut self) -> &mut dyn SpatialIndex {
        self.index.as_mut()
    }

    pub fn mark_shadow_dirty(&mut self) {
        self.shadow_dirty = true;
    }

    /// Returns and clears the "shadow caches need rebuilding" flag.
    pub fn take_shadow_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.shadow_dirty, false)
    }
}
