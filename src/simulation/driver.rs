use crate::errors::CobjError;
use crate::simulation::{DropState, MovingSet, Simulation};
use log::{debug, trace};

impl Simulation {
    /// Runs one tick for every moving object.
    ///
    /// Ids whose object is destroyed (or unknown) are pruned from `moving`; the
    /// rest are dropped bottom to top so stacks settle from the ground up.
    ///
    /// # Returns
    /// The drop state of each object in the order it was processed.
    pub fn proc_moving_cobjs(&mut self, moving: &mut MovingSet) -> Result<Vec<(usize, DropState)>, CobjError> {
        let world = &self.world;
        moving.retain(|id| world.get_cobj(id).map_or(false, |c| c.is_active()));

        let mut by_z1 = Vec::with_capacity(moving.len());
        for id in moving.iter() {
            by_z1.push((self.world.get_cobj(id)?.bottom(), id));
        }
        by_z1.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut states = Vec::with_capacity(by_z1.len());
        for (_, id) in by_z1 {
            states.push((id, self.try_drop_movable_cobj(moving, id)?));
        }
        trace!("Processed {} moving cobjs", states.len());
        Ok(states)
    }

    /// Wakes resting dynamic objects that the (just moved) object now overlaps.
    /// Nothing is checked unless the index reports a dynamic entry in its box.
    ///
    /// # Returns
    /// The number of objects woken.
    pub fn recheck_dynamic_objects(&mut self, id: usize) -> Result<usize, CobjError> {
        let cobj = self.world.get_cobj(id)?;

        if !self.world.any_dynamic_in(&cobj.bbox) {
            return Ok(0);
        }
        let mut woken = 0;

        for (obj_id, pos, radius) in self.env.dynamic_objects.resting_objects() {
            if cobj.sphere_intersects(pos, radius) {
                self.env.dynamic_objects.wake(obj_id);
                woken += 1;
            }
        }
        if woken > 0 {
            debug!("Cobj {} woke {} dynamic objects", id, woken);
        }
        Ok(woken)
    }
}
