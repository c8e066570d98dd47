use crate::environment::SoundId;
use crate::errors::CobjError;
use crate::models::ShapeKind;
use crate::simulation::{binary_step_moving_cobj_delta, MovingSet, Simulation};
use crate::utils::{
    add_vectors, coord, magnitude_squared, negate_vector, normalize_vector, scale_vector, sub_vectors,
    vector_magnitude, with_coord, Point, ZERO_VECTOR,
};
use log::{debug, trace};
use rand::Rng;
use std::collections::BTreeSet;

/// Number of lift attempts when a push is blocked by a ramp or ledge.
const NUM_LIFT_STEPS: usize = 10;

/// A move made during a push chain: the object, how far it moved, and whether
/// the push added it to the moving set.
struct ChainMove {
    id: usize,
    delta: Point,
    newly_moving: bool,
}

impl Simulation {
    /// Pushes a movable object horizontally by up to `delta`.
    ///
    /// The z component is dropped and x/y are clamped to the scene. Cubes push
    /// adjacent movable cubes ahead of them; if any object in the chain can't
    /// move, every move made by the chain is undone. A blocked object can be
    /// lifted onto a low ledge or up a ramp. On success `delta` holds the
    /// horizontal displacement actually applied and the object joins `moving`.
    ///
    /// # Arguments
    /// * `moving` - Moving set that receives every object that moved
    /// * `id` - The object being pushed
    /// * `delta` - Requested displacement, shortened in place
    ///
    /// # Returns
    /// Whether the object moved.
    ///
    /// # Errors
    /// `CobjError::UnknownCobj` if `id` is not in the world.
    pub fn push_cobj(&mut self, moving: &mut MovingSet, id: usize, delta: &mut Point) -> Result<bool, CobjError> {
        let mut seen = BTreeSet::new();
        let mut journal = Vec::new();
        let moved = self.push_cobj_chain(moving, id, delta, &mut seen, &mut journal)?;

        if !moved && !journal.is_empty() {
            debug!("Push of cobj {} failed, undoing {} chained moves", id, journal.len());

            for m in journal.iter().rev() {
                self.world.move_cobj(m.id, negate_vector(m.delta))?;
                if m.newly_moving {
                    moving.remove(m.id);
                }
            }
        }
        Ok(moved)
    }

    fn push_cobj_chain(
        &mut self,
        moving: &mut MovingSet,
        id: usize,
        delta: &mut Point,
        seen: &mut BTreeSet<usize>,
        journal: &mut Vec<ChainMove>,
    ) -> Result<bool, CobjError> {
        let consts = self.constants;
        let toler = consts.tolerance;
        let cobj = self.world.get_cobj(id)?.clone();

        if !cobj.is_movable() {
            return Ok(false);
        }
        delta.2 = 0.0;

        if magnitude_squared(*delta) < toler * toler {
            return Ok(false);
        }
        // keep the object inside the scene
        for dim in 0..2 {
            let size = if dim == 0 { consts.scene_size.0 } else { consts.scene_size.1 };
            let v = coord(*delta, dim);
            let clamped = if v > 0.0 {
                v.min(size - consts.half_dxy - cobj.bbox.d[dim][1])
            } else if v < 0.0 {
                v.max(-size - cobj.bbox.d[dim][0])
            } else {
                v
            };
            *delta = with_coord(*delta, dim, clamped);
        }
        if magnitude_squared(*delta) < toler * toler {
            return Ok(false);
        }
        let region = cobj.bbox.translated(*delta).union_with(&cobj.bbox).expanded_by(-toler);
        let mut obstruction_ids = self.world.query(&region, Some(id), toler);
        let start_delta = *delta;

        if cobj.kind() == ShapeKind::Cube {
            seen.insert(id);
            let mut i = 0;

            while i < obstruction_ids.len() {
                let cid = obstruction_ids[i];
                let c = self.world.get_cobj(cid)?;

                if !c.is_movable()
                    || c.kind() != ShapeKind::Cube
                    || !cobj.intersects_cobj(c, -toler).is_possible()
                    || seen.contains(&cid)
                {
                    i += 1;
                    continue;
                }
                seen.insert(cid);
                let mut delta2 = *delta;

                if !self.push_cobj_chain(moving, cid, &mut delta2, seen, journal)? {
                    trace!("Cobj {} blocked by chained cobj {}", id, cid);
                    return Ok(false);
                }
                *delta = delta2;
                obstruction_ids.swap_remove(i);
            }
        }

        let mut lift = 0.0;
        let can_move = {
            let obstructions = self.collect_cobjs(&obstruction_ids)?;

            if binary_step_moving_cobj_delta(&cobj, &obstructions, delta, toler) {
                true
            } else {
                // low ledges and ramps can be climbed
                let mut step_height = consts.cobj_step_height();
                let (mut has_ledge, mut has_ramp) = (false, false);

                for c in &obstructions {
                    if c.kind() == ShapeKind::Polygon {
                        has_ramp = true;
                    } else if c.top() - cobj.bottom() < step_height {
                        has_ledge = true;
                        break;
                    }
                }
                if !has_ledge && !has_ramp {
                    return Ok(false);
                }
                if !has_ledge {
                    // ramps steeper than 45 degrees can't be climbed
                    step_height = step_height.min(vector_magnitude(start_delta));
                }
                let mut test_cobj = cobj.clone();
                let mut lifted = false;

                for _ in 0..NUM_LIFT_STEPS {
                    *delta = start_delta;
                    test_cobj.shift_by((0.0, 0.0, 0.1 * step_height));
                    lift += 0.1 * step_height;

                    if binary_step_moving_cobj_delta(&test_cobj, &obstructions, delta, toler) {
                        lifted = true;
                        break;
                    }
                }
                lifted
            }
        };
        if !can_move {
            trace!("Cobj {} can't be pushed", id);
            return Ok(false);
        }

        let radius = cobj.bsphere_radius();
        let center = add_vectors(cobj.center_pt(), (0.0, 0.0, lift));
        let mut pos = add_vectors(center, *delta);
        let mut total = sub_vectors(pos, cobj.center_pt());

        if self.env.teleporter.maybe_teleport(&mut pos, 0.5 * radius) {
            // land a radius past the exit so a following actor doesn't get stuck on it
            let dir = normalize_vector(*delta).unwrap_or(ZERO_VECTOR);
            total = add_vectors(sub_vectors(pos, cobj.center_pt()), scale_vector(dir, radius));
            debug!("Cobj {} teleported to {:?}", id, pos);
        }
        self.world.move_cobj(id, total)?;
        journal.push(ChainMove { id, delta: total, newly_moving: moving.insert(id) });
        self.world.mark_shadow_dirty();
        self.recheck_dynamic_objects(id)?;

        if self.rng.random_range(0..1000) == 0 {
            self.env.effects.play_sound(SoundId::Sliding, center, 0.1, 1.0);
        }
        debug!("Pushed cobj {} by {:?}", id, total);
        Ok(true)
    }

    /// Lets an actor push an object: moves it by the gap between where the actor
    /// wanted to go and where collision left it.
    ///
    /// # Arguments
    /// * `moving` - The moving set
    /// * `desired_pos` - Where the actor tried to move
    /// * `actor_pos` - Where the actor ended up; advanced by the applied push on success
    /// * `id` - The object in the way
    /// * `actor_jumping` - Actors can't push while jumping
    pub fn proc_movable_cobj(
        &mut self,
        moving: &mut MovingSet,
        desired_pos: Point,
        actor_pos: &mut Point,
        id: usize,
        actor_jumping: bool,
    ) -> Result<bool, CobjError> {
        if actor_jumping {
            return Ok(false);
        }
        let mut delta = sub_vectors(desired_pos, *actor_pos);

        if !self.push_cobj(moving, id, &mut delta)? {
            return Ok(false);
        }
        *actor_pos = add_vectors(*actor_pos, delta);
        Ok(true)
    }
}
