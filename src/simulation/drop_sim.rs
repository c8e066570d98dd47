use crate::environment::SoundId;
use crate::errors::CobjError;
use crate::models::{BoundingBox, Shape, ShapeKind};
use crate::simulation::{binary_step_moving_cobj_delta, MovingSet, Simulation};
use crate::transform::{is_point_supported, is_rolling_cobj};
use crate::utils::{normalize_vector, scale_vector, sub_vectors, Point, PLUS_X, PLUS_Y, WATER_DENSITY, ZERO_VECTOR};
use log::{debug, trace};
use rand::Rng;

/// Outcome of one drop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropState {
    /// Fell the whole distance available this tick.
    Falling,
    /// Stopped by the ground or another object (or couldn't fall at all).
    RestingOnSurface,
    /// Lifted out of an object below it, such as a rising platform or a stack.
    RestingInStack,
    /// Blocked, but overhanging its only supporter and nudged to roll off.
    StuckCanRoll,
    SubmergedFloating,
    SubmergedSinking,
    /// Frozen into ice deeper than half its height.
    StuckInIce,
}

impl Simulation {
    /// Advances one movable object vertically by one tick: free fall under half
    /// gravity, stacking on other movable objects and platforms, rolling off
    /// supports, landing on terrain, and buoyancy in water.
    ///
    /// # Arguments
    /// * `moving` - The moving set, passed on to the push simulator when rolling
    /// * `id` - The object to drop
    ///
    /// # Errors
    /// `CobjError::UnknownCobj` if `id` (or an index result) is not in the world.
    pub fn try_drop_movable_cobj(&mut self, moving: &mut MovingSet, id: usize) -> Result<DropState, CobjError> {
        let consts = self.constants;
        let toler = consts.tolerance;
        let accel = consts.fall_acceleration();
        let cobj = self.world.get_cobj(id)?.clone();
        let height = cobj.height();
        let prev_v_fall = cobj.v_fall;
        let cur_v_fall = prev_v_fall + accel;

        // assume it stops; the fall branches below set the real value
        self.world.set_v_fall(id, 0.0)?;
        let mut v_fall = 0.0;
        let gravity_dz = -consts.tstep * cur_v_fall;
        let mut max_dz = gravity_dz.min(cobj.bottom() - consts.scene_zmin);

        if max_dz < toler {
            return Ok(DropState::RestingOnSurface);
        }
        // a minimum slab thickness keeps elevator rides stable
        let test_dz = max_dz.max(0.25 * height);
        let mut slab = cobj.bbox;
        slab.d[2][0] -= test_dz;
        let obstruction_ids = self.world.query(&slab, Some(id), toler);

        for &cid in &obstruction_ids {
            let c = self.world.get_cobj(cid)?;
            let dz = c.top() - cobj.bottom();

            if dz <= 0.0 || c.top() > cobj.top() {
                continue;
            }
            if c.is_movable() {
                if !c.is_flat_top() && dz >= consts.cobj_step_height() && c.v_fall <= 0.0 {
                    continue;
                }
            } else if !c.platform_id.map_or(false, |pid| self.env.platforms.is_active(pid)) {
                continue;
            }
            if !cobj.intersects_cobj(c, toler).is_possible() {
                continue;
            }
            debug!("Cobj {} lifted {} out of cobj {}", id, dz, cid);
            self.world.move_cobj(id, (0.0, 0.0, dz))?;
            self.world.mark_shadow_dirty();
            return Ok(DropState::RestingInStack);
        }

        let mut delta = (0.0, 0.0, -test_dz);
        let center = cobj.center_pt();
        let can_move = {
            let obstructions = self.collect_cobjs(&obstruction_ids)?;
            binary_step_moving_cobj_delta(&cobj, &obstructions, &mut delta, toler)
        };

        if !can_move {
            if prev_v_fall < 4.0 * accel {
                self.env.effects.play_sound(SoundId::ObjectFall, center, 0.5, 1.2);
            }
            if obstruction_ids.len() != 1 || !is_rolling_cobj(&cobj) {
                return Ok(DropState::RestingOnSurface);
            }
            let support = self.world.get_cobj(obstruction_ids[0])?;

            if is_point_supported(support, cobj.center_of_mass()) {
                return Ok(DropState::RestingOnSurface);
            }
            let mut move_dir = normalize_vector(sub_vectors(center, support.center_pt())).unwrap_or(ZERO_VECTOR);

            if support.kind() == ShapeKind::Cube {
                move_dir = if move_dir.0.abs() < move_dir.1.abs() {
                    if move_dir.1 < 0.0 { (0.0, -1.0, 0.0) } else { PLUS_Y }
                } else if move_dir.0 < 0.0 {
                    (-1.0, 0.0, 0.0)
                } else {
                    PLUS_X
                };
            }
            let mut roll = scale_vector(move_dir, 0.05 * height);
            let rolled = self.push_cobj(moving, id, &mut roll)?;
            debug!("Cobj {} overhangs cobj {}, rolled: {}", id, obstruction_ids[0], rolled);
            return Ok(DropState::StuckCanRoll);
        }

        // terrain under the centre, or the ice surface when above it
        let mut mesh_z = self.env.terrain.terrain_height(center.0, center.1);

        if self.env.terrain.is_ice(center.0, center.1) {
            let water_z = self.env.terrain.water_height(center.0, center.1);
            if center.2 > water_z {
                mesh_z = mesh_z.max(water_z);
            }
        }
        let mesh_dz = mesh_z - cobj.bottom();

        if mesh_dz.abs() < toler {
            return Ok(DropState::RestingOnSurface);
        }
        let mut state = DropState::Falling;

        if delta.2.max(-max_dz) < mesh_dz {
            if prev_v_fall < 10.0 * accel {
                self.env.effects.play_sound(SoundId::ObjectFall, center, 0.2, 0.8);
            }
            delta.2 = mesh_dz;
            self.env.vegetation.crush(center, crush_radius(&cobj.shape, &cobj.bbox, delta));
            state = DropState::RestingOnSurface;
        } else if delta.2 <= -max_dz {
            // terminal velocity of one height per tick keeps it from passing through platforms
            v_fall = cur_v_fall.max(-height / consts.tstep);
        } else if delta.2 < 0.0 {
            v_fall = prev_v_fall;
            state = DropState::RestingOnSurface;
        }

        let bot_center = (center.0, center.1, cobj.bottom());

        if let Some(depth) = self.env.terrain.water_depth(bot_center) {
            if self.env.terrain.temperature() > consts.freeze_point {
                let mass = cobj.mass();
                let mut density = cobj.density;

                if matches!(cobj.kind(), ShapeKind::Cube | ShapeKind::Cylinder) {
                    // anything in the thin slab above is taken to rest on this object
                    let mut above = cobj.bbox;
                    above.d[2][0] = cobj.top();
                    above.d[2][1] += 0.1 * height;
                    let mut tot_mass = mass;

                    for cid in self.world.query(&above, Some(id), toler) {
                        let c = self.world.get_cobj(cid)?;

                        if self.env.terrain.water_depth(c.center_pt()).is_some() {
                            if c.density > WATER_DENSITY {
                                tot_mass += c.volume() * (c.density - WATER_DENSITY);
                            }
                        } else {
                            tot_mass += c.mass();
                        }
                    }
                    density *= tot_mass / mass;
                }
                if density <= WATER_DENSITY {
                    if delta.2 <= 0.0 {
                        // ease toward the depth where buoyancy balances the load
                        delta.2 = 0.1 * (depth - density * height);
                        v_fall = 0.0;
                    }
                    state = DropState::SubmergedFloating;
                } else {
                    if depth > 0.5 * height && mesh_dz < -0.1 * height {
                        for _ in 0..4 {
                            let pos = self.random_point_in(&cobj.bbox);
                            self.env.effects.spawn_bubble(pos);
                        }
                    }
                    let fall_rate = (density - WATER_DENSITY) / density;
                    max_dz = (gravity_dz * fall_rate).min(max_dz);
                    v_fall = v_fall.max(-0.001 / consts.tstep);
                    state = DropState::SubmergedSinking;
                }
                if prev_v_fall < 8.0 * accel {
                    let size = (-5000.0 * prev_v_fall * mass).min(100.0);
                    let radius = (2.0 * consts.actor_radius).min(cobj.bsphere_radius());
                    self.env.effects.spawn_splash(center, size, radius);
                }
            } else if depth > 0.5 * height {
                trace!("Cobj {} is frozen in ice", id);
                return Ok(DropState::StuckInIce);
            }
        }
        delta.2 = delta.2.max(-max_dz);
        self.world.set_v_fall(id, v_fall)?;
        self.world.move_cobj(id, delta)?;
        self.world.mark_shadow_dirty();
        self.recheck_dynamic_objects(id)?;
        trace!("Dropped cobj {} by {} ({:?}, v_fall {})", id, delta.2, state, v_fall);
        Ok(state)
    }

    fn random_point_in(&mut self, bbox: &BoundingBox) -> Point {
        let mut coord = |dim: usize| {
            let (lo, hi) = (bbox.d[dim][0], bbox.d[dim][1]);
            if hi > lo { self.rng.random_range(lo..hi) } else { lo }
        };
        (coord(0), coord(1), coord(2))
    }
}

/// Radius of flattened vegetation under a landing object: half its extent across
/// the direction of motion, adjusted for how much of its bottom touches the ground.
fn crush_radius(shape: &Shape, bbox: &BoundingBox, delta: Point) -> f64 {
    let dim = if delta.1.abs() < delta.0.abs() { 1 } else { 0 };
    let radius = 0.5 * bbox.extent(dim);

    match shape {
        Shape::Cube => 1.4 * radius,
        Shape::Sphere(_) => 0.2 * radius,
        Shape::Cylinder(c) => radius.min(c.max_radius()),
        _ => radius,
    }
}
