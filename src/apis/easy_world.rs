// src/apis/easy_world.rs

use crate::environment::{Environment, FlatTerrain};
use crate::errors::CobjError;
use crate::intersection::Intersection;
use crate::models::CollisionObject;
use crate::simulation::{DropState, MovingSet, Simulation};
use crate::utils::{Point, SimulationConstants};
use crate::world::CobjWorld;

/// A simplified interface over the movable-object simulation.
///
/// Owns a world, a flat terrain and the moving set, so a caller only has to add
/// objects, push them and step the world.
pub struct EasyWorld {
    sim: Simulation,
    moving: MovingSet,
}

impl EasyWorld {
    /// Creates an empty world with default constants on dry ground at z = 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_cobj_physics::apis::easy_world::EasyWorld;
    ///
    /// let mut world = EasyWorld::new();
    /// let crate_id = world.add_cube((0.0, 0.0, 2.0), (1.0, 1.0, 3.0), 0.5, true).unwrap();
    /// world.set_moving(crate_id).unwrap();
    ///
    /// for _ in 0..600 {
    ///     world.step().unwrap();
    /// }
    /// assert!(world.bottom(crate_id).unwrap().abs() < 1e-6);
    /// ```
    pub fn new() -> Self {
        Self::with_environment(SimulationConstants::default(), Environment::default())
            .unwrap_or_else(|_| unreachable!("default constants are valid"))
    }

    /// Creates a world with custom constants and collaborators.
    ///
    /// # Errors
    /// Returns `CobjError::InvalidConstant` if `constants` don't validate.
    pub fn with_environment(constants: SimulationConstants, env: Environment) -> Result<Self, CobjError> {
        Ok(Self { sim: Simulation::new(CobjWorld::new(), env, constants)?, moving: MovingSet::new() })
    }

    /// Creates a world with custom gravity, time step and step height over flat
    /// terrain at `ground_z`, with optional water surface at `water_z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_cobj_physics::apis::easy_world::EasyWorld;
    ///
    /// // low gravity, large steps, a pond 2 units deep
    /// let world = EasyWorld::with_custom_constants(1.62, 0.02, 0.6, 0.0, Some(2.0));
    /// assert!(world.is_ok());
    /// ```
    pub fn with_custom_constants(
        gravity: f64,
        tstep: f64,
        step_height: f64,
        ground_z: f64,
        water_z: Option<f64>,
    ) -> Result<Self, CobjError> {
        let constants = SimulationConstants::new(Some(gravity), Some(tstep), Some(step_height), None, None);
        let mut terrain = FlatTerrain::new(ground_z);
        terrain.water_z = water_z;
        Self::with_environment(constants, Environment::default().with_terrain(terrain))
    }

    fn add(&mut self, cobj: CollisionObject, density: f64, movable: bool) -> Result<usize, CobjError> {
        let cobj = cobj.with_density(density)?;
        let cobj = if movable { cobj.movable() } else { cobj };
        Ok(self.sim.world.add_cobj(cobj))
    }

    /// Adds an axis-aligned box between two corners.
    pub fn add_cube(&mut self, a: Point, b: Point, density: f64, movable: bool) -> Result<usize, CobjError> {
        self.add(CollisionObject::new_cube(a, b)?, density, movable)
    }

    pub fn add_sphere(&mut self, center: Point, radius: f64, density: f64, movable: bool) -> Result<usize, CobjError> {
        self.add(CollisionObject::new_sphere(center, radius)?, density, movable)
    }

    pub fn add_cylinder(&mut self, p1: Point, p2: Point, radius: f64, density: f64, movable: bool) -> Result<usize, CobjError> {
        self.add(CollisionObject::new_cylinder(p1, p2, radius, radius)?, density, movable)
    }

    /// Adds a static triangle or quad with the given thickness (0 for thin).
    pub fn add_polygon(&mut self, points: Vec<Point>, thickness: f64) -> Result<usize, CobjError> {
        self.add(CollisionObject::new_polygon(points, thickness)?, 1.0, false)
    }

    /// Starts simulating an object every step (so it can fall).
    pub fn set_moving(&mut self, id: usize) -> Result<(), CobjError> {
        self.sim.world.get_cobj(id)?;
        self.moving.insert(id);
        Ok(())
    }

    /// Pushes an object horizontally.
    ///
    /// # Returns
    /// The displacement actually applied, or `None` if it couldn't move.
    pub fn push(&mut self, id: usize, dx: f64, dy: f64) -> Result<Option<Point>, CobjError> {
        let mut delta = (dx, dy, 0.0);
        let moved = self.sim.push_cobj(&mut self.moving, id, &mut delta)?;
        Ok(moved.then_some(delta))
    }

    /// Advances every moving object by one tick.
    pub fn step(&mut self) -> Result<Vec<(usize, DropState)>, CobjError> {
        self.sim.proc_moving_cobjs(&mut self.moving)
    }

    pub fn rotate(&mut self, id: usize, pivot: Point, axis: Point, angle: f64) -> Result<(), CobjError> {
        self.sim.world.rotate_cobj(id, pivot, axis, angle)
    }

    pub fn destroy(&mut self, id: usize) -> Result<(), CobjError> {
        self.sim.world.destroy_cobj(id)
    }

    /// Centre point of an object.
    pub fn position(&self, id: usize) -> Result<Point, CobjError> {
        Ok(self.sim.world.get_cobj(id)?.center_pt())
    }

    pub fn bottom(&self, id: usize) -> Result<f64, CobjError> {
        Ok(self.sim.world.get_cobj(id)?.bottom())
    }

    pub fn v_fall(&self, id: usize) -> Result<f64, CobjError> {
        Ok(self.sim.world.get_cobj(id)?.v_fall)
    }

    /// Overlap test between two objects, with touching objects not counted.
    pub fn intersects(&self, a: usize, b: usize) -> Result<Intersection, CobjError> {
        let toler = self.sim.constants.tolerance;
        Ok(self.sim.world.get_cobj(a)?.intersects_cobj(self.sim.world.get_cobj(b)?, toler))
    }

    pub fn moving_count(&self) -> usize {
        self.moving.len()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

impl Default for EasyWorld {
    fn default() -> Self {
        Self::new()
    }
}
