// src/constants_config.rs
use crate::errors::CobjError;
use crate::utils::DEFAULT_SIMULATION_CONSTANTS;

/// World constants shared by the drop and push simulators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    /// Downward gravitational acceleration (positive number).
    pub gravity: f64,
    /// Simulation time step per tick.
    pub tstep: f64,
    /// Maximum step an actor can climb; movable objects use a fraction of it.
    pub step_height: f64,
    /// Half extent of the scene in x and y; objects are kept inside `[-size, size - half_dxy]`.
    pub scene_size: (f64, f64),
    /// Half of one terrain grid cell.
    pub half_dxy: f64,
    /// Lowest z any object may fall to.
    pub scene_zmin: f64,
    /// Temperature at or below which water is frozen.
    pub freeze_point: f64,
    /// Actor collision radius, used to cap splash sizes.
    pub actor_radius: f64,
    /// Slack applied to every intersection test of the simulators.
    pub tolerance: f64,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONSTANTS
    }
}

impl SimulationConstants {
    pub fn new(
        gravity: Option<f64>,
        tstep: Option<f64>,
        step_height: Option<f64>,
        scene_size: Option<(f64, f64)>,
        scene_zmin: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONSTANTS;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            tstep: tstep.unwrap_or(default.tstep),
            step_height: step_height.unwrap_or(default.step_height),
            scene_size: scene_size.unwrap_or(default.scene_size),
            scene_zmin: scene_zmin.unwrap_or(default.scene_zmin),
            ..default
        }
    }

    /// Checks that the constants describe a usable world.
    pub fn validate(&self) -> Result<(), CobjError> {
        if !(self.tstep > 0.0) { return Err(CobjError::InvalidConstant("tstep must be positive".to_string())); }
        if self.gravity < 0.0 { return Err(CobjError::InvalidConstant("gravity must be non-negative".to_string())); }
        if self.step_height < 0.0 { return Err(CobjError::InvalidConstant("step height must be non-negative".to_string())); }
        if self.scene_size.0 <= 0.0 || self.scene_size.1 <= 0.0 {
            return Err(CobjError::InvalidConstant("scene size must be positive".to_string()));
        }
        if !(self.tolerance > 0.0) { return Err(CobjError::InvalidConstant("tolerance must be positive".to_string())); }
        Ok(())
    }

    /// Height a movable object can be lifted over while pushed: 40% of the actor step height.
    pub fn cobj_step_height(&self) -> f64 {
        0.4 * self.step_height
    }

    /// Per-tick change of `v_fall`. Movable objects fall with half gravity.
    pub fn fall_acceleration(&self) -> f64 {
        -0.5 * self.gravity * self.tstep
    }
}
