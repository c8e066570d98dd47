use crate::utils;

pub const DEFAULT_SIMULATION_CONSTANTS: utils::SimulationConstants = utils::SimulationConstants {
    gravity: 9.80665,
    tstep: 1.0 / 60.0,
    step_height: 0.6,
    scene_size: (64.0, 64.0),
    half_dxy: 0.25,
    scene_zmin: -20.0,
    freeze_point: 0.0,
    actor_radius: 0.5,
    tolerance: 1.0e-6,
};

/// Polygons at or below this thickness are treated as infinitely thin.
pub const MIN_POLY_THICK: f64 = 1.0e-4;

/// Guard for near-zero denominators and vector lengths in the geometry code.
pub const GEOM_EPSILON: f64 = 1.0e-9;

/// Density of liquid water; objects at or below it float.
pub const WATER_DENSITY: f64 = 1.0;
