mod constants;
mod vector_math;

pub use constants::*;
pub use vector_math::*;
pub use crate::constants_config::SimulationConstants;
