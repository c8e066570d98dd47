mod cobj_world;
mod spatial_index;

pub use cobj_world::*;
pub use spatial_index::*;
