mod lines;
mod polygons;
mod solids;

pub use lines::*;
pub use polygons::*;
pub use solids::*;
