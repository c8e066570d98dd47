mod bounding_box;
mod cobj;
mod quaternion;

pub use bounding_box::*;
pub use cobj::*;
pub use quaternion::*;

#[cfg(test)]
mod models_tests;
