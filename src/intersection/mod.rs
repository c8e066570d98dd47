mod cobj_intersection;

pub use cobj_intersection::*;

#[cfg(test)]
mod intersection_tests;
