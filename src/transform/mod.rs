mod rigid_transform;
mod support;

pub use support::*;

#[cfg(test)]
mod transform_tests;
