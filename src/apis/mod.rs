pub mod easy_world;

#[cfg(test)]
mod easy_world_tests;
