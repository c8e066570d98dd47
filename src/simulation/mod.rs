mod driver;
mod drop_sim;
mod motion_solver;
mod push_sim;

pub use drop_sim::*;
pub use motion_solver::*;

use crate::environment::Environment;
use crate::errors::CobjError;
use crate::models::CollisionObject;
use crate::utils::SimulationConstants;
use crate::world::CobjWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Ids of objects that are currently moving and get a drop step every tick.
///
/// Filled by successful pushes; destroyed objects are pruned by
/// `Simulation::proc_moving_cobjs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovingSet {
    ids: BTreeSet<usize>,
}

impl MovingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: usize) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: usize) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ids.iter().copied()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.ids.retain(|&id| keep(id));
    }
}

/// The movable-object simulators: a world, the collaborators they consult and
/// the constants they run with.
pub struct Simulation {
    pub world: CobjWorld,
    pub env: Environment,
    pub constants: SimulationConstants,
    rng: StdRng,
}

impl Simulation {
    /// # Errors
    /// `CobjError::InvalidConstant` if `constants` fail validation.
    pub fn new(world: CobjWorld, env: Environment, constants: SimulationConstants) -> Result<Self, CobjError> {
        constants.validate()?;
        Ok(Simulation { world, env, constants, rng: StdRng::from_os_rng() })
    }

    /// Reseeds the random source used for bubbles and sliding sounds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn collect_cobjs(&self, ids: &[usize]) -> Result<Vec<&CollisionObject>, CobjError> {
        ids.iter().map(|&id| self.world.get_cobj(id)).collect()
    }
}
