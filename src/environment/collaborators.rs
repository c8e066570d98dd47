use crate::utils::Point;

/// Sounds the simulators can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    ObjectFall,
    Sliding,
}

/// Ground, water and ice queries.
pub trait TerrainField {
    /// Ground height at `(x, y)`.
    fn terrain_height(&self, x: f64, y: f64) -> f64;

    /// Depth of `pos` below the water surface, or `None` when not underwater.
    fn water_depth(&self, pos: Point) -> Option<f64>;

    /// Whether the water surface at `(x, y)` is frozen over.
    fn is_ice(&self, x: f64, y: f64) -> bool;

    /// Water (or ice) surface height at `(x, y)`.
    fn water_height(&self, x: f64, y: f64) -> f64;

    /// Current world temperature.
    fn temperature(&self) -> f64;
}

pub trait Vegetation {
    /// Flattens grass and plants within `radius` of `pos`.
    fn crush(&mut self, pos: Point, radius: f64);
}

pub trait EffectsSink {
    fn play_sound(&mut self, sound: SoundId, pos: Point, volume: f64, pitch: f64);

    fn spawn_bubble(&mut self, pos: Point);

    fn spawn_splash(&mut self, pos: Point, size: f64, radius: f64);
}

pub trait Teleporter {
    /// Moves `pos` to a teleporter exit if a sphere of `radius` around it is
    /// inside a teleporter volume.
    fn maybe_teleport(&mut self, pos: &mut Point, radius: f64) -> bool;
}

pub trait PlatformRegistry {
    /// Whether the moving platform is currently running.
    fn is_active(&self, platform_id: usize) -> bool;
}

/// Fast-moving game objects (projectiles, items) that may come to rest on or
/// against collision objects.
pub trait DynamicObjects {
    /// `(id, position, radius)` of every object currently at rest.
    fn resting_objects(&self) -> Vec<(usize, Point, f64)>;

    /// Puts a resting object back into motion.
    fn wake(&mut self, id: usize);
}

/// Every external collaborator the simulators consume.
pub struct Environment {
    pub terrain: Box<dyn TerrainField>,
    pub vegetation: Box<dyn Vegetation>,
    pub effects: Box<dyn EffectsSink>,
    pub teleporter: Box<dyn Teleporter>,
    pub platforms: Box<dyn PlatformRegistry>,
    pub dynamic_objects: Box<dyn DynamicObjects>,
}
