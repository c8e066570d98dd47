// src/environment/reference.rs
//
// Small in-memory collaborators for standalone use and tests.

use crate::environment::{
    DynamicObjects, EffectsSink, Environment, PlatformRegistry, SoundId, Teleporter, TerrainField,
    Vegetation,
};
use crate::models::BoundingBox;
use crate::utils::{sub_vectors, Point};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Level ground with an optional flat water surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTerrain {
    pub ground_z: f64,
    pub water_z: Option<f64>,
    pub iced: bool,
    pub temperature: f64,
}

impl Default for FlatTerrain {
    fn default() -> Self {
        FlatTerrain { ground_z: 0.0, water_z: None, iced: false, temperature: 20.0 }
    }
}

impl FlatTerrain {
    pub fn new(ground_z: f64) -> Self {
        FlatTerrain { ground_z, ..Default::default() }
    }

    pub fn with_water(mut self, water_z: f64) -> Self {
        self.water_z = Some(water_z);
        self
    }

    /// Freezes the water: sets the ice flag and drops the temperature to `temperature`.
    pub fn frozen(mut self, temperature: f64) -> Self {
        self.iced = true;
        self.temperature = temperature;
        self
    }
}

impl TerrainField for FlatTerrain {
    fn terrain_height(&self, _x: f64, _y: f64) -> f64 {
        self.ground_z
    }

    fn water_depth(&self, pos: Point) -> Option<f64> {
        let water_z = self.water_z?;
        (pos.2 < water_z && pos.2 >= self.ground_z).then(|| water_z - pos.2)
    }

    fn is_ice(&self, _x: f64, _y: f64) -> bool {
        self.iced && self.water_z.is_some()
    }

    fn water_height(&self, _x: f64, _y: f64) -> f64 {
        self.water_z.unwrap_or(self.ground_z)
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoVegetation;

impl Vegetation for NoVegetation {
    fn crush(&mut self, _pos: Point, _radius: f64) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl EffectsSink for NoEffects {
    fn play_sound(&mut self, _sound: SoundId, _pos: Point, _volume: f64, _pitch: f64) {}
    fn spawn_bubble(&mut self, _pos: Point) {}
    fn spawn_splash(&mut self, _pos: Point, _size: f64, _radius: f64) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectEvent {
    Sound { sound: SoundId, pos: Point, volume: f64, pitch: f64 },
    Bubble(Point),
    Splash { pos: Point, size: f64, radius: f64 },
    Crush { pos: Point, radius: f64 },
}

/// Effects sink and vegetation that record every call. Clones share one log, so
/// a handle kept outside the environment sees what the simulators emitted.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffects {
    events: Rc<RefCell<Vec<EffectEvent>>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EffectEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, event: EffectEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl EffectsSink for RecordingEffects {
    fn play_sound(&mut self, sound: SoundId, pos: Point, volume: f64, pitch: f64) {
        self.record(EffectEvent::Sound { sound, pos, volume, pitch });
    }

    fn spawn_bubble(&mut self, pos: Point) {
        self.record(EffectEvent::Bubble(pos));
    }

    fn spawn_splash(&mut self, pos: Point, size: f64, radius: f64) {
        self.record(EffectEvent::Splash { pos, size, radius });
    }
}

impl Vegetation for RecordingEffects {
    fn crush(&mut self, pos: Point, radius: f64) {
        self.record(EffectEvent::Crush { pos, radius });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoTeleporters;

impl Teleporter for NoTeleporters {
    fn maybe_teleport(&mut self, _pos: &mut Point, _radius: f64) -> bool {
        false
    }
}

/// A single teleporter: a sphere of the given radius fully inside `entry` is
/// moved by the offset between the entry centre and `exit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportVolume {
    pub entry: BoundingBox,
    pub exit: Point,
}

impl Teleporter for TeleportVolume {
    fn maybe_teleport(&mut self, pos: &mut Point, radius: f64) -> bool {
        if !self.entry.expanded_by(-radius).contains_pt(*pos) {
            return false;
        }
        let offset = sub_vectors(*pos, self.entry.center());
        *pos = (self.exit.0 + offset.0, self.exit.1 + offset.1, self.exit.2 + offset.2);
        true
    }
}

/// Platform registry backed by a set of running platform ids.
#[derive(Debug, Clone, Default)]
pub struct ActivePlatforms {
    pub active: BTreeSet<usize>,
}

impl PlatformRegistry for ActivePlatforms {
    fn is_active(&self, platform_id: usize) -> bool {
        self.active.contains(&platform_id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDynamicObjects;

impl DynamicObjects for NoDynamicObjects {
    fn resting_objects(&self) -> Vec<(usize, Point, f64)> {
        Vec::new()
    }

    fn wake(&mut self, _id: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicSphere {
    pub pos: Point,
    pub radius: f64,
    pub resting: bool,
}

/// Dynamic objects as plain spheres; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct DynamicSphereList {
    objects: Rc<RefCell<Vec<DynamicSphere>>>,
}

impl DynamicSphereList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its id.
    pub fn push(&self, object: DynamicSphere) -> usize {
        let mut objects = self.objects.borrow_mut();
        objects.push(object);
        objects.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<DynamicSphere> {
        self.objects.borrow().get(id).copied()
    }
}

impl DynamicObjects for DynamicSphereList {
    fn resting_objects(&self) -> Vec<(usize, Point, f64)> {
        self.objects
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, obj)| obj.resting)
            .map(|(id, obj)| (id, obj.pos, obj.radius))
            .collect()
    }

    fn wake(&mut self, id: usize) {
        if let Some(obj) = self.objects.borrow_mut().get_mut(id) {
            obj.resting = false;
        }
    }
}

impl Default for Environment {
    /// Dry flat ground at z = 0 with no vegetation, effects, teleporters,
    /// platforms or dynamic objects.
    fn default() -> Self {
        Environment {
            terrain: Box::new(FlatTerrain::default()),
            vegetation: Box::new(NoVegetation),
            effects: Box::new(NoEffects),
            teleporter: Box::new(NoTeleporters),
            platforms: Box::new(ActivePlatforms::default()),
            dynamic_objects: Box::new(NoDynamicObjects),
        }
    }
}

impl Environment {
    pub fn with_terrain(mut self, terrain: impl TerrainField + 'static) -> Self {
        self.terrain = Box::new(terrain);
        self
    }

    pub fn with_vegetation(mut self, vegetation: impl Vegetation + 'static) -> Self {
        self.vegetation = Box::new(vegetation);
        self
    }

    pub fn with_effects(mut self, effects: impl EffectsSink + 'static) -> Self {
        self.effects = Box::new(effects);
        self
    }

    pub fn with_teleporter(mut self, teleporter: impl Teleporter + 'static) -> Self {
        self.teleporter = Box::new(teleporter);
        self
    }

    pub fn with_platforms(mut self, platforms: impl PlatformRegistry + 'static) -> Self {
        self.platforms = Box::new(platforms);
        self
    }

    pub fn with_dynamic_objects(mut self, dynamic_objects: impl DynamicObjects + 'static) -> Self {
        self.dynamic_objects = Box::new(dynamic_objects);
        self
    }
}
