// rs_cobj_physics_wasm/src/lib.rs
// This is the public API for the wasm wrapper of the movable-object physics library.

use wasm_bindgen::prelude::*;
use rs_cobj_physics::apis::easy_world::EasyWorld;
use rs_cobj_physics::errors::CobjError;
use rs_cobj_physics::intersection::Intersection;
use rs_cobj_physics::simulation::DropState;

fn to_js(e: CobjError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn drop_state_code(state: DropState) -> u32 {
    match state {
        DropState::Falling => 0,
        DropState::RestingOnSurface => 1,
        DropState::RestingInStack => 2,
        DropState::StuckCanRoll => 3,
        DropState::SubmergedFloating => 4,
        DropState::SubmergedSinking => 5,
        DropState::StuckInIce => 6,
    }
}

#[wasm_bindgen]
pub struct WasmWorld {
    world: EasyWorld,
}

#[wasm_bindgen]
impl WasmWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { world: EasyWorld::new() }
    }

    /// A world over flat ground; pass `NaN` for `water_z` to leave out the water.
    #[wasm_bindgen]
    pub fn with_custom_constants(gravity: f64, tstep: f64, step_height: f64, ground_z: f64, water_z: f64) -> Result<WasmWorld, JsValue> {
        let water = if water_z.is_nan() { None } else { Some(water_z) };
        EasyWorld::with_custom_constants(gravity, tstep, step_height, ground_z, water)
            .map(|world| WasmWorld { world })
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_cube(&mut self, x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64, density: f64, movable: bool) -> Result<usize, JsValue> {
        self.world.add_cube((x1, y1, z1), (x2, y2, z2), density, movable).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_sphere(&mut self, x: f64, y: f64, z: f64, radius: f64, density: f64, movable: bool) -> Result<usize, JsValue> {
        self.world.add_sphere((x, y, z), radius, density, movable).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_moving(&mut self, id: usize) -> Result<(), JsValue> {
        self.world.set_moving(id).map_err(to_js)
    }

    /// Returns the applied `[dx, dy]`, or an empty array when the object didn't move.
    #[wasm_bindgen]
    pub fn push(&mut self, id: usize, dx: f64, dy: f64) -> Result<Vec<f64>, JsValue> {
        let moved = self.world.push(id, dx, dy).map_err(to_js)?;
        Ok(moved.map_or_else(Vec::new, |d| vec![d.0, d.1]))
    }

    /// Steps the world; returns `[id, state, id, state, ...]`.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<Vec<u32>, JsValue> {
        let states = self.world.step().map_err(to_js)?;
        Ok(states.into_iter().flat_map(|(id, state)| [id as u32, drop_state_code(state)]).collect())
    }

    #[wasm_bindgen]
    pub fn position(&self, id: usize) -> Result<Vec<f64>, JsValue> {
        let p = self.world.position(id).map_err(to_js)?;
        Ok(vec![p.0, p.1, p.2])
    }

    /// 0 = no, 1 = yes, 2 = maybe.
    #[wasm_bindgen]
    pub fn intersects(&self, a: usize, b: usize) -> Result<u32, JsValue> {
        Ok(match self.world.intersects(a, b).map_err(to_js)? {
            Intersection::No => 0,
            Intersection::Yes => 1,
            Intersection::Maybe => 2,
        })
    }
}
