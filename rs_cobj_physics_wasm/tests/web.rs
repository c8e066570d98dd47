use rs_cobj_physics_wasm::WasmWorld;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_crate_falls_to_ground() {
    let mut world = WasmWorld::with_custom_constants(9.81, 0.04, 0.5, 0.0, f64::NAN).unwrap();
    let id = world.add_cube(0.0, 0.0, 2.0, 1.0, 1.0, 3.0, 0.5, true).unwrap();
    world.set_moving(id).unwrap();

    for _ in 0..200 {
        world.step().unwrap();
    }
    let pos = world.position(id).unwrap();
    assert!((pos[2] - 0.5).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn test_intersects_reports_codes() {
    let mut world = WasmWorld::new();
    let a = world.add_cube(0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, false).unwrap();
    let b = world.add_sphere(0.5, 0.5, 1.2, 0.5, 1.0, false).unwrap();
    let c = world.add_sphere(5.0, 5.0, 5.0, 0.5, 1.0, false).unwrap();
    assert_eq!(world.intersects(a, b).unwrap(), 1);
    assert_eq!(world.intersects(a, c).unwrap(), 0);
}
