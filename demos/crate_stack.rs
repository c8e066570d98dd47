// demos/crate_stack.rs

use rs_cobj_physics::apis::easy_world::EasyWorld;
use rs_cobj_physics::errors::CobjError;

fn main() -> Result<(), CobjError> {
    env_logger::init();

    // a pond 1.5 units deep next to dry ground
    let mut world = EasyWorld::with_custom_constants(9.80665, 1.0 / 60.0, 0.6, 0.0, Some(1.5))?;

    // two crates stacked in the air, and a heavy rock
    let bottom = world.add_cube((0.0, 0.0, 3.0), (1.0, 1.0, 4.0), 0.4, true)?;
    let top = world.add_cube((0.0, 0.0, 4.0), (1.0, 1.0, 5.0), 0.4, true)?;
    let rock = world.add_sphere((3.0, 0.0, 4.0), 0.5, 2.5, true)?;

    for id in [bottom, top, rock] {
        world.set_moving(id)?;
    }

    println!("Initial state:");
    for id in [bottom, top, rock] {
        println!("cobj {}: position={:?}", id, world.position(id)?);
    }

    for tick in 0..600 {
        let states = world.step()?;
        if tick % 120 == 0 {
            println!("tick {}: {:?}", tick, states);
        }
    }

    println!("\nAfter settling:");
    for id in [bottom, top, rock] {
        println!("cobj {}: position={:?}, v_fall={}", id, world.position(id)?, world.v_fall(id)?);
    }

    // shove the floating stack sideways
    match world.push(bottom, 0.5, 0.0)? {
        Some(delta) => println!("\nPushed the bottom crate by {:?}", delta),
        None => println!("\nThe bottom crate didn't move"),
    }
    println!("Intersection between crates: {:?}", world.intersects(bottom, top)?);
    Ok(())
}
