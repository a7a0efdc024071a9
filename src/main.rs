/*
By: <Draydon Levesque>
Date: 2025-12-09
Program Details: <Wrecking ball physics demo>

Press to place the ball, press again to launch it toward the cursor, press a
third time to clear it. Close the window or hit Escape to quit.
*/

use macroquad::prelude::*;
use wrecking_ball::modules::ball::BallController;
use wrecking_ball::modules::clock::FrameClock;
use wrecking_ball::modules::config::{SimConfig, logger};
use wrecking_ball::modules::draw::{BACKGROUND, frame, paint};
use wrecking_ball::modules::scene::build_scene;
use wrecking_ball::modules::world::PhysicsWorld;

/// Set up window settings before the app runs
fn window_conf() -> Conf {
    SimConfig::default().window_conf()
}

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

#[macroquad::main(window_conf)]
async fn main() {
    logger().init();

    let config = SimConfig::default();
    if let Err(e) = config.validate() {
        log::error!("cannot start: {e}");
        std::process::exit(1);
    }

    // -------- Physics Init ---------------------------------------------------
    let mut world = PhysicsWorld::new(config.gravity, config.dt());
    if let Err(e) = build_scene(&mut world, &config) {
        log::error!("cannot build scene: {e}");
        std::process::exit(1);
    }

    let mut controller = BallController::new(&config);
    let mut clock = FrameClock::new(config.fps);

    // Window close goes through is_quit_requested() so we can leave the loop
    prevent_quit();

    loop {
        let mouse = Vec2::from(mouse_position());
        // Aim line reflects the state at the start of the frame
        let aim = controller.drag_line(mouse);

        // ---- Input ----
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            break;
        }
        for button in BUTTONS {
            if is_mouse_button_pressed(button) {
                match controller.on_press(&mut world, mouse) {
                    Ok(event) => log::debug!("{button:?} press: {event:?}"),
                    Err(e) => log::warn!("press ignored: {e}"),
                }
            }
        }

        // ---- Draw ----
        clear_background(BACKGROUND);
        paint(&frame(&world, aim));

        // ---- Physics step ----
        world.step();

        let spent = clock.tick();
        log::trace!("frame took {:.2} ms", spent.as_secs_f64() * 1000.0);
        next_frame().await;
    }

    log::info!("window closed, {} bodies left", world.body_count());
}
