/*
The wrecking ball. Every mouse press moves the controller one step around

    Empty -> Placed -> Launched -> Empty

Place: a fixed ball appears under the cursor and the press point becomes the
drag origin. Launch: the ball turns dynamic and is pushed toward the cursor
with an impulse proportional to the drag length. Remove: the ball leaves the
world.
*/

use crate::modules::config::SimConfig;
use crate::modules::error::SimError;
use crate::modules::geometry::{angle, distance};
use crate::modules::world::PhysicsWorld;
use macroquad::prelude::{Color, RED, Vec2};
use rapier2d::prelude::*;

pub const BALL_COLOR: Color = RED;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    Empty,
    /// Fixed ball waiting for the launch press
    Placed {
        body: RigidBodyHandle,
        drag_origin: Vec2,
    },
    Launched {
        body: RigidBodyHandle,
        impulse: Vec2,
    },
}

/// What a press did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallEvent {
    Placed(Vec2),
    Launched(Vec2),
    Removed,
}

#[derive(Debug, Clone)]
pub struct BallController {
    state: BallState,
    radius: f32,
    mass: f32,
    launch_scale: f32,
}

/// Impulse for a drag from `origin` to `release`: `scale` units per unit of
/// drag, pointing from origin toward release.
pub fn launch_impulse(origin: Vec2, release: Vec2, scale: f32) -> Vec2 {
    let dir = angle(origin, release);
    let force = distance(origin, release) * scale;
    Vec2::new(force * dir.cos(), force * dir.sin())
}

impl BallController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            state: BallState::Empty,
            radius: config.ball_radius,
            mass: config.ball_mass,
            launch_scale: config.launch_scale,
        }
    }

    pub fn state(&self) -> BallState {
        self.state
    }

    pub fn ball(&self) -> Option<RigidBodyHandle> {
        match self.state {
            BallState::Empty => None,
            BallState::Placed { body, .. } | BallState::Launched { body, .. } => Some(body),
        }
    }

    /// Aim line from the drag origin to the cursor, only while a ball waits
    /// to be launched.
    pub fn drag_line(&self, mouse: Vec2) -> Option<(Vec2, Vec2)> {
        match self.state {
            BallState::Placed { drag_origin, .. } => Some((drag_origin, mouse)),
            _ => None,
        }
    }

    /// Advance the state machine for one mouse press at `mouse`.
    pub fn on_press(&mut self, world: &mut PhysicsWorld, mouse: Vec2) -> Result<BallEvent, SimError> {
        match self.state {
            BallState::Empty => self.place(world, mouse).map(|_| BallEvent::Placed(mouse)),
            BallState::Placed { .. } => self.launch(world, mouse).map(BallEvent::Launched),
            BallState::Launched { .. } => self.remove(world).map(|_| BallEvent::Removed),
        }
    }

    /// Put a fixed ball at `pos` and start dragging from there.
    pub fn place(&mut self, world: &mut PhysicsWorld, pos: Vec2) -> Result<RigidBodyHandle, SimError> {
        if self.state != BallState::Empty {
            return Err(SimError::BallAlreadyPlaced);
        }
        // Fixed first, so it does not fall while the user aims
        let body = RigidBodyBuilder::fixed()
            .translation(vector![pos.x, pos.y])
            .ccd_enabled(true) // long drags give speeds that could skip a wall
            .build();
        let collider = ColliderBuilder::ball(self.radius)
            .mass(self.mass)
            .restitution(0.9) // keeps most of its energy on a bounce
            .friction(0.4)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();
        let body = world.insert_body(body, [collider], BALL_COLOR);
        self.state = BallState::Placed {
            body,
            drag_origin: pos,
        };
        log::info!("ball placed at ({:.0}, {:.0})", pos.x, pos.y);
        Ok(body)
    }

    /// Release the placed ball toward `release`. Returns the applied impulse.
    pub fn launch(&mut self, world: &mut PhysicsWorld, release: Vec2) -> Result<Vec2, SimError> {
        let (body, drag_origin) = match self.state {
            BallState::Placed { body, drag_origin } => (body, drag_origin),
            BallState::Empty => return Err(SimError::NoBall),
            BallState::Launched { .. } => return Err(SimError::NotPlaced),
        };
        let impulse = launch_impulse(drag_origin, release, self.launch_scale);
        world.make_dynamic(body)?;
        world.apply_impulse(body, impulse)?;
        self.state = BallState::Launched { body, impulse };
        log::info!("ball launched with impulse ({:.1}, {:.1})", impulse.x, impulse.y);
        Ok(impulse)
    }

    /// Take the ball out of the world, whatever state it is in.
    pub fn remove(&mut self, world: &mut PhysicsWorld) -> Result<(), SimError> {
        let body = self.ball().ok_or(SimError::NoBall)?;
        // Back to Empty even if the world already lost the body
        self.state = BallState::Empty;
        world.remove_body(body)?;
        log::info!("ball removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PhysicsWorld, BallController) {
        let cfg = SimConfig::default();
        (PhysicsWorld::new(cfg.gravity, cfg.dt()), BallController::new(&cfg))
    }

    #[test]
    fn impulse_for_horizontal_drag() {
        let i = launch_impulse(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 50.0);
        assert_eq!(i, Vec2::new(5000.0, 0.0));
    }

    #[test]
    fn impulse_points_toward_release() {
        let i = launch_impulse(Vec2::new(100.0, 100.0), Vec2::new(100.0, 40.0), 50.0);
        assert!(i.x.abs() < 1e-3);
        assert!((i.y + 3000.0).abs() < 1e-2);
    }

    #[test]
    fn zero_drag_gives_zero_impulse() {
        let p = Vec2::new(321.0, 123.0);
        assert_eq!(launch_impulse(p, p, 50.0), Vec2::ZERO);
    }

    #[test]
    fn three_presses_cycle_back_to_empty() {
        let (mut w, mut c) = setup();
        let origin = Vec2::new(100.0, 100.0);

        assert_eq!(c.on_press(&mut w, origin), Ok(BallEvent::Placed(origin)));
        let body = c.ball().unwrap();
        assert_eq!(w.body_count(), 1);
        assert!(!w.is_dynamic(body));
        assert_eq!(c.drag_line(Vec2::new(150.0, 90.0)), Some((origin, Vec2::new(150.0, 90.0))));

        let ev = c.on_press(&mut w, Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(ev, BallEvent::Launched(Vec2::new(5000.0, 0.0)));
        assert!(w.is_dynamic(body));
        assert_eq!(c.drag_line(Vec2::ZERO), None);
        // 5000 / 10 kg
        assert!((w.linvel(body).unwrap().x - 500.0).abs() < 1e-2);

        assert_eq!(c.on_press(&mut w, Vec2::ZERO), Ok(BallEvent::Removed));
        assert_eq!(c.state(), BallState::Empty);
        assert_eq!(w.body_count(), 0);
        assert!(!w.contains(body));
    }

    #[test]
    fn ball_flies_after_aiming_for_several_frames() {
        let (mut w, mut c) = setup();
        let origin = Vec2::new(150.0, 600.0);
        c.on_press(&mut w, origin).unwrap();
        let body = c.ball().unwrap();
        // the user aims for a while; the fixed ball goes through many steps
        for _ in 0..30 {
            w.step();
        }
        assert_eq!(w.translation(body), Some(origin));

        c.on_press(&mut w, Vec2::new(250.0, 600.0)).unwrap();
        w.step();
        let first = w.translation(body).unwrap();
        assert!(first.x > origin.x, "ball did not leave {origin:?}");
        for _ in 0..10 {
            w.step();
        }
        assert!(w.translation(body).unwrap().x > first.x);
    }

    #[test]
    fn guards_reject_out_of_order_calls() {
        let (mut w, mut c) = setup();
        assert_eq!(c.launch(&mut w, Vec2::ZERO), Err(SimError::NoBall));
        assert_eq!(c.remove(&mut w), Err(SimError::NoBall));

        c.place(&mut w, Vec2::new(50.0, 50.0)).unwrap();
        assert_eq!(c.place(&mut w, Vec2::ZERO), Err(SimError::BallAlreadyPlaced));
        assert_eq!(w.body_count(), 1);

        c.launch(&mut w, Vec2::new(60.0, 50.0)).unwrap();
        assert_eq!(c.launch(&mut w, Vec2::ZERO), Err(SimError::NotPlaced));
    }

    #[test]
    fn placed_ball_can_be_removed_directly() {
        let (mut w, mut c) = setup();
        c.place(&mut w, Vec2::new(50.0, 50.0)).unwrap();
        c.remove(&mut w).unwrap();
        assert_eq!(c.state(), BallState::Empty);
        assert_eq!(w.body_count(), 0);
    }
}
