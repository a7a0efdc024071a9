/*
Scene setup: walls around the window, a small pile of blocks to knock over
and a pendulum hanging from a fixed pin. Each builder is meant to run once
per world at startup.
*/

use crate::modules::config::SimConfig;
use crate::modules::error::SimError;
use crate::modules::world::PhysicsWorld;
use macroquad::prelude::{Color, Vec2};
use rapier2d::prelude::*;

pub const WALL_COLOR: Color = Color::new(0.69, 0.69, 0.69, 1.0);
pub const BROWN: Color = Color::new(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 1.0);
pub const PENDULUM_COLOR: Color = Color::new(0.29, 0.44, 0.73, 1.0);

/// Handles of everything the builders put in the world.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub walls: Vec<RigidBodyHandle>,
    pub structure: Vec<RigidBodyHandle>,
    pub pendulum: Pendulum,
}

#[derive(Debug, Clone, Copy)]
pub struct Pendulum {
    pub anchor: RigidBodyHandle,
    pub arm: RigidBodyHandle,
    pub joint: ImpulseJointHandle,
}

/// Populate a fresh world with walls, structure and pendulum.
pub fn build_scene(world: &mut PhysicsWorld, config: &SimConfig) -> Result<SceneHandles, SimError> {
    let walls = build_boundaries(world, config.width, config.height, config.wall_thickness);
    let structure = build_structure(world, config.width, config.height);
    let pendulum = build_pendulum(world)?;
    log::info!(
        "scene ready: {} bodies, {} joints",
        world.body_count(),
        world.joint_count()
    );
    Ok(SceneHandles {
        walls,
        structure,
        pendulum,
    })
}

/// Floor, ceiling, left and right wall, each flush with the window edge.
pub fn build_boundaries(
    world: &mut PhysicsWorld,
    width: f32,
    height: f32,
    thickness: f32,
) -> Vec<RigidBodyHandle> {
    let t = thickness / 2.0;
    // (center, half extents)
    let rects = [
        (Vec2::new(width / 2.0, height - t), Vec2::new(width / 2.0, t)), // Floor
        (Vec2::new(width / 2.0, t), Vec2::new(width / 2.0, t)),          // Ceiling
        (Vec2::new(t, height / 2.0), Vec2::new(t, height / 2.0)),        // Left wall
        (Vec2::new(width - t, height / 2.0), Vec2::new(t, height / 2.0)), // Right wall
    ];

    rects
        .iter()
        .map(|(pos, half)| {
            // Fixed body: infinite mass, never moves
            let body = RigidBodyBuilder::fixed()
                .translation(vector![pos.x, pos.y])
                .build();
            // cuboid() takes half extents, not the full size
            let collider = ColliderBuilder::cuboid(half.x, half.y)
                .restitution(0.4) // some bounce off the walls
                .friction(0.5)
                .restitution_combine_rule(CoefficientCombineRule::Multiply)
                .friction_combine_rule(CoefficientCombineRule::Multiply)
                .build();
            world.insert_body(body, [collider], WALL_COLOR)
        })
        .collect()
}

/// Two pillars and a beam resting on top of them, sitting on the floor.
pub fn build_structure(world: &mut PhysicsWorld, _width: f32, height: f32) -> Vec<RigidBodyHandle> {
    // (center, size, mass)
    let rects = [
        (Vec2::new(600.0, height - 120.0), Vec2::new(40.0, 200.0), 100.0),
        (Vec2::new(900.0, height - 120.0), Vec2::new(40.0, 200.0), 100.0),
        (Vec2::new(750.0, height - 240.0), Vec2::new(340.0, 40.0), 150.0),
    ];
    // Rounded border, included in the outer size
    let border = 2.0;

    rects
        .iter()
        .map(|(pos, size, mass)| {
            // Dynamic body: gravity and hits from the ball move it
            let body = RigidBodyBuilder::dynamic()
                .translation(vector![pos.x, pos.y])
                .build();
            // Half extents shrink by the border so the outer size stays exact
            let collider = ColliderBuilder::round_cuboid(
                size.x / 2.0 - border,
                size.y / 2.0 - border,
                border,
            )
            .mass(*mass) // set directly, density follows from the area
            .restitution(0.4)
            .friction(0.4)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();
            world.insert_body(body, [collider], BROWN)
        })
        .collect()
}

/// Static pivot with a swinging arm: a thick rod ending in a heavy bob.
pub fn build_pendulum(world: &mut PhysicsWorld) -> Result<Pendulum, SimError> {
    let pivot = Vec2::new(300.0, 270.0);
    let arm_origin = Vec2::new(300.0, 300.0);
    let rod_length = 255.0;

    // Pivot: fixed and shapeless, only the joint hangs off it
    let anchor = world.insert_body(
        RigidBodyBuilder::fixed()
            .translation(vector![pivot.x, pivot.y])
            .build(),
        std::iter::empty::<Collider>(),
        PENDULUM_COLOR,
    );

    // Rod from the arm origin to (rod_length, 0), thickness 5
    let rod = ColliderBuilder::capsule_x(rod_length / 2.0, 5.0)
        .translation(vector![rod_length / 2.0, 0.0])
        .mass(8.0)
        .friction(1.0)
        .friction_combine_rule(CoefficientCombineRule::Multiply)
        .restitution_combine_rule(CoefficientCombineRule::Multiply)
        .build();
    // Bob centred on the far end of the rod; very bouncy
    let bob = ColliderBuilder::ball(40.0)
        .translation(vector![rod_length, 0.0])
        .mass(30.0)
        .friction(1.0)
        .restitution(0.95)
        .friction_combine_rule(CoefficientCombineRule::Multiply)
        .restitution_combine_rule(CoefficientCombineRule::Multiply)
        .build();
    // Both shapes share one dynamic body, total mass 38
    let arm = world.insert_body(
        RigidBodyBuilder::dynamic()
            .translation(vector![arm_origin.x, arm_origin.y])
            .build(),
        [rod, bob],
        PENDULUM_COLOR,
    );

    // Rod of fixed length between the two body origins; the arm is free to
    // turn about its own origin as well as swing around the pivot
    let joint = world.insert_pin_joint(anchor, arm, Vec2::ZERO, Vec2::ZERO)?;

    Ok(Pendulum { anchor, arm, joint })
}
