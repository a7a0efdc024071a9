/*
Debug drawing straight from the physics state.

collect() turns every collider into a flat list of primitives and paint()
hands them to macroquad. Collecting reads the world only, so calling it
twice on an unchanged world yields the same list.
*/

use crate::modules::world::{PhysicsWorld, na_to_vec2};
use macroquad::prelude::*;
use rapier2d::prelude::{Isometry, Point, Real};

pub const BACKGROUND: Color = WHITE;
pub const OUTLINE: Color = Color::new(0.25, 0.25, 0.25, 1.0);
pub const AIM_LINE_COLOR: Color = BLACK;
pub const AIM_LINE_THICKNESS: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Rectangle centered on `center`, rotated by `rotation` radians
    Box {
        center: Vec2,
        half_extents: Vec2,
        rotation: f32,
        color: Color,
    },
    /// Circle with a radius tick showing its rotation
    Circle {
        center: Vec2,
        radius: f32,
        rotation: f32,
        color: Color,
    },
    /// Thick line with round caps
    Segment {
        a: Vec2,
        b: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        a: Vec2,
        b: Vec2,
        thickness: f32,
        color: Color,
    },
}

fn transform(iso: &Isometry<Real>, x: f32, y: f32) -> Vec2 {
    let p = iso.transform_point(&Point::new(x, y));
    Vec2::new(p.x, p.y)
}

/// Display list for every collider in the world.
pub fn collect(world: &PhysicsWorld) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(world.colliders.len());

    for (_handle, collider) in world.colliders.iter() {
        let color = collider
            .parent()
            .map(|body| world.color_of(body))
            .unwrap_or(GRAY);
        // World-space pose of the collider, parent offset included
        let iso = collider.position();
        let center = na_to_vec2(&iso.translation.vector);
        let rotation = iso.rotation.angle();
        let shape = collider.shape();

        if let Some(ball) = shape.as_ball() {
            out.push(Primitive::Circle {
                center,
                radius: ball.radius,
                rotation,
                color,
            });
        } else if let Some(cuboid) = shape.as_cuboid() {
            out.push(Primitive::Box {
                center,
                half_extents: na_to_vec2(&cuboid.half_extents),
                rotation,
                color,
            });
        } else if let Some(round) = shape.as_round_cuboid() {
            let border = round.border_radius;
            out.push(Primitive::Box {
                center,
                half_extents: na_to_vec2(&round.inner_shape.half_extents) + Vec2::splat(border),
                rotation,
                color,
            });
        } else if let Some(capsule) = shape.as_capsule() {
            let seg = capsule.segment;
            out.push(Primitive::Segment {
                a: transform(iso, seg.a.x, seg.a.y),
                b: transform(iso, seg.b.x, seg.b.y),
                radius: capsule.radius,
                color,
            });
        } else if let Some(seg) = shape.as_segment() {
            out.push(Primitive::Segment {
                a: transform(iso, seg.a.x, seg.a.y),
                b: transform(iso, seg.b.x, seg.b.y),
                radius: 1.0,
                color,
            });
        } else {
            log::trace!("skipping unsupported shape {:?}", shape.shape_type());
        }
    }
    out
}

/// Issue the macroquad draw calls for a display list.
pub fn paint(primitives: &[Primitive]) {
    for p in primitives {
        match *p {
            Primitive::Box {
                center,
                half_extents,
                rotation,
                color,
            } => {
                let size = half_extents * 2.0;
                draw_rectangle_ex(
                    center.x,
                    center.y,
                    size.x,
                    size.y,
                    DrawRectangleParams {
                        offset: vec2(0.5, 0.5),
                        rotation,
                        color,
                    },
                );
            }
            Primitive::Circle {
                center,
                radius,
                rotation,
                color,
            } => {
                draw_circle(center.x, center.y, radius, color);
                draw_circle_lines(center.x, center.y, radius, 1.0, OUTLINE);
                let tip = center + Vec2::from_angle(rotation) * radius;
                draw_line(center.x, center.y, tip.x, tip.y, 1.0, OUTLINE);
            }
            Primitive::Segment { a, b, radius, color } => {
                draw_line(a.x, a.y, b.x, b.y, radius * 2.0, color);
                draw_circle(a.x, a.y, radius, color);
                draw_circle(b.x, b.y, radius, color);
            }
            Primitive::Line {
                a,
                b,
                thickness,
                color,
            } => draw_line(a.x, a.y, b.x, b.y, thickness, color),
        }
    }
}

/// Everything drawn in one frame on top of the cleared background: the aim
/// line first, then the world.
pub fn frame(world: &PhysicsWorld, aim: Option<(Vec2, Vec2)>) -> Vec<Primitive> {
    let mut out = Vec::new();
    if let Some((a, b)) = aim {
        out.push(Primitive::Line {
            a,
            b,
            thickness: AIM_LINE_THICKNESS,
            color: AIM_LINE_COLOR,
        });
    }
    out.extend(collect(world));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::SimConfig;
    use crate::modules::scene::{BROWN, build_scene};

    fn scene() -> PhysicsWorld {
        let cfg = SimConfig::default();
        let mut w = PhysicsWorld::new(cfg.gravity, cfg.dt());
        build_scene(&mut w, &cfg).unwrap();
        w
    }

    #[test]
    fn one_primitive_per_collider() {
        let w = scene();
        let list = collect(&w);
        // 4 walls + 3 blocks + rod + bob
        assert_eq!(list.len(), 9);
        let boxes = list.iter().filter(|p| matches!(p, Primitive::Box { .. })).count();
        let circles = list.iter().filter(|p| matches!(p, Primitive::Circle { .. })).count();
        let segments = list.iter().filter(|p| matches!(p, Primitive::Segment { .. })).count();
        assert_eq!((boxes, circles, segments), (7, 1, 1));
    }

    #[test]
    fn collecting_twice_gives_identical_output() {
        let mut w = scene();
        w.step();
        let aim = Some((Vec2::new(10.0, 10.0), Vec2::new(40.0, 50.0)));
        let first = frame(&w, aim);
        let second = frame(&w, aim);
        assert_eq!(first, second);
    }

    #[test]
    fn structure_keeps_its_color() {
        let w = scene();
        let brown = collect(&w)
            .into_iter()
            .filter(|p| matches!(p, Primitive::Box { color, .. } if *color == BROWN))
            .count();
        assert_eq!(brown, 3);
    }

    #[test]
    fn rod_runs_from_arm_origin_to_bob() {
        let w = scene();
        let seg = collect(&w).into_iter().find_map(|p| match p {
            Primitive::Segment { a, b, radius, .. } => Some((a, b, radius)),
            _ => None,
        });
        let (a, b, radius) = seg.unwrap();
        assert!((a - Vec2::new(300.0, 300.0)).length() < 1e-3);
        assert!((b - Vec2::new(555.0, 300.0)).length() < 1e-3);
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn aim_line_is_drawn_first() {
        let w = scene();
        let list = frame(&w, Some((Vec2::ZERO, Vec2::ONE)));
        assert!(matches!(
            list[0],
            Primitive::Line { thickness, .. } if thickness == AIM_LINE_THICKNESS
        ));
        assert_eq!(frame(&w, None).len(), list.len() - 1);
    }
}
