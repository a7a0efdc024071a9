/*
Point helpers used by the ball controller to turn a mouse drag into a launch.

use crate::modules::geometry::{angle, distance};

let force = distance(origin, mouse) * 50.0;
let dir = angle(origin, mouse); // radians, measured from origin toward mouse
*/

use macroquad::prelude::Vec2;
use std::f32::consts::PI;

/// Euclidean distance between two points. Always >= 0.
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle in radians of the vector p1 -> p2, in (-PI, PI].
///
/// Coincident points give 0.
pub fn angle(p1: Vec2, p2: Vec2) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let a = dy.atan2(dx);
    // atan2 returns -PI for a negative-zero dy; fold it onto PI
    if a <= -PI { PI } else { a }
}
