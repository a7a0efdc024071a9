/*
Wrecking ball: drag from a ball to aim, press again to fire it at a block
pile and a swinging pendulum. Physics by Rapier2D, drawing by macroquad.
*/

pub mod modules;
