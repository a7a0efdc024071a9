pub mod ball;
pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod world;
