/*
Simulation settings. Everything the demo needs to know about window size,
frame rate and the launch gesture lives in one place so the frame loop and
the tests build the same world.
*/

use crate::modules::error::SimError;
use macroquad::prelude::{Conf, Vec2};

/// Log setup for the binary. The level is fixed at `info`; nothing is read
/// from the environment.
pub fn logger() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Frames per second; the physics step is 1 / fps.
    pub fps: u32,
    /// Positive Y points down in screen coordinates
    pub gravity: Vec2,
    /// Impulse per unit of drag distance
    pub launch_scale: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub wall_thickness: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            title: "wrecking ball".to_string(),
            width: 1000.0,
            height: 800.0,
            fps: 60,
            gravity: Vec2::new(0.0, 981.0),
            launch_scale: 50.0,
            ball_radius: 30.0,
            ball_mass: 10.0,
            wall_thickness: 20.0,
        }
    }
}

impl SimConfig {
    /// Fixed physics timestep in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(SimError::InvalidConfig("fps must be at least 1".to_string()));
        }
        if !(self.ball_radius > 0.0 && self.ball_mass > 0.0) {
            return Err(SimError::InvalidConfig(
                "ball radius and mass must be positive".to_string(),
            ));
        }
        if !(self.wall_thickness > 0.0)
            || self.wall_thickness * 2.0 >= self.width.min(self.height)
        {
            return Err(SimError::InvalidConfig(format!(
                "wall thickness {} does not fit the window",
                self.wall_thickness
            )));
        }
        Ok(())
    }

    /// Window settings handed to macroquad before the app runs
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width as i32,
            window_height: self.height as i32,
            fullscreen: false,
            high_dpi: false,
            window_resizable: false,
            sample_count: 4, // MSAA
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.dt() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn window_matches_logical_size() {
        let conf = SimConfig::default().window_conf();
        assert_eq!(conf.window_width, 1000);
        assert_eq!(conf.window_height, 800);
        assert!(!conf.window_resizable);
    }

    #[test]
    fn logger_level_is_fixed() {
        let logger = logger().build();
        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn rejects_zero_fps() {
        let cfg = SimConfig { fps: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_walls_wider_than_window() {
        let cfg = SimConfig { width: 30.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }
}
