/*
Frame-rate cap for the main loop. tick() at the end of each frame blocks
until the frame budget (1 / fps) has passed since the previous tick.

Time comes from miniquad::date so the same code runs natively and on the
web. On the web the browser drives the frame timing, so tick() never sleeps.
*/

use macroquad::miniquad::date;
use std::time::Duration;

pub struct FrameClock {
    budget: Duration,
    last: f64,
}

/// Time left in a frame of length `budget` after `elapsed` has been spent.
pub fn remaining(budget: Duration, elapsed: Duration) -> Duration {
    budget.saturating_sub(elapsed)
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: date::now(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Wait out the rest of the frame. Returns how long the frame took
    /// before waiting.
    pub fn tick(&mut self) -> Duration {
        let spent = Duration::from_secs_f64((date::now() - self.last).max(0.0));
        let wait = remaining(self.budget, spent);

        #[cfg(not(target_arch = "wasm32"))]
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = wait;

        self.last = date::now();
        spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn remaining_never_goes_negative() {
        let budget = Duration::from_millis(16);
        assert_eq!(remaining(budget, Duration::from_millis(10)), Duration::from_millis(6));
        assert_eq!(remaining(budget, Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn budget_follows_fps() {
        let clock = FrameClock::new(60);
        let ms = clock.budget().as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.01);
    }

    #[test]
    fn tick_caps_the_frame_rate() {
        let mut clock = FrameClock::new(100);
        clock.tick();
        let start = Instant::now();
        for _ in 0..3 {
            clock.tick();
        }
        // three 10 ms frames, minus clock jitter
        assert!(start.elapsed() >= Duration::from_millis(27));
    }
}
