//! Collectible stars

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Brightness cycles through `0..STAR_SIZE` (also the arm length in pixels)
pub const STAR_SIZE: f32 = 3.0;

/// Brightness advance per tick
const TWINKLE_STEP: f32 = 0.3;

/// A twinkling target. Once caught it falls off the bottom of the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    brightness: f32,
    falling: bool,
    fall_speed: f32,
    award: Option<u32>,
}

impl Star {
    pub fn new(pos: Vec2, brightness: f32) -> Self {
        Self {
            pos,
            brightness: brightness.rem_euclid(STAR_SIZE),
            falling: false,
            fall_speed: 0.0,
            award: None,
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Arm length to draw this tick
    pub fn arm(&self) -> i32 {
        self.brightness as i32
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Start dropping, worth `points`. Falling stars are no longer catchable.
    pub fn fall(&mut self, points: u32) {
        self.falling = true;
        self.award = Some(points);
    }

    /// Points from the catch, handed out once
    pub fn take_award(&mut self) -> Option<u32> {
        self.award.take()
    }

    pub fn tick(&mut self, gravity: f32) {
        self.brightness = (self.brightness + TWINKLE_STEP) % STAR_SIZE;
        if self.falling {
            self.pos.y += self.fall_speed;
            self.fall_speed += gravity;
        }
    }

    /// True once a falling star has left the screen
    pub fn is_gone(&self, screen_height: f32) -> bool {
        self.falling && self.pos.y >= screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_wraps() {
        let mut star = Star::new(Vec2::new(50.0, 20.0), 2.9);
        star.tick(0.2);
        assert!(star.brightness() < STAR_SIZE);
        assert!((star.brightness() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_idle_star_stays_put() {
        let mut star = Star::new(Vec2::new(50.0, 20.0), 0.0);
        for _ in 0..100 {
            star.tick(0.2);
        }
        assert_eq!(star.pos, Vec2::new(50.0, 20.0));
        assert!(!star.is_gone(64.0));
    }

    #[test]
    fn test_falling_star_accelerates_off_screen() {
        let mut star = Star::new(Vec2::new(50.0, 20.0), 0.0);
        assert!(!star.is_falling());
        star.fall(2);
        assert!(star.is_falling());
        assert_eq!(star.take_award(), Some(2));
        assert_eq!(star.take_award(), None);
        star.tick(0.2);
        assert_eq!(star.pos.y, 20.0);
        star.tick(0.2);
        assert!(star.pos.y > 20.0);
        let mut ticks = 0;
        while !star.is_gone(64.0) {
            star.tick(0.2);
            ticks += 1;
            assert!(ticks < 100);
        }
    }
}
