//! Catch the Stars - a one-button physics arcade game
//!
//! Core modules:
//! - `input`: Single-button press classification
//! - `scheduler`: Software timers driven by the frame clock
//! - `sim`: Ball physics, star targets, catch detection
//! - `assets`: Drawable/updatable objects and their registry
//! - `scene`: Scene state machine (splash, menus, play, game over)
//! - `engine`: Frame loop binding the scene to the peripherals
//! - `platform`: Peripheral contracts and in-memory implementations
//! - `tuning`: Data-driven game balance

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unwrap_used
    )
)]

pub mod assets;
pub mod audio;
pub mod engine;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{Asset, AssetId, AssetRegistry, Request, Signal};
pub use audio::{AudioCue, Buzzer, Melody, SoundEffect};
pub use engine::Game;
pub use highscores::HighScores;
pub use input::{ButtonClassifier, ButtonEvent};
pub use scene::{Director, GameOverSummary, PlayPhase, Scene, Transition};
pub use scheduler::{Scheduler, TimerAction, TimerHandle};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display dimensions (SSD1306-class panel)
    pub const SCREEN_WIDTH: u32 = 128;
    pub const SCREEN_HEIGHT: u32 = 64;

    /// Frame period of the main loop (~30 FPS)
    pub const FRAME_MS: u64 = 33;

    /// Cell size of the built-in 5x8 font
    pub const CHAR_WIDTH: i32 = 5;
    pub const CHAR_HEIGHT: i32 = 8;

    /// Where each new ball (and its aim cue) appears
    pub const BALL_SPAWN_X: f32 = 20.0;
    pub const BALL_SPAWN_Y: f32 = 40.0;

    /// Power bar position
    pub const FILL_BAR_X: f32 = 3.0;
    pub const FILL_BAR_Y: f32 = 20.0;

    /// Star spawn region (inclusive, in pixels from the edges)
    pub const STAR_MIN_X: i32 = 35;
    pub const STAR_RIGHT_MARGIN: i32 = 5;
    pub const STAR_MIN_Y: i32 = 10;
    pub const STAR_BOTTOM_MARGIN: i32 = 20;

    /// Score counter position
    pub const SCORE_X: f32 = 5.0;
    pub const SCORE_Y: f32 = 5.0;

    /// Pixels per tick for sliding labels
    pub const LABEL_SLIDE_SPEED: f32 = 8.0;
}

/// Screen bounds as a float vector (width, height)
#[inline]
pub fn screen_bounds(width: u32, height: u32) -> Vec2 {
    Vec2::new(width as f32, height as f32)
}

/// Unit direction for an angle in degrees (y grows downward on screen)
#[inline]
pub fn direction_deg(angle_deg: f32) -> Vec2 {
    Vec2::from_angle(angle_deg.to_radians())
}

/// Pixel width of a string in the built-in font
#[inline]
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * consts::CHAR_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_down_right_at_45() {
        let dir = direction_deg(45.0);
        assert!(dir.x > 0.0 && dir.y > 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn text_width_counts_chars() {
        assert_eq!(text_width("+3"), 10);
        assert_eq!(text_width(""), 0);
    }
}
