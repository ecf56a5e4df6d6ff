//! Player preferences
//!
//! Toggled from the Options menu. Lives for the process lifetime only.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Background music and jingles
    pub music_enabled: bool,
    /// Buzzer feedback tones (bounces, menu beeps)
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Flip music on/off, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        log::info!("music {}", on_off(self.music_enabled));
        self.music_enabled
    }

    /// Flip feedback sounds on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        log::info!("sound {}", on_off(self.sound_enabled));
        self.sound_enabled
    }

    /// Both channels off
    pub fn silent() -> Self {
        Self {
            music_enabled: false,
            sound_enabled: false,
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
