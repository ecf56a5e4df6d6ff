//! Scripted and recording peripherals
//!
//! Used by the desktop demo and the tests to run the game without hardware.

use std::collections::VecDeque;

use super::{DigitalInput, MusicPlayer, ToneOutput};
use crate::audio::Melody;

/// Button that replays a queue of per-frame levels
#[derive(Debug, Clone, Default)]
pub struct ScriptedButton {
    script: VecDeque<bool>,
    /// Level reported once the script runs out
    resting: bool,
}

impl ScriptedButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `frames` samples with the button held down
    pub fn hold(&mut self, frames: usize) -> &mut Self {
        self.script.extend(std::iter::repeat_n(true, frames));
        self
    }

    /// Queue `frames` samples with the button released
    pub fn release(&mut self, frames: usize) -> &mut Self {
        self.script.extend(std::iter::repeat_n(false, frames));
        self
    }

    /// Level to report after the script is exhausted
    pub fn rest_at(&mut self, pressed: bool) {
        self.resting = pressed;
    }
}

impl DigitalInput for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        self.script.pop_front().unwrap_or(self.resting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Play { frequency: u32, duration_ms: u64 },
    Stop,
}

/// Tone output that remembers every call
#[derive(Debug, Clone, Default)]
pub struct RecordingTone {
    calls: Vec<ToneCall>,
}

impl RecordingTone {
    pub fn calls(&self) -> &[ToneCall] {
        &self.calls
    }

    /// Number of tones started
    pub fn plays(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ToneCall::Play { .. }))
            .count()
    }
}

impl ToneOutput for RecordingTone {
    fn play(&mut self, frequency_hz: u32, duration_ms: u64) {
        self.calls.push(ToneCall::Play {
            frequency: frequency_hz,
            duration_ms,
        });
    }

    fn stop(&mut self) {
        self.calls.push(ToneCall::Stop);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCall {
    Play(Melody),
    Stop,
}

/// Music player that remembers every call
#[derive(Debug, Clone, Default)]
pub struct RecordingMusic {
    calls: Vec<MusicCall>,
    current: Option<Melody>,
    ticks: u64,
}

impl RecordingMusic {
    pub fn calls(&self) -> &[MusicCall] {
        &self.calls
    }

    pub fn current(&self) -> Option<Melody> {
        self.current
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn played(&self, melody: Melody) -> bool {
        self.calls.contains(&MusicCall::Play(melody))
    }
}

impl MusicPlayer for RecordingMusic {
    fn play(&mut self, melody: Melody) {
        self.calls.push(MusicCall::Play(melody));
        self.current = Some(melody);
    }

    fn stop(&mut self) {
        self.calls.push(MusicCall::Stop);
        self.current = None;
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_button_replays_then_rests() {
        let mut b = ScriptedButton::new();
        b.hold(2).release(1);
        assert!(b.is_pressed());
        assert!(b.is_pressed());
        assert!(!b.is_pressed());
        assert!(!b.is_pressed());
        b.rest_at(true);
        assert!(b.is_pressed());
    }

    #[test]
    fn test_recording_music_tracks_current() {
        let mut m = RecordingMusic::default();
        m.play(Melody::Theme);
        assert_eq!(m.current(), Some(Melody::Theme));
        m.stop();
        assert_eq!(m.current(), None);
        assert!(m.played(Melody::Theme));
    }
}
