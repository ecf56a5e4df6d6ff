//! Frame loop
//!
//! [`Game`] binds the [`Director`] to real (or simulated) peripherals and
//! runs one frame at a time. The caller owns the clock: on the device it is
//! the millisecond tick counter, in tests and the demo it is a plain counter.

use crate::audio::{AudioCue, Buzzer};
use crate::input::{ButtonClassifier, ButtonEvent};
use crate::platform::{Atlas, DigitalInput, MusicPlayer, Surface, ToneOutput};
use crate::scene::Director;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// One running game and its peripherals
pub struct Game<D: Surface, B: DigitalInput, T: ToneOutput, M: MusicPlayer> {
    director: Director,
    display: D,
    button: B,
    classifier: ButtonClassifier,
    buzzer: Buzzer<T>,
    music: M,
    frames: u64,
}

impl<D: Surface, B: DigitalInput, T: ToneOutput, M: MusicPlayer> Game<D, B, T, M> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        atlas: Atlas,
        seed: u64,
        display: D,
        button: B,
        tone: T,
        music: M,
    ) -> Self {
        let classifier = ButtonClassifier::new(tuning.long_press_ms);
        let director = Director::new(tuning, settings, atlas, seed, display.width(), display.height());
        Self {
            director,
            display,
            button,
            classifier,
            buzzer: Buzzer::new(tone),
            music,
            frames: 0,
        }
    }

    /// Show the splash screen and start the music
    pub fn boot(&mut self) {
        self.director.boot();
        self.flush_audio();
    }

    /// Run one frame at time `now_ms` and return the button event it saw
    pub fn frame(&mut self, now_ms: u64) -> ButtonEvent {
        self.director.poll_timers(now_ms);

        let pressed = self.button.is_pressed();
        let event = self.classifier.sample(pressed, now_ms);

        self.director.update(event, now_ms);
        self.flush_audio();
        self.music.tick();
        self.director.draw(&mut self.display);

        self.frames += 1;
        event
    }

    /// Run `count` frames spaced `frame_ms` apart, starting after `start_ms`
    pub fn run_frames(&mut self, start_ms: u64, frame_ms: u64, count: usize) -> u64 {
        let mut now = start_ms;
        for _ in 0..count {
            now += frame_ms;
            self.frame(now);
        }
        now
    }

    fn flush_audio(&mut self) {
        for cue in self.director.drain_audio() {
            log::trace!("audio {:?}", cue);
            match cue {
                AudioCue::Effect(effect) => self.buzzer.play(effect),
                AudioCue::StopTone => self.buzzer.stop(),
                AudioCue::Play(melody) => self.music.play(melody),
                AudioCue::StopMusic => self.music.stop(),
            }
        }
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    pub fn tone(&self) -> &T {
        self.buzzer.output()
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
