//! Sound cues for the piezo buzzer and the background music player
//!
//! Game logic never touches the peripherals directly: it queues [`AudioCue`]s
//! and the engine forwards them once per frame.

use crate::platform::ToneOutput;

/// Short feedback tones played on the buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits the floor or a side wall
    Bounce,
    /// Menu selection moved
    MenuMove,
    /// Menu option chosen
    MenuSelect,
}

impl SoundEffect {
    /// (frequency in Hz, duration in ms)
    pub fn tone(self) -> (u32, u64) {
        match self {
            SoundEffect::Bounce => (2000, 100),
            SoundEffect::MenuMove => (2000, 100),
            SoundEffect::MenuSelect => (1000, 200),
        }
    }
}

/// Tunes handed to the external music sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Melody {
    /// Background theme
    Theme,
    /// Jingle for a caught star
    StarCaught,
    /// Jingle for level complete and game over
    Fanfare,
}

impl Melody {
    /// Whether the sequencer should restart the tune when it ends
    pub fn looping(self) -> bool {
        matches!(self, Melody::Theme)
    }

    /// Tempo multiplier for the sequencer
    pub fn tempo(self) -> u32 {
        match self {
            Melody::StarCaught => 1,
            Melody::Theme | Melody::Fanfare => 2,
        }
    }

    /// Note list as `beat NOTE length channel` entries separated by `;`
    pub fn notes(self) -> &'static str {
        match self {
            Melody::Theme => THEME_NOTES,
            Melody::StarCaught => "0 E5 1 0;2 G5 1 0;4 C6 2 0",
            Melody::Fanfare => "0 B4 2 0;3 B4 1 0;5 B4 1 0;7 B4 2 0;10 D#4 2 0;13 C#4 2 0;16 B4 2 0;19 E4 2 0",
        }
    }
}

const THEME_NOTES: &str = "0 E3 1 0;2 E4 1 0;4 E3 1 0;6 E4 1 0;8 E3 1 0;10 E4 1 0;12 E3 1 0;14 E4 1 0;\
16 A3 1 0;18 A4 1 0;20 A3 1 0;22 A4 1 0;24 A3 1 0;26 A4 1 0;28 A3 1 0;30 A4 1 0;\
32 G#3 1 0;34 G#4 1 0;36 G#3 1 0;38 G#4 1 0;40 E3 1 0;42 E4 1 0;44 E3 1 0;46 E4 1 0;\
48 A3 1 0;50 A4 1 0;52 A3 1 0;54 A4 1 0;56 A3 1 0;58 B3 1 0;60 C4 1 0;62 D4 1 0;\
64 D3 1 0;66 D4 1 0;68 D3 1 0;70 D4 1 0;72 D3 1 0;74 D4 1 0;76 D3 1 0;78 D4 1 0;\
80 C3 1 0;82 C4 1 0;84 C3 1 0;86 C4 1 0;88 C3 1 0;90 C4 1 0;92 C3 1 0;94 C4 1 0;\
96 G2 1 0;98 G3 1 0;100 G2 1 0;102 G3 1 0;104 E3 1 0;106 E4 1 0;108 E3 1 0;110 E4 1 0;\
112 A3 1 0;114 A4 1 0;116 A3 1 0;118 A4 1 0;120 A3 1 0;122 A4 1 0;124 A3 1 0;\
0 E6 1 1;4 B5 1 1;6 C6 1 1;8 D6 1 1;10 E6 1 1;11 D6 1 1;12 C6 1 1;14 B5 1 1;\
16 A5 1 1;20 A5 1 1;22 C6 1 1;24 E6 1 1;28 D6 1 1;30 C6 1 1;32 B5 1 1;36 B5 1 1;\
37 B5 1 1;38 C6 1 1;40 D6 1 1;44 E6 1 1;48 C6 1 1;52 A5 1 1;56 A5 1 1;\
64 D6 1 1;68 D6 1 1;70 F6 1 1;72 A6 1 1;76 G6 1 1;78 F6 1 1;80 E6 1 1;84 E6 1 1;\
86 C6 1 1;88 E6 1 1;92 D6 1 1;94 C6 1 1;96 B5 1 1;100 B5 1 1;101 B5 1 1;102 C6 1 1;\
104 D6 1 1;108 E6 1 1;112 C6 1 1;116 A5 1 1;120 A5 1 1";

/// Audio request queued by game logic and flushed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Effect(SoundEffect),
    StopTone,
    Play(Melody),
    StopMusic,
}

/// Piezo buzzer driven through a [`ToneOutput`]
pub struct Buzzer<T: ToneOutput> {
    out: T,
    playing: Option<SoundEffect>,
}

impl<T: ToneOutput> Buzzer<T> {
    pub fn new(out: T) -> Self {
        Self { out, playing: None }
    }

    /// Start a feedback tone. Stopping is scheduled by the caller.
    pub fn play(&mut self, effect: SoundEffect) {
        let (freq, duration) = effect.tone();
        self.out.play(freq, duration);
        self.playing = Some(effect);
    }

    pub fn stop(&mut self) {
        self.out.stop();
        if self.playing.take().is_some() {
            log::trace!("buzz stop");
        }
    }

    pub fn playing(&self) -> Option<SoundEffect> {
        self.playing
    }

    pub fn output(&self) -> &T {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{RecordingTone, ToneCall};

    #[test]
    fn test_buzzer_plays_effect_tone() {
        let mut buzzer = Buzzer::new(RecordingTone::default());
        buzzer.play(SoundEffect::MenuSelect);
        assert_eq!(buzzer.playing(), Some(SoundEffect::MenuSelect));
        buzzer.stop();
        assert_eq!(buzzer.playing(), None);
        assert_eq!(
            buzzer.output().calls(),
            &[ToneCall::Play { frequency: 1000, duration_ms: 200 }, ToneCall::Stop]
        );
    }

    #[test]
    fn test_only_theme_loops() {
        assert!(Melody::Theme.looping());
        assert_eq!(Melody::Theme.tempo(), 2);
        assert_eq!(Melody::StarCaught.tempo(), 1);
        assert!(!Melody::StarCaught.looping());
        assert!(!Melody::Fanfare.looping());
        assert!(Melody::Fanfare.notes().starts_with("0 B4"));
    }
}
