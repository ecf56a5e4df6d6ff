use catch_the_stars::consts::FRAME_MS;
use catch_the_stars::platform::Atlas;
use catch_the_stars::{
    AudioCue, ButtonEvent, Director, HighScores, Melody, PlayPhase, Scene, Settings, SoundEffect,
    Tuning,
};
use glam::Vec2;

struct Harness {
    director: Director,
    now: u64,
}

impl Harness {
    fn new(settings: Settings, high_scores: HighScores) -> Self {
        let mut director = Director::new(Tuning::default(), settings, Atlas::new(), 11, 128, 64)
            .with_high_scores(high_scores);
        director.boot();
        Self { director, now: 0 }
    }

    /// Boot straight through the menus into the first level
    fn playing(settings: Settings, high_scores: HighScores) -> Self {
        let mut h = Self::new(settings, high_scores);
        h.step(ButtonEvent::Short); // splash
        h.step(ButtonEvent::Long); // "Start Game"
        h.idle(20);
        h.step(ButtonEvent::Short); // instructions 1
        h.step(ButtonEvent::Short); // instructions 2
        h.step(ButtonEvent::Long); // "Ready?"
        assert_eq!(h.scene(), Scene::Playing(PlayPhase::Aiming));
        h
    }

    fn step(&mut self, event: ButtonEvent) {
        self.now += FRAME_MS;
        self.director.step(event, self.now);
    }

    fn idle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step(ButtonEvent::None);
        }
    }

    fn scene(&self) -> Scene {
        self.director.scene()
    }

    fn score(&self) -> u32 {
        self.director.score().unwrap()
    }

    /// Park the waiting ball on the first remaining star
    fn catch_one(&mut self) {
        let target = self.director.active_stars()[0];
        self.director.ball_mut().unwrap().pos = target;
        self.step(ButtonEvent::None);
    }

    /// Shoot, then drop the ball dead on the floor so it stops next tick
    fn shoot_and_stop(&mut self) {
        self.step(ButtonEvent::Long);
        assert_eq!(self.scene(), Scene::Playing(PlayPhase::BallInFlight));
        let ball = self.director.ball_mut().unwrap();
        ball.pos = Vec2::new(20.0, 61.0);
        ball.vel = Vec2::ZERO;
        self.step(ButtonEvent::None);
    }
}

#[test]
fn three_catches_with_one_ball_score_one_two_three() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    h.catch_one();
    assert_eq!(h.score(), 1);
    h.catch_one();
    assert_eq!(h.score(), 3);
    h.catch_one();
    assert_eq!(h.score(), 6);
    assert_eq!(h.director.active_stars().len(), 2);
}

#[test]
fn new_ball_resets_the_catch_bonus() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    h.catch_one();
    h.catch_one();
    assert_eq!(h.score(), 3);

    h.shoot_and_stop();
    assert_eq!(h.scene(), Scene::Playing(PlayPhase::Aiming));
    assert_eq!(h.director.balls_used(), Some(2));

    h.catch_one();
    assert_eq!(h.score(), 4);
}

#[test]
fn catch_shows_popup_and_star_falls_away() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    let before = h.director.registry().len();
    h.catch_one();
    assert_eq!(h.director.registry().len(), before);
    // The star puts up its "+1" on the next frame
    h.idle(1);
    assert_eq!(h.director.registry().len(), before + 1);
    // The caught star eventually drops off screen and the popup expires
    h.idle(60);
    assert_eq!(h.director.registry().len(), before - 1);
}

#[test]
fn clearing_all_stars_completes_the_level() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    for _ in 0..5 {
        h.catch_one();
    }
    assert_eq!(h.score(), 15);
    h.shoot_and_stop();
    assert_eq!(h.scene(), Scene::Playing(PlayPhase::LevelComplete));

    h.step(ButtonEvent::Short);
    assert_eq!(h.scene(), Scene::Playing(PlayPhase::Aiming));
    assert_eq!(h.director.level(), Some(2));
    assert_eq!(h.director.balls_used(), Some(1));
    assert_eq!(h.director.active_stars().len(), 5);
    assert_eq!(h.score(), 15);
}

#[test]
fn seventh_ball_with_stars_left_ends_the_game() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    for ball in 1..=6 {
        h.shoot_and_stop();
        assert_eq!(h.scene(), Scene::Playing(PlayPhase::Aiming), "after ball {ball}");
    }
    h.shoot_and_stop();
    assert_eq!(h.scene(), Scene::GameOver);
    let summary = h.director.last_summary().unwrap();
    assert_eq!(summary.score, 0);
    assert_eq!(summary.headline, "Game over");

    // Any press on the score line goes back to the splash screen
    h.idle(40);
    h.step(ButtonEvent::Short);
    assert_eq!(h.scene(), Scene::Splash);
}

#[test]
fn last_ball_ends_the_game_even_if_the_level_was_cleared() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    for _ in 0..6 {
        h.shoot_and_stop();
    }
    for _ in 0..5 {
        h.catch_one();
    }
    h.shoot_and_stop();
    assert_eq!(h.scene(), Scene::GameOver);
}

#[test]
fn beating_the_high_score_records_it() {
    let mut h = Harness::playing(Settings::silent(), HighScores::with_best(10));
    for _ in 0..5 {
        h.catch_one();
    }
    h.shoot_and_stop();
    h.step(ButtonEvent::Short);
    for _ in 0..7 {
        h.shoot_and_stop();
    }
    assert_eq!(h.scene(), Scene::GameOver);
    let summary = h.director.last_summary().unwrap().clone();
    assert_eq!(summary.score, 15);
    assert!(summary.new_record);
    assert_eq!(summary.headline, "New high score!");
    assert_eq!(h.director.high_score(), 15);
}

#[test]
fn lower_score_keeps_the_high_score() {
    let mut h = Harness::playing(Settings::silent(), HighScores::with_best(10));
    // 1+2+3, then 1, then 1
    for _ in 0..3 {
        h.catch_one();
    }
    h.shoot_and_stop();
    h.catch_one();
    h.shoot_and_stop();
    h.catch_one();
    h.shoot_and_stop();
    assert_eq!(h.scene(), Scene::Playing(PlayPhase::LevelComplete));
    h.step(ButtonEvent::Short);
    for _ in 0..7 {
        h.shoot_and_stop();
    }
    let summary = h.director.last_summary().unwrap();
    assert_eq!(summary.score, 8);
    assert!(!summary.new_record);
    assert_eq!(summary.headline, "Game over");
    assert_eq!(h.director.high_score(), 10);
}

#[test]
fn high_score_intro_shows_the_best_score() {
    let mut h = Harness::new(Settings::silent(), HighScores::with_best(42));
    h.step(ButtonEvent::Short);
    h.step(ButtonEvent::Long);
    h.idle(20);
    h.step(ButtonEvent::Short);
    h.step(ButtonEvent::Short);
    assert_eq!(h.scene(), Scene::HighScoreIntro);
    let texts: Vec<String> = h
        .director
        .registry()
        .iter()
        .filter_map(|(_, a)| match a {
            catch_the_stars::Asset::SlidingLabel(l) => Some(l.text().to_string()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"High score is 42".to_string()));
}

#[test]
fn star_jingle_needs_music_enabled() {
    let music_only = Settings {
        music_enabled: true,
        sound_enabled: false,
    };
    let mut h = Harness::playing(music_only, HighScores::new());
    h.director.drain_audio();
    h.catch_one();
    let audio = h.director.drain_audio();
    assert!(audio.contains(&AudioCue::Play(Melody::StarCaught)));
    assert!(!audio.iter().any(|c| matches!(c, AudioCue::Effect(_))));

    let sound_only = Settings {
        music_enabled: false,
        sound_enabled: true,
    };
    let mut h = Harness::playing(sound_only, HighScores::new());
    h.director.drain_audio();
    h.catch_one();
    assert!(!h.director.drain_audio().contains(&AudioCue::Play(Melody::StarCaught)));
}

#[test]
fn feedback_tones_need_sound_enabled() {
    let mut quiet = Harness::new(
        Settings {
            music_enabled: true,
            sound_enabled: false,
        },
        HighScores::new(),
    );
    quiet.step(ButtonEvent::Short);
    quiet.step(ButtonEvent::Short);
    assert!(!quiet.director.drain_audio().iter().any(|c| matches!(c, AudioCue::Effect(_))));

    let mut loud = Harness::new(Settings::default(), HighScores::new());
    loud.step(ButtonEvent::Short);
    loud.step(ButtonEvent::Short);
    assert!(loud
        .director
        .drain_audio()
        .contains(&AudioCue::Effect(SoundEffect::MenuMove)));
}

#[test]
fn bounces_beep_when_sound_is_on() {
    let mut h = Harness::playing(Settings::default(), HighScores::new());
    h.director.drain_audio();
    h.step(ButtonEvent::Long);
    let mut bounced = false;
    for _ in 0..400 {
        h.step(ButtonEvent::None);
        if h.director.drain_audio().contains(&AudioCue::Effect(SoundEffect::Bounce)) {
            bounced = true;
        }
    }
    assert!(bounced);
    // The shot ball stopped and a new one is waiting
    assert_eq!(h.director.balls_used(), Some(2));
}

#[test]
fn options_menu_toggles_sound() {
    let mut h = Harness::new(Settings::default(), HighScores::new());
    h.step(ButtonEvent::Short); // splash
    h.step(ButtonEvent::Short); // cursor to "Options"
    h.step(ButtonEvent::Long);
    h.idle(20);
    assert_eq!(h.scene(), Scene::OptionsMenu);

    h.step(ButtonEvent::Short); // cursor to "Sound On/Off"
    h.step(ButtonEvent::Long);
    h.idle(20);
    assert!(!h.director.settings().sound_enabled);
    assert!(h.director.settings().music_enabled);

    h.step(ButtonEvent::Short); // cursor to "Back"
    h.idle(5);
    h.director.drain_audio();
    h.step(ButtonEvent::Long);
    h.idle(20);
    assert_eq!(h.scene(), Scene::MainMenu);
}

#[test]
fn leaving_a_scene_cancels_its_timers() {
    let mut h = Harness::playing(Settings::silent(), HighScores::new());
    // The power bar owns a periodic timer
    assert!(!h.director.scheduler().is_empty());
    for _ in 0..7 {
        h.shoot_and_stop();
    }
    assert_eq!(h.scene(), Scene::GameOver);
    h.idle(40);
    h.step(ButtonEvent::Short);
    assert_eq!(h.scene(), Scene::Splash);
    assert!(h.director.scheduler().is_empty());
}
