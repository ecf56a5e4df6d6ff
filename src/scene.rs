//! Scene state machine
//!
//! The [`Director`] owns everything the game needs except the peripherals:
//! the asset registry, the timer queue, the RNG and the session state. Each
//! frame it delivers due timers, ticks every asset, acts on the requests the
//! assets raised, then runs catch detection. Audio is queued as
//! [`AudioCue`]s for the engine to flush.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::menu::MenuOption;
use crate::assets::{
    AimCue, Asset, AssetId, AssetRegistry, BorderFrame, FillBar, MenuOverlay,
    PressTrigger, Request, ScoreCounter, Signal, Slide, SlidingLabel, SpriteAnimation, StaticImage,
    TickContext, TransitionCurtain,
};
use crate::audio::{AudioCue, Melody, SoundEffect};
use crate::consts::{BALL_SPAWN_X, BALL_SPAWN_Y, FILL_BAR_X, FILL_BAR_Y};
use crate::highscores::HighScores;
use crate::input::ButtonEvent;
use crate::platform::{Atlas, Sprite, Surface};
use crate::scheduler::{Scheduler, TimerAction, TimerHandle};
use crate::settings::Settings;
use crate::sim::{CatchTally, PhysicsBall, PlacementRegion, Star, caught, scatter_stars};
use crate::tuning::Tuning;
use crate::screen_bounds;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Splash,
    MainMenu,
    OptionsMenu,
    Instructions1,
    Instructions2,
    HighScoreIntro,
    Playing(PlayPhase),
    GameOver,
}

/// Sub-state while a game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPhase {
    /// Ball waiting, cue and power bar active
    Aiming,
    BallInFlight,
    /// All stars caught, waiting for a press
    LevelComplete,
}

/// Scene change requested by an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Splash,
    MainMenu,
    OptionsMenu,
    Instructions1,
    Instructions2,
    HighScoreIntro,
    StartGame,
    NextLevel,
}

/// What a menu entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Go(Transition),
    ToggleMusic,
    ToggleSound,
}

/// Result of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    /// High score after this game was recorded
    pub high_score: u32,
    pub new_record: bool,
    pub headline: &'static str,
}

/// Animals that may cross the screen after a level (sprite, y, dx)
const ANIMALS: [(Sprite, f32, f32); 4] = [
    (Sprite::Bird, -10.0, -5.0),
    (Sprite::Cat, 16.0, 5.0),
    (Sprite::Bird3, -10.0, 5.0),
    (Sprite::Dog, 16.0, 5.0),
];

/// Twinkling stars around the main menu
const MENU_STARS: [(f32, f32); 4] = [(10.0, 10.0), (110.0, 5.0), (80.0, 60.0), (15.0, 55.0)];

/// Slide speed of the game over labels
const GAME_OVER_SLIDE_SPEED: f32 = 4.0;

/// One playthrough, from "Ready?" to game over
#[derive(Debug)]
struct Session {
    points: u32,
    score_counter: AssetId,
    level: u32,
    /// Stars still catchable, in registry order
    stars: Vec<AssetId>,
    ball: Option<AssetId>,
    cue: Option<AssetId>,
    bar: Option<AssetId>,
    /// Balls already played this level (left on screen)
    spent: Vec<AssetId>,
    balls_used: u32,
    tally: CatchTally,
    animal: Option<AssetId>,
    banner: Option<AssetId>,
}

/// Peripheral-free game controller
pub struct Director {
    registry: AssetRegistry,
    scheduler: Scheduler,
    rng: Pcg32,
    tuning: Tuning,
    settings: Settings,
    high_scores: HighScores,
    atlas: Atlas,
    width: u32,
    height: u32,
    scene: Scene,
    session: Option<Session>,
    /// Requests waiting for the fixed point in `update`
    pending: Vec<Request>,
    /// Bumped whenever the registry is reset; older requests are stale
    generation: u64,
    menu: Option<AssetId>,
    audio: Vec<AudioCue>,
    tone_stop: Option<TimerHandle>,
    last_summary: Option<GameOverSummary>,
}

impl Director {
    pub fn new(tuning: Tuning, settings: Settings, atlas: Atlas, seed: u64, width: u32, height: u32) -> Self {
        Self {
            registry: AssetRegistry::new(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            settings,
            high_scores: HighScores::new(),
            atlas,
            width,
            height,
            scene: Scene::Splash,
            session: None,
            pending: Vec::new(),
            generation: 0,
            menu: None,
            audio: Vec::new(),
            tone_stop: None,
            last_summary: None,
        }
    }

    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    /// Show the splash screen and start the background theme
    pub fn boot(&mut self) {
        log::info!("boot {}x{}", self.width, self.height);
        self.show_splash();
        self.jingle(Melody::Theme);
    }

    /// Deliver every timer that is due. Run before sampling the button.
    pub fn poll_timers(&mut self, now_ms: u64) {
        for fired in self.scheduler.poll(now_ms) {
            match fired.action {
                TimerAction::StopTone => {
                    if self.tone_stop == Some(fired.handle) {
                        self.tone_stop = None;
                    }
                    self.audio.push(AudioCue::StopTone);
                }
                TimerAction::Asset(id, timer) => {
                    if let Some(request) = self.registry.deliver(id, timer) {
                        self.pending.push(request);
                    }
                }
            }
        }
    }

    /// Tick assets, act on their requests, then detect catches
    pub fn update(&mut self, button: ButtonEvent, now_ms: u64) {
        let bounds = screen_bounds(self.width, self.height);
        let deferred = {
            let mut ctx = TickContext::new(button, now_ms, bounds, &self.tuning, &mut self.scheduler);
            self.registry.tick_all(&mut ctx)
        };

        for signal in deferred {
            match signal {
                Signal::Sound(effect) => self.play_effect(effect),
                Signal::Request(request) => self.pending.push(request),
                other => log::warn!("unexpected deferred signal {:?}", other),
            }
        }

        let generation = self.generation;
        for request in std::mem::take(&mut self.pending) {
            if self.generation != generation {
                log::debug!("dropping stale {:?}", request);
                continue;
            }
            self.handle(request);
        }

        self.check_catches();
    }

    /// `poll_timers` followed by `update`
    pub fn step(&mut self, button: ButtonEvent, now_ms: u64) {
        self.poll_timers(now_ms);
        self.update(button, now_ms);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.registry.draw_all(surface);
    }

    /// Take the audio queued since the last call
    pub fn drain_audio(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio)
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Score of the running game
    pub fn score(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.points)
    }

    pub fn level(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.level)
    }

    pub fn balls_used(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.balls_used)
    }

    /// Positions of the stars that can still be caught
    pub fn active_stars(&self) -> Vec<Vec2> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        session
            .stars
            .iter()
            .filter_map(|id| self.registry.get(*id).map(Asset::pos))
            .collect()
    }

    pub fn ball(&self) -> Option<&PhysicsBall> {
        let id = self.session.as_ref()?.ball?;
        match self.registry.get(id)? {
            Asset::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    /// Direct access to the current ball, for scripted play and debugging
    pub fn ball_mut(&mut self) -> Option<&mut PhysicsBall> {
        let id = self.session.as_ref()?.ball?;
        match self.registry.get_mut(id)? {
            Asset::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    /// Current power bar value while aiming
    pub fn power(&self) -> Option<u32> {
        let id = self.session.as_ref()?.bar?;
        match self.registry.get(id)? {
            Asset::FillBar(bar) => Some(bar.value()),
            _ => None,
        }
    }

    pub fn last_summary(&self) -> Option<&GameOverSummary> {
        self.last_summary.as_ref()
    }

    fn handle(&mut self, request: Request) {
        log::debug!("request {:?} in {:?}", request, self.scene);
        match request {
            Request::Goto(transition) | Request::Menu(MenuAction::Go(transition)) => self.go(transition),
            Request::Menu(MenuAction::ToggleMusic) => {
                if self.settings.toggle_music() {
                    self.audio.push(AudioCue::Play(Melody::Theme));
                } else {
                    self.audio.push(AudioCue::StopMusic);
                    self.stop_tone();
                }
            }
            Request::Menu(MenuAction::ToggleSound) => {
                if !self.settings.toggle_sound() {
                    self.stop_tone();
                }
            }
            Request::Shoot { angle } => self.shoot(angle),
            Request::BallStopped => self.ball_stopped(),
        }
    }

    fn go(&mut self, transition: Transition) {
        match transition {
            Transition::Splash => self.show_splash(),
            Transition::MainMenu => self.show_main_menu(),
            Transition::OptionsMenu => self.show_options(),
            Transition::Instructions1 => self.show_instructions1(),
            Transition::Instructions2 => self.show_instructions2(),
            Transition::HighScoreIntro => self.show_high_score(),
            Transition::StartGame => self.start_game(),
            Transition::NextLevel => {
                if self.scene == Scene::Playing(PlayPhase::LevelComplete) {
                    self.start_level();
                } else {
                    log::warn!("next level requested in {:?}", self.scene);
                }
            }
        }
    }

    fn enter(&mut self, scene: Scene) {
        log::info!("scene {:?} -> {:?}", self.scene, scene);
        self.scene = scene;
    }

    /// Tear down every asset (cancelling their timers) before a new screen
    fn reset(&mut self) {
        self.registry.reset(&mut self.scheduler);
        self.generation += 1;
        self.session = None;
        self.menu = None;
    }

    fn spawn(&mut self, asset: Asset) -> AssetId {
        self.registry.spawn(asset, &mut self.scheduler)
    }

    fn label(&self, y: f32, text: impl Into<String>) -> SlidingLabel {
        SlidingLabel::new(y, text, self.width)
    }

    fn show_splash(&mut self) {
        self.reset();
        let splash = StaticImage::new(Vec2::ZERO, self.atlas.get(Sprite::Splash))
            .with_trigger(PressTrigger::on(Request::Goto(Transition::MainMenu)));
        self.spawn(Asset::Image(splash));
        self.spawn(Asset::Curtain(TransitionCurtain::new()));
        self.enter(Scene::Splash);
    }

    fn show_main_menu(&mut self) {
        self.reset();
        let menu = MenuOverlay::new(
            Vec2::new(10.0, 13.0),
            Some("Hi there!"),
            vec![
                MenuOption::new("Start Game", MenuAction::Go(Transition::Instructions1)),
                MenuOption::new("Options", MenuAction::Go(Transition::OptionsMenu)),
            ],
        );
        self.menu = Some(self.spawn(Asset::Menu(menu)));
        for (x, y) in MENU_STARS {
            let brightness = self.rng.random_range(0..=3) as f32;
            self.spawn(Asset::Star(Star::new(Vec2::new(x, y), brightness)));
        }
        self.enter(Scene::MainMenu);
    }

    fn show_options(&mut self) {
        if let Some(main) = self.menu.take() {
            self.registry.despawn(main, &mut self.scheduler);
        }
        let menu = MenuOverlay::new(
            Vec2::new(10.0, 10.0),
            Some("Options"),
            vec![
                MenuOption::new("Music On/Off", MenuAction::ToggleMusic),
                MenuOption::new("Sound On/Off", MenuAction::ToggleSound),
                MenuOption::new("Back", MenuAction::Go(Transition::MainMenu)),
            ],
        );
        self.menu = Some(self.spawn(Asset::Menu(menu)));
        self.enter(Scene::OptionsMenu);
    }

    fn show_instructions1(&mut self) {
        self.reset();
        let first = self
            .label(10.0, "Catch all stars")
            .with_trigger(PressTrigger::on(Request::Goto(Transition::Instructions2)));
        let second = self.label(30.0, format!("With {} balls!", self.tuning.balls_per_level));
        self.spawn(Asset::SlidingLabel(first));
        self.spawn(Asset::SlidingLabel(second));
        self.enter(Scene::Instructions1);
    }

    fn show_instructions2(&mut self) {
        self.reset();
        let w = self.width;
        let lines = [(8.0, "Use the button:"), (24.0, "Short to aim"), (40.0, "Long to shoot")];
        for (i, (y, text)) in lines.into_iter().enumerate() {
            let mut label = self.label(y, text).from_right(w);
            if i == 0 {
                label = label.with_trigger(PressTrigger::on(Request::Goto(Transition::HighScoreIntro)));
            }
            self.spawn(Asset::SlidingLabel(label));
        }
        self.enter(Scene::Instructions2);
    }

    fn show_high_score(&mut self) {
        self.reset();
        let ready = self
            .label(10.0, "Ready?")
            .with_trigger(PressTrigger::on(Request::Goto(Transition::StartGame)));
        let best = self.label(30.0, format!("High score is {}", self.high_scores.best()));
        self.spawn(Asset::SlidingLabel(ready));
        self.spawn(Asset::SlidingLabel(best));
        self.enter(Scene::HighScoreIntro);
    }

    fn start_game(&mut self) {
        self.reset();
        let score_counter = self.spawn(Asset::Score(ScoreCounter::new()));
        self.spawn(Asset::Border(BorderFrame));
        self.session = Some(Session {
            points: 0,
            score_counter,
            level: 0,
            stars: Vec::new(),
            ball: None,
            cue: None,
            bar: None,
            spent: Vec::new(),
            balls_used: 0,
            tally: CatchTally::default(),
            animal: None,
            banner: None,
        });
        log::info!("game started");
        self.start_level();
    }

    fn start_level(&mut self) {
        let Some(session) = self.session.as_mut() else {
            log::warn!("start level without a session");
            return;
        };

        // Clear the previous level's leftovers
        let leftovers = session
            .animal
            .take()
            .into_iter()
            .chain(session.banner.take())
            .chain(session.ball.take())
            .chain(session.spent.drain(..))
            .chain(session.stars.drain(..));
        for id in leftovers.collect::<Vec<_>>() {
            self.registry.despawn(id, &mut self.scheduler);
        }
        session.balls_used = 0;
        session.level += 1;
        log::info!("level {} (score {})", session.level, session.points);

        let region = PlacementRegion::for_screen(self.width, self.height);
        let positions = scatter_stars(
            &mut self.rng,
            self.tuning.stars_per_level,
            region,
            self.tuning.min_star_separation,
            self.tuning.star_placement_attempts,
        );
        for pos in positions {
            let brightness = self.rng.random_range(0..=3) as f32;
            let id = self.registry.spawn(Asset::Star(Star::new(pos, brightness)), &mut self.scheduler);
            session.stars.push(id);
        }

        self.new_ball();
    }

    fn new_ball(&mut self) {
        if self.session.is_none() {
            log::warn!("new ball without a session");
            return;
        }
        let spawn = Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y);
        let ball = self.spawn(Asset::Ball(PhysicsBall::new(spawn, self.tuning.ball_radius)));
        let cue = self.spawn(Asset::Cue(AimCue::new(spawn)));
        let bar = self.spawn(Asset::FillBar(FillBar::new(
            Vec2::new(FILL_BAR_X, FILL_BAR_Y),
            self.tuning.fill_max,
            self.tuning.fill_period_ms,
        )));

        if let Some(session) = self.session.as_mut() {
            if let Some(old) = session.ball.replace(ball) {
                session.spent.push(old);
            }
            session.cue = Some(cue);
            session.bar = Some(bar);
            session.balls_used += 1;
            session.tally.reset();
            log::debug!("ball {}/{}", session.balls_used, self.tuning.balls_per_level);
        }
        self.enter(Scene::Playing(PlayPhase::Aiming));
    }

    fn shoot(&mut self, angle: f32) {
        if self.scene != Scene::Playing(PlayPhase::Aiming) {
            log::warn!("shoot ignored in {:?}", self.scene);
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let speed = match session.bar.and_then(|id| self.registry.get(id)) {
            Some(Asset::FillBar(bar)) => bar.value(),
            _ => 0,
        };
        for id in [session.cue.take(), session.bar.take()].into_iter().flatten() {
            self.registry.despawn(id, &mut self.scheduler);
        }

        let launched = match session.ball.and_then(|id| self.registry.get_mut(id)) {
            Some(Asset::Ball(ball)) => ball.launch(angle, speed as f32),
            _ => false,
        };
        if launched {
            log::info!("shot at {} degrees, power {}", angle, speed);
            self.enter(Scene::Playing(PlayPhase::BallInFlight));
        }
    }

    fn ball_stopped(&mut self) {
        if self.scene != Scene::Playing(PlayPhase::BallInFlight) {
            log::warn!("ball stopped in {:?}", self.scene);
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        log::debug!("ball stopped, {} stars left", session.stars.len());

        if session.balls_used >= self.tuning.balls_per_level {
            self.game_over();
        } else if session.stars.is_empty() {
            self.level_complete();
        } else {
            self.new_ball();
        }
    }

    fn level_complete(&mut self) {
        self.enter(Scene::Playing(PlayPhase::LevelComplete));
        let banner = self
            .label(23.0, "More stars!")
            .with_trigger(PressTrigger::on(Request::Goto(Transition::NextLevel)));
        let banner = self.spawn(Asset::SlidingLabel(banner));

        let (sprite, y, dx) = ANIMALS[self.rng.random_range(0..ANIMALS.len())];
        log::debug!("animal {:?}", sprite);
        let animal = SpriteAnimation::sliding(
            y,
            self.atlas.get(sprite),
            Slide { dx },
            self.tuning.animation_speed,
            self.width,
        );
        let animal = self.spawn(Asset::Animation(animal));

        if let Some(session) = self.session.as_mut() {
            session.banner = Some(banner);
            session.animal = Some(animal);
        }
        self.jingle(Melody::Fanfare);
    }

    fn game_over(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.registry.despawn(session.score_counter, &mut self.scheduler);
        for id in &session.stars {
            self.registry.despawn(*id, &mut self.scheduler);
        }

        let new_record = self.high_scores.submit(session.points);
        let summary = GameOverSummary {
            score: session.points,
            high_score: self.high_scores.best(),
            new_record,
            headline: if new_record { "New high score!" } else { "Game over" },
        };
        log::info!("game over: {:?}", summary);

        let headline = self.label(10.0, summary.headline).with_speed(GAME_OVER_SLIDE_SPEED);
        let score = self
            .label(30.0, format!("Your score: {}", summary.score))
            .from_right(self.width)
            .with_speed(GAME_OVER_SLIDE_SPEED)
            .with_trigger(PressTrigger::on(Request::Goto(Transition::Splash)));
        self.spawn(Asset::SlidingLabel(headline));
        self.spawn(Asset::SlidingLabel(score));

        self.last_summary = Some(summary);
        self.enter(Scene::GameOver);
        self.jingle(Melody::Fanfare);
    }

    /// Score every catchable star within reach of the ball
    fn check_catches(&mut self) {
        if !matches!(self.scene, Scene::Playing(_)) {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(ball_pos) = session.ball.and_then(|id| self.registry.get(id)).map(Asset::pos) else {
            return;
        };

        let mut catches = 0;
        let mut i = 0;
        while i < session.stars.len() {
            let id = session.stars[i];
            let star = match self.registry.get_mut(id) {
                Some(Asset::Star(star)) if caught(ball_pos, star.pos, self.tuning.ball_radius) => star,
                Some(_) => {
                    i += 1;
                    continue;
                }
                None => {
                    session.stars.remove(i);
                    continue;
                }
            };
            session.stars.remove(i);

            // The star shows its own "+n" popup on its next tick
            let points = session.tally.record();
            star.fall(points);
            session.points += points;
            if let Some(Asset::Score(counter)) = self.registry.get_mut(session.score_counter) {
                counter.add(points);
            }
            log::debug!("caught star {:?} for {} (score {})", id, points, session.points);
            catches += 1;
        }

        if catches > 0 {
            self.jingle(Melody::StarCaught);
        }
    }

    /// Queue a buzzer tone if feedback sounds are on, and schedule its end
    fn play_effect(&mut self, effect: SoundEffect) {
        if !self.settings.sound_enabled {
            return;
        }
        self.audio.push(AudioCue::Effect(effect));
        if let Some(previous) = self.tone_stop.take() {
            self.scheduler.cancel(previous);
        }
        let (_, duration) = effect.tone();
        self.tone_stop = Some(self.scheduler.schedule_once(duration, TimerAction::StopTone));
    }

    fn stop_tone(&mut self) {
        if let Some(pending) = self.tone_stop.take() {
            self.scheduler.cancel(pending);
        }
        self.audio.push(AudioCue::StopTone);
    }

    /// Queue a tune if music is on
    fn jingle(&mut self, melody: Melody) {
        if self.settings.music_enabled {
            self.audio.push(AudioCue::Play(melody));
        }
    }
}
