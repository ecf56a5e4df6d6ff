//! Drawable, updatable game objects
//!
//! Every object on screen is one [`Asset`] variant. Assets never reach into
//! the game: during `tick` they read the frame's [`TickContext`] and emit
//! [`Signal`]s into it. The registry applies structural signals right after
//! the emitting asset's tick, the director interprets the rest once per frame.

pub mod cue;
pub mod image;
pub mod label;
pub mod menu;
pub mod registry;
pub mod screen;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::input::ButtonEvent;
use crate::platform::{BinaryColor, Surface};
use crate::scene::{MenuAction, Transition};
use crate::scheduler::{AssetTimer, Scheduler};
use crate::sim::{BallPhysics, BallStep, PhysicsBall, Star};
use crate::tuning::Tuning;

pub use cue::{AimCue, FillBar};
pub use image::{Slide, SpriteAnimation, StaticImage};
pub use label::{FadingLabel, ScoreCounter, SlidingLabel};
pub use menu::MenuOverlay;
pub use registry::AssetRegistry;
pub use screen::{BorderFrame, TransitionCurtain};

/// Registry-assigned identity, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u32);

/// Something the director has to act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Goto(Transition),
    Menu(MenuAction),
    /// Launch the current ball at `angle` degrees
    Shoot { angle: f32 },
    BallStopped,
}

/// Emitted by an asset during its tick
#[derive(Debug)]
pub enum Signal {
    /// Remove (and tear down) an asset, possibly the emitter itself
    Despawn(AssetId),
    /// Add a new asset; it is first ticked next frame
    Spawn(Box<Asset>),
    Sound(SoundEffect),
    Request(Request),
}

/// Per-frame view handed to every asset's tick
pub struct TickContext<'a> {
    pub button: ButtonEvent,
    pub now_ms: u64,
    /// Screen size (width, height)
    pub bounds: Vec2,
    pub tuning: &'a Tuning,
    pub scheduler: &'a mut Scheduler,
    signals: Vec<Signal>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        button: ButtonEvent,
        now_ms: u64,
        bounds: Vec2,
        tuning: &'a Tuning,
        scheduler: &'a mut Scheduler,
    ) -> Self {
        Self {
            button,
            now_ms,
            bounds,
            tuning,
            scheduler,
            signals: Vec::new(),
        }
    }

    pub fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn request(&mut self, request: Request) {
        self.emit(Signal::Request(request));
    }

    pub(crate) fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}

/// Optional "do this when the button is pressed" behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressTrigger(pub Option<Request>);

impl PressTrigger {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn on(request: Request) -> Self {
        Self(Some(request))
    }

    /// Emit the request if this frame saw a short or long press
    pub fn poll(&self, ctx: &mut TickContext<'_>) {
        match self.0 {
            Some(request) if ctx.button.is_press() => ctx.request(request),
            _ => {}
        }
    }
}

/// Everything that can live in the registry
#[derive(Debug)]
pub enum Asset {
    Ball(PhysicsBall),
    Star(Star),
    Menu(MenuOverlay),
    Curtain(TransitionCurtain),
    FadingLabel(FadingLabel),
    FillBar(FillBar),
    SlidingLabel(SlidingLabel),
    Image(StaticImage),
    Animation(SpriteAnimation),
    Cue(AimCue),
    Score(ScoreCounter),
    Border(BorderFrame),
}

impl Asset {
    /// Advance one frame
    pub fn tick(&mut self, id: AssetId, ctx: &mut TickContext<'_>) {
        match self {
            Asset::Ball(ball) => {
                let physics = BallPhysics {
                    gravity: ctx.tuning.gravity,
                    energy_loss: ctx.tuning.energy_loss,
                    rest_epsilon: ctx.tuning.rest_epsilon,
                    bounds: ctx.bounds,
                };
                match ball.step(&physics) {
                    BallStep::Bounced => ctx.emit(Signal::Sound(SoundEffect::Bounce)),
                    BallStep::Stopped => ctx.request(Request::BallStopped),
                    BallStep::Idle | BallStep::Moved => {}
                }
            }
            Asset::Star(star) => {
                if let Some(points) = star.take_award() {
                    let width = ctx.bounds.x as u32;
                    let popup = FadingLabel::new(star.pos, format!("+{points}"), ctx.tuning.popup_frames, width);
                    ctx.emit(Signal::Spawn(Box::new(Asset::FadingLabel(popup))));
                }
                star.tick(ctx.tuning.gravity);
                if star.is_gone(ctx.bounds.y) {
                    ctx.emit(Signal::Despawn(id));
                }
            }
            Asset::Menu(menu) => menu.tick(id, ctx),
            Asset::Curtain(curtain) => curtain.tick(id, ctx),
            Asset::FadingLabel(label) => label.tick(id, ctx),
            Asset::FillBar(_) | Asset::Score(_) | Asset::Border(_) => {}
            Asset::SlidingLabel(label) => label.tick(ctx),
            Asset::Image(image) => image.trigger.poll(ctx),
            Asset::Animation(anim) => anim.tick(id, ctx),
            Asset::Cue(cue) => cue.tick(ctx),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            Asset::Ball(ball) => draw_ball(ball, surface),
            Asset::Star(star) => draw_star(star, surface),
            Asset::Menu(menu) => menu.draw(surface),
            Asset::Curtain(curtain) => curtain.draw(surface),
            Asset::FadingLabel(label) => label.draw(surface),
            Asset::FillBar(bar) => bar.draw(surface),
            Asset::SlidingLabel(label) => label.draw(surface),
            Asset::Image(image) => image.draw(surface),
            Asset::Animation(anim) => anim.draw(surface),
            Asset::Cue(cue) => cue.draw(surface),
            Asset::Score(score) => score.draw(surface),
            Asset::Border(border) => border.draw(surface),
        }
    }

    /// Called once right after the asset joins the registry
    pub fn attach(&mut self, id: AssetId, scheduler: &mut Scheduler) {
        if let Asset::FillBar(bar) = self {
            bar.start(id, scheduler);
        }
    }

    /// Release owned timers. Called before the asset leaves the registry.
    pub fn destroy(&mut self, scheduler: &mut Scheduler) {
        match self {
            Asset::Menu(menu) => menu.destroy(scheduler),
            Asset::FillBar(bar) => bar.destroy(scheduler),
            _ => {}
        }
    }

    /// A timer owned by this asset fired
    pub fn on_timer(&mut self, timer: AssetTimer) -> Option<Request> {
        match (self, timer) {
            (Asset::Menu(menu), AssetTimer::FlickerDone) => menu.finish_flicker(),
            (Asset::FillBar(bar), AssetTimer::FillStep) => {
                bar.step();
                None
            }
            (asset, timer) => {
                log::warn!("timer {:?} not handled by {}", timer, asset.kind());
                None
            }
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Asset::Ball(ball) => ball.pos,
            Asset::Star(star) => star.pos,
            Asset::Menu(menu) => menu.pos,
            Asset::FadingLabel(label) => label.pos,
            Asset::FillBar(bar) => bar.pos,
            Asset::SlidingLabel(label) => label.pos,
            Asset::Image(image) => image.pos,
            Asset::Animation(anim) => anim.pos,
            Asset::Cue(cue) => cue.pos,
            Asset::Score(score) => score.pos,
            Asset::Curtain(_) | Asset::Border(_) => Vec2::ZERO,
        }
    }

    /// Variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Asset::Ball(_) => "ball",
            Asset::Star(_) => "star",
            Asset::Menu(_) => "menu",
            Asset::Curtain(_) => "curtain",
            Asset::FadingLabel(_) => "fading label",
            Asset::FillBar(_) => "fill bar",
            Asset::SlidingLabel(_) => "sliding label",
            Asset::Image(_) => "image",
            Asset::Animation(_) => "animation",
            Asset::Cue(_) => "aim cue",
            Asset::Score(_) => "score",
            Asset::Border(_) => "border",
        }
    }
}

fn draw_ball<S: Surface + ?Sized>(ball: &PhysicsBall, surface: &mut S) {
    let x = ball.pos.x as i32;
    let y = ball.pos.y as i32;
    surface.rect(x - 2, y - 2, 5, 5, BinaryColor::On);
    surface.rect(x - 1, y - 3, 3, 7, BinaryColor::On);
    surface.rect(x - 3, y - 1, 7, 3, BinaryColor::On);
}

fn draw_star<S: Surface + ?Sized>(star: &Star, surface: &mut S) {
    let x = star.pos.x as i32;
    let y = star.pos.y as i32;
    let b = star.arm();
    surface.line(x - b, y - b, x + b, y + b, BinaryColor::On);
    surface.line(x + b, y - b, x - b, y + b, BinaryColor::On);
    surface.line(x - b, y, x + b, y, BinaryColor::On);
    surface.line(x, y - b, x, y + b, BinaryColor::On);
}
