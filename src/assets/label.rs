//! Text assets

use glam::Vec2;

use super::{AssetId, PressTrigger, Signal, TickContext};
use crate::consts::{LABEL_SLIDE_SPEED, SCORE_X, SCORE_Y};
use crate::platform::{BinaryColor, Surface};
use crate::text_width;

/// Score popup ("+2") that drifts upward and disappears
#[derive(Debug)]
pub struct FadingLabel {
    pub pos: Vec2,
    text: String,
    age: u32,
    life: u32,
}

impl FadingLabel {
    /// Centre `text` horizontally on `anchor`, just above it, kept on screen
    pub fn new(anchor: Vec2, text: impl Into<String>, life: u32, screen_width: u32) -> Self {
        let text = text.into();
        let w = text_width(&text) as f32;
        let mut x = anchor.x - (w / 2.0).trunc();
        if x + w > screen_width as f32 {
            x = screen_width as f32 - w;
        }
        let mut y = anchor.y - 8.0;
        if y < 0.0 {
            // Near the top: start low enough to rise for the whole lifetime
            y = life as f32;
        }
        Self {
            pos: Vec2::new(x.max(0.0), y),
            text,
            age: 0,
            life,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tick(&mut self, id: AssetId, ctx: &mut TickContext<'_>) {
        self.pos.y -= 1.0;
        self.age += 1;
        if self.age >= self.life {
            ctx.emit(Signal::Despawn(id));
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.text(&self.text, self.pos.x as i32, self.pos.y as i32, BinaryColor::On);
    }
}

/// Line of text that slides in from a screen edge and stops centred
#[derive(Debug)]
pub struct SlidingLabel {
    pub pos: Vec2,
    text: String,
    speed: f32,
    from_right: bool,
    target_x: f32,
    pub trigger: PressTrigger,
}

impl SlidingLabel {
    pub fn new(y: f32, text: impl Into<String>, screen_width: u32) -> Self {
        let text = text.into();
        let w = text_width(&text) as f32;
        Self {
            pos: Vec2::new(-w, y),
            target_x: (screen_width as f32 - w) / 2.0,
            text,
            speed: LABEL_SLIDE_SPEED,
            from_right: false,
            trigger: PressTrigger::none(),
        }
    }

    /// Enter from the right edge instead of the left
    pub fn from_right(mut self, screen_width: u32) -> Self {
        self.from_right = true;
        self.pos.x = screen_width as f32;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_trigger(mut self, trigger: PressTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_settled(&self) -> bool {
        self.pos.x == self.target_x
    }

    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.trigger.poll(ctx);
        if self.from_right {
            if self.pos.x > self.target_x {
                self.pos.x = (self.pos.x - self.speed).max(self.target_x);
            }
        } else if self.pos.x < self.target_x {
            self.pos.x = (self.pos.x + self.speed).min(self.target_x);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.text(&self.text, self.pos.x as i32, self.pos.y as i32, BinaryColor::On);
    }
}

/// Running score in the top-left corner
#[derive(Debug)]
pub struct ScoreCounter {
    pub pos: Vec2,
    value: u32,
}

impl Default for ScoreCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCORE_X, SCORE_Y),
            value: 0,
        }
    }

    pub fn add(&mut self, points: u32) {
        self.value += points;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.text(&self.value.to_string(), self.pos.x as i32, self.pos.y as i32, BinaryColor::On);
    }
}
