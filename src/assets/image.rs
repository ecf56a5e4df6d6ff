//! Bitmap assets

use std::rc::Rc;

use glam::Vec2;

use super::{AssetId, PressTrigger, Signal, TickContext};
use crate::platform::{SpriteSheet, Surface};

/// Still image, optionally reacting to the button
#[derive(Debug)]
pub struct StaticImage {
    pub pos: Vec2,
    sheet: Rc<SpriteSheet>,
    pub trigger: PressTrigger,
}

impl StaticImage {
    pub fn new(pos: Vec2, sheet: Rc<SpriteSheet>) -> Self {
        Self {
            pos,
            sheet,
            trigger: PressTrigger::none(),
        }
    }

    pub fn with_trigger(mut self, trigger: PressTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(frame) = self.sheet.frame(0) {
            surface.blit(frame, self.pos.x as i32, self.pos.y as i32);
        }
    }
}

/// Horizontal travel across the whole screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    /// Pixels per animation frame; the sign picks the direction
    pub dx: f32,
}

/// Looping frame animation, optionally crossing the screen once
#[derive(Debug)]
pub struct SpriteAnimation {
    pub pos: Vec2,
    sheet: Rc<SpriteSheet>,
    frame: f32,
    /// Ticks per frame
    speed: f32,
    slide: Option<Slide>,
}

impl SpriteAnimation {
    pub fn new(pos: Vec2, sheet: Rc<SpriteSheet>, speed: f32) -> Self {
        Self {
            pos,
            sheet,
            frame: 0.0,
            speed: speed.max(1.0),
            slide: None,
        }
    }

    /// Animation that enters from the edge opposite to its travel and
    /// removes itself once fully off screen
    pub fn sliding(y: f32, sheet: Rc<SpriteSheet>, slide: Slide, speed: f32, screen_width: u32) -> Self {
        let x = if slide.dx < 0.0 {
            screen_width as f32
        } else {
            -(sheet.frame_width() as f32)
        };
        let mut anim = Self::new(Vec2::new(x, y), sheet, speed);
        anim.slide = Some(slide);
        anim
    }

    pub fn frame_index(&self) -> usize {
        if self.sheet.is_empty() {
            return 0;
        }
        self.frame as usize % self.sheet.len()
    }

    pub fn tick(&mut self, id: AssetId, ctx: &mut TickContext<'_>) {
        self.frame += 1.0 / self.speed;

        let Some(slide) = self.slide else {
            return;
        };
        self.pos.x += slide.dx / self.speed;
        let width = self.sheet.frame_width() as f32;
        let off_screen = (slide.dx > 0.0 && self.pos.x >= ctx.bounds.x)
            || (slide.dx < 0.0 && self.pos.x < -width);
        if off_screen {
            log::debug!("animation {:?} left the screen", id);
            ctx.emit(Signal::Despawn(id));
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(frame) = self.sheet.frame(self.frame_index()) {
            surface.blit(frame, self.pos.x as i32, self.pos.y as i32);
        }
    }
}
