//! Aiming controls: the cue around the waiting ball and the power bar

use glam::Vec2;

use super::{AssetId, Request, TickContext};
use crate::input::ButtonEvent;
use crate::platform::{BinaryColor, Surface};
use crate::scheduler::{AssetTimer, Scheduler, TimerAction, TimerHandle};

/// Aim limits in degrees (negative is up on screen)
const SHALLOWEST_ANGLE: i32 = -10;
const STEEPEST_ANGLE: i32 = -80;
const START_ANGLE: i32 = -40;
const ANGLE_STEP: i32 = 10;

/// Distance between the ball and the cue tip pulses between these
const MIN_GAP: i32 = 5;
const MAX_GAP: i32 = 15;
const CUE_LENGTH: i32 = 20;

/// Length of the dotted direction guide
const GUIDE_LENGTH: i32 = 20;
const GUIDE_SPACING: usize = 4;

/// Cue stick pointing through the ball
#[derive(Debug)]
pub struct AimCue {
    pub pos: Vec2,
    angle: i32,
    angle_step: i32,
    gap: i32,
    gap_step: i32,
}

impl AimCue {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: START_ANGLE,
            angle_step: ANGLE_STEP,
            gap: MAX_GAP,
            gap_step: 1,
        }
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn gap(&self) -> i32 {
        self.gap
    }

    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.gap == MAX_GAP || self.gap == MIN_GAP {
            self.gap_step = -self.gap_step;
        }
        self.gap += self.gap_step;

        match ctx.button {
            ButtonEvent::Short => {
                self.angle += self.angle_step;
                if self.angle == SHALLOWEST_ANGLE || self.angle == STEEPEST_ANGLE {
                    self.angle_step = -self.angle_step;
                }
                log::debug!("aim angle {}", self.angle);
            }
            ButtonEvent::Long => ctx.request(Request::Shoot {
                angle: self.angle as f32,
            }),
            ButtonEvent::None => {}
        }
    }

    /// Point `radius` behind (x, y) along the aim direction
    fn behind(x: i32, y: i32, angle: i32, radius: i32) -> (i32, i32) {
        let rad = (angle as f32).to_radians();
        (
            (x as f32 - rad.cos() * radius as f32) as i32,
            (y as f32 - rad.sin() * radius as f32) as i32,
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let x = self.pos.x as i32;
        let y = self.pos.y as i32;

        // 3px thick stick
        for i in -1..=1 {
            for j in -1..=1 {
                let (x0, y0) = Self::behind(x + i, y + j, self.angle, self.gap);
                let (x1, y1) = Self::behind(x + i, y + j, self.angle, CUE_LENGTH + self.gap);
                surface.line(x0, y0, x1, y1, BinaryColor::On);
            }
        }

        for r in (1..GUIDE_LENGTH).step_by(GUIDE_SPACING) {
            let (px, py) = Self::behind(x, y, self.angle + 180, r);
            surface.pixel(px, py, BinaryColor::On);
        }
    }
}

/// Power meter that keeps cycling until the shot is taken
#[derive(Debug)]
pub struct FillBar {
    pub pos: Vec2,
    value: u32,
    max: u32,
    period_ms: u64,
    timer: Option<TimerHandle>,
}

/// Inner fill width at full power
const BAR_WIDTH: u32 = 20;
const BAR_HEIGHT: u32 = 5;

impl FillBar {
    pub fn new(pos: Vec2, max: u32, period_ms: u64) -> Self {
        Self {
            pos,
            value: 1,
            max: max.max(1),
            period_ms,
            timer: None,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn start(&mut self, id: AssetId, scheduler: &mut Scheduler) {
        if let Some(old) = self.timer.take() {
            scheduler.cancel(old);
        }
        self.timer = Some(scheduler.schedule_periodic(self.period_ms, TimerAction::Asset(id, AssetTimer::FillStep)));
    }

    /// Advance one step, wrapping from max back to 0
    pub fn step(&mut self) {
        self.value = (self.value + 1) % (self.max + 1);
    }

    pub fn destroy(&mut self, scheduler: &mut Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let x = self.pos.x as i32;
        let y = self.pos.y as i32;
        surface.rect(x, y, BAR_WIDTH + 2, BAR_HEIGHT, BinaryColor::On);
        let fill = BAR_WIDTH * self.value / self.max;
        surface.fill_rect(x + 1, y, fill, BAR_HEIGHT, BinaryColor::On);
    }
}
