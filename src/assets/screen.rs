//! Full-screen decorations

use super::{AssetId, Signal, TickContext};
use crate::platform::{BinaryColor, Surface};

/// Black curtain that opens from the middle, then removes itself
#[derive(Debug, Default)]
pub struct TransitionCurtain {
    opened: u32,
}

impl TransitionCurtain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, id: AssetId, ctx: &mut TickContext<'_>) {
        self.opened += 1;
        if self.opened >= (ctx.bounds.x as u32) / 2 {
            ctx.emit(Signal::Despawn(id));
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let half = surface.width() / 2;
        let height = surface.height();
        let gap = self.opened.min(half);
        surface.fill_rect(0, 0, half - gap, height, BinaryColor::Off);
        surface.fill_rect((half + gap) as i32, 0, surface.width(), height, BinaryColor::Off);
    }
}

/// Floor and side walls of the play field
#[derive(Debug, Default)]
pub struct BorderFrame;

impl BorderFrame {
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let w = surface.width();
        let h = surface.height();
        surface.hline(0, h as i32 - 1, w, BinaryColor::On);
        surface.vline(0, 0, h, BinaryColor::On);
        surface.vline(w as i32 - 1, 0, h, BinaryColor::On);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonEvent;
    use crate::platform::MonoFrameBuffer;
    use crate::scheduler::Scheduler;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_curtain_opens_then_leaves() {
        let tuning = Tuning::default();
        let mut sched = Scheduler::new();
        let mut curtain = TransitionCurtain::new();
        for i in 1..=64 {
            let mut ctx = TickContext::new(ButtonEvent::None, 0, Vec2::new(128.0, 64.0), &tuning, &mut sched);
            curtain.tick(AssetId(0), &mut ctx);
            let done = !ctx.take_signals().is_empty();
            assert_eq!(done, i == 64);
        }
    }

    #[test]
    fn test_curtain_hides_the_sides() {
        let mut fb = MonoFrameBuffer::default_size();
        fb.fill_rect(0, 0, 128, 64, BinaryColor::On);
        let mut curtain = TransitionCurtain::new();
        curtain.opened = 10;
        curtain.draw(&mut fb);
        assert!(!fb.is_on(0, 0));
        assert!(!fb.is_on(53, 30));
        assert!(fb.is_on(54, 30));
        assert!(fb.is_on(73, 30));
        assert!(!fb.is_on(74, 30));
    }

    #[test]
    fn test_border_leaves_top_open() {
        let mut fb = MonoFrameBuffer::default_size();
        BorderFrame.draw(&mut fb);
        assert!(fb.is_on(64, 63));
        assert!(fb.is_on(0, 30));
        assert!(fb.is_on(127, 30));
        assert!(!fb.is_on(64, 0));
    }
}
