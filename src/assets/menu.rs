//! One-button menu
//!
//! Short press moves the cursor down (wrapping), long press confirms. The
//! confirmed entry blinks for a moment before its action is requested, so the
//! player sees what was picked.

use glam::Vec2;

use super::{AssetId, Request, Signal, TickContext};
use crate::audio::SoundEffect;
use crate::consts::{CHAR_HEIGHT, CHAR_WIDTH};
use crate::input::ButtonEvent;
use crate::platform::{BinaryColor, Surface};
use crate::scene::MenuAction;
use crate::scheduler::{AssetTimer, Scheduler, TimerAction, TimerHandle};
use crate::text_width;

/// Vertical distance between entries
const LINE_HEIGHT: i32 = CHAR_HEIGHT + 2;
/// Extra space below an underlined title
const TITLE_GAP: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuOption {
    pub label: &'static str,
    pub action: Option<MenuAction>,
}

impl MenuOption {
    pub fn new(label: &'static str, action: MenuAction) -> Self {
        Self {
            label,
            action: Some(action),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flicker {
    timer: TimerHandle,
    started_ms: u64,
}

#[derive(Debug)]
pub struct MenuOverlay {
    pub pos: Vec2,
    title: Option<&'static str>,
    options: Vec<MenuOption>,
    selected: usize,
    flicker: Option<Flicker>,
    /// Selected entry is in the "off" half of a blink
    blink_off: bool,
}

impl MenuOverlay {
    pub fn new(pos: Vec2, title: Option<&'static str>, options: Vec<MenuOption>) -> Self {
        Self {
            pos,
            title,
            options,
            selected: 0,
            flicker: None,
            blink_off: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_flickering(&self) -> bool {
        self.flicker.is_some()
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
        log::debug!("menu selection {}", self.selected);
    }

    pub fn tick(&mut self, id: AssetId, ctx: &mut TickContext<'_>) {
        match ctx.button {
            ButtonEvent::None => {}
            // Selection is locked once confirmed
            _ if self.flicker.is_some() => {
                log::debug!("menu busy, {:?} ignored", ctx.button);
            }
            ButtonEvent::Short => {
                self.select_next();
                ctx.emit(Signal::Sound(SoundEffect::MenuMove));
            }
            ButtonEvent::Long => {
                let timer = ctx
                    .scheduler
                    .schedule_once(ctx.tuning.flicker_ms, TimerAction::Asset(id, AssetTimer::FlickerDone));
                self.flicker = Some(Flicker {
                    timer,
                    started_ms: ctx.now_ms,
                });
                ctx.emit(Signal::Sound(SoundEffect::MenuSelect));
            }
        }

        self.blink_off = match self.flicker {
            Some(f) => {
                let step = ctx.tuning.flicker_step_ms.max(1);
                (ctx.now_ms.saturating_sub(f.started_ms) / step) % 2 == 1
            }
            None => false,
        };
    }

    /// The confirmation blink ended; hand back the chosen action
    pub fn finish_flicker(&mut self) -> Option<Request> {
        self.flicker = None;
        self.blink_off = false;
        let option = self.options.get(self.selected)?;
        log::debug!("menu chose {:?}", option.label);
        option.action.map(Request::Menu)
    }

    pub fn destroy(&mut self, scheduler: &mut Scheduler) {
        if let Some(f) = self.flicker.take() {
            scheduler.cancel(f.timer);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let x = self.pos.x as i32;
        let y = self.pos.y as i32;
        let mut offset = 0;

        if let Some(title) = self.title {
            let tx = x + 2 * CHAR_WIDTH;
            surface.text(title, tx, y, BinaryColor::On);
            surface.hline(tx, y + CHAR_HEIGHT, text_width(title) as u32, BinaryColor::On);
            offset += TITLE_GAP;
        }

        for (i, option) in self.options.iter().enumerate() {
            offset += LINE_HEIGHT;
            let selected = i == self.selected;
            if selected && self.blink_off {
                continue;
            }
            let marker = if selected { "> " } else { "  " };
            surface.text(&format!("{marker}{}", option.label), x, y + offset, BinaryColor::On);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transition;
    use crate::tuning::Tuning;

    fn menu() -> MenuOverlay {
        MenuOverlay::new(
            Vec2::new(10.0, 13.0),
            Some("Hi there!"),
            vec![
                MenuOption::new("Start Game", MenuAction::Go(Transition::Instructions1)),
                MenuOption::new("Options", MenuAction::Go(Transition::OptionsMenu)),
            ],
        )
    }

    fn tick(menu: &mut MenuOverlay, sched: &mut Scheduler, button: ButtonEvent, now: u64) -> Vec<Signal> {
        let tuning = Tuning::default();
        let mut ctx = TickContext::new(button, now, Vec2::new(128.0, 64.0), &tuning, sched);
        menu.tick(AssetId(1), &mut ctx);
        ctx.take_signals()
    }

    #[test]
    fn test_short_press_wraps_and_beeps() {
        let mut sched = Scheduler::new();
        let mut m = menu();
        let s = tick(&mut m, &mut sched, ButtonEvent::Short, 0);
        assert_eq!(m.selected(), 1);
        assert!(matches!(s[..], [Signal::Sound(SoundEffect::MenuMove)]));
        tick(&mut m, &mut sched, ButtonEvent::Short, 0);
        assert_eq!(m.selected(), 0);
    }

    #[test]
    fn test_long_press_confirms_after_flicker() {
        let mut sched = Scheduler::new();
        let mut m = menu();
        let s = tick(&mut m, &mut sched, ButtonEvent::Long, 0);
        assert!(matches!(s[..], [Signal::Sound(SoundEffect::MenuSelect)]));
        assert!(m.is_flickering());
        assert_eq!(sched.len(), 1);

        // Second long press while pending is ignored
        let s = tick(&mut m, &mut sched, ButtonEvent::Long, 10);
        assert!(s.is_empty());
        assert_eq!(sched.len(), 1);

        let fired = sched.poll(500);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, TimerAction::Asset(AssetId(1), AssetTimer::FlickerDone));
        assert_eq!(
            m.finish_flicker(),
            Some(Request::Menu(MenuAction::Go(Transition::Instructions1)))
        );
        assert!(!m.is_flickering());
    }

    #[test]
    fn test_selected_entry_blinks() {
        let mut sched = Scheduler::new();
        let mut m = menu();
        tick(&mut m, &mut sched, ButtonEvent::Long, 1000);
        assert!(!m.blink_off);
        tick(&mut m, &mut sched, ButtonEvent::None, 1060);
        assert!(m.blink_off);
        tick(&mut m, &mut sched, ButtonEvent::None, 1110);
        assert!(!m.blink_off);
    }

    #[test]
    fn test_destroy_cancels_flicker() {
        let mut sched = Scheduler::new();
        let mut m = menu();
        tick(&mut m, &mut sched, ButtonEvent::Long, 0);
        m.destroy(&mut sched);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_layout_keeps_rows_apart() {
        use crate::platform::MonoFrameBuffer;

        let mut fb = MonoFrameBuffer::default_size();
        menu().draw(&mut fb);
        let lit_in_row = |y: i32| (0..128).filter(|&x| fb.is_on(x, y)).count();

        // Title at y 13..21, underline just below, no glyph crosses it
        let underline = 13 + CHAR_HEIGHT;
        assert_eq!(lit_in_row(underline), text_width("Hi there!") as usize);
        // Blank rows between the underline and each entry
        let first = underline + TITLE_GAP + LINE_HEIGHT - CHAR_HEIGHT;
        assert_eq!(first, 27);
        for y in underline + 1..first {
            assert_eq!(lit_in_row(y), 0, "row {y}");
        }
        for y in first + CHAR_HEIGHT..first + LINE_HEIGHT {
            assert_eq!(lit_in_row(y), 0, "row {y}");
        }
        assert!((first..first + CHAR_HEIGHT).any(|y| lit_in_row(y) > 0));
        assert!((first + LINE_HEIGHT..first + LINE_HEIGHT + CHAR_HEIGHT).any(|y| lit_in_row(y) > 0));
    }
}
