//! Single-button input classification
//!
//! The whole game is played with one push-button. Each frame the raw level is
//! sampled once and turned into at most one event, emitted on release:
//! a short tap aims/selects, a long hold shoots/confirms.

/// Default boundary between a short and a long press (milliseconds)
pub const LONG_PRESS_THRESHOLD_MS: u64 = 250;

/// Classified button event for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonEvent {
    #[default]
    None,
    /// Released after being held for at most the threshold
    Short,
    /// Released after being held longer than the threshold
    Long,
}

impl ButtonEvent {
    pub fn is_press(self) -> bool {
        self != ButtonEvent::None
    }
}

/// Turns per-frame raw button levels into [`ButtonEvent`]s
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    threshold_ms: u64,
    /// Level seen on the previous sample
    pressed: bool,
    /// When the current press started (None while released)
    press_started: Option<u64>,
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new(LONG_PRESS_THRESHOLD_MS)
    }
}

impl ButtonClassifier {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            pressed: false,
            press_started: None,
        }
    }

    /// Sample the raw level. Call exactly once per frame, before any asset ticks.
    pub fn sample(&mut self, pressed: bool, now_ms: u64) -> ButtonEvent {
        if pressed != self.pressed {
            log::debug!("button {}", if pressed { "down" } else { "up" });
        }
        self.pressed = pressed;

        if pressed {
            if self.press_started.is_none() {
                self.press_started = Some(now_ms);
            }
            return ButtonEvent::None;
        }
        match self.press_started.take() {
            Some(started) if now_ms.saturating_sub(started) <= self.threshold_ms => ButtonEvent::Short,
            Some(_) => ButtonEvent::Long,
            None => ButtonEvent::None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.pressed
    }
}
