//! Software timers
//!
//! Timers never run code on their own. The frame loop polls the scheduler at
//! a fixed point and gets back the actions that came due; each action is then
//! routed to its owner (an asset, or the tone output). This keeps every
//! mutation of shared state inside the single-threaded frame loop.

use crate::assets::AssetId;

/// Opaque handle used to cancel a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

/// What an asset-owned timer means to its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetTimer {
    /// Menu confirmation flicker finished
    FlickerDone,
    /// Power bar advances one step
    FillStep,
}

/// Payload delivered when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Deliver to the asset with this id (dropped if it no longer exists)
    Asset(AssetId, AssetTimer),
    /// Silence the buzzer
    StopTone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    due_ms: u64,
    mode: Mode,
    action: TimerAction,
}

/// A fired timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub action: TimerAction,
}

/// Upper bound on catch-up firings of one periodic timer in a single poll
const MAX_CATCH_UP: u32 = 16;

/// Millisecond timer queue driven by [`Scheduler::poll`]
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    now_ms: u64,
    next_handle: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the most recent poll
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `action` once, `delay_ms` after the current time
    pub fn schedule_once(&mut self, delay_ms: u64, action: TimerAction) -> TimerHandle {
        self.insert(delay_ms, Mode::Once, action)
    }

    /// Fire `action` every `period_ms` (a zero period is treated as 1 ms)
    pub fn schedule_periodic(&mut self, period_ms: u64, action: TimerAction) -> TimerHandle {
        let period = period_ms.max(1);
        self.insert(period, Mode::Every(period), action)
    }

    fn insert(&mut self, delay_ms: u64, mode: Mode, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.entries.push(Entry {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            mode,
            action,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the clock and collect every action that came due, oldest first.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Fired> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut fired: Vec<(u64, Fired)> = Vec::new();
        for entry in &mut self.entries {
            match entry.mode {
                Mode::Once => {
                    if entry.due_ms <= now {
                        fired.push((entry.due_ms, Fired { handle: entry.handle, action: entry.action }));
                    }
                }
                Mode::Every(period) => {
                    let mut runs = 0;
                    while entry.due_ms <= now && runs < MAX_CATCH_UP {
                        fired.push((entry.due_ms, Fired { handle: entry.handle, action: entry.action }));
                        entry.due_ms += period;
                        runs += 1;
                    }
                    if entry.due_ms <= now {
                        // Too far behind, resynchronise instead of bursting
                        entry.due_ms = now + period;
                    }
                }
            }
        }
        self.entries
            .retain(|e| !(e.mode == Mode::Once && e.due_ms <= now));

        fired.sort_by_key(|(due, f)| (*due, f.handle.0));
        fired.into_iter().map(|(_, f)| f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut s = Scheduler::new();
        s.poll(1000);
        let h = s.schedule_once(500, TimerAction::StopTone);
        assert!(s.poll(1499).is_empty());
        let fired = s.poll(1500);
        assert_eq!(fired, vec![Fired { handle: h, action: TimerAction::StopTone }]);
        assert!(s.poll(5000).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn test_periodic_rearms() {
        let mut s = Scheduler::new();
        let action = TimerAction::Asset(AssetId(3), AssetTimer::FillStep);
        s.schedule_periodic(400, action);
        assert_eq!(s.poll(399).len(), 0);
        assert_eq!(s.poll(400).len(), 1);
        assert_eq!(s.poll(800).len(), 1);
        // Two periods elapsed since the last poll
        assert_eq!(s.poll(1600).len(), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let h = s.schedule_periodic(50, TimerAction::StopTone);
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(s.poll(10_000).is_empty());
    }

    #[test]
    fn test_fire_order_by_due_time() {
        let mut s = Scheduler::new();
        let late = s.schedule_once(300, TimerAction::StopTone);
        let early = s.schedule_once(100, TimerAction::Asset(AssetId(1), AssetTimer::FlickerDone));
        let fired = s.poll(1000);
        assert_eq!(fired[0].handle, early);
        assert_eq!(fired[1].handle, late);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut s = Scheduler::new();
        s.poll(2000);
        s.poll(1000);
        assert_eq!(s.now_ms(), 2000);
    }
}
