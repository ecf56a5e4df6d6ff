//! High score keeping
//!
//! A single best score held in memory for the lifetime of the process.
//! Nothing is written to flash, so a power cycle starts again from zero.

/// Best score of the current power-on session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScores {
    best: u32,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known best score
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the stored one (ties don't count)
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("new high score {} (was {})", score, self.best);
        self.best = score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_score_replaces_best() {
        let mut hs = HighScores::with_best(10);
        assert!(hs.submit(15));
        assert_eq!(hs.best(), 15);
    }

    #[test]
    fn test_tie_and_lower_keep_best() {
        let mut hs = HighScores::with_best(10);
        assert!(!hs.submit(10));
        assert!(!hs.submit(8));
        assert_eq!(hs.best(), 10);
    }

    #[test]
    fn test_zero_never_qualifies_on_fresh_table() {
        let hs = HighScores::new();
        assert!(!hs.qualifies(0));
        assert!(hs.qualifies(1));
    }
}
