//! Presentation snapshot
//!
//! Everything the overlay needs for one frame: phase, timer and course seed.

use serde::{Deserialize, Serialize};

use crate::sim::{MatchPhase, Seed};

/// Timer/phase overlay state for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub phase: MatchPhase,
    /// Elapsed seconds (live while Playing, frozen once Ended)
    pub elapsed: f64,
    /// Elapsed seconds with two decimals, e.g. "12.34"
    pub timer_text: String,
    /// Seed of the course on screen
    pub seed: Seed,
    /// Whether the restart button should be shown
    pub show_restart: bool,
}

impl HudSnapshot {
    pub fn new(phase: MatchPhase, elapsed: f64, seed: Seed) -> Self {
        Self {
            phase,
            elapsed,
            timer_text: format_timer(elapsed),
            seed,
            show_restart: phase == MatchPhase::Ended,
        }
    }
}

/// Format seconds for the timer display
pub fn format_timer(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0.00".to_string();
    }
    format!("{seconds:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(0.0), "0.00");
        assert_eq!(format_timer(3.14159), "3.14");
        assert_eq!(format_timer(12.5), "12.50");
        assert_eq!(format_timer(f64::NAN), "0.00");
        assert_eq!(format_timer(-1.0), "0.00");
    }

    #[test]
    fn test_snapshot_restart_button() {
        assert!(!HudSnapshot::new(MatchPhase::Ready, 0.0, 1).show_restart);
        assert!(!HudSnapshot::new(MatchPhase::Playing, 1.0, 1).show_restart);
        let ended = HudSnapshot::new(MatchPhase::Ended, 9.876, 1);
        assert!(ended.show_restart);
        assert_eq!(ended.timer_text, "9.88");
    }
}
