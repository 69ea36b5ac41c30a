//! Match lifecycle: Ready -> Playing -> Ended -> Ready
//!
//! Transitions requested from the wrong source state are ignored rather than
//! treated as errors. Each transition reports whether it took effect.

use serde::{Deserialize, Serialize};

/// Current phase of one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Player at spawn, clock not running
    #[default]
    Ready,
    /// Clock running
    Playing,
    /// Goal reached, clock frozen
    Ended,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Ready => "ready",
            MatchPhase::Playing => "playing",
            MatchPhase::Ended => "ended",
        }
    }
}

/// Outcome of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    /// The machine moved to this phase
    Applied(MatchPhase),
    /// Guard rejected the request; nothing changed
    Ignored,
}

impl TransitionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied(_))
    }
}

/// Start/end timestamps in frame-clock seconds (zero while Ready)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchClock {
    pub start_time: f64,
    pub end_time: f64,
}

/// Phase state machine. Single writer: the match orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: MatchPhase,
    clock: MatchClock,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn clock(&self) -> MatchClock {
        self.clock
    }

    /// Ready -> Playing, stamping the start time
    pub fn start(&mut self, now: f64) -> TransitionResult {
        if self.phase != MatchPhase::Ready {
            log::debug!("start() ignored in phase {}", self.phase.as_str());
            return TransitionResult::Ignored;
        }
        self.phase = MatchPhase::Playing;
        self.clock.start_time = now;
        log::info!("Match started at {now:.3}s");
        TransitionResult::Applied(self.phase)
    }

    /// Playing -> Ended, stamping the end time
    pub fn end(&mut self, now: f64) -> TransitionResult {
        if self.phase != MatchPhase::Playing {
            log::debug!("end() ignored in phase {}", self.phase.as_str());
            return TransitionResult::Ignored;
        }
        self.phase = MatchPhase::Ended;
        self.clock.end_time = now;
        log::info!("Match ended: {:.2}s", self.clock.end_time - self.clock.start_time);
        TransitionResult::Applied(self.phase)
    }

    /// Playing | Ended -> Ready. The caller regenerates the course.
    pub fn restart(&mut self) -> TransitionResult {
        if self.phase == MatchPhase::Ready {
            log::debug!("restart() ignored in phase ready");
            return TransitionResult::Ignored;
        }
        self.phase = MatchPhase::Ready;
        self.clock = MatchClock::default();
        log::info!("Match reset to ready");
        TransitionResult::Applied(self.phase)
    }

    /// Seconds to display: live while Playing, frozen once Ended, zero while Ready
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.phase {
            MatchPhase::Ready => 0.0,
            MatchPhase::Playing => (now - self.clock.start_time).max(0.0),
            MatchPhase::Ended => self.clock.end_time - self.clock.start_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(at: f64) -> PhaseMachine {
        let mut machine = PhaseMachine::new();
        assert!(machine.start(at).is_applied());
        machine
    }

    fn ended(start: f64, end: f64) -> PhaseMachine {
        let mut machine = playing(start);
        assert!(machine.end(end).is_applied());
        machine
    }

    #[test]
    fn test_full_cycle() {
        let mut machine = PhaseMachine::new();
        assert_eq!(machine.phase(), MatchPhase::Ready);

        assert_eq!(machine.start(1.0), TransitionResult::Applied(MatchPhase::Playing));
        assert_eq!(machine.clock().start_time, 1.0);

        assert_eq!(machine.end(4.5), TransitionResult::Applied(MatchPhase::Ended));
        assert_eq!(machine.clock().end_time, 4.5);

        assert_eq!(machine.restart(), TransitionResult::Applied(MatchPhase::Ready));
        assert_eq!(machine.clock(), MatchClock::default());
    }

    #[test]
    fn test_start_guard() {
        let mut machine = playing(2.0);
        assert_eq!(machine.start(3.0), TransitionResult::Ignored);
        assert_eq!(machine.clock().start_time, 2.0);

        let mut machine = ended(2.0, 5.0);
        assert_eq!(machine.start(6.0), TransitionResult::Ignored);
        assert_eq!(machine.phase(), MatchPhase::Ended);
    }

    #[test]
    fn test_end_guard() {
        let mut machine = PhaseMachine::new();
        assert_eq!(machine.end(1.0), TransitionResult::Ignored);
        assert_eq!(machine.phase(), MatchPhase::Ready);

        let mut machine = ended(1.0, 2.0);
        assert_eq!(machine.end(9.0), TransitionResult::Ignored);
        assert_eq!(machine.clock().end_time, 2.0);
    }

    #[test]
    fn test_restart_guard() {
        let mut machine = PhaseMachine::new();
        assert_eq!(machine.restart(), TransitionResult::Ignored);
        assert_eq!(machine.phase(), MatchPhase::Ready);

        let mut machine = playing(1.0);
        assert!(machine.restart().is_applied());
        assert_eq!(machine.phase(), MatchPhase::Ready);
    }

    #[test]
    fn test_elapsed_per_phase() {
        let machine = PhaseMachine::new();
        assert_eq!(machine.elapsed(100.0), 0.0);

        let machine = playing(10.0);
        assert_eq!(machine.elapsed(12.5), 2.5);

        let machine = ended(10.0, 13.25);
        assert_eq!(machine.elapsed(50.0), 3.25);
        assert_eq!(machine.elapsed(500.0), 3.25);
    }

    #[test]
    fn test_elapsed_monotonic_while_playing() {
        let machine = playing(0.5);
        let mut last = 0.0;
        for i in 0..100 {
            let now = 0.5 + i as f64 / 60.0;
            let elapsed = machine.elapsed(now);
            assert!(elapsed >= last);
            last = elapsed;
        }
    }
}
