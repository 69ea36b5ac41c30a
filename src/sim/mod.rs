//! Deterministic simulation module
//!
//! Course layout, obstacle motion and match phases live here. Given the same
//! seed and the same frame times the simulation pushes the same poses:
//! - Seeded RNG only (fresh seeds are drawn only on restart)
//! - Obstacle poses are pure functions of time
//! - Stable iteration order (by segment index)
//! - No rendering or platform dependencies

pub mod course;
pub mod motion;
pub mod phase;
pub mod rng;
pub mod tick;

pub use course::{CourseBounds, CourseLayout, ObstacleType, Segment, WallVolume, generate, goal_z};
pub use motion::{KinematicPose, Motion, Obstacle, ObstacleArena};
pub use phase::{MatchClock, MatchPhase, PhaseMachine, TransitionResult};
pub use rng::{Seed, SeedRng, fresh_seed};
pub use tick::{
    Course, FrameClock, FrameInput, FrameTime, Match, MatchEvent, SeedSource, TickReport,
    Transition,
};
