//! Course Run - A timed obstacle-course racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (course generation, obstacle motion, match phases)
//! - `physics`: Rigid-body collaborator interface
//! - `input`: Keyboard controls and the player force model
//! - `hud`: Presentation snapshot for the timer/phase overlay
//! - `settings`: Data-driven course and control tuning

pub mod error;
pub mod hud;
pub mod input;
pub mod physics;
pub mod settings;
pub mod sim;

pub use error::{CourseError, Result};
pub use hud::HudSnapshot;
pub use settings::{ControlTuning, Settings};

use glam::Quat;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Distance between consecutive course segments along -Z
    pub const SEGMENT_SPACING: f32 = 4.0;
    /// Width of a segment floor (X and Z extent)
    pub const SEGMENT_WIDTH: f32 = 4.0;

    /// Player spawns here on every transition to Ready
    pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Player sphere radius
    pub const PLAYER_RADIUS: f32 = 0.3;
    /// Falling below this height restarts the match
    pub const FALL_LIMIT_Y: f32 = -4.0;
    /// The goal plane sits this far past the last obstacle segment
    pub const GOAL_MARGIN: f32 = 2.0;

    /// Obstacle rigid bodies sit this far above their segment origin
    pub const OBSTACLE_BODY_OFFSET: Vec3 = Vec3::new(0.0, 0.3, 0.0);
    /// Half-extents of the Spinner and Vertical bars (3.5 x 0.3 x 0.3)
    pub const BAR_HALF_EXTENTS: Vec3 = Vec3::new(1.75, 0.15, 0.15);
    /// Half-extents of the Axe blade (1.5 x 1.5 x 0.3)
    pub const AXE_HALF_EXTENTS: Vec3 = Vec3::new(0.75, 0.75, 0.15);
    /// Vertical obstacle rest height above its base
    pub const VERTICAL_LIFT: f32 = 1.15;
    /// Axe swing amplitude along X
    pub const AXE_AMPLITUDE: f32 = 1.25;
    /// Axe blade height above its base
    pub const AXE_HEIGHT: f32 = 0.75;
    /// Minimum spinner angular speed (rad/s) before the random part
    pub const SPINNER_MIN_SPEED: f64 = 0.2;

    /// Side wall X offset from the course centerline
    pub const WALL_OFFSET_X: f32 = 2.15;
    /// Wall height
    pub const WALL_HEIGHT: f32 = 1.9;
    /// Wall thickness
    pub const WALL_THICKNESS: f32 = 0.3;
    /// Wall center height
    pub const WALL_CENTER_Y: f32 = 0.75;
    /// End wall width (spans both side walls)
    pub const END_WALL_WIDTH: f32 = 4.6;
    /// Floor slab thickness
    pub const FLOOR_THICKNESS: f32 = 0.2;

    /// Restitution shared by walls and obstacles
    pub const BODY_RESTITUTION: f32 = 0.2;
    /// Floor friction (walls and obstacles are frictionless)
    pub const FLOOR_FRICTION: f32 = 1.0;

    /// Jump ray starts this far below the player center (just under the sphere)
    pub const JUMP_RAY_OFFSET: f32 = 0.31;
    /// Jump ray length
    pub const JUMP_RAY_MAX_DISTANCE: f32 = 10.0;

    /// Largest course a config may request
    pub const MAX_OBSTACLE_COUNT: usize = 10_000;
}

/// Quaternion for a rotation of `theta` radians about the vertical axis
#[inline]
pub fn yaw_rotation(theta: f32) -> Quat {
    Quat::from_rotation_y(theta)
}
