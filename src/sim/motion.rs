//! Obstacle motion
//!
//! Every moving obstacle is a pure function of simulation time. Per-instance
//! constants (spinner speed, phase offset) are fixed when the obstacle is
//! instantiated from its course segment and never change afterwards, so
//! sampling the same `t` twice yields the same pose.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::course::{CourseLayout, ObstacleType, Segment};
use super::rng::SeedRng;
use crate::consts::*;
use crate::yaw_rotation;

/// Pose pushed to a kinematic body for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KinematicPose {
    /// Orientation update, position unchanged
    Rotation(Quat),
    /// Position update, orientation unchanged
    Translation(Vec3),
}

/// Time-parameterized motion of one obstacle archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// theta(t) = t * speed about +Y
    Spinner { speed: f64 },
    /// y(t) = base.y + sin(t + phase) + 1.15
    Vertical { phase_offset: f64 },
    /// x(t) = base.x + sin(t + phase) * 1.25, y = base.y + 0.75
    Axe { phase_offset: f64 },
}

impl Motion {
    /// Draw the per-instance constants for a segment.
    ///
    /// Only spinners consume the stream here (magnitude, then direction);
    /// the oscillators reuse the segment's phase offset.
    pub fn for_segment(segment: &Segment, rng: &mut SeedRng) -> Option<Self> {
        match segment.kind {
            ObstacleType::Spinner => {
                let magnitude = rng.draw() + SPINNER_MIN_SPEED;
                let direction = if rng.draw() < 0.5 { -1.0 } else { 1.0 };
                Some(Motion::Spinner {
                    speed: magnitude * direction,
                })
            }
            ObstacleType::Vertical => Some(Motion::Vertical {
                phase_offset: segment.phase_offset,
            }),
            ObstacleType::Axe => Some(Motion::Axe {
                phase_offset: segment.phase_offset,
            }),
            ObstacleType::Start | ObstacleType::End => None,
        }
    }

    /// Pose at time `t` (seconds) for an obstacle anchored at `base`.
    ///
    /// Total over finite `t`; callers filter non-finite clock values.
    pub fn sample(&self, base: Vec3, t: f64) -> KinematicPose {
        match *self {
            Motion::Spinner { speed } => KinematicPose::Rotation(yaw_rotation((t * speed) as f32)),
            Motion::Vertical { phase_offset } => {
                let y = (t + phase_offset).sin() as f32 + VERTICAL_LIFT;
                KinematicPose::Translation(Vec3::new(base.x, base.y + y, base.z))
            }
            Motion::Axe { phase_offset } => {
                let x = (t + phase_offset).sin() as f32 * AXE_AMPLITUDE;
                KinematicPose::Translation(Vec3::new(base.x + x, base.y + AXE_HEIGHT, base.z))
            }
        }
    }
}

/// A moving obstacle instantiated from one course segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Index of the owning segment in the layout
    pub segment: usize,
    pub kind: ObstacleType,
    /// Segment origin
    pub base: Vec3,
    pub motion: Motion,
}

impl Obstacle {
    /// Where the body is created before its first kinematic update
    pub fn rest_position(&self) -> Vec3 {
        self.base + OBSTACLE_BODY_OFFSET
    }

    /// Collider half-extents for the moving body
    pub fn half_extents(&self) -> Vec3 {
        self.kind.body_half_extents().unwrap_or(Vec3::ZERO)
    }

    pub fn pose_at(&self, t: f64) -> KinematicPose {
        self.motion.sample(self.base, t)
    }
}

/// Obstacle instances for one course, indexed by course position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleArena {
    obstacles: Vec<Obstacle>,
}

impl ObstacleArena {
    /// Instantiate every moving obstacle in the layout, in segment order
    pub fn instantiate(layout: &CourseLayout, rng: &mut SeedRng) -> Self {
        let obstacles = layout
            .segments()
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| {
                Motion::for_segment(segment, rng).map(|motion| Obstacle {
                    segment: index,
                    kind: segment.kind,
                    base: segment.position,
                    motion,
                })
            })
            .collect();
        Self { obstacles }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Obstacle hosted by a given segment, if any
    pub fn by_segment(&self, segment: usize) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.segment == segment)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Sample every obstacle at time `t`
    pub fn poses_at(&self, t: f64) -> impl Iterator<Item = (&Obstacle, KinematicPose)> + '_ {
        self.obstacles.iter().map(move |o| (o, o.pose_at(t)))
    }
}
