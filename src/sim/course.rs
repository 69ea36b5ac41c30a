//! Course generation
//!
//! A course is a straight run of square segments laid out along -Z:
//! a Start pad, `count` randomly drawn obstacles, and an End pad with the
//! goal. The draw is fully determined by the seed, so the same
//! `(count, types, seed)` always rebuilds the same course.

use std::f64::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::{Seed, SeedRng};
use crate::consts::*;
use crate::error::{CourseError, Result};

/// Segment archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleType {
    /// Bar rotating about the vertical axis
    Spinner,
    /// Bar bobbing up and down
    Vertical,
    /// Blade swinging side to side
    Axe,
    /// Spawn pad (never drawn)
    Start,
    /// Goal pad (never drawn)
    End,
}

impl ObstacleType {
    /// Every archetype that can be drawn into a course
    pub const ARCHETYPES: [ObstacleType; 3] =
        [ObstacleType::Spinner, ObstacleType::Vertical, ObstacleType::Axe];

    /// Returns true for moving obstacles, false for the Start/End markers
    pub fn is_archetype(self) -> bool {
        !matches!(self, ObstacleType::Start | ObstacleType::End)
    }

    /// Collider half-extents of the moving body (None for Start/End)
    pub fn body_half_extents(self) -> Option<Vec3> {
        match self {
            ObstacleType::Spinner | ObstacleType::Vertical => Some(BAR_HALF_EXTENTS),
            ObstacleType::Axe => Some(AXE_HALF_EXTENTS),
            ObstacleType::Start | ObstacleType::End => None,
        }
    }
}

/// One unit of course layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: ObstacleType,
    /// Segment origin (floor center)
    pub position: Vec3,
    /// Time offset (radians) drawn once to desynchronize identical obstacles
    pub phase_offset: f64,
}

/// Immutable sequence of segments: Start, `count` obstacles, End
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLayout {
    seed: Seed,
    segments: Vec<Segment>,
}

impl CourseLayout {
    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total segment count (`obstacle_count + 2`)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A layout always holds at least Start and End
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of drawn obstacles between Start and End
    pub fn obstacle_count(&self) -> usize {
        self.segments.len() - 2
    }

    /// Segment origin for index `i`
    pub fn segment_position(index: usize) -> Vec3 {
        Vec3::new(0.0, 0.0, -(index as f32) * SEGMENT_SPACING)
    }

    /// Z coordinate the player must pass below to finish
    pub fn goal_z(&self) -> f32 {
        goal_z(self.obstacle_count())
    }

    /// Static corridor colliders for this layout
    pub fn bounds(&self) -> CourseBounds {
        CourseBounds::new(self.len())
    }
}

/// Goal plane for a course of `count` obstacles
pub fn goal_z(count: usize) -> f32 {
    -(count as f32 * SEGMENT_SPACING + GOAL_MARGIN)
}

/// Check that a set of obstacle types can be drawn from
pub fn validate_types(types: &[ObstacleType]) -> Result<()> {
    if types.is_empty() {
        return Err(CourseError::EmptyObstacleSet);
    }
    if let Some(&marker) = types.iter().find(|t| !t.is_archetype()) {
        return Err(CourseError::NonObstacleType(marker));
    }
    Ok(())
}

/// Check an obstacle count against the supported maximum
pub fn validate_count(count: usize) -> Result<()> {
    if count > MAX_OBSTACLE_COUNT {
        return Err(CourseError::ObstacleCountTooLarge {
            count,
            max: MAX_OBSTACLE_COUNT,
        });
    }
    Ok(())
}

/// Generate a layout from a fresh stream seeded with `seed`
pub fn generate(count: usize, types: &[ObstacleType], seed: Seed) -> Result<CourseLayout> {
    let mut rng = SeedRng::new(seed);
    generate_with(count, types, &mut rng)
}

/// Generate a layout, drawing from an existing stream.
///
/// Per obstacle the stream is advanced twice: type index, then phase offset.
/// Callers that instantiate obstacles afterwards keep drawing from the same
/// stream, so the whole course stays a function of the seed.
pub fn generate_with(
    count: usize,
    types: &[ObstacleType],
    rng: &mut SeedRng,
) -> Result<CourseLayout> {
    validate_types(types)?;
    validate_count(count)?;

    let mut segments = Vec::with_capacity(count + 2);
    segments.push(Segment {
        kind: ObstacleType::Start,
        position: CourseLayout::segment_position(0),
        phase_offset: 0.0,
    });

    for i in 0..count {
        let kind = types[rng.draw_index(types.len())];
        let phase_offset = rng.draw() * TAU;
        segments.push(Segment {
            kind,
            position: CourseLayout::segment_position(i + 1),
            phase_offset,
        });
    }

    segments.push(Segment {
        kind: ObstacleType::End,
        position: CourseLayout::segment_position(count + 1),
        phase_offset: 0.0,
    });

    log::info!("Course generated: seed={}, obstacles={}", rng.seed(), count);

    Ok(CourseLayout {
        seed: rng.seed(),
        segments,
    })
}

/// A static box collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub restitution: f32,
    pub friction: f32,
}

/// Walled corridor enclosing the whole course
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseBounds {
    pub right_wall: WallVolume,
    pub left_wall: WallVolume,
    pub end_wall: WallVolume,
    pub floor: WallVolume,
}

impl CourseBounds {
    /// Corridor for `segment_count` segments (`obstacle_count + 2`)
    pub fn new(segment_count: usize) -> Self {
        let length = segment_count as f32 * SEGMENT_SPACING;
        // Segment 0 is centered on z=0, so the corridor starts half a segment ahead
        let mid_z = -(length / 2.0) + SEGMENT_SPACING / 2.0;
        let end_z = -length + SEGMENT_SPACING / 2.0;

        let side_half = Vec3::new(WALL_THICKNESS / 2.0, WALL_HEIGHT / 2.0, length / 2.0);
        let side = |x: f32| WallVolume {
            center: Vec3::new(x, WALL_CENTER_Y, mid_z),
            half_extents: side_half,
            restitution: BODY_RESTITUTION,
            friction: 0.0,
        };

        Self {
            right_wall: side(WALL_OFFSET_X),
            left_wall: side(-WALL_OFFSET_X),
            end_wall: WallVolume {
                center: Vec3::new(0.0, WALL_CENTER_Y, end_z),
                half_extents: Vec3::new(
                    END_WALL_WIDTH / 2.0,
                    WALL_HEIGHT / 2.0,
                    WALL_THICKNESS / 2.0,
                ),
                restitution: BODY_RESTITUTION,
                friction: 0.0,
            },
            floor: WallVolume {
                center: Vec3::new(0.0, -FLOOR_THICKNESS / 2.0, mid_z),
                half_extents: Vec3::new(
                    SEGMENT_WIDTH / 2.0,
                    FLOOR_THICKNESS / 2.0,
                    length / 2.0,
                ),
                restitution: BODY_RESTITUTION,
                friction: FLOOR_FRICTION,
            },
        }
    }

    /// All four volumes, walls first
    pub fn volumes(&self) -> [WallVolume; 4] {
        [self.right_wall, self.left_wall, self.end_wall, self.floor]
    }
}
