//! Rigid-body collaborator interface
//!
//! The simulation never integrates forces itself. It pushes kinematic poses
//! for obstacles, impulses for the player, and reads back ray hits. Any
//! physics engine can sit behind [`PhysicsWorld`].

use glam::{Quat, Vec3};

use crate::sim::{CourseBounds, ObstacleArena};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn point_at(&self, toi: f32) -> Vec3 {
        self.origin + self.dir * toi
    }
}

/// First hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the hit
    pub time_of_impact: f32,
}

/// Operations the match needs from the physics engine.
///
/// Player operations act on the single player body. Obstacle bodies are
/// addressed by the index of their course segment.
pub trait PhysicsWorld {
    /// Replace all course bodies with the given corridor and obstacles
    fn load_course(&mut self, bounds: &CourseBounds, obstacles: &ObstacleArena);

    fn set_next_kinematic_translation(&mut self, segment: usize, position: Vec3);
    fn set_next_kinematic_rotation(&mut self, segment: usize, rotation: Quat);

    fn apply_impulse(&mut self, impulse: Vec3);
    fn apply_torque_impulse(&mut self, torque: Vec3);
    fn set_translation(&mut self, position: Vec3);
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Closest hit within `max_toi`, excluding the player body
    fn cast_ray(&self, ray: Ray, max_toi: f32, solid: bool) -> Option<RayHit>;
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsCall {
    LoadCourse { obstacles: usize },
    KinematicTranslation { segment: usize, position: Vec3 },
    KinematicRotation { segment: usize, rotation: Quat },
    Impulse(Vec3),
    TorqueImpulse(Vec3),
    Translation(Vec3),
    LinearVelocity(Vec3),
    AngularVelocity(Vec3),
}

/// Physics double that records every call and answers rays with a flat floor.
///
/// Used by tests and the headless runner.
#[derive(Debug, Clone)]
pub struct RecordingPhysics {
    pub calls: Vec<PhysicsCall>,
    /// Height of the floor answered by `cast_ray`; None = nothing below
    pub floor_y: Option<f32>,
}

impl Default for RecordingPhysics {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            floor_y: Some(0.0),
        }
    }
}

impl RecordingPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the calls recorded so far
    pub fn drain(&mut self) -> Vec<PhysicsCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded player resets (a reset is a spawn teleport)
    pub fn reset_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PhysicsCall::Translation(_)))
            .count()
    }
}

impl PhysicsWorld for RecordingPhysics {
    fn load_course(&mut self, _bounds: &CourseBounds, obstacles: &ObstacleArena) {
        self.calls.push(PhysicsCall::LoadCourse {
            obstacles: obstacles.len(),
        });
    }

    fn set_next_kinematic_translation(&mut self, segment: usize, position: Vec3) {
        self.calls
            .push(PhysicsCall::KinematicTranslation { segment, position });
    }

    fn set_next_kinematic_rotation(&mut self, segment: usize, rotation: Quat) {
        self.calls
            .push(PhysicsCall::KinematicRotation { segment, rotation });
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.calls.push(PhysicsCall::Impulse(impulse));
    }

    fn apply_torque_impulse(&mut self, torque: Vec3) {
        self.calls.push(PhysicsCall::TorqueImpulse(torque));
    }

    fn set_translation(&mut self, position: Vec3) {
        self.calls.push(PhysicsCall::Translation(position));
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.calls.push(PhysicsCall::LinearVelocity(velocity));
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.calls.push(PhysicsCall::AngularVelocity(velocity));
    }

    fn cast_ray(&self, ray: Ray, max_toi: f32, _solid: bool) -> Option<RayHit> {
        let floor_y = self.floor_y?;
        // Only straight-down rays are answered
        if ray.dir.y >= 0.0 || ray.origin.y < floor_y {
            return None;
        }
        let toi = (ray.origin.y - floor_y) / -ray.dir.y;
        (toi <= max_toi).then_some(RayHit {
            time_of_impact: toi,
        })
    }
}
