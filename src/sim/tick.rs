//! Per-frame match driver
//!
//! One call to [`Match::tick`] per simulation frame:
//! 1. apply queued start/restart requests (tick boundary)
//! 2. push obstacle poses for the current time
//! 3. check the goal plane and the fall limit against the player sample
//! 4. turn key presses into start, forces and jumps
//!
//! Restarting regenerates the course and respawns the player before `tick`
//! returns, so the next motion pass always sees the new course.

use glam::Vec3;

use super::course::{self, CourseBounds, CourseLayout};
use super::motion::{KinematicPose, ObstacleArena};
use super::phase::{MatchPhase, PhaseMachine, TransitionResult};
use super::rng::{Seed, SeedRng, fresh_seed};
use crate::consts::*;
use crate::error::Result;
use crate::hud::HudSnapshot;
use crate::input::{ControlQueue, ControlRequest, Controls, player_forces};
use crate::physics::{PhysicsWorld, Ray};
use crate::settings::Settings;

/// Frame clock supplied by the host loop
pub trait FrameClock {
    /// Seconds since simulation start (monotonic)
    fn elapsed_time(&self) -> f64;
    /// Seconds since the previous tick
    fn delta(&self) -> f64;
}

/// Plain clock reading for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f64,
    pub delta: f64,
}

impl FrameTime {
    pub fn new(elapsed: f64, delta: f64) -> Self {
        Self { elapsed, delta }
    }
}

impl FrameClock for FrameTime {
    fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    fn delta(&self) -> f64 {
        self.delta
    }
}

/// Per-frame samples from the host
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Player body translation read from physics this frame
    pub player_position: Vec3,
    /// Held keys
    pub controls: Controls,
}

/// Phase transitions the driver can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    End,
    Restart,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// A transition was invoked, applied or not
    Transition {
        transition: Transition,
        result: TransitionResult,
    },
    /// A new course replaced the old one
    CourseRegenerated { seed: Seed },
    /// Player teleported to spawn with zero velocity
    PlayerReset,
    /// Jump impulse applied
    Jumped,
    /// Player sample was not finite; goal/fall checks skipped
    SampleRejected,
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<MatchEvent>,
}

impl TickReport {
    /// Result of the first invocation of `transition` this tick
    pub fn transition(&self, transition: Transition) -> Option<TransitionResult> {
        self.events.iter().find_map(|e| match *e {
            MatchEvent::Transition {
                transition: t,
                result,
            } if t == transition => Some(result),
            _ => None,
        })
    }

    /// True when `transition` was invoked and applied this tick
    pub fn applied(&self, transition: Transition) -> bool {
        self.transition(transition)
            .is_some_and(|r| r.is_applied())
    }

    pub fn contains(&self, event: MatchEvent) -> bool {
        self.events.contains(&event)
    }

    fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}

/// Where restart seeds come from
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// Fresh thread-RNG seed per restart
    Entropy,
    /// Seeds drawn from a seeded stream (reproducible sessions)
    Stream(SeedRng),
}

impl SeedSource {
    fn next_seed(&mut self) -> Seed {
        match self {
            SeedSource::Entropy => fresh_seed(),
            SeedSource::Stream(rng) => rng.next_seed(),
        }
    }
}

/// One generated course: layout, obstacle instances and corridor
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub layout: CourseLayout,
    pub obstacles: ObstacleArena,
    pub bounds: CourseBounds,
}

impl Course {
    /// Build the full course from a seed. Obstacle constants are drawn from
    /// the same stream right after the layout.
    pub fn build(settings: &Settings, seed: Seed) -> Result<Self> {
        let mut rng = SeedRng::new(seed);
        let layout =
            course::generate_with(settings.obstacle_count, &settings.obstacle_types, &mut rng)?;
        let obstacles = ObstacleArena::instantiate(&layout, &mut rng);
        let bounds = layout.bounds();
        Ok(Self {
            layout,
            obstacles,
            bounds,
        })
    }
}

/// Match orchestrator. Owns the phase machine and the current course.
#[derive(Debug)]
pub struct Match {
    settings: Settings,
    phase: PhaseMachine,
    course: Course,
    seeds: SeedSource,
    requests: ControlQueue,
    prev_controls: Controls,
    /// Last finite clock reading
    now: f64,
    /// Courses generated this session
    generation: u32,
}

impl Match {
    /// Create a match with entropy-seeded restarts
    pub fn new(settings: Settings, physics: &mut impl PhysicsWorld) -> Result<Self> {
        Self::with_seed_source(settings, SeedSource::Entropy, physics)
    }

    /// Create a match with an explicit restart seed source.
    ///
    /// The first course uses `settings.seed` when set, otherwise the source.
    pub fn with_seed_source(
        settings: Settings,
        mut seeds: SeedSource,
        physics: &mut impl PhysicsWorld,
    ) -> Result<Self> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| seeds.next_seed());
        let course = Course::build(&settings, seed)?;

        let game = Self {
            settings,
            phase: PhaseMachine::new(),
            course,
            seeds,
            requests: ControlQueue::new(),
            prev_controls: Controls::default(),
            now: 0.0,
            generation: 1,
        };
        physics.load_course(&game.course.bounds, &game.course.obstacles);
        game.reset_player(physics);
        Ok(game)
    }

    // --- Presentation ---

    pub fn current_phase(&self) -> MatchPhase {
        self.phase.phase()
    }

    pub fn phase_machine(&self) -> &PhaseMachine {
        &self.phase
    }

    /// Timer seconds as of the last tick
    pub fn display_elapsed(&self) -> f64 {
        self.phase.elapsed(self.now)
    }

    pub fn course_layout(&self) -> &CourseLayout {
        &self.course.layout
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Courses generated this session, including the first
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::new(
            self.current_phase(),
            self.display_elapsed(),
            self.course.layout.seed(),
        )
    }

    // --- Control ---

    /// Queue a start; applied at the next tick boundary
    pub fn request_start(&mut self) {
        self.requests.push(ControlRequest::Start);
    }

    /// Queue a restart; applied at the next tick boundary
    pub fn request_restart(&mut self) {
        self.requests.push(ControlRequest::Restart);
    }

    // --- Tick ---

    /// Advance the match by one frame
    pub fn tick(
        &mut self,
        clock: &impl FrameClock,
        input: &FrameInput,
        physics: &mut impl PhysicsWorld,
    ) -> TickReport {
        let mut report = TickReport::default();

        let t = clock.elapsed_time();
        if t.is_finite() {
            self.now = t;
        } else {
            log::warn!("Non-finite clock time {t}; holding {:.3}s", self.now);
        }
        let delta = clock.delta();
        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.settings.max_frame_delta)
        } else {
            0.0
        };

        // Requests made since the last tick
        let mut reset = false;
        for request in self.requests.drain() {
            match request {
                ControlRequest::Start => {
                    self.invoke_start(&mut report);
                }
                ControlRequest::Restart => {
                    reset |= self.invoke_restart(physics, &mut report);
                }
            }
        }

        self.push_obstacle_poses(physics);

        // Goal/fall checks skip a sample taken before this tick's respawn
        let player = input.player_position;
        let sample_ok = player.is_finite();
        if !sample_ok {
            log::warn!("Dropping non-finite player sample {player:?}");
            report.push(MatchEvent::SampleRejected);
        } else if !reset {
            if player.z < self.course.layout.goal_z() {
                let result = self.phase.end(self.now);
                report.push(MatchEvent::Transition {
                    transition: Transition::End,
                    result,
                });
            }
            if player.y < FALL_LIMIT_Y {
                if self.invoke_restart(physics, &mut report) {
                    reset = true;
                } else if self.current_phase() == MatchPhase::Ready {
                    // Already Ready: respawn on the same course
                    self.reset_player(physics);
                    report.push(MatchEvent::PlayerReset);
                    reset = true;
                }
            }
        }

        let controls = input.controls;
        let pressed = newly_pressed(&self.prev_controls, &controls);
        self.prev_controls = controls;

        // Held keys count as intent; the respawn tick itself stays Ready
        if !reset && controls.any_pressed() && self.current_phase() == MatchPhase::Ready {
            self.invoke_start(&mut report);
        }

        // Forces only while the clock runs; a respawned body keeps zero
        // velocity until the next frame
        if !reset && self.current_phase() == MatchPhase::Playing {
            let forces = player_forces(&controls, delta as f32, &self.settings.controls);
            if !forces.is_zero() {
                physics.apply_impulse(forces.impulse);
                physics.apply_torque_impulse(forces.torque);
            }
            if pressed.jump && sample_ok && self.try_jump(player, physics) {
                report.push(MatchEvent::Jumped);
            }
        }

        report
    }

    fn push_obstacle_poses(&self, physics: &mut impl PhysicsWorld) {
        for (obstacle, pose) in self.course.obstacles.poses_at(self.now) {
            match pose {
                KinematicPose::Rotation(rotation) => {
                    physics.set_next_kinematic_rotation(obstacle.segment, rotation)
                }
                KinematicPose::Translation(position) => {
                    physics.set_next_kinematic_translation(obstacle.segment, position)
                }
            }
        }
    }

    fn invoke_start(&mut self, report: &mut TickReport) {
        let result = self.phase.start(self.now);
        report.push(MatchEvent::Transition {
            transition: Transition::Start,
            result,
        });
    }

    /// Restart the phase machine; on success regenerate and respawn
    fn invoke_restart(&mut self, physics: &mut impl PhysicsWorld, report: &mut TickReport) -> bool {
        let result = self.phase.restart();
        report.push(MatchEvent::Transition {
            transition: Transition::Restart,
            result,
        });
        if !result.is_applied() {
            return false;
        }

        if let Some(seed) = self.regenerate() {
            physics.load_course(&self.course.bounds, &self.course.obstacles);
            report.push(MatchEvent::CourseRegenerated { seed });
        }

        self.reset_player(physics);
        report.push(MatchEvent::PlayerReset);
        true
    }

    /// Replace the course with one built from a fresh seed.
    /// Returns None and keeps the old course if the build fails.
    fn regenerate(&mut self) -> Option<Seed> {
        let seed = self.seeds.next_seed();
        match Course::build(&self.settings, seed) {
            Ok(course) => {
                self.course = course;
                self.generation += 1;
                Some(seed)
            }
            Err(e) => {
                log::error!("Course regeneration failed: {e}");
                None
            }
        }
    }

    fn reset_player(&self, physics: &mut impl PhysicsWorld) {
        physics.set_translation(SPAWN_POINT);
        physics.set_linear_velocity(Vec3::ZERO);
        physics.set_angular_velocity(Vec3::ZERO);
    }

    /// Jump only when the ground is right below the sphere
    fn try_jump(&self, player: Vec3, physics: &mut impl PhysicsWorld) -> bool {
        let origin = player - Vec3::new(0.0, JUMP_RAY_OFFSET, 0.0);
        let ray = Ray::new(origin, Vec3::NEG_Y);
        let tuning = &self.settings.controls;
        match physics.cast_ray(ray, JUMP_RAY_MAX_DISTANCE, true) {
            Some(hit) if hit.time_of_impact < tuning.jump_ray_tolerance => {
                physics.apply_impulse(Vec3::new(0.0, tuning.jump_impulse, 0.0));
                true
            }
            _ => false,
        }
    }
}

/// Keys held now that were not held last frame
fn newly_pressed(prev: &Controls, now: &Controls) -> Controls {
    Controls {
        forward: now.forward && !prev.forward,
        backward: now.backward && !prev.backward,
        left: now.left && !prev.left,
        right: now.right && !prev.right,
        jump: now.jump && !prev.jump,
    }
}
