//! Course Run headless entry point
//!
//! Runs one match against a simple point-mass stand-in for the physics
//! engine, with an autopilot holding "forward", and prints the HUD.
//!
//! Usage: `course-run [settings.json] [seconds]`

use glam::{Quat, Vec3};

use course_run::consts::*;
use course_run::input::Controls;
use course_run::physics::{PhysicsWorld, Ray, RayHit};
use course_run::sim::{CourseBounds, FrameInput, FrameTime, Match, MatchPhase, ObstacleArena};
use course_run::{Result, Settings};

const FRAME_DT: f64 = 1.0 / 60.0;
const GRAVITY: f32 = -9.81;
const PLAYER_MASS: f32 = 0.15;
const LINEAR_DAMPING: f32 = 0.5;

/// Point-mass player on a flat corridor floor. Obstacles are not collided.
struct PointMass {
    position: Vec3,
    velocity: Vec3,
    /// Floor extent along -Z
    floor_end_z: f32,
}

impl PointMass {
    fn new() -> Self {
        Self {
            position: SPAWN_POINT,
            velocity: Vec3::ZERO,
            floor_end_z: 0.0,
        }
    }

    fn over_floor(&self, p: Vec3) -> bool {
        p.x.abs() <= SEGMENT_WIDTH / 2.0
            && p.z <= SEGMENT_SPACING / 2.0
            && p.z >= self.floor_end_z
    }

    fn step(&mut self, dt: f32) {
        self.velocity.y += GRAVITY * dt;
        self.velocity *= 1.0 / (1.0 + LINEAR_DAMPING * dt);
        self.position += self.velocity * dt;

        if self.over_floor(self.position) && self.position.y < PLAYER_RADIUS && self.velocity.y < 0.0 {
            self.position.y = PLAYER_RADIUS;
            self.velocity.y = 0.0;
        }
    }
}

impl PhysicsWorld for PointMass {
    fn load_course(&mut self, bounds: &CourseBounds, obstacles: &ObstacleArena) {
        self.floor_end_z = bounds.floor.center.z - bounds.floor.half_extents.z;
        log::debug!("Loaded corridor to z={} with {} obstacles", self.floor_end_z, obstacles.len());
    }

    fn set_next_kinematic_translation(&mut self, _segment: usize, _position: Vec3) {}

    fn set_next_kinematic_rotation(&mut self, _segment: usize, _rotation: Quat) {}

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / PLAYER_MASS;
    }

    fn apply_torque_impulse(&mut self, _torque: Vec3) {}

    fn set_translation(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, _velocity: Vec3) {}

    fn cast_ray(&self, ray: Ray, max_toi: f32, _solid: bool) -> Option<RayHit> {
        if ray.dir.y >= 0.0 || !self.over_floor(ray.origin) || ray.origin.y < 0.0 {
            return None;
        }
        let toi = ray.origin.y / -ray.dir.y;
        (toi <= max_toi).then_some(RayHit { time_of_impact: toi })
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seconds: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);

    let mut physics = PointMass::new();
    let mut game = Match::new(settings, &mut physics)?;
    log::info!(
        "Course seed {} with {} obstacles",
        game.course_layout().seed(),
        game.course_layout().obstacle_count()
    );

    let autopilot = Controls {
        forward: true,
        ..Default::default()
    };

    let frames = (seconds / FRAME_DT) as u64;
    let mut last_phase = game.current_phase();
    for frame in 1..=frames {
        let clock = FrameTime::new(frame as f64 * FRAME_DT, FRAME_DT);
        let input = FrameInput {
            player_position: physics.position,
            controls: autopilot,
        };
        game.tick(&clock, &input, &mut physics);
        physics.step(FRAME_DT as f32);

        let phase = game.current_phase();
        if phase != last_phase {
            log::info!("{} -> {} at frame {}", last_phase.as_str(), phase.as_str(), frame);
            last_phase = phase;
        }
        if phase == MatchPhase::Ended {
            break;
        }
    }

    let hud = game.hud();
    println!("{}", serde_json::to_string_pretty(&hud)?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Course Run (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
