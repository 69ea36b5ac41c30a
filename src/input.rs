//! Player input
//!
//! Keyboard state arrives once per frame as a [`Controls`] snapshot. Start and
//! restart requests from the UI are queued and applied at the next tick
//! boundary, never mid-tick.

use glam::Vec3;

use crate::settings::ControlTuning;

/// Held-key snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    /// Any key that signals the player wants to move
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.jump
    }
}

/// Match control requested from outside the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Start,
    Restart,
}

/// Pending control requests. Drained at the start of every tick.
#[derive(Debug, Clone, Default)]
pub struct ControlQueue {
    requests: Vec<ControlRequest>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            requests: Vec::with_capacity(4),
        }
    }

    pub fn push(&mut self, request: ControlRequest) {
        self.requests.push(request);
    }

    /// Drain all pending requests in arrival order
    pub fn drain(&mut self) -> Vec<ControlRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

/// Impulse and torque impulse applied to the player for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerForces {
    pub impulse: Vec3,
    pub torque: Vec3,
}

impl PlayerForces {
    pub fn is_zero(&self) -> bool {
        self.impulse == Vec3::ZERO && self.torque == Vec3::ZERO
    }
}

/// Convert held keys into frame-rate independent forces.
///
/// The torque axis is perpendicular to the push so the sphere rolls the way
/// it is pushed.
pub fn player_forces(controls: &Controls, delta: f32, tuning: &ControlTuning) -> PlayerForces {
    let impulse_strength = tuning.impulse_strength * delta;
    let torque_strength = tuning.torque_strength * delta;

    let mut forces = PlayerForces::default();

    if controls.forward {
        forces.impulse.z -= impulse_strength;
        forces.torque.x -= torque_strength;
    }
    if controls.right {
        forces.impulse.x += impulse_strength;
        forces.torque.z -= torque_strength;
    }
    if controls.backward {
        forces.impulse.z += impulse_strength;
        forces.torque.x += torque_strength;
    }
    if controls.left {
        forces.impulse.x -= impulse_strength;
        forces.torque.z += torque_strength;
    }

    forces
}
