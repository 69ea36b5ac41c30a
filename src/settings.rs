//! Game settings
//!
//! Course size, obstacle mix and control tuning. Loaded from JSON; every
//! field has a default so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CourseError, Result};
use crate::sim::course::{validate_count, validate_types};
use crate::sim::{ObstacleType, Seed};

/// Player force tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlTuning {
    /// Impulse per second of held key
    pub impulse_strength: f32,
    /// Torque impulse per second of held key
    pub torque_strength: f32,
    /// Upward impulse of a jump
    pub jump_impulse: f32,
    /// A jump is only allowed when the ground is closer than this
    pub jump_ray_tolerance: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            impulse_strength: 0.6,
            torque_strength: 0.2,
            jump_impulse: 0.5,
            jump_ray_tolerance: 0.15,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacles between Start and End
    pub obstacle_count: usize,
    /// Archetypes the course draws from (uniformly, duplicates weight the draw)
    pub obstacle_types: Vec<ObstacleType>,
    /// Seed of the first course; later restarts always draw a fresh seed
    pub seed: Option<Seed>,
    /// Longest frame delta fed to the force model (seconds)
    pub max_frame_delta: f64,
    pub controls: ControlTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            obstacle_count: 20,
            obstacle_types: ObstacleType::ARCHETYPES.to_vec(),
            seed: None,
            max_frame_delta: 0.1,
            controls: ControlTuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot build a course
    pub fn validate(&self) -> Result<()> {
        validate_types(&self.obstacle_types)?;
        validate_count(self.obstacle_count)?;

        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(CourseError::InvalidSetting(format!(
                "max_frame_delta must be positive, got {}",
                self.max_frame_delta
            )));
        }

        let c = &self.controls;
        let tuning = [
            ("impulse_strength", c.impulse_strength),
            ("torque_strength", c.torque_strength),
            ("jump_impulse", c.jump_impulse),
            ("jump_ray_tolerance", c.jump_ray_tolerance),
        ];
        if let Some((name, value)) = tuning.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(CourseError::InvalidSetting(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.obstacle_count, 20);
        assert_eq!(settings.obstacle_types.len(), 3);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "obstacle_count": 5, "seed": 42 }"#).unwrap();
        assert_eq!(settings.obstacle_count, 5);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.controls, ControlTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.obstacle_types = vec![ObstacleType::Axe];
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = Settings::from_json(r#"{ "obstacle_count": -1 }"#).unwrap_err();
        assert!(matches!(err, CourseError::Json(_)));
    }

    #[test]
    fn test_empty_types_rejected() {
        let err = Settings::from_json(r#"{ "obstacle_types": [] }"#).unwrap_err();
        assert!(matches!(err, CourseError::EmptyObstacleSet));
    }

    #[test]
    fn test_marker_type_rejected() {
        let err = Settings::from_json(r#"{ "obstacle_types": ["Spinner", "Start"] }"#).unwrap_err();
        assert!(matches!(err, CourseError::NonObstacleType(ObstacleType::Start)));
    }

    #[test]
    fn test_bad_tuning_rejected() {
        let mut settings = Settings::default();
        settings.controls.impulse_strength = -1.0;
        assert!(matches!(settings.validate(), Err(CourseError::InvalidSetting(_))));

        let mut settings = Settings::default();
        settings.max_frame_delta = 0.0;
        assert!(matches!(settings.validate(), Err(CourseError::InvalidSetting(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/course-run.json").unwrap_err();
        assert!(matches!(err, CourseError::Io(_)));
    }
}
