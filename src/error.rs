//! Error types for course construction and configuration.

use thiserror::Error;

use crate::sim::ObstacleType;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("obstacle type set is empty")]
    EmptyObstacleSet,

    #[error("{0:?} is a course marker, not an obstacle archetype")]
    NonObstacleType(ObstacleType),

    #[error("obstacle count {count} exceeds the maximum of {max}")]
    ObstacleCountTooLarge { count: usize, max: usize },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CourseError>;
