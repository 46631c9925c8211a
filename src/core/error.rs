use thiserror::Error;

use crate::core::types::EntityId;
use crate::tactics::vertex::Coordinate;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Coordinate out of bounds: {0:?}")]
    OutOfBounds(Coordinate),

    #[error("Entity not found: {0:?}")]
    UnknownEntity(EntityId),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
