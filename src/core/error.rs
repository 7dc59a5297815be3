use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganismError {
    #[error("Insufficient energy for {action:?}: required {required:.2}, available {available:.2}")]
    InsufficientEnergy {
        action: crate::perception::Action,
        required: f64,
        available: f64,
    },

    #[error("Goal not found: {0}")]
    GoalNotFound(crate::core::types::GoalId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, OrganismError>;
