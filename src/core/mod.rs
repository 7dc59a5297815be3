pub mod config;
pub mod error;
pub mod types;

pub use config::{OrganismConfig, WorldConfig};
pub use error::{OrganismError, Result};
pub use types::{AgentId, GoalId, Tick};
