use thiserror::Error;

use crate::core::types::{AgentId, AmmoId};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("agent not found: {0:?}")]
    AgentNotFound(AgentId),

    #[error("claim invariant violated: pickup {pickup:?} consumed by agent {consumer:?} while claimed by agent {holder:?}")]
    ClaimInvariant {
        pickup: AmmoId,
        consumer: AgentId,
        holder: AgentId,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config file error: {0}")]
    ConfigFileError(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
