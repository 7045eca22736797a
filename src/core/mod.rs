pub mod config;
pub mod error;
pub mod types;

pub use config::{MatchConfig, PolicyKind, PriorityOrder};
pub use error::{EngineError, Result};
