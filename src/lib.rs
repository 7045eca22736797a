//! Dominion - multi-agent decision engine for a turn-based domination game
//!
//! Agents contend for ammo pickups and domination points, choosing one
//! action per tick from a configurable priority order. Reactive agents
//! decide from local percepts alone; proactive agents coordinate through a
//! shared blackboard of claims and sightings.

pub mod actions;
pub mod blackboard;
pub mod core;
pub mod policy;
pub mod simulation;
pub mod world;

pub use crate::actions::catalog::ActionId;
pub use crate::blackboard::Blackboard;
pub use crate::core::config::{MatchConfig, PolicyKind, PriorityOrder};
pub use crate::core::error::{EngineError, Result};
pub use crate::core::types::{AgentId, AmmoId, GridPos, PointId, Team, Tick};
pub use crate::simulation::stats::{MatchOutcome, MatchReport};
pub use crate::simulation::tick::Match;
pub use crate::world::{FieldSpec, World};
