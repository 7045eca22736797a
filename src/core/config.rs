//! Match configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. Everything is validated up front:
//! a bad configuration is a construction error, never a runtime fault.

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActionId;
use crate::core::error::{EngineError, Result};
use crate::core::types::Tick;

/// Which decision policy an agent runs
///
/// Fixed at agent creation. Reactive agents decide from their own percept
/// only; proactive agents additionally negotiate claims and share sightings
/// through the match blackboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    Reactive,
    Proactive,
}

/// Ordered action priorities, evaluated first-applicable-wins
///
/// The order is data, not code: comparative experiments swap orderings
/// without touching the evaluator. Must be a permutation of the five real
/// actions (Idle is the implicit fallback and may not appear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOrder(pub Vec<ActionId>);

impl Default for PriorityOrder {
    /// The empirically best-performing order: survival and combat
    /// opportunism first, then the resource that feeds future attacks,
    /// then territory.
    fn default() -> Self {
        Self(vec![
            ActionId::Attack,
            ActionId::Flee,
            ActionId::CaptureAmmo,
            ActionId::CaptureDominationPoint,
            ActionId::DefendDominationPoint,
        ])
    }
}

impl PriorityOrder {
    pub fn as_slice(&self) -> &[ActionId] {
        &self.0
    }

    /// Check that the order is a permutation of the five real actions
    pub fn validate(&self) -> Result<()> {
        if self.0.len() != ActionId::REPERTOIRE.len() {
            return Err(EngineError::Config(format!(
                "priority order has {} entries, expected {}",
                self.0.len(),
                ActionId::REPERTOIRE.len()
            )));
        }
        for action in ActionId::REPERTOIRE {
            let count = self.0.iter().filter(|a| **a == action).count();
            if count != 1 {
                return Err(EngineError::Config(format!(
                    "priority order must contain {action:?} exactly once (found {count})"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Action priority order shared by all agents in the match
    pub priority_order: PriorityOrder,

    // === COORDINATION ===
    /// Ticks a blackboard claim stays live without being refreshed or
    /// consumed. Covers claimants that were shot or redirected mid-pursuit;
    /// once expired the resource is up for grabs again.
    pub claim_ttl: Tick,

    /// Ticks a broadcast ammo sighting stays trustworthy. Unrefreshed
    /// sightings older than this are dropped from teammates' awareness.
    pub sighting_ttl: Tick,

    // === PERCEPTION ===
    /// How far an agent perceives enemies and ammo (Chebyshev cells).
    /// Domination points are global knowledge and ignore this radius.
    pub perception_radius: u32,

    // === WORLD RULES ===
    /// Rounds granted by one ammo pickup
    pub ammo_amount: u32,

    /// Ticks before a consumed pickup reappears at its position.
    /// Zero disables respawning (each pickup is single-use).
    pub ammo_respawn: Tick,

    /// Ticks a shot agent stays out before respawning at its spawn with
    /// zero ammo. Zero means elimination is permanent.
    pub spawn_delay: Tick,

    /// Combined score pool. Both teams start at half of this; an owned
    /// domination point moves one unit per tick from the opponent to the
    /// owner, and a team reaching zero loses. Must be even.
    pub max_score: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            priority_order: PriorityOrder::default(),
            claim_ttl: 8,
            sighting_ttl: 15,
            perception_radius: 5,
            ammo_amount: 3,
            ammo_respawn: 20,
            spawn_delay: 5,
            max_score: 1000,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.priority_order.validate()?;

        if self.claim_ttl == 0 {
            return Err(EngineError::Config("claim_ttl must be positive".into()));
        }
        if self.sighting_ttl == 0 {
            return Err(EngineError::Config("sighting_ttl must be positive".into()));
        }
        if self.perception_radius == 0 {
            return Err(EngineError::Config(
                "perception_radius must be positive".into(),
            ));
        }
        if self.ammo_amount == 0 {
            return Err(EngineError::Config("ammo_amount must be positive".into()));
        }
        if self.max_score == 0 || self.max_score % 2 != 0 {
            return Err(EngineError::Config(format!(
                "max_score ({}) must be positive and even",
                self.max_score
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
