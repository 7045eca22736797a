//! World object state: agents, ammo pickups, domination points

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActionId;
use crate::core::config::PolicyKind;
use crate::core::types::{AgentId, AmmoId, GridPos, PointId, Team, Tick};

/// Per-agent mutable state
///
/// Everything here is exclusively owned by the agent and mutated only by the
/// scheduler applying that agent's own action (or combat resolution against
/// it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub team: Team,
    pub pos: GridPos,
    pub spawn_pos: GridPos,
    pub ammo: u32,
    pub policy: PolicyKind,
    pub alive: bool,
    /// Ticks left before this agent returns to its spawn. Agents with a
    /// pending respawn are skipped by the scheduler and invisible to
    /// perception.
    pub respawn_in: Option<Tick>,
    /// Action chosen this tick, recorded for the tick log
    pub current_action: ActionId,
}

impl AgentState {
    pub fn new(id: AgentId, team: Team, spawn_pos: GridPos, policy: PolicyKind) -> Self {
        Self {
            id,
            team,
            pos: spawn_pos,
            spawn_pos,
            ammo: 0,
            policy,
            alive: true,
            respawn_in: None,
            current_action: ActionId::Idle,
        }
    }

    /// True when the agent participates in this tick: alive and not waiting
    /// on a respawn timer.
    pub fn is_active(&self) -> bool {
        self.alive && self.respawn_in.is_none()
    }
}

/// An ammunition pickup on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPickup {
    pub id: AmmoId,
    pub pos: GridPos,
    pub available: bool,
    /// Ticks until a consumed pickup reappears (None when available or
    /// permanently gone)
    pub respawn_in: Option<Tick>,
}

impl AmmoPickup {
    pub fn new(id: AmmoId, pos: GridPos) -> Self {
        Self {
            id,
            pos,
            available: true,
            respawn_in: None,
        }
    }
}

/// A globally-visible control location
///
/// Ownership is derived from current-tick occupation only and recomputed by
/// the scheduler every tick; nothing here is cached across ticks except the
/// owner, which persists until occupation changes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DominationPoint {
    pub id: PointId,
    pub pos: GridPos,
    pub owner: Option<Team>,
    pub contested: bool,
    /// Owner-team agents standing on the point this tick
    pub defenders: u32,
}

impl DominationPoint {
    pub fn new(id: PointId, pos: GridPos) -> Self {
        Self {
            id,
            pos,
            owner: None,
            contested: false,
            defenders: 0,
        }
    }
}
