//! World state: the field, its objects, and the effect resolvers
//!
//! The world owns every agent-private table (positions, ammo counts) and the
//! resource/ownership tables. Decision policies only read it; mutation goes
//! through the resolvers below, invoked by the scheduler's apply phase.

pub mod generator;
pub mod objects;

pub use generator::{generate, FieldSpec};
pub use objects::{AgentState, AmmoPickup, DominationPoint};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::PolicyKind;
use crate::core::types::{AgentId, AmmoId, GridPos, PointId, Team, Tick};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: i32,
    pub height: i32,
    pub agents: Vec<AgentState>,
    pub pickups: Vec<AmmoPickup>,
    pub points: Vec<DominationPoint>,
    /// Cell index of currently-available pickups, kept in sync by
    /// consume/respawn
    pickups_by_pos: AHashMap<GridPos, AmmoId>,
}

impl World {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            agents: Vec::new(),
            pickups: Vec::new(),
            points: Vec::new(),
            pickups_by_pos: AHashMap::new(),
        }
    }

    /// Create an agent at its team's next spawn slot. Ids are dense and
    /// follow creation order, which is also the scheduler's iteration order.
    pub fn spawn_agent(&mut self, team: Team, policy: PolicyKind) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        let spawn = self.spawn_position(team);
        self.agents.push(AgentState::new(id, team, spawn, policy));
        tracing::debug!(?id, ?team, ?policy, ?spawn, "agent spawned");
        id
    }

    pub fn add_pickup(&mut self, pos: GridPos) -> AmmoId {
        let id = AmmoId(self.pickups.len() as u32);
        self.pickups.push(AmmoPickup::new(id, pos));
        self.pickups_by_pos.insert(pos, id);
        id
    }

    pub fn add_point(&mut self, pos: GridPos) -> PointId {
        let id = PointId(self.points.len() as u32);
        self.points.push(DominationPoint::new(id, pos));
        id
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.get(id.0 as usize)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.agents.get_mut(id.0 as usize)
    }

    pub fn pickup(&self, id: AmmoId) -> Option<&AmmoPickup> {
        self.pickups.get(id.0 as usize)
    }

    pub fn point(&self, id: PointId) -> Option<&DominationPoint> {
        self.points.get(id.0 as usize)
    }

    /// Available pickup occupying the given cell, if any
    pub fn available_pickup_at(&self, pos: GridPos) -> Option<AmmoId> {
        self.pickups_by_pos.get(&pos).copied()
    }

    /// Nearest active enemy within the perception radius.
    /// Ties break by lowest agent id, keeping target choice deterministic.
    pub fn nearest_enemy(&self, of: AgentId, radius: u32) -> Option<AgentId> {
        let observer = self.agent(of)?;
        self.agents
            .iter()
            .filter(|a| a.is_active() && a.team != observer.team)
            .filter(|a| observer.pos.chebyshev(&a.pos) <= radius)
            .min_by_key(|a| (observer.pos.dist_sq(&a.pos), a.id))
            .map(|a| a.id)
    }

    /// Nearest available pickup within the perception radius, ties by id
    pub fn nearest_visible_ammo(&self, of: AgentId, radius: u32) -> Option<(AmmoId, GridPos)> {
        let observer = self.agent(of)?;
        self.pickups
            .iter()
            .filter(|p| p.available)
            .filter(|p| observer.pos.chebyshev(&p.pos) <= radius)
            .min_by_key(|p| (observer.pos.dist_sq(&p.pos), p.id))
            .map(|p| (p.id, p.pos))
    }

    /// Combat rule: a hit sends the target back to its spawn after
    /// `spawn_delay` ticks with its ammo stripped. With a zero delay the
    /// elimination is permanent.
    pub fn resolve_attack(&mut self, target: AgentId, spawn_delay: Tick) {
        if let Some(agent) = self.agent_mut(target) {
            agent.ammo = 0;
            if spawn_delay > 0 {
                agent.respawn_in = Some(spawn_delay);
            } else {
                agent.alive = false;
            }
            tracing::debug!(?target, spawn_delay, "agent hit");
        }
    }

    pub fn resolve_move(&mut self, agent: AgentId, to: GridPos) {
        if let Some(a) = self.agent_mut(agent) {
            a.pos = to;
        }
    }

    /// Consume a pickup. Returns false when it was already gone; the caller
    /// treats that as a stale-world no-op, not an error.
    pub fn consume_pickup(&mut self, id: AmmoId, respawn: Tick) -> bool {
        let Some(pickup) = self.pickups.get_mut(id.0 as usize) else {
            return false;
        };
        if !pickup.available {
            return false;
        }
        pickup.available = false;
        pickup.respawn_in = (respawn > 0).then_some(respawn);
        self.pickups_by_pos.remove(&pickup.pos);
        tracing::debug!(?id, "pickup consumed");
        true
    }

    /// Advance respawn timers for shot agents and consumed pickups
    pub fn tick_timers(&mut self) {
        for agent in &mut self.agents {
            if let Some(t) = agent.respawn_in {
                if t <= 1 {
                    agent.respawn_in = None;
                    agent.pos = agent.spawn_pos;
                    tracing::debug!(id = ?agent.id, "agent respawned");
                } else {
                    agent.respawn_in = Some(t - 1);
                }
            }
        }
        let mut restored = Vec::new();
        for pickup in &mut self.pickups {
            if let Some(t) = pickup.respawn_in {
                if t <= 1 {
                    pickup.respawn_in = None;
                    pickup.available = true;
                    restored.push((pickup.pos, pickup.id));
                } else {
                    pickup.respawn_in = Some(t - 1);
                }
            }
        }
        for (pos, id) in restored {
            self.pickups_by_pos.insert(pos, id);
        }
    }

    /// True while the team still has at least one agent alive (including
    /// agents waiting on a respawn timer)
    pub fn team_alive(&self, team: Team) -> bool {
        self.agents.iter().any(|a| a.alive && a.team == team)
    }

    fn spawn_position(&self, team: Team) -> GridPos {
        let slot = self
            .agents
            .iter()
            .filter(|a| a.team == team)
            .count() as i32;
        let x = match team {
            Team::Red => 1,
            Team::Blue => self.width - 2,
        };
        let rows = (self.height - 2).max(1);
        GridPos::new(x.clamp(0, self.width - 1), 1 + (slot * 2) % rows)
    }
}
