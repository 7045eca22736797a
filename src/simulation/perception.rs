//! Percept refresh: what each agent knows at the start of a tick
//!
//! Percepts are ephemeral snapshots, rebuilt from world state every tick and
//! never carried across ticks. Enemies and ammo are local knowledge bounded
//! by the perception radius; domination points are global knowledge and
//! appear in every percept, sorted by distance.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, AmmoId, GridPos, PointId, Team};
use crate::world::World;

/// An ammo pickup the agent can act on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoTarget {
    pub id: AmmoId,
    pub pos: GridPos,
}

/// A domination point as seen in a percept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceivedPoint {
    pub id: PointId,
    pub owner: Option<Team>,
    pub pos: GridPos,
    pub contested: bool,
    pub dist_sq: i64,
}

/// Per-agent snapshot of locally-observable and globally-shared facts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Percept {
    pub agent: AgentId,
    pub nearby_enemy: bool,
    /// Nearest active enemy in range, for flee direction and attack targeting
    pub nearest_enemy: Option<(AgentId, GridPos)>,
    /// Nearest available pickup in range (direct perception only; broadcast
    /// sightings are merged by the proactive policy, not here)
    pub nearby_ammo: Option<AmmoTarget>,
    /// All domination points, sorted by distance then id
    pub domination_points: Vec<PerceivedPoint>,
}

impl Percept {
    /// Nearest point not owned by the given team, if any
    pub fn nearest_capturable(&self, team: Team) -> Option<&PerceivedPoint> {
        self.domination_points
            .iter()
            .find(|p| p.owner != Some(team))
    }

    /// Nearest point owned by the given team, if any
    pub fn nearest_owned(&self, team: Team) -> Option<&PerceivedPoint> {
        self.domination_points
            .iter()
            .find(|p| p.owner == Some(team))
    }
}

/// Build the percept for one agent from current world state
pub fn build_percept(world: &World, agent: AgentId, radius: u32) -> Option<Percept> {
    let observer = world.agent(agent)?;
    if !observer.is_active() {
        return None;
    }

    let nearest_enemy = world
        .nearest_enemy(agent, radius)
        .and_then(|id| world.agent(id).map(|a| (id, a.pos)));

    let nearby_ammo = world
        .nearest_visible_ammo(agent, radius)
        .map(|(id, pos)| AmmoTarget { id, pos });

    let mut domination_points: Vec<PerceivedPoint> = world
        .points
        .iter()
        .map(|p| PerceivedPoint {
            id: p.id,
            owner: p.owner,
            pos: p.pos,
            contested: p.contested,
            dist_sq: observer.pos.dist_sq(&p.pos),
        })
        .collect();
    domination_points.sort_by_key(|p| (p.dist_sq, p.id));

    Some(Percept {
        agent,
        nearby_enemy: nearest_enemy.is_some(),
        nearest_enemy,
        nearby_ammo,
        domination_points,
    })
}

/// Refresh percepts for every agent. Pure reads over the world, so the
/// per-agent computation runs in parallel; results come back in agent order
/// and the decide phase that consumes them stays serialized.
pub fn refresh_percepts(world: &World, radius: u32) -> Vec<Option<Percept>> {
    world
        .agents
        .par_iter()
        .map(|a| build_percept(world, a.id, radius))
        .collect()
}
