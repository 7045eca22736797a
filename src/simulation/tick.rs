//! Turn scheduler - drives one match tick by tick
//!
//! Per tick, in order:
//! 1. Expire stale blackboard claims and sightings
//! 2. Refresh every live agent's percept from world state
//! 3. Ask each agent's policy for one action, in creation order, serialized
//!    with respect to blackboard mutation
//! 4. Apply all chosen actions in the same order
//! 5. Recompute domination ownership/contest from positions and accrue score
//! 6. Advance respawn timers
//!
//! The scheduler does not define victory; it exposes the per-tick world
//! snapshot and an `outcome()` check for the caller's loop.

use crate::actions::catalog::ActionId;
use crate::blackboard::Blackboard;
use crate::core::config::{MatchConfig, PolicyKind};
use crate::core::error::{EngineError, Result};
use crate::core::types::{AgentId, AmmoId, Team, Tick};
use crate::policy::{self, Decision, DecisionContext};
use crate::simulation::perception::refresh_percepts;
use crate::simulation::stats::{ActionTally, MatchId, MatchOutcome, MatchReport, TeamScore};
use crate::world::World;

/// One running match: world, blackboard, scores, and the tick counter
#[derive(Debug, Clone)]
pub struct Match {
    pub config: MatchConfig,
    pub world: World,
    pub blackboard: Blackboard,
    pub current_tick: Tick,
    pub score: TeamScore,
    tally: ActionTally,
}

impl Match {
    /// Validate the configuration and set up a match. Invalid configuration
    /// fails here, never inside the tick loop.
    pub fn new(config: MatchConfig, world: World) -> Result<Self> {
        config.validate()?;
        if world.width < 2 || world.height < 2 {
            return Err(EngineError::Config(format!(
                "world {}x{} cannot hold both spawn columns",
                world.width, world.height
            )));
        }
        let blackboard = Blackboard::new(config.claim_ttl, config.sighting_ttl);
        let score = TeamScore::split(config.max_score);
        Ok(Self {
            config,
            world,
            blackboard,
            current_tick: 0,
            score,
            tally: ActionTally::default(),
        })
    }

    /// Create an agent with a fixed policy kind at its team's spawn
    pub fn spawn_agent(&mut self, team: Team, policy: PolicyKind) -> AgentId {
        self.world.spawn_agent(team, policy)
    }

    /// Advance the simulation one tick. Returns the action each live agent
    /// chose, in agent-creation order.
    pub fn tick(&mut self) -> Result<Vec<(AgentId, ActionId)>> {
        self.current_tick += 1;
        let now = self.current_tick;

        self.blackboard.expire_stale(now);

        let percepts = refresh_percepts(&self.world, self.config.perception_radius);
        let order = self.config.priority_order.clone();

        // Decide phase: serialized, blackboard mutable. No side effects on
        // the world yet.
        let mut decisions: Vec<(AgentId, Decision)> = Vec::new();
        for (i, percept) in percepts.iter().enumerate() {
            let Some(percept) = percept else { continue };
            let ctx = DecisionContext {
                agent: &self.world.agents[i],
                percept,
                order: order.as_slice(),
                tick: now,
            };
            let decision = policy::decide(&ctx, &mut self.blackboard);
            decisions.push((self.world.agents[i].id, decision));
        }

        // Apply phase: every decided action executes exactly once.
        for (id, decision) in &decisions {
            if let Some(agent) = self.world.agent_mut(*id) {
                agent.current_action = decision.action;
            }
            self.tally.record(decision.action);
            self.apply(*id, decision)?;
        }

        self.resolve_domination();
        self.accrue_score();
        self.world.tick_timers();

        tracing::debug!(
            tick = now,
            red = self.score.red,
            blue = self.score.blue,
            claims = self.blackboard.live_claims(),
            "tick complete"
        );
        Ok(decisions.iter().map(|(id, d)| (*id, d.action)).collect())
    }

    /// Terminal state, if the match is over: a team's score reaching zero or
    /// a team being wiped out with no pending respawns
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let red_alive = self.world.team_alive(Team::Red);
        let blue_alive = self.world.team_alive(Team::Blue);
        match (red_alive, blue_alive) {
            (false, false) => return Some(MatchOutcome::Draw),
            (false, true) => return Some(MatchOutcome::BlueVictory),
            (true, false) => return Some(MatchOutcome::RedVictory),
            (true, true) => {}
        }
        if self.score.red == 0 {
            Some(MatchOutcome::BlueVictory)
        } else if self.score.blue == 0 {
            Some(MatchOutcome::RedVictory)
        } else {
            None
        }
    }

    /// Run until a terminal state or the tick cap, whichever comes first
    pub fn run(&mut self, max_ticks: Tick) -> Result<MatchReport> {
        while self.current_tick < max_ticks {
            self.tick()?;
            if let Some(outcome) = self.outcome() {
                return Ok(self.report(outcome));
            }
        }
        Ok(self.report(MatchOutcome::TickLimit))
    }

    fn report(&self, outcome: MatchOutcome) -> MatchReport {
        MatchReport {
            match_id: MatchId::new(),
            ticks: self.current_tick,
            score: self.score,
            outcome,
            tally: self.tally,
        }
    }

    /// Execute one agent's decided action against current world state.
    /// Stale targets (dead enemy, consumed pickup) make the action a no-op
    /// for this tick; the policy re-evaluates next tick with fresh percepts.
    fn apply(&mut self, id: AgentId, decision: &Decision) -> Result<()> {
        let Some(agent) = self.world.agent(id) else {
            return Err(EngineError::AgentNotFound(id));
        };
        // Shot earlier in this apply phase: the decided action is dropped.
        if !agent.is_active() {
            return Ok(());
        }
        let (pos, team, policy, ammo) = (agent.pos, agent.team, agent.policy, agent.ammo);
        let (width, height) = (self.world.width, self.world.height);
        let radius = self.config.perception_radius;

        match decision.action {
            ActionId::Attack => {
                if ammo == 0 {
                    return Ok(());
                }
                let Some(target) = self.world.nearest_enemy(id, radius) else {
                    return Ok(());
                };
                self.world.resolve_attack(target, self.config.spawn_delay);
                if let Some(attacker) = self.world.agent_mut(id) {
                    attacker.ammo -= 1;
                }
                tracing::debug!(attacker = ?id, ?target, "attack resolved");
            }
            ActionId::Flee => {
                let Some(threat) = self
                    .world
                    .nearest_enemy(id, radius)
                    .and_then(|t| self.world.agent(t).map(|a| a.pos))
                else {
                    return Ok(());
                };
                let to = pos.step_away(&threat, width, height);
                self.world.resolve_move(id, to);
            }
            ActionId::CaptureAmmo => {
                let Some(target) = decision.ammo_target else {
                    return Ok(());
                };
                let Some(pickup_pos) = self.world.pickup(target.id).map(|p| p.pos) else {
                    return Ok(());
                };
                if pos == pickup_pos {
                    self.consume_at(id, target.id, policy)?;
                } else {
                    let to = pos.step_toward(&pickup_pos, width, height);
                    self.world.resolve_move(id, to);
                }
            }
            ActionId::CaptureDominationPoint => {
                let target = self
                    .world
                    .points
                    .iter()
                    .filter(|p| p.owner != Some(team))
                    .min_by_key(|p| (pos.dist_sq(&p.pos), p.id))
                    .map(|p| p.pos);
                if let Some(target) = target {
                    if pos != target {
                        let to = pos.step_toward(&target, width, height);
                        self.world.resolve_move(id, to);
                    }
                }
            }
            ActionId::DefendDominationPoint => {
                let target = self
                    .world
                    .points
                    .iter()
                    .filter(|p| p.owner == Some(team))
                    .min_by_key(|p| (pos.dist_sq(&p.pos), p.id))
                    .map(|p| p.pos);
                if let Some(target) = target {
                    if pos != target {
                        let to = pos.step_toward(&target, width, height);
                        self.world.resolve_move(id, to);
                    }
                }
            }
            ActionId::Idle => {}
        }
        Ok(())
    }

    /// Consume a pickup the agent is standing on. For proactive consumers, a
    /// live claim held by anyone else is a broken invariant and aborts the
    /// tick loudly; it is never silently resolved.
    fn consume_at(&mut self, id: AgentId, pickup: AmmoId, policy: PolicyKind) -> Result<()> {
        if policy == PolicyKind::Proactive {
            if let Some(holder) = self.blackboard.claim_holder(pickup) {
                if holder != id {
                    return Err(EngineError::ClaimInvariant {
                        pickup,
                        consumer: id,
                        holder,
                    });
                }
            }
        }
        if self.world.consume_pickup(pickup, self.config.ammo_respawn) {
            if let Some(agent) = self.world.agent_mut(id) {
                agent.ammo += self.config.ammo_amount;
            }
            self.blackboard.release_claim(pickup);
            tracing::debug!(agent = ?id, ?pickup, "ammo captured");
        } else if self.blackboard.claim_holder(pickup) == Some(id) {
            // Someone else got there first this tick; drop the pursuit.
            self.blackboard.release_claim(pickup);
        }
        Ok(())
    }

    /// Ownership is derived purely from current-tick positions: one team
    /// alone on a point owns it, both teams present makes it contested and
    /// neutral, an empty point keeps its owner.
    fn resolve_domination(&mut self) {
        for idx in 0..self.world.points.len() {
            let point_pos = self.world.points[idx].pos;
            let mut red = 0u32;
            let mut blue = 0u32;
            for agent in self.world.agents.iter().filter(|a| a.is_active()) {
                if agent.pos == point_pos {
                    match agent.team {
                        Team::Red => red += 1,
                        Team::Blue => blue += 1,
                    }
                }
            }
            let point = &mut self.world.points[idx];
            match (red > 0, blue > 0) {
                (true, true) => {
                    point.owner = None;
                    point.contested = true;
                }
                (true, false) => {
                    point.owner = Some(Team::Red);
                    point.contested = false;
                }
                (false, true) => {
                    point.owner = Some(Team::Blue);
                    point.contested = false;
                }
                (false, false) => point.contested = false,
            }
            point.defenders = match point.owner {
                Some(Team::Red) => red,
                Some(Team::Blue) => blue,
                None => 0,
            };
        }
    }

    /// Each owned point moves one score unit per tick from the opponent to
    /// the owner, while the owner is below the cap
    fn accrue_score(&mut self) {
        for point in &self.world.points {
            let Some(owner) = point.owner else { continue };
            let (own, other) = match owner {
                Team::Red => (&mut self.score.red, &mut self.score.blue),
                Team::Blue => (&mut self.score.blue, &mut self.score.red),
            };
            if *own < self.config.max_score {
                *own += 1;
                *other = other.saturating_sub(1);
            }
        }
    }
}
