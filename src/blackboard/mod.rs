//! Shared blackboard for proactive coordination
//!
//! Process-wide state scoped to one match, injected into every proactive
//! decision rather than hidden behind a singleton, so concurrent matches
//! stay isolated. Holds two tables: exclusive claims on contested resources
//! and broadcast ammo sightings.
//!
//! All operations run inside the scheduler's serialized decide phase, so
//! claim attempts for the same resource can never interleave.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, AmmoId, GridPos, Tick};

/// A time-bounded reservation granting one agent exclusive pursuit of a
/// resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub agent: AgentId,
    pub issued: Tick,
}

/// A broadcast ammo sighting, trusted until `sighting_ttl` ticks pass
/// without a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    pub pos: GridPos,
    pub seen: Tick,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blackboard {
    claims: AHashMap<AmmoId, Claim>,
    sightings: AHashMap<AmmoId, Sighting>,
    claim_ttl: Tick,
    sighting_ttl: Tick,
}

impl Blackboard {
    pub fn new(claim_ttl: Tick, sighting_ttl: Tick) -> Self {
        Self {
            claims: AHashMap::new(),
            sightings: AHashMap::new(),
            claim_ttl,
            sighting_ttl,
        }
    }

    /// Attempt to claim a resource. Succeeds iff no other agent holds a live
    /// claim on it; the current holder re-claiming refreshes the timestamp,
    /// which keeps a multi-tick pursuit alive under the TTL. Fails without
    /// mutating state.
    ///
    /// This is the sole serialization point that stops two proactive agents
    /// from pursuing the same pickup.
    pub fn try_claim(&mut self, resource: AmmoId, agent: AgentId, tick: Tick) -> bool {
        match self.claims.get(&resource) {
            Some(existing) if existing.agent != agent => {
                tracing::trace!(?resource, ?agent, holder = ?existing.agent, "claim denied");
                false
            }
            _ => {
                self.claims.insert(resource, Claim { agent, issued: tick });
                tracing::trace!(?resource, ?agent, tick, "claim recorded");
                true
            }
        }
    }

    /// Remove a claim after the resource was consumed or became permanently
    /// unavailable
    pub fn release_claim(&mut self, resource: AmmoId) {
        if self.claims.remove(&resource).is_some() {
            tracing::trace!(?resource, "claim released");
        }
    }

    /// Current live claim holder, if any
    pub fn claim_holder(&self, resource: AmmoId) -> Option<AgentId> {
        self.claims.get(&resource).map(|c| c.agent)
    }

    pub fn live_claims(&self) -> usize {
        self.claims.len()
    }

    /// Publish or refresh an ammo sighting for teammates without direct
    /// perception
    pub fn broadcast_sighting(&mut self, resource: AmmoId, pos: GridPos, tick: Tick) {
        self.sightings.insert(resource, Sighting { pos, seen: tick });
    }

    /// Unexpired sightings as of `now`, excluding one resource (usually the
    /// cell the agent already sees directly)
    pub fn sightings(&self, now: Tick) -> impl Iterator<Item = (AmmoId, Sighting)> + '_ {
        let ttl = self.sighting_ttl;
        self.sightings
            .iter()
            .filter(move |(_, s)| now.saturating_sub(s.seen) <= ttl)
            .map(|(id, s)| (*id, *s))
    }

    /// Drop claims and sightings that outlived their TTLs. Invoked once per
    /// tick by the scheduler before any agent decides; this is what reclaims
    /// resources whose claimant was shot or redirected mid-pursuit.
    pub fn expire_stale(&mut self, now: Tick) {
        let claim_ttl = self.claim_ttl;
        let before = self.claims.len();
        self.claims
            .retain(|_, c| now.saturating_sub(c.issued) <= claim_ttl);
        let expired = before - self.claims.len();
        if expired > 0 {
            tracing::debug!(expired, tick = now, "stale claims reclaimed");
        }
        let sighting_ttl = self.sighting_ttl;
        self.sightings
            .retain(|_, s| now.saturating_sub(s.seen) <= sighting_ttl);
    }

    /// Reset at match end
    pub fn clear(&mut self) {
        self.claims.clear();
        self.sightings.clear();
    }
}
