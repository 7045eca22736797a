//! Proactive decision policy
//!
//! Extends the reactive policy with blackboard coordination: sightings give
//! the agent effectively global ammo awareness, and a claim must be won
//! before CaptureAmmo becomes applicable. A failed claim falls through to
//! the next action in the priority order for this tick; there is no retry
//! and no hidden tie-breaking. Claim contention and sighting-driven
//! redirection can abandon a half-travelled route, so this policy runs at
//! higher variance than reactive play and can do worse. That behavior is
//! intended and must not be damped here.

use crate::actions::catalog::ActionId;
use crate::blackboard::Blackboard;
use crate::policy::{first_applicable, Decision, DecisionContext};
use crate::simulation::perception::AmmoTarget;

pub fn select_action_proactive(ctx: &DecisionContext, blackboard: &mut Blackboard) -> Decision {
    // Publish what we see before deciding, unless another agent already
    // holds the resource.
    if let Some(seen) = ctx.percept.nearby_ammo {
        match blackboard.claim_holder(seen.id) {
            Some(holder) if holder != ctx.agent.id => {}
            _ => blackboard.broadcast_sighting(seen.id, seen.pos, ctx.tick),
        }
    }

    let candidate = best_ammo_candidate(ctx, blackboard);
    let mut claimed: Option<AmmoTarget> = None;

    let action = first_applicable(ctx.order, |a| match a {
        ActionId::CaptureAmmo => {
            let Some(target) = candidate else {
                return false;
            };
            if blackboard.try_claim(target.id, ctx.agent.id, ctx.tick) {
                claimed = Some(target);
                true
            } else {
                // Another agent owns the pursuit; fall through this tick.
                false
            }
        }
        other => other.is_applicable(ctx.agent.ammo, ctx.agent.team, ctx.percept),
    });

    tracing::trace!(agent = ?ctx.agent.id, ?action, claimed = ?claimed.map(|t| t.id), "proactive decision");
    Decision {
        action,
        ammo_target: claimed,
    }
}

/// Nearest known pickup: direct perception merged with live broadcast
/// sightings, ties by id. Sightings may be stale; a wasted trip to a
/// consumed pickup is part of the mechanism, resolved by TTL expiry.
fn best_ammo_candidate(ctx: &DecisionContext, blackboard: &Blackboard) -> Option<AmmoTarget> {
    let direct = ctx.percept.nearby_ammo;
    let from_sightings = blackboard
        .sightings(ctx.tick)
        .filter(|(id, _)| direct.map(|d| d.id) != Some(*id))
        .map(|(id, s)| AmmoTarget { id, pos: s.pos });

    direct
        .into_iter()
        .chain(from_sightings)
        .min_by_key(|t| (ctx.agent.pos.dist_sq(&t.pos), t.id))
}
