//! Reactive decision policy
//!
//! Stateless per tick: purely a function of the agent's own percept. Walks
//! the priority order and takes the first applicable action. Survival and
//! combat opportunism come first in the default order because Attack and
//! Flee are only applicable next to a threat and are time-critical;
//! CaptureAmmo precedes territory because ammo feeds future attacks.

use crate::actions::catalog::ActionId;
use crate::policy::{first_applicable, Decision, DecisionContext};

pub fn select_action_reactive(ctx: &DecisionContext) -> Decision {
    let action = first_applicable(ctx.order, |a| {
        a.is_applicable(ctx.agent.ammo, ctx.agent.team, ctx.percept)
    });

    let ammo_target = if action == ActionId::CaptureAmmo {
        ctx.percept.nearby_ammo
    } else {
        None
    };

    tracing::trace!(agent = ?ctx.agent.id, ?action, "reactive decision");
    Decision { action, ammo_target }
}
