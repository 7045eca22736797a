//! Decision policies: turning percepts into one action per tick
//!
//! Orderings are data, not code branches: both policies walk the configured
//! priority order through a generic first-applicable combinator. The policy
//! kind is a closed set of variants fixed at agent creation and dispatched
//! here.

pub mod proactive;
pub mod reactive;

pub use proactive::select_action_proactive;
pub use reactive::select_action_reactive;

use crate::actions::catalog::ActionId;
use crate::blackboard::Blackboard;
use crate::core::config::PolicyKind;
use crate::core::types::Tick;
use crate::simulation::perception::{AmmoTarget, Percept};
use crate::world::AgentState;

/// Everything a policy may read while deciding
pub struct DecisionContext<'a> {
    pub agent: &'a AgentState,
    pub percept: &'a Percept,
    pub order: &'a [ActionId],
    pub tick: Tick,
}

/// A chosen action plus the pickup it committed to, when relevant.
/// The scheduler applies the decision; recording the target here keeps a
/// proactive agent's apply phase aimed at the pickup it actually claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: ActionId,
    pub ammo_target: Option<AmmoTarget>,
}

impl Decision {
    pub fn idle() -> Self {
        Self {
            action: ActionId::Idle,
            ammo_target: None,
        }
    }
}

/// Walk the priority order and return the first action whose predicate
/// holds; Idle when none apply
pub fn first_applicable(
    order: &[ActionId],
    mut applicable: impl FnMut(ActionId) -> bool,
) -> ActionId {
    order
        .iter()
        .copied()
        .find(|action| applicable(*action))
        .unwrap_or(ActionId::Idle)
}

/// Dispatch on the agent's policy kind
pub fn decide(ctx: &DecisionContext, blackboard: &mut Blackboard) -> Decision {
    match ctx.agent.policy {
        PolicyKind::Reactive => select_action_reactive(ctx),
        PolicyKind::Proactive => select_action_proactive(ctx, blackboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_applicable_returns_first_match() {
        let order = [ActionId::Attack, ActionId::Flee, ActionId::CaptureAmmo];
        let action = first_applicable(&order, |a| a != ActionId::Attack);
        assert_eq!(action, ActionId::Flee);
    }

    #[test]
    fn test_first_applicable_falls_back_to_idle() {
        let order = ActionId::REPERTOIRE;
        let action = first_applicable(&order, |_| false);
        assert_eq!(action, ActionId::Idle);
    }

    #[test]
    fn test_first_applicable_respects_order_as_data() {
        let reversed = [ActionId::Flee, ActionId::Attack];
        let action = first_applicable(&reversed, |_| true);
        assert_eq!(action, ActionId::Flee);
    }
}
