//! Action definitions and catalog
//!
//! Every agent chooses exactly one action per tick. Applicability is a pure
//! predicate over the agent's percept; effects happen only in the
//! scheduler's apply phase.

use serde::{Deserialize, Serialize};

use crate::core::types::Team;
use crate::simulation::perception::Percept;

/// Unique action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    Attack,
    Flee,
    CaptureAmmo,
    CaptureDominationPoint,
    DefendDominationPoint,
    /// Fallback when nothing in the priority order applies
    Idle,
}

impl ActionId {
    /// The five real actions, in catalog order. Idle is excluded: it is the
    /// implicit fallback, never part of a priority order.
    pub const REPERTOIRE: [ActionId; 5] = [
        ActionId::Attack,
        ActionId::Flee,
        ActionId::CaptureAmmo,
        ActionId::CaptureDominationPoint,
        ActionId::DefendDominationPoint,
    ];

    /// Pure applicability predicate: no side effects, safe to evaluate any
    /// number of times per tick.
    ///
    /// `CaptureAmmo` checks direct perception only here; the proactive
    /// policy layers sighting merge and claim negotiation on top.
    pub fn is_applicable(&self, ammo: u32, team: Team, percept: &Percept) -> bool {
        match self {
            ActionId::Attack => ammo > 0 && percept.nearby_enemy,
            ActionId::Flee => percept.nearby_enemy,
            ActionId::CaptureAmmo => percept.nearby_ammo.is_some(),
            ActionId::CaptureDominationPoint => percept.nearest_capturable(team).is_some(),
            ActionId::DefendDominationPoint => percept.nearest_owned(team).is_some(),
            ActionId::Idle => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, AmmoId, GridPos, PointId};
    use crate::simulation::perception::{AmmoTarget, Percept, PerceivedPoint};

    fn percept(
        nearby_enemy: bool,
        nearby_ammo: bool,
        point_owner: Option<Team>,
    ) -> Percept {
        Percept {
            agent: AgentId(0),
            nearby_enemy,
            nearest_enemy: None,
            nearby_ammo: nearby_ammo.then(|| AmmoTarget {
                id: AmmoId(0),
                pos: GridPos::new(1, 1),
            }),
            domination_points: vec![PerceivedPoint {
                id: PointId(0),
                owner: point_owner,
                pos: GridPos::new(5, 5),
                contested: false,
                dist_sq: 50,
            }],
        }
    }

    #[test]
    fn test_attack_needs_ammo_and_enemy() {
        let p = percept(true, false, None);
        assert!(ActionId::Attack.is_applicable(1, Team::Red, &p));
        assert!(!ActionId::Attack.is_applicable(0, Team::Red, &p));

        let quiet = percept(false, false, None);
        assert!(!ActionId::Attack.is_applicable(1, Team::Red, &quiet));
    }

    #[test]
    fn test_flee_needs_enemy_only() {
        let p = percept(true, false, None);
        assert!(ActionId::Flee.is_applicable(0, Team::Red, &p));
        let quiet = percept(false, false, None);
        assert!(!ActionId::Flee.is_applicable(0, Team::Red, &quiet));
    }

    #[test]
    fn test_capture_ammo_needs_perceived_pickup() {
        assert!(ActionId::CaptureAmmo.is_applicable(0, Team::Red, &percept(false, true, None)));
        assert!(!ActionId::CaptureAmmo.is_applicable(0, Team::Red, &percept(false, false, None)));
    }

    #[test]
    fn test_capture_point_needs_unowned_point() {
        let neutral = percept(false, false, None);
        assert!(ActionId::CaptureDominationPoint.is_applicable(0, Team::Red, &neutral));

        let enemy_owned = percept(false, false, Some(Team::Blue));
        assert!(ActionId::CaptureDominationPoint.is_applicable(0, Team::Red, &enemy_owned));

        let own = percept(false, false, Some(Team::Red));
        assert!(!ActionId::CaptureDominationPoint.is_applicable(0, Team::Red, &own));
    }

    #[test]
    fn test_defend_needs_owned_point() {
        let own = percept(false, false, Some(Team::Red));
        assert!(ActionId::DefendDominationPoint.is_applicable(0, Team::Red, &own));

        let neutral = percept(false, false, None);
        assert!(!ActionId::DefendDominationPoint.is_applicable(0, Team::Red, &neutral));
    }

    #[test]
    fn test_idle_always_applicable() {
        assert!(ActionId::Idle.is_applicable(0, Team::Red, &percept(false, false, None)));
    }
}
