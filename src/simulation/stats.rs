//! Match-level bookkeeping: scores, action tallies, and the final report

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::catalog::ActionId;
use crate::core::types::{Team, Tick};

/// Unique identifier for a match report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

/// Running score. Both teams start at half the configured pool; owned
/// domination points move score from the opponent to the owner each tick,
/// and hitting zero loses the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub red: u32,
    pub blue: u32,
}

impl TeamScore {
    pub fn split(max_score: u32) -> Self {
        Self {
            red: max_score / 2,
            blue: max_score / 2,
        }
    }

    pub fn of(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }
}

/// How many times each action was chosen over the match
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionTally {
    pub attack: u64,
    pub flee: u64,
    pub capture_ammo: u64,
    pub capture_point: u64,
    pub defend_point: u64,
    pub idle: u64,
}

impl ActionTally {
    pub fn record(&mut self, action: ActionId) {
        match action {
            ActionId::Attack => self.attack += 1,
            ActionId::Flee => self.flee += 1,
            ActionId::CaptureAmmo => self.capture_ammo += 1,
            ActionId::CaptureDominationPoint => self.capture_point += 1,
            ActionId::DefendDominationPoint => self.defend_point += 1,
            ActionId::Idle => self.idle += 1,
        }
    }
}

/// Terminal state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    RedVictory,
    BlueVictory,
    /// Both teams eliminated in the same tick
    Draw,
    /// External tick cap reached with no winner
    TickLimit,
}

/// Final report handed to the caller; persistence is the caller's concern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_id: MatchId,
    pub ticks: Tick,
    pub score: TeamScore,
    pub outcome: MatchOutcome,
    pub tally: ActionTally,
}
