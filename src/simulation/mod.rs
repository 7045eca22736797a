pub mod perception;
pub mod stats;
pub mod tick;

pub use perception::{build_percept, refresh_percepts, AmmoTarget, Percept, PerceivedPoint};
pub use stats::{ActionTally, MatchId, MatchOutcome, MatchReport, TeamScore};
pub use tick::Match;
