//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for agents
///
/// Ids are dense and assigned in creation order; the scheduler iterates
/// agents by ascending id, which keeps matches reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Unique identifier for ammo pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AmmoId(pub u32);

/// Unique identifier for domination points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// The two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Discrete 2D field position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: number of king-moves between two cells
    pub fn chebyshev(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Squared Euclidean distance, used for nearest-target ordering
    pub fn dist_sq(&self, other: &Self) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// One king-move toward the target, clamped to the field bounds
    pub fn step_toward(&self, target: &Self, width: i32, height: i32) -> Self {
        let step = Self {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        };
        step.clamped(width, height)
    }

    /// One king-move directly away from the threat, clamped to the field bounds
    pub fn step_away(&self, threat: &Self, width: i32, height: i32) -> Self {
        let step = Self {
            x: self.x - (threat.x - self.x).signum(),
            y: self.y - (threat.y - self.y).signum(),
        };
        step.clamped(width, height)
    }

    fn clamped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, width - 1),
            y: self.y.clamp(0, height - 1),
        }
    }
}
