//! Seeded field generation
//!
//! Pickups are placed in mirrored pairs and domination points on the center
//! column so neither team starts with a positional advantage. Generation is
//! the only randomized part of the engine; the same seed always yields the
//! same field.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{EngineError, Result};
use crate::core::types::GridPos;
use crate::world::World;

/// Field dimensions and object counts
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub width: i32,
    pub height: i32,
    /// Domination points, placed on the center column
    pub num_points: u32,
    /// Ammo pickups; rounded up to an even count for mirroring
    pub num_ammo: u32,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            width: 39,
            height: 24,
            num_points: 3,
            num_ammo: 6,
        }
    }
}

impl FieldSpec {
    /// Smallest field that fits both spawn columns, the center point column,
    /// and a non-empty left-half band for mirrored pickup placement
    pub fn validate(&self) -> Result<()> {
        if self.width < 6 || self.height < 4 {
            return Err(EngineError::Config(format!(
                "field {}x{} is too small (minimum 6x4)",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Generate a world from a seed. Agents are not placed here; callers spawn
/// them afterwards so team sizes and policies stay a match-level decision.
pub fn generate(seed: u64, spec: &FieldSpec) -> Result<World> {
    spec.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new(spec.width, spec.height);
    let mut used: Vec<GridPos> = Vec::new();

    let center_x = spec.width / 2;
    for _ in 0..spec.num_points {
        let pos = free_cell(&mut rng, &mut used, |rng| {
            GridPos::new(center_x, rng.gen_range(1..spec.height - 1))
        });
        world.add_point(pos);
    }

    // Mirrored pickup pairs: one in the left half, its twin reflected into
    // the right half.
    for _ in 0..spec.num_ammo.div_ceil(2) {
        let left = free_cell(&mut rng, &mut used, |rng| {
            GridPos::new(
                rng.gen_range(2..center_x),
                rng.gen_range(1..spec.height - 1),
            )
        });
        world.add_pickup(left);
        let right = GridPos::new(spec.width - 1 - left.x, left.y);
        if !used.contains(&right) {
            used.push(right);
            world.add_pickup(right);
        }
    }

    tracing::debug!(
        seed,
        points = world.points.len(),
        pickups = world.pickups.len(),
        "field generated"
    );
    Ok(world)
}

fn free_cell(
    rng: &mut ChaCha8Rng,
    used: &mut Vec<GridPos>,
    mut propose: impl FnMut(&mut ChaCha8Rng) -> GridPos,
) -> GridPos {
    loop {
        let pos = propose(rng);
        if !used.contains(&pos) {
            used.push(pos);
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let spec = FieldSpec::default();
        let a = generate(42, &spec).unwrap();
        let b = generate(42, &spec).unwrap();
        let pos_a: Vec<_> = a.pickups.iter().map(|p| p.pos).collect();
        let pos_b: Vec<_> = b.pickups.iter().map(|p| p.pos).collect();
        assert_eq!(pos_a, pos_b);
        let pts_a: Vec<_> = a.points.iter().map(|p| p.pos).collect();
        let pts_b: Vec<_> = b.points.iter().map(|p| p.pos).collect();
        assert_eq!(pts_a, pts_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let spec = FieldSpec::default();
        let a = generate(1, &spec).unwrap();
        let b = generate(2, &spec).unwrap();
        let pos_a: Vec<_> = a.pickups.iter().map(|p| p.pos).collect();
        let pos_b: Vec<_> = b.pickups.iter().map(|p| p.pos).collect();
        assert_ne!(pos_a, pos_b);
    }

    #[test]
    fn test_pickups_are_mirrored() {
        let spec = FieldSpec::default();
        let world = generate(7, &spec).unwrap();
        for pair in world.pickups.chunks(2) {
            if let [left, right] = pair {
                assert_eq!(right.pos.x, spec.width - 1 - left.pos.x);
                assert_eq!(right.pos.y, left.pos.y);
            }
        }
    }

    #[test]
    fn test_points_on_center_column() {
        let spec = FieldSpec::default();
        let world = generate(99, &spec).unwrap();
        assert_eq!(world.points.len(), spec.num_points as usize);
        for point in &world.points {
            assert_eq!(point.pos.x, spec.width / 2);
        }
    }

    #[test]
    fn test_everything_in_bounds() {
        let spec = FieldSpec {
            width: 15,
            height: 9,
            num_points: 2,
            num_ammo: 4,
        };
        let world = generate(5, &spec).unwrap();
        for p in &world.pickups {
            assert!(p.pos.x >= 0 && p.pos.x < spec.width);
            assert!(p.pos.y >= 0 && p.pos.y < spec.height);
        }
    }

    #[test]
    fn test_narrow_field_rejected_before_placement() {
        let spec = FieldSpec {
            width: 5,
            height: 9,
            num_points: 1,
            num_ammo: 2,
        };
        assert!(generate(5, &spec).is_err());
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        for (width, height) in [(0, 0), (-3, 10), (10, 0), (6, 3)] {
            let spec = FieldSpec {
                width,
                height,
                num_points: 1,
                num_ammo: 2,
            };
            assert!(generate(1, &spec).is_err());
        }
    }
}
