//! Placing patterns and random cells onto a world

use super::coord::Coord;
use super::pattern::Pattern;
use super::storage::GridStorage;
use super::world::World;
use crate::error::{LifeError, LifeResult};
use rand::Rng;
use tracing::debug;

/// Writes patterns into a world's current generation
pub struct Placer<'w, S: GridStorage> {
    world: &'w mut World<S>,
}

impl<'w, S: GridStorage> Placer<'w, S> {
    pub fn new(world: &'w mut World<S>) -> Self {
        Self { world }
    }

    /// Activate the pattern's live cells with its top-left corner at `origin`.
    ///
    /// Fails without touching the world if any part of the pattern's bounding
    /// box would fall outside it.
    pub fn place(&mut self, pattern: &Pattern, origin: Coord) -> LifeResult<()> {
        let (height, width) = pattern.size();
        let fits = origin
            .checked_offset(width as i64 - 1, height as i64 - 1)
            .is_some_and(|far_corner| {
                self.world.is_coord_valid(origin) && self.world.is_coord_valid(far_corner)
            });
        if !fits {
            return Err(LifeError::InvalidPlacement { origin, height, width });
        }

        for offset in pattern.live_offsets() {
            self.world.activate_cell(origin.offset(offset.x, offset.y))?;
        }

        debug!(%origin, height, width, "placed pattern");
        Ok(())
    }
}

/// Activate `count` uniformly random cells; repeats are allowed
pub fn seed_random<S: GridStorage, R: Rng + ?Sized>(
    world: &mut World<S>,
    count: usize,
    rng: &mut R,
) -> LifeResult<()> {
    let (height, width) = world.size();
    for _ in 0..count {
        let coord = Coord::new(
            rng.gen_range(0..width as i64),
            rng.gen_range(0..height as i64),
        );
        world.activate_cell(coord)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn letter_l() -> Pattern {
        Pattern::new(vec![vec![1, 0], vec![1, 0], vec![1, 1]]).unwrap()
    }

    #[test]
    fn test_invalid_position() {
        let mut world = World::new(4, 4).unwrap();
        let err = Placer::new(&mut world).place(&letter_l(), Coord::new(3, 2)).unwrap_err();
        assert_eq!(
            err,
            LifeError::InvalidPlacement {
                origin: Coord::new(3, 2),
                height: 3,
                width: 2
            }
        );
        assert!(world.is_empty());

        assert!(Placer::new(&mut world).place(&letter_l(), Coord::new(-1, 0)).is_err());
    }

    #[test]
    fn test_overflowing_origin_is_invalid_placement() {
        let mut world = World::new(4, 4).unwrap();
        let pair = Pattern::new(vec![vec![1, 1]]).unwrap();

        for origin in [Coord::new(i64::MAX, 0), Coord::new(0, i64::MAX)] {
            let err = Placer::new(&mut world).place(&letter_l(), origin).unwrap_err();
            assert!(matches!(err, LifeError::InvalidPlacement { .. }));
        }
        let err = Placer::new(&mut world).place(&pair, Coord::new(i64::MAX, 0)).unwrap_err();
        assert_eq!(
            err,
            LifeError::InvalidPlacement {
                origin: Coord::new(i64::MAX, 0),
                height: 1,
                width: 2
            }
        );
        assert!(world.is_empty());
    }

    #[test]
    fn test_put_letter_l() {
        let mut world = World::new(4, 4).unwrap();
        Placer::new(&mut world).place(&letter_l(), Coord::new(2, 1)).unwrap();

        let active = [(2, 1), (2, 2), (2, 3), (3, 3)];
        for (x, y) in active {
            assert!(world.is_cell_live(Coord::new(x, y)).unwrap());
        }
        world.for_each_coordinate(|coord| {
            if !active.contains(&(coord.x, coord.y)) {
                assert!(!world.is_cell_live(coord).unwrap());
            }
        });
    }

    #[test]
    fn test_placement_reproduces_pattern() {
        let glider = crate::game_of_life::io::parse_pattern(".*\n..*\n***").unwrap();
        let mut world = World::new(10, 10).unwrap();
        let origin = Coord::new(4, 5);
        Placer::new(&mut world).place(&glider, origin).unwrap();

        let mut live = world.live_cells();
        live.sort();
        let mut expected: Vec<_> = glider
            .live_offsets()
            .map(|offset| origin.offset(offset.x, offset.y))
            .collect();
        expected.sort();
        assert_eq!(live, expected);
    }

    #[test]
    fn test_seed_random() {
        let mut world = World::new(5, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        seed_random(&mut world, 20, &mut rng).unwrap();
        let population = world.population();
        assert!(population > 0 && population <= 20);
    }
}
