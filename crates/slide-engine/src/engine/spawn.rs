use log::warn;
use rand::Rng;

use super::state::{Grid, Tile};

/// Values eligible for a newly spawned tile.
///
/// Never empty; every value is a positive power of two. Repeating a value
/// weights the uniform draw toward it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPool(Vec<Tile>);

impl SpawnPool {
    /// Returns `None` for an empty pool or a value that is not a power of two.
    pub fn new(values: Vec<Tile>) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| !v.is_power_of_two()) {
            return None;
        }
        Some(SpawnPool(values))
    }

    pub fn values(&self) -> &[Tile] {
        &self.0
    }

    pub(crate) fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        self.0[rng.gen_range(0..self.0.len())]
    }
}

impl Default for SpawnPool {
    fn default() -> Self {
        SpawnPool(vec![2, 4])
    }
}

/// Put a value from `pool` into a uniformly chosen empty cell.
///
/// Draws a rank `k` in `1..=empty` and then walks the grid row-major to the
/// k-th empty cell, so a seeded RNG reproduces the same placements. Full grid
/// is a no-op.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &mut Grid, pool: &SpawnPool, rng: &mut R) {
    let empty = grid.count_empty();
    if empty == 0 {
        return;
    }
    let mut remaining = rng.gen_range(1..=empty);
    let cells = grid.cells_mut();
    for cell in cells.iter_mut() {
        if *cell == 0 {
            remaining -= 1;
            if remaining == 0 {
                *cell = pool.pick(rng);
                return;
            }
        }
    }
    warn!("scanned every cell without reaching the chosen empty slot ({remaining} left)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn fills_the_only_empty_cell() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = Grid::from_cells(3, 1, vec![2, 0, 4]);
            spawn_random_tile(&mut g, &SpawnPool::default(), &mut rng);
            assert_eq!(g.get(0, 0), 2);
            assert_eq!(g.get(2, 0), 4);
            assert!(matches!(g.get(1, 0), 2 | 4));
        }
    }

    #[test]
    fn full_grid_is_left_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = Grid::from_cells(2, 2, vec![2, 4, 8, 16]);
        let before = g.clone();
        spawn_random_tile(&mut g, &SpawnPool::default(), &mut rng);
        assert_eq!(g, before);
        spawn_random_tile(&mut g, &SpawnPool::default(), &mut rng);
        assert_eq!(g, before);
    }

    #[test]
    fn same_seed_same_placement() {
        let pool = SpawnPool::default();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = Grid::new(4, 4);
            for _ in 0..5 {
                spawn_random_tile(&mut g, &pool, &mut rng);
            }
            g
        };
        assert_eq!(run(42), run(42));
        assert_eq!(run(42).count_empty(), 11);
    }

    #[test]
    fn fills_grid_one_cell_at_a_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = SpawnPool::new(vec![8]).unwrap();
        let mut g = Grid::new(3, 2);
        for expected_empty in (0..6).rev() {
            spawn_random_tile(&mut g, &pool, &mut rng);
            assert_eq!(g.count_empty(), expected_empty);
        }
        assert!(g.cells().iter().all(|&v| v == 8));
    }

    #[test]
    fn every_empty_cell_is_reachable() {
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = Grid::new(4, 1);
            spawn_random_tile(&mut g, &SpawnPool::default(), &mut rng);
            let idx = g.cells().iter().position(|&v| v != 0).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn pool_rejects_bad_values() {
        assert!(SpawnPool::new(vec![]).is_none());
        assert!(SpawnPool::new(vec![2, 3]).is_none());
        assert!(SpawnPool::new(vec![0]).is_none());
        assert_eq!(SpawnPool::new(vec![2, 2, 4]).unwrap().values(), &[2, 2, 4]);
    }
}
