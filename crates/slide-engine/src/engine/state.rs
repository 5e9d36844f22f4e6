use rand::Rng;
use std::fmt;

use super::ops;
use super::spawn::{self, SpawnPool};
use serde::{Deserialize, Serialize};

/// Value stored in a cell. `0` is empty, anything else is a tile.
pub type Tile = u64;

/// Largest tile a grid can hold. Merging two of these panics.
pub const MAX_TILE: Tile = 1 << 63;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Rectangular row-major grid of tiles.
///
/// Dimensions are fixed at creation and must both be at least 1. Accessors
/// panic on out-of-range coordinates: callers own the bounds contract.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Create an empty `width × height` grid.
    ///
    /// ```
    /// use slide_engine::engine::Grid;
    /// let g = Grid::new(4, 3);
    /// assert_eq!(g.count_empty(), 12);
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_cells(width, height, vec![0; width * height])
    }

    /// Build a grid from row-major cell values.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Tile>) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be positive");
        assert_eq!(
            cells.len(),
            width * height,
            "cell buffer must hold width*height values"
        );
        Grid {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Backing index for cell (x, y).
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Tile) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width)
    }

    /// Slide/merge tiles in `dir` in place. No randomness.
    ///
    /// ```
    /// use slide_engine::engine::{Grid, Move};
    /// let mut g = Grid::from_cells(4, 1, vec![0, 2, 2, 0]);
    /// g.apply_move(Move::Left);
    /// assert_eq!(g.cells(), &[4, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn apply_move(&mut self, dir: Move) {
        ops::apply_move(self, dir)
    }

    /// Return true if some move could still change the grid.
    #[inline]
    pub fn has_valid_moves(&self) -> bool {
        ops::has_valid_moves(self)
    }

    /// Place one value from `pool` into a random empty cell, using the provided RNG.
    ///
    /// ```
    /// use slide_engine::engine::{Grid, SpawnPool};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut g = Grid::new(3, 3);
    /// g.spawn_random_tile(&SpawnPool::default(), &mut rng);
    /// assert_eq!(g.count_empty(), 8);
    /// ```
    #[inline]
    pub fn spawn_random_tile<R: Rng + ?Sized>(&mut self, pool: &SpawnPool, rng: &mut R) {
        spawn::spawn_random_tile(self, pool, rng)
    }

    /// Count the number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    #[inline]
    pub fn contains(&self, value: Tile) -> bool {
        self.cells.contains(&value)
    }

    /// Highest tile value on the grid, 0 when empty.
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        ops::highest_tile(self)
    }

    /// Sum of all tile values. Moves never change it.
    #[inline]
    pub fn tile_sum(&self) -> Tile {
        self.cells.iter().sum()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{}, {:?})", self.width, self.height, self.cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(ops::format_val).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
