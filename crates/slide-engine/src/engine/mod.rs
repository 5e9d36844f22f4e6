//! Engine module: rectangular tile grid, in-place slide/merge moves, the
//! no-moves-left check and random tile spawning.
//!
//! - `Grid` owns the cells and exposes method forms of the operations.
//! - Free functions mirror the methods when convenient (e.g., `apply_move`).
//! - Nothing here does I/O; callers own input, rendering and the RNG.

mod ops;
pub mod spawn;
pub mod state;

pub use spawn::{SpawnPool, spawn_random_tile};
pub use state::{Grid, MAX_TILE, Move, Tile};

pub use ops::{apply_move, count_empty, has_valid_moves, highest_tile};
