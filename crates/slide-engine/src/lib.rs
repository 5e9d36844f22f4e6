//! Core of the sliding-tile merge puzzle: grid, moves, spawning and the
//! game-over check.

pub mod engine;

pub use engine::{Grid, Move, SpawnPool, Tile};
