use std::collections::BTreeSet;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use slide_engine::engine::{self, Grid, Move, SpawnPool, Tile};

/// Inputs needed to start a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub pool: SpawnPool,
    pub spawn_on_noop: bool,
}

/// Result of one move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// The move itself changed the grid.
    pub moved: bool,
    /// A spawn was attempted; it places nothing on a full grid.
    pub spawned: bool,
    pub game_over: bool,
}

/// One game: the grid plus everything that changes across moves.
pub struct Session {
    grid: Grid,
    pool: SpawnPool,
    rng: StdRng,
    spawn_on_noop: bool,
    history: BTreeSet<Tile>,
    high_score: Tile,
    steps: u64,
}

impl Session {
    /// Empty grid seeded with one spawned tile.
    pub fn new(opts: SessionOptions) -> Self {
        let rng = StdRng::seed_from_u64(opts.seed);
        let mut session = Self::from_grid(
            Grid::new(opts.width, opts.height),
            opts.pool,
            rng,
            opts.spawn_on_noop,
        );
        session.grid.spawn_random_tile(&session.pool, &mut session.rng);
        session.record_history();
        session
    }

    /// Resume from an existing grid without spawning.
    pub fn from_grid(grid: Grid, pool: SpawnPool, rng: StdRng, spawn_on_noop: bool) -> Self {
        let mut session = Session {
            grid,
            pool,
            rng,
            spawn_on_noop,
            history: BTreeSet::new(),
            high_score: 0,
            steps: 0,
        };
        session.record_history();
        session
    }

    /// Move, spawn, then check for remaining moves.
    pub fn step(&mut self, dir: Move) -> StepResult {
        let before = self.grid.clone();
        engine::apply_move(&mut self.grid, dir);
        let moved = self.grid != before;
        self.steps += 1;
        let result = self.settle(moved);
        debug!(
            "step {} {:?}: moved={} spawned={} highest={} game_over={}",
            self.steps, dir, result.moved, result.spawned, self.high_score, result.game_over
        );
        result
    }

    /// A turn with no move, such as a declined quit: spawn as for a no-op
    /// move, then check for remaining moves.
    pub fn pass(&mut self) -> StepResult {
        let result = self.settle(false);
        debug!(
            "pass: spawned={} game_over={}",
            result.spawned, result.game_over
        );
        result
    }

    fn settle(&mut self, moved: bool) -> StepResult {
        // the header shows the grid as it was before this turn's spawn
        self.record_history();
        let spawned = moved || self.spawn_on_noop;
        if spawned {
            engine::spawn_random_tile(&mut self.grid, &self.pool, &mut self.rng);
        }
        StepResult {
            moved,
            spawned,
            game_over: !engine::has_valid_moves(&self.grid),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every tile value seen so far, ascending.
    pub fn history(&self) -> impl Iterator<Item = Tile> + '_ {
        self.history.iter().copied()
    }

    /// Highest tile as of the last history update.
    pub fn high_score(&self) -> Tile {
        self.high_score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn record_history(&mut self) {
        self.history
            .extend(self.grid.cells().iter().copied().filter(|&v| v != 0));
        self.high_score = self.grid.highest_tile();
    }
}
