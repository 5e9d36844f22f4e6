use super::state::{Grid, MAX_TILE, Move, Tile};

/// Slide/merge tiles in the given direction, in place. No randomness.
pub fn apply_move(grid: &mut Grid, direction: Move) {
    let (lanes, len) = lane_shape(grid, direction);
    let mut line = Vec::with_capacity(len);
    for lane in 0..lanes {
        line.clear();
        for pos in 0..len {
            line.push(lane_index(grid, direction, lane, pos));
        }
        push_lane(grid.cells_mut(), &line);
    }
}

/// True if any cell is empty or has an equal orthogonal neighbour.
pub fn has_valid_moves(grid: &Grid) -> bool {
    let (w, h) = (grid.width(), grid.height());
    for y in 0..h {
        for x in 0..w {
            let cell = grid.get(x, y);
            if cell == 0 {
                return true;
            }
            // right and down cover every adjacent pair once
            if x + 1 < w && grid.get(x + 1, y) == cell {
                return true;
            }
            if y + 1 < h && grid.get(x, y + 1) == cell {
                return true;
            }
        }
    }
    false
}

/// Count the number of empty cells.
pub fn count_empty(grid: &Grid) -> usize {
    grid.cells().iter().filter(|&&v| v == 0).count()
}

pub fn highest_tile(grid: &Grid) -> Tile {
    grid.cells().iter().copied().max().unwrap_or(0)
}

/// Number of lanes and cells per lane for a move direction.
fn lane_shape(grid: &Grid, direction: Move) -> (usize, usize) {
    match direction {
        Move::Left | Move::Right => (grid.height(), grid.width()),
        Move::Up | Move::Down => (grid.width(), grid.height()),
    }
}

/// Backing index of `pos` within `lane`, counted from the destination edge.
fn lane_index(grid: &Grid, direction: Move, lane: usize, pos: usize) -> usize {
    let (w, h) = (grid.width(), grid.height());
    match direction {
        Move::Left => grid.index(pos, lane),
        Move::Right => grid.index(w - 1 - pos, lane),
        Move::Up => grid.index(lane, pos),
        Move::Down => grid.index(lane, h - 1 - pos),
    }
}

/// Push every tile of one lane toward `line[0]`.
///
/// Sources are visited once each, edge-first. A cell that received a merge can
/// still be the target of a later source.
fn push_lane(cells: &mut [Tile], line: &[usize]) {
    for source in 1..line.len() {
        if cells[line[source]] == 0 {
            continue;
        }
        for target in (0..source).rev() {
            let done = push_cell(
                cells,
                line[source],
                line[target],
                line[target + 1],
                target == 0,
            );
            if done {
                break;
            }
        }
    }
}

/// One search step for the tile at `current` against `target`.
///
/// `previous` is the cell just behind `target` on the way back to `current`.
/// Returns true once the tile has settled.
fn push_cell(
    cells: &mut [Tile],
    current: usize,
    target: usize,
    previous: usize,
    at_edge: bool,
) -> bool {
    let value = cells[current];
    let found = cells[target];
    if found == 0 {
        if at_edge {
            cells.swap(current, target);
            return true;
        }
        return false;
    }
    if found != value {
        cells.swap(current, previous);
        return true;
    }
    assert!(value <= MAX_TILE / 2, "merging {value}s would exceed the tile ceiling");
    cells[target] = 2 * value;
    cells[current] = 0;
    true
}

pub(crate) fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("    "),
        x => format!("{x:<4}"),
    }
}
