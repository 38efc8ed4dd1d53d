//! Step and jump-chain destination generation.
//!
//! A piece may step to any empty orthogonal neighbour, or perform a chain of
//! jumps: each jump passes over an occupied orthogonal neighbour (either
//! colour) and lands on the empty cell directly behind it. Chains are explored
//! depth-first with a visited mask, so a cell is reached at most once per move
//! and jump cycles terminate.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{Coord, DIRECTIONS};

/// Landing cell of a single jump from `at` in direction `(d_row, d_col)`.
#[inline]
pub fn jump_landing(board: &Board, at: Coord, (d_row, d_col): (i8, i8)) -> Option<Coord> {
    let over = at.offset(d_row, d_col)?;
    let landing = at.offset(2 * d_row, 2 * d_col)?;
    (board.is_occupied(over) && board.is_empty(landing)).then_some(landing)
}

/// Every cell the piece on `from` can end its move on.
///
/// Steps come first (in `DIRECTIONS` order), then jump landings in DFS
/// discovery order. The result never contains `from` and has no duplicates.
/// An off-board `from` has no destinations.
pub fn valid_destinations(board: &Board, from: Coord) -> Vec<Coord> {
    if !from.in_bounds() {
        return Vec::new();
    }
    let mut destinations = Vec::with_capacity(16);

    for (d_row, d_col) in DIRECTIONS {
        if let Some(next) = from.offset(d_row, d_col) {
            if board.is_empty(next) {
                destinations.push(next);
            }
        }
    }

    // Landings keep the origin's colour parity, so they never repeat a step.
    let mut visited = from.bit();
    collect_jumps(board, from, &mut visited, &mut destinations);
    destinations
}

fn collect_jumps(board: &Board, at: Coord, visited: &mut u64, out: &mut Vec<Coord>) {
    for dir in DIRECTIONS {
        let Some(landing) = jump_landing(board, at, dir) else {
            continue;
        };
        if *visited & landing.bit() != 0 {
            continue;
        }
        *visited |= landing.bit();
        out.push(landing);
        collect_jumps(board, landing, visited, out);
    }
}

/// A move covering more than one cell can only be a jump chain.
#[inline]
pub fn is_jump_move(from: Coord, to: Coord) -> bool {
    from.manhattan(to) > 1
}
