//! Recovers a concrete landing sequence for a move, for animation and replay.

use tracing::warn;

use crate::game_state::board::Board;
use crate::game_state::corners_types::{Coord, DIRECTIONS};
use crate::move_generation::destinations::jump_landing;

/// Ordered cells visited when moving from `from` to `to`, both included.
///
/// Steps yield `[from, to]`. Jump chains are traced with the same DFS order
/// and visited rule as `valid_destinations`, so every destination it reports
/// has a path here. If no chain is found the degenerate `[from, to]` is
/// returned and a warning is logged: that means the two disagree, or one end
/// lies off the board.
pub fn find_path(board: &Board, from: Coord, to: Coord) -> Vec<Coord> {
    if !from.in_bounds() || !to.in_bounds() {
        warn!(%from, %to, "move leaves the board; using direct path");
        return vec![from, to];
    }
    if from.is_adjacent(to) {
        return vec![from, to];
    }

    let mut path = vec![from];
    let mut visited = from.bit();
    if trace_jumps(board, to, &mut path, &mut visited) {
        return path;
    }

    warn!(%from, %to, "no jump chain reaches destination; using direct path");
    vec![from, to]
}

fn trace_jumps(board: &Board, to: Coord, path: &mut Vec<Coord>, visited: &mut u64) -> bool {
    let Some(&at) = path.last() else {
        return false;
    };

    for dir in DIRECTIONS {
        let Some(landing) = jump_landing(board, at, dir) else {
            continue;
        };
        if *visited & landing.bit() != 0 {
            continue;
        }
        *visited |= landing.bit();
        path.push(landing);
        if landing == to || trace_jumps(board, to, path, visited) {
            return true;
        }
        path.pop();
    }

    false
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::game_state::corners_types::{Piece, Player};
    use crate::move_generation::destinations::valid_destinations;

    fn board_with(cells: &[(i8, i8)]) -> Board {
        let pieces: Vec<Piece> = cells
            .iter()
            .enumerate()
            .map(|(i, &(r, c))| Piece::new(i as u16, Player::A, Coord::new(r, c)))
            .collect();
        Board::from_pieces(&pieces).expect("test board should be valid")
    }

    fn assert_path_is_legal(board: &Board, path: &[Coord], from: Coord, to: Coord) {
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        if path.len() == 2 && from.is_adjacent(to) {
            return;
        }
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.manhattan(b), 2, "hop {a} -> {b} is not a jump");
            assert!(a.row == b.row || a.col == b.col, "hop {a} -> {b} is diagonal");
            let over = Coord::new((a.row + b.row) / 2, (a.col + b.col) / 2);
            assert!(board.is_occupied(over), "hop {a} -> {b} jumps an empty cell");
            assert!(board.is_empty(b), "hop {a} -> {b} lands on a piece");
        }
    }

    #[test]
    fn step_path_is_two_points() {
        let board = board_with(&[(3, 3)]);
        assert_eq!(
            find_path(&board, Coord::new(3, 3), Coord::new(2, 3)),
            vec![Coord::new(3, 3), Coord::new(2, 3)]
        );
    }

    #[test]
    fn single_jump_path() {
        let board = board_with(&[(3, 3), (3, 4)]);
        assert_eq!(
            find_path(&board, Coord::new(3, 3), Coord::new(3, 5)),
            vec![Coord::new(3, 3), Coord::new(3, 5)]
        );
    }

    #[test]
    fn chained_jump_path_lists_every_landing() {
        let board = board_with(&[(3, 3), (3, 4), (3, 6)]);
        assert_eq!(
            find_path(&board, Coord::new(3, 3), Coord::new(3, 7)),
            vec![Coord::new(3, 3), Coord::new(3, 5), Coord::new(3, 7)]
        );
    }

    #[test]
    fn unreachable_target_falls_back_to_direct_path() {
        let board = board_with(&[(0, 0)]);
        assert_eq!(
            find_path(&board, Coord::new(0, 0), Coord::new(5, 5)),
            vec![Coord::new(0, 0), Coord::new(5, 5)]
        );
    }

    #[test]
    fn off_board_endpoints_fall_back_to_direct_path() {
        let board = board_with(&[(7, 7), (6, 7)]);
        assert_eq!(
            find_path(&board, Coord::new(8, 8), Coord::new(6, 6)),
            vec![Coord::new(8, 8), Coord::new(6, 6)]
        );
        assert_eq!(
            find_path(&board, Coord::new(7, 7), Coord::new(7, 9)),
            vec![Coord::new(7, 7), Coord::new(7, 9)]
        );
        assert_eq!(
            find_path(&board, Coord::new(-1, 0), Coord::new(0, 0)),
            vec![Coord::new(-1, 0), Coord::new(0, 0)]
        );
    }

    #[test]
    fn every_destination_has_a_traceable_path() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);

        for _ in 0..200 {
            let mut occupied = 0u64;
            let mut cells = Vec::new();
            let count = rng.random_range(2..=24);
            while cells.len() < count {
                let idx = rng.random_range(0..64usize);
                if occupied & (1u64 << idx) == 0 {
                    occupied |= 1u64 << idx;
                    let c = Coord::from_index(idx);
                    cells.push((c.row, c.col));
                }
            }
            let board = board_with(&cells);

            for &(r, c) in &cells {
                let from = Coord::new(r, c);
                for to in valid_destinations(&board, from) {
                    let path = find_path(&board, from, to);
                    assert_path_is_legal(&board, &path, from, to);
                }
            }
        }
    }
}
