use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Player};
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::win_detection::has_won_on_board;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub jumps: usize,
    pub wins: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.jumps += rhs.jumps;
        self.wins += rhs.wins;
    }
}

/// Count leaf positions `depth` plies below `position` with `player` to move.
///
/// Positions where either side has already filled its goal are terminal and
/// are not expanded. `jumps` and `wins` describe the moves made on the last ply.
pub fn perft(position: &Position, player: Player, shape: CornerShape, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let board = position.board();
    if has_won_on_board(board, Player::A, shape) || has_won_on_board(board, Player::B, shape) {
        return PerftCounts::default();
    }

    let mut total = PerftCounts::default();
    for mv in ordered_moves(board, position.pieces(), player) {
        let child = position.apply_generated_move(mv.from(), mv.destination);
        if depth == 1 {
            total.nodes += 1;
            total.jumps += usize::from(mv.is_jump());
            total.wins += usize::from(has_won_on_board(child.board(), player, shape));
        } else {
            total.merge(perft(&child, player.opponent(), shape, depth - 1));
        }
    }

    total
}
