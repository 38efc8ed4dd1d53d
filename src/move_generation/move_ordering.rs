//! Cheap move pre-scoring used to order search branches.
//!
//! The quick score only biases the order in which alpha-beta visits moves;
//! it is never used as a position score.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{Coord, Piece, Player};
use crate::move_generation::destinations::{is_jump_move, valid_destinations};

const PROGRESS_WEIGHT: i32 = 10;
const JUMP_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMove {
    pub piece: Piece,
    pub destination: Coord,
    pub quick_score: i32,
}

impl OrderedMove {
    #[inline]
    pub fn from(&self) -> Coord {
        self.piece.position
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        is_jump_move(self.piece.position, self.destination)
    }
}

/// Progress toward the mover's far corner, plus a flat bonus for jumps.
#[inline]
pub fn quick_score(player: Player, from: Coord, to: Coord) -> i32 {
    let corner = player.target_corner();
    let progress = from.manhattan(corner) - to.manhattan(corner);
    let bonus = if is_jump_move(from, to) { JUMP_BONUS } else { 0 };
    PROGRESS_WEIGHT * progress + bonus
}

/// All moves for `player`, best quick score first.
///
/// The sort is stable, so ties keep piece-list order and then destination
/// generation order, which makes the ordering fully deterministic.
pub fn ordered_moves(board: &Board, pieces: &[Piece], player: Player) -> Vec<OrderedMove> {
    let mut moves = Vec::new();

    for piece in pieces.iter().filter(|p| p.owner == player) {
        for destination in valid_destinations(board, piece.position) {
            moves.push(OrderedMove {
                piece: *piece,
                destination,
                quick_score: quick_score(player, piece.position, destination),
            });
        }
    }

    moves.sort_by(|a, b| b.quick_score.cmp(&a.quick_score));
    moves
}

/// Stops at the first piece of `player` that has somewhere to go.
pub fn any_legal_move(board: &Board, pieces: &[Piece], player: Player) -> bool {
    pieces
        .iter()
        .filter(|p| p.owner == player)
        .any(|p| !valid_destinations(board, p.position).is_empty())
}
