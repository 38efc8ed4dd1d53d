//! Canonical position signature for transposition lookups.
//!
//! Pieces are indistinguishable for search purposes, so the signature is the
//! pair of per-player occupancy bitboards: invariant to piece order and ids,
//! exact (no hash collisions), and as cheap to build as the board itself.
//! Side to move and corner shape are part of the key because negamax scores
//! are relative to the mover and goal corners depend on the shape.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{CornerShape, Piece, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    occupancy: [u64; 2],
    side_to_move: Player,
    shape: CornerShape,
}

impl PositionKey {
    #[inline]
    pub fn new(board: &Board, side_to_move: Player, shape: CornerShape) -> Self {
        Self {
            occupancy: [board.occupancy(Player::A), board.occupancy(Player::B)],
            side_to_move,
            shape,
        }
    }

    /// Same key straight from a piece list; off-board pieces are ignored.
    pub fn from_pieces(pieces: &[Piece], side_to_move: Player, shape: CornerShape) -> Self {
        let mut occupancy = [0u64; 2];
        for piece in pieces.iter().filter(|p| p.position.in_bounds()) {
            occupancy[piece.owner.index()] |= piece.position.bit();
        }
        Self {
            occupancy,
            side_to_move,
            shape,
        }
    }

    #[inline]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::corners_types::Coord;

    #[test]
    fn key_ignores_piece_order_and_ids() {
        let first = vec![
            Piece::new(0, Player::A, Coord::new(1, 1)),
            Piece::new(1, Player::B, Coord::new(6, 6)),
            Piece::new(2, Player::A, Coord::new(2, 3)),
        ];
        let second = vec![
            Piece::new(9, Player::A, Coord::new(2, 3)),
            Piece::new(4, Player::B, Coord::new(6, 6)),
            Piece::new(7, Player::A, Coord::new(1, 1)),
        ];
        let shape = CornerShape::SMALL;

        assert_eq!(
            PositionKey::from_pieces(&first, Player::A, shape),
            PositionKey::from_pieces(&second, Player::A, shape)
        );
        let board = Board::from_pieces(&second).expect("valid");
        assert_eq!(
            PositionKey::new(&board, Player::A, shape),
            PositionKey::from_pieces(&first, Player::A, shape)
        );
    }

    #[test]
    fn key_distinguishes_owner_side_and_shape() {
        let a = vec![Piece::new(0, Player::A, Coord::new(1, 1))];
        let b = vec![Piece::new(0, Player::B, Coord::new(1, 1))];
        let shape = CornerShape::SMALL;

        assert_ne!(
            PositionKey::from_pieces(&a, Player::A, shape),
            PositionKey::from_pieces(&b, Player::A, shape)
        );
        assert_ne!(
            PositionKey::from_pieces(&a, Player::A, shape),
            PositionKey::from_pieces(&a, Player::B, shape)
        );
        assert_ne!(
            PositionKey::from_pieces(&a, Player::A, shape),
            PositionKey::from_pieces(&a, Player::A, CornerShape::LARGE)
        );
    }
}
