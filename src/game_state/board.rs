//! Board occupancy and value-semantic positions.
//!
//! The piece list is the authoritative game state. `Board` is an occupancy
//! view derived from it (one bitboard per player) and is never edited on its
//! own. `Position` bundles the two and hands out fresh copies on every move,
//! so a search can never mutate the caller's pieces.

use crate::errors::{CornersError, CornersResult};
use crate::game_state::corners_types::{Coord, Piece, Player, BOARD_SIZE};
use crate::move_generation::destinations::valid_destinations;

const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// 8x8 occupancy grid stored as one bitboard per player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    occupancy_by_player: [u64; 2],
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            occupancy_by_player: [0; 2],
        }
    }

    /// Build the occupancy grid for `pieces`.
    ///
    /// Fails on the first piece that is off the board or that lands on a cell
    /// already claimed by an earlier piece.
    pub fn from_pieces(pieces: &[Piece]) -> CornersResult<Self> {
        let mut board = Board::empty();
        let mut owner_ids: [Option<u16>; CELL_COUNT] = [None; CELL_COUNT];

        for piece in pieces {
            let at = piece.position;
            if !at.in_bounds() {
                return Err(CornersError::OutOfBounds { id: piece.id, at });
            }
            if let Some(first) = owner_ids[at.index()] {
                return Err(CornersError::CellOccupied {
                    first,
                    second: piece.id,
                    at,
                });
            }
            owner_ids[at.index()] = Some(piece.id);
            board.place(piece.owner, at);
        }

        Ok(board)
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Player> {
        if !coord.in_bounds() {
            return None;
        }
        let bit = coord.bit();
        if self.occupancy_by_player[Player::A.index()] & bit != 0 {
            Some(Player::A)
        } else if self.occupancy_by_player[Player::B.index()] & bit != 0 {
            Some(Player::B)
        } else {
            None
        }
    }

    /// True for in-bounds cells holding no piece.
    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.occupied() & coord.bit() == 0
    }

    #[inline]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.occupied() & coord.bit() != 0
    }

    #[inline]
    pub const fn occupied(&self) -> u64 {
        self.occupancy_by_player[0] | self.occupancy_by_player[1]
    }

    #[inline]
    pub const fn occupancy(&self, player: Player) -> u64 {
        self.occupancy_by_player[player.index()]
    }

    #[inline]
    fn place(&mut self, player: Player, coord: Coord) {
        self.occupancy_by_player[player.index()] |= coord.bit();
    }

    #[inline]
    fn lift(&mut self, player: Player, coord: Coord) {
        self.occupancy_by_player[player.index()] &= !coord.bit();
    }
}

/// Full piece list plus its derived board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pieces: Vec<Piece>,
    board: Board,
}

impl Position {
    pub fn new(pieces: Vec<Piece>) -> CornersResult<Self> {
        let board = Board::from_pieces(&pieces)?;
        Ok(Self { pieces, board })
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.position == coord)
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.owner == player)
    }

    /// Move the piece on `from` to `to`, checking that the destination is
    /// reachable under the step/jump rules.
    pub fn apply_move(&self, from: Coord, to: Coord) -> CornersResult<Position> {
        if self.piece_at(from).is_none() {
            return Err(CornersError::NoPieceAt(from));
        }
        if !valid_destinations(&self.board, from).contains(&to) {
            return Err(CornersError::IllegalMove { from, to });
        }
        Ok(self.apply_generated_move(from, to))
    }

    /// Same as `apply_move` for moves that came out of the move generator.
    pub(crate) fn apply_generated_move(&self, from: Coord, to: Coord) -> Position {
        let mut next = self.clone();
        if let Some(piece) = next.pieces.iter_mut().find(|p| p.position == from) {
            let owner = piece.owner;
            piece.position = to;
            next.board.lift(owner, from);
            next.board.place(owner, to);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(id: u16, owner: Player, row: i8, col: i8) -> Piece {
        Piece::new(id, owner, Coord::new(row, col))
    }

    #[test]
    fn board_reflects_piece_owners() {
        let board = Board::from_pieces(&[piece(0, Player::A, 0, 0), piece(1, Player::B, 7, 7)])
            .expect("valid pieces");

        assert_eq!(board.get(Coord::new(0, 0)), Some(Player::A));
        assert_eq!(board.get(Coord::new(7, 7)), Some(Player::B));
        assert_eq!(board.get(Coord::new(3, 3)), None);
        assert!(board.is_empty(Coord::new(3, 3)));
        assert!(!board.is_empty(Coord::new(8, 0)));
        assert_eq!(board.occupied().count_ones(), 2);
    }

    #[test]
    fn out_of_bounds_piece_fails_fast() {
        let err = Board::from_pieces(&[piece(4, Player::A, 8, 0)]).expect_err("must fail");
        assert_eq!(
            err,
            CornersError::OutOfBounds {
                id: 4,
                at: Coord::new(8, 0)
            }
        );
    }

    #[test]
    fn doubled_cell_fails_fast() {
        let err = Board::from_pieces(&[piece(1, Player::A, 2, 2), piece(2, Player::B, 2, 2)])
            .expect_err("must fail");
        assert_eq!(
            err,
            CornersError::CellOccupied {
                first: 1,
                second: 2,
                at: Coord::new(2, 2)
            }
        );
    }

    #[test]
    fn apply_move_returns_independent_copy() {
        let original =
            Position::new(vec![piece(0, Player::A, 3, 3), piece(1, Player::B, 3, 4)]).expect("valid");
        let next = original
            .apply_move(Coord::new(3, 3), Coord::new(3, 5))
            .expect("jump is legal");

        assert_eq!(original.pieces()[0].position, Coord::new(3, 3));
        assert_eq!(next.pieces()[0].position, Coord::new(3, 5));
        assert_eq!(next.pieces()[0].id, 0);
        assert!(next.board().is_empty(Coord::new(3, 3)));
        assert_eq!(next.board().get(Coord::new(3, 5)), Some(Player::A));
        assert_eq!(Board::from_pieces(next.pieces()).expect("valid"), *next.board());
    }

    #[test]
    fn apply_move_rejects_illegal_destinations() {
        let position = Position::new(vec![piece(0, Player::A, 3, 3)]).expect("valid");

        assert_eq!(
            position.apply_move(Coord::new(3, 3), Coord::new(4, 4)),
            Err(CornersError::IllegalMove {
                from: Coord::new(3, 3),
                to: Coord::new(4, 4)
            })
        );
        assert_eq!(
            position.apply_move(Coord::new(0, 0), Coord::new(0, 1)),
            Err(CornersError::NoPieceAt(Coord::new(0, 0)))
        );
    }
}
