//! Starting piece layouts.

use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Piece, Player};

/// Fill each player's home corner. Player A gets ids `0..area`, player B
/// continues from there; cells are visited row by row.
pub fn initial_pieces(shape: CornerShape) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(shape.area() * 2);
    let mut next_id = 0u16;

    for player in [Player::A, Player::B] {
        for cell in shape.home_region(player).cells() {
            pieces.push(Piece::new(next_id, player, cell));
            next_id += 1;
        }
    }

    pieces
}

pub fn initial_position(shape: CornerShape) -> Position {
    Position::new(initial_pieces(shape)).expect("home corners never overlap on an 8x8 board")
}
