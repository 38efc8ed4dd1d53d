//! Goal-corner win detection.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{CornerShape, Piece, Player};

/// True when every cell of `player`'s goal corner holds one of its pieces.
pub fn has_won(pieces: &[Piece], player: Player, shape: CornerShape) -> bool {
    let own = pieces
        .iter()
        .filter(|p| p.owner == player && p.position.in_bounds())
        .fold(0u64, |acc, p| acc | p.position.bit());
    let goal = shape.goal_region(player).mask();
    own & goal == goal
}

/// Board-based variant used inside the search, where occupancy is already at hand.
#[inline]
pub fn has_won_on_board(board: &Board, player: Player, shape: CornerShape) -> bool {
    let goal = shape.goal_region(player).mask();
    board.occupancy(player) & goal == goal
}

/// The winning side, if any. Player A is reported first when both sides
/// complete their goals in the same position.
pub fn winner(pieces: &[Piece], shape: CornerShape) -> Option<Player> {
    [Player::A, Player::B]
        .into_iter()
        .find(|&p| has_won(pieces, p, shape))
}
