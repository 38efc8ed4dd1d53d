//! Terminal-oriented board renderer.
//!
//! Creates a human-readable board view from the occupancy bitboards for
//! debugging, tests, and diagnostics in text environments. Row 0 is printed
//! first; goal cells for `shape` are shown with `+` when empty.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{Coord, CornerShape, Player, BOARD_SIZE};

pub fn render_board(board: &Board, shape: CornerShape) -> String {
    let goals = shape.goal_region(Player::A).mask() | shape.goal_region(Player::B).mask();
    let header: String = (0..BOARD_SIZE)
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str("  ");
    out.push_str(&header);
    out.push('\n');

    for row in 0..BOARD_SIZE {
        out.push_str(&row.to_string());
        out.push(' ');

        for col in 0..BOARD_SIZE {
            let cell = Coord::new(row, col);
            let ch = match board.get(cell) {
                Some(Player::A) => 'A',
                Some(Player::B) => 'B',
                None if goals & cell.bit() != 0 => '+',
                None => '·',
            };
            out.push(ch);
            if col < BOARD_SIZE - 1 {
                out.push(' ');
            }
        }

        out.push('\n');
    }

    out
}
