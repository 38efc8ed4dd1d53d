//! Entry points for the surrounding application.
//!
//! Thin wrappers over the move generator, path finder, win detector and
//! evaluator. Move search goes through an owned [`IterativeEngine`]
//! (`find_best_move` / `clear_search_cache`), or a [`SearchWorker`] when the
//! caller must not block.

use crate::game_state::board::Board;
use crate::game_state::corners_types::{Coord, CornerShape, Piece, Player};
use crate::move_generation::{destinations, path_finder, win_detection};
use crate::search::board_scoring::{evaluate, EvalWeights};

pub use crate::engines::difficulty::{Difficulty, DifficultyConfig};
pub use crate::engines::engine_iterative::IterativeEngine;
pub use crate::engines::engine_trait::ScoredMove;
pub use crate::engines::engine_worker::SearchWorker;

pub fn compute_valid_destinations(board: &Board, piece_position: Coord) -> Vec<Coord> {
    destinations::valid_destinations(board, piece_position)
}

pub fn find_path(board: &Board, from: Coord, to: Coord) -> Vec<Coord> {
    path_finder::find_path(board, from, to)
}

pub fn has_player_won(pieces: &[Piece], player: Player, shape: CornerShape) -> bool {
    win_detection::has_won(pieces, player, shape)
}

/// Heuristic score for `player` with default weights. The corner shape is
/// inferred from the piece counts.
pub fn evaluate_position(board: &Board, pieces: &[Piece], player: Player) -> i32 {
    evaluate(
        board,
        pieces,
        player,
        CornerShape::infer(pieces),
        &EvalWeights::default(),
    )
}
