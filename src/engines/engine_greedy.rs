//! One-ply greedy engine: plays the move with the best quick score, breaking
//! ties at random.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, ScoredMove, SearchParams};
use crate::errors::CornersResult;
use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Player};
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::path_finder::find_path;
use crate::move_generation::win_detection::has_won_on_board;

/// Bonus that makes an immediately winning move outrank any quick score.
const WINNING_MOVE_BONUS: i32 = 1_000_000;

pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "PlumCorners Greedy"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        player: Player,
        shape: CornerShape,
        params: &SearchParams,
    ) -> CornersResult<EngineOutput> {
        let moves = ordered_moves(position.board(), position.pieces(), player);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            moves.len()
        ));
        if let Some(depth) = params.max_depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {}", depth));
        }

        if moves.is_empty() {
            return Ok(out);
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for mv in &moves {
            let wins = has_won_on_board(
                position
                    .apply_generated_move(mv.from(), mv.destination)
                    .board(),
                player,
                shape,
            );
            let value = mv.quick_score + if wins { WINNING_MOVE_BONUS } else { 0 };

            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        out.info_lines.push(format!(
            "info string greedy_engine quick_score {}",
            best_value
        ));
        out.best_move = best_moves.choose(&mut self.rng).map(|mv| ScoredMove {
            from: mv.from(),
            to: mv.destination,
            score: best_value,
            path: find_path(position.board(), mv.from(), mv.destination),
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::corners_types::{Coord, Piece};
    use crate::game_state::initial_layout::initial_position;

    #[test]
    fn greedy_engine_takes_the_longest_jump() {
        let position = initial_position(CornerShape::SMALL);
        let mut engine = GreedyEngine::seeded(1);
        let out = engine
            .choose_move(&position, Player::A, CornerShape::SMALL, &SearchParams::default())
            .expect("greedy engine never fails");
        let mv = out.best_move.expect("start position has moves");
        // Jumps out of the 3x3 camp gain two cells plus the jump bonus.
        assert_eq!(mv.score, 30);
        assert_eq!(mv.from.manhattan(mv.to), 2);
    }

    #[test]
    fn greedy_engine_prefers_a_winning_move() {
        let shape = CornerShape::SMALL;
        let mut pieces: Vec<Piece> = shape
            .goal_region(Player::A)
            .cells()
            .filter(|c| *c != Coord::new(5, 5))
            .enumerate()
            .map(|(i, c)| Piece::new(i as u16, Player::A, c))
            .collect();
        // Stepping (5,4) -> (5,5) wins; a jump elsewhere would score higher on quick score.
        pieces.push(Piece::new(8, Player::A, Coord::new(5, 4)));
        pieces.push(Piece::new(9, Player::A, Coord::new(2, 2)));
        pieces.push(Piece::new(10, Player::B, Coord::new(2, 3)));
        let position = Position::new(pieces).expect("valid");

        let mut engine = GreedyEngine::seeded(3);
        let out = engine
            .choose_move(&position, Player::A, shape, &SearchParams::default())
            .expect("ok");
        let mv = out.best_move.expect("moves exist");
        assert_eq!((mv.from, mv.to), (Coord::new(5, 4), Coord::new(5, 5)));
    }
}
