//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, ScoredMove, SearchParams};
use crate::errors::CornersResult;
use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Player};
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::path_finder::find_path;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
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

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumCorners Random"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        player: Player,
        _shape: CornerShape,
        params: &SearchParams,
    ) -> CornersResult<EngineOutput> {
        let moves = ordered_moves(position.board(), position.pieces(), player);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            moves.len()
        ));
        if let Some(depth) = params.max_depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {}", depth));
        }

        out.best_move = moves.choose(&mut self.rng).map(|mv| ScoredMove {
            from: mv.from(),
            to: mv.destination,
            score: mv.quick_score,
            path: find_path(position.board(), mv.from(), mv.destination),
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::initial_layout::initial_position;

    #[test]
    fn random_engine_picks_a_legal_move() {
        let position = initial_position(CornerShape::MEDIUM);
        let mut engine = RandomEngine::seeded(7);
        for _ in 0..20 {
            let out = engine
                .choose_move(&position, Player::B, CornerShape::MEDIUM, &SearchParams::default())
                .expect("random engine never fails");
            let mv = out.best_move.expect("start position has moves");
            assert!(position.apply_move(mv.from, mv.to).is_ok());
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let position = initial_position(CornerShape::SMALL);
        let mut first = RandomEngine::seeded(99);
        let mut second = RandomEngine::seeded(99);
        for _ in 0..5 {
            let params = SearchParams::default();
            let a = first
                .choose_move(&position, Player::A, CornerShape::SMALL, &params)
                .expect("ok");
            let b = second
                .choose_move(&position, Player::A, CornerShape::SMALL, &params)
                .expect("ok");
            assert_eq!(a.best_move, b.best_move);
        }
    }
}
