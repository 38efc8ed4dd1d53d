//! Iterative-deepening heuristic-search engine.
//!
//! Owns the transposition table across calls so consecutive searches in one
//! game reuse earlier work. The table is cleared explicitly through
//! `clear_search_cache`/`new_game`, and implicitly whenever the corner shape
//! or piece count differs from the previous call.

use tracing::{debug, info};

use crate::engines::difficulty::DifficultyConfig;
use crate::engines::engine_trait::{Engine, EngineOutput, ScoredMove, SearchParams};
use crate::errors::CornersResult;
use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Move, Piece, Player};
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::path_finder::find_path;
use crate::search::board_scoring::{EvalWeights, HeuristicScorer};
use crate::search::iterative_deepening::{
    iterative_deepening_search_with_tt, principal_variation_from_tt, PrincipalVariation,
    SearchConfig, SearchResult,
};
use crate::search::transposition_table::TranspositionTable;

pub struct IterativeEngine {
    default_depth: u8,
    scorer: HeuristicScorer,
    tt: TranspositionTable,
    cache_scope: Option<(CornerShape, usize)>,
    last_result: Option<SearchResult>,
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new(DifficultyConfig::default().max_depth)
    }
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::with_weights(default_depth, EvalWeights::default())
    }

    pub fn with_weights(default_depth: u8, weights: EvalWeights) -> Self {
        Self {
            default_depth,
            scorer: HeuristicScorer::new(weights),
            tt: TranspositionTable::default(),
            cache_scope: None,
            last_result: None,
        }
    }

    pub fn with_tt_capacity(mut self, capacity: usize) -> Self {
        self.tt = TranspositionTable::with_capacity(capacity);
        self
    }

    /// Best move for `player` within the difficulty budget, or `None` when
    /// the side has no move or no depth completed in time.
    pub fn find_best_move(
        &mut self,
        pieces: &[Piece],
        player: Player,
        shape: CornerShape,
        config: DifficultyConfig,
    ) -> CornersResult<Option<ScoredMove>> {
        let position = Position::new(pieces.to_vec())?;
        let result = self.search(&position, player, shape, config.into());
        Ok(result
            .best_move
            .map(|mv| scored_move(&position, mv, result.best_score)))
    }

    /// Run one iterative-deepening search against the engine's table.
    pub fn search(
        &mut self,
        position: &Position,
        player: Player,
        shape: CornerShape,
        config: SearchConfig,
    ) -> SearchResult {
        self.scope_cache(shape, position.pieces().len());

        let result = iterative_deepening_search_with_tt(
            position,
            player,
            shape,
            &self.scorer,
            config,
            &mut self.tt,
        );
        debug!(
            %player,
            %shape,
            depth = result.reached_depth,
            score = result.best_score,
            nodes = result.nodes,
            timed_out = result.timed_out,
            "search finished"
        );

        self.last_result = Some(result);
        result
    }

    pub fn clear_search_cache(&mut self) {
        info!(entries = self.tt.len(), "clearing search cache");
        self.tt.clear();
        self.cache_scope = None;
        self.last_result = None;
    }

    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }

    pub fn cached_positions(&self) -> usize {
        self.tt.len()
    }

    pub fn principal_variation(
        &self,
        position: &Position,
        player: Player,
        shape: CornerShape,
    ) -> PrincipalVariation {
        let max_len = self.last_result.map_or(0, |r| r.reached_depth);
        principal_variation_from_tt(position, player, shape, &self.tt, max_len)
    }

    fn scope_cache(&mut self, shape: CornerShape, piece_count: usize) {
        let scope = (shape, piece_count);
        if self.cache_scope.is_some_and(|current| current != scope) {
            debug!(%shape, piece_count, "game configuration changed; dropping cached positions");
            self.tt.clear();
        }
        self.cache_scope = Some(scope);
    }
}

fn scored_move(position: &Position, mv: Move, score: i32) -> ScoredMove {
    ScoredMove {
        from: mv.from,
        to: mv.to,
        score,
        path: find_path(position.board(), mv.from, mv.to),
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "PlumCorners Iterative"
    }

    fn new_game(&mut self) {
        self.clear_search_cache();
    }

    fn choose_move(
        &mut self,
        position: &Position,
        player: Player,
        shape: CornerShape,
        params: &SearchParams,
    ) -> CornersResult<EngineOutput> {
        let depth = params.max_depth.unwrap_or(self.default_depth).max(1);
        let result = self.search(
            position,
            player,
            shape,
            SearchConfig {
                max_depth: depth,
                max_time_ms: params.max_time_ms,
            },
        );

        let mut out = EngineOutput {
            best_move: result
                .best_move
                .map(|mv| scored_move(position, mv, result.best_score)),
            ..EngineOutput::default()
        };
        if out.best_move.is_none() {
            // Out of time before depth 1 finished; play the top-ordered move.
            out.best_move = ordered_moves(position.board(), position.pieces(), player)
                .first()
                .map(|mv| scored_move(position, Move::new(mv.from(), mv.destination), mv.quick_score));
        }

        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {} nps {}",
            result.reached_depth, result.best_score, result.nodes, result.elapsed_ms, result.nps
        ));
        out.info_lines
            .push(format!("info string iterative_engine used_depth {}", depth));
        if let Some(ms) = params.max_time_ms {
            out.info_lines
                .push(format!("info string iterative_engine max_time_ms {}", ms));
        }
        out.info_lines.push(format!(
            "info string tt probes {} hits {} stores {} evictions {} size_entries {}",
            result.tt_stats.probes,
            result.tt_stats.hits,
            result.tt_stats.stores,
            result.tt_stats.evictions,
            self.tt.len()
        ));

        let pv = self.principal_variation(position, player, shape);
        if !pv.moves.is_empty() {
            let line: Vec<String> = pv.moves.iter().map(Move::to_string).collect();
            out.info_lines.push(format!("info pv {}", line.join(", ")));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CornersError;
    use crate::game_state::corners_types::Coord;
    use crate::game_state::initial_layout::{initial_pieces, initial_position};

    fn fixed_depth(depth: u8) -> DifficultyConfig {
        DifficultyConfig::new(depth, 60_000)
    }

    #[test]
    fn find_best_move_returns_legal_move_with_path() {
        let shape = CornerShape::MEDIUM;
        let pieces = initial_pieces(shape);
        let mut engine = IterativeEngine::default();

        let best = engine
            .find_best_move(&pieces, Player::B, shape, fixed_depth(2))
            .expect("valid position")
            .expect("opening move exists");

        let position = initial_position(shape);
        assert!(position.apply_move(best.from, best.to).is_ok());
        assert_eq!(best.path.first(), Some(&best.from));
        assert_eq!(best.path.last(), Some(&best.to));
    }

    #[test]
    fn invalid_piece_list_is_rejected() {
        let pieces = vec![
            Piece::new(0, Player::A, Coord::new(1, 1)),
            Piece::new(1, Player::B, Coord::new(1, 1)),
        ];
        let mut engine = IterativeEngine::default();
        let err = engine
            .find_best_move(&pieces, Player::A, CornerShape::SMALL, fixed_depth(1))
            .expect_err("duplicate cell");
        assert!(matches!(err, CornersError::CellOccupied { .. }));
    }

    #[test]
    fn clearing_cache_does_not_change_the_answer() {
        let shape = CornerShape::SMALL;
        let pieces = initial_pieces(shape);
        let mut engine = IterativeEngine::default();

        let before = engine
            .find_best_move(&pieces, Player::A, shape, fixed_depth(3))
            .expect("valid");
        assert!(engine.cached_positions() > 0);

        engine.clear_search_cache();
        assert_eq!(engine.cached_positions(), 0);
        assert!(engine.last_search().is_none());

        let after = engine
            .find_best_move(&pieces, Player::A, shape, fixed_depth(3))
            .expect("valid");
        assert_eq!(before, after);
    }

    #[test]
    fn changing_corner_shape_drops_cache() {
        let mut engine = IterativeEngine::default();
        let small = initial_position(CornerShape::SMALL);
        engine.search(&small, Player::A, CornerShape::SMALL, SearchConfig::default());
        assert!(engine.cached_positions() > 0);

        let large = initial_position(CornerShape::LARGE);
        let result = engine.search(
            &large,
            Player::A,
            CornerShape::LARGE,
            SearchConfig {
                max_depth: 1,
                max_time_ms: None,
            },
        );
        // Only the depth-1 root entry can be present after the reset.
        assert_eq!(engine.cached_positions(), 1);
        assert_eq!(result.tt_stats.stores, 1);
    }

    #[test]
    fn bounded_cache_still_finds_a_move() {
        let shape = CornerShape::MEDIUM;
        let mut engine = IterativeEngine::new(3).with_tt_capacity(16);

        let best = engine
            .find_best_move(&initial_pieces(shape), Player::A, shape, fixed_depth(3))
            .expect("valid position");

        assert!(best.is_some());
        assert!(engine.cached_positions() <= 16);
        let stats = engine.last_search().expect("search ran").tt_stats;
        assert!(stats.evictions > 0);
    }

    #[test]
    fn choose_move_honors_depth_override() {
        let position = initial_position(CornerShape::SMALL);
        let mut engine = IterativeEngine::new(5);
        let params = SearchParams {
            max_depth: Some(1),
            ..SearchParams::default()
        };

        let out = engine
            .choose_move(&position, Player::A, CornerShape::SMALL, &params)
            .expect("engine should choose a move");
        let joined = out.info_lines.join("\n");

        assert!(out.best_move.is_some());
        assert!(joined.contains("info depth 1"), "expected depth-1 search info");
        assert!(joined.contains("used_depth 1"), "expected used_depth=1 info");
        assert!(joined.contains("info pv "), "expected a principal variation");
    }
}
