//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration scans every root move at a fixed depth. The wall-clock
//! budget is polled every `TIME_POLL_INTERVAL` nodes; an iteration that runs
//! out of time is discarded and the previous completed depth is kept. A
//! transposition table narrows windows and memoizes subtrees between
//! iterations, and deepening stops early once a forced win is found.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Move, Player};
use crate::move_generation::destinations::valid_destinations;
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::win_detection::has_won_on_board;
use crate::search::board_scoring::BoardScorer;
use crate::search::position_key::PositionKey;
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};

/// Scores at or above this mean the side to move has a forced win.
pub const WIN_SCORE: i32 = 100_000;
const SCORE_INFINITY: i32 = 2 * WIN_SCORE;
/// Table-relative win scores never drop below this.
const STORED_WIN_FLOOR: i32 = WIN_SCORE - u8::MAX as i32;
const TIME_POLL_INTERVAL: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub max_time_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_time_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub tt_stats: TTStats,
    pub timed_out: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalVariation {
    pub moves: Vec<Move>,
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    shape: CornerShape,
    tt: &'a mut TranspositionTable,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    /// Count a node and report whether the time budget is spent.
    #[inline]
    fn visit_and_check_time(&mut self) -> bool {
        self.nodes += 1;
        if !self.timed_out && self.nodes % TIME_POLL_INTERVAL == 0 {
            if let Some(limit) = self.deadline {
                self.timed_out = Instant::now() >= limit;
            }
        }
        self.timed_out
    }
}

/// Search with a throwaway transposition table.
pub fn iterative_deepening_search<S: BoardScorer>(
    position: &Position,
    player: Player,
    shape: CornerShape,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let mut local_tt = TranspositionTable::default();
    iterative_deepening_search_with_tt(position, player, shape, scorer, config, &mut local_tt)
}

pub fn iterative_deepening_search_with_tt<S: BoardScorer>(
    position: &Position,
    player: Player,
    shape: CornerShape,
    scorer: &S,
    config: SearchConfig,
    tt: &mut TranspositionTable,
) -> SearchResult {
    let started_at = Instant::now();
    let deadline = config
        .max_time_ms
        .map(|ms| started_at + Duration::from_millis(ms.max(1)));

    if config.max_depth == 0 {
        return SearchResult {
            best_score: scorer.score(position, player, shape),
            nodes: 1,
            elapsed_ms: started_at.elapsed().as_millis() as u64,
            tt_stats: tt.stats(),
            ..SearchResult::default()
        };
    }

    let mut ctx = SearchContext {
        scorer,
        shape,
        tt,
        deadline,
        nodes: 0,
        timed_out: false,
    };
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            result.timed_out = true;
            break;
        }

        let Some((best_move, best_score)) = negamax_root(position, player, depth, &mut ctx) else {
            result.timed_out = true;
            debug!(depth, nodes = ctx.nodes, "time budget spent; discarding iteration");
            break;
        };

        result.best_move = best_move;
        result.best_score = best_score;
        result.reached_depth = depth;
        debug!(
            depth,
            score = best_score,
            nodes = ctx.nodes,
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "completed iteration"
        );

        if best_score >= WIN_SCORE {
            break;
        }
    }

    result.nodes = ctx.nodes;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result.tt_stats = ctx.tt.stats();

    result
}

/// Win/loss score when one side already fills its goal; shallower wins and
/// slower losses score better. The table stores these relative to the node,
/// see `score_to_tt`.
#[inline]
fn terminal_score(position: &Position, player: Player, shape: CornerShape, depth: u8) -> Option<i32> {
    let board = position.board();
    if has_won_on_board(board, player, shape) {
        Some(WIN_SCORE + i32::from(depth))
    } else if has_won_on_board(board, player.opponent(), shape) {
        Some(-(WIN_SCORE + i32::from(depth)))
    } else {
        None
    }
}

/// Win scores depend on the remaining depth where the goal was reached, so the
/// table keeps them as plies below the storing node.
#[inline]
fn score_to_tt(score: i32, depth: u8) -> i32 {
    let depth = i32::from(depth);
    if score >= WIN_SCORE {
        score - depth
    } else if score <= -WIN_SCORE {
        score + depth
    } else {
        score
    }
}

/// Rescale a stored score to the probing node's remaining depth. A win past
/// the current horizon reads as the slowest win.
#[inline]
fn score_from_tt(score: i32, depth: u8) -> i32 {
    let depth = i32::from(depth);
    if score >= STORED_WIN_FLOOR {
        (score + depth).max(WIN_SCORE)
    } else if score <= -STORED_WIN_FLOOR {
        (score - depth).min(-WIN_SCORE)
    } else {
        score
    }
}

fn negamax_root<S: BoardScorer>(
    position: &Position,
    player: Player,
    depth: u8,
    ctx: &mut SearchContext<'_, S>,
) -> Option<(Option<Move>, i32)> {
    if let Some(score) = terminal_score(position, player, ctx.shape, depth) {
        return Some((None, score));
    }

    let moves = ordered_moves(position.board(), position.pieces(), player);
    if moves.is_empty() {
        return Some((None, 0));
    }

    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;
    let mut best_move = None;
    let mut best_score = -SCORE_INFINITY;

    for mv in moves {
        let child = position.apply_generated_move(mv.from(), mv.destination);
        let score = -negamax(&child, player.opponent(), depth - 1, -beta, -alpha, ctx)?;

        if score > best_score {
            best_score = score;
            best_move = Some(Move::new(mv.from(), mv.destination));
        }
        if score > alpha {
            alpha = score;
        }
    }

    ctx.tt.store(TTEntry {
        key: PositionKey::new(position.board(), player, ctx.shape),
        depth,
        score: score_to_tt(best_score, depth),
        bound: Bound::Exact,
        best_move,
    });

    Some((best_move, best_score))
}

/// Returns `None` once the time budget is spent; the caller unwinds and the
/// whole iteration is dropped.
fn negamax<S: BoardScorer>(
    position: &Position,
    player: Player,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_, S>,
) -> Option<i32> {
    if ctx.visit_and_check_time() {
        return None;
    }

    if let Some(score) = terminal_score(position, player, ctx.shape, depth) {
        return Some(score);
    }

    if depth == 0 {
        return Some(ctx.scorer.score(position, player, ctx.shape));
    }

    let key = PositionKey::new(position.board(), player, ctx.shape);
    let alpha_orig = alpha;

    if let Some(entry) = ctx.tt.probe(key) {
        if entry.depth >= depth {
            let score = score_from_tt(entry.score, depth);
            match entry.bound {
                Bound::Exact => return Some(score),
                Bound::Lower => alpha = alpha.max(score),
                Bound::Upper => beta = beta.min(score),
            }
            if alpha >= beta {
                return Some(score);
            }
        }
    }

    let moves = ordered_moves(position.board(), position.pieces(), player);
    if moves.is_empty() {
        // No rule covers a side with no moves; treat it as neutral.
        return Some(0);
    }

    let mut best = -SCORE_INFINITY;
    let mut best_move = None;

    for mv in moves {
        let child = position.apply_generated_move(mv.from(), mv.destination);
        let score = -negamax(&child, player.opponent(), depth - 1, -beta, -alpha, ctx)?;

        if score > best {
            best = score;
            best_move = Some(Move::new(mv.from(), mv.destination));
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best <= alpha_orig {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };

    ctx.tt.store(TTEntry {
        key,
        depth,
        score: score_to_tt(best, depth),
        bound,
        best_move,
    });

    Some(best)
}

/// Follow stored best moves from `position` for at most `max_len` plies.
///
/// Stops at a missing entry, a stored move that is no longer legal, or a
/// repeated position.
pub fn principal_variation_from_tt(
    position: &Position,
    player: Player,
    shape: CornerShape,
    tt: &TranspositionTable,
    max_len: u8,
) -> PrincipalVariation {
    let mut pv = PrincipalVariation::default();
    let mut seen = Vec::new();
    let mut current = position.clone();
    let mut side = player;

    for _ in 0..max_len {
        let key = PositionKey::new(current.board(), side, shape);
        if seen.contains(&key) {
            break;
        }
        seen.push(key);

        let Some(mv) = tt.peek(&key).and_then(|e| e.best_move) else {
            break;
        };
        let owned_by_side = current.piece_at(mv.from).is_some_and(|p| p.owner == side);
        if !owned_by_side || !valid_destinations(current.board(), mv.from).contains(&mv.to) {
            break;
        }

        pv.moves.push(mv);
        current = current.apply_generated_move(mv.from, mv.to);
        side = side.opponent();
    }

    pv
}
