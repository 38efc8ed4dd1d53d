//! Minimal head-to-head engine match harness for local testing.
//!
//! This module runs two `Engine` implementations against each other on a
//! chosen corner shape, with an optional seeded random opening prefix.
//! Player A always moves first.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

use crate::engines::engine_trait::{Engine, SearchParams};
use crate::errors::{CornersError, CornersResult};
use crate::game_state::board::Position;
use crate::game_state::corners_types::{CornerShape, Move, Player};
use crate::game_state::initial_layout::initial_position;
use crate::move_generation::move_ordering::ordered_moves;
use crate::move_generation::win_detection::winner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Player),
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Player },
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub shape: CornerShape,
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub params: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            shape: CornerShape::SMALL,
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 6,
            params: SearchParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_position: Position,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub a_move_count: u32,
    pub b_move_count: u32,
    pub a_total_time_ns: u128,
    pub b_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `engine_a` plays Player A, `engine_b` plays Player B.
pub fn play_engine_match(
    mut engine_a: Box<dyn Engine>,
    mut engine_b: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> CornersResult<MatchResult> {
    play_engine_match_from_position_internal(
        initial_position(config.shape),
        Player::A,
        &mut engine_a,
        &mut engine_b,
        seed,
        config,
        true,
    )
}

/// Play a single match from a caller-provided position without random
/// opening plies.
pub fn play_engine_match_from_position(
    mut engine_a: Box<dyn Engine>,
    mut engine_b: Box<dyn Engine>,
    start: Position,
    side_to_move: Player,
    config: MatchConfig,
) -> CornersResult<MatchResult> {
    play_engine_match_from_position_internal(
        start,
        side_to_move,
        &mut engine_a,
        &mut engine_b,
        0,
        config,
        false,
    )
}

fn play_engine_match_from_position_internal(
    mut position: Position,
    mut side: Player,
    engine_a: &mut Box<dyn Engine>,
    engine_b: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> CornersResult<MatchResult> {
    engine_a.new_game();
    engine_b.new_game();

    let opening_moves = if apply_random_opening {
        let (after_opening, next_side, opening_moves) = apply_seeded_random_opening(
            &position,
            side,
            config.shape,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        )?;
        position = after_opening;
        side = next_side;
        opening_moves
    } else {
        Vec::new()
    };

    let mut result = MatchResult {
        outcome: MatchOutcome::MaxPlies,
        final_position: position.clone(),
        opening_moves,
        played_moves: Vec::new(),
        a_move_count: 0,
        b_move_count: 0,
        a_total_time_ns: 0,
        b_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if let Some(won) = winner(position.pieces(), config.shape) {
            result.outcome = MatchOutcome::Win(won);
            result.final_position = position;
            return Ok(result);
        }

        let legal_moves = ordered_moves(position.board(), position.pieces(), side);
        if legal_moves.is_empty() {
            result.outcome = MatchOutcome::Stalemate;
            result.final_position = position;
            return Ok(result);
        }

        let started = Instant::now();
        let out = match side {
            Player::A => engine_a.choose_move(&position, side, config.shape, &config.params)?,
            Player::B => engine_b.choose_move(&position, side, config.shape, &config.params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match side {
            Player::A => {
                result.a_move_count = result.a_move_count.saturating_add(1);
                result.a_total_time_ns = result.a_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::B => {
                result.b_move_count = result.b_move_count.saturating_add(1);
                result.b_total_time_ns = result.b_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = match out.best_move {
            Some(mv) => Move::new(mv.from, mv.to),
            None => Move::new(legal_moves[0].from(), legal_moves[0].destination),
        };
        if position.piece_at(chosen.from).map(|p| p.owner) != Some(side) {
            return Err(CornersError::IllegalMove {
                from: chosen.from,
                to: chosen.to,
            });
        }
        // `apply_move` rejects anything the generator would not produce.
        position = position.apply_move(chosen.from, chosen.to)?;
        result.played_moves.push(chosen);
        side = side.opponent();
    }

    result.outcome = match winner(position.pieces(), config.shape) {
        Some(won) => MatchOutcome::Win(won),
        None => MatchOutcome::MaxPlies,
    };
    result.final_position = position;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Sides are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> CornersResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut side_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_a = side_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (a, b) = if player1_is_a {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            info!(game = i + 1, games = config.games, seed, a, b, "starting game");
        }

        let result = if player1_is_a {
            play_engine_match(
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?
        } else {
            play_engine_match(
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_a {
            (
                result.a_move_count,
                result.b_move_count,
                result.a_total_time_ns,
                result.b_total_time_ns,
            )
        } else {
            (
                result.b_move_count,
                result.a_move_count,
                result.b_total_time_ns,
                result.a_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome {
            MatchOutcome::Win(side) => {
                let player = if (side == Player::A) == player1_is_a {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, side }
            }
            MatchOutcome::Stalemate => {
                stats.draws += 1;
                SeriesOutcome::Stalemate
            }
            MatchOutcome::MaxPlies => {
                stats.draws += 1;
                SeriesOutcome::MaxPlies
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                game = i + 1,
                result = ?mapped,
                p1_wins = stats.player1_wins,
                p2_wins = stats.player2_wins,
                draws = stats.draws,
                "finished game"
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    initial: &Position,
    mut side: Player,
    shape: CornerShape,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> CornersResult<(Position, Player, Vec<Move>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = initial.clone();
    let mut opening_moves = Vec::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if winner(position.pieces(), shape).is_some() {
            break;
        }
        let legal_moves = ordered_moves(position.board(), position.pieces(), side);
        if legal_moves.is_empty() {
            break;
        }

        let picked = &legal_moves[rng.random_range(0..legal_moves.len())];
        let chosen = Move::new(picked.from(), picked.destination);

        position = position.apply_move(chosen.from, chosen.to)?;
        opening_moves.push(chosen);
        side = side.opponent();
    }

    Ok((position, side, opening_moves))
}
