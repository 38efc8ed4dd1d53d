//! Pluggable position evaluation and the six-factor Corners heuristic.
//!
//! Search stays independent of the heuristic by delegating static scoring to
//! `BoardScorer`. `HeuristicScorer` combines six per-player measures, each
//! computed for both sides and folded in as `(own - opponent) * weight`.

use crate::game_state::board::{Board, Position};
use crate::game_state::corners_types::{CornerShape, Piece, Player, BOARD_SIZE};
use crate::move_generation::destinations::valid_destinations;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `player`; higher is better for them.
    fn score(&self, position: &Position, player: Player, shape: CornerShape) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub goal_distance: f64,
    pub advancement: f64,
    pub pieces_in_goal: f64,
    pub mobility: f64,
    pub clustering: f64,
    pub blocking: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            goal_distance: 10.0,
            advancement: 5.0,
            pieces_in_goal: 1.0,
            mobility: 1.0,
            clustering: 0.5,
            blocking: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    pub weights: EvalWeights,
}

impl HeuristicScorer {
    pub const fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, position: &Position, player: Player, shape: CornerShape) -> i32 {
        evaluate(position.board(), position.pieces(), player, shape, &self.weights)
    }
}

/// Weighted heuristic difference between `player` and the opponent.
pub fn evaluate(
    board: &Board,
    pieces: &[Piece],
    player: Player,
    shape: CornerShape,
    weights: &EvalWeights,
) -> i32 {
    let opponent = player.opponent();
    let diff = |f: &dyn Fn(Player) -> f64| f(player) - f(opponent);

    let total = diff(&|p| goal_distance(pieces, p, shape)) * weights.goal_distance
        + diff(&|p| f64::from(advancement(pieces, p))) * weights.advancement
        + diff(&|p| f64::from(pieces_in_goal(pieces, p, shape))) * weights.pieces_in_goal
        + diff(&|p| f64::from(mobility(board, pieces, p))) * weights.mobility
        + diff(&|p| f64::from(clustering(pieces, p))) * weights.clustering
        + diff(&|p| f64::from(blocking(pieces, p, shape))) * weights.blocking;

    total.round() as i32
}

fn owned(pieces: &[Piece], player: Player) -> impl Iterator<Item = &Piece> + '_ {
    pieces.iter().filter(move |p| p.owner == player)
}

/// Negative mean Manhattan distance from each piece to its goal corner.
pub fn goal_distance(pieces: &[Piece], player: Player, shape: CornerShape) -> f64 {
    let goal = shape.goal_region(player);
    let (sum, count) = owned(pieces, player).fold((0i32, 0i32), |(sum, count), p| {
        (sum + goal.distance_to(p.position), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        -f64::from(sum) / f64::from(count)
    }
}

/// Raw progress toward the far diagonal corner, ignoring the goal shape.
pub fn advancement(pieces: &[Piece], player: Player) -> i32 {
    let last = i32::from(BOARD_SIZE - 1);
    owned(pieces, player)
        .map(|p| {
            let (row, col) = (i32::from(p.position.row), i32::from(p.position.col));
            match player {
                Player::A => row + col,
                Player::B => (last - row) + (last - col),
            }
        })
        .sum()
}

/// Convex bonus: `count^2 * 100` for pieces already inside the goal corner.
pub fn pieces_in_goal(pieces: &[Piece], player: Player, shape: CornerShape) -> i32 {
    let goal = shape.goal_region(player);
    let count = owned(pieces, player)
        .filter(|p| goal.contains(p.position))
        .count() as i32;
    count * count * 100
}

/// Twice the number of destinations available across all pieces.
pub fn mobility(board: &Board, pieces: &[Piece], player: Player) -> i32 {
    let total: usize = owned(pieces, player)
        .map(|p| valid_destinations(board, p.position).len())
        .sum();
    total as i32 * 2
}

/// Pairwise spacing: +5 for pairs 2..=4 apart, -3 for pairs more than 6 apart.
pub fn clustering(pieces: &[Piece], player: Player) -> i32 {
    let own: Vec<&Piece> = owned(pieces, player).collect();
    let mut score = 0;
    for (i, a) in own.iter().enumerate() {
        for b in &own[i + 1..] {
            let d = a.position.manhattan(b.position);
            if (2..=4).contains(&d) {
                score += 5;
            } else if d > 6 {
                score -= 3;
            }
        }
    }
    score
}

/// +10 for every piece within distance 3 of the opponent's goal corner.
pub fn blocking(pieces: &[Piece], player: Player, shape: CornerShape) -> i32 {
    let guarded = shape.goal_region(player.opponent());
    owned(pieces, player)
        .filter(|p| guarded.distance_to(p.position) <= 3)
        .count() as i32
        * 10
}
