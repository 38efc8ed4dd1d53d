//! Engine abstraction shared by the match harness and the background worker.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use serde::{Deserialize, Serialize};

use crate::errors::CornersResult;
use crate::game_state::board::Position;
use crate::game_state::corners_types::{Coord, CornerShape, Player};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub max_depth: Option<u8>,
    pub max_time_ms: Option<u64>,
}

/// A chosen move together with its search score and the cell-by-cell route
/// the piece travels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub from: Coord,
    pub to: Coord,
    pub score: i32,
    pub path: Vec<Coord>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ScoredMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        position: &Position,
        player: Player,
        shape: CornerShape,
        params: &SearchParams,
    ) -> CornersResult<EngineOutput>;
}
