//! Errors used throughout the Corners engine.
//!
//! `CornersError` is the single error type returned by position construction,
//! move application, configuration parsing and the background search worker.
//! Search timeouts are deliberately not represented here: running out of time
//! is a normal search outcome and is reported through `SearchResult`.

use thiserror::Error;

use crate::game_state::corners_types::Coord;

pub type CornersResult<T> = Result<T, CornersError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CornersError {
    /// A piece was placed outside the 8x8 board while building a position.
    #[error("piece {id} at {at} is outside the board")]
    OutOfBounds { id: u16, at: Coord },

    /// Two pieces claim the same cell while building a position.
    #[error("pieces {first} and {second} both occupy {at}")]
    CellOccupied { first: u16, second: u16, at: Coord },

    /// Only 3x3, 3x4 and 4x4 corners exist.
    #[error("unsupported corner shape {rows}x{cols}")]
    InvalidCornerShape { rows: u8, cols: u8 },

    #[error("no piece at {0}")]
    NoPieceAt(Coord),

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    #[error("failed to start search worker: {0}")]
    WorkerSpawn(String),

    /// The background search thread hung up before answering.
    #[error("search worker disconnected")]
    WorkerDisconnected,
}
