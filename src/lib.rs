//! Crate root module declarations for the Plum Corners engine.
//!
//! Corners is a two-player race on an 8x8 board: each side moves its pieces
//! from its home corner into the opposite one, stepping to adjacent cells or
//! chaining jumps over any occupied cell. This crate exposes the rules (move
//! generation, path reconstruction, win detection), the heuristic evaluator,
//! the alpha-beta search engine, and helpers for running engines off-thread
//! and against each other.

pub mod api;
pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod corners_types;
    pub mod initial_layout;
}

pub mod move_generation {
    pub mod destinations;
    pub mod move_ordering;
    pub mod path_finder;
    pub mod perft;
    pub mod win_detection;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod position_key;
    pub mod transposition_table;
}

pub mod engines {
    pub mod difficulty;
    pub mod engine_greedy;
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_worker;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod render_board;
}
