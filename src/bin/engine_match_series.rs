//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose --shape 4x4 --difficulty hard`
//!
//! Set `RUST_LOG=debug` to see per-iteration search traces.

use plum_corners::engines::difficulty::Difficulty;
use plum_corners::engines::engine_greedy::GreedyEngine;
use plum_corners::engines::engine_iterative::IterativeEngine;
use plum_corners::engines::engine_trait::{Engine, SearchParams};
use plum_corners::errors::{CornersError, CornersResult};
use plum_corners::game_state::corners_types::CornerShape;
use plum_corners::game_state::initial_layout::initial_position;
use plum_corners::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use plum_corners::utils::render_board::render_board;
use tracing_subscriber::EnvFilter;

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_shape(text: &str) -> CornersResult<CornerShape> {
    let (rows, cols) = text
        .split_once('x')
        .and_then(|(r, c)| Some((r.parse::<u8>().ok()?, c.parse::<u8>().ok()?)))
        .ok_or(CornersError::InvalidCornerShape { rows: 0, cols: 0 })?;
    CornerShape::new(rows, cols)
}

fn main() -> CornersResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let shape = arg_value(&args, "--shape")
        .map(parse_shape)
        .transpose()?
        .unwrap_or_default();
    let difficulty = arg_value(&args, "--difficulty")
        .map(str::parse::<Difficulty>)
        .transpose()?
        .unwrap_or_default();
    let budget = difficulty.config();

    // Customize these two lines to experiment with different engines/depths.
    let player1 = || Box::new(IterativeEngine::new(budget.max_depth)) as Box<dyn Engine>;
    let player2 = || Box::new(GreedyEngine::new()) as Box<dyn Engine>;

    println!("{}\n", render_board(initial_position(shape).board(), shape));

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                shape,
                max_plies: 200,
                opening_min_plies: 2,
                opening_max_plies: 6,
                params: SearchParams {
                    max_depth: Some(budget.max_depth),
                    max_time_ms: Some(budget.max_time_ms),
                },
            },
            verbose,
        },
    )?;

    println!("difficulty={difficulty} shape={shape}");
    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
