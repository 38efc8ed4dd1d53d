use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_corners::game_state::corners_types::{CornerShape, Player};
use plum_corners::game_state::initial_layout::initial_position;
use plum_corners::search::board_scoring::HeuristicScorer;
use plum_corners::search::iterative_deepening::{
    iterative_deepening_search_with_tt, SearchConfig,
};
use plum_corners::search::transposition_table::TranspositionTable;

fn bench_search(c: &mut Criterion) {
    let depth = std::env::var("PLUM_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(4)
        .max(1);

    let mut group = c.benchmark_group("search_start");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    let scorer = HeuristicScorer::default();

    for shape in CornerShape::ALL {
        let position = initial_position(shape);
        group.bench_with_input(
            BenchmarkId::new(shape.to_string(), format!("d{depth}")),
            &position,
            |b, position| {
                b.iter(|| {
                    let mut tt = TranspositionTable::default();
                    let result = iterative_deepening_search_with_tt(
                        black_box(position),
                        Player::A,
                        black_box(shape),
                        black_box(&scorer),
                        black_box(SearchConfig {
                            max_depth: depth,
                            max_time_ms: None,
                        }),
                        black_box(&mut tt),
                    );
                    black_box(result.nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
