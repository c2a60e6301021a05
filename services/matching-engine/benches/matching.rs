//! Matching hot-path benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use matching_engine::MatchEngine;
use types::{Order, Side};

fn seed_book(eng: &mut MatchEngine, levels: u32, per_level: u32) {
    let mut id = 0u32;
    for level in 0..levels {
        for _ in 0..per_level {
            id += 1;
            let ask = Order::limit(
                format!("a{id}"),
                "BENCH",
                "bench",
                Side::Sell,
                105.0 + level as f64 * 0.5,
                10.0,
                id as i64,
            );
            eng.match_order(&ask);
        }
    }
}

fn bench_market_sweep(c: &mut Criterion) {
    c.bench_function("market_sweep_3_levels", |b| {
        b.iter_batched(
            || {
                let mut eng = MatchEngine::new("BENCH", 256);
                seed_book(&mut eng, 10, 10);
                eng
            },
            |mut eng| {
                let order = Order::market("m", "BENCH", "bench", Side::Buy, 250.0, 1);
                black_box(eng.match_order(&order));
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_resting_insert(c: &mut Criterion) {
    c.bench_function("non_crossing_limit_insert", |b| {
        let mut eng = MatchEngine::new("BENCH", 256);
        seed_book(&mut eng, 10, 10);
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let order = Order::limit(
                format!("b{n}"),
                "BENCH",
                "bench",
                Side::Buy,
                90.0,
                1.0,
                n as i64,
            );
            black_box(eng.match_order(&order));
        })
    });
}

criterion_group!(benches, bench_market_sweep, bench_resting_insert);
criterion_main!(benches);
