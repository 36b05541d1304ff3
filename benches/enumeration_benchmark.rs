use contract_rummy_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn joker_heavy_hand(config: &Config) -> IndexedHand {
    IndexedHand::from_cards(
        config,
        [
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Two, Suit::Heart),
            Card::new(Rank::Two, Suit::Diamond),
            Card::new(Rank::Five, Suit::Spade),
            Card::new(Rank::Five, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::Seven, Suit::Spade),
            Card::new(Rank::Eight, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
            Card::new(Rank::Ten, Suit::Spade),
            Card::joker(),
            Card::joker(),
            Card::joker(),
            Card::joker(),
        ],
    )
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let config = Config::default();
    let hand = joker_heavy_hand(&config);

    c.bench_function("iter_sets direct", |b| {
        b.iter(|| black_box(iter_sets(black_box(&hand), black_box(&config))))
    });
    c.bench_function("iter_sets lut", |b| {
        b.iter(|| black_box(iter_sets_lut(black_box(&hand), black_box(&config))))
    });
    c.bench_function("iter_runs direct", |b| {
        b.iter(|| black_box(iter_runs(black_box(&hand), black_box(&config))))
    });
    c.bench_function("iter_runs lut", |b| {
        b.iter(|| black_box(iter_runs_lut(black_box(&hand), black_box(&config))))
    });
    c.bench_function("iter_melds 3 sets", |b| {
        b.iter(|| {
            black_box(iter_melds(
                black_box(&hand),
                black_box(&Objective::new(3, 0)),
                black_box(&config),
            ))
        })
    });
    c.bench_function("iter_melds 1 set 1 run", |b| {
        b.iter(|| {
            black_box(iter_melds(
                black_box(&hand),
                black_box(&Objective::new(1, 1)),
                black_box(&config),
            ))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
