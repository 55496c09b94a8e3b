use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kali_crush::core::{create_initial_board, detect_matches, first_legal_move, resolve_turn};
use kali_crush::level::default_level;

fn bench_detect_matches(c: &mut Criterion) {
    let level = default_level();
    let board = create_initial_board(&level, 12345);

    c.bench_function("detect_matches_8x8", |b| {
        b.iter(|| detect_matches(black_box(&board)))
    });
}

fn bench_first_legal_move(c: &mut Criterion) {
    let level = default_level();
    let board = create_initial_board(&level, 12345);

    c.bench_function("first_legal_move_8x8", |b| {
        b.iter(|| first_legal_move(black_box(&board)))
    });
}

fn bench_resolve_turn(c: &mut Criterion) {
    let level = default_level();
    let board = create_initial_board(&level, 12345);
    let (from, to) = first_legal_move(&board).expect("generated boards have a move");

    c.bench_function("resolve_turn_8x8", |b| {
        b.iter(|| {
            resolve_turn(
                black_box(&board),
                from,
                to,
                &level.colors,
                &level.spawn_weights,
                12345,
            )
        })
    });
}

fn bench_create_initial_board(c: &mut Criterion) {
    let level = default_level();

    c.bench_function("create_initial_board_8x8", |b| {
        b.iter(|| create_initial_board(black_box(&level), 12345))
    });
}

criterion_group!(
    benches,
    bench_detect_matches,
    bench_first_legal_move,
    bench_resolve_turn,
    bench_create_initial_board
);
criterion_main!(benches);
