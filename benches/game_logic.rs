use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fold_tetris::core::{
    drop_distance, reduce, spawn_block, GameGrid, State, TickClock, Unit, UnitId,
};
use fold_tetris::types::{Action, PieceKind, GRID_WIDTH};

fn stacked_grid() -> GameGrid {
    // Bottom 4 rows full, plus a ragged row above them
    (17..22)
        .flat_map(|y| (0..GRID_WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| y > 17 || x % 3 != 0)
        .enumerate()
        .map(|(i, (x, y))| Unit {
            id: UnitId {
                block: i as u32,
                slot: 0,
            },
            x,
            y,
            kind: PieceKind::I,
        })
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let state = State {
        tick_speed: 1,
        ..State::new(12345)
    };
    let mut clock = TickClock::new(12345);

    c.bench_function("active_tick", |b| {
        b.iter(|| reduce(black_box(&state), clock.next_tick()))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let grid = stacked_grid();

    c.bench_function("clear_4_lines", |b| b.iter(|| black_box(&grid).cleared()));
}

fn bench_drop(c: &mut Criterion) {
    let grid = stacked_grid();
    let block = spawn_block(PieceKind::T, 9999);

    c.bench_function("drop_distance", |b| {
        b.iter(|| drop_distance(black_box(&grid), black_box(&block)))
    });
}

fn bench_move(c: &mut Criterion) {
    let state = State::new(12345);

    c.bench_function("move", |b| {
        b.iter(|| reduce(black_box(&state), Action::Move(1)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let state = State {
        current_block: spawn_block(PieceKind::L, 1).move_y(6),
        ..State::new(12345)
    };

    c.bench_function("rotate", |b| {
        b.iter(|| reduce(black_box(&state), Action::RotateRight))
    });
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("fold_1000_ticks", |b| {
        b.iter(|| {
            let clock = TickClock::new(black_box(7));
            clock
                .take(1000)
                .enumerate()
                .fold(State::new(7), |state, (i, tick)| {
                    let state = if i % 10 == 0 {
                        reduce(&state, Action::Drop)
                    } else {
                        state
                    };
                    reduce(&state, tick)
                })
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_drop,
    bench_move,
    bench_rotate,
    bench_game
);
criterion_main!(benches);
