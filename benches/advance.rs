use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lifeboard::*;

fn advance_benchmark(c: &mut Criterion) {
  let settings = Settings::new(64, 64, 1365, RuleName::Classic);
  let start = Board::with_seed(settings, 0x5eed).unwrap();

  c.bench_function("64x64 classic 1000 generations", |b| b.iter(|| {
    let mut board = start.clone();
    board.advance_by(black_box(1000));
    board.living_cell_count()
  }));

  c.bench_function("64x64 day and night 1000 generations", |b| b.iter(|| {
    let mut board = start.clone();
    board.set_rule(RuleName::DayAndNight);
    board.advance_by(black_box(1000));
    board.living_cell_count()
  }));
}

criterion_group!(benches, advance_benchmark);
criterion_main!(benches);
