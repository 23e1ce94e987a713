use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_sat::encoding::{EncodeOptions, EncodingKind};
use sudoku_sat::solver::solve_puzzle;
use sudoku_sat::sudoku::Puzzle;
use sudoku_sat::sudoku::grid::EXAMPLE_NINE;

fn bench_encode(c: &mut Criterion) {
    let nine = Puzzle::from(EXAMPLE_NINE);
    let sixteen = Puzzle::from_rows(&vec![vec![0; 16]; 16]);

    let mut group = c.benchmark_group("encode");
    for kind in EncodingKind::ALL {
        group.bench_function(format!("{kind}/9x9"), |b| {
            b.iter(|| {
                let mut encoding = kind.build(EncodeOptions::default());
                black_box(encoding.encode(black_box(&nine)).unwrap())
            });
        });
        group.bench_function(format!("{kind}/16x16"), |b| {
            b.iter(|| {
                let mut encoding = kind.build(EncodeOptions::default());
                black_box(encoding.encode(black_box(&sixteen)).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let nine = Puzzle::from(EXAMPLE_NINE);

    let mut group = c.benchmark_group("solve");
    group.sample_size(20);
    for kind in EncodingKind::ALL {
        group.bench_function(format!("{kind}/9x9"), |b| {
            b.iter(|| {
                black_box(
                    solve_puzzle(black_box(&nine), kind, EncodeOptions::default()).unwrap(),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_solve);
criterion_main!(benches);
