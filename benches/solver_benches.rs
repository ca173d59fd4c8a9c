//! Throughput benchmarks for the solver over the literal test scenarios.
//!
//! Run with `cargo bench`. Each group measures full enumeration except the
//! Kanoodle board, where only the first solution is timed.

use std::collections::HashMap;

use cover_links::dlx::DancingLinks;
use cover_links::fixtures::{demo_board_1, demo_board_3, demo_board_4, demo_board_5, kanoodle_board};
use cover_links::PuzzleSolver;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn knuth_dlx() -> DancingLinks<&'static str, i32> {
    let row_names = vec!["A", "B", "C", "D", "E", "F", "G"];
    let col_names: Vec<i32> = (0..7).collect();
    let mut entries = HashMap::new();
    entries.insert("A", vec![0, 3, 6]);
    entries.insert("B", vec![0, 3]);
    entries.insert("C", vec![3, 4, 6]);
    entries.insert("D", vec![2, 4, 5]);
    entries.insert("E", vec![1, 2, 5, 6]);
    entries.insert("F", vec![6]);
    entries.insert("G", vec![1]);
    DancingLinks::new(row_names, col_names, vec![], entries).unwrap()
}

fn bench_s1(c: &mut Criterion) {
    c.bench_function("s1_knuth_7x7_full_enumeration", |b| {
        b.iter(|| {
            let mut dlx = knuth_dlx();
            let count = dlx.solutions().count();
            black_box(count)
        });
    });
}

fn bench_s3(c: &mut Criterion) {
    c.bench_function("s3_demo_1_full_enumeration", |b| {
        b.iter(|| {
            let board = demo_board_1();
            let mut solver = PuzzleSolver::compile(&board).unwrap();
            black_box(solver.solutions().count())
        });
    });
}

fn bench_s5(c: &mut Criterion) {
    c.bench_function("s5_demo_3_full_enumeration", |b| {
        b.iter(|| {
            let board = demo_board_3();
            let mut solver = PuzzleSolver::compile(&board).unwrap();
            black_box(solver.solutions().count())
        });
    });
}

fn bench_s6(c: &mut Criterion) {
    c.bench_function("s6_demo_4_full_enumeration", |b| {
        b.iter(|| {
            let board = demo_board_4();
            let mut solver = PuzzleSolver::compile(&board).unwrap();
            black_box(solver.solutions().count())
        });
    });
}

fn bench_s7(c: &mut Criterion) {
    c.bench_function("s7_demo_5_full_enumeration", |b| {
        b.iter(|| {
            let board = demo_board_5();
            let mut solver = PuzzleSolver::compile(&board).unwrap();
            black_box(solver.solutions().count())
        });
    });
}

fn bench_s8(c: &mut Criterion) {
    c.bench_function("s8_kanoodle_first_solution", |b| {
        b.iter(|| {
            let board = kanoodle_board();
            let mut solver = PuzzleSolver::compile(&board).unwrap();
            black_box(solver.solutions().next())
        });
    });
}

criterion_group!(benches, bench_s1, bench_s3, bench_s5, bench_s6, bench_s7, bench_s8);
criterion_main!(benches);
