#![feature(test)]

extern crate test;

use std::path::Path;

use kencsp::model::{kenken_model, queens, GridModel};
use kencsp::propagate::Propagator;
use kencsp::puzzle::Puzzle;
use kencsp::search::{bt_search, VariableOrder};
use test::Bencher;

fn puzzle(name: &str) -> Puzzle {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("res/test/puzzles/solvable")
        .join(name);
    Puzzle::from_file(path).unwrap()
}

fn bench_kenken(b: &mut Bencher, propagator: Propagator) {
    let puzzle = puzzle("5x5.txt");
    let csp = kenken_model(&puzzle, GridModel::Binary).unwrap();
    b.iter(|| {
        let mut csp = csp.clone();
        assert!(bt_search(&mut csp, propagator, VariableOrder::Mrv));
    });
}

#[bench]
fn kenken_bt(b: &mut Bencher) {
    bench_kenken(b, Propagator::plain());
}

#[bench]
fn kenken_fc(b: &mut Bencher) {
    bench_kenken(b, Propagator::forward_checking());
}

#[bench]
fn kenken_gac(b: &mut Bencher) {
    bench_kenken(b, Propagator::gac());
}

#[bench]
fn queens_12_gac(b: &mut Bencher) {
    let csp = queens(12).unwrap();
    b.iter(|| {
        let mut csp = csp.clone();
        assert!(bt_search(&mut csp, Propagator::gac(), VariableOrder::Mrv));
    });
}
