//! Benchmarks of curve flattening.

#![feature(test)]
extern crate test;
use test::Bencher;

use geokern::{FlatteningPathIter, Path};

fn wavy(n: usize) -> Path {
    let mut path = Path::new();
    path.move_to((0.0, 0.0));
    for i in 0..n {
        let x = i as f64 * 30.0;
        path.curve_to((x + 10.0, 40.0), (x + 20.0, -40.0), (x + 30.0, 0.0));
        path.quad_to((x + 45.0, 20.0), (x + 30.0, 0.0));
    }
    path
}

#[bench]
fn bench_flatten_coarse(b: &mut Bencher) {
    let path = wavy(32);
    b.iter(|| FlatteningPathIter::new(path.iter(), test::black_box(1.0)).count());
}

#[bench]
fn bench_flatten_fine(b: &mut Bencher) {
    let path = wavy(32);
    b.iter(|| FlatteningPathIter::new(path.iter(), test::black_box(0.01)).count());
}

#[bench]
fn bench_path_length(b: &mut Bencher) {
    let path = wavy(32);
    b.iter(|| test::black_box(&path).length());
}
