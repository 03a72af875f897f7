//! Benchmarks of the crossing engine.

#![feature(test)]
extern crate test;
use test::Bencher;

use geokern::{
    path_contains_point, path_intersects_rect, Circle, OpenPathPolicy, Path, PathShadow, Point,
    Rect, Shape,
};

// A star with many spikes, so every query walks a fair number of edges.
fn star(spikes: usize) -> Path {
    let mut path = Path::new();
    let n = spikes * 2;
    for i in 0..n {
        let th = i as f64 * std::f64::consts::TAU / n as f64;
        let r = if i % 2 == 0 { 100.0 } else { 40.0 };
        let p = (r * th.cos(), r * th.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[bench]
fn bench_contains_point_polygon(b: &mut Bencher) {
    let path = star(64);
    b.iter(|| path_contains_point(path.iter(), test::black_box(Point::new(10.0, 20.0))));
}

#[bench]
fn bench_contains_point_curved(b: &mut Bencher) {
    let circle = Circle::new((0.0, 0.0), 50.0).to_path();
    b.iter(|| path_contains_point(circle.iter(), test::black_box(Point::new(30.0, 30.0))));
}

#[bench]
fn bench_intersects_rect(b: &mut Bencher) {
    let path = star(64);
    let rect = Rect::new(60.0, -5.0, 70.0, 5.0);
    b.iter(|| path_intersects_rect(path.iter(), test::black_box(rect)));
}

#[bench]
fn bench_path_vs_path(b: &mut Bencher) {
    let a = star(32);
    let other = star(16).transformed(geokern::Affine::translate((150.0, 0.0)));
    b.iter(|| a.intersects(test::black_box(&other)));
}

#[bench]
fn bench_shadow_reuse(b: &mut Bencher) {
    let a = star(32);
    let other = Circle::new((150.0, 0.0), 60.0).to_path();
    let mut shadow = PathShadow::new(a.iter());
    b.iter(|| shadow.crossings(test::black_box(other.iter()), OpenPathPolicy::Standard));
}
