use criterion::{criterion_group, criterion_main, Criterion};

use mandelzoom_core::{score_interest, Complex, Viewport};
use mandelzoom_render::{rasterize, RenderParams, RenderProgress};

fn bench_full_frame_rasterize(c: &mut Criterion) {
    let viewport = Viewport::default();
    let params = RenderParams::new(3000, 640, 480).unwrap();
    let progress = RenderProgress::new();

    c.bench_function("rasterize_640x480_3000iter", |b| {
        b.iter(|| rasterize(&viewport, &params, &progress));
    });
}

fn bench_shaded_zoom(c: &mut Criterion) {
    let viewport = Viewport::new(Complex::new(-0.7453, 0.1127), 0.005).unwrap();
    let params = RenderParams::new(3000, 256, 256).unwrap().with_shading(true);
    let progress = RenderProgress::new();

    c.bench_function("rasterize_256x256_shaded", |b| {
        b.iter(|| rasterize(&viewport, &params, &progress));
    });
}

fn bench_interest_score(c: &mut Criterion) {
    let center = Complex::new(-0.75, 0.1);

    c.bench_function("score_interest_2000iter", |b| {
        b.iter(|| score_interest(center, 0.15625, 2000));
    });
}

criterion_group!(
    benches,
    bench_full_frame_rasterize,
    bench_shaded_zoom,
    bench_interest_score
);
criterion_main!(benches);
