//! Composite benchmark: Measure frame construction and zoom.
//!
//! Target: a 500x500 flush well under one 250ms auto-flush interval.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use easel::encode::encode;
use easel::{scale, Canvas, CanvasConfig, NamedColor};

fn busy_canvas(width: u32, height: u32) -> Canvas {
    let canvas = Canvas::with_config(CanvasConfig::default().with_size(width, height));
    for i in 0..100 {
        canvas.color(NamedColor::ALL[i % 16]);
        canvas.println(format!("line {i}: some printed output"));
    }
    for r in (10..240).step_by(10) {
        canvas.circle(250, 250, r);
    }
    canvas.thickness(3);
    canvas.line(0, 0, 499, 499);
    canvas
}

fn composite_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    for size in [200, 500, 1000] {
        let canvas = busy_canvas(size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &canvas, |b, canvas| {
            b.iter(|| black_box(canvas.composite()));
        });
    }

    group.finish();
}

fn zoom_scale(c: &mut Criterion) {
    let frame = busy_canvas(500, 500).composite();
    let mut group = c.benchmark_group("scale");

    for factor in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, &factor| {
            b.iter(|| scale(black_box(&frame), factor));
        });
    }

    group.finish();
}

fn flush_and_encode(c: &mut Criterion) {
    let canvas = busy_canvas(500, 500);

    c.bench_function("flush_500", |b| b.iter(|| black_box(canvas.flush())));

    let frame = canvas.composite();
    c.bench_function("encode_bmp_500", |b| b.iter(|| encode(black_box(&frame))));
}

criterion_group!(benches, composite_sizes, zoom_scale, flush_and_encode);
criterion_main!(benches);
