//! Benchmarks for contour extraction and region description

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_tracking::{
    contour::{find_contours, ContourExtractor},
    geometry::{circle::min_enclosing_circle, hull::convex_hull_indices, rect::min_area_rect},
    region::RegionDescriptor,
};
use image::{GrayImage, Luma};
use rand::Rng;

/// Disk of radius `r` with a ragged edge, centred in a 640x480 mask
fn noisy_disk(r: f64) -> GrayImage {
    let mut rng = rand::thread_rng();
    let mut mask = GrayImage::new(640, 480);
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let dx = f64::from(x) - 320.0;
        let dy = f64::from(y) - 240.0;
        let jitter = rng.gen_range(-2.0..2.0);
        if (dx * dx + dy * dy).sqrt() <= r + jitter {
            *pixel = Luma([255]);
        }
    }
    mask
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour");
    let extractor = ContourExtractor::default();

    for radius in [40.0, 100.0, 200.0] {
        let mask = noisy_disk(radius);
        group.bench_with_input(BenchmarkId::new("find_contours", radius), &mask, |b, mask| {
            b.iter(|| black_box(find_contours(black_box(mask))));
        });
        group.bench_with_input(BenchmarkId::new("extract", radius), &mask, |b, mask| {
            b.iter(|| black_box(extractor.extract(black_box(mask))));
        });
    }

    group.finish();
}

fn benchmark_description(c: &mut Criterion) {
    let mut group = c.benchmark_group("region");
    let extractor = ContourExtractor::default();
    let descriptor = RegionDescriptor::default();

    for radius in [40.0, 100.0, 200.0] {
        let Some(contour) = extractor.extract(&noisy_disk(radius)) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("describe", radius), &contour, |b, contour| {
            b.iter(|| black_box(descriptor.describe(black_box(contour))));
        });
        group.bench_with_input(BenchmarkId::new("min_area_rect", radius), &contour, |b, contour| {
            b.iter(|| black_box(min_area_rect(black_box(contour))));
        });
        group.bench_with_input(BenchmarkId::new("enclosing_circle", radius), &contour, |b, contour| {
            b.iter(|| black_box(min_enclosing_circle(black_box(contour))));
        });
        group.bench_with_input(BenchmarkId::new("convex_hull", radius), &contour, |b, contour| {
            b.iter(|| black_box(convex_hull_indices(black_box(contour))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_extraction, benchmark_description);
criterion_main!(benches);
