//! Benchmarks for candidate classification.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rideshare_geo::GeoPoint;
use rideshare_search::{
    classify_with, match_route, CancellationToken, ClassifyOptions, RideCandidate, Route,
};

fn create_route(points: usize, offset: f64) -> Vec<GeoPoint> {
    (0..points)
        .map(|i| GeoPoint::new(12.30 + offset + i as f64 * 0.002, 76.64 + i as f64 * 0.002))
        .collect()
}

fn create_candidates(count: usize) -> Vec<RideCandidate> {
    (0..count)
        .map(|i| {
            // Every third ride runs far to the north and never connects
            let offset = if i % 3 == 0 { 1.0 } else { (i % 7) as f64 * 0.001 };
            RideCandidate::new(format!("ride-{i}"), Route::per_km(create_route(500, offset), 150_000.0, 0.0, 4.5))
        })
        .collect()
}

fn bench_match_route(c: &mut Criterion) {
    let route = create_route(2000, 0.0);
    let origin = GeoPoint::new(12.501, 76.841);
    let destination = GeoPoint::new(15.0, 79.5);

    c.bench_function("match_route_2000_points", |b| {
        b.iter(|| match_route(black_box(&origin), black_box(&destination), black_box(&route), 3000.0))
    });
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let origin = GeoPoint::new(12.35, 76.69);
    let destination = GeoPoint::new(13.10, 77.44);
    let cancel = CancellationToken::new();

    for size in [10, 100, 1000].iter() {
        let candidates = create_candidates(*size);

        for parallel in [false, true] {
            let options = ClassifyOptions {
                parallel,
                ..ClassifyOptions::default()
            };
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, size), size, |b, _| {
                b.iter(|| classify_with(black_box(&candidates), &origin, &destination, &options, &cancel))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_match_route, bench_classify);
criterion_main!(benches);
