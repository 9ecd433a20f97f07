use criterion::{criterion_group, criterion_main, Criterion};
use geocodec::geometry::{Geometry, LineString, MultiPolygon, Point, Polygon};
use geocodec::io::wkb::{from_ewkb, to_ewkb};

/// A multipolygon of `n` squares, each ring with 64 vertices.
fn create_data(n: usize) -> Geometry {
    let polygons = (0..n)
        .map(|i| {
            let offset = i as f64 * 10.;
            let ring = (0..64)
                .map(|j| {
                    let angle = j as f64 / 63. * std::f64::consts::TAU;
                    Point::new(offset + angle.cos(), offset + angle.sin())
                })
                .collect();
            Polygon::new(vec![LineString::new(ring)])
        })
        .collect();
    MultiPolygon::new(polygons).with_srid(4326).into()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geom = create_data(1_000);
    let bytes = to_ewkb(&geom).unwrap();

    c.bench_function("write EWKB multipolygon", |b| {
        b.iter(|| {
            let _bytes = to_ewkb(&geom).unwrap();
        })
    });
    c.bench_function("read EWKB multipolygon", |b| {
        b.iter(|| {
            let _geom = from_ewkb(&bytes).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
