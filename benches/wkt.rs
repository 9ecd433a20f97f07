use criterion::{criterion_group, criterion_main, Criterion};
use geocodec::geometry::{Geometry, LineString, Point};
use geocodec::io::wkt::{from_wkt, to_ewkt};

fn create_data(n: usize) -> Geometry {
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / 7.;
            Point::new_z(t.cos() * 180., t.sin() * 90., t)
        })
        .collect();
    LineString::new(points).with_srid(4326).into()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geom = create_data(10_000);
    let text = to_ewkt(&geom);

    c.bench_function("write EWKT linestring", |b| {
        b.iter(|| {
            let _text = to_ewkt(&geom);
        })
    });
    c.bench_function("read EWKT linestring", |b| {
        b.iter(|| {
            let _geom = from_wkt(&text).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
