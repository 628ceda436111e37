#![feature(test)]
/// Notes
/// 1. Every bench has 10,000 conversions
/// 2. The points are scattered around Beijing

extern crate test;

use test::Bencher;

use chncrs::*;

const REPEAT: usize = 500;
const POINTS: [(f64, f64); 20] = [
    (116.39128, 39.90719),
    (116.40386, 39.91487),
    (116.32153, 39.99602),
    (116.48023, 39.99051),
    (116.27553, 39.99914),
    (116.43512, 39.88329),
    (116.35001, 39.94022),
    (116.45733, 39.90824),
    (116.30772, 39.86331),
    (116.51205, 39.93188),
    (116.42118, 40.00512),
    (116.36655, 39.87941),
    (116.29914, 39.92677),
    (116.47241, 39.87105),
    (116.39902, 39.96248),
    (116.33478, 39.90113),
    (116.44987, 39.95376),
    (116.38246, 39.85592),
    (116.52039, 39.89674),
    (116.41563, 39.92011),
];

fn points() -> Vec<(f64, f64)> {
    let mut ps = Vec::with_capacity(POINTS.len() * REPEAT);
    for _ in 0..REPEAT {
        ps.extend(POINTS);
    }
    ps
}

macro_rules! impl_bench {
    ($name:ident, $f:path) => {
        #[bench]
        fn $name(b: &mut Bencher) {
            let ps = points();

            b.iter(|| {
                let _ = ps.iter().map(|&(x, y)| $f(x, y)).collect::<Vec<_>>();
            });
        }
    };
}

impl_bench!(bench_wgs84_to_gcj02, wgs84_to_gcj02);
impl_bench!(bench_gcj02_to_wgs84, gcj02_to_wgs84);
impl_bench!(bench_gcj02_to_bd09, gcj02_to_bd09);
impl_bench!(bench_bd09_to_gcj02, bd09_to_gcj02);
impl_bench!(bench_mapbar_to_wgs84, mapbar_to_wgs84);
impl_bench!(bench_wgs84_to_mapbar, wgs84_to_mapbar);
impl_bench!(bench_wgs84_to_cgcs2000_3deg, wgs84_to_cgcs2000_3deg);
impl_bench!(bench_bd09_to_mapbar, bd09_to_mapbar);

#[bench]
fn bench_cgcs2000_3deg_to_wgs84(b: &mut Bencher) {
    let ps = points()
        .into_iter()
        .map(|(x, y)| wgs84_to_cgcs2000_3deg(x, y))
        .collect::<Vec<_>>();

    b.iter(|| {
        let _ = ps
            .iter()
            .map(|p| cgcs2000_3deg_to_wgs84(p.easting, p.northing, p.zone, false))
            .collect::<Vec<_>>();
    });
}

#[bench]
fn bench_converter(b: &mut Bencher) {
    let converter = Converter::new().zone_million(true);
    let ps = points()
        .into_iter()
        .map(|(x, y)| Coordinate::new(x, y, Crs::BD09))
        .collect::<Vec<_>>();

    b.iter(|| {
        let _ = ps
            .iter()
            .map(|&p| converter.convert(p, Crs::CGCS2000))
            .collect::<Vec<_>>();
    });
}
