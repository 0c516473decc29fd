#![allow(dead_code)]

use growthmap_core::common::required_count_columns;
use growthmap_core::DataSources;
use std::fs;
use std::path::Path;

/// Header line of a customer table with every required column.
pub fn header() -> String {
    let mut cols = vec!["WADMKC".to_string(), "WADMKK".to_string(), "WADMPR".to_string()];
    cols.extend(required_count_columns());
    cols.join(",")
}

/// One data line. `counts` fills numeric columns in header order; the rest
/// stay empty (zero).
pub fn line(district: &str, city: &str, province: &str, counts: &[i64]) -> String {
    let mut cells = vec![district.to_string(), city.to_string(), province.to_string()];
    let mut numbers: Vec<String> = counts.iter().map(i64::to_string).collect();
    numbers.resize(required_count_columns().len(), String::new());
    cells.extend(numbers);
    cells.join(",")
}

/// Counts vector: 2019 customers, 2019 NMC N/Y, then 2024 customers and
/// 2024 NMC N/Y at their header positions.
pub fn counts(c2019: i64, nmc2019: (i64, i64), c2024: i64, nmc2024: (i64, i64)) -> Vec<i64> {
    let mut v = vec![0; 22];
    v[0] = c2019;
    v[1] = nmc2019.0;
    v[2] = nmc2019.1;
    v[11] = c2024;
    v[12] = nmc2024.0;
    v[13] = nmc2024.1;
    v
}

pub fn customers_csv() -> String {
    [
        header(),
        line("Kuta", "Badung", "Bali", &counts(40, (2, 2), 60, (3, 3))),
        line("Mengwi", "Badung", "Bali", &counts(60, (1, 0), 90, (1, 1))),
        line("Denpasar Barat", "Denpasar", "Bali", &counts(100, (0, 0), 120, (5, 5))),
        line("Denpasar Barat", "Denpasar", "BALI", &counts(0, (0, 0), 30, (0, 0))),
        line("Banda Raya", "Banda Aceh", "Aceh", &counts(0, (0, 0), 20, (0, 2))),
        // No boundary exists for this one.
        line("Abepura", "Jayapura", "Papua", &counts(7, (1, 1), 9, (1, 1))),
    ]
    .join("\n")
}

fn square(x: f64, y: f64, size: f64) -> String {
    format!(
        "[[[{x0},{y0}],[{x1},{y0}],[{x1},{y1}],[{x0},{y1}],[{x0},{y0}]]]",
        x0 = x,
        y0 = y,
        x1 = x + size,
        y1 = y + size
    )
}

fn feature(props: &str, coords: &str) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{{props}}},"geometry":{{"type":"Polygon","coordinates":{coords}}}}}"#
    )
}

fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

pub fn provinces_geojson() -> String {
    collection(&[
        feature(r#""WADMPR":"Bali""#, &square(114.0, -9.0, 2.0)),
        feature(r#""WADMPR":"Aceh""#, &square(95.0, 2.0, 4.0)),
        feature(r#""WADMPR":"Maluku""#, &square(127.0, -4.0, 3.0)),
    ])
}

pub fn cities_geojson() -> String {
    collection(&[
        feature(r#""WADMPR":"Bali","WADMKK":"Badung""#, &square(114.5, -8.9, 0.5)),
        feature(r#""WADMPR":"Bali","WADMKK":"Denpasar""#, &square(115.1, -8.8, 0.2)),
        feature(r#""WADMPR":"Aceh","WADMKK":"Banda Aceh""#, &square(95.2, 5.4, 0.2)),
    ])
}

pub fn districts_geojson() -> String {
    collection(&[
        feature(
            r#""WADMPR":"Bali","WADMKK":"Badung","WADMKC":"Kuta""#,
            &square(114.6, -8.8, 0.1),
        ),
        feature(
            r#""WADMPR":"Bali","WADMKK":"Badung","WADMKC":"Mengwi""#,
            &square(114.7, -8.7, 0.1),
        ),
        feature(
            r#""WADMPR":"Bali","WADMKK":"Denpasar","WADMKC":"Denpasar Barat""#,
            &square(115.1, -8.75, 0.05),
        ),
        feature(
            r#""WADMPR":"Bali","WADMKK":"Denpasar","WADMKC":"Denpasar Utara""#,
            &square(115.2, -8.7, 0.05),
        ),
        feature(
            r#""WADMPR":"Aceh","WADMKK":"Banda Aceh","WADMKC":"Banda Raya""#,
            &square(95.3, 5.5, 0.05),
        ),
    ])
}

/// Writes the fixture set into `dir` and returns its sources.
pub fn write_fixture(dir: &Path) -> DataSources {
    let sources = DataSources::from_dir(dir);
    fs::write(&sources.customers, customers_csv()).expect("write customers");
    fs::write(&sources.provinces, provinces_geojson()).expect("write provinces");
    fs::write(&sources.cities, cities_geojson()).expect("write cities");
    fs::write(&sources.districts, districts_geojson()).expect("write districts");
    sources
}
