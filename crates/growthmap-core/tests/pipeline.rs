mod common;

use growthmap_core::aggregate::{group_counts, group_metrics};
use growthmap_core::loader::read_customers;
use growthmap_core::prelude::*;
use std::collections::HashMap;
use strum::IntoEnumIterator;

fn load_fixture() -> (tempfile::TempDir, GrowthDb) {
    let dir = tempfile::tempdir().expect("tempdir");
    let sources = common::write_fixture(dir.path()).without_cache();
    let db = GrowthDb::load(&sources).expect("fixture loads");
    (dir, db)
}

#[test]
fn builds_all_three_levels_from_files() {
    let (_dir, db) = load_fixture();
    let stats = db.stats();
    assert_eq!(stats.provinces, 3);
    assert_eq!(stats.provinces_with_data, 2);
    assert_eq!(stats.cities, 3);
    assert_eq!(stats.cities_with_data, 3);
    assert_eq!(stats.districts, 5);
    assert_eq!(stats.districts_with_data, 4);
}

#[test]
fn province_metrics_match_hand_computation() {
    let (_dir, db) = load_fixture();
    let bali = db.find(&AreaKey::province("Bali")).expect("bali");
    let m = bali.metrics.as_ref().expect("bali has data");
    assert_eq!(m.customers(Year::Y2019), 200);
    assert_eq!(m.customers(Year::Y2024), 300);
    assert_eq!(m.customer_growth, 50.0);
    assert_eq!(m.unit_total(Year::Y2019, BusinessUnit::Nmc), 5);
    assert_eq!(m.unit_total(Year::Y2024, BusinessUnit::Nmc), 18);
    assert_eq!(m.booking_growth(BusinessUnit::Nmc), 260.0);
}

#[test]
fn new_areas_have_zero_growth_and_missing_areas_no_data() {
    let (_dir, db) = load_fixture();
    let aceh = db.find(&AreaKey::province("ACEH")).expect("aceh");
    assert_eq!(aceh.customer_growth(), Some(0.0));
    assert_eq!(
        aceh.metrics.as_ref().map(|m| m.booking_growth(BusinessUnit::Nmc)),
        Some(0.0)
    );

    let maluku = db.find(&AreaKey::province("MALUKU")).expect("maluku kept");
    assert!(maluku.metrics.is_none());

    assert!(db.find(&AreaKey::province("PAPUA")).is_none());
}

#[test]
fn mixed_case_rows_land_in_one_district() {
    let (_dir, db) = load_fixture();
    let key = AreaKey::district("BALI", "DENPASAR", "DENPASAR BARAT");
    let m = db.find(&key).and_then(|a| a.metrics.as_ref()).expect("matched");
    assert_eq!(m.customers(Year::Y2019), 100);
    assert_eq!(m.customers(Year::Y2024), 150);
}

#[test]
fn every_total_is_the_sum_of_its_splits() {
    let (_dir, db) = load_fixture();
    for level in Level::iter() {
        for area in db.table(level) {
            let Some(m) = &area.metrics else { continue };
            for year in Year::iter() {
                for unit in BusinessUnit::iter() {
                    let split = m.counts.year(year).unit(unit);
                    assert_eq!(m.unit_total(year, unit), split.n + split.y);
                }
            }
            assert!(m.customer_growth.is_finite());
            assert!(m.booking_growth.iter().all(|g| g.is_finite()));
        }
    }
}

#[test]
fn district_sums_roll_up_to_city_and_province_groups() {
    let records = read_customers(common::customers_csv().as_bytes(), "fixture").expect("reads");
    let districts = group_counts(&records, Level::District).expect("sums fit");
    let cities = group_counts(&records, Level::City).expect("sums fit");
    let provinces = group_counts(&records, Level::Province).expect("sums fit");

    let mut rolled_cities: HashMap<AreaKey, Counts> = HashMap::new();
    for (key, counts) in &districts {
        let city = key.at_level(Level::City).expect("district has a city");
        *rolled_cities.entry(city).or_default() += *counts;
    }
    assert_eq!(rolled_cities, cities);

    let mut rolled_provinces: HashMap<AreaKey, Counts> = HashMap::new();
    for (key, counts) in &cities {
        let province = key.parent().expect("city has a province");
        *rolled_provinces.entry(province).or_default() += *counts;
    }
    assert_eq!(rolled_provinces, provinces);
}

#[test]
fn zero_denominator_groups_never_produce_infinite_growth() {
    let records = read_customers(common::customers_csv().as_bytes(), "fixture").expect("reads");
    for level in Level::iter() {
        for (key, m) in group_metrics(&records, level).expect("sums fit") {
            if m.customers(Year::Y2019) == 0 {
                assert_eq!(m.customer_growth, 0.0, "{key}");
            }
        }
    }
}

#[test]
fn missing_boundary_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sources = common::write_fixture(dir.path()).without_cache();
    std::fs::remove_file(&sources.cities).expect("remove");
    assert!(matches!(
        GrowthDb::load(&sources),
        Err(GrowthError::NotFound(_))
    ));
}

#[test]
fn missing_column_aborts_the_whole_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sources = common::write_fixture(dir.path()).without_cache();
    let broken = common::customers_csv().replace("2019_OTHERS_N", "2019_OTHER_N");
    std::fs::write(&sources.customers, broken).expect("write");
    match GrowthDb::load(&sources) {
        Err(GrowthError::Configuration(msg)) => assert!(msg.contains("2019_OTHERS_N")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn overflowing_province_sum_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sources = common::write_fixture(dir.path()).without_cache();
    let rows = [
        common::header(),
        common::line("Kuta", "Badung", "Bali", &common::counts(i64::MAX, (0, 0), 1, (0, 0))),
        common::line("Mengwi", "Badung", "Bali", &common::counts(1, (0, 0), 1, (0, 0))),
    ]
    .join("\n");
    std::fs::write(&sources.customers, rows).expect("write");
    match GrowthDb::load(&sources) {
        Err(GrowthError::Overflow(what)) => assert!(what.contains("BALI"), "{what}"),
        other => panic!("expected overflow, got {other:?}"),
    }
}
