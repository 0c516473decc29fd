// crates/growthmap-core/src/aggregate.rs
//! Group-by / sum / growth / left-join pipeline.
//!
//! Each level is processed independently:
//! 1. group raw rows by the level's composite key (uppercased names),
//! 2. sum the counts of each group,
//! 3. derive totals and growth (non-finite growth becomes 0),
//! 4. left-join onto that level's boundaries. Boundaries without rows keep
//!    `None` metrics; groups without a boundary are dropped.

use crate::common::Level;
use crate::error::{GrowthError, Result};
use crate::model::{AggregatedArea, AreaKey, Counts, GeoArea, GrowthDb, Metrics};
use crate::raw::CustomerRecord;
use std::collections::HashMap;

/// Key of `record` at `level`.
#[must_use]
pub fn record_key(record: &CustomerRecord, level: Level) -> AreaKey {
    match level {
        Level::Province => record.province_key(),
        Level::City => record.city_key(),
        Level::District => record.district_key(),
    }
}

/// Sums the counts of all records per key at `level`.
///
/// # Errors
///
/// [`GrowthError::Overflow`] when a group's sum leaves the `i64` range.
pub fn group_counts(
    records: &[CustomerRecord],
    level: Level,
) -> Result<HashMap<AreaKey, Counts>> {
    let mut groups: HashMap<AreaKey, Counts> = HashMap::new();
    for record in records {
        let key = record_key(record, level);
        let sum = groups.entry(key).or_default();
        *sum = sum.checked_add(&record.counts).ok_or_else(|| {
            GrowthError::Overflow(format!("{level} {}", record_key(record, level)))
        })?;
    }
    Ok(groups)
}

/// Grouped metrics for one level, before the geometry join.
///
/// # Errors
///
/// See [`group_counts`].
pub fn group_metrics(
    records: &[CustomerRecord],
    level: Level,
) -> Result<HashMap<AreaKey, Metrics>> {
    Ok(group_counts(records, level)?
        .into_iter()
        .map(|(key, counts)| (key, Metrics::from_counts(counts)))
        .collect())
}

/// Left-joins grouped metrics onto `areas`.
///
/// Boundaries are the authoritative set of areas: the output has exactly one
/// row per boundary, in boundary order.
#[must_use]
pub fn join_level(areas: Vec<GeoArea>, metrics: &HashMap<AreaKey, Metrics>) -> Vec<AggregatedArea> {
    let rows: Vec<AggregatedArea> = areas
        .into_iter()
        .map(|area| AggregatedArea {
            metrics: metrics.get(&area.key).cloned(),
            key: area.key,
            geometry: area.geometry,
        })
        .collect();

    let matched: std::collections::HashSet<&AreaKey> = rows.iter().map(|r| &r.key).collect();
    let dropped: Vec<&AreaKey> = metrics.keys().filter(|k| !matched.contains(k)).collect();
    if !dropped.is_empty() {
        log::info!(
            "{} grouped rows have no matching boundary and were dropped",
            dropped.len()
        );
        for key in &dropped {
            log::debug!("no boundary for {} {key}", key.level());
        }
    }
    let missing = rows.iter().filter(|r| r.metrics.is_none()).count();
    if missing > 0 {
        log::info!("{missing} boundaries have no customer data");
    }

    rows
}

/// Aggregates one level end to end.
///
/// # Errors
///
/// See [`group_counts`].
pub fn aggregate_level(
    records: &[CustomerRecord],
    areas: Vec<GeoArea>,
    level: Level,
) -> Result<Vec<AggregatedArea>> {
    let metrics = group_metrics(records, level)?;
    Ok(join_level(areas, &metrics))
}

/// Runs the pipeline for all three levels.
///
/// Boundary sets are expected to hold areas of their own level; areas of a
/// different level never match a group and end up without metrics.
///
/// # Errors
///
/// [`GrowthError::Overflow`] when any group's counts overflow; no partial
/// database is returned.
pub fn aggregate(
    records: &[CustomerRecord],
    provinces: Vec<GeoArea>,
    cities: Vec<GeoArea>,
    districts: Vec<GeoArea>,
) -> Result<GrowthDb> {
    let db = GrowthDb {
        provinces: aggregate_level(records, provinces, Level::Province)?,
        cities: aggregate_level(records, cities, Level::City)?,
        districts: aggregate_level(records, districts, Level::District)?,
    };
    let stats = db.stats();
    log::info!(
        "Aggregated {} provinces, {} cities, {} districts",
        stats.provinces,
        stats.cities,
        stats.districts
    );
    Ok(db)
}
