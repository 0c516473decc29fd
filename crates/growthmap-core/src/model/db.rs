// crates/growthmap-core/src/model/db.rs
use super::area::{AggregatedArea, AreaKey};
use crate::common::{DbStats, Level};
use crate::traits::AreaRecord;
use serde::{Deserialize, Serialize};

/// The three aggregated tables, one per level.
///
/// Built once by [`crate::aggregate::aggregate`] and never mutated; a data
/// refresh builds a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthDb {
    pub provinces: Vec<AggregatedArea>,
    pub cities: Vec<AggregatedArea>,
    pub districts: Vec<AggregatedArea>,
}

impl GrowthDb {
    #[must_use]
    pub fn table(&self, level: Level) -> &[AggregatedArea] {
        match level {
            Level::Province => &self.provinces,
            Level::City => &self.cities,
            Level::District => &self.districts,
        }
    }

    /// First area with exactly this key.
    ///
    /// Keys are unique in well-formed boundary files; if a file repeats a key
    /// the join keeps every copy and this returns the first.
    #[must_use]
    pub fn find(&self, key: &AreaKey) -> Option<&AggregatedArea> {
        self.table(key.level()).iter().find(|a| &a.key == key)
    }

    /// Every area with this key (usually one).
    pub fn find_all(&self, key: &AreaKey) -> impl Iterator<Item = &AggregatedArea> + '_ {
        let key = key.clone();
        self.table(key.level())
            .iter()
            .filter(move |a| a.key == key)
    }

    /// Direct children of `parent`: cities of a province, districts of a city.
    pub fn children(&self, parent: &AreaKey) -> impl Iterator<Item = &AggregatedArea> + '_ {
        let rows: &[AggregatedArea] = match parent.level().child() {
            Some(level) => self.table(level),
            None => &[],
        };
        let parent = parent.clone();
        rows.iter().filter(move |a| a.is_within(&parent))
    }

    #[must_use]
    pub fn stats(&self) -> DbStats {
        let with_data = |rows: &[AggregatedArea]| rows.iter().filter(|a| a.has_data()).count();
        DbStats {
            provinces: self.provinces.len(),
            provinces_with_data: with_data(&self.provinces),
            cities: self.cities.len(),
            cities_with_data: with_data(&self.cities),
            districts: self.districts.len(),
            districts_with_data: with_data(&self.districts),
        }
    }
}
