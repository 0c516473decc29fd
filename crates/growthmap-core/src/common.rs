// crates/growthmap-core/src/common.rs
//! Shared vocabulary: hierarchy levels, snapshot years, business units and
//! the fixed column names of the raw customer table.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Province name column (`WADMPR`).
pub const PROVINCE_COLUMN: &str = "WADMPR";
/// City / regency name column (`WADMKK`).
pub const CITY_COLUMN: &str = "WADMKK";
/// District name column (`WADMKC`).
pub const DISTRICT_COLUMN: &str = "WADMKC";

/// Derived column holding the overall customer growth in percent.
pub const CUSTOMER_GROWTH_COLUMN: &str = "CUSTOMER_GROWTH";

/// One of the three nested administrative levels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    Province,
    City,
    District,
}

impl Level {
    /// The next level down, `None` for districts.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Province => Some(Self::City),
            Self::City => Some(Self::District),
            Self::District => None,
        }
    }
}

/// Snapshot years present in the raw table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
pub enum Year {
    #[strum(serialize = "2019")]
    Y2019,
    #[strum(serialize = "2024")]
    Y2024,
}

impl Year {
    /// `{year}_CUST_NO`
    #[must_use]
    pub fn customer_column(self) -> String {
        format!("{self}_CUST_NO")
    }
}

/// Business units whose bookings are tracked per year.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessUnit {
    Nmc,
    Refi,
    Mpf,
    Mmu,
    Others,
}

impl BusinessUnit {
    pub const COUNT: usize = 5;

    /// Position of this unit in per-unit arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `{year}_{unit}_{category}`
    #[must_use]
    pub fn split_column(self, year: Year, category: Category) -> String {
        format!("{year}_{self}_{category}")
    }

    /// `{year}_{unit}_TOTAL`
    #[must_use]
    pub fn total_column(self, year: Year) -> String {
        format!("{year}_{self}_TOTAL")
    }

    /// `{unit}_BOOKING_GROWTH`
    #[must_use]
    pub fn growth_column(self) -> String {
        format!("{self}_BOOKING_GROWTH")
    }
}

/// The opaque two-way split of each unit's bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum Category {
    #[strum(serialize = "N")]
    N,
    #[strum(serialize = "Y")]
    Y,
}

/// Every numeric column the raw table must carry, in a stable order.
#[must_use]
pub fn required_count_columns() -> Vec<String> {
    let mut out = Vec::with_capacity(2 * (1 + 2 * BusinessUnit::COUNT));
    for year in Year::iter() {
        out.push(year.customer_column());
        for unit in BusinessUnit::iter() {
            for category in Category::iter() {
                out.push(unit.split_column(year, category));
            }
        }
    }
    out
}

/// Canonical form used on both sides of every name join: trimmed, uppercase.
#[must_use]
pub fn normalize_name(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Simple aggregate statistics for the database.
///
/// Returned by [`crate::GrowthDb::stats`]; `*_with_data` counts areas whose
/// metrics were matched from the raw table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub provinces: usize,
    pub provinces_with_data: usize,
    pub cities: usize,
    pub cities_with_data: usize,
    pub districts: usize,
    pub districts_with_data: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_follow_the_raw_contract() {
        assert_eq!(Year::Y2019.customer_column(), "2019_CUST_NO");
        assert_eq!(
            BusinessUnit::Others.split_column(Year::Y2024, Category::Y),
            "2024_OTHERS_Y"
        );
        assert_eq!(BusinessUnit::Refi.total_column(Year::Y2019), "2019_REFI_TOTAL");
        assert_eq!(BusinessUnit::Mmu.growth_column(), "MMU_BOOKING_GROWTH");
    }

    #[test]
    fn twenty_two_numeric_columns_are_required() {
        let cols = required_count_columns();
        assert_eq!(cols.len(), 22);
        assert!(cols.contains(&"2024_CUST_NO".to_string()));
        assert!(cols.contains(&"2019_NMC_N".to_string()));
    }

    #[test]
    fn names_are_trimmed_and_uppercased() {
        assert_eq!(normalize_name("  Jawa Barat "), "JAWA BARAT");
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("City".parse::<Level>().ok(), Some(Level::City));
        assert_eq!(Level::Province.child(), Some(Level::City));
    }
}
