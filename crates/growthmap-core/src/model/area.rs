// crates/growthmap-core/src/model/area.rs
use super::metrics::Metrics;
use crate::common::{normalize_name, Level};
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an area, scoped by its ancestors.
///
/// All names are stored normalized (see [`normalize_name`]). The level is
/// implied by which names are present, so a district without a city cannot
/// be represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaKey {
    Province {
        province: String,
    },
    City {
        province: String,
        city: String,
    },
    District {
        province: String,
        city: String,
        district: String,
    },
}

impl AreaKey {
    pub fn province(province: &str) -> Self {
        Self::Province {
            province: normalize_name(province),
        }
    }

    pub fn city(province: &str, city: &str) -> Self {
        Self::City {
            province: normalize_name(province),
            city: normalize_name(city),
        }
    }

    pub fn district(province: &str, city: &str, district: &str) -> Self {
        Self::District {
            province: normalize_name(province),
            city: normalize_name(city),
            district: normalize_name(district),
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::Province { .. } => Level::Province,
            Self::City { .. } => Level::City,
            Self::District { .. } => Level::District,
        }
    }

    pub fn province_name(&self) -> &str {
        match self {
            Self::Province { province }
            | Self::City { province, .. }
            | Self::District { province, .. } => province,
        }
    }

    pub fn city_name(&self) -> Option<&str> {
        match self {
            Self::Province { .. } => None,
            Self::City { city, .. } | Self::District { city, .. } => Some(city),
        }
    }

    pub fn district_name(&self) -> Option<&str> {
        match self {
            Self::District { district, .. } => Some(district),
            _ => None,
        }
    }

    /// The most specific name of this key.
    pub fn name(&self) -> &str {
        self.district_name()
            .or_else(|| self.city_name())
            .unwrap_or_else(|| self.province_name())
    }

    /// Key of the enclosing area, `None` for a province.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Province { .. } => None,
            Self::City { province, .. } => Some(Self::Province {
                province: province.clone(),
            }),
            Self::District { province, city, .. } => Some(Self::City {
                province: province.clone(),
                city: city.clone(),
            }),
        }
    }

    /// Truncates this key to `level`; `None` when `level` is deeper than the key.
    #[must_use]
    pub fn at_level(&self, level: Level) -> Option<Self> {
        let mut key = self.clone();
        while key.level() > level {
            key = key.parent()?;
        }
        (key.level() == level).then_some(key)
    }
}

impl fmt::Display for AreaKey {
    /// Most specific name first, e.g. `KUTA, BADUNG, BALI`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(district) = self.district_name() {
            write!(f, "{district}, ")?;
        }
        if let Some(city) = self.city_name() {
            write!(f, "{city}, ")?;
        }
        f.write_str(self.province_name())
    }
}

/// A boundary polygon at one level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoArea {
    pub key: AreaKey,
    pub geometry: MultiPolygon<f64>,
}

impl GeoArea {
    #[must_use]
    pub const fn level(&self) -> Level {
        self.key.level()
    }
}

/// A [`GeoArea`] joined with its aggregated metrics.
///
/// `metrics` is `None` when the raw table had no rows for the area; such
/// areas are kept and render as "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedArea {
    pub key: AreaKey,
    pub geometry: MultiPolygon<f64>,
    pub metrics: Option<Metrics>,
}

impl AggregatedArea {
    #[must_use]
    pub const fn level(&self) -> Level {
        self.key.level()
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.metrics.is_some()
    }

    #[must_use]
    pub fn customer_growth(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.customer_growth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_normalize_every_name() {
        let key = AreaKey::district("bali", " Badung", "kuta ");
        assert_eq!(key.level(), Level::District);
        assert_eq!(key.province_name(), "BALI");
        assert_eq!(key.city_name(), Some("BADUNG"));
        assert_eq!(key.name(), "KUTA");
        assert_eq!(key.to_string(), "KUTA, BADUNG, BALI");
    }

    #[test]
    fn same_city_name_in_different_provinces_is_distinct() {
        assert_ne!(
            AreaKey::city("JAWA BARAT", "BOGOR"),
            AreaKey::city("BANTEN", "BOGOR")
        );
    }

    #[test]
    fn truncating_a_key_walks_up_the_hierarchy() {
        let key = AreaKey::district("BALI", "BADUNG", "KUTA");
        assert_eq!(key.at_level(Level::City), Some(AreaKey::city("BALI", "BADUNG")));
        assert_eq!(key.at_level(Level::Province), Some(AreaKey::province("BALI")));
        assert_eq!(AreaKey::province("BALI").at_level(Level::City), None);
    }
}
