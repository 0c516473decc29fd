// crates/growthmap-core/src/raw.rs
//! Raw input rows as they come from the customer table.

use crate::common::{BusinessUnit, Category, Year};
use crate::model::{AreaKey, Counts};
use serde::{Deserialize, Serialize};

/// One row of the customer table: area names plus the counts of both years.
///
/// Names are kept as read; normalization happens when keys are built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub district: String,
    pub city: String,
    pub province: String,
    pub counts: Counts,
}

impl CustomerRecord {
    pub fn new(province: &str, city: &str, district: &str) -> Self {
        Self {
            district: district.to_owned(),
            city: city.to_owned(),
            province: province.to_owned(),
            counts: Counts::default(),
        }
    }

    /// Builder-style setter for `{year}_CUST_NO`.
    #[must_use]
    pub fn with_customers(mut self, year: Year, customers: i64) -> Self {
        self.counts.year_mut(year).customers = customers;
        self
    }

    /// Builder-style setter for `{year}_{unit}_{category}`.
    #[must_use]
    pub fn with_split(
        mut self,
        year: Year,
        unit: BusinessUnit,
        category: Category,
        value: i64,
    ) -> Self {
        self.counts
            .year_mut(year)
            .unit_mut(unit)
            .set(category, value);
        self
    }

    #[must_use]
    pub fn province_key(&self) -> AreaKey {
        AreaKey::province(&self.province)
    }

    #[must_use]
    pub fn city_key(&self) -> AreaKey {
        AreaKey::city(&self.province, &self.city)
    }

    #[must_use]
    pub fn district_key(&self) -> AreaKey {
        AreaKey::district(&self.province, &self.city, &self.district)
    }
}
