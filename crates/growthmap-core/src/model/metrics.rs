// crates/growthmap-core/src/model/metrics.rs
use crate::common::{BusinessUnit, Category, Year};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use strum::IntoEnumIterator;

/// Percentage change from `before` to `after`.
///
/// Computed in floating point, so extreme counts cannot overflow. A zero (or
/// otherwise degenerate) `before` would yield ±infinity or NaN; those
/// collapse to `0.0` so a brand new area reads as "0 %".
#[must_use]
pub fn growth_pct(before: i64, after: i64) -> f64 {
    let (before, after) = (before as f64, after as f64);
    let pct = (after - before) / before * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// The two opaque sub-counts of one business unit in one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSplit {
    pub n: i64,
    pub y: i64,
}

impl UnitSplit {
    /// `n + y`, saturating at the `i64` bounds.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.n.saturating_add(self.y)
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> i64 {
        match category {
            Category::N => self.n,
            Category::Y => self.y,
        }
    }

    pub fn set(&mut self, category: Category, value: i64) {
        match category {
            Category::N => self.n = value,
            Category::Y => self.y = value,
        }
    }

    /// Category-wise sum, `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let mut out = Self::default();
        for category in Category::iter() {
            out.set(category, self.get(category).checked_add(rhs.get(category))?);
        }
        Some(out)
    }
}

/// Everything counted for one snapshot year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCounts {
    pub customers: i64,
    pub units: [UnitSplit; BusinessUnit::COUNT],
}

impl YearCounts {
    #[must_use]
    pub const fn unit(&self, unit: BusinessUnit) -> &UnitSplit {
        &self.units[unit.index()]
    }

    pub fn unit_mut(&mut self, unit: BusinessUnit) -> &mut UnitSplit {
        &mut self.units[unit.index()]
    }
}

impl YearCounts {
    /// Field-wise sum, `None` if any field overflows.
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let mut units = [UnitSplit::default(); BusinessUnit::COUNT];
        for (out, (lhs, rhs)) in units.iter_mut().zip(self.units.iter().zip(&rhs.units)) {
            *out = lhs.checked_add(rhs)?;
        }
        Some(Self {
            customers: self.customers.checked_add(rhs.customers)?,
            units,
        })
    }
}

/// Saturating sum; the aggregation pipeline uses [`Counts::checked_add`].
impl AddAssign for YearCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.customers = self.customers.saturating_add(rhs.customers);
        for (lhs, rhs) in self.units.iter_mut().zip(rhs.units) {
            lhs.n = lhs.n.saturating_add(rhs.n);
            lhs.y = lhs.y.saturating_add(rhs.y);
        }
    }
}

/// Raw counts for both snapshot years. Summable; `+` saturates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub y2019: YearCounts,
    pub y2024: YearCounts,
}

impl Counts {
    #[must_use]
    pub const fn year(&self, year: Year) -> &YearCounts {
        match year {
            Year::Y2019 => &self.y2019,
            Year::Y2024 => &self.y2024,
        }
    }

    pub fn year_mut(&mut self, year: Year) -> &mut YearCounts {
        match year {
            Year::Y2019 => &mut self.y2019,
            Year::Y2024 => &mut self.y2024,
        }
    }

    /// Year-wise sum, `None` if any count overflows `i64`.
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            y2019: self.y2019.checked_add(&rhs.y2019)?,
            y2024: self.y2024.checked_add(&rhs.y2024)?,
        })
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Self) {
        self.y2019 += rhs.y2019;
        self.y2024 += rhs.y2024;
    }
}

impl Add for Counts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl std::iter::Sum for Counts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Summed counts of one area plus the derived growth figures.
///
/// Growth values are always finite; see [`growth_pct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub counts: Counts,
    pub customer_growth: f64,
    pub booking_growth: [f64; BusinessUnit::COUNT],
}

impl Metrics {
    #[must_use]
    pub fn from_counts(counts: Counts) -> Self {
        let customer_growth = growth_pct(counts.y2019.customers, counts.y2024.customers);
        let mut booking_growth = [0.0; BusinessUnit::COUNT];
        for unit in BusinessUnit::iter() {
            booking_growth[unit.index()] = growth_pct(
                counts.y2019.unit(unit).total(),
                counts.y2024.unit(unit).total(),
            );
        }
        Self {
            counts,
            customer_growth,
            booking_growth,
        }
    }

    #[must_use]
    pub const fn customers(&self, year: Year) -> i64 {
        self.counts.year(year).customers
    }

    /// `{year}_{unit}_TOTAL`
    #[must_use]
    pub const fn unit_total(&self, year: Year, unit: BusinessUnit) -> i64 {
        self.counts.year(year).unit(unit).total()
    }

    /// `{unit}_BOOKING_GROWTH`
    #[must_use]
    pub const fn booking_growth(&self, unit: BusinessUnit) -> f64 {
        self.booking_growth[unit.index()]
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::from_counts(Counts::default())
    }
}
