// crates/growthmap-core/src/loader/customers.rs
//! CSV reader for the customer table.

use crate::common::{
    BusinessUnit, Category, Year, CITY_COLUMN, DISTRICT_COLUMN, PROVINCE_COLUMN,
};
use crate::error::{GrowthError, Result};
use crate::raw::CustomerRecord;
use std::io::Read;
use strum::IntoEnumIterator;

/// Header positions of every column the pipeline reads.
struct ColumnMap {
    district: usize,
    city: usize,
    province: usize,
    /// (year, column index)
    customers: Vec<(Year, usize)>,
    /// (year, unit, category, column index)
    splits: Vec<(Year, BusinessUnit, Category, usize)>,
}

impl ColumnMap {
    /// Resolves all required columns up front so a bad file fails before any
    /// row is read.
    fn resolve(headers: &csv::StringRecord, source: &str) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| GrowthError::missing_column(name, source))
        };

        let mut customers = Vec::new();
        let mut splits = Vec::new();
        for year in Year::iter() {
            customers.push((year, find(&year.customer_column())?));
            for unit in BusinessUnit::iter() {
                for category in Category::iter() {
                    let idx = find(&unit.split_column(year, category))?;
                    splits.push((year, unit, category, idx));
                }
            }
        }

        Ok(Self {
            district: find(DISTRICT_COLUMN)?,
            city: find(CITY_COLUMN)?,
            province: find(PROVINCE_COLUMN)?,
            customers,
            splits,
        })
    }
}

/// Smallest float that no longer fits in `i64` (2^63).
const I64_FLOAT_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Parses a count cell. Empty cells are missing values and count as 0;
/// integral floats (`"12.0"`, as spreadsheet exports write them) are accepted
/// as long as they fit in `i64`.
fn parse_count(raw: &str, line: u64, column: &str) -> Result<i64> {
    let v = raw.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("nan") {
        return Ok(0);
    }
    if let Ok(n) = v.parse::<i64>() {
        return Ok(n);
    }
    match v.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && (-I64_FLOAT_BOUND..I64_FLOAT_BOUND).contains(&f) => {
            Ok(f as i64)
        }
        _ => Err(GrowthError::Parse {
            line,
            column: column.to_owned(),
            value: raw.to_owned(),
        }),
    }
}

/// Reads every row of a customer table.
///
/// `source` names the input in error messages. Columns other than the
/// required ones are ignored and may appear in any order.
///
/// # Errors
///
/// [`GrowthError::Configuration`] when a required column is absent,
/// [`GrowthError::Parse`] for a non-integer count, [`GrowthError::Csv`] for
/// malformed CSV.
pub fn read_customers<R: Read>(reader: R, source: &str) -> Result<Vec<CustomerRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::resolve(&headers, source)?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let mut record = CustomerRecord::new(
            cell(columns.province),
            cell(columns.city),
            cell(columns.district),
        );
        for &(year, idx) in &columns.customers {
            record.counts.year_mut(year).customers =
                parse_count(cell(idx), line, &headers[idx])?;
        }
        for &(year, unit, category, idx) in &columns.splits {
            let value = parse_count(cell(idx), line, &headers[idx])?;
            record.counts.year_mut(year).unit_mut(unit).set(category, value);
        }
        out.push(record);
    }

    log::info!("Read {} customer rows from {source}", out.len());
    Ok(out)
}
