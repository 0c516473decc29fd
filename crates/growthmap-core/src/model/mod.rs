// crates/growthmap-core/src/model/mod.rs
pub mod area;
pub mod db;
pub mod metrics;

pub use area::{AggregatedArea, AreaKey, GeoArea};
pub use db::GrowthDb;
pub use metrics::{growth_pct, Counts, Metrics, UnitSplit, YearCounts};

