// crates/growthmap-core/src/lib.rs
//! # growthmap-core
//!
//! Customer-growth statistics over a province → city → district hierarchy,
//! prepared for a choropleth map, plus the click-driven drill-down model.
//!
//! ```no_run
//! use growthmap_core::prelude::*;
//!
//! let sources = DataSources::from_dir("data");
//! let db = GrowthDb::load(&sources)?;
//!
//! let state = Selection::Top;
//! let state = on_feature_clicked(&state, &FeatureProperties::province("Bali"));
//! let view = active_view(&db, &state);
//! println!("{}: {:.1} %", view.label, view.totals.metrics.customer_growth);
//! # Ok::<(), growthmap_core::GrowthError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregate;
pub mod common;
pub mod config;
pub mod drilldown;
pub mod error;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod raw;
pub mod render;
pub mod style;
pub mod traits;
pub mod view;

// Re-exports
pub use crate::common::{BusinessUnit, Category, DbStats, Level, Year};
pub use crate::config::{DataSources, MapSize, ViewConfig};
pub use crate::drilldown::{Action, FeatureProperties, Selection};
pub use crate::error::{GrowthError, Result};
pub use crate::model::{AggregatedArea, AreaKey, Counts, GeoArea, GrowthDb, Metrics};
pub use crate::raw::CustomerRecord;
