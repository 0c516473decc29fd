//! growthmap prelude: bring common types and functions into scope.

#![allow(unused_imports)]

pub use crate::aggregate::aggregate;
pub use crate::common::{normalize_name, BusinessUnit, Category, DbStats, Level, Year};
pub use crate::config::{DataSources, MapSize, ViewConfig};
pub use crate::drilldown::{
    on_feature_clicked, reset_to_city_level, reset_to_top, Action, FeatureProperties, Selection,
};
pub use crate::error::{GrowthError, Result};
pub use crate::model::{AggregatedArea, AreaKey, Counts, GeoArea, GrowthDb, Metrics};
pub use crate::raw::CustomerRecord;
pub use crate::render::{render, render_json};
pub use crate::traits::AreaRecord;
pub use crate::view::{active_view, extent, viewport, ActiveView, Extent, Totals, Viewport};
