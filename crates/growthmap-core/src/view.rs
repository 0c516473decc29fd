// crates/growthmap-core/src/view.rs
//! Pure views of a [`GrowthDb`] under a [`Selection`]: extent, viewport and
//! the active data subset with its totals.

use crate::config::ViewConfig;
use crate::drilldown::Selection;
use crate::model::{AggregatedArea, AreaKey, Counts, GrowthDb, Metrics};
use crate::traits::{total_bounds, AreaRecord};
use geo::Rect;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS_M: f64 = 6_378_137.0;
const METERS_PER_DEGREE: f64 = 111_000.0;
const TILE_SIZE_PX: f64 = 256.0;

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// `[[south, west], [north, east]]`, the order map widgets expect.
    #[must_use]
    pub const fn southwest_northeast(&self) -> [[f64; 2]; 2] {
        [[self.min_lat, self.min_lon], [self.max_lat, self.max_lon]]
    }
}

impl From<Rect<f64>> for Extent {
    fn from(r: Rect<f64>) -> Self {
        Self {
            min_lon: r.min().x,
            min_lat: r.min().y,
            max_lon: r.max().x,
            max_lat: r.max().y,
        }
    }
}

/// Union of all province bounds.
#[must_use]
pub fn full_extent(db: &GrowthDb) -> Option<Extent> {
    total_bounds(&db.provinces).map(Extent::from)
}

fn extent_of(db: &GrowthDb, key: &AreaKey) -> Option<Extent> {
    total_bounds(db.find_all(key)).map(Extent::from)
}

/// Map extent for a selection.
///
/// A selected district keeps the extent of its city. An area missing from
/// the boundaries falls back to the full extent.
#[must_use]
pub fn extent(db: &GrowthDb, state: &Selection) -> Option<Extent> {
    let focus = match state {
        Selection::Top => None,
        Selection::Province { province } => Some(AreaKey::Province {
            province: province.clone(),
        }),
        Selection::City { .. } | Selection::District { .. } => state.city_key(),
    };
    focus
        .and_then(|key| extent_of(db, &key))
        .or_else(|| full_extent(db))
}

/// Map center (latitude, longitude) and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: (f64, f64),
    pub zoom: f64,
    pub bounds: Extent,
}

/// Zoom that fits `extent` into the configured map size.
///
/// Degrees are converted to meters with a flat 111 km per degree, longitude
/// scaled by the cosine of the southern latitude; the result is backed off
/// by half a level so polygons do not touch the map edge.
#[must_use]
pub fn fit_zoom(extent: &Extent, config: &ViewConfig) -> f64 {
    let lat_span = (extent.max_lat - extent.min_lat).abs();
    let lon_span = (extent.max_lon - extent.min_lon).abs();

    let lat_m = lat_span * METERS_PER_DEGREE;
    let lon_m = lon_span * METERS_PER_DEGREE * extent.min_lat.to_radians().cos().abs();

    let resolution =
        (lat_m / config.map_size.height).max(lon_m / config.map_size.width);
    let mut zoom = (2.0 * PI * EARTH_RADIUS_M / (resolution * TILE_SIZE_PX)).log2();
    if let Some(max) = config.max_zoom {
        zoom = zoom.min(max);
    }
    zoom - 0.5
}

/// Viewport for a selection: the fixed top zoom over the full extent, or a
/// fitted zoom over the focused area.
#[must_use]
pub fn viewport(db: &GrowthDb, state: &Selection, config: &ViewConfig) -> Option<Viewport> {
    let bounds = extent(db, state)?;
    let zoom = match state {
        Selection::Top => config.top_zoom,
        _ => {
            let z = fit_zoom(&bounds, config);
            // A degenerate (point or empty) extent has no finite fit.
            if z.is_finite() {
                z
            } else {
                config.max_zoom.unwrap_or(config.top_zoom)
            }
        }
    };
    Some(Viewport {
        center: bounds.center(),
        zoom,
        bounds,
    })
}

/// Summed counts and growth over a set of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub metrics: Metrics,
    /// Rows that contributed (had data).
    pub areas_with_data: usize,
    pub areas: usize,
}

impl Totals {
    /// Sums over rows with data and recomputes growth from the sums. An empty
    /// or data-less set yields zero totals.
    pub fn over<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AggregatedArea>,
    {
        let mut areas = 0;
        let mut areas_with_data = 0;
        let mut counts = Counts::default();
        for row in rows {
            areas += 1;
            if let Some(m) = &row.metrics {
                areas_with_data += 1;
                counts += m.counts;
            }
        }
        Self {
            metrics: Metrics::from_counts(counts),
            areas_with_data,
            areas,
        }
    }
}

/// The rows to draw and summarize for a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveView<'a> {
    pub label: String,
    pub rows: Vec<&'a AggregatedArea>,
    pub totals: Totals,
}

/// Label shown above the totals.
#[must_use]
pub fn label(state: &Selection) -> String {
    match state.selected_key() {
        None => "Aggregate total".to_owned(),
        Some(key) => format!("Aggregate total for {key}"),
    }
}

/// Active subset: provinces at the top, the cities of a selected province,
/// the districts of a selected city, the single selected district.
#[must_use]
pub fn active_view<'a>(db: &'a GrowthDb, state: &Selection) -> ActiveView<'a> {
    let rows: Vec<&AggregatedArea> = match state.selected_key() {
        None => db.provinces.iter().collect(),
        Some(key @ (AreaKey::Province { .. } | AreaKey::City { .. })) => {
            db.children(&key).collect()
        }
        Some(key @ AreaKey::District { .. }) => db.find_all(&key).collect(),
    };
    ActiveView {
        label: label(state),
        totals: Totals::over(rows.iter().copied()),
        rows,
    }
}
