// crates/growthmap-core/src/style.rs
//! Choropleth styling: colormap, per-feature style and tooltip fields.

use crate::common::{Level, CUSTOMER_GROWTH_COLUMN, CITY_COLUMN, DISTRICT_COLUMN, PROVINCE_COLUMN};
use crate::model::AggregatedArea;
use serde::{Deserialize, Serialize};

pub const NO_DATA_COLOR: &str = "grey";
pub const OUTLINE_COLOR: &str = "#000000";
pub const BACKGROUND_FILL: &str = "white";
pub const COLORMAP_CAPTION: &str = "Customer Growth (%)";

/// Light yellow through teal to dark navy.
pub const DEFAULT_STOPS: [[u8; 3]; 3] = [[0xff, 0xff, 0xd9], [0x41, 0xb6, 0xc4], [0x08, 0x1d, 0x58]];

/// A linear colormap over `[vmin, vmax]` with evenly spaced stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colormap {
    pub vmin: f64,
    pub vmax: f64,
    pub stops: Vec<[u8; 3]>,
    pub caption: String,
}

impl Colormap {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self {
            vmin,
            vmax,
            stops: DEFAULT_STOPS.to_vec(),
            caption: COLORMAP_CAPTION.to_owned(),
        }
    }

    /// Spans the customer growth of `rows` that have data; `0..0` otherwise.
    pub fn for_customer_growth<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AggregatedArea>,
    {
        let (vmin, vmax) = rows
            .into_iter()
            .filter_map(AggregatedArea::customer_growth)
            .fold(None, |acc: Option<(f64, f64)>, g| match acc {
                None => Some((g, g)),
                Some((lo, hi)) => Some((lo.min(g), hi.max(g))),
            })
            .unwrap_or((0.0, 0.0));
        Self::new(vmin, vmax)
    }

    /// Hex color (`#rrggbb`) for `value`, clamped into range.
    #[must_use]
    pub fn color(&self, value: f64) -> String {
        let [r, g, b] = self.rgb(value);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    fn rgb(&self, value: f64) -> [u8; 3] {
        match self.stops.as_slice() {
            [] => [0x80, 0x80, 0x80],
            [only] => *only,
            stops => {
                let span = self.vmax - self.vmin;
                let t = if span > 0.0 && value.is_finite() {
                    ((value - self.vmin) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let segments = (stops.len() - 1) as f64;
                let pos = t * segments;
                let i = (pos.floor() as usize).min(stops.len() - 2);
                let local = pos - i as f64;
                let (a, b) = (stops[i], stops[i + 1]);
                let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8;
                [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
            }
        }
    }
}

/// Leaflet-style path options attached to each rendered feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill_color: String,
    pub color: String,
    pub fill_opacity: f64,
    pub weight: f64,
}

impl Style {
    /// Choropleth fill, grey for areas without data.
    pub fn choropleth(area: &AggregatedArea, colormap: &Colormap) -> Self {
        Self {
            fill_color: area
                .customer_growth()
                .map_or_else(|| NO_DATA_COLOR.to_owned(), |g| colormap.color(g)),
            ..Self::background()
        }
    }

    /// Plain white fill for a parent layer drawn under its children.
    pub fn background() -> Self {
        Self {
            fill_color: BACKGROUND_FILL.to_owned(),
            color: OUTLINE_COLOR.to_owned(),
            fill_opacity: 1.0,
            weight: 1.0,
        }
    }

    /// Hover style.
    pub fn highlight() -> Self {
        Self {
            fill_color: OUTLINE_COLOR.to_owned(),
            color: OUTLINE_COLOR.to_owned(),
            fill_opacity: 0.8,
            weight: 1.0,
        }
    }
}

/// (property, alias) pairs shown in the tooltip of a feature at `level`.
#[must_use]
pub fn tooltip_fields(level: Level) -> Vec<(&'static str, &'static str)> {
    let mut fields = vec![(PROVINCE_COLUMN, "Province")];
    if level >= Level::City {
        fields.push((CITY_COLUMN, "City"));
    }
    if level == Level::District {
        fields.push((DISTRICT_COLUMN, "District"));
    }
    fields.extend([
        ("2019_CUST_NO", "Total Customer as of 2019"),
        ("2024_CUST_NO", "Total Customer as of 2024"),
        (CUSTOMER_GROWTH_COLUMN, "Customer Growth (%)"),
    ]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colormap_hits_its_stops() {
        let cm = Colormap::new(0.0, 100.0);
        assert_eq!(cm.color(0.0), "#ffffd9");
        assert_eq!(cm.color(50.0), "#41b6c4");
        assert_eq!(cm.color(100.0), "#081d58");
        // Out of range clamps.
        assert_eq!(cm.color(-10.0), "#ffffd9");
        assert_eq!(cm.color(1e9), "#081d58");
    }

    #[test]
    fn flat_colormap_uses_first_stop() {
        let cm = Colormap::new(3.0, 3.0);
        assert_eq!(cm.color(3.0), "#ffffd9");
    }

    #[test]
    fn tooltip_grows_with_level() {
        assert_eq!(tooltip_fields(Level::Province).len(), 4);
        let district = tooltip_fields(Level::District);
        assert_eq!(district.len(), 6);
        assert_eq!(district[2], (DISTRICT_COLUMN, "District"));
    }
}
