// crates/growthmap-core/src/config.rs
//! Where the sources live and how big the rendered map is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.csv";
pub const DEFAULT_PROVINCES_FILE: &str = "provinces.geojson";
pub const DEFAULT_CITIES_FILE: &str = "cities.geojson";
pub const DEFAULT_DISTRICTS_FILE: &str = "districts.geojson";
pub const DEFAULT_CACHE_FILE: &str = "growthmap.cache.bin";

/// Paths to the customer table and the three boundary collections.
///
/// Files ending in `.gz` are decompressed on the fly when the `compact`
/// feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub customers: PathBuf,
    pub provinces: PathBuf,
    pub cities: PathBuf,
    pub districts: PathBuf,
    /// Binary cache of the built database. `None` disables the disk cache.
    pub cache: Option<PathBuf>,
}

impl DataSources {
    /// Default file names inside `dir`, with the disk cache enabled.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            customers: dir.join(DEFAULT_CUSTOMERS_FILE),
            provinces: dir.join(DEFAULT_PROVINCES_FILE),
            cities: dir.join(DEFAULT_CITIES_FILE),
            districts: dir.join(DEFAULT_DISTRICTS_FILE),
            cache: Some(dir.join(DEFAULT_CACHE_FILE)),
        }
    }

    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// All source files, in load order. The cache is not a source.
    #[must_use]
    pub fn source_paths(&self) -> [&Path; 4] {
        [
            self.customers.as_path(),
            self.provinces.as_path(),
            self.cities.as_path(),
            self.districts.as_path(),
        ]
    }
}

/// Pixel size of the map the viewport is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: f64,
    pub height: f64,
}

impl Default for MapSize {
    fn default() -> Self {
        Self {
            width: 1026.67,
            height: 450.0,
        }
    }
}

/// Viewport settings used by [`crate::view::viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub map_size: MapSize,
    /// Zoom used when nothing is selected.
    pub top_zoom: f64,
    /// Upper bound for computed zoom levels.
    pub max_zoom: Option<f64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            map_size: MapSize::default(),
            top_zoom: 5.0,
            max_zoom: None,
        }
    }
}
