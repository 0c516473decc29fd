// crates/growthmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression, the bincode cache) and
//! delegates parsing to the customer-table and boundary readers.

use crate::aggregate::aggregate;
use crate::common::Level;
use crate::config::DataSources;
use crate::error::Result;
use crate::model::{GeoArea, GrowthDb};
use crate::raw::CustomerRecord;
use once_cell::sync::OnceCell;
use std::path::Path;

pub mod boundary;
#[cfg(feature = "cache")]
pub mod cache;
pub mod common_io;
pub mod customers;

pub use boundary::read_boundaries;
pub use customers::read_customers;

static GROWTH_DB_CACHE: OnceCell<GrowthDb> = OnceCell::new();

/// Environment variable naming the default data directory.
pub const DATA_DIR_ENV: &str = "GROWTHMAP_DATA_DIR";

fn source_name(path: &Path) -> String {
    path.display().to_string()
}

pub fn load_customers(path: &Path) -> Result<Vec<CustomerRecord>> {
    let reader = common_io::open_stream(path)?;
    read_customers(reader, &source_name(path))
}

pub fn load_boundaries(path: &Path, level: Level) -> Result<Vec<GeoArea>> {
    let reader = common_io::open_stream(path)?;
    read_boundaries(reader, level, &source_name(path))
}

impl GrowthDb {
    /// `$GROWTHMAP_DATA_DIR`, or `./data` when unset.
    pub fn default_data_dir() -> std::path::PathBuf {
        std::env::var_os(DATA_DIR_ENV).map_or_else(|| "data".into(), Into::into)
    }

    /// Reads all four sources and aggregates them. Never touches the cache.
    ///
    /// # Errors
    ///
    /// Any missing file or column aborts the build; there is no partial result.
    pub fn build_from_sources(sources: &DataSources) -> Result<Self> {
        let records = load_customers(&sources.customers)?;
        let provinces = load_boundaries(&sources.provinces, Level::Province)?;
        let cities = load_boundaries(&sources.cities, Level::City)?;
        let districts = load_boundaries(&sources.districts, Level::District)?;
        aggregate(&records, provinces, cities, districts)
    }

    /// **Smart Load:** uses the disk cache when it was built from exactly
    /// the current sources, otherwise builds from the sources and rewrites
    /// the cache (best effort).
    pub fn load(sources: &DataSources) -> Result<Self> {
        #[cfg(feature = "cache")]
        if let Some(cache_path) = sources.cache.as_deref().filter(|p| p.exists()) {
            match cache::read_cache(cache_path) {
                Ok(cached) if cached.matches(sources) => {
                    log::info!("Loaded database from cache {}", cache_path.display());
                    return Ok(cached.db);
                }
                Ok(_) => log::info!("Cache {} is stale, rebuilding", cache_path.display()),
                Err(e) => log::warn!("Ignoring unreadable cache {}: {e}", cache_path.display()),
            }
        }

        Self::refresh(sources)
    }

    /// Rebuilds from the sources regardless of cache state, then rewrites the
    /// cache. This is the invalidation path.
    pub fn refresh(sources: &DataSources) -> Result<Self> {
        // Taken before reading so a source edited mid-build leaves the cache stale.
        #[cfg(feature = "cache")]
        let fingerprint = cache::SourceFingerprint::of(sources);

        let db = Self::build_from_sources(sources)?;

        #[cfg(feature = "cache")]
        if let (Some(cache_path), Some(fingerprint)) = (sources.cache.as_deref(), &fingerprint) {
            if let Err(e) = cache::write_cache(cache_path, fingerprint, &db) {
                log::warn!("Could not write cache {}: {e}", cache_path.display());
            }
        }

        Ok(db)
    }

    /// Process-wide instance: the first call loads, later calls (with any
    /// sources) return the same database.
    pub fn shared(sources: &DataSources) -> Result<&'static Self> {
        GROWTH_DB_CACHE.get_or_try_init(|| Self::load(sources))
    }
}
