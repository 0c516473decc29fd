// crates/growthmap-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading sources or building a [`crate::GrowthDb`].
///
/// Only [`GrowthError::Configuration`] and [`GrowthError::NotFound`] describe
/// problems with the inputs themselves; the remaining variants wrap the
/// underlying library errors. Data gaps (areas without rows, zero 2019
/// denominators) are never errors.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// A required column, feature property or geometry type is absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("line {line}: column {column} has non-integer value {value:?}")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    /// A group's summed counts do not fit in `i64`.
    #[error("count overflow while summing {0}")]
    Overflow(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    #[cfg(feature = "cache")]
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

impl GrowthError {
    pub(crate) fn missing_column(column: impl AsRef<str>, source: impl AsRef<str>) -> Self {
        Self::Configuration(format!(
            "required column `{}` is missing from {}",
            column.as_ref(),
            source.as_ref()
        ))
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;
