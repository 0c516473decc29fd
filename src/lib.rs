//! Workspace umbrella crate. Re-exports [`growthmap_core`] so the demos can
//! be run from the repository root.

pub use growthmap_core::*;
