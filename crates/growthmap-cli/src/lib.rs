//! growthmap-cli
//! =============
//!
//! Command-line interface for the `growthmap-core` customer-growth model.
//!
//! This crate primarily provides a binary (`growthmap`). The library target
//! only carries this overview.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! growthmap --data-dir data stats
//! growthmap view --province Bali --city Denpasar
//! growthmap export --province Bali --pretty -o bali.geojson
//! growthmap replay actions.txt
//! growthmap build-cache
//! ```
//!
//! Every data path can also come from the environment: `GROWTHMAP_DATA_DIR`,
//! `GROWTHMAP_CUSTOMERS`, `GROWTHMAP_PROVINCES`, `GROWTHMAP_CITIES`,
//! `GROWTHMAP_DISTRICTS` and `GROWTHMAP_CACHE`. Log output follows `RUST_LOG`.
//!
//! For programmatic access use the [`growthmap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
