// crates/growthmap-core/src/loader/cache.rs
#![cfg(feature = "cache")]

use crate::config::DataSources;
use crate::error::Result;
use crate::model::GrowthDb;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Refuse to deserialize anything larger than this.
const CACHE_LIMIT: u64 = 512 * 1024 * 1024;

/// Identity of one source file at cache time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    /// Canonical path when it can be resolved, the configured path otherwise.
    pub path: PathBuf,
    pub len: u64,
    /// Modification time in nanoseconds since the Unix epoch.
    pub modified_ns: u128,
}

impl SourceStamp {
    fn of(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        let modified_ns = meta
            .modified()
            .ok()?
            .duration_since(UNIX_EPOCH)
            .ok()?
            .as_nanos();
        Some(Self {
            path: std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            len: meta.len(),
            modified_ns,
        })
    }
}

/// Which sources, in which state, a cached database was built from.
///
/// Stored in front of the database inside the cache file. A cache is only
/// reused when the current sources produce the same fingerprint, so pointing
/// one source at another file invalidates it even if that file is older.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint(pub Vec<SourceStamp>);

impl SourceFingerprint {
    /// `None` when any source cannot be inspected.
    pub fn of(sources: &DataSources) -> Option<Self> {
        sources
            .source_paths()
            .iter()
            .map(|path| SourceStamp::of(path))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }
}

/// Cache file contents: the fingerprint it was built from and the database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CachedDb {
    pub fingerprint: SourceFingerprint,
    pub db: GrowthDb,
}

impl CachedDb {
    #[must_use]
    pub fn matches(&self, sources: &DataSources) -> bool {
        SourceFingerprint::of(sources).as_ref() == Some(&self.fingerprint)
    }
}

/// Borrowing twin of [`CachedDb`] for writing; same field order.
#[derive(Serialize)]
struct CachedDbRef<'a> {
    fingerprint: &'a SourceFingerprint,
    db: &'a GrowthDb,
}

/// The cache is usable when it decodes and was built from exactly the
/// current sources.
pub fn is_cache_fresh(sources: &DataSources, cache_path: &Path) -> bool {
    read_cache(cache_path).is_ok_and(|cached| cached.matches(sources))
}

pub fn read_cache(cache_path: &Path) -> Result<CachedDb> {
    let file = BufReader::new(File::open(cache_path)?);

    #[cfg(feature = "compact")]
    let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
    #[cfg(not(feature = "compact"))]
    let reader: Box<dyn Read> = Box::new(file);

    // Streamed, so the limit bounds what is decompressed as well.
    let cached = bincode::DefaultOptions::new()
        .with_limit(CACHE_LIMIT)
        .allow_trailing_bytes()
        .deserialize_from(reader)?;
    Ok(cached)
}

pub fn write_cache(
    cache_path: &Path,
    fingerprint: &SourceFingerprint,
    db: &GrowthDb,
) -> Result<()> {
    let bytes = bincode::DefaultOptions::new().serialize(&CachedDbRef { fingerprint, db })?;

    let file = File::create(cache_path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        encoder.write_all(&bytes)?;
        encoder.finish()?.flush()?;
    }

    #[cfg(not(feature = "compact"))]
    {
        let mut writer = writer;
        writer.write_all(&bytes)?;
        writer.flush()?;
    }

    log::info!(
        "Wrote database cache ({} bytes) to {}",
        bytes.len(),
        cache_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_follows_path_and_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sources = DataSources::from_dir(dir.path());
        for path in sources.source_paths() {
            std::fs::write(path, "x").expect("write");
        }
        let before = SourceFingerprint::of(&sources).expect("all sources exist");
        assert_eq!(before.0.len(), 4);
        assert_eq!(SourceFingerprint::of(&sources), Some(before.clone()));

        std::fs::write(&sources.cities, "longer").expect("rewrite");
        assert_ne!(SourceFingerprint::of(&sources), Some(before.clone()));

        let mut moved = sources.clone();
        moved.customers = dir.path().join("other.csv");
        std::fs::write(&moved.customers, "x").expect("write");
        let moved_fp = SourceFingerprint::of(&moved).expect("exists");
        assert_ne!(moved_fp.0[0].path, before.0[0].path);

        std::fs::remove_file(&sources.districts).expect("remove");
        assert!(SourceFingerprint::of(&sources).is_none());
    }

    #[test]
    fn cache_round_trips_with_its_fingerprint() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sources = DataSources::from_dir(dir.path());
        for path in sources.source_paths() {
            std::fs::write(path, "x").expect("write");
        }
        let fingerprint = SourceFingerprint::of(&sources).expect("exists");
        let cache_path = dir.path().join("db.bin");
        write_cache(&cache_path, &fingerprint, &GrowthDb::default()).expect("write");

        let cached = read_cache(&cache_path).expect("read");
        assert_eq!(cached.fingerprint, fingerprint);
        assert!(cached.matches(&sources));
        assert!(is_cache_fresh(&sources, &cache_path));
    }
}
