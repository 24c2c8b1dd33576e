//! Memoized loading of the raw dataset.
//!
//! Parsing the CSV exports is the expensive step, so the loaded DuckDB
//! tables are kept and reused for as long as the data files are unchanged.
//! The cache key is the canonical data directory plus a fingerprint of every
//! known data file (name, size, modification time); any change to the key
//! triggers a full reload. Only raw data is cached. Aggregates are cheap and
//! filter-dependent, and are always recomputed.

use crate::config;
use crate::connection::Connection;
use crate::error::{AnalyticsError, Result};
use crate::models::Capabilities;
use crate::provider::{detect_capabilities, DataProvider};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// DatasetKey
// ---------------------------------------------------------------------------

/// Identity of a dataset on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetKey {
    /// Canonicalized data directory.
    pub dir: PathBuf,
    /// `file:len:mtime` for each known data file, `file:-` when absent.
    pub fingerprint: String,
}

impl DatasetKey {
    /// Compute the key for `dir` from file metadata (no file contents are read).
    pub fn compute(dir: &Path) -> Result<Self> {
        let dir = fs::canonicalize(dir)?;
        let files = config::csv_files();
        let mut names: Vec<&str> = files.values().copied().collect();
        names.sort_unstable();

        let mut parts = Vec::with_capacity(names.len());
        for name in names {
            match fs::metadata(dir.join(name)) {
                Ok(meta) => {
                    let mtime = meta
                        .modified()?
                        .duration_since(UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0);
                    parts.push(format!("{}:{}:{}", name, meta.len(), mtime));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => parts.push(format!("{}:-", name)),
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self {
            dir,
            fingerprint: parts.join(";"),
        })
    }
}

// ---------------------------------------------------------------------------
// LoadedDataset
// ---------------------------------------------------------------------------

/// A loaded dataset: the DuckDB tables plus the capabilities detected on them.
pub struct LoadedDataset {
    key: DatasetKey,
    conn: Connection,
    capabilities: Capabilities,
}

impl LoadedDataset {
    /// Load every data file in `key.dir` into a fresh in-memory database.
    fn load(key: DatasetKey) -> Result<Self> {
        let conn = Connection::new()?;
        conn.load_csv_dir(&key.dir)?;
        let capabilities = detect_capabilities(&conn)?;
        Ok(Self {
            key,
            conn,
            capabilities,
        })
    }

    pub fn key(&self) -> &DatasetKey {
        &self.key
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Data provider over this dataset, reusing the detected capabilities.
    pub fn provider(&self) -> DataProvider<'_> {
        DataProvider::with_capabilities(&self.conn, self.capabilities)
    }
}

// ---------------------------------------------------------------------------
// DatasetCache
// ---------------------------------------------------------------------------

/// Holds at most one loaded dataset and reloads it when its key changes.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<LoadedDataset>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `dir`, loading it if nothing is cached or the
    /// cached entry was built from a different directory or file state.
    pub fn load(&mut self, dir: &Path) -> Result<&LoadedDataset> {
        let key = DatasetKey::compute(dir)?;
        let hit = matches!(&self.entry, Some(e) if e.key == key);

        if hit {
            debug!(dir = %key.dir.display(), "dataset cache hit");
        } else {
            info!(dir = %key.dir.display(), "loading dataset");
            // Drop the stale entry first so a failed reload never serves old data
            self.entry = None;
            self.entry = Some(LoadedDataset::load(key)?);
            self.loads += 1;
        }

        self.entry
            .as_ref()
            .ok_or_else(|| AnalyticsError::NotFound(format!("No dataset cached for {}", dir.display())))
    }

    /// Whether [`load`](Self::load) would reload for `dir`.
    pub fn is_stale(&self, dir: &Path) -> Result<bool> {
        match &self.entry {
            None => Ok(true),
            Some(e) => Ok(e.key != DatasetKey::compute(dir)?),
        }
    }

    /// The cached dataset, without revalidating it.
    pub fn current(&self) -> Option<&LoadedDataset> {
        self.entry.as_ref()
    }

    /// Number of times a dataset has been (re)loaded.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Drop the cached dataset.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
