// This is the guild data cache - a hierarchical index over JSON record files.
// Notice how this module has NO chat-platform code: it works with plain
// string keys, so the bot's command layer (or anything else) can sit on top.
//
// The cache scans the root directory once at startup, keeps a three-level
// index (guild -> provider -> data-id -> path) in memory, and answers
// lookups and enumerations without touching the directory tree again.
// Writes that go through the cache update the index in place; files dropped
// into the root by other means are invisible until the next rebuild.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use super::cache_models::{CacheIndex, DataIndex, ProviderIndex, RecordKey, DATA_EXTENSION};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CacheError {
    /// A record file exists but does not parse as JSON. The index entry is
    /// left alone; the caller decides what to tell the user.
    #[error("Malformed record at {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The directory walk could not complete. The index keeps whatever it
    /// held before the scan started.
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    /// A key segment that cannot be used as a path component.
    #[error("Invalid key segment: {0:?}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to walk {root}: {source}")]
    Walk { root: PathBuf, source: io::Error },
}

// ============================================================================
// SCANNER PORT
// ============================================================================
// The recursive directory walk is the one piece of filesystem machinery the
// cache does not own. The core defines WHAT it needs; infra provides the
// walkdir-backed implementation, and tests provide canned file lists.

pub trait DirectoryScanner: Send + Sync {
    /// List every file under `root` whose name ends with `extension`.
    ///
    /// A missing root is an empty listing, not an error. Walk failures
    /// (permissions, unreadable entries) are hard errors: the cache surfaces
    /// them untouched rather than serving a silently partial index.
    fn scan(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError>;
}

// ============================================================================
// CACHE
// ============================================================================

/// Outcome of an index build: how many files were merged in and how many
/// were skipped for not sitting at the expected three-level depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub indexed: usize,
    pub skipped: usize,
}

/// Hierarchical file cache over `<root>/<guildId>/<providerId>/<dataId>.json`.
///
/// One instance owns one root directory; the bot wires it up at startup and
/// shares it behind an `Arc`. All index mutation happens under a single
/// write lock, so readers never observe a half-merged scan, and lookups
/// clone small snapshots out instead of holding the lock across file IO.
pub struct GuildDataCache<S: DirectoryScanner> {
    root: PathBuf,
    extension: String,
    scanner: S,
    index: RwLock<CacheIndex>,
}

impl<S: DirectoryScanner> GuildDataCache<S> {
    pub fn new(root: impl Into<PathBuf>, scanner: S) -> Self {
        Self {
            root: root.into(),
            extension: DATA_EXTENSION.to_string(),
            scanner,
            index: RwLock::new(CacheIndex::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root directory and merge every conforming file into the
    /// index. Additive-only: entries are inserted or overwritten, never
    /// removed, so rebuilding over identical contents is idempotent and a
    /// rebuild never drops entries for files deleted behind our back (known
    /// staleness property - stale entries degrade to misses on read).
    pub async fn build_index(&self) -> Result<ScanSummary, CacheError> {
        // Collect the full listing before taking the lock: a failed walk
        // must not leave the index half-updated.
        let files = self.scanner.scan(&self.root, &self.extension)?;

        let mut summary = ScanSummary::default();
        let mut index = self.index.write().await;
        for file in files {
            let Ok(relative) = file.strip_prefix(&self.root) else {
                tracing::warn!(path = %file.display(), "Scanner returned a path outside the root, skipping");
                summary.skipped += 1;
                continue;
            };
            match RecordKey::from_relative(relative, &self.extension) {
                Some(key) => {
                    Self::insert_entry(&mut index, &key, file);
                    summary.indexed += 1;
                }
                None => {
                    tracing::warn!(
                        path = %file.display(),
                        "File is not at the expected guild/provider/data depth, skipping"
                    );
                    summary.skipped += 1;
                }
            }
        }
        drop(index);

        tracing::info!(
            root = %self.root.display(),
            indexed = summary.indexed,
            skipped = summary.skipped,
            "Guild data index built"
        );
        Ok(summary)
    }

    /// Providers known for a guild, as a cloned snapshot.
    ///
    /// Get-or-create: an unknown guild is registered with an empty provider
    /// map rather than treated as an error, so this read has a (harmless)
    /// mutating side effect on first access per guild.
    pub async fn get_providers(&self, guild_id: &str) -> ProviderIndex {
        let mut index = self.index.write().await;
        index.entry(guild_id.to_string()).or_default().clone()
    }

    /// Data ids (and their paths) for one provider, or `None` if the guild
    /// or provider is unknown. Absence is not an error.
    pub async fn get_data_ids(&self, guild_id: &str, provider_id: &str) -> Option<DataIndex> {
        let index = self.index.read().await;
        index.get(guild_id)?.get(provider_id).cloned()
    }

    /// Look up and parse a record.
    ///
    /// Returns `Ok(None)` when the key is absent at any level or when the
    /// indexed file no longer exists on disk - a stale entry is a miss, not
    /// a crash. Invalid JSON is a recoverable `Malformed` error.
    pub async fn read_record(
        &self,
        guild_id: &str,
        provider_id: &str,
        data_id: &str,
    ) -> Result<Option<serde_json::Value>, CacheError> {
        let path = {
            let index = self.index.read().await;
            match index
                .get(guild_id)
                .and_then(|providers| providers.get(provider_id))
                .and_then(|entries| entries.get(data_id))
            {
                Some(path) => path.clone(),
                None => return Ok(None),
            }
        };

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            // The file was deleted after indexing; degrade to a miss.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CacheError::Io(err)),
        };

        let value =
            serde_json::from_str(&text).map_err(|source| CacheError::Malformed { path, source })?;
        Ok(Some(value))
    }

    /// Serialize `value` to the canonical path for the key and register it
    /// in the index, so reads and enumerations see it immediately without a
    /// rescan. Intermediate directories are created as needed; an existing
    /// record is overwritten.
    pub async fn write_record<T>(
        &self,
        guild_id: &str,
        provider_id: &str,
        data_id: &str,
        value: &T,
    ) -> Result<(), CacheError>
    where
        T: Serialize + ?Sized,
    {
        let key = Self::validated_key(guild_id, provider_id, data_id)?;
        let path = self.record_path(&key);

        let text = serde_json::to_string_pretty(value).map_err(|source| CacheError::Malformed {
            path: path.clone(),
            source,
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, text).await?;

        let mut index = self.index.write().await;
        Self::insert_entry(&mut index, &key, path);
        Ok(())
    }

    /// Canonical on-disk location for a key.
    fn record_path(&self, key: &RecordKey) -> PathBuf {
        self.root
            .join(&key.guild_id)
            .join(&key.provider_id)
            .join(format!("{}{}", key.data_id, self.extension))
    }

    fn validated_key(
        guild_id: &str,
        provider_id: &str,
        data_id: &str,
    ) -> Result<RecordKey, CacheError> {
        for segment in [guild_id, provider_id, data_id] {
            if !RecordKey::is_valid_segment(segment) {
                return Err(CacheError::InvalidKey(segment.to_string()));
            }
        }
        Ok(RecordKey {
            guild_id: guild_id.to_string(),
            provider_id: provider_id.to_string(),
            data_id: data_id.to_string(),
        })
    }

    fn insert_entry(index: &mut CacheIndex, key: &RecordKey, path: PathBuf) {
        index
            .entry(key.guild_id.clone())
            .or_default()
            .entry(key.provider_id.clone())
            .or_default()
            .insert(key.data_id.clone(), path);
    }
}

// ============================================================================
// TESTS
// ============================================================================
