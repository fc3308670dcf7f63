// Index model for the guild data cache.
//
// The on-disk layout is a fixed three-level hierarchy:
//
//     <root>/<guildId>/<providerId>/<dataId>.json
//
// and the in-memory index mirrors it level for level. Keys are derived
// purely positionally from a file's path relative to the root, so the
// derivation lives here next to the types it produces.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// File suffix that marks a record and is stripped to recover the data id.
pub const DATA_EXTENSION: &str = ".json";

/// data-id -> absolute file path.
pub type DataIndex = HashMap<String, PathBuf>;

/// provider-id -> data entries.
pub type ProviderIndex = HashMap<String, DataIndex>;

/// guild-id -> providers.
pub type CacheIndex = HashMap<String, ProviderIndex>;

/// A validated (guild, provider, data) key triple.
///
/// Constructing one of these is the only way paths get mapped to index
/// entries, so every entry in the index went through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub guild_id: String,
    pub provider_id: String,
    pub data_id: String,
}

impl RecordKey {
    /// Derive a key from a path relative to the cache root.
    ///
    /// Returns `None` unless the path is exactly three normal components
    /// deep and the last component carries the record extension. Anything
    /// else is a miskeyed file: the caller skips it instead of inserting a
    /// garbage key.
    pub fn from_relative(relative: &Path, extension: &str) -> Option<RecordKey> {
        let mut segments = Vec::with_capacity(3);
        for component in relative.components() {
            match component {
                Component::Normal(os) => segments.push(os.to_str()?),
                // `..`, root prefixes and the like never belong under the root
                _ => return None,
            }
        }

        let [guild_id, provider_id, file_name] = segments.as_slice() else {
            return None;
        };
        let data_id = file_name.strip_suffix(extension)?;

        if !Self::is_valid_segment(guild_id)
            || !Self::is_valid_segment(provider_id)
            || !Self::is_valid_segment(data_id)
        {
            return None;
        }

        Some(RecordKey {
            guild_id: (*guild_id).to_string(),
            provider_id: (*provider_id).to_string(),
            data_id: data_id.to_string(),
        })
    }

    /// A segment is usable as a single directory/file name component.
    pub fn is_valid_segment(segment: &str) -> bool {
        !segment.is_empty()
            && segment != "."
            && segment != ".."
            && !segment.contains('/')
            && !segment.contains('\\')
    }
}
