//! Per-identity statistics and advancement snapshots.
//!
//! The game server writes one `<uuid>.json` file per player into a stats
//! directory and an advancements directory. A player who has never joined
//! has no file; that is reported as `None`, not as an error. A file that
//! exists but does not parse is an error for the caller to handle.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mcstats_types::PlayerId;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Errors that can occur while reading an on-disk snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but does not have the expected structure.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Statistic category holding miscellaneous counters (play time, deaths,
/// distances, interactions).
pub const CUSTOM_CATEGORY: &str = "minecraft:custom";

/// Statistic category counting item uses (eating counts as a use).
pub const USED_CATEGORY: &str = "minecraft:used";

/// One player's statistics snapshot.
///
/// `stats` maps a category such as [`CUSTOM_CATEGORY`] to its counters.
/// Counter values are kept as raw JSON and only interpreted by
/// [`StatRecord::counter`], so an odd value in a category nobody reads
/// (the game stores counters as 32-bit ints, and busy ones wrap negative)
/// does not spoil the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatRecord {
    /// Counters grouped by namespaced category.
    #[serde(default)]
    pub stats: BTreeMap<String, BTreeMap<String, Value>>,

    /// Game data version that wrote the file.
    #[serde(rename = "DataVersion", default)]
    pub data_version: Option<u32>,
}

impl StatRecord {
    /// Counters of one category, if the category is present.
    pub fn category(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.stats.get(name)
    }

    /// A single counter, or 0 when the category or key is missing.
    ///
    /// Negative (wrapped) and non-integer values also read as 0.
    pub fn counter(&self, category: &str, key: &str) -> u64 {
        self.category(category)
            .and_then(|counters| counters.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Advancements
// ---------------------------------------------------------------------------

/// Progress on one advancement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdvancementProgress {
    /// All required criteria are met.
    #[serde(default)]
    pub done: bool,

    /// Criterion name to the timestamp it was met.
    #[serde(default)]
    pub criteria: BTreeMap<String, String>,
}

/// A value in an advancements file.
///
/// Most keys hold an [`AdvancementProgress`]; the file also carries a
/// top-level `DataVersion` integer, which lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AdvancementEntry {
    /// Progress on an advancement or recipe unlock.
    Progress(AdvancementProgress),
    /// Anything else.
    Other(Value),
}

impl AdvancementEntry {
    /// Whether this entry is a completed advancement.
    pub const fn is_done(&self) -> bool {
        match self {
            Self::Progress(progress) => progress.done,
            Self::Other(_) => false,
        }
    }
}

/// One player's advancement snapshot, keyed by `<category>/<name>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AchievementRecord {
    /// Entries in sorted key order.
    pub entries: BTreeMap<String, AdvancementEntry>,
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read `<stats_dir>/<id>.json`.
///
/// # Errors
///
/// Returns [`RecordError`] if the file exists but cannot be read or parsed.
pub fn read_stats(stats_dir: &Path, id: PlayerId) -> Result<Option<StatRecord>, RecordError> {
    read_json(&stats_dir.join(id.snapshot_file_name()))
}

/// Read `<advancements_dir>/<id>.json`.
///
/// # Errors
///
/// Returns [`RecordError`] if the file exists but cannot be read or parsed.
pub fn read_advancements(
    advancements_dir: &Path,
    id: PlayerId,
) -> Result<Option<AchievementRecord>, RecordError> {
    read_json(&advancements_dir.join(id.snapshot_file_name()))
}

/// Read and parse a JSON file, mapping "not found" to `Ok(None)`.
///
/// # Errors
///
/// Returns [`RecordError::Io`] for any I/O failure other than a missing
/// file, and [`RecordError::Parse`] if the content does not deserialize.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RecordError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RecordError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| RecordError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
