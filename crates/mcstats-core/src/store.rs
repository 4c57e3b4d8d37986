//! Filesystem-backed player summaries.
//!
//! [`PlayerStore`] re-reads the roster and every snapshot on each call.
//! There is no cache; the game server rewrites the files while running
//! and the API always reports what is on disk right now.

use std::path::Path;

use mcstats_types::{PlayerId, PlayerIdentity, PlayerSummary};
use tracing::{debug, warn};

use crate::config::DataConfig;
use crate::records::{RecordError, read_advancements, read_stats};
use crate::roster;
use crate::summary::aggregate;

/// Reads snapshots from the configured directories and aggregates them.
#[derive(Debug, Clone)]
pub struct PlayerStore {
    config: DataConfig,
}

impl PlayerStore {
    /// Create a store over the given snapshot locations.
    pub const fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Store reading `usercache.json`, `stats/`, and `advancements/`
    /// under a single directory, the way a world folder is laid out.
    pub fn in_dir(root: &Path) -> Self {
        Self::new(DataConfig {
            roster_path: root.join("usercache.json"),
            stats_dir: root.join("stats"),
            advancements_dir: root.join("advancements"),
            skip_malformed_records: false,
        })
    }

    /// The snapshot locations this store reads.
    pub const fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Load the identity roster.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the roster exists but is malformed.
    pub fn roster(&self) -> Result<Vec<PlayerIdentity>, RecordError> {
        roster::load(&self.config.roster_path)
    }

    /// Summaries for every roster identity, in roster order.
    ///
    /// By default a malformed snapshot fails the whole batch. With
    /// `skip_malformed_records` set, that player is left out and a
    /// warning is logged instead.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the roster is malformed, or if any
    /// snapshot is malformed and skipping is disabled.
    pub fn summaries(&self) -> Result<Vec<PlayerSummary>, RecordError> {
        let roster = self.roster()?;
        let mut summaries = Vec::with_capacity(roster.len());

        for identity in &roster {
            match self.summarize(identity) {
                Ok(summary) => summaries.push(summary),
                Err(e) if self.config.skip_malformed_records => {
                    warn!(
                        player = %identity.id,
                        name = identity.name,
                        error = %e,
                        "Skipping player with unreadable snapshot"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            roster = roster.len(),
            summaries = summaries.len(),
            "Player summaries aggregated"
        );
        Ok(summaries)
    }

    /// Summary for one roster identity, or `None` if `id` is not in the
    /// roster.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the roster or this player's snapshots
    /// are malformed.
    pub fn summary(&self, id: PlayerId) -> Result<Option<PlayerSummary>, RecordError> {
        self.roster()?
            .iter()
            .find(|identity| identity.id == id)
            .map(|identity| self.summarize(identity))
            .transpose()
    }

    fn summarize(&self, identity: &PlayerIdentity) -> Result<PlayerSummary, RecordError> {
        let stats = read_stats(&self.config.stats_dir, identity.id)?;
        let advancements = read_advancements(&self.config.advancements_dir, identity.id)?;
        Ok(aggregate(identity, stats.as_ref(), advancements.as_ref()))
    }
}
