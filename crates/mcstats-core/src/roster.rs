//! Identity roster loader.
//!
//! The roster is the game server's `usercache.json`: a JSON array of
//! `{ "name", "uuid", "expiresOn" }` objects covering every account that
//! has ever joined. Order is preserved and duplicates are not removed.

use std::path::Path;

use mcstats_types::PlayerIdentity;

use crate::records::{RecordError, read_json};

/// Load the roster at `path`.
///
/// A missing file is an empty roster.
///
/// # Errors
///
/// Returns [`RecordError::Parse`] if the file is not an array of
/// identity records (including an id that is not a UUID), or
/// [`RecordError::Io`] if it exists but cannot be read.
pub fn load(path: &Path) -> Result<Vec<PlayerIdentity>, RecordError> {
    let roster: Option<Vec<PlayerIdentity>> = read_json(path)?;
    let roster = roster.unwrap_or_default();
    tracing::debug!(path = %path.display(), players = roster.len(), "Roster loaded");
    Ok(roster)
}
