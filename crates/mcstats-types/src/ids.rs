//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Player identities are Mojang account UUIDs. The statistics and
//! advancement snapshots written by the game server are named after the
//! lowercase hyphenated form of this id, which is exactly what the
//! [`Display`](core::fmt::Display) impl produces.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// File name of this player's per-identity snapshot (`<uuid>.json`).
    pub fn snapshot_file_name(&self) -> String {
        format!("{}.json", self.0.as_hyphenated())
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PlayerId> for Uuid {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}
