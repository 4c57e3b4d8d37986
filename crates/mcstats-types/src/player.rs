//! Player-facing types: roster identities and aggregated summaries.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlayerId;

// ---------------------------------------------------------------------------
// Roster identity
// ---------------------------------------------------------------------------

/// A known player: stable account id plus display name.
///
/// Sourced from the game server's user cache, which names the id field
/// `uuid`. Both spellings are accepted when deserializing; extra fields
/// such as `expiresOn` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerIdentity {
    /// Account UUID.
    #[serde(alias = "uuid")]
    pub id: PlayerId,
    /// Display name at the time the roster was written.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Diet
// ---------------------------------------------------------------------------

/// Food-tier tag derived from the items a player has consumed.
///
/// Tiers form a strict precedence: a single meat item makes a player a
/// carnivore no matter what else they ate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    /// Only plant-based food, or nothing at all.
    Vegan,
    /// Animal products such as milk or honey, but no fish or meat.
    Vegetarian,
    /// Fish, but no meat.
    Pescetarian,
    /// At least one meat item.
    Carnivore,
}

// ---------------------------------------------------------------------------
// Player summary
// ---------------------------------------------------------------------------

/// Normalized per-player record served by `GET /players`.
///
/// Every counter defaults to zero when the underlying statistic is
/// missing, so a player who has never joined still gets a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Account UUID.
    pub id: PlayerId,
    /// Display name from the roster.
    pub name: String,
    /// Total time played, in game ticks (20 per second).
    #[ts(type = "number")]
    pub playtime_ticks: u64,
    /// Number of deaths.
    #[ts(type = "number")]
    pub deaths: u64,
    /// Distance travelled on foot, in water, and by boat, in centimetres.
    #[ts(type = "number")]
    pub total_distance_cm: u64,
    /// Distance ridden on pigs, in centimetres.
    #[ts(type = "number")]
    pub pig_distance_cm: u64,
    /// Distance travelled by boat, in centimetres.
    #[ts(type = "number")]
    pub boat_distance_cm: u64,
    /// Diet classification.
    pub diet: Diet,
    /// Number of times the player rang a bell.
    #[ts(type = "number")]
    pub bell_rings: u64,
    /// Short names of completed advancements (e.g. `mine_stone`).
    pub advancement_names: Vec<String>,
}
