//! Shared type definitions for the mcstats API.
//!
//! Every type that crosses the HTTP boundary lives here so the handlers,
//! the aggregation core, and the status probe agree on one shape. Types
//! flow downstream to `TypeScript` via `ts-rs` for the stats dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for player identifiers
//! - [`player`] -- Roster identities, player summaries, and diet tags
//! - [`status`] -- Live server status payload

pub mod ids;
pub mod player;
pub mod status;

// Re-export all public types at crate root for convenience.
pub use ids::PlayerId;
pub use player::{Diet, PlayerIdentity, PlayerSummary};
pub use status::LivenessStatus;
