//! Core logic for the mcstats API.
//!
//! Everything in this crate is synchronous. The HTTP layer runs the
//! blocking parts on Tokio's blocking pool; nothing here needs a runtime.
//!
//! # Pipeline
//!
//! ```text
//! usercache.json --> roster --+
//!                             +--> summary::aggregate --> PlayerSummary
//! stats/<id>.json ----------->+        |         |
//! advancements/<id>.json ---->+      diet   advancements
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Typed configuration loaded from `mcstats-config.yaml`
//! - [`roster`] -- Identity roster loader
//! - [`records`] -- Per-identity statistics and advancement snapshots
//! - [`diet`] -- Food-tier tables and the diet classifier
//! - [`advancements`] -- Completed advancement extraction
//! - [`summary`] -- Pure aggregation into a [`PlayerSummary`]
//! - [`store`] -- Filesystem-backed batch aggregation over the roster
//!
//! [`PlayerSummary`]: mcstats_types::PlayerSummary

pub mod advancements;
pub mod config;
pub mod diet;
pub mod records;
pub mod roster;
pub mod store;
pub mod summary;

pub use config::{AppConfig, ConfigError};
pub use records::{AchievementRecord, RecordError, StatRecord};
pub use store::PlayerStore;
