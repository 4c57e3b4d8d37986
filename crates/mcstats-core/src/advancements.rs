//! Completed advancement extraction.
//!
//! Advancement keys look like `minecraft:story/mine_stone`. Only the five
//! visible advancement tabs count; recipe unlocks (`minecraft:recipes/...`)
//! share the file but are not achievements.

use crate::records::AchievementRecord;

/// Advancement tabs whose entries are reported.
pub const RECOGNIZED_CATEGORIES: &[&str] = &[
    "minecraft:story",
    "minecraft:nether",
    "minecraft:end",
    "minecraft:adventure",
    "minecraft:husbandry",
];

/// Short names of every completed advancement in a recognized tab.
///
/// The name is everything after the first `/`, so nested keys such as
/// `minecraft:adventure/trim/sentry` yield `trim/sentry`. Output follows
/// the record's sorted key order.
pub fn extract_names(record: &AchievementRecord) -> Vec<String> {
    record
        .entries
        .iter()
        .filter(|(_, entry)| entry.is_done())
        .filter_map(|(key, _)| {
            let (category, name) = key.split_once('/')?;
            RECOGNIZED_CATEGORIES
                .contains(&category)
                .then(|| name.to_owned())
        })
        .collect()
}
