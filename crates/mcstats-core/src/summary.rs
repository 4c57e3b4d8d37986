//! Pure aggregation of one player's snapshots into a [`PlayerSummary`].

use mcstats_types::{PlayerIdentity, PlayerSummary};

use crate::advancements::extract_names;
use crate::diet::classify;
use crate::records::{AchievementRecord, CUSTOM_CATEGORY, StatRecord};

/// Ticks played.
pub const PLAY_TIME: &str = "minecraft:play_time";
/// Deaths.
pub const DEATHS: &str = "minecraft:deaths";
/// Bell rings.
pub const BELL_RING: &str = "minecraft:bell_ring";
/// Distance ridden on a pig.
pub const PIG_ONE_CM: &str = "minecraft:pig_one_cm";
/// Distance travelled by boat.
pub const BOAT_ONE_CM: &str = "minecraft:boat_one_cm";

/// Locomotion counters that make up `totalDistanceCm`.
///
/// Pig riding, horses, minecarts, elytra, and creative flight are not
/// part of the total.
pub const TOTAL_DISTANCE_KEYS: [&str; 6] = [
    "minecraft:walk_one_cm",
    "minecraft:sprint_one_cm",
    "minecraft:walk_under_water_one_cm",
    "minecraft:walk_on_water_one_cm",
    "minecraft:swim_one_cm",
    BOAT_ONE_CM,
];

/// Build the summary for `identity`.
///
/// Missing snapshots behave like empty ones: every counter is zero, the
/// diet is vegan, and there are no advancements.
pub fn aggregate(
    identity: &PlayerIdentity,
    stats: Option<&StatRecord>,
    advancements: Option<&AchievementRecord>,
) -> PlayerSummary {
    let empty_stats = StatRecord::default();
    let stats = stats.unwrap_or(&empty_stats);
    let custom = |key: &str| stats.counter(CUSTOM_CATEGORY, key);

    let total_distance_cm = TOTAL_DISTANCE_KEYS
        .iter()
        .fold(0_u64, |total, key| total.saturating_add(custom(key)));

    PlayerSummary {
        id: identity.id,
        name: identity.name.clone(),
        playtime_ticks: custom(PLAY_TIME),
        deaths: custom(DEATHS),
        total_distance_cm,
        pig_distance_cm: custom(PIG_ONE_CM),
        boat_distance_cm: custom(BOAT_ONE_CM),
        diet: classify(stats),
        bell_rings: custom(BELL_RING),
        advancement_names: advancements.map(extract_names).unwrap_or_default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mcstats_types::Diet;

    use super::*;

    fn identity() -> PlayerIdentity {
        PlayerIdentity {
            id: "069a79f4-44e9-4726-a5be-fca90e38aaf5".parse().unwrap(),
            name: String::from("Notch"),
        }
    }

    fn stats(json: &str) -> StatRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn absent_records_yield_zeroed_summary() {
        let summary = aggregate(&identity(), None, None);
        assert_eq!(summary.name, "Notch");
        assert_eq!(summary.playtime_ticks, 0);
        assert_eq!(summary.deaths, 0);
        assert_eq!(summary.total_distance_cm, 0);
        assert_eq!(summary.pig_distance_cm, 0);
        assert_eq!(summary.boat_distance_cm, 0);
        assert_eq!(summary.bell_rings, 0);
        assert_eq!(summary.diet, Diet::Vegan);
        assert!(summary.advancement_names.is_empty());
    }

    #[test]
    fn total_distance_sums_six_modes_and_skips_pig() {
        let record = stats(
            r#"{ "stats": { "minecraft:custom": {
                "minecraft:walk_one_cm": 1,
                "minecraft:sprint_one_cm": 20,
                "minecraft:walk_under_water_one_cm": 300,
                "minecraft:walk_on_water_one_cm": 4000,
                "minecraft:swim_one_cm": 50000,
                "minecraft:boat_one_cm": 600000,
                "minecraft:pig_one_cm": 7000000,
                "minecraft:fly_one_cm": 80000000,
                "minecraft:horse_one_cm": 900000000
            } } }"#,
        );

        let summary = aggregate(&identity(), Some(&record), None);
        assert_eq!(summary.total_distance_cm, 654_321);
        assert_eq!(summary.pig_distance_cm, 7_000_000);
        assert_eq!(summary.boat_distance_cm, 600_000);
    }

    #[test]
    fn total_distance_saturates() {
        let record = stats(&format!(
            r#"{{ "stats": {{ "minecraft:custom": {{
                "minecraft:walk_one_cm": {max},
                "minecraft:swim_one_cm": 5
            }} }} }}"#,
            max = u64::MAX
        ));
        let summary = aggregate(&identity(), Some(&record), None);
        assert_eq!(summary.total_distance_cm, u64::MAX);
    }

    #[test]
    fn named_counters_are_copied() {
        let record = stats(
            r#"{ "stats": {
                "minecraft:custom": {
                    "minecraft:play_time": 72000,
                    "minecraft:deaths": 3,
                    "minecraft:bell_ring": 9
                },
                "minecraft:used": { "minecraft:cooked_salmon": 2 }
            } }"#,
        );
        let advancements: AchievementRecord = serde_json::from_str(
            r#"{ "minecraft:story/root": { "done": true } }"#,
        )
        .unwrap();

        let summary = aggregate(&identity(), Some(&record), Some(&advancements));
        assert_eq!(summary.playtime_ticks, 72_000);
        assert_eq!(summary.deaths, 3);
        assert_eq!(summary.bell_rings, 9);
        assert_eq!(summary.diet, Diet::Pescetarian);
        assert_eq!(summary.advancement_names, ["root"]);
    }
}
