//! Food-tier tables and the diet classifier.
//!
//! Food items are partitioned into four disjoint tiers. A player's diet is
//! the highest tier among the items in their `minecraft:used` statistics,
//! with `meat > pescetarian > vegetarian > vegan`. Vegan items never raise
//! the tier; vegan is simply what remains when nothing else matched.

use mcstats_types::Diet;

use crate::records::{StatRecord, USED_CATEGORY};

/// Meat and meat dishes.
pub const MEAT_ITEMS: &[&str] = &[
    "minecraft:beef",
    "minecraft:cooked_beef",
    "minecraft:porkchop",
    "minecraft:cooked_porkchop",
    "minecraft:mutton",
    "minecraft:cooked_mutton",
    "minecraft:chicken",
    "minecraft:cooked_chicken",
    "minecraft:rabbit",
    "minecraft:cooked_rabbit",
    "minecraft:rabbit_stew",
    "minecraft:rotten_flesh",
];

/// Fish.
pub const PESCETARIAN_ITEMS: &[&str] = &[
    "minecraft:cod",
    "minecraft:cooked_cod",
    "minecraft:salmon",
    "minecraft:cooked_salmon",
    "minecraft:tropical_fish",
    "minecraft:pufferfish",
];

/// Animal products that are not meat or fish.
pub const VEGETARIAN_ITEMS: &[&str] = &[
    "minecraft:cake",
    "minecraft:pumpkin_pie",
    "minecraft:honey_bottle",
    "minecraft:milk_bucket",
];

/// Plant-based food.
pub const VEGAN_ITEMS: &[&str] = &[
    "minecraft:apple",
    "minecraft:golden_apple",
    "minecraft:enchanted_golden_apple",
    "minecraft:bread",
    "minecraft:carrot",
    "minecraft:golden_carrot",
    "minecraft:potato",
    "minecraft:baked_potato",
    "minecraft:poisonous_potato",
    "minecraft:beetroot",
    "minecraft:beetroot_soup",
    "minecraft:melon_slice",
    "minecraft:sweet_berries",
    "minecraft:glow_berries",
    "minecraft:chorus_fruit",
    "minecraft:dried_kelp",
    "minecraft:mushroom_stew",
    "minecraft:suspicious_stew",
    "minecraft:cookie",
];

/// Food tier of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FoodTier {
    /// Plant-based.
    Vegan,
    /// Animal product, not meat or fish.
    Vegetarian,
    /// Fish.
    Pescetarian,
    /// Meat.
    Meat,
}

impl FoodTier {
    /// Tiers from highest to lowest precedence.
    pub const PRECEDENCE: [Self; 4] = [Self::Meat, Self::Pescetarian, Self::Vegetarian, Self::Vegan];

    /// Item ids belonging to this tier.
    pub const fn items(self) -> &'static [&'static str] {
        match self {
            Self::Vegan => VEGAN_ITEMS,
            Self::Vegetarian => VEGETARIAN_ITEMS,
            Self::Pescetarian => PESCETARIAN_ITEMS,
            Self::Meat => MEAT_ITEMS,
        }
    }

    /// Tier of `item`, or `None` if it is not a classified food.
    pub fn of(item: &str) -> Option<Self> {
        Self::PRECEDENCE
            .into_iter()
            .find(|tier| tier.items().contains(&item))
    }

    /// Diet tag a player gets when this is their highest tier.
    pub const fn diet(self) -> Diet {
        match self {
            Self::Vegan => Diet::Vegan,
            Self::Vegetarian => Diet::Vegetarian,
            Self::Pescetarian => Diet::Pescetarian,
            Self::Meat => Diet::Carnivore,
        }
    }
}

/// Classify a player from their statistics snapshot.
///
/// Only the [`USED_CATEGORY`] counters are consulted. A key's presence
/// counts as a use; the game never writes zero entries.
pub fn classify(record: &StatRecord) -> Diet {
    record
        .category(USED_CATEGORY)
        .map_or(Diet::Vegan, |used| classify_items(used.keys().map(String::as_str)))
}

/// Classify a player from the ids of the items they used.
pub fn classify_items<'a, I>(items: I) -> Diet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ate_meat = false;
    let mut ate_pescetarian = false;
    let mut ate_vegetarian = false;

    for item in items {
        match FoodTier::of(item) {
            Some(FoodTier::Meat) => ate_meat = true,
            Some(FoodTier::Pescetarian) => ate_pescetarian = true,
            Some(FoodTier::Vegetarian) => ate_vegetarian = true,
            Some(FoodTier::Vegan) | None => {}
        }
    }

    if ate_meat {
        Diet::Carnivore
    } else if ate_pescetarian {
        Diet::Pescetarian
    } else if ate_vegetarian {
        Diet::Vegetarian
    } else {
        Diet::Vegan
    }
}
