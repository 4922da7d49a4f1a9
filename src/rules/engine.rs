//! Tag-to-stat rules: a pure function from a tag set (plus random draws) to a character.
//!
//! The engine performs no IO. Every random draw goes through the caller's
//! [`RandomSource`], in a fixed order: gender (only when unresolved), health, weapons,
//! armor, languages.

use indexmap::IndexSet;

use crate::foundation::random::RandomSource;
use crate::model::record::{
    Background, CharacterRecord, DamageType, Gender, LANGUAGE_SLOTS, StatSlot,
};
use crate::rules::tables::RuleTables;
use crate::rules::tags::TagSet;

/// Lowest health a character can have after modifiers.
pub const HEALTH_MIN: i32 = 10;
/// Highest health a character can have after modifiers.
pub const HEALTH_MAX: i32 = 99;
const BOY_HEALTH_BASE: (i32, i32) = (25, 90);
const GIRL_HEALTH_BASE: (i32, i32) = (15, 75);
const BULKY_BONUS: i32 = 10;
const FRAIL_PENALTY: i32 = 15;

const ARMOR_BASE: (i32, i32) = (0, 10);
const ARMOR_KEYWORD_BONUS: i32 = 2;

const SHIELD_IMAGE: &str = "shield";

/// Armor-sum ranges mapped to evade, tested in this order; first match wins.
///
/// The ranges overlap at 18 (3 wins over 4). Sums outside every range give 0.
pub const EVADE_TABLE: [(i32, i32, i32); 7] = [
    (30, 36, 0),
    (27, 29, 1),
    (24, 26, 2),
    (18, 23, 3),
    (14, 18, 4),
    (8, 13, 5),
    (3, 7, 6),
];

/// Evade for a total armor value.
pub fn evade_for_armor_sum(armor_sum: i32) -> i32 {
    EVADE_TABLE
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&armor_sum))
        .map(|(_, _, evade)| *evade)
        .unwrap_or(0)
}

/// Result of one derivation. `record.name` and `record.image` are left empty for the
/// caller, which picks the name from a pool keyed by `gender`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivation {
    /// Gender used for the health roll and the name pool.
    pub gender: Gender,
    /// Derived stats.
    pub record: CharacterRecord,
}

/// Applies the keyword tables to tag sets. Cheap to share; holds no mutable state.
#[derive(Clone, Debug, Default)]
pub struct TagRuleEngine {
    tables: RuleTables,
}

impl TagRuleEngine {
    /// Engine over the given tables.
    pub fn new(tables: RuleTables) -> Self {
        Self { tables }
    }

    /// The active keyword tables.
    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Derive every stat of a character from its tags.
    ///
    /// `gender_hint` overrides the tag-based gender resolution when given.
    pub fn derive<R: RandomSource + ?Sized>(
        &self,
        tags: &TagSet,
        gender_hint: Option<Gender>,
        rng: &mut R,
    ) -> Derivation {
        let gender = gender_hint.unwrap_or_else(|| resolve_gender(tags, rng));
        let background = self.background(tags);
        let health = self.health(gender, tags, rng);
        let weapons = self.weapons(tags, rng);
        let armor = self.armor(tags, rng);
        let evade = evade_for_armor_sum(armor.iter().sum());
        let languages = self.languages(tags, rng);

        let [slash, puncture, impact] = armor;
        let record = CharacterRecord {
            name: String::new(),
            background,
            image: String::new(),
            health,
            weapons,
            armors: [
                StatSlot::new(DamageType::Slash.as_str(), slash),
                StatSlot::new(DamageType::Puncture.as_str(), puncture),
                StatSlot::new(DamageType::Impact.as_str(), impact),
            ],
            evade,
            languages,
        };
        Derivation { gender, record }
    }

    /// First background, in table order, whose keywords meet the tags.
    pub fn background(&self, tags: &TagSet) -> Background {
        self.tables
            .backgrounds
            .iter()
            .find(|(_, keywords)| tags.matches_any(keywords.iter()))
            .map(|(bg, _)| *bg)
            .unwrap_or(Background::Secret)
    }

    /// Gendered base roll, plus 10 per bulky tag and minus 15 per frail tag, clamped to
    /// [`HEALTH_MIN`]..=[`HEALTH_MAX`].
    pub fn health<R: RandomSource + ?Sized>(
        &self,
        gender: Gender,
        tags: &TagSet,
        rng: &mut R,
    ) -> i32 {
        let (lo, hi) = match gender {
            Gender::Boy => BOY_HEALTH_BASE,
            Gender::Girl => GIRL_HEALTH_BASE,
        };
        let bulky = tags.count_matches(&self.tables.bulky) as i32;
        let frail = tags.count_matches(&self.tables.frail) as i32;
        let health = rng.random_range(lo, hi) + bulky * BULKY_BONUS - frail * FRAIL_PENALTY;
        health.clamp(HEALTH_MIN, HEALTH_MAX)
    }

    /// Damage types the character's weapon tags point to, in table order.
    /// Defaults to `{impact}`.
    pub fn affinity(&self, tags: &TagSet) -> IndexSet<DamageType> {
        let mut affinity: IndexSet<DamageType> = self
            .tables
            .weapon_damage
            .iter()
            .filter(|(_, keywords)| tags.matches_any(keywords.iter()))
            .map(|(dt, _)| *dt)
            .collect();
        if affinity.is_empty() {
            affinity.insert(DamageType::Impact);
        }
        affinity
    }

    /// Weapon slots: shield branch, dual-affinity branch, or one shared value for both
    /// slots. The third slot is always impact.
    pub fn weapons<R: RandomSource + ?Sized>(&self, tags: &TagSet, rng: &mut R) -> [StatSlot; 3] {
        let affinity = self.affinity(tags);
        let first = affinity
            .get_index(0)
            .copied()
            .unwrap_or(DamageType::Impact);
        let impact = DamageType::Impact.as_str();

        if tags.matches_any(&self.tables.shield) {
            let w1 = rng.random_range(2, 12);
            let w2 = rng.random_range(1, 10);
            let w3 = rng.random_range(3, 8);
            return [
                StatSlot::new(first.as_str(), w1),
                StatSlot::new(SHIELD_IMAGE, w2),
                StatSlot::new(impact, w3),
            ];
        }

        if let Some(second) = affinity.get_index(1).copied() {
            let w1 = rng.random_range(1, 10);
            let w2 = rng.random_range(3, 8);
            let w3 = rng.random_range(3, 8);
            return [
                StatSlot::new(first.as_str(), w1),
                StatSlot::new(second.as_str(), w2),
                StatSlot::new(impact, w3),
            ];
        }

        let shared = rng.random_range(8, 12);
        let w3 = rng.random_range(3, 8);
        [
            StatSlot::new(first.as_str(), shared),
            StatSlot::new(first.as_str(), shared),
            StatSlot::new(impact, w3),
        ]
    }

    /// Armor values as `[slash, puncture, impact]`.
    pub fn armor<R: RandomSource + ?Sized>(&self, tags: &TagSet, rng: &mut R) -> [i32; 3] {
        let mut values = DamageType::ALL.map(|_| rng.random_range(ARMOR_BASE.0, ARMOR_BASE.1));

        for (i, dt) in DamageType::ALL.iter().enumerate() {
            if let Some(keywords) = self.tables.armor_damage.get(dt) {
                values[i] += tags.count_matches(keywords.iter()) as i32 * ARMOR_KEYWORD_BONUS;
            }
        }

        if tags.matches_any(&self.tables.low_armor) {
            // x0.7, truncated toward zero
            values = values.map(|v| v * 7 / 10);
        }
        values
    }

    /// Selected languages first, then blanks, always exactly four slots.
    pub fn languages<R: RandomSource + ?Sized>(
        &self,
        tags: &TagSet,
        rng: &mut R,
    ) -> [String; LANGUAGE_SLOTS] {
        let mut candidates: Vec<&str> = self
            .tables
            .languages
            .iter()
            .filter(|(_, keywords)| tags.matches_any(keywords.iter()))
            .map(|(lang, _)| lang.as_str())
            .collect();
        if candidates.is_empty() {
            candidates.push(self.tables.fallback_language.as_str());
        }

        let max = candidates.len().min(LANGUAGE_SLOTS);
        let count = rng.random_range(1, max as i32) as usize;
        let picked = rng.sample_indices(candidates.len(), count);

        let mut slots: [String; LANGUAGE_SLOTS] = Default::default();
        for (slot, idx) in slots.iter_mut().zip(picked) {
            *slot = candidates[idx].to_string();
        }
        slots
    }
}

/// `1girl` pins girl, then `1boy` pins boy, otherwise a fair coin decides.
pub fn resolve_gender<R: RandomSource + ?Sized>(tags: &TagSet, rng: &mut R) -> Gender {
    if tags.contains(Gender::Girl.marker_tag()) {
        Gender::Girl
    } else if tags.contains(Gender::Boy.marker_tag()) {
        Gender::Boy
    } else if rng.coin_flip() {
        Gender::Girl
    } else {
        Gender::Boy
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/engine.rs"]
mod tests;
