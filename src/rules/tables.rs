//! Keyword tables consumed by the rule engine.
//!
//! Tables are plain data, built once at startup (either the built-in defaults or a JSON
//! file) and shared read-only by every derivation. Map order is significant: the
//! background table is scanned in declaration order and the first match wins.

use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;

use crate::foundation::error::{CardError, CardResult};
use crate::model::record::{Background, DamageType};

/// Keyword tables consumed by [`crate::TagRuleEngine`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTables {
    /// Background keywords in priority order. Characters matching none get `secret`.
    pub backgrounds: IndexMap<Background, Vec<String>>,
    /// Language name to the keywords that make it available.
    pub languages: IndexMap<String, Vec<String>>,
    /// Language offered when no language keyword matches.
    pub fallback_language: String,
    /// Weapon keywords per damage type, in affinity insertion order.
    pub weapon_damage: IndexMap<DamageType, Vec<String>>,
    /// Keywords that select the shield weapon branch.
    pub shield: Vec<String>,
    /// Armor keywords per damage type; every match adds to that type's armor.
    pub armor_damage: IndexMap<DamageType, Vec<String>>,
    /// Keywords that scale all armor by 0.7.
    pub low_armor: Vec<String>,
    /// Health bonus keywords.
    pub bulky: Vec<String>,
    /// Health penalty keywords.
    pub frail: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleTables {
    fn default() -> Self {
        let backgrounds = IndexMap::from([
            (
                Background::Fantasy,
                words(&["knight", "fantasy", "elf", "elven", "kobold"]),
            ),
            (
                Background::Mroczny,
                words(&["necromancy", "dark", "evil", "demon", "horns"]),
            ),
            (
                Background::Forest,
                words(&["animal", "beast", "catboy", "catgirl", "furry"]),
            ),
            (
                Background::Tech,
                words(&["ancient", "technology", "sci-fi", "futuristic"]),
            ),
            (
                Background::Magic,
                words(&["magic", "wizard", "spells", "monster", "casts"]),
            ),
        ]);

        let languages = IndexMap::from([
            (
                "Rh'lo".to_string(),
                words(&["ancient", "older", "runes", "rune", "magic", "arcane"]),
            ),
            (
                "Common".to_string(),
                words(&["knight", "elven", "elf", "magic", "fantasy", "rpg"]),
            ),
        ]);

        let weapon_damage = IndexMap::from([
            (
                DamageType::Slash,
                words(&["sword", "axe", "dagger", "katana", "twohanded_sword"]),
            ),
            (
                DamageType::Puncture,
                words(&["dart", "darts", "kunai", "spear", "polearm"]),
            ),
            (
                DamageType::Impact,
                words(&["staff", "mace", "hammer", "fists", "martial_arts"]),
            ),
        ]);

        let armor_damage = IndexMap::from([
            (
                DamageType::Slash,
                words(&["heavy_armor", "plate_armor", "shoulder_armor"]),
            ),
            (
                DamageType::Puncture,
                words(&["armor", "leather_armor", "padded_armor"]),
            ),
            (
                DamageType::Impact,
                words(&["padded_armor", "gambeson", "heavy_armor"]),
            ),
        ]);

        Self {
            backgrounds,
            languages,
            fallback_language: "Common".to_string(),
            weapon_damage,
            shield: words(&[
                "shield",
                "heavy_shield",
                "kite_shield",
                "buckler",
                "tower_shield",
            ]),
            armor_damage,
            low_armor: words(&[
                "naked",
                "clothes",
                "loincloth",
                "barefeet",
                "shirt",
                "tunic",
                "robe",
            ]),
            bulky: words(&["muscular", "strong", "huge", "large", "tall"]),
            frail: words(&["petite", "skinny", "small", "little", "fragile"]),
        }
    }
}

impl RuleTables {
    /// Load tables from a JSON file and normalize keywords to the tag form.
    pub fn from_json_path(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rule tables '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse tables from JSON text. Unknown fields are rejected.
    pub fn from_json_str(text: &str) -> CardResult<Self> {
        let tables: Self = serde_json::from_str(text)
            .map_err(|e| CardError::config(format!("invalid rule tables: {e}")))?;
        tables.normalized().validated()
    }

    /// Pretty JSON accepted by [`RuleTables::from_json_str`].
    pub fn to_json_pretty(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CardError::config(format!("serialize rule tables: {e}")))
    }

    /// Lowercase and trim every keyword so they compare equal to parsed tags.
    pub fn normalized(mut self) -> Self {
        fn norm(list: &mut Vec<String>) {
            for kw in list.iter_mut() {
                *kw = kw.trim().to_lowercase();
            }
            list.retain(|kw| !kw.is_empty());
        }

        self.backgrounds.values_mut().for_each(norm);
        self.languages.values_mut().for_each(norm);
        self.weapon_damage.values_mut().for_each(norm);
        self.armor_damage.values_mut().for_each(norm);
        norm(&mut self.shield);
        norm(&mut self.low_armor);
        norm(&mut self.bulky);
        norm(&mut self.frail);
        self
    }

    fn validated(self) -> CardResult<Self> {
        if self.fallback_language.trim().is_empty() {
            return Err(CardError::config("fallback_language must be non-empty"));
        }
        if self.languages.keys().any(|l| l.trim().is_empty()) {
            return Err(CardError::config("language names must be non-empty"));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/tables.rs"]
mod tests;
