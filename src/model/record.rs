use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{CardError, CardResult};
use crate::model::sheet::SheetRow;

/// Column order of the shared character sheet. Every row carries all of them.
pub const COLUMNS: [&str; 21] = [
    "name",
    "background",
    "image",
    "health",
    "weapon_1_image",
    "weapon_1",
    "weapon_2_image",
    "weapon_2",
    "weapon_3_image",
    "weapon_3",
    "armor_1_image",
    "armor_1",
    "armor_2_image",
    "armor_2",
    "armor_3_image",
    "armor_3",
    "evade",
    "language_1",
    "language_2",
    "language_3",
    "language_4",
];

/// Columns that must be non-empty for a row to be rendered.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "name",
    "background",
    "image",
    "health",
    "weapon_1_image",
    "weapon_1",
    "armor_1_image",
    "armor_1",
    "evade",
];

/// Number of language slots always emitted per row.
pub const LANGUAGE_SLOTS: usize = 4;

/// Card background theme, also the background image key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Knights, elves and classic fantasy.
    Fantasy,
    /// Dark and demonic characters.
    Mroczny,
    /// Beasts and animal folk.
    Forest,
    /// Ancient or futuristic technology.
    Tech,
    /// Spellcasters and monsters.
    Magic,
    /// Fallback when no keyword matches.
    Secret,
}

impl Background {
    /// Every background, in keyword priority order.
    pub const ALL: [Background; 6] = [
        Background::Fantasy,
        Background::Mroczny,
        Background::Forest,
        Background::Tech,
        Background::Magic,
        Background::Secret,
    ];

    /// Lowercase name used in the sheet and as the image key.
    pub fn as_str(self) -> &'static str {
        match self {
            Background::Fantasy => "fantasy",
            Background::Mroczny => "mroczny",
            Background::Forest => "forest",
            Background::Tech => "tech",
            Background::Magic => "magic",
            Background::Secret => "secret",
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Background {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Background::ALL
            .into_iter()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| CardError::validation(format!("unknown background '{s}'")))
    }
}

/// Damage category used both for weapon affinity and for armor values.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Blades.
    Slash,
    /// Points and thrown weapons.
    Puncture,
    /// Blunt weapons and fists.
    Impact,
}

impl DamageType {
    /// Every damage type, in armor column order.
    pub const ALL: [DamageType; 3] = [DamageType::Slash, DamageType::Puncture, DamageType::Impact];

    /// Lowercase name used as the weapon and armor icon key.
    pub fn as_str(self) -> &'static str {
        match self {
            DamageType::Slash => "slash",
            DamageType::Puncture => "puncture",
            DamageType::Impact => "impact",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects the name pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female name pool.
    Girl,
    /// Male name pool.
    Boy,
}

impl Gender {
    /// Tag that pins the gender when present in a descriptor.
    pub fn marker_tag(self) -> &'static str {
        match self {
            Gender::Girl => "1girl",
            Gender::Boy => "1boy",
        }
    }
}

/// One weapon or armor cell pair: icon key plus numeric value.
///
/// An empty `image` means the slot is unused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatSlot {
    /// Icon key; empty when unused.
    pub image: String,
    /// Stat value; `None` when the cell is empty.
    pub value: Option<i32>,
}

impl StatSlot {
    /// A populated slot.
    pub fn new(image: impl Into<String>, value: i32) -> Self {
        Self {
            image: image.into(),
            value: Some(value),
        }
    }

    /// Whether the slot has both an icon and a value to draw.
    pub fn is_populated(&self) -> bool {
        !self.image.trim().is_empty() && self.value.is_some()
    }
}

/// A fully derived character, one sheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Display name, also the output file stem.
    pub name: String,
    /// Background theme.
    pub background: Background,
    /// Portrait asset key, the descriptor file name without extension.
    pub image: String,
    /// Hit points.
    pub health: i32,
    /// Weapon slots; the third is stored but not drawn.
    pub weapons: [StatSlot; 3],
    /// Armor per damage type, in [`DamageType::ALL`] order.
    pub armors: [StatSlot; 3],
    /// Evade score, 0 to 6.
    pub evade: i32,
    /// Selected languages first, blanks after.
    pub languages: [String; LANGUAGE_SLOTS],
}

impl CharacterRecord {
    /// Armor total used by the evade table.
    pub fn armor_sum(&self) -> i32 {
        self.armors.iter().filter_map(|a| a.value).sum()
    }

    /// Non-empty language slots, in slot order.
    pub fn spoken_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
    }

    /// Serialize to cells in [`COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(COLUMNS.len());
        cells.push(self.name.clone());
        cells.push(self.background.to_string());
        cells.push(self.image.clone());
        cells.push(self.health.to_string());
        for slot in self.weapons.iter().chain(self.armors.iter()) {
            cells.push(slot.image.clone());
            cells.push(slot.value.map(|v| v.to_string()).unwrap_or_default());
        }
        cells.push(self.evade.to_string());
        cells.extend(self.languages.iter().cloned());
        cells
    }

    /// Parse and validate one sheet row.
    ///
    /// Fails with [`CardError::Validation`] when a required column is empty or a numeric
    /// column does not hold an integer.
    pub fn from_row(row: &SheetRow) -> CardResult<Self> {
        for column in REQUIRED_COLUMNS {
            if row.get(column).is_none_or(|v| v.trim().is_empty()) {
                return Err(CardError::validation(format!(
                    "missing required field: {column}"
                )));
            }
        }

        let cell = |column: &str| row.get(column).unwrap_or_default().to_string();
        let slot = |kind: &str, i: usize| -> CardResult<StatSlot> {
            let value_col = format!("{kind}_{i}");
            Ok(StatSlot {
                image: cell(&format!("{kind}_{i}_image")),
                value: parse_optional_int(&value_col, row.get(&value_col))?,
            })
        };

        let health = parse_int("health", row.get("health"))
            .map_err(|_| CardError::validation("health value must be an integer"))?;
        let evade = parse_int("evade", row.get("evade"))
            .map_err(|_| CardError::validation("evade value must be an integer"))?;

        Ok(Self {
            name: cell("name"),
            background: cell("background").parse()?,
            image: cell("image"),
            health,
            weapons: [slot("weapon", 1)?, slot("weapon", 2)?, slot("weapon", 3)?],
            armors: [slot("armor", 1)?, slot("armor", 2)?, slot("armor", 3)?],
            evade,
            languages: [
                cell("language_1"),
                cell("language_2"),
                cell("language_3"),
                cell("language_4"),
            ],
        })
    }
}

fn parse_int(column: &str, raw: Option<&str>) -> CardResult<i32> {
    let raw = raw.unwrap_or_default().trim();
    raw.parse::<i32>()
        .map_err(|_| CardError::validation(format!("{column} value must be an integer, got '{raw}'")))
}

fn parse_optional_int(column: &str, raw: Option<&str>) -> CardResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_int(column, Some(v)).map(Some),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/record.rs"]
mod tests;
