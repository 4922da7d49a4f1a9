//! Semantic asset keys to file paths under one asset root.
//!
//! Layout below the root:
//!
//! ```text
//! backgrounds/<background>.png
//! characters/<image>.png   characters/<image>.txt
//! weapons/<key>.png
//! armors/<key>.png
//! languages/<language>.png
//! ui_elements/{name_plate,health_icon,evade}.png
//! fonts/PressJobs.ttf
//! ```

use std::path::{Path, PathBuf};

use crate::foundation::error::{CardError, CardResult};
use crate::model::record::Background;

/// One image per [`Background`].
pub const BACKGROUNDS_DIR: &str = "backgrounds";
/// Portraits and their tag descriptors.
pub const CHARACTERS_DIR: &str = "characters";
/// Weapon icons keyed by damage type.
pub const WEAPONS_DIR: &str = "weapons";
/// Armor icons keyed by damage type.
pub const ARMORS_DIR: &str = "armors";
/// Language icons keyed by language name.
pub const LANGUAGES_DIR: &str = "languages";
/// Name plate, health and evade graphics.
pub const UI_DIR: &str = "ui_elements";
/// Card font directory.
pub const FONTS_DIR: &str = "fonts";
/// Card font file name.
pub const FONT_FILE: &str = "PressJobs.ttf";

const IMAGE_EXT: &str = "png";

/// Fixed interface graphics, one file each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiElement {
    /// Plate behind the character name.
    NamePlate,
    /// Health badge.
    Health,
    /// Evade badge.
    Evade,
}

impl UiElement {
    /// File name without extension under `ui_elements/`.
    pub fn file_stem(self) -> &'static str {
        match self {
            UiElement::NamePlate => "name_plate",
            UiElement::Health => "health_icon",
            UiElement::Evade => "evade",
        }
    }
}

/// Maps asset keys to paths below one root. Performs no IO except directory checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    /// Resolver for the asset tree at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding portraits and descriptors.
    pub fn characters_dir(&self) -> PathBuf {
        self.root.join(CHARACTERS_DIR)
    }

    /// Background image for a theme.
    pub fn background(&self, background: Background) -> PathBuf {
        self.image_in(BACKGROUNDS_DIR, background.as_str())
    }

    /// Portrait image for an image key.
    pub fn portrait(&self, image: &str) -> PathBuf {
        self.image_in(CHARACTERS_DIR, image)
    }

    /// Weapon icon for a damage-type key.
    pub fn weapon(&self, key: &str) -> PathBuf {
        self.image_in(WEAPONS_DIR, key)
    }

    /// Armor icon for a damage-type key.
    pub fn armor(&self, key: &str) -> PathBuf {
        self.image_in(ARMORS_DIR, key)
    }

    /// Icon for a language.
    pub fn language(&self, language: &str) -> PathBuf {
        self.image_in(LANGUAGES_DIR, language)
    }

    /// Fixed interface graphic.
    pub fn ui(&self, element: UiElement) -> PathBuf {
        self.image_in(UI_DIR, element.file_stem())
    }

    /// The card font.
    pub fn font(&self) -> PathBuf {
        self.root.join(FONTS_DIR).join(FONT_FILE)
    }

    /// Fail once, up front, when a base asset directory is unavailable.
    ///
    /// Individual missing files are handled per record; a missing directory is not.
    pub fn require_dirs(&self, dirs: &[&str]) -> CardResult<()> {
        for dir in dirs {
            let path = self.root.join(dir);
            if !path.is_dir() {
                return Err(CardError::asset_missing(format!(
                    "asset directory '{}' not found",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Directories the card renderer reads from.
    pub fn require_render_dirs(&self) -> CardResult<()> {
        self.require_dirs(&[
            BACKGROUNDS_DIR,
            CHARACTERS_DIR,
            WEAPONS_DIR,
            ARMORS_DIR,
            LANGUAGES_DIR,
            UI_DIR,
        ])
    }

    fn image_in(&self, dir: &str, key: &str) -> PathBuf {
        self.root
            .join(dir)
            .join(format!("{}.{IMAGE_EXT}", key.trim()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
