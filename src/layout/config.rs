//! Fixed card geometry.
//!
//! Every render reads the same [`LayoutConfig`]; nothing in it depends on the record being
//! drawn. Coordinates are card pixels with the origin at the top-left corner.

use crate::foundation::core::{CARD_SIZE, Point, Rgba8, Size};

/// Names under which overlay slots are looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    /// Weapon icons on the left edge.
    Weapons,
    /// Armor icons on the right edge.
    Armors,
    /// Health badge, top right.
    Health,
    /// Evade badge, top left.
    Evade,
    /// Plate behind the name.
    NamePlate,
    /// Name text anchor.
    Name,
    /// Language icon row.
    Languages,
}

impl SlotName {
    /// Every slot name.
    pub const ALL: [SlotName; 7] = [
        SlotName::Weapons,
        SlotName::Armors,
        SlotName::Health,
        SlotName::Evade,
        SlotName::NamePlate,
        SlotName::Name,
        SlotName::Languages,
    ];
}

/// Geometry of one overlay slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSlot {
    /// Size each element is resized to before drawing.
    pub size: Size,
    /// Top-left corner per element, or the text anchor for the name slot.
    pub anchors: Vec<Point>,
    /// Pixel size of the label text drawn in this slot; 0 for slots without text.
    pub font_size: f32,
    /// Label position relative to the slot corner, as recorded in the card template.
    ///
    /// Serialized with the layout but not used for drawing: value labels are centered on
    /// their icon.
    pub label_offset: Point,
}

impl LayoutSlot {
    fn new(size: Size, anchors: Vec<Point>, font_size: f32) -> Self {
        Self {
            size,
            anchors,
            font_size,
            label_offset: Point::default(),
        }
    }

    /// Anchor of the `index`-th element, if the slot has that many.
    pub fn anchor(&self, index: usize) -> Option<Point> {
        self.anchors.get(index).copied()
    }
}

/// Where and how large the feathered portrait is drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortraitLayout {
    /// Size the portrait is resized to.
    pub size: Size,
    /// Top-left corner on the card.
    pub origin: Point,
    /// Feather width in source-image pixels.
    pub feather_margin: u32,
}

/// Colors and radii shared by every glow-rendered label.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextColors {
    /// Fill color of every label.
    pub text: Rgba8,
    /// Glow color behind every label.
    pub glow: Rgba8,
    /// Glow radius of stat values.
    pub value_glow_radius: u32,
    /// Glow radius of the character name.
    pub name_glow_radius: u32,
}

/// Translucent circle drawn behind weapon and armor icons.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BadgeStyle {
    /// Circle fill color.
    pub fill: Rgba8,
    /// Padding added on each side of the label's bounding box.
    pub padding: u32,
}

/// Complete card geometry. [`LayoutConfig::default`] is the standard card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConfig {
    /// Card size.
    pub canvas: Size,
    /// Portrait placement.
    pub portrait: PortraitLayout,
    /// Weapon slots 1 and 2.
    pub weapons: LayoutSlot,
    /// Armor slots 1 to 3.
    pub armors: LayoutSlot,
    /// Health badge.
    pub health: LayoutSlot,
    /// Evade badge.
    pub evade: LayoutSlot,
    /// Name plate image.
    pub name_plate: LayoutSlot,
    /// Name text; `anchors[0]` is the text center.
    pub name: LayoutSlot,
    /// `anchors[0].y` is the row's top edge; x is computed per row.
    pub languages: LayoutSlot,
    /// Longer names are truncated.
    pub name_max_chars: usize,
    /// Most language icons drawn.
    pub language_max_count: usize,
    /// Gap between language icons.
    pub language_margin: u32,
    /// Badge behind weapon and armor icons.
    pub badge: BadgeStyle,
    /// Label colors.
    pub colors: TextColors,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let canvas = CARD_SIZE;
        let w = canvas.width as i32;
        let portrait_size = Size::new(800, 700);
        let plate_size = Size::new(600, 100);

        let mut weapons = LayoutSlot::new(
            Size::square(120),
            vec![Point::new(50, 300), Point::new(50, 430)],
            46.0,
        );
        weapons.label_offset = Point::new(40, 40);
        let mut armors = LayoutSlot::new(
            Size::square(120),
            vec![
                Point::new(742, 300),
                Point::new(742, 430),
                Point::new(742, 560),
            ],
            46.0,
        );
        armors.label_offset = Point::new(40, 40);

        Self {
            canvas,
            portrait: PortraitLayout {
                size: portrait_size,
                origin: Point::new((w - portrait_size.width as i32) / 2 - 20, 50),
                feather_margin: 100,
            },
            weapons,
            armors,
            health: LayoutSlot::new(Size::square(150), vec![Point::new(732, 55)], 76.0),
            evade: LayoutSlot::new(Size::square(150), vec![Point::new(50, 55)], 76.0),
            name_plate: LayoutSlot::new(
                plate_size,
                vec![Point::new((w - plate_size.width as i32) / 2, 1050)],
                0.0,
            ),
            name: LayoutSlot::new(Size::default(), vec![Point::new(w / 2, 1110)], 50.0),
            languages: LayoutSlot::new(Size::square(150), vec![Point::new(0, 1200)], 0.0),
            name_max_chars: 24,
            language_max_count: 4,
            language_margin: 30,
            badge: BadgeStyle {
                fill: Rgba8::new(0, 0, 0, 160),
                padding: 8,
            },
            colors: TextColors {
                text: Rgba8::WHITE,
                glow: Rgba8::RED,
                value_glow_radius: 1,
                name_glow_radius: 2,
            },
        }
    }
}

impl LayoutConfig {
    /// Slot geometry by name.
    pub fn slot(&self, name: SlotName) -> &LayoutSlot {
        match name {
            SlotName::Weapons => &self.weapons,
            SlotName::Armors => &self.armors,
            SlotName::Health => &self.health,
            SlotName::Evade => &self.evade,
            SlotName::NamePlate => &self.name_plate,
            SlotName::Name => &self.name,
            SlotName::Languages => &self.languages,
        }
    }

    /// Top-left corners for `count` language icons laid out as one centered row.
    ///
    /// `count` is capped at the configured maximum; zero yields an empty row.
    pub fn language_row(&self, count: usize) -> Vec<Point> {
        let count = count.min(self.language_max_count);
        if count == 0 {
            return Vec::new();
        }
        let icon = self.languages.size.width as i32;
        let margin = self.language_margin as i32;
        let n = count as i32;
        let total = n * icon + (n - 1) * margin;
        let start_x = (self.canvas.width as i32 - total) / 2;
        let y = self.languages.anchor(0).map(|p| p.y).unwrap_or_default();
        (0..n)
            .map(|i| Point::new(start_x + i * (icon + margin), y))
            .collect()
    }

    /// Name as displayed: at most `name_max_chars` characters.
    pub fn display_name<'a>(&self, name: &'a str) -> &'a str {
        match name.char_indices().nth(self.name_max_chars) {
            Some((cut, _)) => &name[..cut],
            None => name,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
