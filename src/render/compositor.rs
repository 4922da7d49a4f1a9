//! One character record to one finished card.
//!
//! Layers are drawn in a fixed order onto a canvas owned by the call: background,
//! feathered portrait, weapon badges, armor badges, health, evade, name plate and name,
//! language row. The background and portrait are required; every later layer is
//! skipped with a warning when its asset cannot be drawn.

use std::path::PathBuf;

use crate::assets::decode::load_image;
use crate::assets::resolver::{AssetResolver, UiElement};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::config::{LayoutConfig, LayoutSlot, SlotName};
use crate::model::record::{CharacterRecord, StatSlot};
use crate::render::feather::apply_feather;
use crate::render::glow::{GlowStyle, GlowTextRenderer};
use crate::render::raster::{fill_circle, overlay, resize};
use crate::render::text::TextRasterizer;

/// Draws cards from records using one layout, one asset tree and one text rasterizer.
pub struct CardCompositor<T> {
    layout: LayoutConfig,
    assets: AssetResolver,
    text: GlowTextRenderer<T>,
}

impl<T: TextRasterizer> CardCompositor<T> {
    /// Compositor over the given layout and assets.
    pub fn new(layout: LayoutConfig, assets: AssetResolver, text: T) -> Self {
        Self {
            layout,
            assets,
            text: GlowTextRenderer::new(text),
        }
    }

    /// The card geometry.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The asset resolver.
    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    /// Compose the card for `record`.
    ///
    /// Returns [`CardError::AssetMissing`] when the background or portrait cannot be loaded.
    #[tracing::instrument(skip(self, record), fields(name = %record.name))]
    pub fn render(&mut self, record: &CharacterRecord) -> CardResult<Canvas> {
        let mut card = load_image(&self.assets.background(record.background))
            .map_err(|e| required("background", e))?;
        let expected = self.layout.canvas;
        if card.dimensions() != (expected.width, expected.height) {
            tracing::warn!(
                background = %record.background,
                width = card.width(),
                height = card.height(),
                "background does not match the card size, drawing it as-is"
            );
        }

        self.draw_portrait(&mut card, &record.image)?;

        let weapons = self.layout.slot(SlotName::Weapons).clone();
        for (i, slot) in record.weapons.iter().enumerate() {
            self.badge_slot(&mut card, "weapon", i, slot, &weapons, AssetResolver::weapon);
        }
        let armors = self.layout.slot(SlotName::Armors).clone();
        for (i, slot) in record.armors.iter().enumerate() {
            self.badge_slot(&mut card, "armor", i, slot, &armors, AssetResolver::armor);
        }

        let health = self.layout.slot(SlotName::Health).clone();
        let step = self.draw_stat(&mut card, UiElement::Health, record.health, &health);
        skip_on_error("health", step);
        let evade = self.layout.slot(SlotName::Evade).clone();
        let step = self.draw_stat(&mut card, UiElement::Evade, record.evade, &evade);
        skip_on_error("evade", step);

        let step = self.draw_name_plate(&mut card, &record.name);
        skip_on_error("name plate", step);

        self.draw_languages(&mut card, record);
        Ok(card)
    }

    fn draw_portrait(&mut self, card: &mut Canvas, image: &str) -> CardResult<()> {
        let mut portrait =
            load_image(&self.assets.portrait(image)).map_err(|e| required("portrait", e))?;
        let p = self.layout.portrait;
        apply_feather(&mut portrait, p.feather_margin);
        let portrait = resize(&portrait, p.size);
        overlay(card, &portrait, p.origin);
        Ok(())
    }

    /// Draw slot `index` when it is populated and has a configured position.
    fn badge_slot(
        &mut self,
        card: &mut Canvas,
        kind: &str,
        index: usize,
        slot: &StatSlot,
        geometry: &LayoutSlot,
        icon_path: fn(&AssetResolver, &str) -> PathBuf,
    ) {
        let (Some(value), Some(anchor)) = (slot.value, geometry.anchor(index)) else {
            return;
        };
        if !slot.is_populated() {
            return;
        }
        let path = icon_path(&self.assets, &slot.image);
        let step = load_image(&path)
            .and_then(|icon| self.badged_icon(&icon, value, geometry))
            .map(|tile| overlay(card, &tile, anchor));
        skip_on_error(&format!("{kind} {} '{}'", index + 1, slot.image), step);
    }

    /// Icon tile: dark disc sized to the label, the icon over it, the value on top.
    fn badged_icon(
        &mut self,
        icon: &Canvas,
        value: i32,
        geometry: &LayoutSlot,
    ) -> CardResult<Canvas> {
        let size = geometry.size;
        let label = value.to_string();
        let extent = self.text.measure(&label, geometry.font_size)?;
        let pad = self.layout.badge.padding as f32 * 2.0;
        let diameter = (extent.width + pad).max(extent.height + pad);
        let radius = (diameter as u32) / 2;

        let center = size.center();
        let mut tile = Canvas::new(size.width, size.height);
        fill_circle(&mut tile, center, radius, self.layout.badge.fill)?;
        overlay(&mut tile, &resize(icon, size), Point::default());
        let style = self.value_style();
        self.text
            .draw(&mut tile, &label, center, geometry.font_size, style)?;
        Ok(tile)
    }

    fn draw_stat(
        &mut self,
        card: &mut Canvas,
        element: UiElement,
        value: i32,
        geometry: &LayoutSlot,
    ) -> CardResult<()> {
        let anchor = geometry
            .anchor(0)
            .ok_or_else(|| CardError::config(format!("{element:?} slot has no position")))?;
        let mut icon = resize(&load_image(&self.assets.ui(element))?, geometry.size);
        let style = self.value_style();
        self.text.draw(
            &mut icon,
            &value.to_string(),
            geometry.size.center(),
            geometry.font_size,
            style,
        )?;
        overlay(card, &icon, anchor);
        Ok(())
    }

    fn draw_name_plate(&mut self, card: &mut Canvas, name: &str) -> CardResult<()> {
        let plate_slot = self.layout.slot(SlotName::NamePlate);
        let plate_at = plate_slot
            .anchor(0)
            .ok_or_else(|| CardError::config("name plate slot has no position"))?;
        let name_at = self
            .layout
            .name
            .anchor(0)
            .ok_or_else(|| CardError::config("name slot has no position"))?;
        let plate = resize(
            &load_image(&self.assets.ui(UiElement::NamePlate))?,
            plate_slot.size,
        );
        overlay(card, &plate, plate_at);

        let shown = self.layout.display_name(name).to_string();
        let font_size = self.layout.name.font_size;
        let colors = self.layout.colors;
        let style = GlowStyle {
            text: colors.text,
            glow: colors.glow,
            radius: colors.name_glow_radius,
        };
        self.text.draw(card, &shown, name_at, font_size, style)
    }

    fn draw_languages(&mut self, card: &mut Canvas, record: &CharacterRecord) {
        let spoken: Vec<&str> = record
            .spoken_languages()
            .take(self.layout.language_max_count)
            .collect();
        let positions = self.layout.language_row(spoken.len());
        for (language, at) in spoken.into_iter().zip(positions) {
            let step = load_image(&self.assets.language(language))
                .map(|icon| overlay(card, &resize(&icon, self.layout.languages.size), at));
            skip_on_error(&format!("language '{language}'"), step);
        }
    }

    fn value_style(&self) -> GlowStyle {
        let colors = self.layout.colors;
        GlowStyle {
            text: colors.text,
            glow: colors.glow,
            radius: colors.value_glow_radius,
        }
    }
}

fn required(role: &str, err: CardError) -> CardError {
    match err {
        CardError::AssetMissing(msg) => CardError::asset_missing(format!("{role} {msg}")),
        other => other,
    }
}

fn skip_on_error(element: &str, step: CardResult<()>) {
    if let Err(e) = step {
        tracing::warn!(element, error = %e, "skipping card element");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
