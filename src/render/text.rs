//! Text measurement and rasterization.
//!
//! [`ParleyText`] shapes with Parley and fills glyphs with `vello_cpu`. [`BlockGlyphs`]
//! draws one solid block per character and is used when the display font cannot be
//! loaded, and in tests where exact glyph shapes do not matter.

use std::path::Path;

use image::Pixel;

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::raster::{composite_pixmap, pixmap_size};

/// Pixel extent of a laid-out single-line string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Advance width.
    pub width: f32,
    /// Line height.
    pub height: f32,
}

/// One draw of a string: the top-left corner of its layout box and its fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphStamp {
    /// Top-left corner of the layout box.
    pub origin: Point,
    /// Fill color.
    pub color: Rgba8,
}

/// Draws strings onto a canvas.
pub trait TextRasterizer {
    /// Extent of `text` laid out on one line.
    fn measure(&mut self, text: &str, font_size: f32) -> CardResult<TextExtent>;

    /// Draw `text` once per stamp, in order; later stamps cover earlier ones.
    fn stamp(
        &mut self,
        surface: &mut Canvas,
        text: &str,
        font_size: f32,
        stamps: &[GlyphStamp],
    ) -> CardResult<()>;
}

/// Stateful helper for building Parley layouts in one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register the font bytes and remember the family they provide.
    pub fn new(font_bytes: &[u8]) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::config("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::config("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name the registered font reports.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out one unwrapped line.
    pub fn layout_line(&mut self, text: &str, size_px: f32) -> CardResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation("font size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Display-font rasterizer.
pub struct ParleyText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl ParleyText {
    /// Rasterizer for a TrueType/OpenType font in memory.
    pub fn from_bytes(font_bytes: Vec<u8>) -> CardResult<Self> {
        let engine = TextLayoutEngine::new(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self { engine, font })
    }

    /// Load the font file; an unreadable file is [`CardError::AssetMissing`].
    pub fn load(path: &Path) -> CardResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| CardError::asset_missing(format!("font '{}': {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    /// Family name of the loaded font.
    pub fn family_name(&self) -> &str {
        self.engine.family_name()
    }
}

impl TextRasterizer for ParleyText {
    fn measure(&mut self, text: &str, font_size: f32) -> CardResult<TextExtent> {
        let layout = self.engine.layout_line(text, font_size)?;
        Ok(TextExtent {
            width: layout.width(),
            height: layout.height(),
        })
    }

    fn stamp(
        &mut self,
        surface: &mut Canvas,
        text: &str,
        font_size: f32,
        stamps: &[GlyphStamp],
    ) -> CardResult<()> {
        if stamps.is_empty() || text.is_empty() {
            return Ok(());
        }
        let layout = self.engine.layout_line(text, font_size)?;

        // Glyph outlines may overhang the layout box.
        let pad = (font_size * 0.5).ceil() as i32;
        let text_w = layout.width().ceil() as i32;
        let text_h = layout.height().ceil() as i32;
        let min_x = stamps.iter().map(|s| s.origin.x).min().unwrap_or_default() - pad;
        let min_y = stamps.iter().map(|s| s.origin.y).min().unwrap_or_default() - pad;
        let max_x = stamps.iter().map(|s| s.origin.x).max().unwrap_or_default() + text_w + pad;
        let max_y = stamps.iter().map(|s| s.origin.y).max().unwrap_or_default() + text_h + pad;
        let (w, h) = pixmap_size((max_x - min_x) as u32, (max_y - min_y) as u32)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for stamp in stamps {
            ctx.set_paint(stamp.color.to_vello());
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                f64::from(stamp.origin.x - min_x),
                f64::from(stamp.origin.y - min_y),
            )));

            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        composite_pixmap(surface, &pixmap, Point::new(min_x, min_y))
    }
}

/// Fallback rasterizer: every non-space character is a solid block.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockGlyphs;

impl BlockGlyphs {
    const ADVANCE: f32 = 0.6;

    fn cell(font_size: f32) -> (u32, u32) {
        let h = font_size.round().max(1.0) as u32;
        let w = (font_size * Self::ADVANCE).round().max(1.0) as u32;
        (w, h)
    }
}

impl TextRasterizer for BlockGlyphs {
    fn measure(&mut self, text: &str, font_size: f32) -> CardResult<TextExtent> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(CardError::validation("font size must be finite and > 0"));
        }
        let (w, h) = Self::cell(font_size);
        Ok(TextExtent {
            width: (w as usize * text.chars().count()) as f32,
            height: h as f32,
        })
    }

    fn stamp(
        &mut self,
        surface: &mut Canvas,
        text: &str,
        font_size: f32,
        stamps: &[GlyphStamp],
    ) -> CardResult<()> {
        let (cw, ch) = Self::cell(font_size);
        let (sw, sh) = surface.dimensions();
        for stamp in stamps {
            let px = stamp.color.to_pixel();
            for (i, c) in text.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let x0 = stamp.origin.x + (i as u32 * cw) as i32;
                // one-pixel gap between blocks
                for dy in 0..ch as i32 {
                    for dx in 0..cw.saturating_sub(1) as i32 {
                        let (x, y) = (x0 + dx, stamp.origin.y + dy);
                        if x >= 0 && y >= 0 && (x as u32) < sw && (y as u32) < sh {
                            surface.get_pixel_mut(x as u32, y as u32).blend(&px);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
