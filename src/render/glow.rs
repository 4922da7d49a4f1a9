//! Glow text: the string stamped at every offset of a disc in the glow color, then once
//! more in the text color.

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::CardResult;
use crate::render::text::{GlyphStamp, TextExtent, TextRasterizer};

/// Colors and disc radius of one glow label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlowStyle {
    /// Fill color, drawn last.
    pub text: Rgba8,
    /// Glow color.
    pub glow: Rgba8,
    /// Glow disc radius in pixels; 0 draws a single glow stamp under the fill.
    pub radius: u32,
}

/// Integer offsets `(dx, dy)` with `dx² + dy² <= r²`, `dx` outer and `dy` inner, both ascending.
pub fn glow_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let mut out = Vec::new();
    for dx in -r..=r {
        for dy in -r..=r {
            if dx * dx + dy * dy <= r * r {
                out.push((dx, dy));
            }
        }
    }
    out
}

/// Glow label drawing on top of a [`TextRasterizer`].
pub struct GlowTextRenderer<T> {
    raster: T,
}

impl<T: TextRasterizer> GlowTextRenderer<T> {
    /// Renderer using `raster` for glyphs.
    pub fn new(raster: T) -> Self {
        Self { raster }
    }

    /// Extent of `text` at `font_size`.
    pub fn measure(&mut self, text: &str, font_size: f32) -> CardResult<TextExtent> {
        self.raster.measure(text, font_size)
    }

    /// Stamp list for `text` centered on `anchor`: glow stamps first, the fill last.
    pub fn stamps(
        &mut self,
        text: &str,
        anchor: Point,
        font_size: f32,
        style: GlowStyle,
    ) -> CardResult<Vec<GlyphStamp>> {
        let extent = self.raster.measure(text, font_size)?;
        let origin = Point::new(
            anchor.x - (extent.width / 2.0).round() as i32,
            anchor.y - (extent.height / 2.0).round() as i32,
        );

        let mut stamps: Vec<GlyphStamp> = glow_offsets(style.radius)
            .into_iter()
            .map(|(dx, dy)| GlyphStamp {
                origin: origin.offset(dx, dy),
                color: style.glow,
            })
            .collect();
        stamps.push(GlyphStamp {
            origin,
            color: style.text,
        });
        Ok(stamps)
    }

    /// Draw `text` centered on `anchor`. Empty text draws nothing.
    pub fn draw(
        &mut self,
        surface: &mut Canvas,
        text: &str,
        anchor: Point,
        font_size: f32,
        style: GlowStyle,
    ) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let stamps = self.stamps(text, anchor, font_size, style)?;
        self.raster.stamp(surface, text, font_size, &stamps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;
