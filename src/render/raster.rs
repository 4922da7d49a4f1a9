//! Pixel helpers shared by the compositor and text rasterizer.

use image::imageops::{self, FilterType};
use vello_cpu::kurbo::Shape;

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::core::{Canvas, Point, Rgba8, Size};
use crate::foundation::error::{CardError, CardResult};

/// Validate a scratch surface size for `vello_cpu`, which addresses pixmaps with `u16`.
pub fn pixmap_size(width: u32, height: u32) -> CardResult<(u16, u16)> {
    let w = u16::try_from(width.max(1))
        .map_err(|_| CardError::validation(format!("surface width {width} exceeds u16")))?;
    let h = u16::try_from(height.max(1))
        .map_err(|_| CardError::validation(format!("surface height {height} exceeds u16")))?;
    Ok((w, h))
}

/// Read back a premultiplied pixmap as a straight-alpha canvas.
pub fn pixmap_to_canvas(pixmap: &vello_cpu::Pixmap) -> CardResult<Canvas> {
    let mut data = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    Canvas::from_raw(u32::from(pixmap.width()), u32::from(pixmap.height()), data)
        .ok_or_else(|| CardError::validation("pixmap buffer does not match its dimensions"))
}

/// Alpha-composite a rendered pixmap over `surface` with its top-left at `at`.
pub fn composite_pixmap(
    surface: &mut Canvas,
    pixmap: &vello_cpu::Pixmap,
    at: Point,
) -> CardResult<()> {
    let layer = pixmap_to_canvas(pixmap)?;
    overlay(surface, &layer, at);
    Ok(())
}

/// Alpha-composite `top` over `bottom`; parts falling outside `bottom` are clipped.
pub fn overlay(bottom: &mut Canvas, top: &Canvas, at: Point) {
    imageops::overlay(bottom, top, i64::from(at.x), i64::from(at.y));
}

/// Bicubic resize to an exact size; aspect ratio is not preserved.
pub fn resize(image: &Canvas, size: Size) -> Canvas {
    if image.dimensions() == (size.width, size.height) {
        return image.clone();
    }
    imageops::resize(image, size.width, size.height, FilterType::CatmullRom)
}

/// Fill an anti-aliased disc over `surface`.
pub fn fill_circle(surface: &mut Canvas, center: Point, radius: u32, color: Rgba8) -> CardResult<()> {
    if radius == 0 {
        return Ok(());
    }
    let (w, h) = pixmap_size(surface.width(), surface.height())?;
    let circle = vello_cpu::kurbo::Circle::new(
        (f64::from(center.x), f64::from(center.y)),
        f64::from(radius),
    );

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(color.to_vello());
    ctx.fill_path(&circle.to_path(0.1));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    composite_pixmap(surface, &pixmap, Point::default())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
