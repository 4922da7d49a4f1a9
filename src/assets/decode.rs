use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{CardError, CardResult};

/// Load a raster asset as straight-alpha RGBA8.
///
/// Both an absent file and an undecodable one count as a missing asset.
pub fn load_image(path: &Path) -> CardResult<Canvas> {
    let bytes = std::fs::read(path)
        .map_err(|e| CardError::asset_missing(format!("'{}': {e}", path.display())))?;
    decode_image(&bytes)
        .map_err(|e| CardError::asset_missing(format!("'{}': {e}", path.display())))
}

/// Decode an in-memory image of any supported format to RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardResult<Canvas> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(canvas: &Canvas) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(canvas.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Premultiplied RGBA8 (as rendered by `vello_cpu`) to straight alpha, in place.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
