//! Edge feathering for the portrait cutout.

use crate::foundation::core::Canvas;

/// Alpha for pixel `(x, y)` of a `width` x `height` image feathered over `margin` pixels.
///
/// Distance is measured to the nearest edge pixel, so edge pixels get 0 and pixels at
/// least `margin` in from every edge stay fully opaque.
pub fn feather_alpha(x: u32, y: u32, width: u32, height: u32, margin: u32) -> u8 {
    if margin == 0 {
        return 255;
    }
    let d = x
        .min(width.saturating_sub(1).saturating_sub(x))
        .min(y)
        .min(height.saturating_sub(1).saturating_sub(y));
    if d >= margin {
        return 255;
    }
    ((255 * d) / margin).min(255) as u8
}

/// The full mask, one alpha byte per pixel in row-major order.
pub fn feather_mask(width: u32, height: u32, margin: u32) -> image::GrayImage {
    image::GrayImage::from_fn(width, height, |x, y| {
        image::Luma([feather_alpha(x, y, width, height, margin)])
    })
}

/// Replace the image's alpha channel with the feather mask.
pub fn apply_feather(image: &mut Canvas, margin: u32) {
    let (w, h) = image.dimensions();
    for (x, y, px) in image.enumerate_pixels_mut() {
        px.0[3] = feather_alpha(x, y, w, h, margin);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/feather.rs"]
mod tests;
