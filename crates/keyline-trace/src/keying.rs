//! Image decoding and dark-background keying.
//!
//! Accepts raw image bytes (PNG, JPEG) and produces an RGBA buffer, then
//! optionally keys near-black pixels to full transparency so that solid
//! dark backgrounds drop out of the traced result.
//!
//! This is the first step in the pipeline: raw bytes in, `RgbaImage` out.

use image::RgbaImage;

use crate::types::TraceError;

/// Channel value below which a pixel counts as near-black.
///
/// A pixel is keyed out only when R, G, and B are *all* below this
/// value, so dark-but-colored pixels survive.
pub const DARKNESS_KEY_THRESHOLD: u8 = 30;

/// Decode raw image bytes into an RGBA buffer.
///
/// Supports PNG and JPEG (whatever the `image` crate can decode with the
/// enabled features).
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `bytes` is empty.
/// Returns [`TraceError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, TraceError> {
    if bytes.is_empty() {
        return Err(TraceError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Key near-black pixels to full transparency, in place.
///
/// Scans the entire buffer — no early exit, since downstream trace
/// quality depends on a complete pass. Every pixel whose R, G, and B
/// values are all below [`DARKNESS_KEY_THRESHOLD`] gets its alpha set to
/// 0. No other channel is modified and dimensions are unchanged.
pub fn key_dark_background(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r < DARKNESS_KEY_THRESHOLD && g < DARKNESS_KEY_THRESHOLD && b < DARKNESS_KEY_THRESHOLD {
            pixel.0[3] = 0;
        }
    }
}
