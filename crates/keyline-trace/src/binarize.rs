//! Threshold binarization: RGBA buffer in, foreground bitmap out.
//!
//! Foreground means "dark enough to trace": a pixel is foreground when it
//! is sufficiently opaque *and* its luminance falls below the configured
//! threshold. After dark-background keying, transparency therefore acts
//! as the background mask regardless of the underlying color.

use image::RgbaImage;

/// Minimum alpha for a pixel to participate in tracing at all.
///
/// Pixels keyed to transparency (alpha 0) and mostly transparent
/// anti-aliasing fringes are treated as background.
pub const MIN_OPAQUE_ALPHA: u8 = 128;

/// A binary foreground mask in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Bitmap {
    /// Create an all-background bitmap of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` if `(x, y)` is inside the bitmap and foreground.
    ///
    /// Out-of-bounds coordinates read as background, which lets boundary
    /// tracing probe neighbors without explicit edge handling.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        #[allow(clippy::cast_sign_loss)]
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.bits[idx]
    }

    /// Set the pixel at `(x, y)` to foreground.
    pub fn set(&mut self, x: u32, y: u32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.bits[idx] = true;
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn count_foreground(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Integer luminance of an RGB triple, 0-255.
///
/// Uses the standard Rec. 601 weights in integer arithmetic so the
/// result is exact and identical across runs and platforms.
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    #[allow(clippy::cast_possible_truncation)]
    let value = (weighted / 1000) as u8;
    value
}

/// Binarize an RGBA image against a luminance threshold.
///
/// A pixel is foreground when `alpha >= MIN_OPAQUE_ALPHA` and
/// `luminance < threshold`. The scan is row-major and the result is
/// deterministic for identical input.
#[must_use]
pub fn binarize(image: &RgbaImage, threshold: u8) -> Bitmap {
    let mut bitmap = Bitmap::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a >= MIN_OPAQUE_ALPHA && luminance(r, g, b) < threshold {
            bitmap.set(x, y);
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
    }

    #[test]
    fn luminance_weights_green_heaviest() {
        assert!(luminance(0, 128, 0) > luminance(128, 0, 0));
        assert!(luminance(128, 0, 0) > luminance(0, 0, 128));
    }

    #[test]
    fn out_of_bounds_reads_background() {
        let bitmap = Bitmap::new(4, 4);
        assert!(!bitmap.get(-1, 0));
        assert!(!bitmap.get(0, -1));
        assert!(!bitmap.get(4, 0));
        assert!(!bitmap.get(0, 4));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut bitmap = Bitmap::new(3, 3);
        bitmap.set(1, 2);
        assert!(bitmap.get(1, 2));
        assert!(!bitmap.get(2, 1));
        assert_eq!(bitmap.count_foreground(), 1);
    }

    #[test]
    fn dark_opaque_pixel_is_foreground() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        let bitmap = binarize(&img, 180);
        assert!(bitmap.get(0, 0));
    }

    #[test]
    fn light_pixel_is_background() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let bitmap = binarize(&img, 180);
        assert!(!bitmap.get(0, 0));
    }

    #[test]
    fn transparent_dark_pixel_is_background() {
        // A keyed pixel must not trace even though its RGB is black.
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        let bitmap = binarize(&img, 180);
        assert!(!bitmap.get(0, 0));
    }

    #[test]
    fn threshold_boundary_is_strict() {
        // luminance == threshold is background (strictly-below rule).
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([100, 100, 100, 255]));
        assert_eq!(luminance(100, 100, 100), 100);
        assert!(!binarize(&img, 100).get(0, 0));
        assert!(binarize(&img, 101).get(0, 0));
    }

    #[test]
    fn binarize_is_deterministic() {
        let img = RgbaImage::from_fn(9, 7, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            let v = ((x * 37 + y * 11) % 256) as u8;
            image::Rgba([v, v, v, 255])
        });
        assert_eq!(binarize(&img, 128), binarize(&img, 128));
    }
}
