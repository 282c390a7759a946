//! keyline-trace: Pure raster tracing pipeline (sans-IO).
//!
//! Converts raster images into closed vector path segments through:
//! decode -> optional dark-background keying -> threshold binarization ->
//! connected-region extraction -> speckle suppression -> Moore-neighbor
//! boundary tracing -> segment fitting.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Serialization to SVG and all
//! subprocess/network fallback logic live in `keyline-export` and
//! `keyline-engine`.

pub mod binarize;
pub mod contour;
pub mod fit;
pub mod keying;
pub mod simplify;
pub mod types;

pub use fit::Segment;
pub use types::{Contour, Dimensions, Point, RgbaImage, TraceError, TraceOptions};

/// Result of tracing one raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceResult {
    /// One closed segment list per surviving contour. Empty when the
    /// bitmap had no traceable foreground, which is valid output.
    pub paths: Vec<Vec<Segment>>,

    /// Dimensions of the source image in pixels, needed downstream to
    /// set the SVG `viewBox`.
    pub dimensions: Dimensions,
}

/// Trace an already-decoded RGBA image.
///
/// Runs binarization, region extraction, speckle suppression, and
/// segment fitting. Infallible: an image with no dark regions simply
/// yields zero paths. Output is deterministic for identical input.
#[must_use]
pub fn trace_image(image: &RgbaImage, options: &TraceOptions) -> TraceResult {
    let bitmap = binarize::binarize(image, options.threshold);
    let contours = contour::extract_contours(&bitmap, options.speckle_size);
    let paths = fit::fit_contours(&contours, options);

    TraceResult {
        paths,
        dimensions: Dimensions {
            width: image.width(),
            height: image.height(),
        },
    }
}

/// Run the full tracing pipeline on raw image bytes.
///
/// Decodes the image, optionally keys near-black pixels to transparency
/// (so solid dark backgrounds drop out of the traced result), and traces
/// the remainder.
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`TraceError::ImageDecode`] if the image cannot be decoded.
/// Decode failures are fatal: the preprocessor never runs on
/// undecodable input and no tracing is attempted.
pub fn process(
    image_bytes: &[u8],
    options: &TraceOptions,
    key_dark_background: bool,
) -> Result<TraceResult, TraceError> {
    let mut image = keying::decode(image_bytes)?;
    if key_dark_background {
        keying::key_dark_background(&mut image);
    }
    Ok(trace_image(&image, options))
}
