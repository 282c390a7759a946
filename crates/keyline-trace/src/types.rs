//! Shared types for the keyline tracing pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference decoded
/// raster data without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between this point and another.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A closed boundary of one connected foreground region.
///
/// Points are boundary pixel centers in trace order; the contour is
/// implicitly closed (last point connects back to the first). `area` is
/// the pixel count of the enclosed component, used for speckle
/// suppression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<Point>,
    area: u32,
}

impl Contour {
    /// Create a new contour from trace-ordered boundary points.
    #[must_use]
    pub const fn new(points: Vec<Point>, area: u32) -> Self {
        Self { points, area }
    }

    /// Returns a slice of all boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pixel count of the enclosed connected region.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.area
    }

    /// Returns the number of boundary points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for one tracing job.
///
/// All parameters have defaults matching the empirically chosen values
/// used in production. They are configuration, not constants: nothing in
/// the pipeline assumes they are optimal for all inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Luminance threshold (0-255). Pixels darker than this are
    /// foreground.
    pub threshold: u8,

    /// Minimum connected-region area in pixels. Smaller regions are
    /// discarded as speckle noise.
    pub speckle_size: u32,

    /// Fitting tolerance in pixels. Higher values remove more boundary
    /// points, producing fewer, smoother segments at the cost of
    /// fidelity.
    pub curve_tolerance: f64,

    /// Whether to smooth fitted corners into quadratic Bezier curves.
    /// When `false`, contours are emitted as straight line segments.
    pub use_curves: bool,

    /// Fill color for traced paths. `None` uses black.
    pub fill_color: Option<String>,

    /// Background color declared on the document root. `None` leaves the
    /// background to the transparency post-processor.
    pub background_color: Option<String>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            threshold: 180,
            speckle_size: 5,
            curve_tolerance: 0.2,
            use_curves: true,
            fill_color: None,
            background_color: None,
        }
    }
}

/// Errors that can occur during decoding or tracing.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
