//! keyline-export: Pure serializers and post-processing (sans-IO).
//!
//! Turns traced segment lists into SVG markup, guarantees transparency
//! declarations on the result, validates markup from any engine tier,
//! and encodes the final document as a base64 data URL.

pub mod document;
pub mod encode;
pub mod svg;
pub mod transparency;

pub use document::{ExportError, VectorDocument};
pub use encode::to_data_url;
pub use svg::{build_path_data, render_svg};
pub use transparency::ensure_transparent;
