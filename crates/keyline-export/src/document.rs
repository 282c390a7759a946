//! The `VectorDocument` type: validated SVG markup with derived flags.
//!
//! Whichever engine tier produced the markup — local trace, external
//! CLI export, or the remote API — it passes through this type exactly
//! once, getting a minimal sanity check on construction and the
//! transparency guarantee applied before encoding.

use crate::encode;
use crate::transparency::{self, NO_FILL_DECL, TRANSPARENT_BG_DECL};

/// Markup shorter than this cannot be a plausible SVG document.
pub const MIN_MARKUP_LEN: usize = 32;

/// Errors produced while validating or finalizing vector markup.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The produced markup fails the minimal sanity check.
    #[error("invalid vector output: {reason}")]
    InvalidMarkup {
        /// Why the markup was rejected.
        reason: String,
    },
}

/// A validated vector document.
///
/// Construction performs the sanity check; [`Self::with_transparency`]
/// applies the idempotent transparency patch. The markup is never
/// mutated after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    markup: String,
}

impl VectorDocument {
    /// Validate raw markup into a document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidMarkup`] if the markup is shorter
    /// than [`MIN_MARKUP_LEN`] or lacks a root `<svg` tag.
    pub fn new(markup: String) -> Result<Self, ExportError> {
        if markup.trim().len() < MIN_MARKUP_LEN {
            return Err(ExportError::InvalidMarkup {
                reason: format!("markup is too short ({} bytes)", markup.trim().len()),
            });
        }
        if !markup.contains("<svg") {
            return Err(ExportError::InvalidMarkup {
                reason: "missing root <svg> tag".to_owned(),
            });
        }
        Ok(Self { markup })
    }

    /// The document markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Consume the document and return the markup.
    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }

    /// Whether the document declares no default fill.
    #[must_use]
    pub fn has_no_fill(&self) -> bool {
        self.markup.contains(NO_FILL_DECL)
    }

    /// Whether the document declares a transparent background.
    #[must_use]
    pub fn has_transparent_background(&self) -> bool {
        self.markup.contains(TRANSPARENT_BG_DECL)
    }

    /// Number of `<path>` elements in the document.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.markup.matches("<path").count()
    }

    /// Apply the transparency guarantee, returning a patched document.
    ///
    /// Idempotent: a document that already carries both declarations is
    /// returned unchanged.
    #[must_use]
    pub fn with_transparency(self) -> Self {
        Self {
            markup: transparency::ensure_transparent(&self.markup),
        }
    }

    /// Base64 data-URL encoding of the markup.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        encode::to_data_url(&self.markup)
    }
}
