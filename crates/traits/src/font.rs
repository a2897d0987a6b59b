//! FontProvider trait for abstracting font resolution and metrics.
//!
//! The inline layout core never touches font files directly. It resolves a
//! `(family, style)` pair to an opaque [`FontHandle`] once and then asks the
//! provider for advance widths and vertical metrics at a given point size.

use petty_types::FontStyle;
use std::fmt::Debug;
use thiserror::Error;

/// Error type for font resolution and metric queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {family} (style: {style})")]
    NotFound { family: String, style: FontStyle },

    #[error("Invalid font handle: {0:?}")]
    InvalidHandle(FontHandle),

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Font parsing error: {0}")]
    ParseError(String),
}

/// Opaque reference to a face registered with a [`FontProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// A trait for resolving fonts and measuring text.
///
/// Every metric is a pure function of the handle and the requested size, so
/// callers never need to switch an ambient "current size" to take a
/// measurement.
pub trait FontProvider: Send + Sync + Debug {
    /// Resolve a registered face for `family` in the given `style`.
    fn resolve_font_handle(&self, family: &str, style: FontStyle) -> Result<FontHandle, FontError>;

    /// The name a renderer uses to select the face (usually the PostScript name).
    fn font_name(&self, handle: FontHandle) -> Result<String, FontError>;

    /// Horizontal advance of `text` at `size` points.
    fn advance_width(&self, handle: FontHandle, text: &str, size: f32) -> Result<f32, FontError>;

    /// Distance between consecutive baselines at `size` points.
    fn line_height(&self, handle: FontHandle, size: f32) -> Result<f32, FontError>;

    /// Height of the ascender above the baseline at `size` points.
    fn ascent(&self, handle: FontHandle, size: f32) -> Result<f32, FontError>;

    /// List all registered family names.
    fn families(&self) -> Vec<String> {
        Vec::new()
    }
}
