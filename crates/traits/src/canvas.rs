//! Drawing surface consumed when a flow is replayed.

use petty_types::{Color, Point};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Unknown font '{0}' requested from the canvas")]
    UnknownFont(String),
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error("Failed to decode image '{name}': {message}")]
    Image { name: String, message: String },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}

/// The font a canvas is currently drawing with.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFont {
    pub family: String,
    /// Renderer-facing face name, as returned by `FontProvider::font_name`.
    pub name: String,
    pub size: f32,
}

/// Declared size of an inline image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub width: f32,
    pub height: f32,
}

impl ImagePlacement {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A trait for page renderers, abstracting the drawing primitives.
///
/// Positions are region-local: the canvas maps them to page space using its
/// active region. Text is positioned by its baseline origin and images by
/// their bottom-left corner, so an image drawn at a text baseline sits on it.
pub trait Canvas {
    fn draw_text(&mut self, text: &str, at: Point) -> Result<(), RenderError>;

    fn draw_image(
        &mut self,
        name: &str,
        at: Point,
        placement: &ImagePlacement,
    ) -> Result<(), RenderError>;

    fn start_new_page(&mut self) -> Result<(), RenderError>;

    fn fill_color(&self) -> Color;

    fn set_fill_color(&mut self, color: &Color);

    fn font(&self) -> ActiveFont;

    fn set_font(&mut self, font: &ActiveFont) -> Result<(), RenderError>;

    /// Fill a rectangle whose top-left corner is `origin`, extending right by
    /// `width` and down by `height`.
    fn fill_rectangle(&mut self, origin: Point, width: f32, height: f32)
    -> Result<(), RenderError>;
}
