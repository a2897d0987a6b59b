//! Option resolution: sparse requests in, fully resolved style records out.

use crate::FlowError;
use crate::options::StyleRequest;
use petty_traits::{ActiveFont, FontHandle, FontProvider};
use petty_types::{Color, FontStyle};

/// A fully resolved text style, with the metrics needed to lay out a line.
///
/// Two records compare equal only when every field does, which is what lets
/// the queue drop style changes that would not change anything.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub font: FontHandle,
    pub font_name: String,
    pub family: String,
    pub style: FontStyle,
    pub size: f32,
    pub color: Color,
    pub line_height: f32,
    pub ascent: f32,
}

impl StyleRecord {
    pub fn active_font(&self) -> ActiveFont {
        ActiveFont {
            family: self.family.clone(),
            name: self.font_name.clone(),
            size: self.size,
        }
    }

    pub fn width_of(&self, text: &str, fonts: &dyn FontProvider) -> Result<f32, FlowError> {
        Ok(fonts.advance_width(self.font, text, self.size)?)
    }

    pub fn space_width(&self, fonts: &dyn FontProvider) -> Result<f32, FlowError> {
        self.width_of(" ", fonts)
    }
}

/// Merge `request` over `fallback` and look up the resulting face and metrics.
pub fn resolve(
    request: &StyleRequest,
    fallback: &StyleRecord,
    fonts: &dyn FontProvider,
) -> Result<StyleRecord, FlowError> {
    build(
        request.font_family.as_deref().unwrap_or(&fallback.family),
        request.style.unwrap_or(fallback.style),
        request.size.unwrap_or(fallback.size),
        request.color.as_ref().unwrap_or(&fallback.color),
        fonts,
    )
}

/// Resolve a flow's default style against the renderer's ambient font and
/// fill color. The style tag always defaults to `Normal`.
pub fn resolve_default(
    request: &StyleRequest,
    ambient_font: &ActiveFont,
    ambient_color: &Color,
    fonts: &dyn FontProvider,
) -> Result<StyleRecord, FlowError> {
    build(
        request.font_family.as_deref().unwrap_or(&ambient_font.family),
        request.style.unwrap_or_default(),
        request.size.unwrap_or(ambient_font.size),
        request.color.as_ref().unwrap_or(ambient_color),
        fonts,
    )
}

fn build(
    family: &str,
    style: FontStyle,
    size: f32,
    color: &Color,
    fonts: &dyn FontProvider,
) -> Result<StyleRecord, FlowError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(FlowError::InvalidOption(format!(
            "font size must be a positive number, got {}",
            size
        )));
    }

    let font = fonts.resolve_font_handle(family, style)?;
    Ok(StyleRecord {
        font,
        font_name: fonts.font_name(font)?,
        family: family.to_string(),
        style,
        size,
        color: color.clone(),
        line_height: fonts.line_height(font, size)?,
        ascent: fonts.ascent(font, size)?,
    })
}
