use petty_traits::FontError;
use petty_types::FontStyle;
use std::sync::Arc;
use ttf_parser::{GlyphId, name_id};

/// A TrueType or OpenType face loaded from raw font data.
///
/// Vertical metrics are read once at load time. Advance widths need the
/// glyph tables, so the face is re-parsed over the shared data for each
/// measurement; parsing only reads the table directory.
#[derive(Clone)]
pub struct TrueTypeFace {
    data: Arc<Vec<u8>>,
    index: u32,
    postscript_name: String,
    family: String,
    style: FontStyle,
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    line_gap: f32,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("postscript_name", &self.postscript_name)
            .field("family", &self.family)
            .field("style", &self.style)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl TrueTypeFace {
    pub fn parse(data: Arc<Vec<u8>>, index: u32) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| FontError::ParseError(e.to_string()))?;

        let family = find_name(&face, name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| find_name(&face, name_id::FAMILY))
            .ok_or_else(|| FontError::ParseError("font has no family name".to_string()))?;
        let postscript_name = find_name(&face, name_id::POST_SCRIPT_NAME)
            .or_else(|| find_name(&face, name_id::FULL_NAME).map(|n| n.replace(' ', "")))
            .unwrap_or_else(|| family.replace(' ', ""));
        let style = FontStyle::from_flags(face.is_bold(), face.is_italic() || face.is_oblique());

        let parsed = Self {
            postscript_name,
            family,
            style,
            units_per_em: face.units_per_em() as f32,
            ascender: face.ascender() as f32,
            descender: face.descender() as f32,
            line_gap: face.line_gap() as f32,
            data: data.clone(),
            index,
        };
        log::debug!(
            "Parsed font '{}' (family '{}', {})",
            parsed.postscript_name,
            parsed.family,
            parsed.style
        );
        Ok(parsed)
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn advance_width(&self, text: &str, size: f32) -> Result<f32, FontError> {
        let face = ttf_parser::Face::parse(&self.data, self.index)
            .map_err(|e| FontError::ParseError(e.to_string()))?;
        let units: u32 = text
            .chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(glyph).unwrap_or(0) as u32
            })
            .sum();
        Ok(self.scale(units as f32, size))
    }

    pub fn line_height(&self, size: f32) -> f32 {
        self.scale(self.ascender - self.descender + self.line_gap, size)
    }

    pub fn ascent(&self, size: f32) -> f32 {
        self.scale(self.ascender, size)
    }

    fn scale(&self, units: f32, size: f32) -> f32 {
        units * size / self.units_per_em
    }
}

fn find_name(face: &ttf_parser::Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == id)
        .find_map(|name| name.to_string())
}
