//! Metrics for the standard PDF base fonts.
//!
//! Widths are in thousandths of an em for the printable ASCII range
//! (`' '..='~'`), taken from the Adobe Core 14 AFM files. Characters outside
//! that range are measured with the face's fallback width.

use petty_types::FontStyle;

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Widths {
    Table(&'static [u16; 95]),
    Monospace(u16),
}

/// One of the base fonts every PDF viewer provides.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFace {
    postscript_name: &'static str,
    family: &'static str,
    style: FontStyle,
    widths: Widths,
    fallback_width: u16,
    ascender: i16,
    bbox_bottom: i16,
    bbox_top: i16,
}

impl BuiltinFace {
    /// The Helvetica and Courier families, four styles each.
    pub fn standard_faces() -> Vec<BuiltinFace> {
        let helvetica = |postscript_name, style, widths| BuiltinFace {
            postscript_name,
            family: "Helvetica",
            style,
            widths: Widths::Table(widths),
            fallback_width: 556,
            ascender: 718,
            bbox_bottom: -225,
            bbox_top: 931,
        };
        let courier = |postscript_name, style| BuiltinFace {
            postscript_name,
            family: "Courier",
            style,
            widths: Widths::Monospace(600),
            fallback_width: 600,
            ascender: 629,
            bbox_bottom: -250,
            bbox_top: 805,
        };

        vec![
            helvetica("Helvetica", FontStyle::Normal, &HELVETICA_WIDTHS),
            helvetica("Helvetica-Bold", FontStyle::Bold, &HELVETICA_BOLD_WIDTHS),
            helvetica("Helvetica-Oblique", FontStyle::Italic, &HELVETICA_WIDTHS),
            helvetica(
                "Helvetica-BoldOblique",
                FontStyle::BoldItalic,
                &HELVETICA_BOLD_WIDTHS,
            ),
            courier("Courier", FontStyle::Normal),
            courier("Courier-Bold", FontStyle::Bold),
            courier("Courier-Oblique", FontStyle::Italic),
            courier("Courier-BoldOblique", FontStyle::BoldItalic),
        ]
    }

    pub fn postscript_name(&self) -> &str {
        self.postscript_name
    }

    pub fn family(&self) -> &str {
        self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    fn char_width(&self, c: char) -> u16 {
        match self.widths {
            Widths::Monospace(width) => width,
            Widths::Table(table) => {
                let code = c as u32;
                if (0x20..=0x7e).contains(&code) {
                    table[(code - 0x20) as usize]
                } else {
                    self.fallback_width
                }
            }
        }
    }

    pub fn advance_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }

    /// Distance between baselines: the height of the font bounding box.
    pub fn line_height(&self, size: f32) -> f32 {
        (self.bbox_top - self.bbox_bottom) as f32 * size / 1000.0
    }

    pub fn ascent(&self, size: f32) -> f32 {
        self.ascender as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(name: &str) -> BuiltinFace {
        BuiltinFace::standard_faces()
            .into_iter()
            .find(|f| f.postscript_name() == name)
            .unwrap()
    }

    #[test]
    fn helvetica_widths_follow_afm() {
        let helvetica = face("Helvetica");
        assert!((helvetica.advance_width("Hi", 10.0) - 9.44).abs() < 1e-4);
        assert!((helvetica.advance_width(" ", 12.0) - 3.336).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let regular = face("Helvetica").advance_width("bold", 12.0);
        let bold = face("Helvetica-Bold").advance_width("bold", 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn courier_is_monospaced() {
        let courier = face("Courier-Oblique");
        assert_eq!(courier.advance_width("iiii", 10.0), courier.advance_width("MMMM", 10.0));
        assert!((courier.advance_width("abc", 10.0) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn vertical_metrics_scale_with_size() {
        let helvetica = face("Helvetica");
        assert!((helvetica.ascent(10.0) - 7.18).abs() < 1e-4);
        assert!((helvetica.line_height(10.0) - 11.56).abs() < 1e-4);
    }

    #[test]
    fn non_ascii_uses_fallback_width() {
        let helvetica = face("Helvetica");
        assert!((helvetica.advance_width("é", 1000.0) - 556.0).abs() < 1e-3);
    }
}
