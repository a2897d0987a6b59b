#![allow(dead_code)]

use lopdf::{Dictionary, Document as LopdfDocument, Object};
use std::collections::BTreeSet;

/// Extract all text content from a PDF document, one page per line block.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        if let Ok(page_text) = doc.extract_text(&[*page_num]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Text of a single page, 1-based.
pub fn page_text(doc: &LopdfDocument, page_num: u32) -> String {
    doc.extract_text(&[page_num]).unwrap_or_default()
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        _ => None,
    }
}

/// Resource dictionaries of every page.
fn page_resources(doc: &LopdfDocument) -> Vec<&Dictionary> {
    doc.get_pages()
        .values()
        .filter_map(|page_id| doc.get_dictionary(*page_id).ok())
        .filter_map(|page| page.get(b"Resources").ok())
        .filter_map(|resources| resolve_dict(doc, resources))
        .collect()
}

/// Base font names referenced from page resources.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = BTreeSet::new();
    for resources in page_resources(doc) {
        let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve_dict(doc, f)) else {
            continue;
        };
        for (_key, font) in font_dict.iter() {
            let base_font = resolve_dict(doc, font)
                .and_then(|font| font.get(b"BaseFont").ok())
                .and_then(|name| name.as_name().ok());
            if let Some(name) = base_font {
                fonts.insert(String::from_utf8_lossy(name).to_string());
            }
        }
    }
    fonts.into_iter().collect()
}

/// Number of image XObjects in the document, soft masks included.
pub fn count_image_xobjects(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|subtype| subtype.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .count()
}

pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page_num).copied()?;
    let media_box = doc.get_dictionary(page_id).ok()?.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let coord = |i: usize| media_box[i].as_float().ok();
    Some((coord(2)? - coord(0)?, coord(3)? - coord(1)?))
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does not contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should not contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

#[macro_export]
macro_rules! assert_pdf_max_pages {
    ($pdf:expr, $max:expr) => {
        assert!(
            $pdf.page_count() <= $max,
            "Expected at most {} pages, got {}",
            $max,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF references a font whose name contains a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should contain font matching '{}', fonts found: {:?}",
            $pattern,
            fonts
        );
    };
}

/// Assert page dimensions within tolerance
#[macro_export]
macro_rules! assert_pdf_page_size {
    ($pdf:expr, $page:expr, $width:expr, $height:expr) => {
        let dims = $crate::common::pdf_assertions::get_page_dimensions(&$pdf.doc, $page);
        let (w, h) = dims.unwrap_or_else(|| panic!("Could not get dimensions for page {}", $page));
        assert!((w - $width).abs() < 1.0, "Page {} width expected ~{}, got {}", $page, $width, w);
        assert!((h - $height).abs() < 1.0, "Page {} height expected ~{}, got {}", $page, $height, h);
    };
}
