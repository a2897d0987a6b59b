#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use petty_flow::{FlowAppError, FontLibrary, InMemoryResourceProvider, ResourceProvider, Script};
use serde_json::Value;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render a JSON script with the standard fonts and no images.
pub fn render_script(script: &Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_script_with_resources(script, Arc::new(InMemoryResourceProvider::new()))
}

pub fn render_script_with_resources(
    script: &Value,
    resources: Arc<dyn ResourceProvider>,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pdf = try_render(script, resources)?;
    GeneratedPdf::from_bytes(pdf)
}

/// Render without converting the error, so tests can match on it.
pub fn try_render(
    script: &Value,
    resources: Arc<dyn ResourceProvider>,
) -> Result<Vec<u8>, FlowAppError> {
    let script = Script::from_json_str(&script.to_string())?;
    let fonts = FontLibrary::with_standard_fonts();
    let canvas = script.render(&fonts, resources)?;
    let mut bytes = Vec::new();
    canvas.save(&mut bytes)?;
    Ok(bytes)
}

/// A 2x2 RGBA PNG with one transparent pixel.
pub fn tiny_png() -> Vec<u8> {
    let mut image = image::RgbaImage::new(2, 2);
    image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    image.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
    image.put_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}
