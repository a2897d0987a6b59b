//! A `lopdf` document that implements the canvas and region contracts.
//!
//! Content operations are collected per page and written out as one content
//! stream per page on save. Fonts are referenced by name as Type1 fonts with
//! WinAnsi encoding, so the standard base fonts render without embedding.

use crate::config::PageConfig;
use crate::images;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use petty_traits::{
    ActiveFont, Canvas, ImagePlacement, InMemoryResourceProvider, Region, RenderError,
    ResourceError, ResourceProvider,
};
use petty_types::{Color, Point};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// A rectangular area of the page that content is laid out into.
///
/// `left` and `top` are absolute page coordinates. A frame without a height
/// stretches downward to fit its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: Option<f32>,
}

/// Placement of a nested frame relative to the enclosing one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameSpec {
    /// Offset from the enclosing frame's left edge.
    pub left: f32,
    /// Defaults to the rest of the enclosing frame's width.
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Default)]
struct PageContent {
    operations: Vec<Operation>,
    emitted_color: Option<Color>,
}

pub struct PdfCanvas {
    config: PageConfig,
    document: Document,
    resources: Arc<dyn ResourceProvider>,
    pages: Vec<PageContent>,
    frames: Vec<Frame>,
    y: f32,
    fill_color: Color,
    font: ActiveFont,
    font_keys: HashMap<String, String>,
    image_keys: HashMap<String, String>,
    xobjects: Dictionary,
    fonts: Dictionary,
}

impl PdfCanvas {
    pub fn new(config: PageConfig) -> Self {
        let margin_box = Frame {
            left: config.margins.left,
            top: config.margin_top(),
            width: config.content_width(),
            height: Some(config.content_height()),
        };
        Self {
            config,
            document: Document::with_version("1.7"),
            resources: Arc::new(InMemoryResourceProvider::new()),
            pages: vec![PageContent::default()],
            frames: vec![margin_box],
            y: margin_box.top,
            fill_color: Color::default(),
            font: ActiveFont {
                family: "Helvetica".to_string(),
                name: "Helvetica".to_string(),
                size: 12.0,
            },
            font_keys: HashMap::new(),
            image_keys: HashMap::new(),
            xobjects: Dictionary::new(),
            fonts: Dictionary::new(),
        }
    }

    /// Use `provider` to look up images by name.
    pub fn with_resources(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resources = provider;
        self
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Absolute vertical position of the document cursor.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn frame(&self) -> Frame {
        *self.current_frame()
    }

    /// Move the document cursor down by `dy` points.
    pub fn move_down(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Run `body` with a nested frame starting at the document cursor.
    ///
    /// Afterwards the cursor sits below the frame: at its fixed bottom edge,
    /// or wherever its content ended for a stretching frame.
    pub fn bounding_box<T, E>(
        &mut self,
        spec: FrameSpec,
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let parent = *self.current_frame();
        let frame = Frame {
            left: parent.left + spec.left,
            top: self.y,
            width: spec.width.unwrap_or(parent.width - spec.left),
            height: spec.height,
        };
        log::debug!("Entering frame {:?}", frame);
        self.frames.push(frame);

        let result = body(self);

        if let Some(frame) = self.frames.pop()
            && let Some(height) = frame.height
        {
            self.y = frame.top - height;
        }
        result
    }

    fn current_frame(&self) -> &Frame {
        // The margin box at the bottom of the stack is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn ops(&mut self) -> &mut PageContent {
        let index = self.pages.len() - 1;
        &mut self.pages[index]
    }

    fn absolute_x(&self, local_x: f32) -> f32 {
        self.current_frame().left + local_x
    }

    fn sync_fill_color(&mut self) {
        let color = self.fill_color.clone();
        let page = self.ops();
        if page.emitted_color.as_ref() != Some(&color) {
            let [r, g, b] = color.to_unit_rgb();
            page.operations
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            page.emitted_color = Some(color);
        }
    }

    fn font_key(&mut self, name: &str) -> String {
        if let Some(key) = self.font_keys.get(name) {
            return key.clone();
        }
        if !is_standard_font(name) {
            log::warn!(
                "Font '{}' is not one of the 14 standard PDF fonts and is not embedded; \
                 viewers will substitute it, so drawn text may not match the measured layout",
                name
            );
        }
        let key = format!("F{}", self.font_keys.len() + 1);
        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(name.as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.set(key.as_bytes(), font_id);
        self.font_keys.insert(name.to_string(), key.clone());
        key
    }

    fn image_key(&mut self, name: &str) -> Result<String, RenderError> {
        if let Some(key) = self.image_keys.get(name) {
            return Ok(key.clone());
        }
        let data = self.resources.load(name).map_err(|e| match e {
            ResourceError::NotFound(_) => RenderError::ImageNotFound(name.to_string()),
            ResourceError::LoadFailed { message, .. } => RenderError::Image {
                name: name.to_string(),
                message,
            },
        })?;
        let decoded = images::decode(name, &data)?;

        let mut image = decoded.image;
        if let Some(mask) = decoded.soft_mask {
            let mask_id = self.document.add_object(mask);
            image.dict.set("SMask", mask_id);
        }
        let image_id = self.document.add_object(image);
        let key = format!("Im{}", self.image_keys.len() + 1);
        self.xobjects.set(key.as_bytes(), image_id);
        self.image_keys.insert(name.to_string(), key.clone());
        Ok(key)
    }

    /// Write the finished document.
    pub fn save<W: Write>(mut self, writer: &mut W) -> Result<(), RenderError> {
        let pages_id = self.document.new_object_id();
        let resources_id = self.document.add_object(dictionary! {
            "Font" => std::mem::take(&mut self.fonts),
            "XObject" => std::mem::take(&mut self.xobjects),
        });

        let (width, height) = (self.config.width(), self.config.height());
        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in std::mem::take(&mut self.pages) {
            let content = Content {
                operations: page.operations,
            };
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = self
                .document
                .add_object(lopdf::Stream::new(dictionary! {}, encoded));
            let page_id = self.document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id: ObjectId = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.compress();

        log::debug!("Saving PDF with {} pages", count);
        self.document
            .save_to(writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(self, path: P) -> Result<(), RenderError> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.save(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl Canvas for PdfCanvas {
    fn draw_text(&mut self, text: &str, at: Point) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        let x = self.absolute_x(at.x);
        let y = self.to_absolute_y(at.y);
        let (name, size) = (self.font.name.clone(), self.font.size);
        let key = self.font_key(&name);
        self.sync_fill_color();

        let operations = &mut self.ops().operations;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(key.into_bytes()), size.into()],
        ));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn draw_image(
        &mut self,
        name: &str,
        at: Point,
        placement: &ImagePlacement,
    ) -> Result<(), RenderError> {
        let key = self.image_key(name)?;
        let x = self.absolute_x(at.x);
        let y = self.to_absolute_y(at.y);

        let operations = &mut self.ops().operations;
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                placement.width.into(),
                0.into(),
                0.into(),
                placement.height.into(),
                x.into(),
                y.into(),
            ],
        ));
        operations.push(Operation::new("Do", vec![Object::Name(key.into_bytes())]));
        operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(PageContent::default());
        let top = self.config.margin_top();
        self.y = top;
        // Stretching frames restart at the top of the new page.
        for frame in self.frames.iter_mut().filter(|f| f.height.is_none()) {
            frame.top = top;
        }
        log::debug!("Started page {}", self.pages.len());
        Ok(())
    }

    fn fill_color(&self) -> Color {
        self.fill_color.clone()
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.fill_color = color.clone();
    }

    fn font(&self) -> ActiveFont {
        self.font.clone()
    }

    fn set_font(&mut self, font: &ActiveFont) -> Result<(), RenderError> {
        if font.name.is_empty() {
            return Err(RenderError::UnknownFont(font.family.clone()));
        }
        self.font = font.clone();
        Ok(())
    }

    fn fill_rectangle(
        &mut self,
        origin: Point,
        width: f32,
        height: f32,
    ) -> Result<(), RenderError> {
        let x = self.absolute_x(origin.x);
        let top = self.to_absolute_y(origin.y);
        self.sync_fill_color();

        let operations = &mut self.ops().operations;
        operations.push(Operation::new(
            "re",
            vec![x.into(), (top - height).into(), width.into(), height.into()],
        ));
        operations.push(Operation::new("f", vec![]));
        Ok(())
    }
}

impl Region for PdfCanvas {
    fn width(&self) -> f32 {
        self.current_frame().width
    }

    fn height(&self) -> Option<f32> {
        self.current_frame().height
    }

    fn cursor(&self) -> f32 {
        let frame = self.current_frame();
        match frame.height {
            Some(_) => self.y - self.absolute_bottom(),
            None => frame.top - self.y,
        }
    }

    fn top(&self) -> f32 {
        self.current_frame().height.unwrap_or(0.0)
    }

    fn absolute_bottom(&self) -> f32 {
        let frame = self.current_frame();
        match frame.height {
            Some(height) => frame.top - height,
            None => self.y,
        }
    }

    fn margin_absolute_bottom(&self) -> f32 {
        self.config.margins.bottom
    }

    fn to_absolute_y(&self, local_y: f32) -> f32 {
        let frame = self.current_frame();
        match frame.height {
            Some(height) => frame.top - height + local_y,
            None => frame.top - local_y,
        }
    }

    fn to_absolute_y_after_page_break(&self, local_y: f32) -> f32 {
        match self.current_frame().height {
            Some(_) => self.to_absolute_y(local_y),
            None => self.config.margin_top() - local_y,
        }
    }

    fn move_to_absolute_y(&mut self, y: f32) {
        self.y = y;
    }
}

/// The base fonts every PDF viewer provides without embedding.
const STANDARD_FONTS: [&str; 14] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Symbol",
    "ZapfDingbats",
];

pub(crate) fn is_standard_font(name: &str) -> bool {
    STANDARD_FONTS.contains(&name)
}

/// Encode text for a WinAnsi Type1 font. Characters outside the encoding
/// become `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) <= 0xff => c as u8,
            _ => b'?',
        })
        .collect()
}
