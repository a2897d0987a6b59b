use crate::queue::{Event, FragmentQueue};
use crate::style::StyleRecord;
use petty_traits::{
    ActiveFont, Canvas, FontError, FontHandle, FontProvider, ImagePlacement, Region, RenderError,
};
use petty_types::{Color, FontStyle, Point};

/// Font metrics with round numbers: every glyph advances `size * factor`,
/// lines are `1.2 * size` tall and the ascent is `0.8 * size`.
#[derive(Debug)]
pub struct FakeFonts {
    faces: Vec<(&'static str, FontStyle, f32)>,
}

impl FakeFonts {
    pub fn new() -> Self {
        Self {
            faces: vec![
                ("Helvetica", FontStyle::Normal, 0.5),
                ("Helvetica", FontStyle::Bold, 0.55),
                ("Helvetica", FontStyle::Italic, 0.5),
                ("Courier", FontStyle::Normal, 0.6),
            ],
        }
    }

    fn face(&self, handle: FontHandle) -> Result<&(&'static str, FontStyle, f32), FontError> {
        self.faces
            .get(handle.0 as usize)
            .ok_or(FontError::InvalidHandle(handle))
    }
}

impl FontProvider for FakeFonts {
    fn resolve_font_handle(&self, family: &str, style: FontStyle) -> Result<FontHandle, FontError> {
        self.faces
            .iter()
            .position(|(name, face_style, _)| *name == family && *face_style == style)
            .map(|index| FontHandle(index as u32))
            .ok_or_else(|| FontError::NotFound {
                family: family.to_string(),
                style,
            })
    }

    fn font_name(&self, handle: FontHandle) -> Result<String, FontError> {
        let (family, style, _) = self.face(handle)?;
        let suffix = match style {
            FontStyle::Normal => return Ok(family.to_string()),
            FontStyle::Bold => "Bold",
            FontStyle::Italic => "Oblique",
            FontStyle::BoldItalic => "BoldOblique",
        };
        Ok(format!("{}-{}", family, suffix))
    }

    fn advance_width(&self, handle: FontHandle, text: &str, size: f32) -> Result<f32, FontError> {
        let (_, _, factor) = self.face(handle)?;
        Ok(text.chars().count() as f32 * size * factor)
    }

    fn line_height(&self, handle: FontHandle, size: f32) -> Result<f32, FontError> {
        self.face(handle)?;
        Ok(size * 1.2)
    }

    fn ascent(&self, handle: FontHandle, size: f32) -> Result<f32, FontError> {
        self.face(handle)?;
        Ok(size * 0.8)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Text { text: String, at: Point },
    Image { name: String, at: Point, placement: ImagePlacement },
    NewPage,
    SetColor(Color),
    SetFont(ActiveFont),
    FillRect { origin: Point, width: f32, height: f32 },
}

/// A canvas and region that records every call.
///
/// Fixed-height canvases sit on the margin box bottom at y=36; stretchy ones
/// hang from an absolute top of 756 and measure y downward. A new page moves
/// stretchy canvases up to `page_top`.
#[derive(Debug)]
pub struct TestCanvas {
    pub ops: Vec<CanvasOp>,
    pub fill: Color,
    pub font: ActiveFont,
    pub width: f32,
    pub height: Option<f32>,
    pub cursor: f32,
    pub absolute_top: f32,
    pub page_top: f32,
    pub margin_bottom: f32,
    pub final_y: Option<f32>,
    pub missing_images: bool,
}

impl TestCanvas {
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            ops: Vec::new(),
            fill: Color::default(),
            font: ActiveFont {
                family: "Helvetica".to_string(),
                name: "Helvetica".to_string(),
                size: 10.0,
            },
            width,
            height: Some(height),
            cursor: height,
            absolute_top: 36.0 + height,
            page_top: 756.0,
            margin_bottom: 36.0,
            final_y: None,
            missing_images: false,
        }
    }

    pub fn stretchy(width: f32) -> Self {
        Self {
            height: None,
            cursor: 0.0,
            absolute_top: 756.0,
            ..Self::fixed(width, 0.0)
        }
    }

    pub fn texts(&self) -> Vec<(String, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text { text, at } => Some((text.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&CanvasOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl Canvas for TestCanvas {
    fn draw_text(&mut self, text: &str, at: Point) -> Result<(), RenderError> {
        self.ops.push(CanvasOp::Text {
            text: text.to_string(),
            at,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        name: &str,
        at: Point,
        placement: &ImagePlacement,
    ) -> Result<(), RenderError> {
        if self.missing_images {
            return Err(RenderError::ImageNotFound(name.to_string()));
        }
        self.ops.push(CanvasOp::Image {
            name: name.to_string(),
            at,
            placement: *placement,
        });
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), RenderError> {
        self.ops.push(CanvasOp::NewPage);
        if self.height.is_none() {
            self.absolute_top = self.page_top;
        }
        Ok(())
    }

    fn fill_color(&self) -> Color {
        self.fill.clone()
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.fill = color.clone();
        self.ops.push(CanvasOp::SetColor(color.clone()));
    }

    fn font(&self) -> ActiveFont {
        self.font.clone()
    }

    fn set_font(&mut self, font: &ActiveFont) -> Result<(), RenderError> {
        self.font = font.clone();
        self.ops.push(CanvasOp::SetFont(font.clone()));
        Ok(())
    }

    fn fill_rectangle(
        &mut self,
        origin: Point,
        width: f32,
        height: f32,
    ) -> Result<(), RenderError> {
        self.ops.push(CanvasOp::FillRect {
            origin,
            width,
            height,
        });
        Ok(())
    }
}

impl Region for TestCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> Option<f32> {
        self.height
    }

    fn cursor(&self) -> f32 {
        self.cursor
    }

    fn top(&self) -> f32 {
        self.height.unwrap_or(0.0)
    }

    fn absolute_bottom(&self) -> f32 {
        match self.height {
            Some(height) => self.absolute_top - height,
            None => self.absolute_top,
        }
    }

    fn margin_absolute_bottom(&self) -> f32 {
        self.margin_bottom
    }

    fn to_absolute_y(&self, local_y: f32) -> f32 {
        match self.height {
            Some(_) => self.absolute_bottom() + local_y,
            None => self.absolute_top - local_y,
        }
    }

    fn to_absolute_y_after_page_break(&self, local_y: f32) -> f32 {
        match self.height {
            Some(_) => self.to_absolute_y(local_y),
            None => self.page_top - local_y,
        }
    }

    fn move_to_absolute_y(&mut self, y: f32) {
        self.final_y = Some(y);
    }
}

pub fn style(fonts: &FakeFonts, family: &str, style: FontStyle, size: f32) -> StyleRecord {
    let font = fonts.resolve_font_handle(family, style).unwrap();
    StyleRecord {
        font,
        font_name: fonts.font_name(font).unwrap(),
        family: family.to_string(),
        style,
        size,
        color: Color::default(),
        line_height: fonts.line_height(font, size).unwrap(),
        ascent: fonts.ascent(font, size).unwrap(),
    }
}

/// Concatenated text of every line, in order, skipping the preamble before
/// the first newline marker.
pub fn line_texts(queue: &FragmentQueue) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for event in queue.events() {
        match event {
            Event::Newline => lines.push(String::new()),
            Event::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            _ => {}
        }
    }
    lines.retain(|line| !line.is_empty());
    lines
}

pub fn count_events(queue: &FragmentQueue, predicate: impl Fn(&Event) -> bool) -> usize {
    queue.events().iter().filter(|event| predicate(event)).count()
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {}, got {}",
        expected,
        actual
    );
}
