//! The deferred fragment queue.
//!
//! A flow cannot draw a line until it has seen every fragment on it, because
//! the tallest fragment decides where the baseline goes. Instead of drawing,
//! the flow records layout events here. When a line ends, a corrective
//! `MoveY` is inserted at the start of that line, and the whole queue is
//! replayed against a [`Canvas`] exactly once when the flow closes.

use crate::FlowError;
use crate::style::StyleRecord;
use petty_traits::{Canvas, ImagePlacement};
use petty_types::{Color, Point};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OptionChange(Arc<StyleRecord>),
    SetX(f32),
    SetY(f32),
    MoveX(f32),
    MoveY(f32),
    Text(String),
    Image {
        name: String,
        placement: ImagePlacement,
    },
    /// Background rectangle, `origin` being its top-left corner.
    Fill {
        color: Color,
        origin: Point,
        width: f32,
        height: f32,
    },
    Newline,
    NewPage,
}

impl Event {
    fn action(&self) -> &'static str {
        match self {
            Event::OptionChange(_) => "options",
            Event::SetX(_) => "set_x",
            Event::SetY(_) => "set_y",
            Event::MoveX(_) => "move_x",
            Event::MoveY(_) => "move_y",
            Event::Text(_) => "text",
            Event::Image { .. } => "image",
            Event::Fill { .. } => "fill",
            Event::Newline => "newline",
            Event::NewPage => "new_page",
        }
    }

    fn is_content(&self) -> bool {
        matches!(self, Event::Text(_) | Event::Image { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action())?;
        match self {
            Event::OptionChange(style) => write!(
                f,
                "\t{} {} {}pt {} (height {:.2}, ascent {:.2})",
                style.font_name,
                style.style,
                style.size,
                style.color,
                style.line_height,
                style.ascent
            ),
            Event::SetX(v) | Event::SetY(v) | Event::MoveX(v) | Event::MoveY(v) => {
                write!(f, "\t{:.2}", v)
            }
            Event::Text(text) => write!(f, "\t{:?}", text),
            Event::Image { name, placement } => {
                write!(f, "\t{} {}x{}", name, placement.width, placement.height)
            }
            Event::Fill {
                color,
                origin,
                width,
                height,
            } => write!(
                f,
                "\t{} ({:.2}, {:.2}) {:.2}x{:.2}",
                color, origin.x, origin.y, width, height
            ),
            Event::Newline | Event::NewPage => Ok(()),
        }
    }
}

/// Ordered log of layout events for one flow.
#[derive(Debug, Clone)]
pub struct FragmentQueue {
    events: Vec<Event>,
    default_style: Arc<StyleRecord>,
}

impl FragmentQueue {
    /// Seeds a queue with the flow's default style as its first event.
    pub fn with_default_style(style: StyleRecord) -> Self {
        let default_style = Arc::new(style);
        Self {
            events: vec![Event::OptionChange(default_style.clone())],
            default_style,
        }
    }

    pub fn default_style(&self) -> &StyleRecord {
        &self.default_style
    }

    /// The style in effect at the tail of the queue.
    pub fn current_style(&self) -> &StyleRecord {
        self.style_before(self.events.len())
    }

    /// Make `candidate` the active style unless it already is.
    ///
    /// A style change immediately following another one replaces it, so a
    /// run of restyles with no content in between leaves a single event.
    pub fn push_style_if_changed(&mut self, candidate: StyleRecord) {
        if *self.current_style() == candidate {
            return;
        }
        self.push_style(Arc::new(candidate));
    }

    pub fn reset_to_default_if_changed(&mut self) {
        if *self.current_style() == *self.default_style {
            return;
        }
        self.push_style(self.default_style.clone());
    }

    fn push_style(&mut self, style: Arc<StyleRecord>) {
        // The seeding event stays so a replay always starts with a style.
        if self.events.len() > 1 && matches!(self.events.last(), Some(Event::OptionChange(_))) {
            self.events.pop();
        }
        if *self.current_style() != *style {
            self.events.push(Event::OptionChange(style));
        }
    }

    /// Append text, merging it into the tail event when that is also text.
    pub fn append_text(&mut self, text: &str) {
        if let Some(Event::Text(tail)) = self.events.last_mut() {
            tail.push_str(text);
        } else {
            self.events.push(Event::Text(text.to_string()));
        }
    }

    pub fn set_x(&mut self, x: f32) {
        self.events.push(Event::SetX(x));
    }

    pub fn set_y(&mut self, y: f32) {
        self.events.push(Event::SetY(y));
    }

    pub fn move_x(&mut self, dx: f32) {
        self.events.push(Event::MoveX(dx));
    }

    pub fn move_y(&mut self, dy: f32) {
        self.events.push(Event::MoveY(dy));
    }

    pub fn append_image(&mut self, name: impl Into<String>, placement: ImagePlacement) {
        self.events.push(Event::Image {
            name: name.into(),
            placement,
        });
    }

    /// Insert a background fill at `index`, so it replays on the page that
    /// was current there and before anything drawn after it.
    pub fn insert_fill(
        &mut self,
        index: usize,
        color: Color,
        origin: Point,
        width: f32,
        height: f32,
    ) {
        let index = index.min(self.events.len());
        self.events.insert(
            index,
            Event::Fill {
                color,
                origin,
                width,
                height,
            },
        );
    }

    pub fn mark_newline(&mut self) {
        self.events.push(Event::Newline);
    }

    pub fn mark_new_page(&mut self) {
        self.events.push(Event::NewPage);
    }

    /// Index of the first event of the current line.
    fn line_start(&self) -> usize {
        self.events
            .iter()
            .rposition(|event| matches!(event, Event::Newline))
            .map_or(0, |index| index + 1)
    }

    /// Insert a vertical move before every event of the current line.
    pub fn insert_move_y_at_line_start(&mut self, dy: f32) {
        let index = self.line_start();
        self.events.insert(index, Event::MoveY(dy));
    }

    /// Largest ascent and line height among the styles used on the current
    /// line, or the active style's metrics when the line never changed style.
    ///
    /// A style carried over from an earlier line counts too when content was
    /// queued before the line's first style change, as happens when a long
    /// chunk wraps.
    pub fn current_line_ascent_and_height(&self) -> (f32, f32) {
        let start = self.line_start();
        let line = &self.events[start..];
        let mut metrics: Option<(f32, f32)> = None;
        let mut include = |style: &StyleRecord| {
            let (ascent, height) = metrics.unwrap_or((0.0, 0.0));
            metrics = Some((ascent.max(style.ascent), height.max(style.line_height)));
        };

        let carried_is_used = line
            .iter()
            .take_while(|event| !matches!(event, Event::OptionChange(_)))
            .any(Event::is_content);
        if carried_is_used {
            include(self.style_before(start));
        }
        for event in line {
            if let Event::OptionChange(style) = event {
                include(style.as_ref());
            }
        }

        metrics.unwrap_or_else(|| {
            let style = self.current_style();
            (style.ascent, style.line_height)
        })
    }

    fn style_before(&self, index: usize) -> &StyleRecord {
        self.events[..index]
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::OptionChange(style) => Some(style.as_ref()),
                _ => None,
            })
            .unwrap_or(&self.default_style)
    }

    /// Whether any text or image has been queued since the last line break.
    pub fn current_line_has_content(&self) -> bool {
        self.events[self.line_start()..].iter().any(Event::is_content)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Tab-separated listing of the queue, one event per line.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Replay every queued event against `canvas`, then clear the queue.
    ///
    /// `start` seeds the replay cursor. Flushing an already flushed queue
    /// draws nothing.
    pub fn flush<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        start: Point,
    ) -> Result<(), FlowError> {
        if self.events.is_empty() {
            return Ok(());
        }
        log::trace!("Flushing {} queued events:\n{}", self.events.len(), self);
        debug_assert!(
            matches!(self.events.first(), Some(Event::OptionChange(_))),
            "a flow queue must start with its default style"
        );

        let mut cursor = start;
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::OptionChange(style) => {
                    canvas.set_fill_color(&style.color);
                    canvas.set_font(&style.active_font())?;
                }
                Event::SetX(x) => cursor.x = x,
                Event::SetY(y) => cursor.y = y,
                Event::MoveX(dx) => cursor.x += dx,
                Event::MoveY(dy) => cursor.y += dy,
                Event::Text(text) => canvas.draw_text(&text, cursor)?,
                Event::Image { name, placement } => canvas.draw_image(&name, cursor, &placement)?,
                Event::Fill {
                    color,
                    origin,
                    width,
                    height,
                } => {
                    let previous = canvas.fill_color();
                    canvas.set_fill_color(&color);
                    let filled = canvas.fill_rectangle(origin, width, height);
                    canvas.set_fill_color(&previous);
                    filled?;
                }
                Event::Newline => {}
                Event::NewPage => canvas.start_new_page()?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for FragmentQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}
