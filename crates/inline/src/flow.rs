//! The flow coordinator.
//!
//! A [`Flow`] owns the layout cursor while it is open. Text, images and cursor
//! moves become events in a [`FragmentQueue`]; line ends patch the vertical
//! position of the finished line once its tallest fragment is known, and page
//! breaks are queued for the canvas to perform during the single flush on
//! close.
//!
//! ```ignore
//! chunk_flow(&mut doc, fonts.as_ref(), &FlowOptions::new().size(12.0), |flow| {
//!     flow.chunk("one two three ", &ChunkOptions::new().font_family("Courier"))?;
//!     flow.chunk("superscript", &ChunkOptions::new())?;
//!     flow.move_up(4.0);
//!     flow.chunk("TM", &ChunkOptions::new().size(8.0))?;
//!     flow.move_down(4.0);
//!     Ok(())
//! })?;
//! ```

use crate::FlowError;
use crate::options::{ChunkOptions, FlowOptions};
use crate::queue::FragmentQueue;
use crate::style;
use petty_traits::{ActiveFont, Canvas, FontProvider, ImagePlacement, Region};
use petty_types::{Color, Point};

/// Cursor and margins of an open flow, in region-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub x: f32,
    /// Top of the line being built.
    pub y: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    /// `1.0` when local `y` grows upward (fixed-height regions), `-1.0` when
    /// it grows downward (regions still stretching to fit).
    pub direction: f32,
    pub origin: Point,
}

/// The part of the flow laid out on one page, for background fills.
#[derive(Debug, Clone, Copy)]
struct PageSegment {
    /// Queue index the segment's fill is inserted at.
    start: usize,
    top: f32,
}

/// Renderer state captured on open and put back on close.
#[derive(Debug, Clone)]
struct SavedState {
    color: Color,
    font: ActiveFont,
}

pub struct Flow<'a, D: Canvas + Region + ?Sized> {
    doc: &'a mut D,
    fonts: &'a dyn FontProvider,
    queue: FragmentQueue,
    state: FlowState,
    saved: SavedState,
    background: Option<Color>,
    segment: PageSegment,
    /// Set once a page break is queued. The region only moves to the new
    /// page when the queue replays, so until then later positions are
    /// measured against where it will be.
    page_broken: bool,
    closed: bool,
}

/// Open a flow, run `body` against it and close it.
///
/// If `body` fails, the queued content is discarded and the renderer's
/// color and font are restored before the error is returned.
pub fn chunk_flow<D, T, F>(
    doc: &mut D,
    fonts: &dyn FontProvider,
    options: &FlowOptions,
    body: F,
) -> Result<T, FlowError>
where
    D: Canvas + Region + ?Sized,
    F: FnOnce(&mut Flow<'_, D>) -> Result<T, FlowError>,
{
    let mut flow = Flow::open(doc, fonts, options)?;
    let value = body(&mut flow)?;
    flow.close()?;
    Ok(value)
}

impl<'a, D: Canvas + Region + ?Sized> Flow<'a, D> {
    pub fn open(
        doc: &'a mut D,
        fonts: &'a dyn FontProvider,
        options: &FlowOptions,
    ) -> Result<Self, FlowError> {
        let saved = SavedState {
            color: doc.fill_color(),
            font: doc.font(),
        };
        let default_style =
            style::resolve_default(&options.style_request(), &saved.font, &saved.color, fonts)?;

        let direction = if doc.height().is_some() { 1.0 } else { -1.0 };
        let y = doc.cursor();
        let state = FlowState {
            x: 0.0,
            y,
            left_margin: 0.0,
            right_margin: doc.width(),
            direction,
            origin: Point::new(0.0, y),
        };
        log::debug!(
            "Opening flow at y={:.2} (width {:.2}, direction {}) with {} {}pt",
            y,
            state.right_margin,
            direction,
            default_style.font_name,
            default_style.size
        );

        let mut queue = FragmentQueue::with_default_style(default_style);
        queue.mark_newline();

        let mut flow = Self {
            doc,
            fonts,
            queue,
            state,
            saved,
            background: options.background_color.clone(),
            // Right after the seeding style.
            segment: PageSegment { start: 1, top: y },
            page_broken: false,
            closed: false,
        };
        flow.check_page_break();
        Ok(flow)
    }

    /// Lay out `text` with greedy word wrapping.
    ///
    /// Words are split on whitespace and never broken; a word that does not
    /// fit is moved to the next line unless it would be the first thing on
    /// its line. Embedded `\n` characters force line breaks.
    pub fn chunk(&mut self, text: &str, options: &ChunkOptions) -> Result<(), FlowError> {
        let request = options.style_request();
        if !request.is_empty() {
            let candidate = style::resolve(&request, self.queue.default_style(), self.fonts)?;
            self.queue.push_style_if_changed(candidate);
        }
        self.queue.set_x(self.state.x);

        let active = self.queue.current_style().clone();
        let word_space = active.space_width(self.fonts)?;
        // Every `\n` ends a line, so a trailing one leaves the cursor at the
        // start of the next line and `\n\n` yields an empty line.
        let lines: Vec<&str> = text.split('\n').collect();
        let mut first_word = true;

        for (i, line) in lines.iter().enumerate() {
            for word in split_words(line) {
                let width = active.width_of(word, self.fonts)?;
                let overflows = self.state.x + width > self.state.right_margin;
                if overflows && self.state.x > self.state.left_margin {
                    self.new_line();
                    self.queue.append_text(word);
                } else if options.no_space || first_word {
                    self.queue.append_text(word);
                } else {
                    self.queue.append_text(&format!(" {}", word));
                }
                first_word = false;

                self.state.x += width;
                if !options.no_space {
                    self.state.x += word_space;
                }
            }
            if i + 1 < lines.len() {
                self.new_line();
                first_word = true;
            }
        }

        self.queue.reset_to_default_if_changed();
        Ok(())
    }

    /// Queue an image at the cursor and advance past its width.
    pub fn image(&mut self, name: &str, placement: ImagePlacement) {
        self.queue.set_x(self.state.x);
        self.queue.append_image(name, placement);
        self.state.x += placement.width;
    }

    pub fn move_left(&mut self, dx: f32) {
        self.state.x = (self.state.x - dx).max(0.0);
        self.queue.move_x(-dx);
    }

    pub fn move_right(&mut self, dx: f32) {
        self.state.x += dx;
        self.queue.move_x(dx);
    }

    pub fn move_up(&mut self, dy: f32) {
        let delta = dy * self.state.direction;
        self.state.y += delta;
        self.queue.move_y(delta);
    }

    pub fn move_down(&mut self, dy: f32) {
        let delta = dy * self.state.direction;
        self.state.y -= delta;
        self.queue.move_y(-delta);
    }

    pub fn left_margin(&self) -> f32 {
        self.state.left_margin
    }

    /// Set the left margin, pushing the cursor right if it is now inside it.
    pub fn set_left_margin(&mut self, margin: f32) {
        if margin > self.state.x {
            self.state.x = margin;
        }
        self.state.left_margin = margin;
    }

    pub fn right_margin(&self) -> f32 {
        self.state.right_margin
    }

    pub fn set_right_margin(&mut self, margin: f32) {
        self.state.right_margin = margin;
    }

    /// End the current line.
    ///
    /// The line's height is only known now, so the move to its baseline is
    /// inserted retroactively at its first event.
    pub fn new_line(&mut self) {
        let (ascent, height) = self.queue.current_line_ascent_and_height();
        let direction = self.state.direction;
        self.queue.insert_move_y_at_line_start(-ascent * direction);

        self.state.x = self.state.left_margin;
        self.state.y -= height * direction;
        let page_broken = self.check_page_break();

        self.queue.mark_newline();
        // After a page break the replay cursor was re-seated at the new top.
        if !page_broken {
            self.queue.move_y((ascent - height) * direction);
        }
        self.queue.set_x(self.state.left_margin);
    }

    fn check_page_break(&mut self) -> bool {
        let absolute = self.absolute_y(self.state.y);
        let limit = self.doc.margin_absolute_bottom();
        if absolute >= limit {
            return false;
        }

        log::debug!(
            "Flow reached y={:.2}, below the margin box bottom {:.2}; queueing a page break",
            absolute,
            limit
        );
        self.end_page_segment();
        self.queue.mark_new_page();
        self.page_broken = true;
        self.state.y = self.doc.top();
        self.queue.set_x(self.state.left_margin);
        self.queue.set_y(self.state.y);
        self.segment = PageSegment {
            start: self.queue.len(),
            top: self.state.y,
        };
        true
    }

    fn absolute_y(&self, local_y: f32) -> f32 {
        if self.page_broken {
            self.doc.to_absolute_y_after_page_break(local_y)
        } else {
            self.doc.to_absolute_y(local_y)
        }
    }

    /// Queue the background of the current page's part of the flow.
    fn end_page_segment(&mut self) {
        let Some(color) = self.background.clone() else {
            return;
        };
        let height = (self.segment.top - self.state.y) * self.state.direction;
        if height <= 0.0 {
            return;
        }
        let origin = Point::new(0.0, self.segment.top);
        let width = self.doc.width();
        self.queue
            .insert_fill(self.segment.start, color, origin, width, height);
    }

    pub fn x(&self) -> f32 {
        self.state.x
    }

    pub fn y(&self) -> f32 {
        self.state.y
    }

    pub fn direction(&self) -> f32 {
        self.state.direction
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn queue(&self) -> &FragmentQueue {
        &self.queue
    }

    /// Finish the flow: end any open line, queue the background of the last
    /// page, replay the queue and hand the vertical position back to the
    /// document.
    pub fn close(mut self) -> Result<(), FlowError> {
        let flushed = self.finish();
        let restored = self.restore_renderer_state();
        self.closed = true;
        flushed?;
        restored?;

        let absolute = self.doc.to_absolute_y(self.state.y);
        self.doc.move_to_absolute_y(absolute);
        log::debug!("Closed flow at y={:.2}", self.state.y);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FlowError> {
        if self.queue.current_line_has_content() {
            self.new_line();
        }
        self.end_page_segment();
        let start = Point::new(self.state.left_margin, self.state.origin.y);
        self.queue.flush(&mut *self.doc, start)
    }

    fn restore_renderer_state(&mut self) -> Result<(), FlowError> {
        self.doc.set_fill_color(&self.saved.color);
        self.doc.set_font(&self.saved.font)?;
        Ok(())
    }
}

impl<D: Canvas + Region + ?Sized> Drop for Flow<'_, D> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        log::warn!(
            "Flow dropped without closing; discarding {} queued events",
            self.queue.len()
        );
        if let Err(e) = self.restore_renderer_state() {
            log::warn!("Failed to restore renderer state: {}", e);
        }
    }
}

/// Split a line on single whitespace characters.
///
/// Runs of whitespace yield empty words in between, which still earn their
/// spacing; trailing empty words are dropped.
fn split_words(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = line.split(char::is_whitespace).collect();
    while words.last().is_some_and(|word| word.is_empty()) {
        words.pop();
    }
    words
}
