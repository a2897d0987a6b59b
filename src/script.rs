//! JSON flow scripts.
//!
//! A script is a page configuration and a list of blocks rendered top to
//! bottom. Plain `text` blocks and `flow` blocks both run as inline flows; a
//! flow block may be placed in a nested frame and carries its own list of
//! operations.
//!
//! ```json
//! {
//!   "page": { "size": "letter" },
//!   "blocks": [
//!     { "type": "text", "text": "above the flow" },
//!     { "type": "space", "points": 20 },
//!     { "type": "flow", "frame": { "width": 200 }, "ops": [
//!       { "op": "text", "text": "line one", "options": { "size": 20 } },
//!       { "op": "new_line" },
//!       { "op": "image", "name": "box.png", "width": 12, "height": 12 }
//!     ]}
//!   ]
//! }
//! ```

use crate::FlowAppError;
use petty_inline::{ChunkOptions, Flow, FlowError, FlowOptions, chunk_flow};
use petty_render_lopdf::{FrameSpec, PageConfig, PdfCanvas};
use petty_traits::{Canvas, FontProvider, ImagePlacement, Region, ResourceProvider};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Block {
    /// A paragraph laid out as a single-chunk flow.
    Text {
        text: String,
        #[serde(default)]
        options: FlowOptions,
    },
    /// Vertical gap before the next block.
    Space { points: f32 },
    Flow {
        frame: Option<FrameSpec>,
        #[serde(default)]
        options: FlowOptions,
        ops: Vec<FlowOp>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum FlowOp {
    Text {
        text: String,
        #[serde(default)]
        options: ChunkOptions,
    },
    Image {
        name: String,
        width: f32,
        height: f32,
    },
    NewLine,
    MoveLeft { by: f32 },
    MoveRight { by: f32 },
    MoveUp { by: f32 },
    MoveDown { by: f32 },
    LeftMargin { value: f32 },
    RightMargin { value: f32 },
}

impl FlowOp {
    pub fn apply<D: Canvas + Region + ?Sized>(&self, flow: &mut Flow<'_, D>) -> Result<(), FlowError> {
        match self {
            FlowOp::Text { text, options } => flow.chunk(text, options)?,
            FlowOp::Image {
                name,
                width,
                height,
            } => flow.image(name, ImagePlacement::new(*width, *height)),
            FlowOp::NewLine => flow.new_line(),
            FlowOp::MoveLeft { by } => flow.move_left(*by),
            FlowOp::MoveRight { by } => flow.move_right(*by),
            FlowOp::MoveUp { by } => flow.move_up(*by),
            FlowOp::MoveDown { by } => flow.move_down(*by),
            FlowOp::LeftMargin { value } => flow.set_left_margin(*value),
            FlowOp::RightMargin { value } => flow.set_right_margin(*value),
        }
        Ok(())
    }
}

impl Script {
    pub fn from_json_str(source: &str) -> Result<Self, FlowAppError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FlowAppError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Lay out every block onto a fresh canvas.
    pub fn render(
        &self,
        fonts: &dyn FontProvider,
        resources: Arc<dyn ResourceProvider>,
    ) -> Result<PdfCanvas, FlowAppError> {
        let mut canvas = PdfCanvas::new(self.page).with_resources(resources);
        for (index, block) in self.blocks.iter().enumerate() {
            log::debug!("Rendering block {}", index);
            render_block(&mut canvas, fonts, block)?;
        }
        Ok(canvas)
    }
}

fn render_block(
    canvas: &mut PdfCanvas,
    fonts: &dyn FontProvider,
    block: &Block,
) -> Result<(), FlowAppError> {
    match block {
        Block::Text { text, options } => {
            chunk_flow(canvas, fonts, options, |flow| {
                flow.chunk(text, &ChunkOptions::new())
            })?;
        }
        Block::Space { points } => canvas.move_down(*points),
        Block::Flow {
            frame: Some(spec),
            options,
            ops,
        } => {
            canvas.bounding_box(*spec, |doc| run_ops(doc, fonts, options, ops))?;
        }
        Block::Flow {
            frame: None,
            options,
            ops,
        } => run_ops(canvas, fonts, options, ops)?,
    }
    Ok(())
}

fn run_ops<D: Canvas + Region + ?Sized>(
    doc: &mut D,
    fonts: &dyn FontProvider,
    options: &FlowOptions,
    ops: &[FlowOp],
) -> Result<(), FlowError> {
    chunk_flow(doc, fonts, options, |flow| {
        ops.iter().try_for_each(|op| op.apply(flow))
    })
}
