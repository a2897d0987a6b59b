//! Inline chunk flows rendered to PDF.
//!
//! This crate ties the workspace together: the flow core from
//! `petty-inline`, fonts from `petty-fonts` and the `lopdf` canvas from
//! `petty-render-lopdf`, plus the JSON [`script`] format read by the
//! `petty-flow` binary.
//!
//! ```no_run
//! use petty_flow::{ChunkOptions, FlowOptions, FontLibrary, PageConfig, PdfCanvas, chunk_flow};
//!
//! # fn main() -> Result<(), petty_flow::FlowAppError> {
//! let fonts = FontLibrary::with_standard_fonts();
//! let mut pdf = PdfCanvas::new(PageConfig::default());
//! chunk_flow(&mut pdf, &fonts, &FlowOptions::new().size(12.0), |flow| {
//!     flow.chunk("one two three", &ChunkOptions::new().font_family("Courier"))?;
//!     flow.move_up(4.0);
//!     flow.chunk("TM", &ChunkOptions::new().size(8.0))?;
//!     flow.move_down(4.0);
//!     Ok(())
//! })?;
//! pdf.save_to_file("flow.pdf")?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod script;

pub use error::FlowAppError;
pub use petty_fonts::FontLibrary;
pub use petty_inline::{
    ChunkOptions, Event, Flow, FlowError, FlowOptions, FlowState, FragmentQueue, StyleRecord,
    StyleRequest, chunk_flow,
};
pub use petty_render_lopdf::{
    DirectoryResourceProvider, Frame, FrameSpec, Margins, PageConfig, PageSize, PdfCanvas,
};
pub use petty_traits::{
    ActiveFont, Canvas, FontError, FontHandle, FontProvider, ImagePlacement,
    InMemoryResourceProvider, Region, RenderError, ResourceError, ResourceProvider,
};
pub use petty_types::{Color, FontStyle, Point};
pub use script::{Block, FlowOp, Script};
