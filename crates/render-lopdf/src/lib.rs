//! PDF output for inline flows using lopdf.
//!
//! [`PdfCanvas`] implements both [`petty_traits::Canvas`] and
//! [`petty_traits::Region`], so a flow can be opened directly on it, on the
//! page margin box or inside a nested [`Frame`].

mod canvas;
mod config;
mod images;
mod resource;

pub use canvas::{Frame, FrameSpec, PdfCanvas};
pub use config::{Margins, PageConfig, PageSize};
pub use resource::DirectoryResourceProvider;
