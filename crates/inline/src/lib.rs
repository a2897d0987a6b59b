//! Inline "chunk flow" layout.
//!
//! Callers emit text fragments, inline images, line breaks and cursor nudges
//! into a [`Flow`]. The flow word-wraps against a movable right margin,
//! sizes every line by its tallest fragment and defers all drawing to a
//! single replay of its [`FragmentQueue`] when it closes.
//!
//! Rendering, font metrics and region geometry are injected through the
//! `petty-traits` contracts, so the core has no dependency on a particular
//! PDF backend.

mod error;
pub mod flow;
pub mod options;
pub mod queue;
pub mod style;

pub use self::error::FlowError;
pub use self::flow::{Flow, FlowState, chunk_flow};
pub use self::options::{ChunkOptions, FlowOptions, StyleRequest};
pub use self::queue::{Event, FragmentQueue};
pub use self::style::StyleRecord;

#[cfg(test)]
mod test_utils;
