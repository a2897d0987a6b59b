use petty_inline::FlowError;
use petty_traits::{FontError, RenderError};
use thiserror::Error;

/// Errors surfaced while loading and rendering a flow script.
#[derive(Error, Debug)]
pub enum FlowAppError {
    #[error("Layout failed: {0}")]
    Flow(#[from] FlowError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Font loading failed: {0}")]
    Font(#[from] FontError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}
