use petty_traits::{FontError, RenderError};
use petty_types::FontStyle;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Unknown font: no face registered for family '{family}' in style '{style}'.")]
    UnknownFont { family: String, style: FontStyle },
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("Font error: {0}")]
    Font(FontError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<FontError> for FlowError {
    fn from(err: FontError) -> Self {
        match err {
            FontError::NotFound { family, style } => FlowError::UnknownFont { family, style },
            other => FlowError::Font(other),
        }
    }
}
