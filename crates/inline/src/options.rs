//! Sparse style options accepted when opening a flow and emitting chunks.
//!
//! Option maps coming from data files are deserialized with
//! `deny_unknown_fields`, so a misspelled key fails at the call that received
//! it instead of being silently ignored.

use crate::FlowError;
use petty_types::{Color, FontStyle};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The inheritable subset of options: anything left `None` falls back to the
/// flow's default style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRequest {
    pub font_family: Option<String>,
    pub style: Option<FontStyle>,
    pub size: Option<f32>,
    pub color: Option<Color>,
}

impl StyleRequest {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.style.is_none()
            && self.size.is_none()
            && self.color.is_none()
    }
}

/// Options for a single `chunk` of text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkOptions {
    pub font_family: Option<String>,
    pub style: Option<FontStyle>,
    pub size: Option<f32>,
    pub color: Option<Color>,
    /// Do not put spaces between words.
    #[serde(default)]
    pub no_space: bool,
}

impl ChunkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn no_space(mut self, no_space: bool) -> Self {
        self.no_space = no_space;
        self
    }

    pub fn style_request(&self) -> StyleRequest {
        StyleRequest {
            font_family: self.font_family.clone(),
            style: self.style,
            size: self.size,
            color: self.color.clone(),
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, FlowError> {
        parse_options(value)
    }
}

/// Options for a whole flow. They become the default style of every chunk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowOptions {
    pub font_family: Option<String>,
    pub style: Option<FontStyle>,
    pub size: Option<f32>,
    pub color: Option<Color>,
    /// Fill color painted behind the whole flow.
    pub background_color: Option<Color>,
}

impl FlowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn style_request(&self) -> StyleRequest {
        StyleRequest {
            font_family: self.font_family.clone(),
            style: self.style,
            size: self.size,
            color: self.color.clone(),
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, FlowError> {
        parse_options(value)
    }
}

fn parse_options<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, FlowError> {
    serde_json::from_value(value).map_err(|e| FlowError::InvalidOption(e.to_string()))
}
