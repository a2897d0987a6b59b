use serde::Deserialize;

/// Named paper sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    #[default]
    Letter,
    Legal,
    Custom {
        width: f32,
        height: f32,
    },
}

impl PageSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(36.0)
    }
}

/// Page geometry shared by every page of a document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageConfig {
    pub fn width(&self) -> f32 {
        self.size.dimensions().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions().1
    }

    /// Absolute `y` of the margin box's top edge.
    pub fn margin_top(&self) -> f32 {
        self.height() - self.margins.top
    }

    pub fn content_width(&self) -> f32 {
        self.width() - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.height() - self.margins.top - self.margins.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_letter_with_half_inch_margins() {
        let config = PageConfig::default();
        assert_eq!(config.width(), 612.0);
        assert_eq!(config.margin_top(), 756.0);
        assert_eq!(config.content_width(), 540.0);
        assert_eq!(config.content_height(), 720.0);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: PageConfig = serde_json::from_str(r#"{"size": "a4"}"#).unwrap();
        assert_eq!(config.size, PageSize::A4);
        assert_eq!(config.margins, Margins::all(36.0));

        let custom: PageConfig = serde_json::from_str(
            r#"{"size": {"custom": {"width": 300, "height": 400}}, "margins": {"top": 10, "right": 10, "bottom": 20, "left": 10}}"#,
        )
        .unwrap();
        assert_eq!(custom.height(), 400.0);
        assert_eq!(custom.content_height(), 370.0);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<PageConfig, _> = serde_json::from_str(r#"{"paper": "a4"}"#);
        assert!(result.is_err());
    }
}
