pub mod color;
pub mod font;
pub mod geometry;

pub use color::Color;
pub use font::FontStyle;
pub use geometry::Point;
