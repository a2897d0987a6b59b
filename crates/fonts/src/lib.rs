//! Fonts for inline flows.
//!
//! [`FontLibrary`] implements [`petty_traits::FontProvider`] over two kinds of
//! face: the built-in PDF base fonts (Helvetica and Courier, measured with
//! their published AFM widths) and TrueType/OpenType faces parsed with
//! `ttf-parser`.

mod builtin;
mod library;
mod truetype;

pub use self::builtin::BuiltinFace;
pub use self::library::{FontFace, FontLibrary};
pub use self::truetype::TrueTypeFace;
