pub mod canvas;
pub mod font;
pub mod region;
pub mod resource;

pub use canvas::{ActiveFont, Canvas, ImagePlacement, RenderError};
pub use font::{FontError, FontHandle, FontProvider};
pub use region::Region;
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
