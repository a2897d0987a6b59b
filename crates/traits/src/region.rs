//! Geometry of the area a flow lays out into.

/// The active bounding region of a document.
///
/// Local coordinates have `x` growing rightward from the region's left edge.
/// Regions with a fixed height put the local origin at their bottom-left
/// corner with `y` growing upward. Regions without a height have not found
/// their bottom edge yet, so they measure `y` downward from their top edge
/// and override [`Region::to_absolute_y`] accordingly.
pub trait Region {
    fn width(&self) -> f32;

    /// `None` while the region is still stretching to fit its content.
    fn height(&self) -> Option<f32>;

    /// Current vertical position in local coordinates.
    fn cursor(&self) -> f32;

    /// Local `y` of the region's top edge.
    fn top(&self) -> f32;

    /// Absolute `y` of the region's bottom edge.
    fn absolute_bottom(&self) -> f32;

    /// Absolute `y` of the page margin box's bottom edge.
    fn margin_absolute_bottom(&self) -> f32;

    fn to_absolute_y(&self, local_y: f32) -> f32 {
        self.absolute_bottom() + local_y
    }

    /// Absolute `y` of `local_y` once the region has moved onto the next
    /// page. Regions with a fixed height stay put; stretching regions restart
    /// at the top of the next page's margin box and override this.
    fn to_absolute_y_after_page_break(&self, local_y: f32) -> f32 {
        self.to_absolute_y(local_y)
    }

    /// Move the document's vertical position to an absolute `y`.
    fn move_to_absolute_y(&mut self, y: f32);
}
