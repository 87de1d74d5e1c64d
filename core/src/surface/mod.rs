use crate::*;
pub use recording::*;

mod recording;

/// A 2D drawing target. All coordinates are surface pixels.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64);

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f64);

    /// Draws `text` centered on `center`.
    fn fill_text(&mut self, text: &str, center: Point, font_px: f64, color: Color);

    /// Starts loading `src` and returns immediately. Once loaded the image is painted inside `cell` as
    /// placed by [`fit_image`]. Loads are never cancelled, so a late image can paint over newer content. A
    /// failed load paints nothing.
    fn draw_image(&mut self, src: &str, cell: Rect);
}
