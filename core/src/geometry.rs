/// A point on the drawing surface, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle on the drawing surface, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn inset(self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }
}

/// Places an image of the given natural size inside `cell`: centered, scaled down to fit, never scaled up.
///
/// Images without an intrinsic size (some SVGs report zero) fill the cell.
pub fn fit_image(natural_width: f64, natural_height: f64, cell: Rect) -> Rect {
    if natural_width <= 0.0 || natural_height <= 0.0 {
        return cell;
    }

    let scale = (cell.width / natural_width)
        .min(cell.height / natural_height)
        .min(1.0);
    let width = natural_width * scale;
    let height = natural_height * scale;
    Rect::new(
        cell.x + (cell.width - width) / 2.0,
        cell.y + (cell.height - height) / 2.0,
        width,
        height,
    )
}
