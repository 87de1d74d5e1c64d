use crate::*;

/// Result of mapping a pixel to the grid. It is only an index once checked against the board size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawCell {
    pub col: i64,
    pub row: i64,
}

impl RawCell {
    pub fn checked(self, (cols, rows): Coord2) -> Result<Coord2> {
        let col = Coord::try_from(self.col).ok().filter(|&col| col < cols);
        let row = Coord::try_from(self.row).ok().filter(|&row| row < rows);
        match (col, row) {
            (Some(col), Some(row)) => Ok((col, row)),
            _ => Err(BoardError::InvalidCoords {
                col: self.col,
                row: self.row,
            }),
        }
    }
}

/// Checks a cell index against a `(cols, rows)` grid size.
pub fn check_coords(coords: Coord2, (cols, rows): Coord2) -> Result<Coord2> {
    if coords.0 < cols && coords.1 < rows {
        Ok(coords)
    } else {
        Err(BoardError::InvalidCoords {
            col: coords.0.into(),
            row: coords.1.into(),
        })
    }
}

/// Pixel and cell conversions for a grid of square cells anchored at the surface origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoordMapper {
    cell_size: u32,
    size: Coord2,
}

impl CoordMapper {
    pub const fn new(cell_size: u32, size: Coord2) -> Self {
        Self { cell_size, size }
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    /// Surface size in pixels, `(cols * cell_size, rows * cell_size)`.
    pub const fn surface_size(&self) -> (u32, u32) {
        (
            self.size.0 as u32 * self.cell_size,
            self.size.1 as u32 * self.cell_size,
        )
    }

    /// Floor division of the pointer offset by the cell size. May lie outside the grid.
    pub fn pixel_to_cell(&self, px: Px, py: Px) -> RawCell {
        let cell_size = i64::from(self.cell_size);
        RawCell {
            col: i64::from(px).div_euclid(cell_size),
            row: i64::from(py).div_euclid(cell_size),
        }
    }

    /// The cell under a pointer offset, or `None` when the offset lies outside the grid.
    pub fn cell_at(&self, px: Px, py: Px) -> Option<Coord2> {
        self.pixel_to_cell(px, py).checked(self.size).ok()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        check_coords(coords, self.size)
    }

    /// Top-left corner of a cell.
    pub fn cell_to_pixel(&self, coords: Coord2) -> Result<(Px, Px)> {
        let (col, row) = self.validate_coords(coords)?;
        let to_px = |index: Coord| {
            i64::from(index) * i64::from(self.cell_size)
        };
        match (Px::try_from(to_px(col)), Px::try_from(to_px(row))) {
            (Ok(x), Ok(y)) => Ok((x, y)),
            _ => Err(BoardError::InvalidCoords {
                col: col.into(),
                row: row.into(),
            }),
        }
    }

    pub(crate) fn cell_rect(&self, (col, row): Coord2) -> Rect {
        let size = f64::from(self.cell_size);
        Rect::new(f64::from(col) * size, f64::from(row) * size, size, size)
    }
}
