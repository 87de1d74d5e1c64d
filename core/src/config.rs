use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Construction options for one board.
///
/// Deserializes from camelCase keys with every field optional, so a config can be written as
/// `{"id": "board", "cols": 3, "rows": 3, "cellSizePx": 150}`. Call [`BoardConfig::validate`] before use,
/// [`Board::mount`] does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub id: BoardId,
    pub cols: Coord,
    pub rows: Coord,
    pub cell_size_px: u32,
    /// Defaults to half the cell size, unrounded.
    pub font_size_px: Option<u32>,
    /// Label shown above the surface.
    pub title: String,
    pub hide_cell_lines: bool,
    pub hover_cell: bool,
    pub undo: bool,
    pub redraw_cells: bool,
    pub restore_content: Content,
    pub cell_text_color: Color,
    /// Defaults to `background_color`.
    pub cell_background_color: Option<Color>,
    pub grid_color: Color,
    pub background_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            id: BoardId::default(),
            cols: 0,
            rows: 0,
            cell_size_px: 0,
            font_size_px: None,
            title: String::new(),
            hide_cell_lines: false,
            hover_cell: false,
            undo: false,
            redraw_cells: false,
            restore_content: Content::Empty,
            cell_text_color: Color::BLACK,
            cell_background_color: None,
            grid_color: Color::LIGHT_GRAY,
            background_color: Color::WHITE,
        }
    }
}

impl BoardConfig {
    pub fn new(id: impl Into<BoardId>, (cols, rows): Coord2, cell_size_px: u32) -> Self {
        Self {
            id: id.into(),
            cols,
            rows,
            cell_size_px,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(BoardError::MissingId);
        }

        if self.cols == 0 || self.rows == 0 {
            return Err(BoardError::InvalidDimensions {
                cols: self.cols,
                rows: self.rows,
            });
        }

        // pointer offsets are i32, the whole surface must be addressable
        let longest = self.cols.max(self.rows);
        match u32::from(longest).checked_mul(self.cell_size_px) {
            Some(extent) if self.cell_size_px > 0 && extent <= i32::MAX as u32 => Ok(()),
            _ => Err(BoardError::InvalidCellSize(self.cell_size_px, longest)),
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.cols, self.rows)
    }

    pub fn font_size_px(&self) -> f64 {
        match self.font_size_px {
            Some(px) => f64::from(px),
            None => f64::from(self.cell_size_px) / 2.0,
        }
    }

    pub fn cell_background_color(&self) -> Color {
        self.cell_background_color.unwrap_or(self.background_color)
    }

    pub fn blank_cell(&self) -> Cell {
        Cell::blank(self.cell_text_color, self.cell_background_color())
    }

    pub const fn mapper(&self) -> CoordMapper {
        CoordMapper::new(self.cell_size_px, self.size())
    }

    pub fn undo_policy(&self) -> UndoPolicy {
        UndoPolicy::new(self.undo, self.restore_content.clone())
    }
}
