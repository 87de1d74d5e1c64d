use core::ops::Index;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a board keeps for one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: Content,
    pub text_color: Color,
    pub background_color: Color,
    /// Suppressed cells keep their looks but never produce click notifications.
    pub event_suppressed: bool,
}

impl Cell {
    pub const fn blank(text_color: Color, background_color: Color) -> Self {
        Self {
            content: Content::Empty,
            text_color,
            background_color,
            event_suppressed: false,
        }
    }

    fn reset(&mut self, blank: &Cell) {
        self.content = Content::Empty;
        self.text_color = blank.text_color;
        self.background_color = blank.background_color;
    }
}

/// Fixed-size grid of cells indexed by `(col, row)`.
///
/// The shape is set at creation and never changes. Every accessor checks bounds and reports
/// [`BoardError::InvalidCoords`] instead of clamping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellStore {
    cells: Array2<Cell>,
    blank: Cell,
}

impl CellStore {
    pub fn new(size: Coord2, blank: Cell) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), blank.clone()),
            blank,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn blank(&self) -> &Cell {
        &self.blank
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        check_coords(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn get(&self, coords: Coord2) -> Result<&Content> {
        self.cell(coords).map(|cell| &cell.content)
    }

    /// Sets the content of one cell. Colors left as `None` keep their current value.
    pub fn set(
        &mut self,
        coords: Coord2,
        content: Content,
        text_color: Option<Color>,
        background_color: Option<Color>,
    ) -> Result<()> {
        let cell = self.cell_mut(coords)?;
        cell.content = content;
        if let Some(color) = text_color {
            cell.text_color = color;
        }
        if let Some(color) = background_color {
            cell.background_color = color;
        }
        Ok(())
    }

    pub fn set_row(&mut self, row: Coord, contents: &[Content]) -> Result<()> {
        let (cols, rows) = self.size();
        self.validate_coords((0, row))?;
        if contents.len() != usize::from(cols) {
            return Err(BoardError::InvalidShape { cols, rows });
        }

        let mut line = self.cells.index_axis_mut(Axis(1), row.into());
        for (cell, content) in line.iter_mut().zip(contents) {
            cell.content = content.clone();
        }
        Ok(())
    }

    pub fn set_column(&mut self, col: Coord, contents: &[Content]) -> Result<()> {
        let (cols, rows) = self.size();
        self.validate_coords((col, 0))?;
        if contents.len() != usize::from(rows) {
            return Err(BoardError::InvalidShape { cols, rows });
        }

        let mut line = self.cells.index_axis_mut(Axis(0), col.into());
        for (cell, content) in line.iter_mut().zip(contents) {
            cell.content = content.clone();
        }
        Ok(())
    }

    /// Replaces every cell from row-major matrices. All shapes are checked before anything changes.
    pub fn set_all(
        &mut self,
        contents: &Matrix<Content>,
        text_colors: Option<&Matrix<Color>>,
        background_colors: Option<&Matrix<Color>>,
    ) -> Result<()> {
        self.check_shape(contents)?;
        if let Some(colors) = text_colors {
            self.check_shape(colors)?;
        }
        if let Some(colors) = background_colors {
            self.check_shape(colors)?;
        }

        for ((col, row), cell) in self.cells.indexed_iter_mut() {
            cell.content = contents[row][col].clone();
            if let Some(colors) = text_colors {
                cell.text_color = colors[row][col];
            }
            if let Some(colors) = background_colors {
                cell.background_color = colors[row][col];
            }
        }
        Ok(())
    }

    pub fn clear_cell(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()].reset(&self.blank);
        Ok(())
    }

    pub fn clear_row(&mut self, row: Coord) -> Result<()> {
        self.validate_coords((0, row))?;
        for cell in self.cells.index_axis_mut(Axis(1), row.into()).iter_mut() {
            cell.reset(&self.blank);
        }
        Ok(())
    }

    pub fn clear_column(&mut self, col: Coord) -> Result<()> {
        self.validate_coords((col, 0))?;
        for cell in self.cells.index_axis_mut(Axis(0), col.into()).iter_mut() {
            cell.reset(&self.blank);
        }
        Ok(())
    }

    /// Resets every cell to empty content and default colors. Event suppression is left alone.
    pub fn clear_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset(&self.blank);
        }
    }

    pub fn set_event_suppressed(&mut self, coords: Coord2, suppressed: bool) -> Result<()> {
        self.cell_mut(coords)?.event_suppressed = suppressed;
        Ok(())
    }

    pub fn is_event_suppressed(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(|cell| cell.event_suppressed)
    }

    /// Cells in storage order: column by column.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((col, row), cell)| ((col as Coord, row as Coord), cell))
    }

    fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self.cells[coords.to_nd_index()])
    }

    fn check_shape<T>(&self, matrix: &Matrix<T>) -> Result<()> {
        let (cols, rows) = self.size();
        let rows_match = matrix.len() == usize::from(rows);
        let cols_match = matrix.iter().all(|line| line.len() == usize::from(cols));
        if rows_match && cols_match {
            Ok(())
        } else {
            Err(BoardError::InvalidShape { cols, rows })
        }
    }
}

impl Index<Coord2> for CellStore {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn store(size: Coord2) -> CellStore {
        CellStore::new(size, Cell::blank(Color::BLACK, Color::WHITE))
    }

    fn text(value: &str) -> Content {
        Content::parse(value)
    }

    fn filled(size: Coord2) -> CellStore {
        let mut store = store(size);
        for col in 0..size.0 {
            for row in 0..size.1 {
                let label = alloc::format!("{col}.{row}");
                store.set((col, row), text(&label), None, None).unwrap();
            }
        }
        store
    }

    #[test]
    fn set_touches_only_the_target_cell() {
        let mut store = store((4, 3));
        let before = store.clone();

        store
            .set((2, 1), text("X"), Some(Color::WHITE), Some(Color::BLACK))
            .unwrap();

        assert_eq!(store.get((2, 1)).unwrap(), &text("X"));
        assert_eq!(store[(2, 1)].text_color, Color::WHITE);
        assert_eq!(store[(2, 1)].background_color, Color::BLACK);
        for (pos, cell) in store.iter().filter(|&(pos, _)| pos != (2, 1)) {
            assert_eq!(cell, &before[pos]);
        }
    }

    #[test]
    fn set_without_colors_keeps_current_colors() {
        let mut store = store((2, 2));
        store.set((0, 0), text("A"), None, Some(Color::BLACK)).unwrap();
        store.set((0, 0), text("B"), None, None).unwrap();

        assert_eq!(store[(0, 0)].background_color, Color::BLACK);
        assert_eq!(store[(0, 0)].content, text("B"));
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut store = store((3, 2));
        let err = BoardError::InvalidCoords { col: 3, row: 0 };

        assert_eq!(store.get((3, 0)), Err(err.clone()));
        assert_eq!(store.set((3, 0), text("X"), None, None), Err(err.clone()));
        assert_eq!(store.clear_cell((3, 0)), Err(err.clone()));
        assert_eq!(store.clear_column(3), Err(err));
        assert_eq!(
            store.clear_row(2),
            Err(BoardError::InvalidCoords { col: 0, row: 2 })
        );
        assert!(store.set_event_suppressed((0, 5), true).is_err());
        assert_eq!(
            store.validate_coords((3, 0)),
            CoordMapper::new(10, store.size()).validate_coords((3, 0))
        );
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut store = filled((3, 3));
        store.clear_all();
        let once = store.clone();
        store.clear_all();

        assert_eq!(store, once);
        for (_, cell) in store.iter() {
            assert!(cell.content.is_empty());
            assert_eq!(cell.text_color, Color::BLACK);
            assert_eq!(cell.background_color, Color::WHITE);
        }
    }

    #[test]
    fn clear_row_leaves_other_rows_untouched() {
        let mut store = filled((5, 5));
        let before = store.clone();

        store.clear_row(3).unwrap();

        for (pos, cell) in store.iter() {
            if pos.1 == 3 {
                assert!(cell.content.is_empty());
            } else {
                assert_eq!(cell, &before[pos]);
            }
        }
    }

    #[test]
    fn clear_column_leaves_other_columns_untouched() {
        let mut store = filled((4, 2));
        let before = store.clone();

        store.clear_column(1).unwrap();

        for (pos, cell) in store.iter() {
            if pos.0 == 1 {
                assert!(cell.content.is_empty());
            } else {
                assert_eq!(cell, &before[pos]);
            }
        }
    }

    #[test]
    fn set_row_and_column_replace_lines() {
        let mut store = store((3, 2));
        let row: Vec<Content> = ["a", "b", "c"].into_iter().map(text).collect();
        let col: Vec<Content> = ["x", "y"].into_iter().map(text).collect();

        store.set_row(1, &row).unwrap();
        store.set_column(0, &col).unwrap();

        assert_eq!(store[(0, 0)].content, text("x"));
        assert_eq!(store[(0, 1)].content, text("y"));
        assert_eq!(store[(1, 1)].content, text("b"));
        assert_eq!(store[(2, 1)].content, text("c"));
        assert!(store[(1, 0)].content.is_empty());
        assert_eq!(
            store.set_row(0, &col),
            Err(BoardError::InvalidShape { cols: 3, rows: 2 })
        );
    }

    #[test]
    fn set_all_reads_row_major_matrices() {
        let mut store = store((3, 2));
        let contents = vec![
            vec![text("a"), text("b"), text("c")],
            vec![text("d"), text(""), text("#00FF00")],
        ];
        let colors = vec![vec![Color::WHITE; 3], vec![Color::BLACK; 3]];

        store.set_all(&contents, Some(&colors), None).unwrap();

        assert_eq!(store[(1, 0)].content, text("b"));
        assert_eq!(store[(0, 1)].content, text("d"));
        assert_eq!(store[(2, 1)].content, Content::Color(Color::rgb(0, 0xFF, 0)));
        assert_eq!(store[(2, 0)].text_color, Color::WHITE);
        assert_eq!(store[(2, 1)].text_color, Color::BLACK);
        assert_eq!(store[(2, 1)].background_color, Color::WHITE);
    }

    #[test]
    fn set_all_rejects_mismatched_shapes_atomically() {
        let mut store = filled((2, 2));
        let before = store.clone();
        let contents = vec![vec![text("a"), text("b")], vec![text("c"), text("d")]];
        let colors = vec![vec![Color::WHITE; 2]];

        assert_eq!(
            store.set_all(&contents, Some(&colors), None),
            Err(BoardError::InvalidShape { cols: 2, rows: 2 })
        );
        assert_eq!(store, before);
    }

    #[test]
    fn event_suppression_survives_clear() {
        let mut store = filled((2, 2));
        store.set_event_suppressed((1, 1), true).unwrap();
        store.clear_all();

        assert!(store.is_event_suppressed((1, 1)).unwrap());
        assert!(!store.is_event_suppressed((0, 1)).unwrap());
        assert_eq!(store[(1, 1)].content, Content::Empty);
    }
}
