use crate::*;

/// Translucent white painted over the cell under the pointer.
pub const HOVER_COLOR: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0x80);

const GRID_LINE_WIDTH: f64 = 1.0;

/// Paints a [`CellStore`] onto a [`Surface`].
#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    mapper: CoordMapper,
    font_px: f64,
    grid_color: Color,
    background_color: Color,
    hide_cell_lines: bool,
    redraw_cells: bool,
}

impl Renderer {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            mapper: config.mapper(),
            font_px: config.font_size_px(),
            grid_color: config.grid_color,
            background_color: config.background_color,
            hide_cell_lines: config.hide_cell_lines,
            redraw_cells: config.redraw_cells,
        }
    }

    /// Paints the surface background, every cell background and the grid lines. Content is left out.
    pub fn draw_board<S: Surface + ?Sized>(&self, surface: &mut S, store: &CellStore) {
        let (width, height) = self.mapper.surface_size();
        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
            self.background_color,
        );

        for (pos, cell) in store.iter() {
            surface.fill_rect(self.mapper.cell_rect(pos), cell.background_color);
        }

        if !self.hide_cell_lines {
            self.draw_grid_lines(surface);
        }
    }

    /// Full repaint from the store: board, then the content of every non-empty cell.
    pub fn redraw_all<S: Surface + ?Sized>(&self, surface: &mut S, store: &CellStore) {
        self.draw_board(surface, store);
        for (pos, cell) in store.iter().filter(|(_, cell)| !cell.content.is_empty()) {
            self.paint_content(surface, self.mapper.cell_rect(pos), cell);
        }
    }

    /// Repaints one cell. The background is skipped for cells holding content unless `redraw_cells` is set.
    pub fn draw_cell<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        store: &CellStore,
        pos: Coord2,
    ) -> Result<()> {
        let cell = store.cell(pos)?;
        let background = self.redraw_cells || cell.content.is_empty();
        self.paint_cell(surface, pos, cell, background);
        Ok(())
    }

    pub fn draw_hover_overlay<S: Surface + ?Sized>(&self, surface: &mut S, pos: Coord2) -> Result<()> {
        let pos = self.mapper.validate_coords(pos)?;
        surface.fill_rect(self.content_rect(pos), HOVER_COLOR);
        Ok(())
    }

    /// Restores a previously highlighted cell to its stored looks.
    pub fn clear_hover_overlay<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        store: &CellStore,
        prev: Coord2,
    ) -> Result<()> {
        let cell = store.cell(prev)?;
        self.paint_cell(surface, prev, cell, true);
        Ok(())
    }

    /// Strokes a border just inside a cell.
    pub fn draw_border<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        pos: Coord2,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        let pos = self.mapper.validate_coords(pos)?;
        let rect = self.mapper.cell_rect(pos).inset(line_width / 2.0);
        surface.stroke_rect(rect, color, line_width);
        Ok(())
    }

    fn draw_grid_lines<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (cols, rows) = self.mapper.size();
        let (width, height) = self.mapper.surface_size();
        let (width, height) = (f64::from(width), f64::from(height));
        let step = f64::from(self.mapper.cell_size());

        for col in 0..=cols {
            let x = f64::from(col) * step;
            surface.stroke_line(
                Point::new(x, 0.0),
                Point::new(x, height),
                self.grid_color,
                GRID_LINE_WIDTH,
            );
        }
        for row in 0..=rows {
            let y = f64::from(row) * step;
            surface.stroke_line(
                Point::new(0.0, y),
                Point::new(width, y),
                self.grid_color,
                GRID_LINE_WIDTH,
            );
        }
    }

    fn paint_cell<S: Surface + ?Sized>(&self, surface: &mut S, pos: Coord2, cell: &Cell, background: bool) {
        let rect = self.mapper.cell_rect(pos);
        if background {
            surface.fill_rect(rect, cell.background_color);
            if !self.hide_cell_lines {
                surface.stroke_rect(rect, self.grid_color, GRID_LINE_WIDTH);
            }
        }
        self.paint_content(surface, rect, cell);
    }

    fn paint_content<S: Surface + ?Sized>(&self, surface: &mut S, rect: Rect, cell: &Cell) {
        let inner = self.inner_rect(rect);
        match &cell.content {
            Content::Empty => {}
            Content::Color(color) => surface.fill_rect(inner, *color),
            Content::Image(src) => surface.draw_image(src, inner),
            Content::Text(text) => surface.fill_text(text, rect.center(), self.font_px, cell.text_color),
        }
    }

    fn content_rect(&self, pos: Coord2) -> Rect {
        self.inner_rect(self.mapper.cell_rect(pos))
    }

    // keeps grid lines visible under filled content
    fn inner_rect(&self, rect: Rect) -> Rect {
        if self.hide_cell_lines {
            rect
        } else {
            rect.inset(GRID_LINE_WIDTH)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn setup(config: BoardConfig) -> (Renderer, CellStore, RecordingSurface) {
        let store = CellStore::new(config.size(), config.blank_cell());
        (Renderer::new(&config), store, RecordingSurface::new())
    }

    fn lines(ops: &[DrawOp]) -> usize {
        ops.iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    #[test]
    fn board_paints_backgrounds_and_grid() {
        let (renderer, store, mut surface) = setup(BoardConfig::new("b", (3, 2), 10));

        renderer.draw_board(&mut surface, &store);

        let ops = surface.ops();
        assert_eq!(
            ops[0],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 30.0, 20.0),
                color: Color::WHITE
            }
        );
        let fills = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
            .count();
        assert_eq!(fills, 1 + 6);
        assert_eq!(lines(ops), 4 + 3);
        assert!(ops.contains(&DrawOp::Line {
            from: Point::new(30.0, 0.0),
            to: Point::new(30.0, 20.0),
            color: Color::LIGHT_GRAY,
            line_width: 1.0,
        }));
    }

    #[test]
    fn hidden_grid_lines_are_not_stroked() {
        let config = BoardConfig {
            hide_cell_lines: true,
            ..BoardConfig::new("b", (3, 3), 10)
        };
        let (renderer, store, mut surface) = setup(config);

        renderer.draw_board(&mut surface, &store);

        assert_eq!(lines(surface.ops()), 0);
    }

    #[test]
    fn color_content_fills_inside_grid_lines() {
        let (renderer, mut store, mut surface) = setup(BoardConfig::new("b", (5, 5), 50));
        store.set((2, 2), Content::parse("#FF0000"), None, None).unwrap();

        renderer.draw_cell(&mut surface, &store, (2, 2)).unwrap();

        assert_eq!(
            surface.ops(),
            &[DrawOp::FillRect {
                rect: Rect::new(101.0, 101.0, 48.0, 48.0),
                color: Color::rgb(0xFF, 0, 0)
            }]
        );
    }

    #[test]
    fn redraw_cells_repaints_background_first() {
        let config = BoardConfig {
            redraw_cells: true,
            hide_cell_lines: true,
            ..BoardConfig::new("b", (2, 2), 20)
        };
        let (renderer, mut store, mut surface) = setup(config);
        store.set((1, 0), Content::parse("7"), None, None).unwrap();

        renderer.draw_cell(&mut surface, &store, (1, 0)).unwrap();

        assert_eq!(
            surface.ops(),
            &[
                DrawOp::FillRect {
                    rect: Rect::new(20.0, 0.0, 20.0, 20.0),
                    color: Color::WHITE
                },
                DrawOp::Text {
                    text: "7".into(),
                    center: Point::new(30.0, 10.0),
                    font_px: 10.0,
                    color: Color::BLACK
                },
            ]
        );
    }

    #[test]
    fn empty_cell_always_gets_background() {
        let (renderer, store, mut surface) = setup(BoardConfig::new("b", (2, 2), 20));

        renderer.draw_cell(&mut surface, &store, (0, 1)).unwrap();

        assert_eq!(
            surface.ops()[0],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 20.0, 20.0, 20.0),
                color: Color::WHITE
            }
        );
    }

    #[test]
    fn image_paints_after_load_and_never_upscales() {
        let (renderer, mut store, mut surface) = setup(BoardConfig::new("b", (2, 2), 50));
        store.set((1, 1), Content::parse("img/mine.png"), None, None).unwrap();

        renderer.draw_cell(&mut surface, &store, (1, 1)).unwrap();
        assert_eq!(surface.pending_images(), 1);
        assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::Image { .. })));

        let rect = surface.complete_image(16.0, 16.0).unwrap();
        assert_eq!(rect, Rect::new(67.0, 67.0, 16.0, 16.0));
    }

    #[test]
    fn failed_image_leaves_previous_pixels() {
        let (renderer, mut store, mut surface) = setup(BoardConfig::new("b", (1, 1), 50));
        store.set((0, 0), Content::parse("broken.gif"), None, None).unwrap();
        renderer.draw_cell(&mut surface, &store, (0, 0)).unwrap();
        let before: Vec<DrawOp> = surface.ops().to_vec();

        assert_eq!(surface.fail_image(), Some("broken.gif".into()));
        assert_eq!(surface.ops(), before.as_slice());
    }

    #[test]
    fn hover_overlay_and_restore() {
        let (renderer, mut store, mut surface) = setup(BoardConfig::new("b", (3, 3), 10));
        store.set((1, 1), Content::parse("#00FF00"), None, None).unwrap();

        renderer.draw_hover_overlay(&mut surface, (1, 1)).unwrap();
        renderer.clear_hover_overlay(&mut surface, &store, (1, 1)).unwrap();

        let ops = surface.take_ops();
        assert_eq!(
            ops[0],
            DrawOp::FillRect {
                rect: Rect::new(11.0, 11.0, 8.0, 8.0),
                color: HOVER_COLOR
            }
        );
        assert_eq!(
            ops[1],
            DrawOp::FillRect {
                rect: Rect::new(10.0, 10.0, 10.0, 10.0),
                color: Color::WHITE
            }
        );
        assert_eq!(
            ops.last(),
            Some(&DrawOp::FillRect {
                rect: Rect::new(11.0, 11.0, 8.0, 8.0),
                color: Color::rgb(0, 0xFF, 0)
            })
        );
        assert!(renderer.draw_hover_overlay(&mut surface, (3, 0)).is_err());
    }

    #[test]
    fn border_is_stroked_inside_cell() {
        let (renderer, _, mut surface) = setup(BoardConfig::new("b", (3, 3), 150));

        renderer
            .draw_border(&mut surface, (1, 2), Color::rgb(0, 0x80, 0), 10.0)
            .unwrap();

        assert_eq!(
            surface.ops(),
            &[DrawOp::StrokeRect {
                rect: Rect::new(155.0, 305.0, 140.0, 140.0),
                color: Color::rgb(0, 0x80, 0),
                line_width: 10.0
            }]
        );
    }

    #[test]
    fn full_redraw_paints_only_stored_content() {
        let (renderer, mut store, mut surface) = setup(BoardConfig::new("b", (2, 2), 10));
        store.set((0, 0), Content::parse("A"), None, None).unwrap();

        renderer.redraw_all(&mut surface, &store);

        let texts = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .count();
        assert_eq!(texts, 1);
    }
}
