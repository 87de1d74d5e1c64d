use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::*;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        line_width: f64,
    },
    Text {
        text: String,
        center: Point,
        font_px: f64,
        color: Color,
    },
    /// An image load was started.
    ImageRequested { src: String, cell: Rect },
    /// A previously requested image finished loading and was painted.
    Image { src: String, rect: Rect },
}

/// Headless surface that records every draw call, with manual control over image loads.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    pending: VecDeque<(String, Rect)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }

    pub fn pending_images(&self) -> usize {
        self.pending.len()
    }

    /// Finishes the oldest pending load as an image of the given natural size.
    pub fn complete_image(&mut self, natural_width: f64, natural_height: f64) -> Option<Rect> {
        let (src, cell) = self.pending.pop_front()?;
        let rect = fit_image(natural_width, natural_height, cell);
        self.ops.push(DrawOp::Image { src, rect });
        Some(rect)
    }

    /// Fails the oldest pending load. Nothing is painted.
    pub fn fail_image(&mut self) -> Option<String> {
        self.pending.pop_front().map(|(src, _)| src)
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, center: Point, font_px: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            center,
            font_px,
            color,
        });
    }

    fn draw_image(&mut self, src: &str, cell: Rect) {
        self.ops.push(DrawOp::ImageRequested {
            src: src.to_string(),
            cell,
        });
        self.pending.push_back((src.to_string(), cell));
    }
}
