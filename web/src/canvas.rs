use cellboard_core::{Color, Point, Rect, Surface, fit_image};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// [`Surface`] backed by a `<canvas>` 2D context.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f64) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, center: Point, font_px: f64, color: Color) {
        self.ctx.set_font(&format!("{font_px}px sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_string());
        if let Err(err) = self.ctx.fill_text(text, center.x, center.y) {
            log::error!("fill_text {:?} failed: {:?}", text, err);
        }
    }

    fn draw_image(&mut self, src: &str, cell: Rect) {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                log::error!("could not create image for {}: {:?}", src, err);
                return;
            }
        };
        img.set_src(src);

        let ctx = self.ctx.clone();
        let src = src.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(img.decode()).await {
                log::warn!("image {} failed to load: {:?}", src, err);
                return;
            }

            let rect = fit_image(
                f64::from(img.natural_width()),
                f64::from(img.natural_height()),
                cell,
            );
            log::trace!("image {} painted at {:?}", src, rect);
            if let Err(err) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &img,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            ) {
                log::error!("drawing image {} failed: {:?}", src, err);
            }
        });
    }
}
