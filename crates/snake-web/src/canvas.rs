//! Canvas 2D paint backend.

use glam::Vec2;
use snake_engine::{DrawCommand, FrameData, Palette, Renderer};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::WebError;

pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    palette: Palette,
}

impl Canvas2dRenderer {
    /// Acquire an opaque 2d context on `canvas`.
    pub fn new(canvas: HtmlCanvasElement, palette: Palette) -> Result<Self, WebError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::FALSE)?;
        let ctx = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or(WebError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WebError::NoContext)?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self { canvas, ctx, palette })
    }

    /// Convert client (viewport) coordinates to canvas pixels.
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        ((client_x - rect.left()) as f32, (client_y - rect.top()) as f32)
    }

    fn fill_rect(&self, origin: Vec2, size: Vec2, color: &str, alpha: f32, glow: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        if glow > 0.0 {
            self.ctx.set_shadow_blur(glow as f64);
            self.ctx.set_shadow_color(color);
        }
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        if glow > 0.0 {
            self.ctx.set_shadow_blur(0.0);
        }
    }
}

impl Renderer for Canvas2dRenderer {
    type Error = WebError;

    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), WebError> {
        for command in frame.commands {
            match command {
                DrawCommand::FillRect {
                    origin,
                    size,
                    paint,
                    alpha,
                    glow,
                } => self.fill_rect(*origin, *size, self.palette.color(*paint), *alpha, *glow),
                DrawCommand::FillText {
                    text,
                    center,
                    style,
                    paint,
                } => {
                    self.ctx.set_global_alpha(1.0);
                    self.ctx.set_fill_style_str(self.palette.color(*paint));
                    self.ctx.set_font(style.css_font());
                    self.ctx.set_text_align("center");
                    self.ctx.set_text_baseline("middle");
                    self.ctx.fill_text(text, center.x as f64, center.y as f64)?;
                }
            }
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    /// Resizing the backing store resets context state, so smoothing is
    /// switched off again.
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_image_smoothing_enabled(false);
    }
}
