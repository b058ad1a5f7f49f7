//! Browser 2D context backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Canvas, TextStyle};
use crate::error::ConfigError;

/// `Canvas` over a `CanvasRenderingContext2d`
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// Grab the "2d" context of a canvas element
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, ConfigError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ConfigError::SurfaceUnavailable(format!("{e:?}")))?
            .ok_or_else(|| ConfigError::SurfaceUnavailable("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ConfigError::SurfaceUnavailable("not a 2d context".to_string()))?;
        Ok(Self { ctx })
    }
}

impl Canvas for Canvas2d {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        if let Err(e) = self.ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_text_baseline(style.baseline.as_css());
        let result = match style.max_width {
            Some(max_width) => self.ctx.fill_text_with_max_width(text, x, y, max_width),
            None => self.ctx.fill_text(text, x, y),
        };
        if let Err(e) = result {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
