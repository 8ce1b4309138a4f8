//! Cairo-based rendering of committed strokes.

use super::color::Color;
use super::stroke::{Point, Stroke};
use log::{debug, warn};
use std::io::Write;
use thiserror::Error;

/// Receives the committed strokes after every mutation of the drawing.
pub trait RenderSink {
    /// Redraws the whole drawing; `strokes` are in draw order.
    fn draw(&mut self, strokes: &[Stroke]);
}

/// Errors raised while creating or encoding a render surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// Pen appearance applied to every stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub thickness: f64,
}

/// Render sink backed by an in-memory ARGB32 image surface.
pub struct CanvasRenderer {
    surface: cairo::ImageSurface,
    background: Color,
    style: StrokeStyle,
    draw_count: usize,
}

impl CanvasRenderer {
    /// Creates a `width` x `height` surface filled with `background`.
    pub fn new(
        width: i32,
        height: i32,
        background: Color,
        style: StrokeStyle,
    ) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidSize { width, height });
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let renderer = Self {
            surface,
            background,
            style,
            draw_count: 0,
        };
        renderer.repaint(&[])?;
        Ok(renderer)
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Number of redraws received through [`RenderSink::draw`].
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Encodes the current surface as PNG into `out`.
    pub fn write_png<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        self.surface.flush();
        self.surface.write_to_png(out)?;
        Ok(())
    }

    fn repaint(&self, strokes: &[Stroke]) -> Result<(), RenderError> {
        let ctx = cairo::Context::new(&self.surface)?;
        fill_background(&ctx, self.background);
        render_strokes(&ctx, strokes, self.style);
        Ok(())
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, strokes: &[Stroke]) {
        self.draw_count += 1;
        if let Err(err) = self.repaint(strokes) {
            warn!("Failed to redraw {} stroke(s): {}", strokes.len(), err);
            return;
        }
        debug!("Redrew {} stroke(s)", strokes.len());
    }
}

/// Replaces every pixel with `color`, including alpha.
fn fill_background(ctx: &cairo::Context, color: Color) {
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.paint();
    ctx.set_operator(cairo::Operator::Over);
}

/// Renders every stroke in order (first = bottom layer).
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke], style: StrokeStyle) {
    for stroke in strokes {
        render_stroke(ctx, &stroke.points, style.color, style.thickness);
    }
}

/// Draws connected segments through `points`.
///
/// Fewer than two points produce no segment and nothing is drawn.
pub fn render_stroke(ctx: &cairo::Context, points: &[Point], color: Color, thick: f64) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }

    let _ = ctx.stroke();
}
