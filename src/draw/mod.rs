//! Drawing state and its Cairo rendering.
//!
//! - [`Point`], [`Stroke`]: sampled polylines
//! - [`StrokeHistory`]: committed strokes plus linear undo/redo
//! - [`CanvasRenderer`]: render sink drawing committed strokes to an image surface

pub mod color;
pub mod history;
pub mod render;
pub mod stroke;

pub use color::Color;
pub use history::{CommittedStrokes, ERASE_RADIUS, StrokeHistory};
pub use render::{
    CanvasRenderer, RenderError, RenderSink, StrokeStyle, render_stroke, render_strokes,
};
pub use stroke::{Point, Stroke, StrokeId};
