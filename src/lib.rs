//! Freehand drawing core.
//!
//! Pointer input is normalized into point events on a single-threaded event
//! bus, routed to the pen or eraser, and applied to a stroke history with
//! linear undo/redo. Redraws and undo/redo control state flow back out over the
//! same bus to a render sink and an affordance sink.

pub mod app;
pub mod assets;
pub mod config;
pub mod draw;
pub mod events;
pub mod export;
pub mod input;
pub mod script;
pub mod ui;
pub mod util;

pub use app::{AppBuilder, AppError, DrawingApp};
pub use config::Config;
