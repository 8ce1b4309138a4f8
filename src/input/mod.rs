//! Input handling.
//!
//! Raw pointer input is normalized by the [`PointerTracker`] and published on
//! the event bus; the [`ToolRouter`] turns the resulting point events into pen
//! or eraser edits on the stroke history. Key chords are resolved to
//! [`Action`](crate::config::Action)s by the [`KeyboardHandler`].

pub mod events;
pub mod keyboard;
pub mod modifiers;
pub mod pointer;
pub mod router;
pub mod tool;

pub use events::{Key, PointerEvent};
pub use keyboard::KeyboardHandler;
pub use modifiers::Modifiers;
pub use pointer::PointerTracker;
pub use router::ToolRouter;
pub use tool::Tool;
