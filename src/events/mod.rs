//! Publish/subscribe hub decoupling input handling from history and rendering.
//!
//! Pointer input is normalized by the [`PointerTracker`](crate::input::PointerTracker)
//! and published here; the [`ToolRouter`](crate::input::ToolRouter) consumes those
//! events and mutates the stroke history, which in turn publishes redraw and
//! affordance notifications for the render sink and the undo/redo controls.
//!
//! Everything runs synchronously on one thread: a `publish` call returns only
//! after every handler subscribed at call time has run.

pub mod bus;
pub mod types;

pub use bus::{EventBus, Subscription, SubscriptionId};
pub use types::{Control, Event, EventKind};
