//! Event kinds and payloads carried by the [`EventBus`](super::EventBus).

use crate::draw::{CommittedStrokes, Point};

/// Name under which handlers subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The pointer went down.
    PointerDown,
    /// The pointer was released.
    PointerUp,
    /// The pointer moved while held down.
    PutPoint,
    /// The committed strokes changed and should be drawn again.
    Redraw,
    /// An undo/redo control should change its enabled state.
    Affordance,
}

/// User-facing history controls whose enabled state is derived from the stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Undo,
    Redo,
}

/// A published event together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown(Point),
    PointerUp(Point),
    PutPoint(Point),
    /// The committed strokes in draw order.
    Redraw(CommittedStrokes),
    Affordance { control: Control, enabled: bool },
}

impl Event {
    /// Returns the kind this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerDown(_) => EventKind::PointerDown,
            Event::PointerUp(_) => EventKind::PointerUp,
            Event::PutPoint(_) => EventKind::PutPoint,
            Event::Redraw(_) => EventKind::Redraw,
            Event::Affordance { .. } => EventKind::Affordance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_report_their_kind() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(Event::PointerDown(origin).kind(), EventKind::PointerDown);
        assert_eq!(Event::PutPoint(origin).kind(), EventKind::PutPoint);
        assert_eq!(Event::Redraw(CommittedStrokes::default()).kind(), EventKind::Redraw);
        assert_eq!(
            Event::Affordance {
                control: Control::Redo,
                enabled: true
            }
            .kind(),
            EventKind::Affordance
        );
    }
}
