//! Pointer normalization: raw down/move/up into semantic point events.

use super::events::PointerEvent;
use crate::draw::Point;
use crate::events::{Event, EventBus};
use log::trace;

/// Two-state (up/down) tracker for the pointing device.
///
/// - `Down` marks the pointer held and publishes [`Event::PointerDown`].
/// - `Move` while held records the position and publishes [`Event::PutPoint`];
///   while released it is ignored.
/// - `Up` releases the pointer and publishes [`Event::PointerUp`], even if the
///   pointer was not held.
pub struct PointerTracker {
    is_down: bool,
    last_position: Point,
    bus: EventBus,
}

impl PointerTracker {
    pub fn new(bus: EventBus) -> Self {
        Self {
            is_down: false,
            last_position: Point::default(),
            bus,
        }
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Position of the last move accepted while the pointer was held.
    pub fn last_position(&self) -> Point {
        self.last_position
    }

    /// Applies one raw pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(position) => {
                self.is_down = true;
                trace!("pointer down at ({}, {})", position.x, position.y);
                self.bus.publish(&Event::PointerDown(position));
            }
            PointerEvent::Move(position) => {
                if !self.is_down {
                    return;
                }
                self.last_position = position;
                self.bus.publish(&Event::PutPoint(position));
            }
            PointerEvent::Up(position) => {
                self.is_down = false;
                trace!("pointer up at ({}, {})", position.x, position.y);
                self.bus.publish(&Event::PointerUp(position));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_tracker() -> (PointerTracker, Rc<RefCell<Vec<Event>>>) {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::PointerDown, EventKind::PutPoint, EventKind::PointerUp] {
            let log = Rc::clone(&log);
            let _ = bus.subscribe(kind, move |event| log.borrow_mut().push(event.clone()));
        }
        (PointerTracker::new(bus), log)
    }

    #[test]
    fn move_while_up_is_ignored() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle(PointerEvent::Move(Point::new(3.0, 4.0)));

        assert!(log.borrow().is_empty());
        assert_eq!(tracker.last_position(), Point::default());
    }

    #[test]
    fn drag_publishes_down_points_and_up() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle(PointerEvent::Down(Point::new(0.0, 0.0)));
        assert!(tracker.is_down());
        tracker.handle(PointerEvent::Move(Point::new(1.0, 2.0)));
        tracker.handle(PointerEvent::Move(Point::new(3.0, 4.0)));
        tracker.handle(PointerEvent::Up(Point::new(3.0, 4.0)));

        assert!(!tracker.is_down());
        assert_eq!(tracker.last_position(), Point::new(3.0, 4.0));
        assert_eq!(
            *log.borrow(),
            vec![
                Event::PointerDown(Point::new(0.0, 0.0)),
                Event::PutPoint(Point::new(1.0, 2.0)),
                Event::PutPoint(Point::new(3.0, 4.0)),
                Event::PointerUp(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn up_fires_even_when_not_down() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle(PointerEvent::Up(Point::new(0.0, 0.0)));
        tracker.handle(PointerEvent::Up(Point::new(0.0, 0.0)));

        assert_eq!(log.borrow().len(), 2);
        assert!(!tracker.is_down());
    }

    #[test]
    fn gestures_can_restart() {
        let (mut tracker, log) = recording_tracker();
        for _ in 0..3 {
            tracker.handle(PointerEvent::Down(Point::new(0.0, 0.0)));
            tracker.handle(PointerEvent::Move(Point::new(1.0, 1.0)));
            tracker.handle(PointerEvent::Up(Point::new(1.0, 1.0)));
            tracker.handle(PointerEvent::Move(Point::new(9.0, 9.0)));
        }

        let points = log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::PutPoint(_)))
            .count();
        assert_eq!(points, 3);
    }
}
