//! Pen/eraser dispatch of point events onto the stroke history.

use super::tool::Tool;
use crate::draw::{Point, StrokeHistory};
use crate::events::{Event, EventBus, EventKind, Subscription};
use log::info;
use std::cell::Cell;
use std::rc::Rc;

/// Interprets point events according to the active [`Tool`].
///
/// A tool change applies from the next point on; points already appended to an
/// in-progress stroke are left alone.
pub struct ToolRouter {
    tool: Cell<Tool>,
    history: StrokeHistory,
}

impl ToolRouter {
    pub fn new(history: StrokeHistory, tool: Tool) -> Self {
        Self {
            tool: Cell::new(tool),
            history,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool.get()
    }

    pub fn set_tool(&self, tool: Tool) {
        if self.tool.replace(tool) != tool {
            info!("Switched to {tool}");
        }
    }

    /// Handles one sampled point.
    pub fn on_point(&self, point: Point) {
        match self.tool.get() {
            Tool::Eraser => {
                self.history.erase_at(point);
            }
            Tool::Pen => {
                self.history.begin_stroke_if_needed();
                self.history.append_point(point);
            }
        }
    }

    /// Ends the current stroke when the pointer is released.
    pub fn on_pointer_up(&self) {
        self.history.end_stroke();
    }

    /// Subscribes the router to point and pointer-up events on `bus`.
    pub fn attach(self: &Rc<Self>, bus: &EventBus) -> Vec<Subscription> {
        let router = Rc::clone(self);
        let points = bus.subscribe(EventKind::PutPoint, move |event| {
            if let Event::PutPoint(point) = event {
                router.on_point(*point);
            }
        });

        let router = Rc::clone(self);
        let releases = bus.subscribe(EventKind::PointerUp, move |_| router.on_pointer_up());

        vec![points, releases]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PointerEvent, PointerTracker};

    struct Rig {
        tracker: PointerTracker,
        router: Rc<ToolRouter>,
        history: StrokeHistory,
    }

    fn rig() -> Rig {
        let bus = EventBus::new();
        let history = StrokeHistory::new(bus.clone());
        let router = Rc::new(ToolRouter::new(history.clone(), Tool::Pen));
        let _ = router.attach(&bus);
        Rig {
            tracker: PointerTracker::new(bus),
            router,
            history,
        }
    }

    fn drag(tracker: &mut PointerTracker, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        tracker.handle(PointerEvent::Down(Point::new(x, y)));
        for &(x, y) in points {
            tracker.handle(PointerEvent::Move(Point::new(x, y)));
        }
        let (x, y) = points[points.len() - 1];
        tracker.handle(PointerEvent::Up(Point::new(x, y)));
    }

    #[test]
    fn pen_drag_commits_one_stroke() {
        let mut rig = rig();
        drag(&mut rig.tracker, &[(0.0, 0.0), (10.0, 0.0)]);

        let history = &rig.history;
        assert_eq!(history.strokes().len(), 1);
        assert_eq!(
            history.strokes()[0].points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
        );
        assert!(!history.is_drawing());
    }

    #[test]
    fn click_without_move_creates_no_stroke() {
        let mut rig = rig();
        rig.tracker.handle(PointerEvent::Down(Point::new(5.0, 5.0)));
        rig.tracker.handle(PointerEvent::Up(Point::new(5.0, 5.0)));

        assert!(rig.history.strokes().is_empty());
    }

    #[test]
    fn separate_drags_make_separate_strokes() {
        let mut rig = rig();
        drag(&mut rig.tracker, &[(0.0, 0.0), (1.0, 1.0)]);
        drag(&mut rig.tracker, &[(50.0, 50.0), (51.0, 51.0)]);

        assert_eq!(rig.history.strokes().len(), 2);
    }

    #[test]
    fn eraser_removes_without_starting_a_stroke() {
        let mut rig = rig();
        drag(&mut rig.tracker, &[(0.0, 0.0), (10.0, 0.0)]);
        drag(&mut rig.tracker, &[(100.0, 100.0), (110.0, 100.0)]);

        rig.router.set_tool(Tool::Eraser);
        drag(&mut rig.tracker, &[(300.0, 300.0), (101.0, 101.0)]);

        let history = &rig.history;
        assert_eq!(history.strokes().len(), 1);
        assert_eq!(history.strokes()[0].points[0], Point::new(0.0, 0.0));
        assert!(!history.is_drawing());
    }

    #[test]
    fn tool_switch_mid_gesture_applies_to_next_point() {
        let mut rig = rig();
        drag(&mut rig.tracker, &[(500.0, 500.0), (510.0, 500.0)]);

        rig.tracker.handle(PointerEvent::Down(Point::new(0.0, 0.0)));
        rig.tracker.handle(PointerEvent::Move(Point::new(0.0, 0.0)));
        rig.tracker.handle(PointerEvent::Move(Point::new(1.0, 0.0)));
        rig.router.set_tool(Tool::Eraser);
        rig.tracker.handle(PointerEvent::Move(Point::new(501.0, 501.0)));
        rig.router.set_tool(Tool::Pen);
        rig.tracker.handle(PointerEvent::Move(Point::new(2.0, 0.0)));
        rig.tracker.handle(PointerEvent::Up(Point::new(2.0, 0.0)));

        let history = &rig.history;
        assert_eq!(history.strokes().len(), 1);
        assert_eq!(
            history.strokes()[0].points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0)
            ]
        );
    }
}
