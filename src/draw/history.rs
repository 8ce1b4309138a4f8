//! Committed strokes, the in-progress stroke, and linear undo/redo.

use super::stroke::{Point, Stroke, StrokeId};
use crate::events::{Control, Event, EventBus, EventKind};
use log::{debug, warn};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Eraser hit radius in surface units.
pub const ERASE_RADIUS: f64 = 5.0;

#[derive(Default)]
struct HistoryState {
    strokes: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
    current: Option<StrokeId>,
    next_id: u64,
}

impl HistoryState {
    fn detach_if_current(&mut self, id: StrokeId) {
        if self.current == Some(id) {
            debug!("Stroke {:?} removed mid-gesture", id);
            self.current = None;
        }
    }
}

/// Read-only view of the committed strokes, carried by [`Event::Redraw`].
///
/// Cloning shares the history's storage; reads see the drawing as it is at
/// the time of the read.
#[derive(Clone, Default)]
pub struct CommittedStrokes {
    state: Rc<RefCell<HistoryState>>,
}

impl CommittedStrokes {
    /// Committed strokes in draw order.
    pub fn strokes(&self) -> Ref<'_, [Stroke]> {
        Ref::map(self.state.borrow(), |state| state.strokes.as_slice())
    }

    pub fn to_vec(&self) -> Vec<Stroke> {
        self.strokes().to_vec()
    }
}

impl PartialEq for CommittedStrokes {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) || *self.strokes() == *other.strokes()
    }
}

impl fmt::Debug for CommittedStrokes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.strokes().iter()).finish()
    }
}

/// Owner of the drawing state.
///
/// A cheap `Clone` handle: the router and the application share one history.
/// The current stroke is pushed onto the committed list when it begins and
/// keeps growing in place until [`end_stroke`](Self::end_stroke). Every
/// mutation publishes a [`Event::Redraw`], and history moves publish
/// [`Event::Affordance`] signals derived from stack emptiness. Events are
/// published after the state is released, so handlers may read or mutate the
/// history from inside a delivery.
#[derive(Clone)]
pub struct StrokeHistory {
    state: Rc<RefCell<HistoryState>>,
    bus: EventBus,
}

impl StrokeHistory {
    /// Creates an empty history publishing on `bus`.
    pub fn new(bus: EventBus) -> Self {
        Self {
            state: Rc::default(),
            bus,
        }
    }

    /// Committed strokes in draw order (first = bottom).
    ///
    /// Drop the guard before mutating the history.
    pub fn strokes(&self) -> Ref<'_, [Stroke]> {
        Ref::map(self.state.borrow(), |state| state.strokes.as_slice())
    }

    /// Undone strokes, most recently undone last.
    pub fn redo_stack(&self) -> Ref<'_, [Stroke]> {
        Ref::map(self.state.borrow(), |state| state.redo_stack.as_slice())
    }

    /// The stroke receiving points, if a gesture is in progress.
    pub fn current_stroke(&self) -> Option<Ref<'_, Stroke>> {
        Ref::filter_map(self.state.borrow(), |state| {
            let id = state.current?;
            state.strokes.iter().rev().find(|stroke| stroke.id == id)
        })
        .ok()
    }

    /// Shared view of the committed strokes.
    pub fn committed(&self) -> CommittedStrokes {
        CommittedStrokes {
            state: Rc::clone(&self.state),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.state.borrow().current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.state.borrow().strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.borrow().redo_stack.is_empty()
    }

    /// Starts a new empty stroke unless one is already in progress.
    ///
    /// Starting a stroke discards the redo stack.
    pub fn begin_stroke_if_needed(&self) -> StrokeId {
        let id = {
            let mut state = self.state.borrow_mut();
            if let Some(id) = state.current {
                return id;
            }

            state.next_id += 1;
            let id = StrokeId(state.next_id);
            state.strokes.push(Stroke::new(id));
            state.redo_stack.clear();
            state.current = Some(id);
            debug!("Began stroke {:?} ({} committed)", id, state.strokes.len());
            id
        };

        self.emit([signal(Control::Undo, true), signal(Control::Redo, false)]);
        id
    }

    /// Appends `point` to the current stroke.
    ///
    /// Without a current stroke the point is dropped with a warning.
    pub fn append_point(&self, point: Point) {
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(id) = state.current else {
                warn!("Dropping point ({}, {}): no stroke in progress", point.x, point.y);
                return;
            };

            match state.strokes.iter_mut().rev().find(|stroke| stroke.id == id) {
                Some(stroke) => stroke.points.push(point),
                None => {
                    warn!("Current stroke {:?} is no longer committed", id);
                    state.current = None;
                    return;
                }
            }
        }
        self.emit_redraw();
    }

    /// Freezes the current stroke. It stays committed.
    pub fn end_stroke(&self) {
        if let Some(id) = self.state.borrow_mut().current.take() {
            debug!("Ended stroke {:?}", id);
        }
    }

    /// Removes the first committed stroke with a sample within [`ERASE_RADIUS`]
    /// of `point` and returns it.
    ///
    /// A hit discards the redo stack. A miss changes nothing.
    pub fn erase_at(&self, point: Point) -> Option<Stroke> {
        let (erased, now_empty) = {
            let mut state = self.state.borrow_mut();
            let index = state
                .strokes
                .iter()
                .position(|stroke| stroke.has_point_near(point, ERASE_RADIUS))?;

            let erased = state.strokes.remove(index);
            state.redo_stack.clear();
            state.detach_if_current(erased.id);
            debug!(
                "Erased stroke {:?} at index {} ({} remaining)",
                erased.id,
                index,
                state.strokes.len()
            );
            (erased, state.strokes.is_empty())
        };

        self.emit_redraw();
        let mut signals = Vec::with_capacity(2);
        if now_empty {
            signals.push(signal(Control::Undo, false));
        }
        signals.push(signal(Control::Redo, false));
        self.emit(signals);
        Some(erased)
    }

    /// Moves the last committed stroke onto the redo stack.
    ///
    /// Returns `false` and publishes nothing when there is nothing to undo.
    pub fn undo(&self) -> bool {
        let now_empty = {
            let mut state = self.state.borrow_mut();
            let Some(stroke) = state.strokes.pop() else {
                return false;
            };

            state.detach_if_current(stroke.id);
            debug!("Undo stroke {:?}", stroke.id);
            state.redo_stack.push(stroke);
            state.strokes.is_empty()
        };

        self.emit_redraw();
        let mut signals = Vec::with_capacity(2);
        if now_empty {
            signals.push(signal(Control::Undo, false));
        }
        signals.push(signal(Control::Redo, true));
        self.emit(signals);
        true
    }

    /// Moves the most recently undone stroke back to the top of the drawing.
    ///
    /// The stroke is appended after every other committed stroke, whatever its
    /// position was before the undo.
    pub fn redo(&self) -> bool {
        let stack_empty = {
            let mut state = self.state.borrow_mut();
            let Some(stroke) = state.redo_stack.pop() else {
                return false;
            };

            debug!("Redo stroke {:?}", stroke.id);
            state.strokes.push(stroke);
            state.redo_stack.is_empty()
        };

        self.emit_redraw();
        let mut signals = Vec::with_capacity(2);
        if stack_empty {
            signals.push(signal(Control::Redo, false));
        }
        signals.push(signal(Control::Undo, true));
        self.emit(signals);
        true
    }

    /// Drops every committed and undone stroke.
    pub fn clear_all(&self) {
        {
            let mut state = self.state.borrow_mut();
            debug!(
                "Clearing {} committed and {} undone strokes",
                state.strokes.len(),
                state.redo_stack.len()
            );
            state.strokes.clear();
            state.redo_stack.clear();
            state.current = None;
        }

        self.emit_redraw();
        self.emit([signal(Control::Undo, false), signal(Control::Redo, false)]);
    }

    fn emit_redraw(&self) {
        if self.bus.has_subscribers(EventKind::Redraw) {
            self.bus.publish(&Event::Redraw(self.committed()));
        }
    }

    fn emit(&self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.bus.publish(&event);
        }
    }
}

fn signal(control: Control, enabled: bool) -> Event {
    Event::Affordance { control, enabled }
}
