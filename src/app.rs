//! Wiring of the drawing components over one event bus.

use crate::config::{Action, KeybindingsConfig};
use crate::draw::{RenderSink, Stroke, StrokeHistory};
use crate::events::{Control, Event, EventBus, EventKind, Subscription};
use crate::input::{Key, KeyboardHandler, Modifiers, PointerEvent, PointerTracker, Tool, ToolRouter};
use crate::ui::AffordanceSink;
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Startup failures. None of these can occur once a [`DrawingApp`] exists.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No render sink configured")]
    MissingRenderSink,

    #[error("No affordance sink configured for the undo/redo controls")]
    MissingAffordanceSink,

    #[error("Invalid keybindings: {0}")]
    Keybindings(String),
}

/// Collects the collaborators of a [`DrawingApp`].
pub struct AppBuilder {
    keybindings: KeybindingsConfig,
    tool: Tool,
    render_sink: Option<Rc<RefCell<dyn RenderSink>>>,
    affordance_sink: Option<Rc<RefCell<dyn AffordanceSink>>>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            keybindings: KeybindingsConfig::default(),
            tool: Tool::default(),
            render_sink: None,
            affordance_sink: None,
        }
    }

    pub fn keybindings(mut self, keybindings: KeybindingsConfig) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    pub fn render_sink<S: RenderSink + 'static>(mut self, sink: Rc<RefCell<S>>) -> Self {
        let sink: Rc<RefCell<dyn RenderSink>> = sink;
        self.render_sink = Some(sink);
        self
    }

    pub fn affordance_sink<S: AffordanceSink + 'static>(mut self, sink: Rc<RefCell<S>>) -> Self {
        let sink: Rc<RefCell<dyn AffordanceSink>> = sink;
        self.affordance_sink = Some(sink);
        self
    }

    /// Wires every component and initializes the sinks.
    ///
    /// Both controls start disabled and the render sink receives an empty drawing.
    pub fn build(self) -> Result<DrawingApp, AppError> {
        let render_sink = self.render_sink.ok_or(AppError::MissingRenderSink)?;
        let affordance_sink = self.affordance_sink.ok_or(AppError::MissingAffordanceSink)?;
        let action_map = self
            .keybindings
            .build_action_map()
            .map_err(AppError::Keybindings)?;

        let bus = EventBus::new();
        let mut subscriptions = Vec::new();

        let sink = Rc::clone(&render_sink);
        subscriptions.push(bus.subscribe(EventKind::Redraw, move |event| {
            if let Event::Redraw(committed) = event {
                sink.borrow_mut().draw(&committed.strokes());
            }
        }));

        let sink = Rc::clone(&affordance_sink);
        subscriptions.push(bus.subscribe(EventKind::Affordance, move |event| {
            if let Event::Affordance { control, enabled } = event {
                sink.borrow_mut().set_enabled(*control, *enabled);
            }
        }));

        let history = StrokeHistory::new(bus.clone());
        let router = Rc::new(ToolRouter::new(history.clone(), self.tool));
        subscriptions.extend(router.attach(&bus));

        {
            let mut controls = affordance_sink.borrow_mut();
            controls.set_enabled(Control::Undo, false);
            controls.set_enabled(Control::Redo, false);
        }
        render_sink.borrow_mut().draw(&[]);

        info!("Drawing surface ready (tool: {})", self.tool);
        Ok(DrawingApp {
            tracker: PointerTracker::new(bus.clone()),
            keyboard: KeyboardHandler::new(action_map),
            bus,
            history,
            router,
            subscriptions,
        })
    }
}

/// A running drawing surface: input in, redraws and control signals out.
pub struct DrawingApp {
    bus: EventBus,
    tracker: PointerTracker,
    keyboard: KeyboardHandler,
    history: StrokeHistory,
    router: Rc<ToolRouter>,
    subscriptions: Vec<Subscription>,
}

impl DrawingApp {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// The bus the components communicate over.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The drawing state. Clone it to keep a handle, e.g. inside a bus handler.
    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    /// Copy of the committed strokes.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.history.strokes().to_vec()
    }

    pub fn tool(&self) -> Tool {
        self.router.tool()
    }

    pub fn select_tool(&self, tool: Tool) {
        self.router.set_tool(tool);
    }

    pub fn is_pointer_down(&self) -> bool {
        self.tracker.is_down()
    }

    /// Feeds one raw pointer event through the tracker.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.tracker.handle(event);
    }

    /// Feeds a key press; returns the action it triggered.
    pub fn handle_key_press(&mut self, key: Key) -> Option<Action> {
        let action = self.keyboard.on_key_press(key)?;
        self.perform(action);
        Some(action)
    }

    pub fn handle_key_release(&mut self, key: Key) {
        self.keyboard.on_key_release(key);
    }

    /// Resolves a complete chord such as Ctrl+Z without tracking modifier keys.
    pub fn handle_chord(&mut self, key: &str, modifiers: Modifiers) -> Option<Action> {
        let action = self.keyboard.resolve(key, modifiers)?;
        self.perform(action);
        Some(action)
    }

    pub fn undo(&self) -> bool {
        self.history.undo()
    }

    pub fn redo(&self) -> bool {
        self.history.redo()
    }

    pub fn clear_all(&self) {
        self.history.clear_all();
    }

    /// Applies a bound action.
    pub fn perform(&self, action: Action) {
        debug!("Performing {action:?}");
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::ClearCanvas => self.clear_all(),
            Action::SelectPen => self.select_tool(Tool::Pen),
            Action::SelectEraser => self.select_tool(Tool::Eraser),
        }
    }
}

impl Drop for DrawingApp {
    fn drop(&mut self) {
        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Point;
    use crate::ui::Controls;

    #[derive(Default)]
    struct FrameLog {
        frames: Vec<Vec<Stroke>>,
    }

    impl RenderSink for FrameLog {
        fn draw(&mut self, strokes: &[Stroke]) {
            self.frames.push(strokes.to_vec());
        }
    }

    struct Harness {
        app: DrawingApp,
        frames: Rc<RefCell<FrameLog>>,
        controls: Rc<RefCell<Controls>>,
    }

    fn harness() -> Harness {
        let frames = Rc::new(RefCell::new(FrameLog::default()));
        let controls = Rc::new(RefCell::new(Controls::new()));
        let app = DrawingApp::builder()
            .render_sink(Rc::clone(&frames))
            .affordance_sink(Rc::clone(&controls))
            .build()
            .unwrap();
        Harness {
            app,
            frames,
            controls,
        }
    }

    fn stroke(app: &mut DrawingApp, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        app.handle_pointer(PointerEvent::Down(Point::new(x, y)));
        for &(x, y) in points {
            app.handle_pointer(PointerEvent::Move(Point::new(x, y)));
        }
        app.handle_pointer(PointerEvent::Up(Point::new(x, y)));
    }

    #[test]
    fn build_requires_both_sinks() {
        let err = DrawingApp::builder()
            .affordance_sink(Rc::new(RefCell::new(Controls::new())))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, AppError::MissingRenderSink));

        let err = DrawingApp::builder()
            .render_sink(Rc::new(RefCell::new(FrameLog::default())))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, AppError::MissingAffordanceSink));
    }

    #[test]
    fn build_rejects_bad_keybindings() {
        let keybindings = KeybindingsConfig {
            undo: vec!["E".to_string()],
            ..KeybindingsConfig::default()
        };
        let err = DrawingApp::builder()
            .keybindings(keybindings)
            .render_sink(Rc::new(RefCell::new(FrameLog::default())))
            .affordance_sink(Rc::new(RefCell::new(Controls::new())))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Keybindings(_)));
    }

    #[test]
    fn startup_draws_empty_canvas_with_controls_disabled() {
        let h = harness();
        assert_eq!(h.frames.borrow().frames, vec![Vec::<Stroke>::new()]);
        assert!(!h.controls.borrow().undo_enabled());
        assert!(!h.controls.borrow().redo_enabled());
        assert_eq!(h.controls.borrow().signal_count(), 2);
    }

    #[test]
    fn drawing_undo_redo_updates_sinks() {
        let mut h = harness();
        stroke(&mut h.app, &[(0.0, 0.0), (10.0, 0.0)]);
        assert!(h.controls.borrow().undo_enabled());
        assert!(!h.controls.borrow().redo_enabled());

        assert_eq!(
            h.app.handle_chord("z", Modifiers::with(true, false, false)),
            Some(Action::Undo)
        );
        assert!(h.app.strokes().is_empty());
        assert!(!h.controls.borrow().undo_enabled());
        assert!(h.controls.borrow().redo_enabled());
        assert_eq!(h.frames.borrow().frames.last(), Some(&Vec::new()));

        h.app.handle_key_press(Key::Ctrl);
        assert_eq!(h.app.handle_key_press(Key::Char('y')), Some(Action::Redo));
        h.app.handle_key_release(Key::Ctrl);
        assert_eq!(h.app.strokes().len(), 1);
        assert!(h.controls.borrow().undo_enabled());
        assert!(!h.controls.borrow().redo_enabled());
        assert_eq!(
            h.frames.borrow().frames.last().map(|f| f[0].points.len()),
            Some(2)
        );
    }

    #[test]
    fn renderer_only_sees_committed_strokes() {
        let mut h = harness();
        stroke(&mut h.app, &[(0.0, 0.0), (10.0, 0.0)]);
        h.app.undo();

        for frame in &h.frames.borrow().frames {
            assert!(frame.len() <= 1);
        }
        assert!(h.frames.borrow().frames.last().unwrap().is_empty());
        assert_eq!(h.app.history().redo_stack().len(), 1);
    }

    #[test]
    fn tool_keys_switch_between_pen_and_eraser() {
        let mut h = harness();
        stroke(&mut h.app, &[(0.0, 0.0), (10.0, 0.0)]);

        assert_eq!(h.app.handle_key_press(Key::Char('x')), Some(Action::SelectEraser));
        assert_eq!(h.app.tool(), Tool::Eraser);
        stroke(&mut h.app, &[(10.0, 3.0)]);
        assert!(h.app.strokes().is_empty());
        assert!(!h.controls.borrow().undo_enabled());

        h.app.handle_key_press(Key::Char('p'));
        assert_eq!(h.app.tool(), Tool::Pen);
    }

    #[test]
    fn clear_key_empties_everything() {
        let mut h = harness();
        stroke(&mut h.app, &[(0.0, 0.0), (10.0, 0.0)]);
        stroke(&mut h.app, &[(20.0, 0.0), (30.0, 0.0)]);
        h.app.undo();

        h.app.handle_key_press(Key::Char('e'));

        let history = h.app.history();
        assert!(history.strokes().is_empty());
        assert!(history.redo_stack().is_empty());
        assert!(!h.controls.borrow().undo_enabled());
        assert!(!h.controls.borrow().redo_enabled());
    }

    #[test]
    fn dropping_app_unsubscribes_sinks() {
        let h = harness();
        let bus = h.app.bus().clone();
        assert!(bus.has_subscribers(EventKind::Redraw));

        drop(h.app);
        assert!(!bus.has_subscribers(EventKind::Redraw));
        assert!(!bus.has_subscribers(EventKind::PutPoint));
    }

    #[test]
    fn handlers_may_feed_points_back_while_history_publishes() {
        let mut h = harness();
        let bus = h.app.bus().clone();
        let injector = bus.clone();
        let _ = bus.subscribe_once(EventKind::Affordance, move |_| {
            injector.publish(&Event::PutPoint(Point::new(5.0, 5.0)));
        });

        let reader = h.app.history().clone();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&observed);
        let _ = bus.subscribe(EventKind::Redraw, move |_| {
            log.borrow_mut().push(reader.strokes().len());
        });

        stroke(&mut h.app, &[(0.0, 0.0), (10.0, 0.0)]);

        assert_eq!(
            h.app.strokes()[0].points,
            vec![Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
        );
        assert!(observed.borrow().iter().all(|&len| len == 1));
        assert!(h.controls.borrow().undo_enabled());

        h.app.undo();
        assert_eq!(observed.borrow().last(), Some(&0));
    }
}
