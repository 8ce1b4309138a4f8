//! Undo/redo control affordances and the status line.

use crate::draw::{Color, StrokeHistory};
use crate::events::Control;
use crate::input::Tool;
use log::debug;

/// Receives enable/disable signals for the undo and redo controls.
pub trait AffordanceSink {
    fn set_enabled(&mut self, control: Control, enabled: bool);
}

/// Enabled state of the undo/redo buttons, driven purely by history signals.
///
/// Both controls start disabled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Controls {
    undo_enabled: bool,
    redo_enabled: bool,
    signal_count: usize,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_enabled(&self) -> bool {
        self.undo_enabled
    }

    pub fn redo_enabled(&self) -> bool {
        self.redo_enabled
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Undo => self.undo_enabled,
            Control::Redo => self.redo_enabled,
        }
    }

    /// Number of signals received so far.
    pub fn signal_count(&self) -> usize {
        self.signal_count
    }
}

impl AffordanceSink for Controls {
    fn set_enabled(&mut self, control: Control, enabled: bool) {
        self.signal_count += 1;
        let slot = match control {
            Control::Undo => &mut self.undo_enabled,
            Control::Redo => &mut self.redo_enabled,
        };
        if *slot != enabled {
            debug!("{control:?} control {}", if enabled { "enabled" } else { "disabled" });
        }
        *slot = enabled;
    }
}

/// One-line summary of tool, pen and history state.
pub fn status_line(
    tool: Tool,
    pen: &Color,
    history: &StrokeHistory,
    controls: &Controls,
) -> String {
    let flag = |enabled: bool| if enabled { "on" } else { "off" };
    format!(
        "tool: {} | pen: {} | strokes: {} | undone: {} | undo: {} | redo: {}",
        tool,
        crate::util::color_to_name(pen),
        history.strokes().len(),
        history.redo_stack().len(),
        flag(controls.undo_enabled()),
        flag(controls.redo_enabled()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;
    use crate::events::EventBus;

    #[test]
    fn controls_start_disabled_and_follow_signals() {
        let mut controls = Controls::new();
        assert!(!controls.undo_enabled());
        assert!(!controls.redo_enabled());

        controls.set_enabled(Control::Undo, true);
        controls.set_enabled(Control::Redo, true);
        controls.set_enabled(Control::Undo, false);

        assert!(!controls.is_enabled(Control::Undo));
        assert!(controls.is_enabled(Control::Redo));
        assert_eq!(controls.signal_count(), 3);
    }

    #[test]
    fn status_line_reports_counts() {
        let history = StrokeHistory::new(EventBus::new());
        let line = status_line(Tool::Eraser, &BLUE, &history, &Controls::new());
        assert_eq!(
            line,
            "tool: eraser | pen: Blue | strokes: 0 | undone: 0 | undo: off | redo: off"
        );
    }
}
