//! JSON-lines input scripts for driving a [`DrawingApp`] without a window.
//!
//! ```text
//! # a short horizontal stroke, then undo it
//! {"event":"down","x":10,"y":10}
//! {"event":"move","x":10,"y":10}
//! {"event":"move","x":60,"y":10}
//! {"event":"up","x":60,"y":10}
//! {"event":"key","key":"z","ctrl":true}
//! ```

use crate::app::DrawingApp;
use crate::draw::Point;
use crate::input::{Modifiers, PointerEvent, Tool};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    Tool {
        tool: Tool,
    },
    Clear,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses script text; blank lines and lines starting with `#` are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|source| ScriptError::Parse {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Reads and parses the script at `path`.
pub fn load(path: &Path) -> Result<Vec<ScriptEvent>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_script(&text)?;
    info!("Loaded {} script event(s) from {}", events.len(), path.display());
    Ok(events)
}

/// Feeds `events` to `app` in order. Returns how many key events triggered an action.
pub fn replay(app: &mut DrawingApp, events: &[ScriptEvent]) -> usize {
    let mut actions = 0;
    for event in events {
        debug!("Replaying {event:?}");
        match event {
            ScriptEvent::Down { x, y } => {
                app.handle_pointer(PointerEvent::Down(Point::new(*x, *y)))
            }
            ScriptEvent::Move { x, y } => {
                app.handle_pointer(PointerEvent::Move(Point::new(*x, *y)))
            }
            ScriptEvent::Up { x, y } => app.handle_pointer(PointerEvent::Up(Point::new(*x, *y))),
            ScriptEvent::Key {
                key,
                ctrl,
                shift,
                alt,
            } => {
                if app
                    .handle_chord(key, Modifiers::with(*ctrl, *shift, *alt))
                    .is_some()
                {
                    actions += 1;
                }
            }
            ScriptEvent::Tool { tool } => app.select_tool(*tool),
            ScriptEvent::Clear => app.clear_all(),
        }
    }
    actions
}
