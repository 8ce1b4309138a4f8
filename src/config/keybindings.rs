//! Keybinding configuration types and parsing.
//!
//! Key chords map to a small set of [`Action`]s: history moves, clearing the
//! canvas and tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Undo,
    Redo,
    ClearCanvas,
    SelectPen,
    SelectEraser,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parses strings like `"Ctrl+Z"`, `"Shift + Ctrl + Y"` or `"Escape"`.
    ///
    /// Modifiers may appear in any order. A trailing `+` key is written `"Ctrl++"`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {s}"));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the empty parts are the '+' key.
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }
}

/// Configuration for all keybindings.
///
/// Each action can have several bindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            clear_canvas: default_clear_canvas(),
            select_pen: default_select_pen(),
            select_eraser: default_select_eraser(),
        }
    }
}

impl KeybindingsConfig {
    /// Builds the lookup map from bindings to actions.
    ///
    /// Fails if a binding string is invalid or bound to two actions.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups = [
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.select_pen, Action::SelectPen),
            (&self.select_eraser, Action::SelectEraser),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                // Keys are matched case-insensitively, so normalize before the duplicate check.
                let binding = KeyBinding {
                    key: binding.key.to_lowercase(),
                    ..binding
                };
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{binding_str}' assigned to both {existing:?} and {action:?}"
                    ));
                }
            }
        }

        Ok(map)
    }
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_select_pen() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["X".to_string()]
}
