//! Key chord resolution.

use super::events::Key;
use super::modifiers::Modifiers;
use crate::config::{Action, KeyBinding};
use log::debug;
use std::collections::HashMap;

/// Tracks held modifiers and resolves key presses to bound [`Action`]s.
pub struct KeyboardHandler {
    modifiers: Modifiers,
    action_map: HashMap<KeyBinding, Action>,
}

impl KeyboardHandler {
    /// `action_map` must come from
    /// [`KeybindingsConfig::build_action_map`](crate::config::KeybindingsConfig::build_action_map).
    pub fn new(action_map: HashMap<KeyBinding, Action>) -> Self {
        Self {
            modifiers: Modifiers::new(),
            action_map,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Processes a key press; returns the action it triggers, if any.
    pub fn on_key_press(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Shift => self.modifiers.shift = true,
            Key::Ctrl => self.modifiers.ctrl = true,
            Key::Alt => self.modifiers.alt = true,
            _ => {
                let name = key.binding_name()?;
                return self.resolve(&name, self.modifiers);
            }
        }
        None
    }

    /// Processes a key release.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Looks up the action bound to `key` with the given modifiers.
    pub fn resolve(&self, key: &str, modifiers: Modifiers) -> Option<Action> {
        let binding = KeyBinding {
            key: key.to_lowercase(),
            ctrl: modifiers.ctrl,
            shift: modifiers.shift,
            alt: modifiers.alt,
        };
        let action = self.action_map.get(&binding).copied();
        if let Some(action) = action {
            debug!("Key chord {key:?} {modifiers:?} -> {action:?}");
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;

    fn handler() -> KeyboardHandler {
        KeyboardHandler::new(KeybindingsConfig::default().build_action_map().unwrap())
    }

    #[test]
    fn ctrl_z_and_ctrl_y_resolve_to_history_actions() {
        let mut keys = handler();
        keys.on_key_press(Key::Ctrl);
        assert_eq!(keys.on_key_press(Key::Char('z')), Some(Action::Undo));
        assert_eq!(keys.on_key_press(Key::Char('Y')), Some(Action::Redo));
    }

    #[test]
    fn plain_z_is_not_undo() {
        let mut keys = handler();
        assert_eq!(keys.on_key_press(Key::Char('z')), None);
    }

    #[test]
    fn releasing_modifier_restores_plain_bindings() {
        let mut keys = handler();
        keys.on_key_press(Key::Ctrl);
        keys.on_key_release(Key::Ctrl);
        assert_eq!(keys.on_key_press(Key::Char('x')), Some(Action::SelectEraser));
        assert_eq!(keys.on_key_press(Key::Char('p')), Some(Action::SelectPen));
        assert_eq!(keys.on_key_press(Key::Char('e')), Some(Action::ClearCanvas));
    }

    #[test]
    fn modifier_keys_never_trigger_actions() {
        let mut keys = handler();
        assert_eq!(keys.on_key_press(Key::Shift), None);
        assert_eq!(keys.on_key_press(Key::Unknown), None);
        assert!(keys.modifiers().shift);
    }
}
