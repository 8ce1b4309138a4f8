//! Keyboard modifier state tracking.

/// Which modifier keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Creates a state with all modifiers released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the given modifiers held.
    pub fn with(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }
}
