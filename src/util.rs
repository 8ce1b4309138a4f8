//! Color name helpers shared by the config layer and the status line.

use crate::draw::{Color, color::*};

/// Maps a case-insensitive color name to a predefined color.
///
/// Known names: red, green, blue, yellow, orange, pink, white, black.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Human-readable name for `color`, or "Custom" when it matches no predefined color.
///
/// Channels are compared with a 0.1 tolerance; alpha is ignored.
pub fn color_to_name(color: &Color) -> &'static str {
    const NAMED: [(&str, Color); 8] = [
        ("Red", RED),
        ("Green", GREEN),
        ("Blue", BLUE),
        ("Yellow", YELLOW),
        ("Orange", ORANGE),
        ("Pink", PINK),
        ("White", WHITE),
        ("Black", BLACK),
    ];

    NAMED
        .iter()
        .find(|(_, named)| {
            (named.r - color.r).abs() < 0.1
                && (named.g - color.g).abs() < 0.1
                && (named.b - color.b).abs() < 0.1
        })
        .map_or("Custom", |(name, _)| *name)
}
