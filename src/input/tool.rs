//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pointer movement is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing: points extend the current stroke.
    #[default]
    Pen,
    /// Removes the first stroke near the pointer.
    Eraser,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pen => f.write_str("pen"),
            Tool::Eraser => f.write_str("eraser"),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            other => Err(format!("Unknown tool '{other}' (expected 'pen' or 'eraser')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_names() {
        assert_eq!("pen".parse::<Tool>(), Ok(Tool::Pen));
        assert_eq!(" Eraser ".parse::<Tool>(), Ok(Tool::Eraser));
        assert!("brush".parse::<Tool>().is_err());
        assert_eq!(Tool::Eraser.to_string(), "eraser");
    }
}
