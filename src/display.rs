//! Display snapshot handed to drivers after each press.

use serde::Serialize;
use std::fmt;

/// Sentinel shown on the result line when evaluation fails.
pub const ERROR_TEXT: &str = "Error";

/// The two display lines of the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayStrings {
    /// The operand being typed, or the last result. Never empty.
    pub result: String,
    /// Committed operands and operators, or the last evaluated result.
    pub expression: String,
}

impl DisplayStrings {
    /// Check if the result line shows the error sentinel.
    pub fn is_error(&self) -> bool {
        self.result == ERROR_TEXT
    }

    /// Render as a JSON object for machine consumption.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Expression line above the result line, as on the device.
impl fmt::Display for DisplayStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.expression)?;
        write!(f, "{}", self.result)
    }
}

impl From<DisplayStrings> for (String, String) {
    fn from(strings: DisplayStrings) -> Self {
        (strings.result, strings.expression)
    }
}
