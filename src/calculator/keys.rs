//! Button labels and their typed meaning.
//!
//! Every press reaches the engine as a label string. [`Key::from_label`]
//! classifies it by exact match; labels that match nothing become
//! [`Key::Other`] and are committed verbatim like an operator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 8x5 button grid, row-major, as laid out on the device.
pub const KEYPAD: [&str; 40] = [
    "MC", "MR", "M+", "M-", "⌫", //
    "√", "x²", "xʸ", "1/x", "C", //
    "sin", "cos", "tan", "(", ")", //
    "π", "e", "log", "ln", "/", //
    "7", "8", "9", "*", "%", //
    "4", "5", "6", "-", "deg", //
    "1", "2", "3", "+", "rad", //
    "0", ".", "±", "=", "AC",
];

/// Number of button columns in [`KEYPAD`].
pub const KEYPAD_COLUMNS: usize = 5;

/// How trigonometric arguments are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radians => f.write_str("rad"),
            Self::Degrees => f.write_str("deg"),
        }
    }
}

/// Symbolic constants that are entered as themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}

/// Functions that wrap the current input in a call-like notation.
///
/// `Group` is the bare parenthesis used both by the `(` key and by the
/// `x²` wrap, which renders as `(cur)^2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Group,
    Sqrt,
    Log,
    Ln,
    Sin,
    Cos,
    Tan,
    Reciprocal,
}

impl Function {
    /// Opening text shown on the display, including the parenthesis.
    pub fn display_open(self) -> &'static str {
        match self {
            Self::Group => "(",
            Self::Sqrt => "√(",
            Self::Log => "log(",
            Self::Ln => "ln(",
            Self::Sin => "sin(",
            Self::Cos => "cos(",
            Self::Tan => "tan(",
            Self::Reciprocal => "1/(",
        }
    }

    /// Opening text handed to the evaluator.
    ///
    /// Names outside fasteval's builtins are resolved by the evaluation
    /// namespace in [`super::evaluation`].
    pub fn evaluator_open(self, angle: AngleMode) -> &'static str {
        match (self, angle) {
            (Self::Group, _) => "(",
            (Self::Sqrt, _) => "sqrt(",
            (Self::Log, _) => "lg(",
            (Self::Ln, _) => "ln(",
            (Self::Reciprocal, _) => "1/(",
            (Self::Sin, AngleMode::Radians) => "sin(",
            (Self::Cos, AngleMode::Radians) => "cos(",
            (Self::Tan, AngleMode::Radians) => "tan(",
            (Self::Sin, AngleMode::Degrees) => "sindeg(",
            (Self::Cos, AngleMode::Degrees) => "cosdeg(",
            (Self::Tan, AngleMode::Degrees) => "tandeg(",
        }
    }
}

/// Binary operators committed to the expression line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }
}

/// A classified button press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    AllClear,
    Clear,
    Backspace,
    Digit(u8),
    Point,
    Negate,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    Angle(AngleMode),
    Constant(Constant),
    /// Unary keys that wrap the current input (`√`, `log`, `sin`, `1/x`, ...).
    Wrap(Function),
    /// `x²`, rendered as `(cur)^2`.
    Square,
    Operator(Operator),
    OpenParen,
    CloseParen,
    Equals,
    /// Any label with no dedicated meaning.
    Other(String),
}

impl Key {
    pub fn from_label(label: &str) -> Self {
        match label {
            "AC" => Self::AllClear,
            "C" => Self::Clear,
            "⌫" => Self::Backspace,
            "." => Self::Point,
            "±" => Self::Negate,
            "M+" => Self::MemoryAdd,
            "M-" => Self::MemorySubtract,
            "MR" => Self::MemoryRecall,
            "MC" => Self::MemoryClear,
            "deg" => Self::Angle(AngleMode::Degrees),
            "rad" => Self::Angle(AngleMode::Radians),
            "π" => Self::Constant(Constant::Pi),
            "e" => Self::Constant(Constant::E),
            "√" => Self::Wrap(Function::Sqrt),
            "log" => Self::Wrap(Function::Log),
            "ln" => Self::Wrap(Function::Ln),
            "sin" => Self::Wrap(Function::Sin),
            "cos" => Self::Wrap(Function::Cos),
            "tan" => Self::Wrap(Function::Tan),
            "1/x" => Self::Wrap(Function::Reciprocal),
            "x²" => Self::Square,
            "xʸ" => Self::Operator(Operator::Power),
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Subtract),
            "*" => Self::Operator(Operator::Multiply),
            "/" => Self::Operator(Operator::Divide),
            "%" => Self::Operator(Operator::Modulo),
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "=" => Self::Equals,
            _ => match label.as_bytes() {
                [d @ b'0'..=b'9'] => Self::Digit(d - b'0'),
                _ => Self::Other(label.to_string()),
            },
        }
    }

    /// Whether this key drives the calculator rather than entering text.
    /// Drivers style these buttons differently.
    pub fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::AllClear
                | Self::Clear
                | Self::Backspace
                | Self::MemoryAdd
                | Self::MemorySubtract
                | Self::MemoryRecall
                | Self::MemoryClear
        )
    }
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}
