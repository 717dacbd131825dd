//! Button-driven scientific calculator.
//!
//! The [`calculator::Engine`] takes one button label per press and exposes
//! the two display lines. Drivers translate their own input into labels;
//! [`keypad`] holds the pieces shared by pointer-driven drivers.

pub mod calculator;
pub mod config;
pub mod display;
pub mod keypad;

pub use calculator::{AngleMode, Engine};
pub use display::DisplayStrings;
