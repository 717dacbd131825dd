//! Calculator module for button-driven expression entry.
//!
//! This module provides functionality to:
//! - Classify button labels into keys
//! - Record presses as entry tokens and track memory and angle mode
//! - Evaluate the entered expression using fasteval
//! - Split typed text into button labels

mod engine;
mod entry;
mod evaluation;
mod keys;
mod labels;

pub use engine::Engine;
pub use evaluation::{EvalError, format_result};
pub use keys::{AngleMode, Constant, Function, KEYPAD, KEYPAD_COLUMNS, Key, Operator};
pub use labels::split_labels;
