//! Driver-side plumbing between pointer input and the engine.
//!
//! A driver resolves which button (if any) lies under the pointer and
//! reports it here. [`PressTracker`] turns that stream into logical presses:
//! a held press counts once, and dragging across the keypad presses each
//! newly entered button.

use crate::calculator::{Engine, Key};
use crate::display::DisplayStrings;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// Tracks which button is held so pointer events yield one press each.
#[derive(Clone, Debug, Default)]
pub struct PressTracker {
    pointer_down: bool,
    pressed: Option<String>,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the button currently held down.
    pub fn pressed(&self) -> Option<&str> {
        self.pressed.as_deref()
    }

    /// Pointer went down over `hit`. Returns the label to submit, if any.
    pub fn pointer_down(&mut self, hit: Option<&str>) -> Option<String> {
        self.pointer_down = true;
        self.pointer_move(hit)
    }

    /// Pointer moved over `hit`. Returns the label to submit, if any.
    pub fn pointer_move(&mut self, hit: Option<&str>) -> Option<String> {
        if !self.pointer_down {
            return None;
        }
        let label = hit?;
        if self.pressed.as_deref() == Some(label) {
            return None;
        }

        trace!(%label, "button pressed");
        self.pressed = Some(label.to_string());
        Some(label.to_string())
    }

    /// Pointer lifted or left the surface. Returns the released label.
    pub fn pointer_up(&mut self) -> Option<String> {
        self.pointer_down = false;
        self.pressed.take()
    }

    /// Whether the held button should be drawn as a command key.
    pub fn pressed_is_command(&self) -> bool {
        self.pressed
            .as_deref()
            .is_some_and(|label| Key::from_label(label).is_command())
    }
}

/// An engine handle that can be shared between threads.
///
/// Every press takes the lock for the whole read-modify-write, so rapid
/// presses from several threads apply one after another.
#[derive(Clone, Debug, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Submit a label and return the display it produced.
    pub fn submit(&self, label: &str) -> DisplayStrings {
        let mut engine = self.lock();
        engine.submit(label);
        engine.display_strings()
    }

    pub fn display_strings(&self) -> DisplayStrings {
        self.lock().display_strings()
    }

    /// Recovers a poisoned lock. The engine never holds a half-applied press.
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
