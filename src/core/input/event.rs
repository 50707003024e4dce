//=========================================================================
// Input Event Types
//
// Host-neutral representation of pointer and keyboard input.
//
// Hosts (winit, a test harness, a browser bridge) translate their native
// events into `InputEvent` and hand them to `Game::handle_input`.
//
// Event Flow:
// ```text
// Host (winit / ManualHost)
//         ↓
//    InputEvent (this module)
//         ↓
//    Game::handle_input → Input snapshot + hit testing
//         ↓
//    Clickable hooks / mouse + key signals
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

impl MouseButton {
    /// Only the primary button drives `Input::is_mouse_primary_button_down`.
    pub fn is_primary(self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

//=== Key =================================================================

/// Canonical keyboard key identifier.
///
/// Built from a host key name by lowercasing it and stripping the
/// physical `Key` prefix, so `"KeyW"`, `"keyw"` and `"w"` are the same key.
/// Other names are only lowercased: `"ArrowUp"` → `"arrowup"`,
/// `"Space"` → `"space"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.strip_prefix("key") {
            Some(rest) if !rest.is_empty() => Self(rest.to_string()),
            _ => Self(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== InputEvent ==========================================================

/// Raw input delivered by a host.
///
/// Pointer coordinates are client pixels relative to the canvas origin.
/// Wheel deltas follow the host convention (positive `delta_y` scrolls
/// down); the game inverts Y when storing it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseMoved { x: f64, y: f64 },
    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },
    MouseClick { button: MouseButton },
    MouseWheel { delta_x: f64, delta_y: f64 },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

//=== InputDisposition ====================================================

/// Tells the host whether to run its native default action for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// Let the host handle the event normally.
    Default,

    /// Suppress the host's default action (page scrolling for the wheel).
    PreventDefault,
}

//=========================================================================
// Unit Tests
//=========================================================================
