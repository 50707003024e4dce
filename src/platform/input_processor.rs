//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → Game::handle_input
//
// Keys are named after their physical code ("KeyA", "ArrowUp", "Space"),
// which `Key` then normalises. A primary-button release additionally
// produces a `MouseClick`, so the game sees down, up, click in order.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta},
    keyboard::PhysicalKey,
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, Key, MouseButton};

//=== Constants ===========================================================

/// Pixels per wheel notch for line-based scroll deltas.
pub(crate) const LINE_DELTA_PX: f64 = 100.0;

//=== InputProcessor ======================================================

/// Stateless Winit → engine event conversion.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a key event; keys without a physical code are dropped.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => Key::new(&format!("{:?}", code)),
            PhysicalKey::Unidentified(_) => return None,
        };
        Some(self.create_key_input_event(key, key_event.state))
    }

    /// Converts a button event. A released primary button also yields a click.
    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> Vec<InputEvent> {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => vec![InputEvent::MouseButtonDown { button }],
            ElementState::Released if button.is_primary() => vec![
                InputEvent::MouseButtonUp { button },
                InputEvent::MouseClick { button },
            ],
            ElementState::Released => vec![InputEvent::MouseButtonUp { button }],
        }
    }

    /// Cursor position in window pixels.
    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    /// Converts a wheel delta to the host convention (positive Y scrolls
    /// down, in pixels).
    pub(crate) fn process_mouse_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let (delta_x, delta_y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (f64::from(x) * LINE_DELTA_PX, -f64::from(y) * LINE_DELTA_PX),
            MouseScrollDelta::PixelDelta(position) => (position.x, -position.y),
        };
        InputEvent::MouseWheel { delta_x, delta_y }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: Key, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
