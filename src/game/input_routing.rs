//=========================================================================
// Input Routing
//=========================================================================
//
// Applies host input events to the input snapshot and routes pointer
// events to the topmost eligible object.
//
// Routing:
// ```text
//   MouseMoved        → snapshot (client, world, local) → MouseMove signal
//   MouseButtonDown   → primary flag → hovered.on_mouse_down → MouseDown signal
//   MouseButtonUp     → primary flag → hovered.on_mouse_up   → MouseUp signal
//   MouseClick        → hovered.on_mouse_click               → MouseClick signal
//   MouseWheel        → scroll delta (consumed by the next tick)
//   KeyDown / KeyUp   → frame-local key sets (consumed by the next tick)
// ```
//
// Clicks reach the single topmost hovered object only; overlapped
// objects underneath never see them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::hooks::{guarded, PointerHook};
use super::Game;
use crate::core::input::{hovered_object, Input, InputDisposition, InputEvent, MouseButton};
use crate::core::math::Vector2;
use crate::core::object::{GameObjectId, MouseEvent};
use crate::core::signals::Signal;

impl Game {
    /// Applies one host input event.
    ///
    /// Returns `PreventDefault` for events whose native host behavior
    /// (page scrolling) should be suppressed.
    pub fn handle_input(&mut self, event: InputEvent) -> InputDisposition {
        trace!(target: "game::input", "{:?}", event);

        let disposition = match event {
            InputEvent::MouseMoved { x, y } => {
                let grid_scale = self.context.renderer().grid_scale();
                let view_offset = self.context.view_offset();
                self.context
                    .input_mut()
                    .set_mouse_position(Vector2::new(x, y), grid_scale, view_offset);
                self.emit_input_snapshot(Signal::MouseMove);
                InputDisposition::Default
            }
            InputEvent::MouseButtonDown { button } => {
                if button.is_primary() {
                    self.context.input_mut().set_primary_button(true);
                }
                self.dispatch_to_hovered(PointerHook::Down, button);
                self.emit_input_snapshot(Signal::MouseDown);
                InputDisposition::Default
            }
            InputEvent::MouseButtonUp { button } => {
                if button.is_primary() {
                    self.context.input_mut().set_primary_button(false);
                }
                self.dispatch_to_hovered(PointerHook::Up, button);
                self.emit_input_snapshot(Signal::MouseUp);
                InputDisposition::Default
            }
            InputEvent::MouseClick { button } => {
                self.dispatch_to_hovered(PointerHook::Click, button);
                self.emit_input_snapshot(Signal::MouseClick);
                InputDisposition::Default
            }
            InputEvent::MouseWheel { delta_x, delta_y } => {
                self.context.input_mut().add_scroll(delta_x, delta_y);
                InputDisposition::PreventDefault
            }
            InputEvent::KeyDown { key } => {
                self.context.input_mut().press_key(key);
                InputDisposition::Default
            }
            InputEvent::KeyUp { key } => {
                self.context.input_mut().release_key(key);
                InputDisposition::Default
            }
        };

        self.apply_commands();
        disposition
    }

    /// Fresh hit test at the current pointer position.
    pub fn mouse_hovered_game_object(&self) -> Option<GameObjectId> {
        hovered_object(&self.objects, self.context.input().mouse_precise_world_position())
    }

    /// The hovered object as of the last tick's edge detection.
    pub fn hovered_game_object_id(&self) -> Option<GameObjectId> {
        self.hovered
    }

    //--- Dispatch ---------------------------------------------------------

    fn dispatch_to_hovered(&mut self, hook: PointerHook, button: MouseButton) {
        if let Some(id) = self.mouse_hovered_game_object() {
            self.dispatch_pointer(id, hook, Some(button));
        }
    }

    /// Invokes a pointer hook on a clickable object inside the failure boundary.
    pub(super) fn dispatch_pointer(&mut self, id: GameObjectId, hook: PointerHook, button: Option<MouseButton>) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        if object.as_clickable().is_none() {
            return;
        }

        let context = &mut self.context;
        guarded(hook.name(), object, |object| match object.as_clickable_mut() {
            Some(target) => hook.invoke(target, &mut MouseEvent { game: context, button }),
            None => Ok(()),
        });
    }

    /// Emits a pointer signal carrying a copy of the current snapshot.
    fn emit_input_snapshot(&mut self, signal: fn(Input) -> Signal) {
        let snapshot = self.context.input().clone();
        self.context.emit(signal(snapshot));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
