//=========================================================================
// Input Snapshot
//
// Pointer, key and scroll state as seen by game objects and signal
// listeners.
//
// Pointer position is kept in three spaces:
//   client: raw pixels relative to the canvas origin
//   local:  client / grid_scale
//   world:  local + view offset
// with precise (fractional) and floored variants of world and local.
//
// Key sets and the scroll delta are frame-local: the game clears them at
// the end of every tick's update phase.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use super::event::Key;
use crate::core::math::Vector2;

//=== Input ===============================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    mouse_client_position: Vector2,
    mouse_world_position: Vector2,
    mouse_precise_world_position: Vector2,
    mouse_local_position: Vector2,
    mouse_precise_local_position: Vector2,
    is_mouse_primary_button_down: bool,

    //--- Frame Deltas (cleared each tick) --------------------------------
    mouse_scroll_delta: Vector2,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Pointer Queries --------------------------------------------------

    pub fn mouse_client_position(&self) -> Vector2 {
        self.mouse_client_position
    }

    /// World position floored to whole grid cells.
    pub fn mouse_world_position(&self) -> Vector2 {
        self.mouse_world_position
    }

    pub fn mouse_precise_world_position(&self) -> Vector2 {
        self.mouse_precise_world_position
    }

    /// Visible-grid position floored to whole cells (view offset ignored).
    pub fn mouse_local_position(&self) -> Vector2 {
        self.mouse_local_position
    }

    pub fn mouse_precise_local_position(&self) -> Vector2 {
        self.mouse_precise_local_position
    }

    pub fn is_mouse_primary_button_down(&self) -> bool {
        self.is_mouse_primary_button_down
    }

    /// Wheel movement accumulated this frame, Y positive when scrolling up.
    pub fn mouse_scroll_delta(&self) -> Vector2 {
        self.mouse_scroll_delta
    }

    //--- Key Queries ------------------------------------------------------

    /// `true` if `key` went down this frame. Accepts any spelling `Key` accepts.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys_pressed.contains(&Key::new(key))
    }

    /// `true` if `key` went up this frame.
    pub fn is_key_released(&self, key: &str) -> bool {
        self.keys_released.contains(&Key::new(key))
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &Key> {
        self.keys_pressed.iter()
    }

    pub fn keys_released(&self) -> impl Iterator<Item = &Key> {
        self.keys_released.iter()
    }

    pub fn has_key_presses(&self) -> bool {
        !self.keys_pressed.is_empty()
    }

    pub fn has_key_releases(&self) -> bool {
        !self.keys_released.is_empty()
    }

    //--- Mutation (game only) ---------------------------------------------

    /// Stores a pointer position given in client pixels.
    ///
    /// A non-positive `grid_scale` (renderer not sized yet) is treated as 1.
    pub(crate) fn set_mouse_position(&mut self, client: Vector2, grid_scale: f64, view_offset: Vector2) {
        let scale = if grid_scale > 0.0 { grid_scale } else { 1.0 };
        let local = client / scale;
        let world = local + view_offset;

        self.mouse_client_position = client;
        self.mouse_precise_local_position = local;
        self.mouse_local_position = local.floor();
        self.mouse_precise_world_position = world;
        self.mouse_world_position = world.floor();
    }

    pub(crate) fn set_primary_button(&mut self, down: bool) {
        self.is_mouse_primary_button_down = down;
    }

    /// Adds a host wheel delta, inverting Y so scrolling up is positive.
    pub(crate) fn add_scroll(&mut self, delta_x: f64, delta_y: f64) {
        self.mouse_scroll_delta += Vector2::new(delta_x, -delta_y);
    }

    pub(crate) fn press_key(&mut self, key: Key) {
        self.keys_pressed.insert(key);
    }

    pub(crate) fn release_key(&mut self, key: Key) {
        self.keys_released.insert(key);
    }

    /// Clears the frame-local key sets and scroll delta.
    pub(crate) fn clear_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_scroll_delta = Vector2::ZERO;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_spaces_are_derived_from_client_pixels() {
        let mut input = Input::new();
        input.set_mouse_position(Vector2::new(150.0, 250.0), 100.0, Vector2::new(2.0, 0.0));

        assert_eq!(input.mouse_client_position(), Vector2::new(150.0, 250.0));
        assert_eq!(input.mouse_precise_local_position(), Vector2::new(1.5, 2.5));
        assert_eq!(input.mouse_local_position(), Vector2::new(1.0, 2.0));
        assert_eq!(input.mouse_precise_world_position(), Vector2::new(3.5, 2.5));
        assert_eq!(input.mouse_world_position(), Vector2::new(3.0, 2.0));
    }

    #[test]
    fn unsized_renderer_does_not_divide_by_zero() {
        let mut input = Input::new();
        input.set_mouse_position(Vector2::new(3.0, 4.0), 0.0, Vector2::ZERO);
        assert_eq!(input.mouse_precise_world_position(), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn scroll_inverts_y_and_accumulates() {
        let mut input = Input::new();
        input.add_scroll(1.0, 10.0);
        input.add_scroll(0.0, 5.0);
        assert_eq!(input.mouse_scroll_delta(), Vector2::new(1.0, -15.0));
    }

    #[test]
    fn frame_clear_keeps_pointer_state() {
        let mut input = Input::new();
        input.press_key(Key::new("KeyA"));
        input.release_key(Key::new("KeyB"));
        input.add_scroll(0.0, 1.0);
        input.set_primary_button(true);

        assert!(input.is_key_pressed("a"));
        assert!(input.is_key_released("KeyB"));

        input.clear_frame();
        assert!(!input.has_key_presses());
        assert!(!input.has_key_releases());
        assert!(!input.mouse_scroll_delta().is_non_zero());
        assert!(input.is_mouse_primary_button_down());
    }
}
