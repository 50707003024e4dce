//=========================================================================
// Hook Events
//=========================================================================
//
// Arguments handed to game object hooks. Every event borrows the shared
// `GameContext`; the registry itself is never reachable from a hook, so
// structural changes go through `GameContext::spawn` / `destroy`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::input::MouseButton;
use crate::core::object::GameObjectId;
use crate::core::render::Renderer;
use crate::core::time::FrameTime;

//=== SpawnEvent ==========================================================

/// Passed to `GameObject::start` right after the object became live.
pub struct SpawnEvent<'a> {
    pub game: &'a mut GameContext,
    pub game_object_id: GameObjectId,
}

//=== DestroyEvent ========================================================

/// Passed to `GameObject::destroy` right before the object is removed.
pub struct DestroyEvent<'a> {
    pub game: &'a mut GameContext,
    pub game_object_id: GameObjectId,
}

//=== TickEvent ===========================================================

/// Passed to `update` and `fixed_update` once per tick.
pub struct TickEvent<'a> {
    pub game: &'a mut GameContext,
    pub time: FrameTime,
}

//=== DrawEvent ===========================================================

/// Passed to `Drawable::draw` during the draw pass.
pub struct DrawEvent<'a> {
    pub game: &'a mut GameContext,
}

impl DrawEvent<'_> {
    /// Shortcut to the active renderer.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.game.renderer_mut()
    }
}

//=== MouseEvent ==========================================================

/// Passed to `Clickable` hooks.
///
/// `button` is `None` for hover edges.
pub struct MouseEvent<'a> {
    pub game: &'a mut GameContext,
    pub button: Option<MouseButton>,
}
