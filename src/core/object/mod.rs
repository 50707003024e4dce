//=========================================================================
// Game Objects
//=========================================================================
//
// Entities driven by the game loop, expressed as one base trait plus
// optional capability traits.
//
// Architecture:
//   GameObject (required: core data, lifecycle hooks with defaults)
//     ├─ as_drawable()  → Drawable   (draw hook, visibility)
//     └─ as_clickable() → Clickable  (pointer hooks, raycast flags)
//
// The engine asks "does this object expose capability X" through the
// accessor methods instead of casting through a class hierarchy.
//
// Lifecycle:
//   constructed ─add─► live ─(start)─► update/fixed_update/draw ... ─destroy─► gone
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use crate::core::error::HookResult;

//=== Module Declarations =================================================

mod core;
mod events;
mod registry;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use self::core::{GameObjectId, Handle, ObjectCore};
pub use events::{DestroyEvent, DrawEvent, MouseEvent, SpawnEvent, TickEvent};
pub use registry::GameObjectRegistry;

//=== AsAny ===============================================================

/// Type-erasure helper implemented for every `'static` type.
///
/// Gives trait objects access to `Any` downcasting and to their concrete
/// type name.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Short concrete type name (module path stripped).
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<T>())
    }
}

/// Strips the module path from a fully qualified type name.
///
/// Generic parameters are kept as-is: `foo::Bar<baz::Qux>` → `Bar<baz::Qux>`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base_end = full.find('<').unwrap_or(full.len());
    match full[..base_end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

//=== GameObject ==========================================================

/// Base contract for everything a [`crate::Game`] can hold.
///
/// Only the core accessors are required. Every hook has an empty default
/// implementation, so an object overrides only what it needs.
///
/// ```rust
/// use gridcanvas_engine::prelude::*;
///
/// struct Spinner {
///     core: ObjectCore,
/// }
///
/// impl GameObject for Spinner {
///     fn core(&self) -> &ObjectCore { &self.core }
///     fn core_mut(&mut self) -> &mut ObjectCore { &mut self.core }
///
///     fn update(&mut self, event: &mut TickEvent<'_>) -> HookResult {
///         self.core.transform.rotate(180.0 * event.time.delta_time);
///         event.game.request_redraw();
///         Ok(())
///     }
/// }
/// ```
pub trait GameObject: AsAny {
    fn core(&self) -> &ObjectCore;
    fn core_mut(&mut self) -> &mut ObjectCore;

    //--- Lifecycle Hooks --------------------------------------------------

    /// Invoked once when the object is added to a game.
    fn start(&mut self, _event: &mut SpawnEvent<'_>) -> HookResult {
        Ok(())
    }

    /// Invoked once, before the object leaves the game.
    fn destroy(&mut self, _event: &mut DestroyEvent<'_>) -> HookResult {
        Ok(())
    }

    /// Invoked every tick while enabled.
    fn update(&mut self, _event: &mut TickEvent<'_>) -> HookResult {
        Ok(())
    }

    /// Invoked every tick after all `update` calls.
    ///
    /// Runs once per animation frame like `update`; it is a second pass,
    /// not a fixed-timestep step.
    fn fixed_update(&mut self, _event: &mut TickEvent<'_>) -> HookResult {
        Ok(())
    }

    //--- Capabilities -----------------------------------------------------

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        None
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        None
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        None
    }
}

impl<'a> dyn GameObject + 'a {
    pub fn id(&self) -> GameObjectId {
        self.core().id()
    }

    pub fn is_enabled(&self) -> bool {
        self.core().enabled
    }

    /// Downcasts to the concrete object type.
    pub fn downcast_ref<T: GameObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: GameObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Returns `true` if both objects are visible drawables and this
    /// object's origin lies inside `other`'s box.
    pub fn is_touching(&self, other: &dyn GameObject) -> bool {
        let visible = |o: &dyn GameObject| o.as_drawable().is_some_and(|d| d.visible());
        visible(self)
            && visible(other)
            && self.core().transform.is_touching(&other.core().transform)
    }
}

//=== Drawable ============================================================

/// Capability: the object paints itself during the draw pass.
pub trait Drawable {
    /// Invisible drawables are skipped by the draw pass.
    fn visible(&self) -> bool {
        true
    }

    fn draw(&mut self, event: &mut DrawEvent<'_>) -> HookResult;
}

//=== Clickable ===========================================================

/// Capability: the object takes part in pointer hit testing.
///
/// Only the single topmost hovered clickable receives pointer hooks.
pub trait Clickable {
    /// Draw the debug hitbox overlay after this object draws.
    fn show_hitbox(&self) -> bool {
        false
    }

    /// Exclude this object from hit testing.
    fn ignore_raycast(&self) -> bool {
        false
    }

    fn on_mouse_click(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        Ok(())
    }

    fn on_mouse_down(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        Ok(())
    }

    fn on_mouse_up(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        Ok(())
    }

    fn on_mouse_hover_start(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        Ok(())
    }

    fn on_mouse_hover_end(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::Stub;
    use crate::core::math::{Transform, Vector2};

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(short_type_name("a::b::Stub"), "Stub");
        assert_eq!(short_type_name("Stub"), "Stub");
        assert_eq!(short_type_name("a::Wrap<b::Inner>"), "Wrap<b::Inner>");
    }

    #[test]
    fn type_name_resolves_through_trait_object() {
        let stub = Stub::new();
        let object: &dyn GameObject = &stub;
        assert_eq!(object.type_name(), "Stub");
    }

    #[test]
    fn downcast_through_trait_object() {
        let mut stub = Stub::new();
        let id = stub.core().id();
        let object: &mut dyn GameObject = &mut stub;
        assert_eq!(object.id(), id);
        assert!(object.downcast_ref::<Stub>().is_some());
        assert!(object.downcast_mut::<Stub>().is_some());
    }

    #[test]
    fn touching_requires_both_visible() {
        let a = Stub::clickable()
            .with_transform(Transform::new(Vector2::new(0.5, 0.5), Vector2::ONE));
        let b = Stub::clickable();
        let hidden = Stub::clickable().hidden();
        let plain = Stub::new();

        let (a, b, hidden, plain): (&dyn GameObject, &dyn GameObject, &dyn GameObject, &dyn GameObject) =
            (&a, &b, &hidden, &plain);
        assert!(a.is_touching(b));
        assert!(!a.is_touching(hidden));
        assert!(!a.is_touching(plain));
    }
}
