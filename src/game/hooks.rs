//=========================================================================
// Hook Isolation
//=========================================================================
//
// Failure boundary around every game object hook.
//
// A hook that returns an error or panics is logged with the hook name,
// the object's type and its id; the caller simply moves on to the next
// object.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::panic::{self, AssertUnwindSafe};

use log::error;

//=== Internal Dependencies ===============================================

use crate::core::error::{panic_message, HookError, HookResult};
use crate::core::object::{AsAny, Clickable, GameObject, MouseEvent};

//=== Guarded Calls =======================================================

/// Runs `call` on `object`, containing errors and panics.
///
/// Returns `true` if the hook completed successfully.
pub(crate) fn guarded<F>(hook: &str, object: &mut dyn GameObject, call: F) -> bool
where
    F: FnOnce(&mut dyn GameObject) -> HookResult,
{
    let type_name = AsAny::type_name(&*object);
    let id = object.id();

    let failure = match panic::catch_unwind(AssertUnwindSafe(|| call(object))) {
        Ok(Ok(())) => return true,
        Ok(Err(err)) => err,
        Err(payload) => HookError::Panicked(panic_message(payload.as_ref())),
    };

    error!(
        target: "game::loop",
        "Problem with executing {} @ {} [{}]: {}",
        hook,
        type_name,
        id,
        failure
    );
    false
}

//=== PointerHook =========================================================

/// The `Clickable` hooks the input router can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointerHook {
    Click,
    Down,
    Up,
    HoverStart,
    HoverEnd,
}

impl PointerHook {
    pub(crate) fn name(self) -> &'static str {
        match self {
            PointerHook::Click => "on_mouse_click",
            PointerHook::Down => "on_mouse_down",
            PointerHook::Up => "on_mouse_up",
            PointerHook::HoverStart => "on_mouse_hover_start",
            PointerHook::HoverEnd => "on_mouse_hover_end",
        }
    }

    pub(crate) fn invoke(self, target: &mut dyn Clickable, event: &mut MouseEvent<'_>) -> HookResult {
        match self {
            PointerHook::Click => target.on_mouse_click(event),
            PointerHook::Down => target.on_mouse_down(event),
            PointerHook::Up => target.on_mouse_up(event),
            PointerHook::HoverStart => target.on_mouse_hover_start(event),
            PointerHook::HoverEnd => target.on_mouse_hover_end(event),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::test_support::Stub;

    #[test]
    fn success_passes_through() {
        let mut stub = Stub::new();
        assert!(guarded("update", &mut stub, |_| Ok(())));
    }

    #[test]
    fn returned_errors_are_contained() {
        let mut stub = Stub::new();
        assert!(!guarded("update", &mut stub, |_| Err(HookError::msg("nope"))));
    }

    #[test]
    fn panics_are_contained() {
        let mut stub = Stub::new();
        let completed = guarded("update", &mut stub, |_| -> HookResult { panic!("kaboom") });
        assert!(!completed);
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload = panic::catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload = panic::catch_unwind(|| panic!("formatted {}", 7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 7");
    }
}
