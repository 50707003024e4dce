//=========================================================================
// Input
//
// Host-neutral input events, the per-game input snapshot, and pointer
// hit testing.
//
// Responsibilities:
// - Represent pointer and keyboard input independently of the host
// - Normalize key names into a canonical lowercase form
// - Keep the pointer position in client, local and world space
// - Resolve the topmost clickable object under the pointer
//
// Notes:
// Routing (which hook fires, which signal is emitted) lives in
// `Game::handle_input`; this module only holds state and pure queries.
//
//=========================================================================

//=== Submodules ==========================================================

mod event;
mod hit_test;
mod input_state;

//=== Public API ==========================================================

pub use event::{InputDisposition, InputEvent, Key, MouseButton};
pub use hit_test::{accepts_pointer, hovered_object};
pub use input_state::Input;
