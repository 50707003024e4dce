//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use gridcanvas_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game
pub use crate::game::{Game, GameBuilder, GameSettings, StartHandle, StartStatus};

// Objects
pub use crate::core::object::{
    Clickable, DestroyEvent, DrawEvent, Drawable, GameObject, GameObjectId, Handle, MouseEvent, ObjectCore,
    SpawnEvent, TickEvent,
};
pub use crate::objects::{Shape, ShapeType, Sprite};

// Errors
pub use crate::core::error::{GameError, HookError, HookResult};

// Math and time
pub use crate::core::math::{Transform, Vector2};
pub use crate::core::time::FrameTime;

// Input
pub use crate::core::input::{Input, InputDisposition, InputEvent, Key, MouseButton};

// Signals
pub use crate::core::signals::{Channel, Signal};

// Rendering and resources
pub use crate::core::render::{DrawSettings, RecordingRenderer, Renderer};
pub use crate::core::resources::ResourceKind;

// Hosts
pub use crate::core::context::GameContext;
pub use crate::core::host::Host;
pub use crate::platform::{ManualHost, WindowSettings, WinitPlatform};
