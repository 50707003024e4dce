//=========================================================================
// Math
//=========================================================================
//
// Grid-space vector and transform utilities consumed by game objects,
// hit testing and the renderer.
//
//=========================================================================

//=== Module Declarations =================================================

mod transform;
mod vector2;

//=== Public API ==========================================================

pub use transform::{clamp, is_in_range, Transform};
pub use vector2::Vector2;
