//=========================================================================
// Built-in Objects
//=========================================================================
//
// Ready-made game objects built on the public object traits.
//
//=========================================================================

mod shape;
mod sprite;

pub use shape::{Shape, ShapeType};
pub use sprite::Sprite;
