//=========================================================================
// Core Systems
//
// Host-neutral building blocks the `Game` orchestrator is made of.
//
// Layers (leaves first):
// ```text
//   math ─► object ─► input (hit testing)
//     │        │
//     │        └─► signals ─► context ◄─ resources, render, time
//     │
//     └─► render
//   host: platform capability injected into the game
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod error;
pub mod host;
pub mod input;
pub mod math;
pub mod object;
pub mod render;
pub mod resources;
pub mod signals;
pub mod time;
