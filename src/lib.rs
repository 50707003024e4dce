//=========================================================================
// Grid Canvas Engine — Library Root
//
// A 2D game-object engine on a grid-scaled drawing surface.
//
// Responsibilities:
// - Expose the `Game` orchestrator and its `GameBuilder`
// - Define the object model (`GameObject`, `Drawable`, `Clickable`)
// - Provide hosts: `ManualHost` for tests and headless runs,
//   `WinitPlatform` for a desktop window
//
// Typical usage:
// ```no_run
// use gridcanvas_engine::prelude::*;
//
// let mut game = GameBuilder::new().build();
// game.add_game_object(Shape::rect(Transform::default())).unwrap();
// game.load_game_and_start(|_| {});
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the host-neutral systems (objects, input, signals,
// resources, rendering seam). `game` is the orchestrator built on them.
//
pub mod core;
pub mod game;
pub mod objects;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use game::{Game, GameBuilder, GameSettings, StartHandle, StartStatus};
