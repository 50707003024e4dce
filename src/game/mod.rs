//=========================================================================
// Game
//
// The orchestrator: owns the live objects, the shared context, the host
// and the frame scheduler state.
//
// Architecture:
// ```text
//   Host ──animation_frame(ts)──► Game ──tick──► update / fixed_update / draw hooks
//   Host ──handle_input(event)──► Game ──hit test──► Clickable hooks
//                                  │
//                                  ├─ objects: GameObjectRegistry (sorted, unique ids)
//                                  └─ context: GameContext (input, signals, resources,
//                                              renderer, dirty flag, queued commands)
// ```
//
// Hooks receive `&mut GameContext` while the game walks the registry;
// spawns and destroys they request are applied after the current phase.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::RgbaImage;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::context::{GameCommand, GameContext};
use crate::core::error::GameError;
use crate::core::host::Host;
use crate::core::input::Input;
use crate::core::math::Vector2;
use crate::core::object::GameObjectId;
use crate::core::render::{fit_canvas, Renderer};
use crate::core::resources::{Resource, ResourceKind, ResourceLoader, ResourceManager};
use crate::core::signals::{Channel, ListenerId, Signal};
use crate::core::time::Clock;

//=== Module Declarations =================================================

mod builder;
mod hooks;
mod input_routing;
mod objects;
mod scheduler;
mod startup;

//=== Public API ==========================================================

pub use builder::{GameBuilder, GameSettings};
pub use startup::{StartHandle, StartStatus};

use scheduler::LoopPhase;
use startup::PendingStart;

//=== Game ================================================================

/// A running (or not yet started) game.
///
/// Create one through [`GameBuilder`].
pub struct Game {
    context: GameContext,
    objects: crate::core::object::GameObjectRegistry,
    host: Box<dyn Host>,

    //--- Scheduler --------------------------------------------------------
    clock: Clock,
    phase: LoopPhase,
    frame_requested: bool,

    //--- Input Routing ----------------------------------------------------
    hovered: Option<GameObjectId>,

    //--- Startup ----------------------------------------------------------
    pending_start: Option<PendingStart>,
}

impl Game {
    pub(crate) fn from_parts(
        settings: GameSettings,
        renderer: Box<dyn Renderer>,
        host: Box<dyn Host>,
        loader: Box<dyn ResourceLoader>,
    ) -> Self {
        Self {
            context: GameContext::new(settings, renderer, ResourceManager::new(loader)),
            objects: crate::core::object::GameObjectRegistry::new(),
            host,
            clock: Clock::new(),
            phase: LoopPhase::Idle,
            frame_requested: false,
            hovered: None,
            pending_start: None,
        }
    }

    //--- Shared Context ---------------------------------------------------

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Mutable access for setup code outside of hooks.
    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }

    pub fn settings(&self) -> &GameSettings {
        self.context.settings()
    }

    pub fn grid(&self) -> Vector2 {
        self.context.grid()
    }

    pub fn input(&self) -> &Input {
        self.context.input()
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.context.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.context.renderer_mut()
    }

    /// Marks the frame stale so the next tick draws.
    pub fn request_redraw(&mut self) {
        self.context.request_redraw();
    }

    /// Fits the canvas into `fraction` of the `available` parent size.
    ///
    /// The grid scale becomes the largest whole number of pixels per cell
    /// that fits; returns the new canvas size in pixels.
    pub fn rescale_canvas_to_parent(&mut self, available: Vector2, fraction: f64) -> Vector2 {
        let (grid_scale, canvas_size) = fit_canvas(self.grid(), available, fraction);
        self.context.renderer_mut().set_canvas(grid_scale, canvas_size);
        self.context.request_redraw();
        canvas_size
    }

    //--- Signals ----------------------------------------------------------

    pub fn subscribe<F>(&mut self, channel: Channel, listener: F) -> ListenerId
    where
        F: FnMut(&Signal, &mut GameContext) + 'static,
    {
        self.context.subscribe(channel, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.context.unsubscribe(id)
    }

    pub fn emit(&mut self, signal: Signal) {
        self.context.emit(signal);
        self.apply_commands();
    }

    //--- Time -------------------------------------------------------------

    pub fn time_scale(&self) -> f64 {
        self.context.time_scale()
    }

    /// Negative values clamp to 0.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.context.set_time_scale(time_scale);
    }

    /// Cumulative real seconds over all ticks.
    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Cumulative scaled seconds over all ticks.
    pub fn scaled_elapsed_time(&self) -> f64 {
        self.clock.scaled_elapsed()
    }

    //--- Resources --------------------------------------------------------

    /// Declares a resource by kind name (`"image"`).
    pub fn load_resource(&mut self, kind: &str, key: &str, path: &str) -> Result<(), GameError> {
        self.context.load_resource(kind, key, path)?;
        self.resolve_pending_start();
        Ok(())
    }

    pub fn declare_resource(&mut self, kind: ResourceKind, key: &str, path: &str) {
        self.context.declare_resource(kind, key, path);
        self.resolve_pending_start();
    }

    /// Applies finished loads; completes a waiting start once all settle.
    pub fn poll_resources(&mut self) {
        self.context.poll_resources();
        self.apply_commands();
        self.resolve_pending_start();
    }

    pub fn get_resource(&self, key: &str) -> Option<&Resource> {
        self.context.get_resource(key)
    }

    pub fn get_image(&self, key: &str) -> Option<&RgbaImage> {
        self.context.get_image(key)
    }

    //--- Deferred Commands ------------------------------------------------

    /// Applies spawns and destroys queued by hooks, including the ones
    /// those spawns and destroys queue in turn.
    fn apply_commands(&mut self) {
        while !self.context.commands.is_empty() {
            for command in self.context.commands.take() {
                match command {
                    GameCommand::Spawn(object) => {
                        if let Err(err) = self.insert_object(object) {
                            warn!(target: "game::registry", "queued spawn rejected: {}", err);
                        }
                    }
                    GameCommand::Destroy(id) => {
                        self.remove_object(id);
                    }
                }
            }
        }
    }
}
