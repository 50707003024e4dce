//=========================================================================
// Game Context
//=========================================================================
//
// Shared data handed to every hook and signal listener.
//
// Contains state that objects read and write during a tick:
// - input: pointer, key and scroll snapshot
// - signals: channel listeners
// - resources: declared assets and their load state
// - renderer: the drawing surface
// - needs_redraw: dirty flag consumed by the draw pass
// - commands: queued spawns and destroys
//
// The object registry is deliberately absent: `Game` owns it next to the
// context, which is what lets a hook borrow the context while the game
// walks the registry.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use image::RgbaImage;
use log::{error, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{panic_message, GameError};
use crate::core::input::Input;
use crate::core::math::Vector2;
use crate::core::object::{GameObject, GameObjectId, Handle};
use crate::core::render::Renderer;
use crate::core::resources::{Resource, ResourceKind, ResourceManager};
use crate::core::signals::{Channel, ListenerId, Signal, SignalBus};
use crate::core::time::FrameTime;
use crate::game::GameSettings;

//=== Module Declarations =================================================

mod command_queue;

pub(crate) use command_queue::{CommandQueue, GameCommand};

//=== GameContext =========================================================

pub struct GameContext {
    input: Input,
    signals: SignalBus,
    resources: ResourceManager,
    renderer: Box<dyn Renderer>,
    settings: GameSettings,
    needs_redraw: bool,
    playing: bool,
    time: FrameTime,
    pub(crate) commands: CommandQueue,
}

impl GameContext {
    pub(crate) fn new(settings: GameSettings, renderer: Box<dyn Renderer>, resources: ResourceManager) -> Self {
        let time = FrameTime {
            time_scale: settings.time_scale,
            ..FrameTime::default()
        };
        Self {
            input: Input::new(),
            signals: SignalBus::new(),
            resources,
            renderer,
            settings,
            needs_redraw: true,
            playing: false,
            time,
            commands: CommandQueue::default(),
        }
    }

    //--- Input ------------------------------------------------------------

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub(crate) fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    //--- Signals ----------------------------------------------------------

    pub fn signals(&self) -> &SignalBus {
        &self.signals
    }

    pub fn subscribe<F>(&mut self, channel: Channel, listener: F) -> ListenerId
    where
        F: FnMut(&Signal, &mut GameContext) + 'static,
    {
        self.signals.subscribe(channel, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.signals.unsubscribe(id)
    }

    /// Delivers `signal` synchronously to its channel's listeners.
    ///
    /// Listeners subscribed during the emission wait for the next one. A
    /// listener that re-enters itself through a nested emit is skipped for
    /// the nested call. A panicking listener is logged and the remaining
    /// listeners still run.
    pub fn emit(&mut self, signal: Signal) {
        for (id, listener) in self.signals.snapshot(&signal) {
            if !self.signals.is_subscribed(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut guard) => {
                    let callback = &mut **guard;
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(&signal, &mut *self)));
                    if let Err(payload) = outcome {
                        error!(
                            target: "game",
                            "listener {:?} panicked on {:?}: {}",
                            id,
                            signal.channel(),
                            panic_message(payload.as_ref())
                        );
                    }
                }
                Err(_) => {
                    warn!(target: "game", "listener {:?} re-entered on {:?}; skipped", id, signal.channel());
                }
            }
        }
    }

    //--- Resources --------------------------------------------------------

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Declares a resource and scans for pending loads.
    ///
    /// `kind` is a kind name such as `"image"`; unknown names are rejected
    /// without touching the declared set.
    pub fn load_resource(&mut self, kind: &str, key: &str, path: impl Into<PathBuf>) -> Result<(), GameError> {
        let kind: ResourceKind = kind.parse()?;
        self.declare_resource(kind, key, path);
        Ok(())
    }

    pub fn declare_resource(&mut self, kind: ResourceKind, key: &str, path: impl Into<PathBuf>) {
        if self.resources.declare(kind, key, path) {
            self.emit(Signal::LoadAllResources);
        }
    }

    /// Scans pending resources, emitting `LoadAllResources` if the latch fires.
    pub fn load_all_resources(&mut self) {
        if self.resources.scan() {
            self.emit(Signal::LoadAllResources);
        }
    }

    /// Applies finished loads, emitting `LoadAllResources` if the latch fires.
    pub fn poll_resources(&mut self) {
        if self.resources.drain() {
            self.emit(Signal::LoadAllResources);
        }
    }

    pub fn get_resource(&self, key: &str) -> Option<&Resource> {
        self.resources.get(key)
    }

    /// The decoded image for `key`; `None` when unknown, not an image, or
    /// not loaded.
    pub fn get_image(&self, key: &str) -> Option<&RgbaImage> {
        self.resources.get(key).and_then(Resource::image)
    }

    //--- Rendering --------------------------------------------------------

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Downcasts the renderer to its concrete backend.
    pub fn renderer_as<R: Renderer>(&self) -> Option<&R> {
        (*self.renderer).as_any().downcast_ref::<R>()
    }

    /// Marks the frame stale so the next tick draws.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub(crate) fn clear_redraw(&mut self) {
        self.needs_redraw = false;
    }

    //--- Settings & Time --------------------------------------------------

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn grid(&self) -> Vector2 {
        self.settings.grid
    }

    pub fn view_offset(&self) -> Vector2 {
        self.settings.view_offset
    }

    pub fn set_view_offset(&mut self, offset: Vector2) {
        self.settings.view_offset = offset;
    }

    pub fn time_scale(&self) -> f64 {
        self.settings.time_scale
    }

    /// Sets the delta-time multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.settings.time_scale = time_scale.max(0.0);
    }

    /// Timing of the most recent tick.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub(crate) fn set_time(&mut self, time: FrameTime) {
        self.time = time;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    //--- Structural Commands ----------------------------------------------

    /// Queues `object` to be added after the current phase.
    pub fn spawn<T: GameObject>(&mut self, object: T) -> Handle<T> {
        let id = object.core().id();
        self.commands.push(GameCommand::Spawn(Box::new(object)));
        Handle::new(id)
    }

    pub fn spawn_boxed(&mut self, object: Box<dyn GameObject>) -> GameObjectId {
        let id = object.core().id();
        self.commands.push(GameCommand::Spawn(object));
        id
    }

    /// Queues destruction of `id` after the current phase.
    pub fn destroy(&mut self, id: impl Into<GameObjectId>) {
        self.commands.push(GameCommand::Destroy(id.into()));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
