//=========================================================================
// Platform Subsystem
//
// Hosts that drive a `Game`.
//
// Architecture:
// ```text
//  ManualHost (tests, headless):
//    host.run_frame(&mut game, ts) ──► Game::animation_frame(ts)
//
//  WinitPlatform (desktop, main thread):
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ├─ CursorMoved / MouseInput / MouseWheel   │
//  │   │  KeyboardInput                           │
//  │   │   ↓ InputProcessor                       │
//  │   │  Game::handle_input(InputEvent)          │
//  │   ├─ Focused ──► WindowHost focus flag       │
//  │   ├─ Resized ──► Game::rescale_canvas_…      │
//  │   └─ RedrawRequested                         │
//  │       ↓ (only if the game asked for a frame) │
//  │      Game::animation_frame(ms since launch)  │
//  │       ↓ Host::request_animation_frame        │
//  │      Window::request_redraw ─────────────────┼──► next RedrawRequested
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = animation frame**: one game frame per redraw the
//   game requested; spurious redraws (expose, resize) are not ticks
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so `WinitPlatform::run()` blocks the calling thread
// - **Synthesised clicks**: a primary-button release is followed by a
//   `MouseClick`, mirroring how browsers order pointer events
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;
mod manual_host;
mod window_host;

//=== External Crates =====================================================

use std::rc::Rc;
use std::time::Instant;

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::math::Vector2;
use crate::game::{Game, GameBuilder};
use input_processor::InputProcessor;
use window_host::WindowHost;

//=== Public API ==========================================================

pub use manual_host::ManualHost;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal: without an event loop the game cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=== WindowSettings ======================================================

/// Window configuration for [`WinitPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,

    /// Initial inner size in logical pixels.
    pub size: (u32, u32),

    /// Share of the window the canvas may cover.
    pub canvas_fraction: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Grid Canvas".to_string(),
            size: (800, 600),
            canvas_fraction: 1.0,
        }
    }
}

//=== WinitPlatform =======================================================

/// Desktop host: owns the window, the event loop handler and the game.
///
/// # Lifecycle
///
/// 1. **Construction**: `WinitPlatform::new(builder, settings)` builds the
///    game with a window-backed host
/// 2. **Setup**: `game_mut()` to add objects, declare resources and call
///    `load_game_and_start`
/// 3. **Execution**: `run()` blocks on the event loop until the window closes
///
/// This type is NOT Send/Sync; it must remain on the main thread.
pub struct WinitPlatform {
    game: Game,
    host: WindowHost,
    window: Option<Rc<Window>>,
    settings: WindowSettings,
    input_processor: InputProcessor,
    launched_at: Instant,
}

impl WinitPlatform {
    //--- Construction -----------------------------------------------------

    /// Builds the game from `builder`, replacing its host with the window.
    ///
    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(builder: GameBuilder, settings: WindowSettings) -> Self {
        let host = WindowHost::new();
        let game = builder.with_host(host.clone()).build();
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            game,
            host,
            window: None,
            settings,
            input_processor: InputProcessor::new(),
            launched_at: Instant::now(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop on the calling thread until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn timestamp_ms(&self) -> f64 {
        self.launched_at.elapsed().as_secs_f64() * 1000.0
    }

    fn forward(&mut self, event: InputEvent) {
        self.game.handle_input(event);
    }

    fn fit_canvas_to_window(&mut self, width: u32, height: u32) {
        let available = Vector2::new(f64::from(width), f64::from(height));
        let canvas = self
            .game
            .rescale_canvas_to_parent(available, self.settings.canvas_fraction);
        debug!(target: "platform", "Canvas fitted to {} inside {}", canvas, available);
    }

    fn on_redraw(&mut self) {
        if self.game.is_frame_requested() {
            let timestamp_ms = self.timestamp_ms();
            self.game.animation_frame(timestamp_ms);
        } else {
            trace!(target: "platform", "Redraw without a requested frame");
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WinitPlatform {
    /// Creates the window on startup (or mobile resume if it was lost).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.settings.size;
        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                let window = Rc::new(window);
                self.host.attach(Rc::clone(&window));
                self.fit_canvas_to_window(size.width, size.height);
                // Covers frames requested before the window existed.
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.game.stop_game_loop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.fit_canvas_to_window(size.width, size.height);
            }

            WindowEvent::Focused(focused) => {
                trace!(target: "platform", "Focus changed: {}", focused);
                self.host.set_focus(focused);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(position.x, position.y);
                self.forward(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.forward(event),
                    None => trace!(target: "platform", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                for event in self.input_processor.process_mouse_button(button, state) {
                    self.forward(event);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_mouse_wheel(delta);
                self.forward(event);
            }

            WindowEvent::RedrawRequested => {
                self.on_redraw();
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_creation_defers_the_window() {
        let platform = WinitPlatform::new(GameBuilder::new(), WindowSettings::default());
        assert!(platform.window.is_none(), "Window should be created lazily");
        assert!(!platform.host.is_attached());
    }

    #[test]
    fn frame_requests_before_the_window_are_kept_by_the_game() {
        let mut platform = WinitPlatform::new(GameBuilder::new(), WindowSettings::default());
        platform.game_mut().start_game_loop();
        assert!(platform.game().is_frame_requested());

        platform.on_redraw();
        assert!(platform.game().is_playing());
    }

    #[test]
    fn unfocused_window_still_runs_frames() {
        let mut platform = WinitPlatform::new(
            GameBuilder::new().with_refresh_when_unfocused(false),
            WindowSettings::default(),
        );
        platform.host.set_focus(false);
        assert!(!crate::core::host::Host::has_focus(&platform.host));
        platform.game_mut().start_game_loop();
        platform.on_redraw();
        assert!(platform.game().is_playing());
    }

    #[test]
    fn window_settings_defaults() {
        let settings = WindowSettings::default();
        assert_eq!(settings.size, (800, 600));
        assert_eq!(settings.canvas_fraction, 1.0);
    }
}
