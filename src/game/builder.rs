//=========================================================================
// Game Builder
//
// Configuration for constructing a `Game`.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──start()/load_game_and_start()──>  [frames]
//         │
//         ├─ with_grid() / with_view_offset()
//         ├─ with_draw_always() / with_refresh_when_unfocused()
//         ├─ with_time_scale()
//         └─ with_renderer() / with_host() / with_loader()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::Game;
use crate::core::host::Host;
use crate::core::math::Vector2;
use crate::core::render::{RecordingRenderer, Renderer};
use crate::core::resources::{ImageLoader, ResourceLoader};
use crate::platform::ManualHost;

//=== GameSettings ========================================================

/// Plain game configuration.
///
/// # Default Values
///
/// - **grid**: 4 × 3 cells
/// - **refresh_when_unfocused**: true
/// - **draw_always**: true
/// - **time_scale**: 1.0
/// - **view_offset**: (0, 0)
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    /// World size in grid cells.
    pub grid: Vector2,

    /// When false, the draw pass is skipped while the host has no focus.
    pub refresh_when_unfocused: bool,

    /// Draw every tick, not only when the dirty flag is set.
    pub draw_always: bool,

    /// Multiplier for per-tick delta time. Never negative.
    pub time_scale: f64,

    /// Camera offset added to world-space pointer coordinates.
    pub view_offset: Vector2,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: Vector2::new(4.0, 3.0),
            refresh_when_unfocused: true,
            draw_always: true,
            time_scale: 1.0,
            view_offset: Vector2::ZERO,
        }
    }
}

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// Defaults to a headless setup: a [`RecordingRenderer`], a [`ManualHost`]
/// and the threaded [`ImageLoader`].
///
/// ```
/// use gridcanvas_engine::prelude::*;
///
/// let host = ManualHost::new();
/// let game = GameBuilder::new()
///     .with_grid(Vector2::new(16.0, 9.0))
///     .with_draw_always(false)
///     .with_host(host.clone())
///     .build();
///
/// assert_eq!(game.grid(), Vector2::new(16.0, 9.0));
/// ```
pub struct GameBuilder {
    settings: GameSettings,
    renderer: Option<Box<dyn Renderer>>,
    host: Option<Box<dyn Host>>,
    loader: Option<Box<dyn ResourceLoader>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            settings: GameSettings::default(),
            renderer: None,
            host: None,
            loader: None,
        }
    }

    /// Replaces every setting at once.
    ///
    /// # Panics
    ///
    /// Panics if either grid axis is not strictly positive.
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        assert_positive_grid(settings.grid);
        self.settings = settings;
        self
    }

    /// Sets the world size in grid cells.
    ///
    /// # Panics
    ///
    /// Panics if either axis is not strictly positive.
    pub fn with_grid(mut self, grid: Vector2) -> Self {
        assert_positive_grid(grid);
        self.settings.grid = grid;
        self
    }

    pub fn with_refresh_when_unfocused(mut self, refresh: bool) -> Self {
        self.settings.refresh_when_unfocused = refresh;
        self
    }

    pub fn with_draw_always(mut self, draw_always: bool) -> Self {
        self.settings.draw_always = draw_always;
        self
    }

    /// Negative values clamp to 0.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.settings.time_scale = time_scale.max(0.0);
        self
    }

    pub fn with_view_offset(mut self, offset: Vector2) -> Self {
        self.settings.view_offset = offset;
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_host(mut self, host: impl Host + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    pub fn with_loader(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn build(self) -> Game {
        let GameBuilder {
            mut settings,
            renderer,
            host,
            loader,
        } = self;
        settings.time_scale = settings.time_scale.max(0.0);

        info!(
            target: "game",
            "Building game (grid: {}, draw_always: {}, refresh_when_unfocused: {})",
            settings.grid,
            settings.draw_always,
            settings.refresh_when_unfocused
        );

        Game::from_parts(
            settings,
            renderer.unwrap_or_else(|| Box::new(RecordingRenderer::new())),
            host.unwrap_or_else(|| Box::new(ManualHost::new())),
            loader.unwrap_or_else(|| Box::new(ImageLoader::new())),
        )
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_positive_grid(grid: Vector2) {
    assert!(grid.x > 0.0 && grid.y > 0.0, "Grid must be positive, got {}", grid);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = GameSettings::default();
        assert_eq!(settings.grid, Vector2::new(4.0, 3.0));
        assert!(settings.refresh_when_unfocused);
        assert!(settings.draw_always);
        assert_eq!(settings.time_scale, 1.0);
        assert_eq!(settings.view_offset, Vector2::ZERO);
    }

    #[test]
    fn builder_applies_overrides() {
        let game = GameBuilder::new()
            .with_grid(Vector2::new(8.0, 8.0))
            .with_time_scale(-1.0)
            .with_draw_always(false)
            .with_refresh_when_unfocused(false)
            .build();

        let settings = game.settings();
        assert_eq!(settings.grid, Vector2::new(8.0, 8.0));
        assert_eq!(settings.time_scale, 0.0);
        assert!(!settings.draw_always);
        assert!(!settings.refresh_when_unfocused);
    }

    #[test]
    #[should_panic(expected = "Grid must be positive")]
    fn zero_grid_is_rejected() {
        let _ = GameBuilder::new().with_grid(Vector2::new(0.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "Grid must be positive")]
    fn settings_with_negative_grid_are_rejected() {
        let settings = GameSettings {
            grid: Vector2::new(4.0, -1.0),
            ..GameSettings::default()
        };
        let _ = GameBuilder::new().with_settings(settings);
    }

    #[test]
    fn settings_replace_every_field() {
        let settings = GameSettings {
            grid: Vector2::new(10.0, 5.0),
            draw_always: false,
            ..GameSettings::default()
        };
        let game = GameBuilder::new().with_settings(settings.clone()).build();
        assert_eq!(game.settings(), &settings);
    }
}
