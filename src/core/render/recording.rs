//=========================================================================
// Recording Renderer
//=========================================================================
//
// Headless renderer that logs every call as a `DrawCommand`.
//
// Clones share one log, so a test or a headless host can keep a clone
// after handing the renderer to a game and inspect what was drawn.
// Recorded settings are already resolved against `DrawSettings::defaults`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use super::{DrawSettings, Renderer};
use crate::core::math::{Transform, Vector2};

//=== DrawCommand =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillFrame(DrawSettings),
    Rectangle { x: f64, y: f64, width: f64, height: f64, settings: DrawSettings },
    Circle { x: f64, y: f64, diameter: f64, settings: DrawSettings },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, settings: DrawSettings },
    Arrow { x1: f64, y1: f64, x2: f64, y2: f64, settings: DrawSettings },
    /// Pixels are not recorded, only the source size.
    Image { key: String, size: (u32, u32), transform: Transform },
}

//=== RecordingRenderer ===================================================

#[derive(Debug, Default)]
struct RecordingState {
    grid_scale: f64,
    canvas_size: Vector2,
    commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingRenderer {
    /// Unsized renderer (grid scale 0) with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer pre-sized to `grid_scale` pixels per cell.
    pub fn with_grid_scale(grid_scale: f64) -> Self {
        let renderer = Self::new();
        renderer.state.borrow_mut().grid_scale = grid_scale;
        renderer
    }

    /// Copy of the log so far.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.state.borrow().commands.clone()
    }

    /// Drains the log.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    /// Number of `Clear` calls, i.e. draw passes, since the last drain.
    pub fn frames_drawn(&self) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Clear))
            .count()
    }

    fn record(&self, command: DrawCommand) {
        self.state.borrow_mut().commands.push(command);
    }

    fn resolve(settings: &DrawSettings) -> DrawSettings {
        DrawSettings::defaults().merged(settings)
    }
}

impl Renderer for RecordingRenderer {
    fn grid_scale(&self) -> f64 {
        self.state.borrow().grid_scale
    }

    fn canvas_size(&self) -> Vector2 {
        self.state.borrow().canvas_size
    }

    fn set_canvas(&mut self, grid_scale: f64, canvas_size: Vector2) {
        let mut state = self.state.borrow_mut();
        state.grid_scale = grid_scale;
        state.canvas_size = canvas_size;
    }

    fn clear(&mut self) {
        self.record(DrawCommand::Clear);
    }

    fn fill_frame(&mut self, settings: &DrawSettings) {
        self.record(DrawCommand::FillFrame(Self::resolve(settings)));
    }

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, settings: &DrawSettings) {
        self.record(DrawCommand::Rectangle {
            x,
            y,
            width,
            height,
            settings: Self::resolve(settings),
        });
    }

    fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, settings: &DrawSettings) {
        self.record(DrawCommand::Circle {
            x,
            y,
            diameter,
            settings: Self::resolve(settings),
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, settings: &DrawSettings) {
        self.record(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            settings: Self::resolve(settings),
        });
    }

    fn draw_arrow(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, settings: &DrawSettings) {
        self.record(DrawCommand::Arrow {
            x1,
            y1,
            x2,
            y2,
            settings: Self::resolve(settings),
        });
    }

    fn draw_image(&mut self, key: &str, image: &RgbaImage, transform: &Transform) {
        self.record(DrawCommand::Image {
            key: key.to_string(),
            size: image.dimensions(),
            transform: *transform,
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let renderer = RecordingRenderer::new();
        let mut handed_off = renderer.clone();
        handed_off.clear();
        handed_off.draw_circle(1.0, 1.0, 2.0, &DrawSettings::new().with_color("blue"));

        assert_eq!(renderer.frames_drawn(), 1);
        let commands = renderer.take_commands();
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            DrawCommand::Circle { settings, .. } => {
                assert_eq!(settings.color.as_deref(), Some("blue"));
                assert_eq!(settings.fill, Some(true));
            }
            other => panic!("expected circle, got {other:?}"),
        }
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn set_canvas_is_visible_through_clones() {
        let renderer = RecordingRenderer::new();
        let mut handed_off = renderer.clone();
        handed_off.set_canvas(50.0, Vector2::new(200.0, 150.0));
        assert_eq!(renderer.grid_scale(), 50.0);
        assert_eq!(renderer.canvas_size(), Vector2::new(200.0, 150.0));
    }

    #[test]
    fn images_record_key_size_and_placement() {
        let mut renderer = RecordingRenderer::new();
        let transform = Transform::new(Vector2::new(1.0, 1.0), Vector2::new(2.0, 1.0)).with_rotation(90.0);
        renderer.draw_image("hero", &RgbaImage::new(16, 8), &transform);

        assert_eq!(
            renderer.commands(),
            vec![DrawCommand::Image {
                key: "hero".to_string(),
                size: (16, 8),
                transform,
            }]
        );
    }
}
