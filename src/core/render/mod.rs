//=========================================================================
// Rendering
//=========================================================================
//
// The drawing surface the game loop talks to.
//
// All coordinates passed to a `Renderer` are in grid units; the renderer
// multiplies by its grid scale (pixels per cell). The scale is also what
// the input layer divides client pixels by.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use crate::core::math::{Transform, Vector2};
use crate::core::object::AsAny;

//=== Module Declarations =================================================

mod draw_settings;
mod recording;

//=== Public API ==========================================================

pub use draw_settings::{DrawSettings, Shadow};
pub use recording::{DrawCommand, RecordingRenderer};

//=== Renderer ============================================================

/// Drawing surface backend.
pub trait Renderer: AsAny {
    /// Pixels per grid cell.
    fn grid_scale(&self) -> f64;

    /// Canvas size in pixels.
    fn canvas_size(&self) -> Vector2;

    /// Applies a new grid scale and canvas size.
    fn set_canvas(&mut self, grid_scale: f64, canvas_size: Vector2);

    //--- Frame ------------------------------------------------------------

    fn clear(&mut self);
    fn fill_frame(&mut self, settings: &DrawSettings);

    //--- Primitives -------------------------------------------------------

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, settings: &DrawSettings);
    fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, settings: &DrawSettings);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, settings: &DrawSettings);
    fn draw_arrow(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, settings: &DrawSettings);

    /// Stretches `image` over the transform box, rotated about its centre.
    ///
    /// `key` is the resource key the image was loaded under.
    fn draw_image(&mut self, key: &str, image: &RgbaImage, transform: &Transform);

    /// Debug overlay: red box outline, both diagonals and a facing arrow.
    fn draw_debug_hitbox(&mut self, transform: &Transform) {
        let Vector2 { x, y } = transform.position;
        let Vector2 { x: w, y: h } = transform.scale;
        let outline = DrawSettings::new()
            .with_border_color("red")
            .with_fill(false)
            .with_border(true);
        let stroke = DrawSettings::new().with_border_color("red");

        self.draw_rectangle(x, y, w, h, &outline);
        self.draw_line(x, y, x + w, y + h, &stroke);
        self.draw_line(x + w, y, x, y + h, &stroke);

        let center = transform.position_center();
        let angle = transform.radians();
        self.draw_arrow(
            center.x,
            center.y,
            center.x + (w / 2.0) * angle.cos(),
            center.y + (h / 2.0) * angle.sin(),
            &stroke.with_color("red"),
        );
    }
}

//=== Canvas Fitting ======================================================

/// Largest whole-pixel grid scale that fits `grid` into `fraction` of
/// `available` pixels, and the resulting canvas size.
pub fn fit_canvas(grid: Vector2, available: Vector2, fraction: f64) -> (f64, Vector2) {
    let width = available.x * fraction / grid.x;
    let height = available.y * fraction / grid.y;
    let scale = width.min(height).floor().max(0.0);
    (scale, grid * scale)
}

//=========================================================================
// Unit Tests
//=========================================================================
