//=========================================================================
// Shape
//=========================================================================
//
// Drawable, clickable rectangle or circle.
//
// A rectangle covers its transform box. A circle is inscribed from the
// box origin with a diameter of the larger scale axis.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::HookResult;
use crate::core::math::Transform;
use crate::core::object::{Clickable, DrawEvent, Drawable, GameObject, ObjectCore, SpawnEvent};
use crate::core::render::DrawSettings;

//=== ShapeType ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeType {
    #[default]
    Rect,
    Circle,
}

//=== Shape ===============================================================

#[derive(Debug, Clone)]
pub struct Shape {
    pub core: ObjectCore,
    pub shape_type: ShapeType,

    /// Overrides merged onto the renderer defaults when drawing.
    pub properties: DrawSettings,

    pub visible: bool,
    pub show_hitbox: bool,
    pub ignore_raycast: bool,
}

impl Shape {
    pub fn new(shape_type: ShapeType, transform: Transform) -> Self {
        Self {
            core: ObjectCore::new().with_transform(transform),
            shape_type,
            properties: DrawSettings::new(),
            visible: true,
            show_hitbox: false,
            ignore_raycast: false,
        }
    }

    pub fn rect(transform: Transform) -> Self {
        Self::new(ShapeType::Rect, transform)
    }

    pub fn circle(transform: Transform) -> Self {
        Self::new(ShapeType::Circle, transform)
    }

    pub fn with_properties(mut self, properties: DrawSettings) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_hitbox(mut self, show: bool) -> Self {
        self.show_hitbox = show;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.core.name = Some(name.into());
        self
    }
}

impl GameObject for Shape {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn start(&mut self, event: &mut SpawnEvent<'_>) -> HookResult {
        event.game.request_redraw();
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        Some(self)
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        Some(self)
    }
}

impl Drawable for Shape {
    fn visible(&self) -> bool {
        self.visible
    }

    fn draw(&mut self, event: &mut DrawEvent<'_>) -> HookResult {
        let Transform { position, scale, .. } = self.core.transform;
        let renderer = event.renderer();
        match self.shape_type {
            ShapeType::Rect => renderer.draw_rectangle(position.x, position.y, scale.x, scale.y, &self.properties),
            ShapeType::Circle => renderer.draw_circle(position.x, position.y, scale.x.max(scale.y), &self.properties),
        }
        Ok(())
    }
}

impl Clickable for Shape {
    fn show_hitbox(&self) -> bool {
        self.show_hitbox
    }

    fn ignore_raycast(&self) -> bool {
        self.ignore_raycast
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
