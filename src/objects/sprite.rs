//=========================================================================
// Sprite
//=========================================================================
//
// Drawable, clickable image stretched over its transform box.
//
// The texture is looked up by resource key when the sprite starts, so a
// sprite added after the resource gate opened draws right away. A sprite
// whose key is missing or failed stays textureless and draws nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::RgbaImage;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::error::HookResult;
use crate::core::math::Transform;
use crate::core::object::{Clickable, DrawEvent, Drawable, GameObject, ObjectCore, SpawnEvent};

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub struct Sprite {
    pub core: ObjectCore,

    /// Resource key of the image.
    pub image_key: String,

    pub visible: bool,
    pub show_hitbox: bool,
    pub ignore_raycast: bool,

    texture: Option<RgbaImage>,
}

impl Sprite {
    pub fn new(image_key: impl Into<String>, transform: Transform) -> Self {
        Self {
            core: ObjectCore::new().with_transform(transform),
            image_key: image_key.into(),
            visible: true,
            show_hitbox: false,
            ignore_raycast: false,
            texture: None,
        }
    }

    /// Assigns the texture directly instead of resolving `image_key` on start.
    pub fn with_texture(mut self, texture: RgbaImage) -> Self {
        self.texture = Some(texture);
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

    pub fn texture(&self) -> Option<&RgbaImage> {
        self.texture.as_ref()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

impl GameObject for Sprite {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn start(&mut self, event: &mut SpawnEvent<'_>) -> HookResult {
        if self.texture.is_none() {
            self.texture = event.game.get_image(&self.image_key).cloned();
            if self.texture.is_none() {
                warn!(target: "game", "Sprite {} has no loaded image '{}'", event.game_object_id, self.image_key);
            }
        }
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

impl Drawable for Sprite {
    fn visible(&self) -> bool {
        self.visible
    }

    fn draw(&mut self, event: &mut DrawEvent<'_>) -> HookResult {
        if let Some(texture) = &self.texture {
            event
                .renderer()
                .draw_image(&self.image_key, texture, &self.core.transform);
        }
        Ok(())
    }
}

impl Clickable for Sprite {
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
