//=========================================================================
// Test Support
//=========================================================================
//
// Configurable stub object shared by the crate's unit tests.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::error::{HookError, HookResult};
use crate::core::math::Transform;

use super::{
    Clickable, DestroyEvent, DrawEvent, Drawable, GameObject, MouseEvent, ObjectCore, SpawnEvent,
    TickEvent,
};

pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

/// Records every hook call as `"<name>:<hook>"` into a shared log.
pub(crate) struct Stub {
    core: ObjectCore,
    pub(crate) drawable: bool,
    pub(crate) clickable: bool,
    pub(crate) visible: bool,
    pub(crate) show_hitbox: bool,
    pub(crate) ignore_raycast: bool,
    pub(crate) fail_update: bool,
    pub(crate) panic_update: bool,
    pub(crate) updates: u32,
    log: CallLog,
}

impl Stub {
    pub(crate) fn new() -> Self {
        Self::with_core(ObjectCore::new())
    }

    pub(crate) fn with_core(core: ObjectCore) -> Self {
        Self {
            core,
            drawable: false,
            clickable: false,
            visible: true,
            show_hitbox: false,
            ignore_raycast: false,
            fail_update: false,
            panic_update: false,
            updates: 0,
            log: CallLog::default(),
        }
    }

    /// Drawable and clickable stub.
    pub(crate) fn clickable() -> Self {
        let mut stub = Self::new();
        stub.drawable = true;
        stub.clickable = true;
        stub
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        self.core.name = Some(name.to_string());
        self
    }

    pub(crate) fn with_transform(mut self, transform: Transform) -> Self {
        self.core.transform = transform;
        self
    }

    pub(crate) fn with_log(mut self, log: &CallLog) -> Self {
        self.log = Rc::clone(log);
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn record(&self, hook: &str) {
        let label = self.core.name.as_deref().unwrap_or("?");
        self.log.borrow_mut().push(format!("{label}:{hook}"));
    }
}

impl GameObject for Stub {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn start(&mut self, _event: &mut SpawnEvent<'_>) -> HookResult {
        self.record("start");
        Ok(())
    }

    fn destroy(&mut self, _event: &mut DestroyEvent<'_>) -> HookResult {
        self.record("destroy");
        Ok(())
    }

    fn update(&mut self, _event: &mut TickEvent<'_>) -> HookResult {
        self.record("update");
        if self.panic_update {
            panic!("stub panicked");
        }
        if self.fail_update {
            return Err(HookError::msg("stub failed"));
        }
        self.updates += 1;
        Ok(())
    }

    fn fixed_update(&mut self, _event: &mut TickEvent<'_>) -> HookResult {
        self.record("fixed_update");
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        self.drawable.then_some(self as &dyn Drawable)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        if self.drawable {
            Some(self)
        } else {
            None
        }
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        self.clickable.then_some(self as &dyn Clickable)
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        if self.clickable {
            Some(self)
        } else {
            None
        }
    }
}

impl Drawable for Stub {
    fn visible(&self) -> bool {
        self.visible
    }

    fn draw(&mut self, _event: &mut DrawEvent<'_>) -> HookResult {
        self.record("draw");
        Ok(())
    }
}

impl Clickable for Stub {
    fn show_hitbox(&self) -> bool {
        self.show_hitbox
    }

    fn ignore_raycast(&self) -> bool {
        self.ignore_raycast
    }

    fn on_mouse_click(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        self.record("click");
        Ok(())
    }

    fn on_mouse_down(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        self.record("down");
        Ok(())
    }

    fn on_mouse_up(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        self.record("up");
        Ok(())
    }

    fn on_mouse_hover_start(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        self.record("hover_start");
        Ok(())
    }

    fn on_mouse_hover_end(&mut self, _event: &mut MouseEvent<'_>) -> HookResult {
        self.record("hover_end");
        Ok(())
    }
}
