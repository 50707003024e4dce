//=========================================================================
// Window Host
//=========================================================================
//
// `Host` backed by a Winit window: frame requests become redraw requests
// and focus follows `WindowEvent::Focused`.
//
// The game owns one clone, the platform another; the window is attached
// once the event loop creates it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::host::Host;

//=== WindowHost ==========================================================

struct WindowHostState {
    window: Option<Rc<Window>>,
    focused: bool,
}

#[derive(Clone)]
pub(crate) struct WindowHost {
    state: Rc<RefCell<WindowHostState>>,
}

impl WindowHost {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(WindowHostState {
                window: None,
                focused: true,
            })),
        }
    }

    pub(crate) fn attach(&self, window: Rc<Window>) {
        self.state.borrow_mut().window = Some(window);
    }

    #[cfg(test)]
    pub(crate) fn is_attached(&self) -> bool {
        self.state.borrow().window.is_some()
    }

    pub(crate) fn set_focus(&self, focused: bool) {
        self.state.borrow_mut().focused = focused;
    }
}

impl Host for WindowHost {
    /// Requests made before the window exists are covered by the redraw
    /// the platform issues right after creating it.
    fn request_animation_frame(&mut self) {
        if let Some(window) = &self.state.borrow().window {
            window.request_redraw();
        }
    }

    fn has_focus(&self) -> bool {
        self.state.borrow().focused
    }
}
