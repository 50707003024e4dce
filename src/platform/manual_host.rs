//=========================================================================
// Manual Host
//=========================================================================
//
// Host whose frames are fired by hand: tests, headless tools and
// fixed-step simulations.
//
// Clones share state, so a test keeps one clone while the game owns the
// other.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::host::Host;
use crate::game::Game;

//=== ManualHost ==========================================================

#[derive(Debug)]
struct ManualHostState {
    pending_frames: usize,
    total_requests: usize,
    focused: bool,
}

/// Host that records frame requests until [`ManualHost::run_frame`] fires them.
#[derive(Debug, Clone)]
pub struct ManualHost {
    state: Rc<RefCell<ManualHostState>>,
}

impl ManualHost {
    /// Creates a focused host with no pending frames.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualHostState {
                pending_frames: 0,
                total_requests: 0,
                focused: true,
            })),
        }
    }

    pub fn set_focus(&self, focused: bool) {
        self.state.borrow_mut().focused = focused;
    }

    /// Frames requested and not yet fired.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().pending_frames
    }

    /// Frame requests received over the host's lifetime.
    pub fn total_requests(&self) -> usize {
        self.state.borrow().total_requests
    }

    /// Fires one requested frame at `timestamp_ms`.
    ///
    /// Returns `false` without touching the game if no frame is pending.
    pub fn run_frame(&self, game: &mut Game, timestamp_ms: f64) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.pending_frames == 0 {
                return false;
            }
            state.pending_frames -= 1;
        }
        trace!(target: "platform", "Manual frame at {timestamp_ms}ms");
        game.animation_frame(timestamp_ms);
        true
    }

    /// Fires up to `count` frames spaced `step_ms` apart, starting at
    /// `start_ms`. Stops early once the game requests no further frame.
    ///
    /// Returns the number of frames fired.
    pub fn run_frames(&self, game: &mut Game, start_ms: f64, step_ms: f64, count: usize) -> usize {
        let mut fired = 0;
        while fired < count && self.run_frame(game, start_ms + step_ms * fired as f64) {
            fired += 1;
        }
        fired
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for ManualHost {
    fn request_animation_frame(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pending_frames += 1;
        state.total_requests += 1;
    }

    fn has_focus(&self) -> bool {
        self.state.borrow().focused
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn nothing_fires_without_a_request() {
        let host = ManualHost::new();
        let mut game = GameBuilder::new().with_host(host.clone()).build();
        assert!(!host.run_frame(&mut game, 0.0));
        assert_eq!(host.total_requests(), 0);
    }

    #[test]
    fn run_frames_follows_the_request_chain() {
        let host = ManualHost::new();
        let mut game = GameBuilder::new().with_host(host.clone()).build();
        game.start_game_loop();

        assert_eq!(host.run_frames(&mut game, 0.0, 16.0, 5), 5);
        assert!((game.elapsed_time() - 0.064).abs() < 1e-9);

        game.stop_game_loop();
        assert_eq!(host.run_frames(&mut game, 80.0, 16.0, 5), 1);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn focus_is_shared_between_clones() {
        let host = ManualHost::new();
        let other: Box<dyn Host> = Box::new(host.clone());
        host.set_focus(false);
        assert!(!other.has_focus());
    }
}
