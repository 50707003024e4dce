//=========================================================================
// Startup Sequencing
//=========================================================================
//
// Gates the frame loop on resource settlement.
//
// Flow:
// ```text
//   load_game_and_start(on_started)
//     ├─ playing or burn-in?     → StartHandle::Rejected(AlreadyPlaying)
//     ├─ start already waiting?  → StartHandle::Rejected(StartPending)
//     └─ subscribe LoadAllResources, scan declared resources
//          └─ on settlement: unsubscribe → start() → on_started(game) → Started
// ```
//
// While waiting, the game keeps one animation frame requested so every
// host refresh polls the loader completions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::scheduler::LoopPhase;
use super::Game;
use crate::core::error::GameError;
use crate::core::signals::{Channel, ListenerId, Signal};

//=== StartStatus =========================================================

/// Outcome of a [`Game::load_game_and_start`] request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartStatus {
    /// Waiting for declared resources to settle.
    Pending,
    /// Resources settled and the game loop was started.
    Started,
    /// The request was refused.
    Rejected(GameError),
}

//=== StartHandle =========================================================

/// Observable completion of a start request.
#[derive(Clone)]
pub struct StartHandle {
    status: Rc<RefCell<StartStatus>>,
}

impl StartHandle {
    fn new(status: StartStatus) -> Self {
        Self {
            status: Rc::new(RefCell::new(status)),
        }
    }

    fn set(&self, status: StartStatus) {
        *self.status.borrow_mut() = status;
    }

    pub fn status(&self) -> StartStatus {
        self.status.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        *self.status.borrow() == StartStatus::Pending
    }

    pub fn is_started(&self) -> bool {
        *self.status.borrow() == StartStatus::Started
    }

    pub fn is_rejected(&self) -> bool {
        matches!(*self.status.borrow(), StartStatus::Rejected(_))
    }

    /// The rejection reason, if any.
    pub fn error(&self) -> Option<GameError> {
        match &*self.status.borrow() {
            StartStatus::Rejected(err) => Some(err.clone()),
            _ => None,
        }
    }
}

impl fmt::Debug for StartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StartHandle").field(&*self.status.borrow()).finish()
    }
}

//=== PendingStart ========================================================

pub(crate) struct PendingStart {
    listener: ListenerId,
    settled: Rc<Cell<bool>>,
    handle: StartHandle,
    on_started: Box<dyn FnOnce(&mut Game)>,
}

//=== Startup API =========================================================

impl Game {
    /// Starts the frame loop and broadcasts `Start`.
    pub fn start(&mut self) {
        self.start_game_loop();
        self.emit(Signal::Start);
    }

    /// Starts the game once every declared resource has settled (loaded or
    /// failed), then calls `on_started`.
    ///
    /// With nothing outstanding the game starts before this returns.
    pub fn load_game_and_start<F>(&mut self, on_started: F) -> StartHandle
    where
        F: FnOnce(&mut Game) + 'static,
    {
        if self.context.is_playing() || self.phase == LoopPhase::BurnIn {
            warn!(target: "game", "Start rejected: the game is already playing");
            return StartHandle::new(StartStatus::Rejected(GameError::AlreadyPlaying));
        }
        if self.pending_start.is_some() {
            warn!(target: "game", "Start rejected: a start is already waiting for resources");
            return StartHandle::new(StartStatus::Rejected(GameError::StartPending));
        }

        let settled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&settled);
        let listener = self.context.subscribe(Channel::LoadAllResources, move |_, _| flag.set(true));

        let handle = StartHandle::new(StartStatus::Pending);
        self.pending_start = Some(PendingStart {
            listener,
            settled: Rc::clone(&settled),
            handle: handle.clone(),
            on_started: Box::new(on_started),
        });

        self.context.load_all_resources();
        if self.context.resources().is_settled() {
            settled.set(true);
        }
        self.resolve_pending_start();

        if self.pending_start.is_some() {
            info!(
                target: "resources",
                "Waiting for {} resource(s) before starting",
                self.context.resources().outstanding()
            );
            self.request_frame();
        }
        handle
    }

    /// Completes a waiting start once its settlement signal has fired.
    pub(super) fn resolve_pending_start(&mut self) {
        let ready = self
            .pending_start
            .as_ref()
            .is_some_and(|pending| pending.settled.get());
        if !ready {
            return;
        }
        let Some(pending) = self.pending_start.take() else {
            return;
        };

        self.context.unsubscribe(pending.listener);
        info!(target: "game", "Resources settled; starting game");
        self.start();
        pending.handle.set(StartStatus::Started);
        (pending.on_started)(self);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
