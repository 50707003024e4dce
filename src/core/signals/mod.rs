//=========================================================================
// Signals
//=========================================================================
//
// Named-channel publish/subscribe with one concrete payload per channel.
//
// Architecture:
//   Game / hooks → GameContext::emit(Signal) → SignalBus snapshot
//                                                   ↓
//                  listeners of signal.channel() in subscription order
//
// Emission is synchronous: every listener subscribed when `emit` starts,
// and still subscribed when its turn comes, runs before `emit` returns.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::Input;
use crate::core::object::GameObjectId;

//=== Module Declarations =================================================

mod signal_bus;

//=== Public API ==========================================================

pub use signal_bus::{Listener, ListenerId, SignalBus};

//=== Channel =============================================================

/// Channels the engine emits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Start of a draw pass, after the renderer was cleared.
    Draw,
    /// The game finished its startup sequence.
    Start,
    /// Every declared resource settled.
    LoadAllResources,
    SpawnedGameObject,
    MouseMove,
    MouseDown,
    MouseUp,
    MouseClick,
    MouseScroll,
    /// At least one key went down this frame.
    KeyDown,
    /// At least one key went up this frame.
    KeyUp,
}

//=== Signal ==============================================================

/// A payload tagged with its channel.
///
/// Input channels carry a copy of the full input snapshot, not a single
/// key or button.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Draw,
    Start,
    LoadAllResources,
    SpawnedGameObject(GameObjectId),
    MouseMove(Input),
    MouseDown(Input),
    MouseUp(Input),
    MouseClick(Input),
    MouseScroll(Input),
    KeyDown(Input),
    KeyUp(Input),
}

impl Signal {
    pub fn channel(&self) -> Channel {
        match self {
            Signal::Draw => Channel::Draw,
            Signal::Start => Channel::Start,
            Signal::LoadAllResources => Channel::LoadAllResources,
            Signal::SpawnedGameObject(_) => Channel::SpawnedGameObject,
            Signal::MouseMove(_) => Channel::MouseMove,
            Signal::MouseDown(_) => Channel::MouseDown,
            Signal::MouseUp(_) => Channel::MouseUp,
            Signal::MouseClick(_) => Channel::MouseClick,
            Signal::MouseScroll(_) => Channel::MouseScroll,
            Signal::KeyDown(_) => Channel::KeyDown,
            Signal::KeyUp(_) => Channel::KeyUp,
        }
    }

    /// The input snapshot carried by input channels.
    pub fn input(&self) -> Option<&Input> {
        match self {
            Signal::MouseMove(input)
            | Signal::MouseDown(input)
            | Signal::MouseUp(input)
            | Signal::MouseClick(input)
            | Signal::MouseScroll(input)
            | Signal::KeyDown(input)
            | Signal::KeyUp(input) => Some(input),
            Signal::Draw | Signal::Start | Signal::LoadAllResources | Signal::SpawnedGameObject(_) => {
                None
            }
        }
    }
}
