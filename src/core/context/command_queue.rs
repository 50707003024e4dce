//=========================================================================
// Command Queue
//=========================================================================
//
// Structural changes requested from inside hooks and listeners.
//
// Hooks run while the registry is being walked, so spawns and destroys
// are queued here and applied by the game after the current phase.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::object::{GameObject, GameObjectId};

//=== GameCommand =========================================================

pub(crate) enum GameCommand {
    Spawn(Box<dyn GameObject>),
    Destroy(GameObjectId),
}

//=== CommandQueue ========================================================

#[derive(Default)]
pub(crate) struct CommandQueue {
    queue: Vec<GameCommand>,
}

impl CommandQueue {
    pub(crate) fn push(&mut self, command: GameCommand) {
        self.queue.push(command);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes all queued commands in request order, leaving the queue empty.
    pub(crate) fn take(&mut self) -> Vec<GameCommand> {
        std::mem::take(&mut self.queue)
    }
}
