//=========================================================================
// Errors
//=========================================================================
//
// Error taxonomy shared by the orchestrator and its collaborators.
//
// - `GameError`: caller-contract violations, surfaced to the caller.
// - `HookError`: failures returned by game object hooks, contained by
//   the scheduler and logged, never propagated.
// - `ResourceError`: per-resource load failures, recorded and counted
//   toward settlement like a success.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::object::GameObjectId;

//=== GameError ===========================================================

/// Caller-contract violations raised by [`crate::Game`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A game object with this id is already live.
    #[error("game object {0} is already part of this game")]
    DuplicateId(GameObjectId),

    /// Positional lookup past the end of the live collection.
    #[error("game object index {index} is out of range (live objects: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A typed handle resolved to an object of another concrete type.
    #[error("game object {id} is not a {expected}")]
    TypeMismatch { id: GameObjectId, expected: &'static str },

    /// The frame loop is already running.
    #[error("the game is already playing")]
    AlreadyPlaying,

    /// A load-and-start request is already waiting for resources.
    #[error("a start request is already waiting for resources")]
    StartPending,

    /// The resource kind string is not recognized.
    #[error("unknown resource kind \"{0}\"")]
    UnknownResourceKind(String),
}

//=== HookError ===========================================================

/// Failure reported by a game object lifecycle or input hook.
#[derive(Debug, Error)]
pub enum HookError {
    /// Free-form failure message.
    #[error("{0}")]
    Message(String),

    /// The hook panicked; the payload message is preserved when possible.
    #[error("hook panicked: {0}")]
    Panicked(String),

    /// Any other error raised inside the hook.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Convenience constructor for message errors.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Result type returned by every game object hook.
pub type HookResult = Result<(), HookError>;

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//=== ResourceError =======================================================

/// Reasons a declared resource failed to load.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The background loader for a resource could not be started.
    #[error("cannot start loader for {key}: {source}")]
    Spawn {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_error_messages_name_the_problem() {
        let err = GameError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "game object index 3 is out of range (live objects: 2)");
        assert!(GameError::UnknownResourceKind("audio".into())
            .to_string()
            .contains("audio"));
    }

    #[test]
    fn hook_error_wraps_foreign_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = HookError::from(Box::new(io) as Box<dyn std::error::Error + Send + Sync>);
        assert_eq!(err.to_string(), "disk gone");
        assert_eq!(HookError::msg("boom").to_string(), "boom");
    }
}
