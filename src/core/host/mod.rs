//=========================================================================
// Host
//=========================================================================
//
// The environment a game runs inside: a display-refresh scheduler and a
// focus query.
//
// Contract:
//   request_animation_frame() asks for exactly one future call of
//   `Game::animation_frame(timestamp_ms)` with a monotonically increasing
//   timestamp. Several requests before the frame fires collapse into one.
//
//=========================================================================

/// Host environment capability injected into a [`crate::Game`].
pub trait Host {
    /// Schedules one call to `Game::animation_frame`.
    fn request_animation_frame(&mut self);

    /// Whether the game's window or document currently has input focus.
    fn has_focus(&self) -> bool;
}
