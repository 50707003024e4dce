//=========================================================================
// Frame Time
//=========================================================================
//
// Converts host animation-frame timestamps (milliseconds, monotonically
// increasing) into per-tick deltas in seconds.
//
// Deltas are not clamped: a throttled host may produce arbitrarily large
// steps. Only the very first burn-in seeds the reference timestamp, so a
// restart after a stop shows the gap as one large delta.
//
//=========================================================================

//=== FrameTime ===========================================================

/// Timing information for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous tick, multiplied by `time_scale`.
    pub delta_time: f64,

    /// Seconds since the previous tick, real time.
    pub unscaled_delta_time: f64,

    /// Cumulative real seconds across all ticks.
    pub time: f64,

    /// Cumulative scaled seconds across all ticks.
    pub scaled_time: f64,

    /// Multiplier applied to `delta_time` this tick.
    pub time_scale: f64,
}

//=== Clock ===============================================================

/// Tracks the previous timestamp and the elapsed-time counters.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clock {
    previous_timestamp_ms: f64,
    elapsed_ms: f64,
    scaled_elapsed_ms: f64,
    marked: bool,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `timestamp_ms` as the reference for the next delta.
    pub(crate) fn mark(&mut self, timestamp_ms: f64) {
        self.previous_timestamp_ms = timestamp_ms;
        self.marked = true;
    }

    /// Whether a reference timestamp has ever been recorded.
    pub(crate) fn is_marked(&self) -> bool {
        self.marked
    }

    /// Advances to `timestamp_ms` and returns the resulting frame timing.
    pub(crate) fn advance(&mut self, timestamp_ms: f64, time_scale: f64) -> FrameTime {
        let raw_delta_ms = timestamp_ms - self.previous_timestamp_ms;
        self.previous_timestamp_ms = timestamp_ms;
        self.marked = true;

        let scaled_delta_ms = raw_delta_ms * time_scale;
        self.elapsed_ms += raw_delta_ms;
        self.scaled_elapsed_ms += scaled_delta_ms;

        FrameTime {
            delta_time: scaled_delta_ms / 1000.0,
            unscaled_delta_time: raw_delta_ms / 1000.0,
            time: self.elapsed_ms / 1000.0,
            scaled_time: self.scaled_elapsed_ms / 1000.0,
            time_scale,
        }
    }

    /// Cumulative real seconds.
    pub(crate) fn elapsed(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    /// Cumulative scaled seconds.
    pub(crate) fn scaled_elapsed(&self) -> f64 {
        self.scaled_elapsed_ms / 1000.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
