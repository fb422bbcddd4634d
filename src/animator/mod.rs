use std::time::Instant;

use crate::{data::Program, RenderFunc};

/// Stand-in interval for an uncapped rate. Small enough that every
/// redraw signal is considered due.
const MIN_INTERVAL_MS: f64 = f64::EPSILON;

/// Paces the continuous redraw-signal chain down to a target rate.
///
/// The window keeps requesting redraws back-to-back; on each signal
/// `frame` decides whether enough time has passed since the last fired
/// frame and only then invokes the callback. The last-fired timestamp
/// advances by whole intervals (remainder folded away with a modulo),
/// so jitter in signal delivery does not lower the long-run rate.
pub struct FrameAnimater {
    callback: RenderFunc,
    interval: f64,
    last_time: f64,
    running: bool,
    fired: u64,
    epoch: Instant,
}

impl FrameAnimater {
    pub fn new() -> Self {
        Self {
            callback: |_, _| {},
            interval: MIN_INTERVAL_MS,
            last_time: 0.0,
            running: false,
            fired: 0,
            epoch: Instant::now(),
        }
    }

    pub fn set_callback(&mut self, callback: RenderFunc) {
        self.callback = callback;
    }

    /// Sets the minimum spacing between fired frames to `|1000/rate|`
    /// milliseconds. A rate whose interval comes out non-finite (zero,
    /// NaN) falls back to an effectively-zero interval, letting every
    /// signal through.
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.interval = (1000.0 / rate).abs();

        if !self.interval.is_finite() {
            self.interval = MIN_INTERVAL_MS;
        }
    }

    /// No-op when already running, so a second call can never re-arm
    /// the pacing clock mid-interval.
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        self.last_time = self.now_ms();
        self.running = true;
    }

    /// Safe to call when not running.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames_fired(&self) -> u64 {
        self.fired
    }

    /// Milliseconds since the animator was created.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn due(&mut self, now: f64) -> Option<f64> {
        let elapsed = now - self.last_time;

        if elapsed > self.interval {
            self.last_time = now - (elapsed % self.interval);
            self.fired += 1;
            return Some(now);
        }

        None
    }

    /// One pass of the redraw signal. Returns whether the callback
    /// fired.
    pub fn frame(&mut self, prog: &mut Program) -> bool {
        if !self.running {
            return false;
        }

        let now = self.now_ms();

        if let Some(stamp) = self.due(now) {
            (self.callback)(prog, stamp);
            return true;
        }

        false
    }
}
