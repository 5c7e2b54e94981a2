//! Search limits and cooperative time control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Limits for one search call: a fixed ply depth and an optional move
/// time. The base engine searches to the full depth; when a move time is
/// given the search unwinds early, keeping the best move found so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Search depth in plies (half-moves). Must be at least 1.
    pub depth: u8,
    /// Maximum time allowed for this move (None = no limit). Kept for
    /// callers to inspect; the search itself consults `time_control`,
    /// which the constructors derive from this value.
    pub move_time: Option<Duration>,
    /// Time controller consulted during search
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Limits with only a depth constraint.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Start the clock. Called when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Thread-safe stop flag plus move clock.
///
/// Cheaply cloneable; a UI thread can hold a clone and call `stop()`
/// while the search runs elsewhere. `is_stopped()` is an atomic load,
/// cheap enough to consult at every node.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    /// How often to read the clock, in nodes.
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            check_interval: 1024,
        }
    }

    /// Start the clock and clear the stop flag.
    pub fn start(&self) {
        *self.start_time.write().unwrap() = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force the search to stop at its next check.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// True when the clock is worth reading at this node count.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    /// Reads the clock; sets and returns the stop flag once the time
    /// limit has elapsed. Never stops when no limit is set.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        let Some(limit) = self.time_limit else {
            return false;
        };
        let started = *self.start_time.read().unwrap();
        match started {
            Some(at) if at.elapsed() >= limit => {
                self.stopped.store(true, Ordering::SeqCst);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod limits_tests;
