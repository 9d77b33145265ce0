//! Redraw rate limiting.
//!
//! Log ingestion can run at any rate; repainting costs O(window height).
//! The throttle coalesces redraw requests so a burst of appends triggers
//! at most one repaint per interval.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default minimum time between two redraw triggers.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(300);

/// Host capability for requesting a repaint.
///
/// Implementations must be fire-and-forget: they are called from producer
/// threads and must never block on the host event loop.
pub trait RedrawTrigger: Send + Sync {
    /// Ask the host to repaint at its next opportunity.
    fn trigger_redraw(&self);
}

/// Trigger that does nothing. Used when no host is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRedraw;

impl RedrawTrigger for NoopRedraw {
    fn trigger_redraw(&self) {}
}

/// Rate limiter in front of a [`RedrawTrigger`].
pub struct RedrawThrottle {
    trigger: Arc<dyn RedrawTrigger>,
    min_interval: Duration,
    last_emit: Mutex<Instant>,
}

impl RedrawThrottle {
    /// Create a throttle whose interval starts now.
    ///
    /// The first trigger fires only once `min_interval` has elapsed since
    /// construction.
    pub fn new(trigger: Arc<dyn RedrawTrigger>, min_interval: Duration) -> Self {
        Self::starting_at(trigger, min_interval, Instant::now())
    }

    /// Create a throttle with an explicit start time.
    pub fn starting_at(
        trigger: Arc<dyn RedrawTrigger>,
        min_interval: Duration,
        start: Instant,
    ) -> Self {
        Self {
            trigger,
            min_interval,
            last_emit: Mutex::new(start),
        }
    }

    /// Throttle with no host attached.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopRedraw), DEFAULT_REDRAW_INTERVAL)
    }

    /// Shortest time between two triggers.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Record an append and fire the trigger if the interval has elapsed.
    ///
    /// Returns whether the trigger fired.
    pub fn notify(&self) -> bool {
        self.notify_at(Instant::now())
    }

    /// [`notify`](Self::notify) with an explicit clock reading.
    pub fn notify_at(&self, now: Instant) -> bool {
        {
            let mut last_emit = self.last_emit.lock().unwrap_or_else(PoisonError::into_inner);
            if now <= *last_emit + self.min_interval {
                return false;
            }
            *last_emit = now;
        }
        // Lock released before calling out to the host.
        self.trigger.trigger_redraw();
        true
    }
}

impl fmt::Debug for RedrawThrottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawThrottle")
            .field("min_interval", &self.min_interval)
            .finish_non_exhaustive()
    }
}
