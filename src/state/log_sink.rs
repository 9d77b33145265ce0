//! Thread-safe handle for feeding lines into a [`LogBuffer`].
//!
//! Producers on any thread call [`LogSink::submit`]; the UI thread reads
//! through [`LogSink::with_buffer`]. One mutex guards buffer mutation,
//! channel statistics, and byte accounting together.

use super::log_buffer::LogBuffer;
use crate::model::StyledLine;
use crate::view_state::RedrawThrottle;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Cloneable producer/consumer handle over a shared [`LogBuffer`].
#[derive(Debug, Clone)]
pub struct LogSink {
    buffer: Arc<Mutex<LogBuffer>>,
    throttle: Arc<RedrawThrottle>,
}

impl LogSink {
    /// Create a sink around an empty buffer of the given capacity.
    pub fn new(capacity: usize, throttle: RedrawThrottle) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(LogBuffer::new(capacity))),
            throttle: Arc::new(throttle),
        }
    }

    /// Sink with no host attached; appends never trigger redraws.
    pub fn detached(capacity: usize) -> Self {
        Self::new(capacity, RedrawThrottle::disabled())
    }

    /// Accept one log record from a producer.
    pub fn submit(
        &self,
        channel: &str,
        timestamp: DateTime<Local>,
        raw_message: &str,
        styled_text: &str,
    ) {
        self.append(StyledLine::new(channel, timestamp, raw_message, styled_text));
    }

    /// Append a prepared line and notify the redraw throttle.
    ///
    /// The throttle is consulted after the buffer lock is released.
    pub fn append(&self, line: StyledLine) {
        let line = Arc::new(line);
        self.lock().append(line);
        self.throttle.notify();
    }

    /// Drop every buffered line.
    pub fn clear(&self) {
        let dropped = {
            let mut buffer = self.lock();
            let dropped = buffer.total_count();
            buffer.clear();
            dropped
        };
        debug!(dropped, "Log buffer cleared");
    }

    /// Retained line count.
    pub fn total_count(&self) -> usize {
        self.lock().total_count()
    }

    /// Whether lines arrived since the last frame.
    pub fn is_dirty(&self) -> bool {
        self.lock().is_dirty()
    }

    /// Run `f` with shared access to the buffer.
    ///
    /// Keep `f` short: producers block while it runs.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&LogBuffer) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with exclusive access to the buffer.
    pub fn with_buffer_mut<R>(&self, f: impl FnOnce(&mut LogBuffer) -> R) -> R {
        f(&mut self.lock())
    }

    /// Limiter notified after each append.
    pub fn throttle(&self) -> &RedrawThrottle {
        &self.throttle
    }

    fn lock(&self) -> MutexGuard<'_, LogBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
