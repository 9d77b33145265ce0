//! Fake device log generator for `--test-mode`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Target (and so channel name) of generated events.
pub const DEMO_TARGET: &str = "fake_device.1";

/// Default generator frequency: one line every two seconds.
pub const DEFAULT_DEMO_RATE_HZ: f64 = 0.5;

const BAR_SIZE: usize = 10;
const LONG_LINE_EVERY: u64 = 10;
const LOREM: &str = " Lorem ipsum dolor sit amet, consectetur adipiscing elit.";
const LOREM_REPEAT: usize = 8;

/// Longest wait between messages, used when the rate is too low to express.
pub const MAX_DEMO_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest sleep between stop flag checks.
const STOP_POLL: Duration = Duration::from_millis(20);

/// Text of the `n`th generated message.
///
/// A ten cell progress bar with one `=` moving right each message, followed
/// by the message number. Every tenth message carries a long tail so line
/// wrapping gets exercised.
///
/// ```
/// use logpane::source::demo::message_text;
///
/// assert_eq!(message_text(1), "Log message [=         ] # 1");
/// ```
pub fn message_text(n: u64) -> String {
    // n % BAR_SIZE < BAR_SIZE, so the cast is lossless
    let position = (n % BAR_SIZE as u64) as usize;
    let marker = (position + BAR_SIZE - 1) % BAR_SIZE;
    let bar: String = (0..BAR_SIZE)
        .map(|cell| if cell == marker { '=' } else { ' ' })
        .collect();

    let mut text = format!("Log message [{bar}] # {n}");
    if n % LONG_LINE_EVERY == 0 {
        text.push_str(&LOREM.repeat(LOREM_REPEAT));
    }
    text
}

/// Time between messages at `rate_hz`, capped at [`MAX_DEMO_PERIOD`].
///
/// ```
/// use logpane::source::demo::{demo_period, MAX_DEMO_PERIOD};
/// use std::time::Duration;
///
/// assert_eq!(demo_period(4.0), Duration::from_millis(250));
/// assert_eq!(demo_period(1e-300), MAX_DEMO_PERIOD);
/// ```
pub fn demo_period(rate_hz: f64) -> Duration {
    Duration::try_from_secs_f64(1.0 / rate_hz)
        .map_or(MAX_DEMO_PERIOD, |period| period.min(MAX_DEMO_PERIOD))
}

/// Background thread emitting fake device logs at a fixed rate.
///
/// The thread inherits the tracing dispatcher of the thread that started
/// it. Dropping the generator stops it.
#[derive(Debug)]
pub struct DemoGenerator {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl DemoGenerator {
    /// Start emitting `rate_hz` messages per second.
    ///
    /// Non-positive or non-finite rates fall back to
    /// [`DEFAULT_DEMO_RATE_HZ`]. See [`demo_period`] for very low rates.
    ///
    /// # Errors
    ///
    /// Returns error if the thread cannot be spawned.
    pub fn start(rate_hz: f64) -> io::Result<Self> {
        let rate_hz = if rate_hz.is_finite() && rate_hz > 0.0 {
            rate_hz
        } else {
            DEFAULT_DEMO_RATE_HZ
        };
        let period = demo_period(rate_hz);
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let dispatch = tracing::dispatcher::get_default(|dispatch| dispatch.clone());

        let handle = thread::Builder::new()
            .name("logpane-demo".to_string())
            .spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || emit_until_stopped(&flag, period))
            })?;

        debug!(rate_hz, "Demo log generator started");
        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Whether the thread has not been told to stop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop the thread and wait for it. Returns how many messages it sent.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.running.store(false, Ordering::Relaxed);
        let sent = self
            .handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or(0);
        debug!(sent, "Demo log generator stopped");
        sent
    }
}

impl Drop for DemoGenerator {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn emit_until_stopped(running: &AtomicBool, period: Duration) -> u64 {
    let mut count = 0;
    loop {
        if !sleep_while_running(running, period) {
            return count;
        }
        info!(target: DEMO_TARGET, "{}", message_text(count));
        count += 1;
    }
}

/// Sleep for `period` in short slices. Returns false once stopped.
fn sleep_while_running(running: &AtomicBool, period: Duration) -> bool {
    let deadline = Instant::now() + period;
    loop {
        if !running.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(STOP_POLL));
    }
}
