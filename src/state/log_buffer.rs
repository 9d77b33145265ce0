//! Capacity-bounded store of formatted log lines.
//!
//! Provides the ring buffer behind the log pane, with running memory
//! accounting and per-channel statistics.

use crate::model::StyledLine;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

#[cfg(test)]
#[path = "log_buffer_tests.rs"]
mod tests;

/// Default maximum number of retained lines.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1_000_000;

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Ring buffer of log lines (oldest at front, newest at back).
///
/// Entries are shared as `Arc<StyledLine>` so the render path can snapshot a
/// window of lines and release the lock before doing any layout work.
///
/// # Invariants
/// - `entries.len() <= capacity`
/// - `byte_size` equals the sum of `estimated_size()` over retained entries
/// - channel counts only ever grow until `clear()`
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<Arc<StyledLine>>,
    capacity: usize,
    byte_size: usize,
    channel_counts: BTreeMap<String, usize>,
    channel_prefix_widths: BTreeMap<String, usize>,
    longest_prefix_width: usize,
    dirty: bool,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl LogBuffer {
    /// Create an empty buffer holding at most `capacity` lines.
    ///
    /// A capacity of zero is valid: every append is evicted immediately,
    /// though channel statistics are still recorded.
    pub fn new(capacity: usize) -> Self {
        Self {
            // Large capacities are the norm; grow on demand instead of
            // reserving the whole history up front.
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            byte_size: 0,
            channel_counts: BTreeMap::new(),
            channel_prefix_widths: BTreeMap::new(),
            longest_prefix_width: 0,
            dirty: false,
        }
    }

    /// Add a line at the tail, evicting the oldest line if over capacity.
    ///
    /// Append and eviction happen under the same `&mut` borrow, so the byte
    /// size and statistics are never observed half-updated. Never logs: this
    /// runs inside the tracing layer that feeds the pane.
    pub fn append(&mut self, line: impl Into<Arc<StyledLine>>) {
        let line = line.into();
        let channel = line.channel();

        *self.channel_counts.entry(channel.to_owned()).or_insert(0) += 1;
        if !self.channel_prefix_widths.contains_key(channel) {
            let prefix_width = line.prefix_width();
            self.channel_prefix_widths
                .insert(channel.to_owned(), prefix_width);
            self.longest_prefix_width = self.longest_prefix_width.max(prefix_width);
        }

        self.byte_size += line.estimated_size();
        self.entries.push_back(line);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                self.byte_size = self.byte_size.saturating_sub(evicted.estimated_size());
            }
        }

        self.dirty = true;
    }

    /// Drop every line and reset all statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.byte_size = 0;
        self.channel_counts.clear();
        self.channel_prefix_widths.clear();
        self.longest_prefix_width = 0;
        self.dirty = true;
    }

    /// Number of retained lines.
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    /// Index of the newest line, or `None` when empty.
    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Whether no lines are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained lines.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Line at `index` (0 = oldest retained).
    pub fn get(&self, index: usize) -> Option<&Arc<StyledLine>> {
        self.entries.get(index)
    }

    /// All retained lines, oldest first.
    pub fn entries(&self) -> &VecDeque<Arc<StyledLine>> {
        &self.entries
    }

    /// Clone the lines in the inclusive index range `start..=end`.
    ///
    /// Indices past the newest line are skipped.
    pub fn snapshot(&self, start: usize, end: usize) -> Vec<Arc<StyledLine>> {
        self.entries
            .iter()
            .skip(start)
            .take(end.saturating_sub(start) + 1)
            .cloned()
            .collect()
    }

    /// Running estimate of memory held by retained lines.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// [`byte_size`](Self::byte_size) formatted for display, e.g. `"1.50 KB"`.
    pub fn human_readable_byte_size(&self) -> String {
        human_readable_size(self.byte_size)
    }

    /// Lifetime count of lines seen from `channel` since the last clear.
    pub fn channel_count(&self, channel: &str) -> usize {
        self.channel_counts.get(channel).copied().unwrap_or(0)
    }

    /// Lines ever appended per channel, evicted ones included.
    pub fn channel_counts(&self) -> &BTreeMap<String, usize> {
        &self.channel_counts
    }

    /// Prefix width recorded from the first line seen on `channel`.
    pub fn channel_prefix_width(&self, channel: &str) -> Option<usize> {
        self.channel_prefix_widths.get(channel).copied()
    }

    /// Widest channel prefix; continuation rows are indented by this much.
    pub fn longest_prefix_width(&self) -> usize {
        self.longest_prefix_width
    }

    /// Per-channel counts as `"name: count"` pairs sorted by channel name.
    pub fn channel_counts_summary(&self) -> String {
        self.channel_counts
            .iter()
            .map(|(channel, count)| format!("{channel}: {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether lines were appended or cleared since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Format a byte count with binary (1024) scaling and two decimals.
///
/// ```
/// use logpane::state::human_readable_size;
/// assert_eq!(human_readable_size(1536), "1.50 KB");
/// ```
pub fn human_readable_size(bytes: usize) -> String {
    let mut size = bytes as f64;
    let mut unit = SIZE_UNITS[0];
    for candidate in SIZE_UNITS {
        unit = candidate;
        if size < 1024.0 || candidate == SIZE_UNITS[SIZE_UNITS.len() - 1] {
            break;
        }
        size /= 1024.0;
    }
    format!("{size:.2} {unit}")
}
