//! Integration test for the tracing → buffer → pane → screen pipeline.
//!
//! Tests the end-to-end flow of tracing events being captured and displayed.

use chrono::Local;
use logpane::config::KeyBindings;
use logpane::logging::LogPaneLayer;
use logpane::model::KeyAction;
use logpane::state::{LogPaneOptions, LogPaneState, LogSink};
use logpane::view::{ChannelRedraw, PaneStyles, TuiApp};
use logpane::view_state::{RedrawThrottle, RedrawTrigger};
use ratatui::backend::TestBackend;
use ratatui::style::Style;
use ratatui::Terminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Default)]
struct CountingRedraw(AtomicUsize);

impl RedrawTrigger for CountingRedraw {
    fn trigger_redraw(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn capture<R>(sink: &LogSink, f: impl FnOnce() -> R) -> R {
    let subscriber = tracing_subscriber::registry().with(LogPaneLayer::new(sink.clone()));
    tracing::subscriber::with_default(subscriber, f)
}

fn pane_text(pane: &mut LogPaneState) -> String {
    pane.draw().iter().map(|f| f.text.as_str()).collect()
}

// ===== Tracing to buffer =====

#[test]
fn tracing_events_reach_the_pane() {
    // GIVEN: a pane whose sink is fed by the tracing layer
    let sink = LogSink::detached(100);
    let mut pane = LogPaneState::new(sink.clone(), LogPaneOptions::default(), Style::default());
    pane.set_pane_size(120, 10);

    // WHEN: events are emitted at several levels
    capture(&sink, || {
        info!("unique_test_info");
        warn!("unique_test_warn");
        error!("unique_test_error");
    });

    // THEN: all three are stored in order and rendered with level tags
    assert_eq!(sink.total_count(), 3);
    let text = pane_text(&mut pane);
    let info_pos = text.find("INF unique_test_info").expect("info line rendered");
    let warn_pos = text.find("WRN unique_test_warn").expect("warn line rendered");
    let error_pos = text.find("ERR unique_test_error").expect("error line rendered");
    assert!(info_pos < warn_pos && warn_pos < error_pos, "oldest line first");
    assert_eq!(pane.selected_index(), 2, "follow mode selects the newest line");
}

#[test]
fn channels_are_counted_per_target() {
    let sink = LogSink::detached(100);

    capture(&sink, || {
        info!(target: "fake_device.1", "a");
        info!(target: "fake_device.1", "b");
        info!(target: "host", "c");
    });

    let summary = sink.with_buffer(|buffer| buffer.channel_counts_summary());
    assert_eq!(summary, "fake_device.1: 2, host: 1");
}

// ===== Capacity and clearing =====

#[test]
fn bounded_history_evicts_oldest_and_keeps_counts() {
    let sink = LogSink::detached(5);
    let mut pane = LogPaneState::new(sink.clone(), LogPaneOptions::default(), Style::default());
    pane.set_pane_size(80, 10);

    capture(&sink, || {
        for i in 0..12 {
            info!(target: "app", "message {i}");
        }
    });

    assert_eq!(sink.total_count(), 5, "only capacity lines are kept");
    let text = pane_text(&mut pane);
    assert!(text.contains("message 7") && text.contains("message 11"));
    assert!(!text.contains("message 6"), "evicted line must not render");
    let counted = sink.with_buffer(|buffer| buffer.channel_count("app"));
    assert_eq!(counted, 12, "channel counts include evicted lines");
}

#[test]
fn clear_action_empties_buffer_and_resets_selection() {
    let sink = LogSink::detached(100);
    let mut pane = LogPaneState::new(sink.clone(), LogPaneOptions::default(), Style::default());
    pane.set_pane_size(80, 5);
    for i in 0..20 {
        sink.submit("app", Local::now(), &format!("m{i}"), &format!("m{i}"));
    }
    pane.handle_action(KeyAction::ScrollUp);

    pane.handle_action(KeyAction::ClearLogs);

    assert_eq!(sink.total_count(), 0);
    assert_eq!(pane.selected_index(), 0);
    assert_eq!(pane_text(&mut pane), " \n", "empty buffer renders a blank line");
    assert_eq!(pane.toolbar_status().byte_size, "0.00 B");
}

// ===== Follow mode =====

#[test]
fn paused_pane_keeps_selection_while_lines_arrive() {
    let sink = LogSink::detached(100);
    let mut pane = LogPaneState::new(sink.clone(), LogPaneOptions::default(), Style::default());
    pane.set_pane_size(80, 5);
    for i in 0..10 {
        sink.submit("app", Local::now(), &format!("m{i}"), &format!("m{i}"));
    }

    // GIVEN: user scrolled up, which pauses following
    pane.handle_action(KeyAction::PageUp);
    assert_eq!(pane.selected_index(), 4);
    assert!(!pane.is_following());

    // WHEN: more lines arrive
    for i in 10..15 {
        sink.submit("app", Local::now(), &format!("m{i}"), &format!("m{i}"));
    }
    pane.on_append();
    pane.draw();

    // THEN: the selection is untouched until follow is re-enabled
    assert_eq!(pane.selected_index(), 4);
    pane.handle_action(KeyAction::ToggleFollow);
    assert_eq!(pane.selected_index(), 14);
}

// ===== Redraw throttling =====

#[test]
fn burst_of_appends_triggers_one_redraw() {
    let counter = Arc::new(CountingRedraw::default());
    let long_ago = Instant::now()
        .checked_sub(Duration::from_secs(10))
        .expect("clock is past ten seconds");
    let throttle = RedrawThrottle::starting_at(counter.clone(), Duration::from_secs(5), long_ago);
    let sink = LogSink::new(10_000, throttle);

    for i in 0..1000 {
        sink.submit("app", Local::now(), &format!("m{i}"), &format!("m{i}"));
    }

    assert_eq!(sink.total_count(), 1000);
    assert_eq!(
        counter.0.load(Ordering::SeqCst),
        1,
        "a burst within one interval must coalesce into a single redraw"
    );
}

#[test]
fn producer_thread_wakes_event_loop() {
    // GIVEN: a TUI app whose sink signals through a channel
    let (tx, rx) = mpsc::channel();
    let throttle = RedrawThrottle::starting_at(
        Arc::new(ChannelRedraw::new(tx)),
        Duration::from_millis(1),
        Instant::now(),
    );
    let sink = LogSink::new(100, throttle);
    let styles = PaneStyles::default();
    let pane = LogPaneState::new(sink.clone(), LogPaneOptions::default(), styles.selected_line);
    let terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    let mut app = TuiApp::with_terminal(terminal, pane, KeyBindings::default(), styles, rx);
    app.draw().unwrap();

    // WHEN: another thread logs after the interval has passed
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        sink.submit("worker", Local::now(), "from thread", "from thread");
    });
    producer.join().unwrap();

    // THEN: the next tick repaints with the new line selected
    assert!(app.tick().unwrap(), "tick should redraw after a request");
    assert_eq!(app.pane().selected_index(), 0);
    let buffer = app.terminal().backend().buffer();
    let first_row: String = (0..40).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
    assert_eq!(first_row.trim_end(), "from thread");
}
