//! Tests for log pane state.

#![cfg(test)]

use super::{LogPaneOptions, LogPaneState};
use crate::model::KeyAction;
use crate::state::LogSink;
use chrono::Local;
use ratatui::style::Style;

/// Helper to create a pane with `count` lines and the given geometry.
fn pane_with_lines(count: usize, width: u16, height: u16) -> LogPaneState {
    let sink = LogSink::detached(1000);
    for i in 0..count {
        let message = format!("message {i}");
        sink.submit("app", Local::now(), &message, &format!("INF {message}"));
    }
    let mut pane = LogPaneState::new(sink, LogPaneOptions::default(), Style::default());
    pane.set_pane_size(width, height);
    pane
}

#[test]
fn new_pane_uses_options() {
    let options = LogPaneOptions {
        follow: false,
        wrap_lines: false,
        show_toolbar: false,
    };
    let pane = LogPaneState::new(LogSink::detached(10), options, Style::default());

    assert!(!pane.is_following());
    assert!(!pane.wrap_lines());
    assert!(!pane.show_toolbar());
}

#[test]
fn following_pane_selects_newest_after_resize() {
    let pane = pane_with_lines(10, 80, 5);

    assert_eq!(pane.selected_index(), 9);
    assert!(pane.is_following());
}

#[test]
fn on_append_tracks_new_lines_while_following() {
    let mut pane = pane_with_lines(3, 80, 5);

    pane.sink().submit("app", Local::now(), "late", "INF late");
    pane.on_append();

    assert_eq!(pane.selected_index(), 3);
}

#[test]
fn scroll_up_stops_following() {
    let mut pane = pane_with_lines(10, 80, 5);

    assert!(pane.handle_action(KeyAction::ScrollUp));

    assert!(!pane.is_following());
    assert_eq!(pane.selected_index(), 8);
}

#[test]
fn page_down_moves_by_window_height() {
    let mut pane = pane_with_lines(100, 80, 10);
    pane.handle_action(KeyAction::ScrollToTop);

    pane.handle_action(KeyAction::PageDown);

    assert_eq!(pane.selected_index(), 10);
}

#[test]
fn scroll_to_bottom_after_top_selects_newest() {
    let mut pane = pane_with_lines(20, 80, 5);
    pane.handle_action(KeyAction::ScrollToTop);

    pane.handle_action(KeyAction::ScrollToBottom);

    assert_eq!(pane.selected_index(), 19);
    assert!(!pane.is_following(), "bottom does not re-enable follow");
}

#[test]
fn toggle_follow_snaps_to_newest() {
    let mut pane = pane_with_lines(20, 80, 5);
    pane.handle_action(KeyAction::ScrollToTop);

    pane.handle_action(KeyAction::ToggleFollow);

    assert!(pane.is_following());
    assert_eq!(pane.selected_index(), 19);
}

#[test]
fn toggles_flip_wrap_and_toolbar() {
    let mut pane = pane_with_lines(1, 80, 5);

    pane.handle_action(KeyAction::ToggleWrap);
    pane.handle_action(KeyAction::ToggleToolbar);

    assert!(!pane.wrap_lines());
    assert!(!pane.show_toolbar());
}

#[test]
fn quit_is_not_handled_by_pane() {
    let mut pane = pane_with_lines(1, 80, 5);

    assert!(!pane.handle_action(KeyAction::Quit));
}

#[test]
fn help_toggle_is_left_to_the_app() {
    let mut pane = pane_with_lines(3, 80, 5);
    let before = pane.selected_index();

    assert!(!pane.handle_action(KeyAction::ToggleHelp));
    assert_eq!(pane.selected_index(), before);
}

#[test]
fn clear_logs_empties_buffer_and_resets_selection() {
    let mut pane = pane_with_lines(10, 80, 5);
    pane.handle_action(KeyAction::ScrollUp);

    pane.handle_action(KeyAction::ClearLogs);

    assert_eq!(pane.sink().total_count(), 0);
    assert_eq!(pane.selected_index(), 0);
}

#[test]
fn draw_places_cursor_on_selected_row() {
    let mut pane = pane_with_lines(3, 80, 5);

    pane.draw();

    assert_eq!(pane.cursor_position().row, 2);
    assert!(!pane.needs_redraw());
}

#[test]
fn click_while_following_is_ignored() {
    let mut pane = pane_with_lines(10, 80, 5);
    pane.draw();

    pane.click(0);

    assert_eq!(pane.selected_index(), 9);
}

#[test]
fn click_moves_selection_to_clicked_row() {
    let mut pane = pane_with_lines(10, 80, 5);
    pane.handle_action(KeyAction::ToggleFollow);
    pane.draw();
    // Selection 9 renders on row 4 of a 5-row window (lines 5..=9).

    pane.click(1);

    assert_eq!(pane.selected_index(), 6);
}

#[test]
fn scroll_wheel_moves_one_line_per_notch() {
    let mut pane = pane_with_lines(10, 80, 5);

    pane.scroll_wheel(-2);

    assert_eq!(pane.selected_index(), 7);
    assert!(!pane.is_following());
}

#[test]
fn toolbar_status_reports_buffer_statistics() {
    let pane = pane_with_lines(3, 80, 5);

    let status = pane.toolbar_status();

    assert!(status.following);
    assert!(status.wrap_lines);
    assert_eq!(status.total_count, 3);
    assert_eq!(status.channel_summary, "app: 3");
    assert!(status.byte_size.ends_with(" B") || status.byte_size.ends_with("KB"));
}
