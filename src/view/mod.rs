//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod help;
mod log_pane;
mod styles;
mod toolbar;

pub use log_pane::{LogPaneView, PaneLayout, RenderedPane};
pub use styles::{ColorConfig, PaneStyles};
pub use toolbar::Toolbar;

use crate::config::{ConfigError, KeyBindings};
use crate::logging::LoggingError;
use crate::model::KeyAction;
use crate::state::LogPaneState;
use crate::view_state::RedrawTrigger;
use constants::{EVENT_POLL_INTERVAL, TOOLBAR_HEIGHT};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
};
use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, Sender};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

// ===== ChannelRedraw =====

/// [`RedrawTrigger`] that posts a wake-up message to the event loop.
///
/// Sending never blocks; a closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelRedraw {
    tx: Sender<()>,
}

impl ChannelRedraw {
    /// Wrap the sending half of the event loop channel.
    pub fn new(tx: Sender<()>) -> Self {
        Self { tx }
    }
}

impl RedrawTrigger for ChannelRedraw {
    fn trigger_redraw(&self) {
        let _ = self.tx.send(());
    }
}

// ===== TuiApp =====

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    pane: LogPaneState,
    key_bindings: KeyBindings,
    styles: PaneStyles,
    redraw_rx: Receiver<()>,
    /// Last rendered pane area (for mouse click detection)
    pane_area: Rect,
    /// Logical line behind each visible pane row in the last frame
    row_lines: Vec<usize>,
    show_help: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        pane: LogPaneState,
        redraw_rx: Receiver<()>,
        styles: PaneStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal,
            pane,
            KeyBindings::default(),
            styles,
            redraw_rx,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Ctrl+C or Ctrl+Q).
    /// Input events repaint immediately; log traffic repaints on the next
    /// tick after a throttled redraw request.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(EVENT_POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.draw()?;
                    }
                    _ => {}
                }
            } else {
                self.tick()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app around an existing terminal.
    ///
    /// Performs no terminal mode changes, so tests and benchmarks can pass
    /// a `TestBackend`.
    pub fn with_terminal(
        terminal: Terminal<B>,
        pane: LogPaneState,
        key_bindings: KeyBindings,
        styles: PaneStyles,
        redraw_rx: Receiver<()>,
    ) -> Self {
        Self {
            terminal,
            pane,
            key_bindings,
            styles,
            redraw_rx,
            pane_area: Rect::default(),
            row_lines: Vec::new(),
            show_help: false,
        }
    }

    /// Handle a timer tick.
    ///
    /// Drains pending redraw requests and repaints once if any arrived or
    /// the buffer changed since the last frame. Returns whether a frame was
    /// drawn.
    pub fn tick(&mut self) -> Result<bool, TuiError> {
        let mut requested = false;
        while self.redraw_rx.try_recv().is_ok() {
            requested = true;
        }

        if requested || self.pane.needs_redraw() {
            self.pane.on_append();
            self.draw()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let closes_help = key.modifiers == KeyModifiers::NONE
            && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'));
        if self.show_help && closes_help {
            self.show_help = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleHelp => {
                self.show_help = !self.show_help;
                debug!(show_help = self.show_help, "Help overlay toggled");
            }
            _ => {
                self.pane.handle_action(action);
            }
        }
        false
    }

    /// Handle a single mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.pane.scroll_wheel(-1),
            MouseEventKind::ScrollDown => self.pane.scroll_wheel(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.pane_area;
                if mouse.row < area.top() || mouse.row >= area.bottom() {
                    return;
                }
                let row = usize::from(mouse.row - area.top());
                if let Some(&line) = self.row_lines.get(row) {
                    self.pane.click(line);
                }
            }
            _ => {}
        }
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let (pane_area, toolbar_area) = split_areas(frame_area, self.pane.show_toolbar());
        self.pane_area = pane_area;

        self.pane.set_pane_size(pane_area.width, pane_area.height);
        let fragments = self.pane.draw();
        let line_starts = self.pane.line_starts();
        let status = toolbar_area.map(|_| self.pane.toolbar_status());
        let wrap_lines = self.pane.wrap_lines();
        let indent = self.pane.continuation_indent();
        let styles = self.styles;
        let show_help = self.show_help;
        let key_bindings = &self.key_bindings;

        let mut rendered = RenderedPane::default();
        self.terminal.draw(|frame| {
            rendered = LogPaneView::new(&fragments, wrap_lines, indent)
                .with_line_starts(&line_starts)
                .render_frame(pane_area, frame.buffer_mut());
            if let (Some(area), Some(status)) = (toolbar_area, status.as_ref()) {
                frame.render_widget(Toolbar::new(status, &styles), area);
            }
            if show_help {
                help::render_help_overlay(frame, key_bindings);
            } else if let Some(position) = rendered.cursor {
                frame.set_cursor_position(position);
            }
        })?;
        self.row_lines = rendered.row_lines;

        Ok(())
    }

    /// Whether the help overlay is showing.
    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Pane state driven by this app.
    pub fn pane(&self) -> &LogPaneState {
        &self.pane
    }

    /// Area the log pane occupied in the last frame.
    pub fn pane_area(&self) -> Rect {
        self.pane_area
    }

    /// Terminal the app draws into.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Split the frame into pane and optional toolbar rows.
fn split_areas(area: Rect, show_toolbar: bool) -> (Rect, Option<Rect>) {
    if !show_toolbar || area.height <= TOOLBAR_HEIGHT {
        return (area, None);
    }
    let [pane, toolbar] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(TOOLBAR_HEIGHT)]).areas(area);
    (pane, Some(toolbar))
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_pane(
    pane: LogPaneState,
    redraw_rx: Receiver<()>,
    styles: PaneStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(pane, redraw_rx, styles)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
