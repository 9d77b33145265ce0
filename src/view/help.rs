//! Help overlay listing the active key bindings.
//!
//! Toggled by F1 or '?', dismissed by Esc or 'q'. The text is generated from
//! [`KeyBindings`], so rebound keys show up as bound.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use crate::config::KeyBindings;
use crate::model::{HelpSection, KeyAction};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SECTIONS: [HelpSection; 3] = [
    HelpSection::Navigation,
    HelpSection::LogPane,
    HelpSection::Application,
];

/// Columns of `-` fill after the longest description.
const DESCRIPTION_FILL: usize = 3;

/// Render the help popup centered over whatever is already drawn.
pub fn render_help_overlay(frame: &mut Frame, key_bindings: &KeyBindings) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    if popup_area.width == 0 || popup_area.height == 0 {
        return;
    }

    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(help_lines(key_bindings))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left);
    frame.render_widget(help, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc, q or F1 to close ",
        Style::default().add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Help text: one heading per section, then one row per bound action.
///
/// Each row is the description padded with `-` to a shared width, followed
/// by the action's keys. Unbound actions and empty sections are left out.
pub fn help_lines(key_bindings: &KeyBindings) -> Vec<Line<'static>> {
    let heading_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let entries: Vec<(KeyAction, Vec<String>)> = KeyAction::ALL
        .iter()
        .map(|&action| (action, key_bindings.keys_for(action)))
        .filter(|(_, keys)| !keys.is_empty())
        .collect();
    let fill_to = entries
        .iter()
        .map(|(action, _)| action.description().len())
        .max()
        .unwrap_or(0)
        + DESCRIPTION_FILL;

    let mut lines = Vec::new();
    for section in SECTIONS {
        let mut section_entries = entries
            .iter()
            .filter(|(action, _)| action.help_section() == section)
            .peekable();
        if section_entries.peek().is_none() {
            continue;
        }

        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(section.title(), heading_style)));
        for (action, keys) in section_entries {
            let description = format!("{} ", action.description());
            lines.push(Line::from(vec![
                Span::raw(format!("  {description:-<fill_to$}  ")),
                Span::styled(keys.join(", "), key_style),
            ]));
        }
    }
    lines
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
