//! UI styling constants for the terminal viewer.

use ratatui::style::{Color, Modifier, Style};

/// Style for help text and secondary information.
pub const HELP: Style = Style::new().fg(Color::DarkGray);

/// Style for the currently selected row.
pub const HIGHLIGHT: Style =
  Style::new().bg(Color::DarkGray).fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// Style for keyboard shortcuts and interactive elements.
pub const KEY_HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for table column headers.
pub const LABEL: Style = Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD);

/// Style for regular text content.
pub const NORMAL: Style = Style::new().fg(Color::Gray);

/// Style for section titles.
pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for event codes.
pub const CODE: Style = Style::new().fg(Color::LightYellow);

/// Style for the border of the event table.
pub const BORDER: Style = Style::new().fg(Color::LightBlue);

/// Returns the style of a navigation control.
///
/// # Arguments
///
/// * `enabled` - Whether the control can currently be used
pub fn control_style(enabled: bool) -> Style {
  if enabled {
    KEY_HIGHLIGHT
  } else {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
  }
}
