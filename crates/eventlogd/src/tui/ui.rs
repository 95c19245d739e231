//! Drawing and layout for the terminal viewer.
//!
//! The screen is a bordered event table over a one-line pagination bar and a help line.
//! Dialogs are drawn centered on top.

use eventlog::format::{format_timestamp, page_caption};
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
  style::{Color, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
  Frame,
};

use super::{
  state::{DialogType, UIState},
  *,
};

/// Frames of the loading indicator.
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Main drawer struct responsible for rendering the UI.
pub struct UIDrawer<'a, 'b> {
  /// Frame being rendered
  frame: &'a mut Frame<'b>,
  /// Current UI state
  state: &'a mut UIState,
}

impl<'a, 'b> UIDrawer<'a, 'b> {
  /// Creates a new drawer instance.
  pub fn new(frame: &'a mut Frame<'b>, state: &'a mut UIState) -> Self { Self { frame, state } }

  /// Draws the whole screen and clears the redraw flag.
  pub fn draw(&mut self) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .split(self.frame.area());

    self.draw_events(chunks[0]);
    self.draw_pagination(chunks[1]);
    self.draw_help_bar(chunks[2]);

    match &self.state.dialog {
      DialogType::ExitConfirm => self.draw_exit_dialog(),
      DialogType::Error(message) => {
        let message = message.clone();
        self.draw_error_dialog(&message);
      },
      DialogType::None => {},
    }

    self.state.needs_redraw = false;
  }

  /// Draws the event table, or the empty or loading placeholder.
  fn draw_events(&mut self, area: Rect) {
    let locale = self.state.locale;
    let mut title = vec![
      Span::styled(locale.t("events"), styles::TITLE),
      Span::styled(format!(" ({})", self.state.view.events.len()), styles::NORMAL),
    ];
    if self.state.view.loading {
      title.push(Span::styled(
        format!(" {} {}", SPINNER[self.state.ticks % SPINNER.len()], locale.t("loading")),
        styles::HELP,
      ));
    }
    let block = Block::default()
      .title(Line::from(title))
      .borders(Borders::ALL)
      .border_style(styles::BORDER);

    if self.state.view.events.is_empty() {
      let key = if self.state.view.loading { "loading" } else { "no_events_to_display" };
      let placeholder = locale.t(key);
      let paragraph = Paragraph::new(Span::styled(placeholder, styles::HELP))
        .alignment(Alignment::Center)
        .block(block);
      self.frame.render_widget(paragraph, area);
      return;
    }

    let header = Row::new(
      ["time", "code", "event"].map(|key| Cell::from(Span::styled(locale.t(key), styles::LABEL))),
    );
    let rows = self.state.view.events.iter().map(|event| {
      Row::new(vec![
        Cell::from(format_timestamp(event.timestamp.as_ref(), locale)).style(styles::NORMAL),
        Cell::from(event.code.to_string()).style(styles::CODE),
        Cell::from(event.description.clone()).style(Style::default().fg(Color::White)),
      ])
    });

    let table = Table::new(rows, [
      Constraint::Length(24),
      Constraint::Length(8),
      Constraint::Min(10),
    ])
    .header(header)
    .block(block)
    .row_highlight_style(styles::HIGHLIGHT)
    .highlight_symbol("▶ ");

    self.frame.render_stateful_widget(table, area, &mut self.state.selected);
  }

  /// Draws the previous/next controls around the page caption.
  fn draw_pagination(&mut self, area: Rect) {
    let locale = self.state.locale;
    let navigation = self.state.navigation();
    let caption = page_caption(self.state.view.pager.page(), self.state.view.max_page(), locale);

    let bar = Paragraph::new(Line::from(vec![
      Span::styled(format!("← {}", locale.t("prev")), styles::control_style(navigation.can_prev)),
      Span::styled("  │  ", Style::default().fg(Color::Blue)),
      Span::styled(caption, styles::NORMAL),
      Span::styled("  │  ", Style::default().fg(Color::Blue)),
      Span::styled(format!("{} →", locale.t("next")), styles::control_style(navigation.can_next)),
    ]))
    .alignment(Alignment::Center);
    self.frame.render_widget(bar, area);
  }

  /// Draws the help bar showing available commands.
  fn draw_help_bar(&mut self, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
      Span::styled("←→", styles::KEY_HIGHLIGHT),
      Span::styled(":page", styles::HELP),
      Span::styled(" • ", Style::default().fg(Color::Blue)),
      Span::styled("↑↓", styles::KEY_HIGHLIGHT),
      Span::styled(":select", styles::HELP),
      Span::styled(" • ", Style::default().fg(Color::Blue)),
      Span::styled("r", styles::KEY_HIGHLIGHT),
      Span::styled(":reload", styles::HELP),
      Span::styled(" • ", Style::default().fg(Color::Blue)),
      Span::styled("q", styles::KEY_HIGHLIGHT),
      Span::styled(format!(":{}", self.state.locale.t("quit")), styles::HELP),
    ]));
    self.frame.render_widget(help, area);
  }

  /// Draws the exit confirmation dialog.
  fn draw_exit_dialog(&mut self) {
    let locale = self.state.locale;
    let content = vec![
      Line::from(Span::styled(locale.t("quit_confirm"), Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(Span::styled(locale.t("confirm_hint"), styles::HELP)),
    ];

    self.draw_dialog(locale.t("quit"), &content, Color::Red);
  }

  /// Draws a failed load. The dialog blocks input until it is dismissed.
  fn draw_error_dialog(&mut self, message: &str) {
    let locale = self.state.locale;
    let content = vec![
      Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
      Line::from(""),
      Line::from(Span::styled(locale.t("dismiss_hint"), styles::HELP)),
    ];

    self.draw_dialog(locale.t("error"), &content, Color::Yellow);
  }

  /// Draws a centered dialog box with the given content.
  ///
  /// # Arguments
  ///
  /// * `title` - Dialog title
  /// * `content` - Lines to display
  /// * `color` - Color theme for the dialog
  fn draw_dialog(&mut self, title: &str, content: &[Line], color: Color) {
    let area = self.frame.area();
    let dialog_box = create_dialog_box(title, content, area);

    self.frame.render_widget(Clear, dialog_box);
    self.frame.render_widget(
      Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)).title(
        Span::styled(
          title.to_string(),
          Style::default().fg(color).add_modifier(ratatui::style::Modifier::BOLD),
        ),
      ),
      dialog_box,
    );

    self.frame.render_widget(
      Paragraph::new(content.to_vec()).alignment(Alignment::Center).wrap(Wrap { trim: true }),
      dialog_box.inner(Margin { vertical: 1, horizontal: 2 }),
    );
  }
}

/// Creates a centered dialog box sized to its content and clamped to the screen.
///
/// Lines wider than the screen are wrapped, and the box grows taller to hold them.
fn create_dialog_box(title: &str, content: &[Line], r: Rect) -> Rect {
  let content_width = content.iter().map(Line::width).max().unwrap_or(0);
  let wanted = title.chars().count().max(content_width).max(40);
  let width = u16::try_from(wanted).unwrap_or(u16::MAX).saturating_add(4).min(r.width);

  let text_width = usize::from(width.saturating_sub(4).max(1));
  let rows: usize = content.iter().map(|line| line.width().div_ceil(text_width).max(1)).sum();
  let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2).min(r.height);

  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length((r.height - height) / 2),
      Constraint::Length(height),
      Constraint::Length((r.height - height) / 2),
    ])
    .split(r);

  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Length((r.width - width) / 2),
      Constraint::Length(width),
      Constraint::Length((r.width - width) / 2),
    ])
    .split(popup_layout[1])[1]
}
