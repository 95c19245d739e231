//! State management for the terminal viewer.
//!
//! [`UIState`] wraps the library's [`ViewState`] with what only the terminal needs: the
//! selected row, the active dialog and the redraw flag. Key presses are turned into
//! [`Action`]s for the run loop, which owns the background loads.

use crossterm::event::KeyCode;
use eventlog::{
  error::EventLogError,
  feed::RequestToken,
  pagination::{Navigation, Pager},
  viewer::{PageView, ViewState},
};
use ratatui::widgets::TableState;

use super::*;

/// Represents the current active dialog in the UI.
#[derive(Debug, PartialEq)]
pub enum DialogType {
  /// No dialog is currently active
  None,
  /// Showing the exit confirmation dialog
  ExitConfirm,
  /// Showing a failed load until dismissed
  Error(String),
}

/// What the run loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Nothing beyond redrawing
  None,
  /// Fetch the current page
  Load,
  /// Leave the viewer
  Quit,
}

/// Maintains the complete state of the terminal interface.
pub struct UIState {
  /// Events, total count, position and load tracking
  pub view:         ViewState,
  /// UI language
  pub locale:       Locale,
  /// Current selection in the event table
  pub selected:     TableState,
  /// Current active dialog (if any)
  pub dialog:       DialogType,
  /// Whether the UI needs to be redrawn
  pub needs_redraw: bool,
  /// Ticks since the current load started, drives the loading indicator
  pub ticks:        usize,
}

impl UIState {
  /// Creates a new UI state positioned on the first page of `pager`.
  pub fn new(pager: Pager, locale: Locale) -> Self {
    Self {
      view: ViewState::new(pager),
      locale,
      selected: TableState::default(),
      dialog: DialogType::None,
      needs_redraw: true,
      ticks: 0,
    }
  }

  /// Marks a load of the current page as started.
  pub fn begin_load(&mut self) -> RequestToken {
    self.ticks = 0;
    self.needs_redraw = true;
    self.view.begin_load()
  }

  /// Applies a finished load, opening the error dialog if it failed.
  pub fn apply_loaded(&mut self, token: RequestToken, result: eventlog::error::Result<PageView>) {
    if let Some(error) = self.view.apply(token, result) {
      self.dialog = DialogType::from(&error);
    }
    self.selected.select(if self.view.events.is_empty() { None } else { Some(0) });
    self.needs_redraw = true;
  }

  /// Navigation state for the current page.
  pub fn navigation(&self) -> Navigation { self.view.navigation() }

  /// Advances the loading indicator.
  pub fn tick(&mut self) {
    if self.view.loading {
      self.ticks = self.ticks.wrapping_add(1);
      self.needs_redraw = true;
    }
  }

  /// Handles a key press and returns what the run loop should do next.
  pub fn handle_input(&mut self, key: KeyCode) -> Action {
    match &self.dialog {
      DialogType::ExitConfirm => self.handle_exit_dialog(key),
      DialogType::Error(_) => self.handle_error_dialog(key),
      DialogType::None => self.handle_normal_input(key),
    }
  }

  /// Handles input while the exit confirmation dialog is active.
  ///
  /// Returns [`Action::Quit`] only if the user confirms.
  fn handle_exit_dialog(&mut self, key: KeyCode) -> Action {
    match key {
      KeyCode::Char('y') => Action::Quit,
      KeyCode::Char('n') | KeyCode::Esc => {
        self.dialog = DialogType::None;
        self.needs_redraw = true;
        Action::None
      },
      _ => Action::None,
    }
  }

  /// Handles input while a load error is shown.
  fn handle_error_dialog(&mut self, key: KeyCode) -> Action {
    if matches!(key, KeyCode::Enter | KeyCode::Esc) {
      self.dialog = DialogType::None;
      self.needs_redraw = true;
    }
    Action::None
  }

  /// Handles input during normal operation (no dialog active).
  fn handle_normal_input(&mut self, key: KeyCode) -> Action {
    match key {
      KeyCode::Char('q') => {
        self.dialog = DialogType::ExitConfirm;
        self.needs_redraw = true;
        Action::None
      },
      KeyCode::Left | KeyCode::Char('h') => self.turn_page(|view| view.pager.prev()),
      KeyCode::Right | KeyCode::Char('l') => {
        self.turn_page(|view| {
          let total_count = view.total_count;
          view.pager.next(total_count)
        })
      },
      KeyCode::Up | KeyCode::Char('k') => {
        if let Some(i) = self.selected.selected().filter(|&i| i > 0) {
          self.selected.select(Some(i - 1));
          self.needs_redraw = true;
        }
        Action::None
      },
      KeyCode::Down | KeyCode::Char('j') => {
        if let Some(i) = self.selected.selected().filter(|&i| i + 1 < self.view.events.len()) {
          self.selected.select(Some(i + 1));
          self.needs_redraw = true;
        }
        Action::None
      },
      KeyCode::Char('r') => Action::Load,
      _ => Action::None,
    }
  }

  /// Moves the pager and asks for a load if the page changed.
  fn turn_page(&mut self, step: impl FnOnce(&mut ViewState) -> bool) -> Action {
    if step(&mut self.view) {
      self.needs_redraw = true;
      Action::Load
    } else {
      Action::None
    }
  }
}

impl From<&EventLogError> for DialogType {
  fn from(error: &EventLogError) -> Self { DialogType::Error(error.to_string()) }
}
