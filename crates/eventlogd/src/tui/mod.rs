//! Terminal viewer for event-log feeds.
//!
//! Shows one page of events as a table with previous/next controls underneath. Every
//! page change starts a fetch on a background task; results arrive through the event
//! channel and are applied only if no newer fetch has been started since.
//!
//! # Navigation
//!
//! - Left/h, Right/l: previous and next page
//! - Up/k, Down/j: move the row selection
//! - r: reload the current page
//! - q: quit (asks for confirmation)
//!
//! # Notes
//! The viewer is enabled through the "tui" feature flag. When enabled, it becomes the
//! default interface when no command is specified.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eventlog::viewer::FeedViewer;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use self::{
  event::{Event, EventHandler},
  state::{Action, UIState},
  ui::UIDrawer,
};
use super::*;

pub mod event;
pub mod state;
pub mod styles;
pub mod ui;

/// How long to wait for input before advancing the loading indicator.
const TICK_RATE: Duration = Duration::from_millis(150);

/// Runs the terminal viewer.
///
/// The terminal is restored to its original state when the function returns, whether
/// the loop ended normally or with an error.
///
/// # Errors
///
/// Returns an [`EventLogdError`] if the configuration is invalid or the terminal cannot
/// be set up or drawn to. Failed feed loads are shown in a dialog instead.
pub async fn run(cli: &Cli) -> Result<()> {
  let config = cli.load_config()?;
  let mut state = UIState::new(config.pager()?, config.locale);
  let viewer = Arc::new(FeedViewer::new(config));

  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

  let result = event_loop(&mut terminal, &mut state, viewer).await;

  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()?;

  result
}

/// Draws and dispatches events until the user quits.
async fn event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  state: &mut UIState,
  viewer: Arc<FeedViewer>,
) -> Result<()> {
  let mut events = EventHandler::new(TICK_RATE);
  spawn_load(state, &viewer, events.sender());

  loop {
    if state.needs_redraw {
      terminal.draw(|f| UIDrawer::new(f, state).draw())?;
    }

    let Some(event) = events.next().await else {
      break;
    };
    match event {
      Event::Key(key) => match state.handle_input(key.code) {
        Action::Quit => break,
        Action::Load => spawn_load(state, &viewer, events.sender()),
        Action::None => {},
      },
      Event::Resize(..) => state.needs_redraw = true,
      Event::Tick => state.tick(),
      Event::Loaded(token, result) => state.apply_loaded(token, *result),
    }
  }

  Ok(())
}

/// Starts loading the current page in the background.
fn spawn_load(state: &mut UIState, viewer: &Arc<FeedViewer>, tx: mpsc::Sender<Event>) {
  let token = state.begin_load();
  let page = state.view.pager.page();
  let viewer = Arc::clone(viewer);
  debug!("Loading page {} as {:?}", page, token);

  tokio::spawn(async move {
    let result = viewer.load_page(page).await;
    if tx.send(Event::Loaded(token, Box::new(result))).await.is_err() {
      trace!("Viewer closed before page {} finished loading", page);
    }
  });
}
