//! Event handling for the terminal viewer.
//!
//! Terminal input is read on a blocking thread and forwarded through a channel. Feed
//! loads running in the background report back through the same channel, so the main
//! loop has a single place to wait on.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eventlog::{feed::RequestToken, viewer::PageView};
use tokio::sync::mpsc;

/// Events that can occur in the application
#[derive(Debug)]
pub enum Event {
  /// Key press events
  Key(KeyEvent),
  /// Terminal resize events
  Resize(u16, u16),
  /// No input arrived within the tick rate
  Tick,
  /// A feed load finished
  Loaded(RequestToken, Box<eventlog::error::Result<PageView>>),
}

/// Event handler that manages input, timer and load events
pub struct EventHandler {
  /// Sender half of event channel, cloned for background loads
  tx: mpsc::Sender<Event>,
  /// Receiver half of event channel
  rx: mpsc::Receiver<Event>,
}

impl EventHandler {
  /// Creates a new event handler.
  ///
  /// # Arguments
  /// * `tick_rate` - How long to wait for input before sending a tick
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::channel(100);
    let event_tx = tx.clone();

    tokio::task::spawn_blocking(move || loop {
      let event = match event::poll(tick_rate) {
        Ok(true) => match event::read() {
          Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
          Ok(CrosstermEvent::Resize(width, height)) => Event::Resize(width, height),
          Ok(_) => continue,
          Err(e) => {
            tracing::error!("Reading terminal input failed: {}", e);
            break;
          },
        },
        Ok(false) => Event::Tick,
        Err(e) => {
          tracing::error!("Polling terminal input failed: {}", e);
          break;
        },
      };
      if event_tx.blocking_send(event).is_err() {
        break;
      }
    });

    Self { tx, rx }
  }

  /// A sender for reporting finished loads.
  pub fn sender(&self) -> mpsc::Sender<Event> { self.tx.clone() }

  /// Receives the next event from the event handler.
  ///
  /// This method will await the next event that occurs.
  pub async fn next(&mut self) -> Option<Event> { self.rx.recv().await }
}
