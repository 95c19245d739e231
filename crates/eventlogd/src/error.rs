//! Error types for the `eventlog` binary.

use thiserror::Error;

use super::*;

/// Result alias used throughout the binary.
pub type Result<T> = core::result::Result<T, EventLogdError>;

/// Errors surfaced by the command line and terminal front ends.
#[derive(Error, Debug)]
pub enum EventLogdError {
  /// Loading the feed or the configuration failed.
  #[error(transparent)]
  EventLog(#[from] EventLogError),

  /// Terminal or file system IO failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An interactive prompt could not be shown.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// Installing the log subscriber failed.
  #[error("Failed to set up logging: {0}")]
  Logging(String),
}
