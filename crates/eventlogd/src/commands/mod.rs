//! Subcommands of the `eventlog` binary.

use super::*;

pub mod init;
pub mod show;

pub use init::{init, InitOptions};
pub use show::{show, ShowOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Launch the terminal viewer (default when no command is specified)
  #[cfg(feature = "tui")]
  #[clap(hide = true)]
  Tui,

  /// Write a configuration file with the defaults and the given overrides
  Init(InitOptions),

  /// Print one page of the feed as a table
  Show(ShowOptions),
}
