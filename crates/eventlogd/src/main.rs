//! Command line interface and terminal viewer for event-log feeds.
//!
//! The `eventlog` binary loads a paginated event feed through the [`eventlog`] library
//! and shows it either as a plain table on stdout or, with the `tui` feature enabled, in
//! an interactive terminal viewer.
//!
//! # Usage
//!
//! ```bash
//! # Write a default configuration file
//! eventlog init
//!
//! # Print the first page of the configured feed
//! eventlog show
//!
//! # Print page 4 of a feed served somewhere else, in Russian
//! eventlog --source http://localhost:3000/EventLog_GetEventsLog.xml --locale ru show --page 4
//!
//! # Print every event of a local file
//! eventlog --source ./EventLog_GetEventsLog.xml show --all
//! ```
//!
//! Verbosity is raised with repeated `-v` flags; `RUST_LOG` overrides it.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use eventlog::{configuration::Config, error::EventLogError, feed::FeedSource, locale::Locale};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;
#[cfg(feature = "tui")] pub mod tui;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Viewer for paginated event-log feeds")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Feed location overriding the configured one: an `http(s)://` URL of the document or
  /// a local file path
  #[arg(long, short, global = true)]
  source: Option<String>,

  /// UI language (`en` or `ru`)
  #[arg(long, short, global = true)]
  locale: Option<String>,

  /// Number of events per page
  #[arg(long, global = true)]
  per_page: Option<usize>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Location of the configuration file in use.
  pub fn config_path(&self) -> Result<PathBuf> {
    match &self.config {
      Some(path) => Ok(path.clone()),
      None => Ok(Config::default_path()?),
    }
  }

  /// The configuration file merged with the command line overrides.
  pub fn load_config(&self) -> Result<Config> {
    let path = self.config_path()?;
    trace!("Using configuration at: {}", path.display());
    self.apply_overrides(Config::load_or_default(&path)?)
  }

  /// Applies `--source`, `--locale` and `--per-page` on top of `config`.
  pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
    if let Some(source) = &self.source {
      config = config.with_source(FeedSource::parse_location(source)?);
    }
    if let Some(locale) = &self.locale {
      config = config.with_locale(Locale::from(locale.as_str()));
    }
    if let Some(per_page) = self.per_page {
      config = config.with_per_page(per_page);
    }
    config.validate()?;
    debug!("Feed source: {}", config.source);
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
/// * `log_file` - Write logs to this file instead of stderr, used while the terminal
///   viewer owns the screen
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(
  verbosity: u8,
  log_file: Option<PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true);

  match log_file {
    Some(path) => {
      let directory = path.parent().map(PathBuf::from).unwrap_or_default();
      let file_name = path.file_name().map(PathBuf::from).unwrap_or_else(|| "eventlog.log".into());
      let appender = tracing_appender::rolling::never(directory, file_name);
      let (writer, guard) = tracing_appender::non_blocking(appender);
      builder
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| EventLogdError::Logging(e.to_string()))?;
      Ok(Some(guard))
    },
    None => {
      builder
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| EventLogdError::Logging(e.to_string()))?;
      Ok(None)
    },
  }
}

/// The command run when none is given: the terminal viewer.
#[cfg(feature = "tui")]
fn default_command() -> Commands { Commands::Tui }

/// The command run when none is given: the first page on stdout.
#[cfg(not(feature = "tui"))]
fn default_command() -> Commands { Commands::Show(ShowOptions::default()) }

/// Entry point for the `eventlog` binary
///
/// Parses the command line, sets up logging and runs the requested command. Without a
/// command the terminal viewer starts when it is compiled in; otherwise the first page
/// is printed.
///
/// # Errors
///
/// Returns an [`EventLogdError`] when the configuration is invalid, the feed cannot be
/// loaded, or the terminal cannot be used.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let command = cli.command.clone().unwrap_or_else(default_command);

  let log_file = match command {
    #[cfg(feature = "tui")]
    Commands::Tui => Some(std::env::temp_dir().join("eventlog.log")),
    _ => None,
  };
  let _guard = setup_logging(cli.verbose, log_file)?;

  let result = match command {
    Commands::Init(init_options) => init(&cli, init_options),
    Commands::Show(show_options) => show(&cli, show_options).await,
    #[cfg(feature = "tui")]
    Commands::Tui => tui::run(&cli).await,
  };

  if let Err(e) = &result {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(e).red());
  }
  result
}
