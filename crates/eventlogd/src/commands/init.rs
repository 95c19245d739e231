//! Module for writing an `eventlog` configuration file

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone, Debug, Default)]
pub struct InitOptions {
  /// Disable pagination and show the whole feed at once
  #[arg(long, action = ArgAction::SetTrue)]
  pub no_pagination: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
///
/// The configuration is written to `--config`, or to the default location. Without
/// `--source` the feed location is asked for interactively.
pub fn init(cli: &Cli, init_options: InitOptions) -> Result<()> {
  let path = cli.config_path()?;

  let mut config =
    cli.apply_overrides(Config::default())?.with_pagination(!init_options.no_pagination);
  if cli.source.is_none() {
    let location =
      cli.prompt("Where is the event feed served from?", &config.source.to_string())?;
    config = config.with_source(FeedSource::parse_location(location.trim())?);
  }

  if path.exists()
    && !cli.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      path.display()
    ))?
  {
    cli.reply(ResponseContent::Info(
      "Keeping the existing configuration. Pass a different location using --config",
    ))?;
    return Ok(());
  }

  config.save(&path)?;
  cli.reply(ResponseContent::Success(&format!(
    "Created eventlog configuration at {}\nFeed source: {}",
    path.display(),
    config.source
  )))?;
  Ok(())
}
