//! Module for printing the feed to stdout.

use eventlog::viewer::FeedViewer;

use super::*;

/// Options for [`Commands::Show`].
#[derive(Args, Clone, Debug)]
pub struct ShowOptions {
  /// Page to print, 1-based
  #[arg(long, short, default_value_t = 1)]
  pub page: usize,

  /// Print every event on a single page
  #[arg(long, short, action = ArgAction::SetTrue)]
  pub all:  bool,
}

impl Default for ShowOptions {
  fn default() -> Self { Self { page: 1, all: false } }
}

/// Function for the [`Commands::Show`] in the CLI.
pub async fn show(cli: &Cli, show_options: ShowOptions) -> Result<()> {
  let ShowOptions { page, all } = show_options;
  let config = cli.load_config()?;
  let config = if all { config.with_pagination(false) } else { config };
  let locale = config.locale;

  let view = FeedViewer::new(config).load_page(page).await?;
  debug!("Showing page {} of {:?}", view.page, view.max_page);

  if let Some(max_page) = view.max_page.filter(|&max_page| max_page > 0 && view.page > max_page) {
    cli.reply(ResponseContent::Warning(&format!(
      "Page {} is past the last page ({})",
      view.page, max_page
    )))?;
  }
  cli.reply(ResponseContent::Page(&view, locale))
}
