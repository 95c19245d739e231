//! Console output and prompts.

use console::{measure_text_width, pad_str, Alignment};
use dialoguer::{Confirm, Input};
use eventlog::{
  format::{format_timestamp, page_caption},
  viewer::PageView,
};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Separator between table columns
pub static COLUMN_SEPARATOR: &str = " │ ";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// One page of events, rendered as a table
  Page(&'a PageView, Locale),
  /// A completed action
  Success(&'a str),
  /// A recoverable problem
  Warning(&'a str),
  /// General information
  Info(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for a line of text, offering `default`.
  fn prompt(&self, message: &str, default: &str) -> Result<String>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{}", style(PROMPT_PREFIX).yellow(), message))
        .default(false)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str, default: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(default.to_string());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{}{}", style(PROMPT_PREFIX).yellow(), message))
        .default(default.to_string())
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Page(view, locale) => println!("{}", render_page(view, locale)),
      ResponseContent::Success(message) => {
        println!("{} {}", style(SUCCESS_PREFIX).green(), style(message).green())
      },
      ResponseContent::Warning(message) => {
        println!("{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow())
      },
      ResponseContent::Info(message) => {
        println!("{} {}", style(INFO_PREFIX).cyan(), style(message).white())
      },
    }
    Ok(())
  }
}

/// Renders a page as a three-column table followed by the page caption.
pub fn render_page(view: &PageView, locale: Locale) -> String {
  if view.events.is_empty() {
    return format!(
      "{} {}\n{}",
      style(INFO_PREFIX).cyan(),
      locale.t("no_events_to_display"),
      style(page_caption(view.page, view.max_page, locale)).dim()
    );
  }

  let header = ["time", "code", "event"].map(|key| locale.t(key).to_string());
  let rows: Vec<[String; 3]> = view
    .events
    .iter()
    .map(|event| {
      [
        format_timestamp(event.timestamp.as_ref(), locale),
        event.code.to_string(),
        event.description.clone(),
      ]
    })
    .collect();

  let mut widths = header.each_ref().map(|cell| measure_text_width(cell));
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(measure_text_width(cell));
    }
  }

  let line = |cells: &[String; 3]| {
    cells
      .iter()
      .zip(widths)
      .map(|(cell, width)| pad_str(cell, width, Alignment::Left, None).into_owned())
      .collect::<Vec<_>>()
      .join(COLUMN_SEPARATOR)
  };

  let mut out = vec![style(line(&header)).bold().to_string()];
  out.extend(rows.iter().map(line));
  out.push(style(page_caption(view.page, view.max_page, locale)).dim().to_string());
  out.join("\n")
}
