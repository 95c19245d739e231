//! Viewer configuration.
//!
//! Configuration is read from a TOML file, by default `<config dir>/eventlog/config.toml`.
//! Every field is optional:
//!
//! ```toml
//! locale = "ru"
//! per_page = 3
//! pagination = true
//!
//! [source]
//! type = "http"
//! base_url = "http://localhost:8080/"
//! path = "EventLog_GetEventsLog.xml"
//!
//! [layout]
//! entries = "Event"
//! total_count = "TotalLogCount"
//!
//! [xml]
//! strip_namespaces = false
//! ```

use super::*;
use crate::{
  feed::FeedSource, locale::Locale, normalize::DocumentLayout, pagination::Pager,
  xml::XmlOptions,
};

/// Default number of events per page.
pub const DEFAULT_PER_PAGE: usize = 3;

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Where the feed is loaded from
  pub source:     FeedSource,
  /// Events shown per page
  pub per_page:   usize,
  /// Whether the event list is split into pages
  pub pagination: bool,
  /// UI language
  pub locale:     Locale,
  /// Element names used to find events in the document
  pub layout:     DocumentLayout,
  /// Markup handling options
  pub xml:        XmlOptions,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source:     FeedSource::default(),
      per_page:   DEFAULT_PER_PAGE,
      pagination: true,
      locale:     Locale::default(),
      layout:     DocumentLayout::default(),
      xml:        XmlOptions::default(),
    }
  }
}

impl Config {
  /// Default location of the configuration file.
  ///
  /// # Errors
  ///
  /// Returns [`EventLogError::Config`] if the platform has no configuration directory.
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join("eventlog").join("config.toml"))
      .ok_or_else(|| EventLogError::Config("Could not determine a configuration directory".into()))
  }

  /// Parses and validates a configuration from TOML text.
  pub fn from_toml(content: &str) -> Result<Self> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads and validates the configuration file at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    Self::from_toml(&std::fs::read_to_string(path)?)
  }

  /// Loads the configuration at `path`, or the defaults if the file does not exist.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes this configuration to `path`, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Checks values that deserialize fine but cannot be used.
  pub fn validate(&self) -> Result<()> {
    if self.per_page == 0 {
      return Err(EventLogError::Config("`per_page` must be at least 1".into()));
    }
    Ok(())
  }

  /// A pager matching this configuration, positioned on page 1.
  pub fn pager(&self) -> Result<Pager> {
    if self.pagination {
      Pager::new(self.per_page)
    } else {
      Ok(Pager::disabled())
    }
  }

  /// Sets the feed source.
  pub fn with_source(mut self, source: FeedSource) -> Self {
    self.source = source;
    self
  }

  /// Sets the number of events per page.
  pub fn with_per_page(mut self, per_page: usize) -> Self {
    self.per_page = per_page;
    self
  }

  /// Enables or disables pagination.
  pub fn with_pagination(mut self, pagination: bool) -> Self {
    self.pagination = pagination;
    self
  }

  /// Sets the UI language.
  pub fn with_locale(mut self, locale: Locale) -> Self {
    self.locale = locale;
    self
  }
}
