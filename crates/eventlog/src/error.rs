//! Error types for the eventlog library.
//!
//! Only the peripheral parts of the library can fail:
//! - Fetching the feed (network, HTTP status, file access)
//! - Parsing the fetched markup
//! - Reading and writing configuration
//!
//! The normalizer itself never returns an error; degraded input is encoded in its
//! output instead.
//!
//! # Examples
//!
//! ```no_run
//! use eventlog::{configuration::Config, error::EventLogError, viewer::FeedViewer};
//!
//! # async fn example() -> Result<(), EventLogError> {
//! let viewer = FeedViewer::new(Config::default());
//! match viewer.load_page(1).await {
//!   Err(EventLogError::Network(e)) => println!("Network error: {}", e),
//!   Err(EventLogError::Status(code)) => println!("Server answered {}", code),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(page) => println!("{} events", page.events.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`eventlog`](crate) crate.
pub type Result<T> = core::result::Result<T, EventLogError>;

/// Errors that can occur while fetching and preparing an event-log feed.
#[derive(Error, Debug)]
pub enum EventLogError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The feed server answered with a non-success status code.
  #[error("Feed request failed with HTTP status {0}")]
  Status(u16),

  /// The configured base URL could not be parsed or joined with the feed path.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// A file system operation failed.
  ///
  /// This occurs when reading a local feed file or reading/writing the configuration.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The fetched document is not well-formed markup.
  #[error("Malformed XML at byte {position}: {source}")]
  Xml {
    /// Byte offset in the document where the reader stopped.
    position: u64,
    /// The underlying reader error.
    source:   quick_xml::Error,
  },

  /// The document ended while the named element was still open.
  #[error("Document ended inside <{0}>")]
  UnclosedElement(String),

  /// A JSON feed file could not be parsed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configuration file is not valid TOML or does not match the expected shape.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value is out of range or inconsistent.
  #[error("{0}")]
  Config(String),
}
