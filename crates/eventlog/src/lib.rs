//! Event-log feed retrieval, normalization and pagination.
//!
//! `eventlog` turns a single XML event-log document into a flat, typed list of events
//! that can be shown page by page:
//!
//! - Feed retrieval over HTTP or from a local file
//! - XML to attribute-normalized key/value tree conversion
//! - Normalization of the tree into [`normalize::NormalizedEvent`]s
//! - Page windows and page bounds
//! - Localized labels and timestamp formatting
//!
//! # Getting Started
//!
//! ```no_run
//! use eventlog::{configuration::Config, viewer::FeedViewer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(Config::default_path()?)?;
//!   let viewer = FeedViewer::new(config);
//!
//!   let page = viewer.load_page(1).await?;
//!   for event in &page.events {
//!     println!("{} {}", event.code, event.description);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`normalize`]: The document-to-events transform
//! - [`number`]: Numeric coercions used when reading feed values
//! - [`xml`]: Markup to tree conversion
//! - [`feed`]: Feed sources and stale-response guarding
//! - [`pagination`]: Page windows and navigation bounds
//! - [`locale`]: UI label catalogs
//! - [`format`]: Display formatting for event rows
//! - [`configuration`]: TOML configuration
//! - [`viewer`]: The load-a-page flow tying everything together
//!
//! # Design Philosophy
//!
//! The normalizer never fails. Everything that can go wrong with the shape of a
//! document is encoded in its return value; only fetching and markup parsing surface
//! errors to the caller.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use lazy_static::lazy_static;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod configuration;
pub mod error;
pub mod feed;
pub mod format;
pub mod locale;
pub mod normalize;
pub mod number;
pub mod pagination;
pub mod viewer;
pub mod xml;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use eventlog::prelude::*;
///
/// fn example(doc: &serde_json::Value) -> Result<(), EventLogError> {
///   let normalized = EventFeedNormalizer::new(DocumentLayout::default()).normalize(Some(doc));
///   println!("{} events", normalized.records.len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::EventLogError,
    feed::FetchFeed,
    normalize::{DiagnosticSink, DocumentLayout, EventFeedNormalizer, Normalized, NormalizedEvent},
  };
}
