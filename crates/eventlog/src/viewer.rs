//! The load-a-page flow.
//!
//! [`FeedViewer`] fetches the feed, converts it into a tree, normalizes it and cuts out
//! one page. [`ViewState`] holds what is currently on screen and decides which load
//! results are applied:
//!
//! - Results of superseded loads are dropped.
//! - A failed load clears the event list and is handed back to the caller to show; the
//!   last known total count is kept.

use super::*;
use crate::{
  configuration::Config,
  feed::{RequestToken, RequestTokens},
  normalize::{EventFeedNormalizer, Normalized, NormalizedEvent},
  pagination::{Navigation, Pager},
  xml::xml_to_value,
};

/// One page of events together with the information needed to render its controls.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
  /// Events on this page, in feed order
  pub events:      Vec<NormalizedEvent>,
  /// Total announced by the feed, `NaN` if unknown
  pub total_count: f64,
  /// Page number, 1-based
  pub page:        usize,
  /// Page size, `usize::MAX` when pagination is disabled
  pub per_page:    usize,
  /// Page count, `None` if the total is unknown
  pub max_page:    Option<usize>,
}

impl PageView {
  /// Cuts the page selected by `pager` out of a normalized feed.
  pub fn new(normalized: Normalized, pager: &Pager) -> Self {
    let Normalized { records, total_count } = normalized;
    Self {
      events: pager.slice(&records).to_vec(),
      total_count,
      page: pager.page(),
      per_page: pager.per_page(),
      max_page: pager.max_page(total_count),
    }
  }
}

/// Loads pages of the configured feed.
#[derive(Debug)]
pub struct FeedViewer {
  /// Viewer configuration
  config:     Config,
  /// Normalizer built from the configured layout
  normalizer: EventFeedNormalizer,
}

impl FeedViewer {
  /// Creates a viewer for `config`.
  pub fn new(config: Config) -> Self {
    let normalizer = EventFeedNormalizer::new(config.layout.clone());
    Self { config, normalizer }
  }

  /// The configuration this viewer was built with.
  pub fn config(&self) -> &Config { &self.config }

  /// Fetches and normalizes the whole feed.
  ///
  /// # Errors
  ///
  /// Fails if the feed cannot be fetched or is not well-formed markup. Documents that are
  /// well-formed but oddly shaped never fail; see [`EventFeedNormalizer::normalize`].
  pub async fn load(&self) -> Result<Normalized> {
    let bytes = self.config.source.fetcher()?.fetch().await?;
    let document = self.parse_document(&bytes)?;
    Ok(self.normalizer.normalize(Some(&document)))
  }

  /// Fetches the feed and returns page `page` (1-based).
  pub async fn load_page(&self, page: usize) -> Result<PageView> {
    let mut pager = self.config.pager()?;
    pager.go_to(page);
    let normalized = self.load().await?;
    debug!(
      "Loaded page {} with {} of {} records",
      pager.page(),
      pager.slice(&normalized.records).len(),
      normalized.records.len()
    );
    Ok(PageView::new(normalized, &pager))
  }

  /// Deserializes a fetched document into a tree, as JSON or XML depending on the source.
  pub fn parse_document(&self, bytes: &[u8]) -> Result<Value> {
    if self.config.source.is_json() {
      Ok(serde_json::from_slice(bytes)?)
    } else {
      xml_to_value(&String::from_utf8_lossy(bytes), &self.config.xml)
    }
  }
}

/// What is currently displayed, and which load it came from.
#[derive(Debug, Clone)]
pub struct ViewState {
  /// Events on the current page
  pub events:      Vec<NormalizedEvent>,
  /// Last known total count, `NaN` until a load succeeds
  pub total_count: f64,
  /// Current position
  pub pager:       Pager,
  /// Whether a load is in flight
  pub loading:     bool,
  /// Token source for loads started from this state
  tokens:          RequestTokens,
}

impl ViewState {
  /// Creates an empty state positioned on the first page of `pager`.
  pub fn new(pager: Pager) -> Self {
    Self {
      events: Vec::new(),
      total_count: f64::NAN,
      pager,
      loading: false,
      tokens: RequestTokens::default(),
    }
  }

  /// Marks a load as started and returns its token.
  pub fn begin_load(&mut self) -> RequestToken {
    self.loading = true;
    self.tokens.issue()
  }

  /// Applies the result of the load identified by `token`.
  ///
  /// Returns the error of a failed current load so the caller can show it. Results of
  /// stale loads are ignored and return `None`.
  pub fn apply(&mut self, token: RequestToken, result: Result<PageView>) -> Option<EventLogError> {
    if !self.tokens.is_current(token) {
      debug!("Discarding stale load result {:?}", token);
      return None;
    }
    self.loading = false;
    match result {
      Ok(view) => {
        self.events = view.events;
        self.total_count = view.total_count;
        None
      },
      Err(e) => {
        warn!("Loading the feed failed: {}", e);
        self.events.clear();
        Some(e)
      },
    }
  }

  /// Page count for the last known total.
  pub fn max_page(&self) -> Option<usize> { self.pager.max_page(self.total_count) }

  /// Navigation state for the current page.
  pub fn navigation(&self) -> Navigation { self.pager.navigation(self.total_count) }
}
