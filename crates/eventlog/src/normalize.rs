//! Normalization of event-log documents.
//!
//! A fetched feed is converted into a generic key/value tree before it reaches this
//! module. Nothing about that tree is trusted: any level may be missing, any field may
//! have the wrong type, and individual records may be `null` or primitives. The
//! [`EventFeedNormalizer`] maps every such tree, without failing, onto a flat list of
//! [`NormalizedEvent`]s plus the total count announced by the feed.
//!
//! Each field degrades differently:
//!
//! | Field | When unreadable |
//! |---|---|
//! | `code` | `0` |
//! | `description` | `""` |
//! | `timestamp` | `None`, passed through untouched otherwise |
//! | `total_count` | `NaN`, so "unknown" stays distinct from a real zero |
//!
//! # Examples
//!
//! ```
//! use eventlog::normalize::normalize;
//! use serde_json::json;
//!
//! let doc = json!({
//!   "DATAPACKET": { "Response": { "Events": {
//!     "Event": [
//!       { "TimeStamp": "1678886400000", "Code": "101", "Description": "System Start" },
//!       null,
//!       { "TimeStamp": "1678886460000", "Code": "OK" }
//!     ],
//!     "TotalLogCount": "150"
//!   }}}
//! });
//!
//! let normalized = normalize(Some(&doc));
//! assert_eq!(normalized.records.len(), 2);
//! assert_eq!(normalized.records[1].code, 0);
//! assert_eq!(normalized.records[1].description, "");
//! assert_eq!(normalized.total_count, 150.0);
//! ```

use super::*;
use crate::number::{parse_int, to_number};

/// Element names used to locate events inside a document.
///
/// The defaults describe the `DATAPACKET/Response/Events` feed:
///
/// ```xml
/// <DATAPACKET>
///   <Response>
///     <Events>
///       <Event TimeStamp="1678886400000" Code="101" Description="System Start"/>
///       <TotalLogCount>150</TotalLogCount>
///     </Events>
///   </Response>
/// </DATAPACKET>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLayout {
  /// Top-level element
  pub root:        String,
  /// Child of the root holding the response payload
  pub response:    String,
  /// Child of the response holding the entries and the count
  pub events:      String,
  /// Name of each repeated event record
  pub entries:     String,
  /// Sibling of the entries holding the total number of events
  pub total_count: String,
  /// Record field holding the event time
  pub timestamp:   String,
  /// Record field holding the numeric event code
  pub code:        String,
  /// Record field holding the human readable description
  pub description: String,
}

impl Default for DocumentLayout {
  fn default() -> Self {
    Self {
      root:        "DATAPACKET".to_string(),
      response:    "Response".to_string(),
      events:      "Events".to_string(),
      entries:     "Event".to_string(),
      total_count: "TotalLogCount".to_string(),
      timestamp:   "TimeStamp".to_string(),
      code:        "Code".to_string(),
      description: "Description".to_string(),
    }
  }
}

/// Receiver for non-fatal observations made while normalizing.
///
/// Implemented for any `Fn(&str)`, which makes capturing diagnostics in tests a
/// one-liner.
pub trait DiagnosticSink {
  /// Records a warning about the shape of the document.
  fn warn(&self, message: &str);
}

/// The default sink, forwarding diagnostics to [`tracing`] at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
  fn warn(&self, message: &str) {
    warn!("{message}");
  }
}

impl<F> DiagnosticSink for F
where F: Fn(&str)
{
  fn warn(&self, message: &str) { self(message) }
}

/// A single event record with every field in a known state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
  /// The raw timestamp value exactly as found in the document, `None` if absent.
  pub timestamp:   Option<Value>,
  /// Event code, `0` if the raw value was missing or not an integer.
  pub code:        i64,
  /// Event description, empty if the raw value was missing or not a non-empty string.
  pub description: String,
}

/// Output of [`EventFeedNormalizer::normalize`].
#[derive(Debug, Clone, Serialize)]
pub struct Normalized {
  /// Every valid record of the document, in document order.
  pub records:     Vec<NormalizedEvent>,
  /// Total number of events announced by the feed, `NaN` if unknown.
  pub total_count: f64,
}

impl Normalized {
  /// Returns whether the feed announced a readable total count.
  pub fn is_count_known(&self) -> bool { !self.total_count.is_nan() }
}

/// Turns a loosely shaped document tree into [`NormalizedEvent`]s.
///
/// The normalizer holds no state besides its configuration, so calling
/// [`normalize`](EventFeedNormalizer::normalize) repeatedly on the same document always
/// produces equal results.
#[derive(Debug, Clone)]
pub struct EventFeedNormalizer<S = TracingSink> {
  /// Where to find the events in the document
  layout: DocumentLayout,
  /// Where shape diagnostics are reported
  sink:   S,
}

impl EventFeedNormalizer<TracingSink> {
  /// Creates a normalizer for the given layout that reports through [`tracing`].
  pub fn new(layout: DocumentLayout) -> Self { Self { layout, sink: TracingSink } }
}

impl Default for EventFeedNormalizer<TracingSink> {
  fn default() -> Self { Self::new(DocumentLayout::default()) }
}

impl<S: DiagnosticSink> EventFeedNormalizer<S> {
  /// Replaces the diagnostic sink.
  ///
  /// # Examples
  ///
  /// ```
  /// use std::cell::RefCell;
  ///
  /// use eventlog::normalize::{DocumentLayout, EventFeedNormalizer};
  ///
  /// let warnings = RefCell::new(Vec::new());
  /// let normalizer = EventFeedNormalizer::new(DocumentLayout::default())
  ///   .with_sink(|message: &str| warnings.borrow_mut().push(message.to_string()));
  ///
  /// let normalized = normalizer.normalize(None);
  /// assert!(normalized.records.is_empty());
  /// assert_eq!(warnings.borrow().len(), 1);
  /// ```
  pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> EventFeedNormalizer<T> {
    EventFeedNormalizer { layout: self.layout, sink }
  }

  /// The layout this normalizer reads.
  pub fn layout(&self) -> &DocumentLayout { &self.layout }

  /// Normalizes a document tree.
  ///
  /// The count and the records are read independently: a malformed entries field never
  /// prevents the count from being read, and vice versa. When the entries are missing or
  /// are not a list, a diagnostic is reported and no records are returned. `null`,
  /// strings, numbers and booleans in the list are skipped silently. A nested list has
  /// no fields and becomes a record of defaults.
  ///
  /// # Arguments
  ///
  /// * `doc` - The deserialized document, or `None` if there is none
  pub fn normalize(&self, doc: Option<&Value>) -> Normalized {
    let layout = &self.layout;
    let events = [&layout.root, &layout.response, &layout.events]
      .into_iter()
      .fold(doc, |parent, key| field(parent, key));

    let total_count = to_number(field(events, &layout.total_count));

    let Some(entries) = field(events, &layout.entries).and_then(Value::as_array) else {
      self.sink.warn(&format!(
        "Could not find '{}' array at the expected path or it's not an array.",
        layout.entries
      ));
      return Normalized { records: Vec::new(), total_count };
    };

    let records: Vec<NormalizedEvent> = entries
      .iter()
      .filter_map(|entry| match entry {
        Value::Object(raw) => Some(self.normalize_record(raw)),
        Value::Array(_) => Some(self.normalize_record(&Map::new())),
        _ => None,
      })
      .collect();
    debug!("Normalized {} of {} entries", records.len(), entries.len());

    Normalized { records, total_count }
  }

  /// Maps one raw record object onto a [`NormalizedEvent`].
  fn normalize_record(&self, raw: &Map<String, Value>) -> NormalizedEvent {
    let layout = &self.layout;
    NormalizedEvent {
      timestamp:   raw.get(&layout.timestamp).cloned(),
      code:        raw.get(&layout.code).and_then(parse_int).unwrap_or(0),
      description: match raw.get(&layout.description) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => String::new(),
      },
    }
  }
}

/// Normalizes a document using the default layout, reporting through [`tracing`].
pub fn normalize(doc: Option<&Value>) -> Normalized {
  EventFeedNormalizer::new(DocumentLayout::default()).normalize(doc)
}

/// Looks up `key` if `parent` is present and is an object.
fn field<'a>(parent: Option<&'a Value>, key: &str) -> Option<&'a Value> {
  parent?.as_object()?.get(key)
}
