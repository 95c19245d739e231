//! Conversion of XML markup into a generic key/value tree.
//!
//! The tree uses [`serde_json::Value`] so that XML feeds and JSON feeds reach the
//! normalizer in the same shape:
//!
//! - Each element becomes a key of its parent object.
//! - Sibling elements sharing a name become an array; a single occurrence stays a
//!   plain value.
//! - Attributes are stored under their bare name, next to child elements.
//! - An element with only text collapses to that text. Text next to attributes or child
//!   elements is stored under `#text`.
//! - Empty elements become `""` unless they carry attributes.
//!
//! ```
//! use eventlog::xml::{xml_to_value, XmlOptions};
//! use serde_json::json;
//!
//! let xml = r#"<Events>
//!   <Event Code="1"/>
//!   <Event Code="2">late</Event>
//!   <TotalLogCount>2</TotalLogCount>
//! </Events>"#;
//! let tree = xml_to_value(xml, &XmlOptions::default()).unwrap();
//!
//! assert_eq!(tree, json!({
//!   "Events": {
//!     "Event": [{ "Code": "1" }, { "Code": "2", "#text": "late" }],
//!     "TotalLogCount": "2"
//!   }
//! }));
//! ```

use quick_xml::{
  events::{BytesStart, Event},
  name::QName,
  Reader,
};

use super::*;

/// Key under which text content is stored when an element also has attributes or
/// children.
pub const TEXT_KEY: &str = "#text";

/// Options for [`xml_to_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
  /// Drop namespace prefixes from element and attribute names and skip `xmlns`
  /// declarations.
  pub strip_namespaces: bool,
}

/// Converts an XML document into a key/value tree.
///
/// # Arguments
///
/// * `xml` - The document text
/// * `options` - Name handling options
///
/// # Returns
///
/// Returns a [`Result`] containing either:
/// - The document as a [`Value::Object`] keyed by the root element name
/// - An [`EventLogError::Xml`] or [`EventLogError::UnclosedElement`] if the markup is
///   not well-formed
pub fn xml_to_value(xml: &str, options: &XmlOptions) -> Result<Value> {
  trace!("Converting {} bytes of XML", xml.len());
  let mut reader = Reader::from_str(xml);
  let mut stack: Vec<(String, Map<String, Value>)> = Vec::new();
  let mut current = Map::new();

  loop {
    let event = reader
      .read_event()
      .map_err(|source| EventLogError::Xml { position: reader.error_position() as u64, source })?;

    match event {
      Event::Start(ref e) => {
        let tag = qualified_name(e.name(), options);
        let attributes = read_attributes(e, options, &reader)?;
        stack.push((tag, std::mem::replace(&mut current, attributes)));
      },
      Event::Empty(ref e) => {
        let tag = qualified_name(e.name(), options);
        let attributes = read_attributes(e, options, &reader)?;
        let value = if attributes.is_empty() {
          Value::String(String::new())
        } else {
          Value::Object(attributes)
        };
        insert_child(&mut current, tag, value);
      },
      Event::Text(ref e) => {
        let text = e
          .unescape()
          .map_err(|source| EventLogError::Xml {
            position: reader.buffer_position() as u64,
            source,
          })?;
        push_text(&mut current, text.trim());
      },
      Event::CData(ref e) => push_text(&mut current, String::from_utf8_lossy(e).trim()),
      Event::End(_) =>
        if let Some((tag, parent)) = stack.pop() {
          let value = collapse(std::mem::replace(&mut current, parent));
          insert_child(&mut current, tag, value);
        },
      Event::Eof => break,
      _ => (),
    }
  }

  if let Some((tag, _)) = stack.pop() {
    return Err(EventLogError::UnclosedElement(tag));
  }

  debug!("Converted XML document with {} top-level element(s)", current.len());
  Ok(Value::Object(current))
}

/// Element or attribute name as a string, without its prefix when namespaces are
/// stripped.
fn qualified_name(name: QName, options: &XmlOptions) -> String {
  if options.strip_namespaces {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
  } else {
    String::from_utf8_lossy(name.as_ref()).into_owned()
  }
}

/// Collects the attributes of a start tag into a fresh object.
fn read_attributes(
  element: &BytesStart,
  options: &XmlOptions,
  reader: &Reader<&[u8]>,
) -> Result<Map<String, Value>> {
  let mut attributes = Map::new();
  for attr in element.attributes() {
    let attr = attr.map_err(|err| EventLogError::Xml {
      position: reader.buffer_position() as u64,
      source:   err.into(),
    })?;

    let key = attr.key.as_ref();
    if options.strip_namespaces && (key == b"xmlns" || key.starts_with(b"xmlns:")) {
      continue;
    }

    let value = attr
      .unescape_value()
      .map_err(|source| EventLogError::Xml { position: reader.buffer_position() as u64, source })?;
    attributes.insert(qualified_name(attr.key, options), Value::String(value.into_owned()));
  }
  Ok(attributes)
}

/// Adds text content to the element being built. Text split by child elements is
/// concatenated.
fn push_text(current: &mut Map<String, Value>, text: &str) {
  if text.is_empty() {
    return;
  }
  match current.get_mut(TEXT_KEY) {
    Some(Value::String(existing)) => existing.push_str(text),
    _ => {
      current.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    },
  }
}

/// Turns a finished element into its value: bare text, `""` when empty, or the object.
fn collapse(mut element: Map<String, Value>) -> Value {
  if element.is_empty() {
    return Value::String(String::new());
  }
  if element.len() == 1 {
    if let Some(text) = element.remove(TEXT_KEY) {
      return text;
    }
  }
  Value::Object(element)
}

/// Inserts a child value, turning repeated names into an array.
fn insert_child(parent: &mut Map<String, Value>, tag: String, value: Value) {
  match parent.get_mut(&tag) {
    Some(Value::Array(values)) => values.push(value),
    Some(existing) => {
      let first = existing.take();
      *existing = Value::Array(vec![first, value]);
    },
    None => {
      parent.insert(tag, value);
    },
  }
}
