//! Properties of the normalizer over documents built by hand.

use std::cell::RefCell;

use super::*;

/// Wraps an `Events` payload in the default document layout.
fn feed(events: Value) -> Value { json!({ "DATAPACKET": { "Response": { "Events": events } } }) }

fn valid_entry(i: usize) -> Value {
  json!({
    "TimeStamp": (1_678_886_400_000_u64 + i as u64).to_string(),
    "Code": i.to_string(),
    "Description": format!("event {i}")
  })
}

#[test]
fn test_valid_entries_keep_count_and_order() {
  for n in [0, 1, 2, 7, 40] {
    let doc = feed(json!({
      "Event": (0..n).map(valid_entry).collect::<Vec<_>>(),
      "TotalLogCount": n.to_string()
    }));

    let normalized = normalize(Some(&doc));
    assert_eq!(normalized.records.len(), n);
    assert_eq!(normalized.total_count, n as f64);
    for (i, record) in normalized.records.iter().enumerate() {
      assert_eq!(record.code, i as i64);
      assert_eq!(record.description, format!("event {i}"));
    }
  }
}

#[test]
fn test_corrupt_entries_keep_sibling_order() {
  let doc = feed(json!({
    "Event": [
      null,
      valid_entry(3),
      "junk",
      valid_entry(1),
      42,
      false,
      valid_entry(2),
      null
    ],
    "TotalLogCount": "3"
  }));

  let codes: Vec<i64> = normalize(Some(&doc)).records.iter().map(|r| r.code).collect();
  assert_eq!(codes, vec![3, 1, 2]);
}

#[test]
fn test_count_and_entries_fail_independently() {
  let cases = [
    (json!({ "Event": "bad", "TotalLogCount": "12" }), 0, Some(12.0)),
    (json!({ "Event": { "Code": "1" }, "TotalLogCount": "12" }), 0, Some(12.0)),
    (json!({ "Event": [valid_entry(0)], "TotalLogCount": "twelve" }), 1, None),
    (json!({ "Event": [valid_entry(0)] }), 1, None),
    (json!({ "Event": 5, "TotalLogCount": { "value": 12 } }), 0, None),
  ];

  for (events, records, count) in cases {
    let normalized = normalize(Some(&feed(events.clone())));
    assert_eq!(normalized.records.len(), records, "records for {events}");
    match count {
      Some(count) => assert_eq!(normalized.total_count, count, "count for {events}"),
      None => assert!(normalized.total_count.is_nan(), "count for {events}"),
    }
  }
}

#[test]
fn test_field_defaults() {
  let doc = feed(json!({
    "Event": [
      { "TimeStamp": "1", "Code": "", "Description": "" },
      { "TimeStamp": "2", "Code": "500" },
      { "Code": "abc", "Description": "no timestamp" }
    ]
  }));

  let records = normalize(Some(&doc)).records;
  assert_eq!(records, vec![
    NormalizedEvent { timestamp: Some(json!("1")), code: 0, description: String::new() },
    NormalizedEvent { timestamp: Some(json!("2")), code: 500, description: String::new() },
    NormalizedEvent { timestamp: None, code: 0, description: "no timestamp".to_string() },
  ]);
}

#[test]
fn test_null_document() {
  let normalized = normalize(None);
  assert!(normalized.records.is_empty());
  assert!(normalized.total_count.is_nan());
}

#[test]
fn test_repeat_calls_are_equal() {
  let doc = feed(json!({ "Event": [valid_entry(0), null, valid_entry(1)], "TotalLogCount": "2" }));
  let normalizer = EventFeedNormalizer::new(DocumentLayout::default());

  let first = normalizer.normalize(Some(&doc));
  let second = normalizer.normalize(Some(&doc));
  assert_eq!(first.records, second.records);
  assert_eq!(first.total_count, second.total_count);
}

#[test]
fn test_xml_and_json_feeds_agree() {
  let xml = r#"<DATAPACKET><Response><Events>
      <Event TimeStamp="10" Code="1" Description="a"/>
      <Event TimeStamp="20" Code="2" Description="b"/>
      <TotalLogCount>2</TotalLogCount>
    </Events></Response></DATAPACKET>"#;
  let from_xml = xml_to_value(xml, &XmlOptions::default()).unwrap();
  let from_json = feed(json!({
    "Event": [
      { "TimeStamp": "10", "Code": "1", "Description": "a" },
      { "TimeStamp": "20", "Code": "2", "Description": "b" }
    ],
    "TotalLogCount": "2"
  }));

  let a = normalize(Some(&from_xml));
  let b = normalize(Some(&from_json));
  assert_eq!(a.records, b.records);
  assert_eq!(a.total_count, b.total_count);
}

#[test]
fn test_diagnostic_for_single_xml_event() {
  let xml = r#"<DATAPACKET><Response><Events>
      <Event TimeStamp="10" Code="1" Description="only"/>
      <TotalLogCount>1</TotalLogCount>
    </Events></Response></DATAPACKET>"#;

  let warnings = RefCell::new(Vec::new());
  let normalizer = EventFeedNormalizer::new(DocumentLayout::default())
    .with_sink(|message: &str| warnings.borrow_mut().push(message.to_string()));

  let normalized = normalizer.normalize(Some(&xml_to_value(xml, &XmlOptions::default()).unwrap()));
  assert!(normalized.records.is_empty());
  assert_eq!(normalized.total_count, 1.0);
  assert_eq!(warnings.borrow().len(), 1);
  assert!(warnings.borrow()[0].contains("Could not find 'Event' array"));
}

#[test]
fn test_blank_count_is_zero() {
  for count in ["", "  "] {
    let doc = feed(json!({ "Event": [], "TotalLogCount": count }));
    let normalized = normalize(Some(&doc));
    assert_eq!(normalized.total_count, 0.0, "count for {count:?}");
    assert!(normalized.is_count_known());
  }

  let xml = "<DATAPACKET><Response><Events><TotalLogCount/></Events></Response></DATAPACKET>";
  let normalized = normalize(Some(&xml_to_value(xml, &XmlOptions::default()).unwrap()));
  assert_eq!(normalized.total_count, 0.0);
}
