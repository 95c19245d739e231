//! End-to-end loads: fetch, parse, normalize and paginate.

use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::TcpListener,
};

use super::*;

/// Serves `body` with `status` to every connection on a local port, returning the base
/// URL of the server.
async fn serve(status: &'static str, body: &'static str) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address = listener.local_addr().unwrap();

  tokio::spawn(async move {
    while let Ok((mut stream, _)) = listener.accept().await {
      let mut request = Vec::new();
      let mut buf = [0_u8; 1024];
      while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
          Ok(0) | Err(_) => break,
          Ok(n) => request.extend_from_slice(&buf[..n]),
        }
      }
      let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: \
         close\r\n\r\n{body}",
        body.len()
      );
      let _ = stream.write_all(response.as_bytes()).await;
      let _ = stream.shutdown().await;
    }
  });

  format!("http://{address}/")
}

#[tokio::test]
async fn test_fixture_pages() -> TestResult<()> {
  let viewer = fixture_viewer("EventLog_GetEventsLog.xml");

  let first = viewer.load_page(1).await?;
  assert_eq!(first.events.len(), 3);
  assert_eq!(first.events.iter().map(|e| e.code).collect::<Vec<_>>(), vec![101, 205, 404]);
  assert_eq!(first.total_count, 150.0);
  assert_eq!(first.max_page, Some(50));

  let past_end = viewer.load_page(51).await?;
  assert!(past_end.events.is_empty());
  assert_eq!(past_end.total_count, 150.0);
  Ok(())
}

#[tokio::test]
async fn test_manual_window_matches_viewer() -> TestResult<()> {
  let normalized = fixture_viewer("EventLog_GetEventsLog.xml").load().await?;

  assert_eq!(window(&normalized.records, 1, 3), normalized.records.as_slice());
  assert!(window(&normalized.records, 51, 3).is_empty());
  Ok(())
}

#[tokio::test]
async fn test_degraded_fixture() -> TestResult<()> {
  let normalized = fixture_viewer("degraded.xml").load().await?;

  assert_eq!(normalized.records, vec![
    NormalizedEvent {
      timestamp:   Some(json!("1678886400000")),
      code:        0,
      description: "Non-numeric code".to_string(),
    },
    NormalizedEvent {
      timestamp:   Some(json!("1678886460000")),
      code:        0,
      description: "Missing Code".to_string(),
    },
    NormalizedEvent { timestamp: None, code: 404, description: String::new() },
  ]);
  assert!(!normalized.is_count_known());
  Ok(())
}

#[tokio::test]
async fn test_single_event_fixture() -> TestResult<()> {
  let page = fixture_viewer("single.xml").load_page(1).await?;
  assert!(page.events.is_empty());
  assert_eq!(page.total_count, 1.0);
  assert_eq!(page.max_page, Some(1));
  Ok(())
}

#[tokio::test]
async fn test_pagination_disabled_shows_everything() -> TestResult<()> {
  let viewer = FeedViewer::new(
    Config::default()
      .with_source(FeedSource::File { path: data_path("EventLog_GetEventsLog.xml") })
      .with_per_page(1)
      .with_pagination(false),
  );

  let page = viewer.load_page(4).await?;
  assert_eq!(page.events.len(), 3);
  assert_eq!(page.page, 1);
  assert_eq!(page.max_page, Some(1));
  Ok(())
}

#[tokio::test]
async fn test_missing_file() {
  let viewer = fixture_viewer("does_not_exist.xml");
  assert!(matches!(viewer.load_page(1).await, Err(EventLogError::Io(_))));
}

#[tokio::test]
async fn test_blank_count_disables_next() -> TestResult<()> {
  let xml = concat!(
    "<DATAPACKET><Response><Events>",
    "<TotalLogCount></TotalLogCount>",
    "</Events></Response></DATAPACKET>"
  );
  let (viewer, _dir) = temp_viewer("blank.xml", xml);

  let page = viewer.load_page(1).await?;
  assert!(page.events.is_empty());
  assert_eq!(page.total_count, 0.0);
  assert_eq!(page.max_page, Some(0));
  Ok(())
}

#[tokio::test]
async fn test_malformed_markup() {
  let (viewer, _dir) = temp_viewer("broken.xml", "<DATAPACKET><Response>");
  assert!(viewer.load().await.is_err());
}

#[tokio::test]
async fn test_http_feed() -> TestResult<()> {
  let body = include_str!("../data/EventLog_GetEventsLog.xml");
  let base_url = serve("200 OK", body).await;

  let source = FeedSource::Http { base_url, path: "EventLog_GetEventsLog.xml".to_string() };
  let viewer = FeedViewer::new(Config::default().with_source(source));

  let page = viewer.load_page(1).await?;
  assert_eq!(page.events.len(), 3);
  assert_eq!(page.events[0].description, "System Start");
  assert_eq!(page.total_count, 150.0);
  Ok(())
}

#[tokio::test]
async fn test_http_error_status() {
  let base_url = serve("404 Not Found", "missing").await;
  let source = FeedSource::parse_location(&format!("{base_url}EventLog_GetEventsLog.xml")).unwrap();

  let result = FeedViewer::new(Config::default().with_source(source)).load_page(1).await;
  assert!(matches!(result, Err(EventLogError::Status(404))));
}
