//! Feed retrieval.
//!
//! A feed is a single static document, fetched in full on every load. It is either
//! served over HTTP or read from a local file; both implement [`FetchFeed`].
//!
//! Loads are not cancelled when a newer one starts. Instead every load is tagged with a
//! token from [`RequestTokens`], and a response is only applied while its token is still
//! the latest one issued.

use std::sync::{
  atomic::{AtomicU64, Ordering},
  Arc,
};

use super::*;

/// Default name of the feed document.
pub const DEFAULT_FEED_PATH: &str = "EventLog_GetEventsLog.xml";

/// Default HTTP server the feed is fetched from.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Transport for fetching the raw feed bytes.
#[async_trait]
pub trait FetchFeed: Send + Sync {
  /// Fetches the whole feed document.
  async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Where the feed document lives.
///
/// ```toml
/// [source]
/// type = "http"
/// base_url = "https://logs.example.com/static/"
/// path = "EventLog_GetEventsLog.xml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedSource {
  /// A document served over HTTP(S)
  Http {
    /// Server root the path is resolved against
    base_url: String,
    /// Path of the document relative to `base_url`
    #[serde(default = "default_feed_path")]
    path:     String,
  },
  /// A document on the local file system
  File {
    /// Location of the document
    path: PathBuf,
  },
}

/// Serde default for [`FeedSource::Http::path`].
fn default_feed_path() -> String { DEFAULT_FEED_PATH.to_string() }

impl Default for FeedSource {
  fn default() -> Self {
    FeedSource::Http { base_url: DEFAULT_BASE_URL.to_string(), path: default_feed_path() }
  }
}

impl FeedSource {
  /// Interprets a command-line value: `http://` and `https://` values are URLs of the
  /// document itself, anything else is a file path.
  pub fn parse_location(location: &str) -> Result<Self> {
    if location.starts_with("http://") || location.starts_with("https://") {
      let url = Url::parse(location)?;
      let path = url.path_segments().and_then(|mut segments| segments.next_back()).unwrap_or("");
      let base_url = url.join("./")?;
      Ok(FeedSource::Http {
        base_url: base_url.to_string(),
        path:     if path.is_empty() { default_feed_path() } else { path.to_string() },
      })
    } else {
      Ok(FeedSource::File { path: PathBuf::from(location) })
    }
  }

  /// The full URL of an HTTP source.
  pub fn url(&self) -> Result<Option<Url>> {
    match self {
      FeedSource::Http { base_url, path } => Ok(Some(Url::parse(base_url)?.join(path)?)),
      FeedSource::File { .. } => Ok(None),
    }
  }

  /// Whether the document is JSON rather than XML, judged by its extension.
  pub fn is_json(&self) -> bool {
    let name = match self {
      FeedSource::Http { path, .. } => Path::new(path),
      FeedSource::File { path } => path.as_path(),
    };
    name.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
  }

  /// Builds the transport for this source.
  pub fn fetcher(&self) -> Result<Box<dyn FetchFeed>> {
    match self {
      FeedSource::Http { .. } => {
        let url = self.url()?.ok_or_else(|| EventLogError::Config("Missing feed URL".into()))?;
        Ok(Box::new(HttpFeed::new(url)))
      },
      FeedSource::File { path } => Ok(Box::new(FileFeed::new(path))),
    }
  }
}

impl Display for FeedSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FeedSource::Http { base_url, path } => write!(f, "{}{}", base_url, path),
      FeedSource::File { path } => write!(f, "{}", path.display()),
    }
  }
}

/// Fetches the feed with a plain, unauthenticated HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpFeed {
  /// Shared HTTP client
  client: reqwest::Client,
  /// Document URL
  url:    Url,
}

impl HttpFeed {
  /// Creates a fetcher for `url`.
  pub fn new(url: Url) -> Self { Self { client: reqwest::Client::new(), url } }
}

#[async_trait]
impl FetchFeed for HttpFeed {
  async fn fetch(&self) -> Result<Vec<u8>> {
    debug!("Fetching feed from {}", self.url);
    let response = self.client.get(self.url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(EventLogError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    trace!("Received {} bytes from {}", bytes.len(), self.url);
    Ok(bytes.to_vec())
  }
}

/// Reads the feed from a local file.
#[derive(Debug, Clone)]
pub struct FileFeed {
  /// Document location
  path: PathBuf,
}

impl FileFeed {
  /// Creates a fetcher for the file at `path`.
  pub fn new(path: impl AsRef<Path>) -> Self { Self { path: path.as_ref().to_path_buf() } }
}

#[async_trait]
impl FetchFeed for FileFeed {
  async fn fetch(&self) -> Result<Vec<u8>> {
    debug!("Reading feed from {}", self.path.display());
    let bytes = tokio::fs::read(&self.path).await?;
    trace!("Read {} bytes from {}", bytes.len(), self.path.display());
    Ok(bytes)
  }
}

/// Issues increasing tokens so that only the newest load's result is applied.
///
/// Clones share the same counter.
///
/// ```
/// use eventlog::feed::RequestTokens;
///
/// let tokens = RequestTokens::default();
/// let first = tokens.issue();
/// let second = tokens.issue();
/// assert!(!tokens.is_current(first));
/// assert!(tokens.is_current(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
  /// Last issued token, `0` before the first one
  latest: Arc<AtomicU64>,
}

/// Identifies one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestTokens {
  /// Issues a new token, superseding all earlier ones.
  pub fn issue(&self) -> RequestToken {
    RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
  }

  /// Whether `token` is the most recently issued one.
  pub fn is_current(&self, token: RequestToken) -> bool {
    self.latest.load(Ordering::Acquire) == token.0
  }
}
