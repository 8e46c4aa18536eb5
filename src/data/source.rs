//! Where reference data comes from.
//!
//! A `DataSource` hands back the raw text of a named resource. Two
//! implementations exist: `HttpSource` (static files behind a base URL) and
//! `DirSource` (a local directory, the layout the generator scripts write).

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use super::loader::Resource;

/// Errors that can occur while fetching a single resource.
#[derive(Debug)]
pub enum FetchError {
    /// Resource does not exist at the source (HTTP 404, missing file).
    NotFound(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-success status.
    Status { status: u16, url: String },
    /// Local filesystem failure other than a missing file.
    Io(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound(what) => write!(f, "not found: {what}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status, url } => write!(f, "HTTP {status} from {url}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location of the source, for logs and error screens.
    fn describe(&self) -> String;

    /// Fetch the raw body of a resource.
    async fn fetch(&self, resource: Resource) -> Result<String, FetchError>;
}

// ============================================================================
// HTTP
// ============================================================================

/// Static JSON files served under a base URL.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.file_name())
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, resource: Resource) -> Result<String, FetchError> {
        let url = self.url_for(resource);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

// ============================================================================
// Directory
// ============================================================================

/// JSON files in a local directory.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    async fn fetch(&self, resource: Resource) -> Result<String, FetchError> {
        let path = self.dir.join(resource.file_name());
        debug!("Reading {}", path.display());

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(path.display().to_string())
            } else {
                FetchError::Io(format!("{}: {e}", path.display()))
            }
        })
    }
}

/// Pick a source from a config string: URLs go over HTTP, anything else is a directory.
pub fn source_from_str(source: &str) -> Box<dyn DataSource> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Box::new(HttpSource::new(source))
    } else {
        Box::new(DirSource::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nafta-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_source_from_str_picks_http_for_urls() {
        assert_eq!(
            source_from_str("https://example.com/data/").describe(),
            "https://example.com/data"
        );
        assert_eq!(source_from_str("./data").describe(), "./data");
    }

    #[test]
    fn test_http_source_builds_resource_urls() {
        let source = HttpSource::new("http://localhost:8080/data/");
        assert_eq!(
            source.url_for(Resource::Vehicles),
            "http://localhost:8080/data/vehicles.json"
        );
        assert_eq!(
            source.url_for(Resource::Routes),
            "http://localhost:8080/data/routes_cache.json"
        );
    }

    #[test]
    fn test_dir_source_reads_file() {
        let dir = scratch_dir("dir-read");
        fs::write(dir.join("locations.json"), "[]").unwrap();

        let source = DirSource::new(&dir);
        let body = tokio_test::block_on(source.fetch(Resource::Locations)).unwrap();
        assert_eq!(body, "[]");

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_dir_source_missing_file_is_not_found() {
        let dir = scratch_dir("dir-missing");
        let source = DirSource::new(&dir);

        let err = source.fetch(Resource::Routes).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
        assert!(err.to_string().contains("routes_cache.json"));

        let _ = fs::remove_dir_all(&dir);
    }
}
