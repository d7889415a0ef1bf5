//! Logo downloading with an on-disk cache
//!
//! One GET per logo URL with a short timeout; no retries. Fetched bytes are
//! decoded and re-encoded to PNG under the cache directory keyed by ticker,
//! so later runs (and the results page) read from disk instead of the
//! network. Any failure is reported to the caller, which skips the record.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{RecommendError, Result};

/// Downloads logos and maintains the PNG cache
pub struct LogoFetcher {
    client: Client,
    cache_dir: PathBuf,
}

impl LogoFetcher {
    /// Create a fetcher, creating the cache directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::Io` if the cache directory cannot be created
    /// or `RecommendError::Server` if the HTTP client cannot be built.
    pub fn new(cache_dir: &Path, timeout_secs: u64) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RecommendError::Server {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Cache location for a ticker's logo
    pub fn cache_path(&self, ticker: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.png", ticker))
    }

    /// Get a ticker's logo, from cache if present, otherwise over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::Fetch` on any network or HTTP error and
    /// `RecommendError::ImageLoad` if the body is not a decodable image.
    /// Both are recoverable; callers skip the record.
    pub async fn fetch(&self, ticker: &str, logo_url: &str) -> Result<RgbImage> {
        let cache_path = self.cache_path(ticker);
        if cache_path.is_file() {
            debug!(ticker, "logo cache hit");
            let cached = image::open(&cache_path).map_err(|e| {
                RecommendError::image_load(
                    format!("corrupt cache entry {}", cache_path.display()),
                    e,
                )
            })?;
            return Ok(cached.to_rgb8());
        }

        let response = self
            .client
            .get(logo_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RecommendError::fetch(ticker, format!("GET {}", logo_url), e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RecommendError::fetch(ticker, "reading response body", e))?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| {
                RecommendError::image_load(format!("undecodable logo for {}", ticker), e)
            })?
            .to_rgb8();

        // Cache write failures don't lose the downloaded image
        if let Err(e) = decoded.save(&cache_path) {
            warn!(ticker, "failed to cache logo: {}", e);
        }

        Ok(decoded)
    }
}
