//! Configuration for the recommender and its web front end.
//!
//! Configuration can be loaded from a JSON file or constructed
//! programmatically:
//!
//! ```no_run
//! use logorec::AppConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AppConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AppConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{matching, network};

/// Complete application configuration.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the snapshot JSON with ticker/logo-URL pairs
    pub snapshot_path: PathBuf,

    /// Directory for cached logos and uploaded query images
    pub cache_dir: PathBuf,

    /// Web server settings
    pub server: ServerConfig,

    /// Logo fetch settings
    pub fetch: FetchConfig,

    /// Number of recommendations per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Bind address for the local upload page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logo download parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

fn default_top_k() -> usize {
    matching::TOP_K
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("spy_data.json"),
            cache_dir: PathBuf::from("logo_cache"),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            fetch: FetchConfig {
                timeout_secs: network::FETCH_TIMEOUT_SECS,
            },
            top_k: matching::TOP_K,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Directory where uploaded query images are stored
    pub fn upload_dir(&self) -> PathBuf {
        self.cache_dir.join("uploads")
    }
}
