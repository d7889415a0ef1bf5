//! # logorec
//!
//! Stock recommendations by logo color. The crate:
//! - loads a scraped snapshot of ticker symbols and logo URLs
//! - downloads each logo once, caching it on disk as PNG
//! - reduces every logo to a fixed-length color descriptor
//!   (histogram-weighted mean per RGB channel)
//! - matches an uploaded image against the catalog by Wasserstein distance
//!   and serves the five closest tickers on a local web page
//!
//! ## Example
//!
//! ```rust,no_run
//! use logorec::{AppConfig, Recommender};
//!
//! # async fn run() -> logorec::Result<()> {
//! let config = AppConfig::default();
//! let recommender = Recommender::build(&config).await?;
//! let query = std::fs::read("some_logo.png")?;
//! for rec in recommender.recommend(&query)? {
//!     println!("{} {} (score {:.2})", rec.ticker, rec.name, rec.score);
//! }
//! # Ok(())
//! # }
//! ```

use crate::color::ColorDescriptor;

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod recommend;
pub mod snapshot;
pub mod web;

pub use config::AppConfig;
pub use error::{RecommendError, Result};
pub use recommend::{Recommendation, Recommender};

/// One snapshot row and, after the profiling pass, its color descriptor.
/// Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoRecord {
    /// Ticker symbol, e.g. "AAPL"
    pub ticker: String,
    /// Company short name
    pub name: String,
    /// Source URL of the logo image
    pub logo_url: String,
    /// Color descriptor; `None` when the fetch or decode failed, which
    /// excludes the record from matching
    pub descriptor: Option<ColorDescriptor>,
}
