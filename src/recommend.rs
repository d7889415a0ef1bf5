//! Catalog construction and query answering
//!
//! `Recommender::build` runs the one-shot batch pipeline (load snapshot,
//! fetch logos, profile colors) and the resulting catalog is immutable for
//! the life of the process. `recommend` profiles a query image the same way
//! and returns the closest tickers.

use serde::Serialize;
use tracing::{info, warn};

use crate::color::{matcher, ColorDescriptor};
use crate::config::AppConfig;
use crate::error::{RecommendError, Result};
use crate::fetch::LogoFetcher;
use crate::{snapshot, LogoRecord};

/// One ranked match for display
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub ticker: String,
    pub name: String,
    /// Wasserstein distance to the query descriptor; smaller is closer
    pub score: f64,
    /// Mean color of the matched logo, for the swatch
    pub swatch_hex: String,
    /// Cache file name of the matched logo
    pub logo_file: String,
}

/// Immutable logo catalog with color descriptors
#[derive(Debug)]
pub struct Recommender {
    records: Vec<LogoRecord>,
    top_k: usize,
}

impl Recommender {
    /// Run the batch pipeline: load the snapshot, fetch each logo
    /// sequentially, and profile the ones that arrive. Fetch and decode
    /// failures are logged and reduce the candidate pool; only a bad
    /// snapshot aborts.
    pub async fn build(config: &AppConfig) -> Result<Self> {
        let mut records = snapshot::load(&config.snapshot_path)?;
        let fetcher = LogoFetcher::new(&config.cache_dir, config.fetch.timeout_secs)?;

        for record in &mut records {
            match fetcher.fetch(&record.ticker, &record.logo_url).await {
                Ok(logo) => match ColorDescriptor::from_image(&logo) {
                    Ok(descriptor) => record.descriptor = Some(descriptor),
                    Err(e) => warn!(ticker = %record.ticker, "skipping logo: {}", e),
                },
                Err(e) => warn!(ticker = %record.ticker, "skipping logo: {}", e),
            }
        }

        let profiled = records.iter().filter(|r| r.descriptor.is_some()).count();
        info!(
            total = records.len(),
            profiled, "logo catalog ready"
        );

        Ok(Self {
            records,
            top_k: config.top_k,
        })
    }

    /// Build a recommender from pre-profiled records, bypassing the network.
    pub fn from_records(records: Vec<LogoRecord>, top_k: usize) -> Self {
        Self { records, top_k }
    }

    /// Match an uploaded image against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::UserInput` if the bytes are not a decodable
    /// image. An empty candidate pool is not an error; the list is empty.
    pub fn recommend(&self, image_bytes: &[u8]) -> Result<Vec<Recommendation>> {
        let query = ColorDescriptor::from_bytes(image_bytes).map_err(|e| {
            RecommendError::user_input(format!("could not read the uploaded image: {}", e))
        })?;

        let recommendations = matcher::rank(&self.records, &query, self.top_k)
            .into_iter()
            .map(|ranked| {
                let record = &self.records[ranked.index];
                // rank only returns records with a descriptor
                let swatch_hex = record
                    .descriptor
                    .as_ref()
                    .map(|d| d.hex())
                    .unwrap_or_default();
                Recommendation {
                    ticker: record.ticker.clone(),
                    name: record.name.clone(),
                    score: ranked.distance,
                    swatch_hex,
                    logo_file: format!("{}.png", record.ticker),
                }
            })
            .collect();

        Ok(recommendations)
    }

    /// All records, profiled or not
    pub fn records(&self) -> &[LogoRecord] {
        &self.records
    }

    /// Number of records eligible for matching
    pub fn candidate_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.descriptor.is_some())
            .count()
    }
}
