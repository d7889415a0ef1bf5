//! Fixed parameters for logo profiling and matching

/// Color descriptor shape
pub mod descriptor {
    /// Number of color channels in a descriptor (R, G, B)
    pub const CHANNELS: usize = 3;

    /// Histogram bins per channel (8-bit images)
    pub const BINS: usize = 256;
}

/// Matching parameters
pub mod matching {
    /// Number of recommendations returned per query
    pub const TOP_K: usize = 5;
}

/// Upload restrictions, mirroring the companion web front end
pub mod upload {
    /// Accepted query image extensions
    pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

    /// Maximum upload size in bytes (8 MiB)
    pub const MAX_BYTES: usize = 8 * 1024 * 1024;
}

/// Network defaults
pub mod network {
    /// Per-logo HTTP GET timeout in seconds
    pub const FETCH_TIMEOUT_SECS: u64 = 10;
}
