//! Error types for the logorec pipeline

use thiserror::Error;

/// Result type alias for logorec operations
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Error types for snapshot loading, logo fetching, and matching
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Snapshot file is missing, unreadable, or malformed; always fatal
    #[error("Snapshot error: {message}")]
    Snapshot {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An image could not be decoded
    #[error("Failed to load image: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A logo download failed; non-fatal, the record is skipped
    #[error("Fetch failed for {ticker}: {message}")]
    Fetch {
        ticker: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The uploaded query image was rejected
    #[error("Invalid upload: {message}")]
    UserInput { message: String },

    /// Filesystem error (cache directory, uploads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Web server failed to start or bind
    #[error("Server error: {message}")]
    Server { message: String },
}

impl RecommendError {
    /// Create a snapshot error with context
    pub fn snapshot<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Snapshot {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a snapshot error without an underlying cause
    pub fn snapshot_msg(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
            source: None,
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a fetch error with context
    pub fn fetch<E>(ticker: impl Into<String>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fetch {
            ticker: ticker.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a user input error
    pub fn user_input(message: impl Into<String>) -> Self {
        Self::UserInput {
            message: message.into(),
        }
    }

    /// Whether the run can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RecommendError::Fetch { .. } | RecommendError::UserInput { .. }
        )
    }

    /// User-friendly description for the results page
    pub fn user_message(&self) -> String {
        match self {
            RecommendError::UserInput { message } => message.clone(),
            RecommendError::ImageLoad { .. } => {
                "Could not read the uploaded image. Please upload a PNG or JPEG file.".to_string()
            }
            _ => "Something went wrong computing the match. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_are_recoverable() {
        let err = RecommendError::Fetch {
            ticker: "AAPL".into(),
            message: "HTTP 404".into(),
            source: None,
        };
        assert!(err.is_recoverable());

        let err = RecommendError::snapshot_msg("missing stock_data key");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_message_for_bad_upload() {
        let err = RecommendError::user_input("No file selected");
        assert_eq!(err.user_message(), "No file selected");
    }
}
