use std::path::PathBuf;

/// Errors surfaced by an analysis run.
///
/// Extraction, aggregation and ranking never fail; degenerate text just
/// yields empty results. Only the document collaborator and configuration
/// loading produce errors, and a failed fetch aborts the run before any
/// ranking is computed.
#[derive(Debug, thiserror::Error)]
pub enum DensityError {
    /// The document could not be fetched or parsed within the timeout.
    #[error("Please check URL and Internet Connectivity, and try again. ({url}: {reason})")]
    SourceUnavailable {
        /// Target that was requested.
        url: String,
        /// What went wrong, from the transport or parser.
        reason: String,
    },

    /// The URL is not something we can fetch.
    #[error("Invalid URL \"{url}\": {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configuration failed validation; every problem is listed.
    #[error("Invalid configuration: {}", .problems.join("; "))]
    InvalidConfig {
        /// One entry per failed check.
        problems: Vec<String>,
    },

    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`crate::config::DensityConfig`].
    #[error("Failed to parse config: {source}")]
    ConfigParse {
        /// The underlying error.
        #[from]
        source: serde_json::Error,
    },
}

impl DensityError {
    /// Convenience constructor for collaborator failures.
    pub fn source_unavailable(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure came from fetching or parsing the document.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::InvalidUrl { .. })
    }
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, DensityError>;
