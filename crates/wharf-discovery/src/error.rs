//! Error types for record discovery.

/// Errors that can occur while querying the remote record service.
///
/// Any variant is fatal to the current discovery operation; a filter that
/// merely matches nothing is not an error (it only logs a warning) unless
/// the aggregate selection across all filters ends up empty.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The query transport failed (connection, timeout, body decode).
    #[error("record query failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("record query for filter `{filter}` returned status {status}")]
    Status {
        /// The filter being queried.
        filter: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// No records matched any of the requested filters.
    #[error("no records matched any of the requested filters")]
    EmptySelection,
}
