//! Pagination driver over a record source.

use tracing::{debug, info, warn};
use wharf_types::RawRecord;

use crate::error::DiscoveryError;

/// A paginated source of raw records.
///
/// The cursor starts at 0 and advances by one logical step per page; the
/// source signals exhaustion with an empty page.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// One page of records matching `filter` at the given cursor.
    async fn page(&self, filter: &str, cursor: u64) -> Result<Vec<RawRecord>, DiscoveryError>;
}

/// Collect all records matching the given filters.
///
/// Pages are requested per filter until an empty page is returned. A filter
/// that matches nothing only logs a warning and the remaining filters are
/// still queried; an empty aggregate across all filters is fatal
/// ([`DiscoveryError::EmptySelection`]). Transport and non-success errors
/// abort the whole operation.
pub async fn discover(
    source: &dyn RecordSource,
    filters: &[String],
) -> Result<Vec<RawRecord>, DiscoveryError> {
    let mut records = Vec::new();

    for filter in filters {
        let before = records.len();
        let mut cursor = 0u64;
        loop {
            let page = source.page(filter, cursor).await?;
            if page.is_empty() {
                break;
            }
            debug!(filter, cursor, count = page.len(), "record page received");
            records.extend(page);
            cursor += 1;
        }

        let matched = records.len() - before;
        if matched == 0 {
            warn!(filter, "filter matched no records");
        } else {
            info!(filter, count = matched, "filter discovery complete");
        }
    }

    if records.is_empty() {
        return Err(DiscoveryError::EmptySelection);
    }
    Ok(records)
}
