//! HTTP implementation of the record source.

use serde::Deserialize;
use tracing::debug;
use wharf_types::RawRecord;

use crate::driver::RecordSource;
use crate::error::DiscoveryError;

/// Record source backed by the remote metadata HTTP API.
///
/// Queries `{base_url}/records?creator=<filter>&page=<cursor>` and expects a
/// JSON array of record objects. A non-success status is fatal to the
/// current discovery operation.
pub struct HttpRecordSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordSource {
    /// Create a source for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for HttpRecordSource {
    async fn page(&self, filter: &str, cursor: u64) -> Result<Vec<RawRecord>, DiscoveryError> {
        let url = format!("{}/records", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("creator", filter), ("page", &cursor.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status {
                filter: filter.to_owned(),
                status: status.as_u16(),
            });
        }

        let page: Vec<RecordDto> = response.json().await?;
        debug!(filter, cursor, count = page.len(), "record page fetched");
        Ok(page.into_iter().map(RawRecord::from).collect())
    }
}

/// Wire shape of one record as the API serves it.
///
/// Every field is optional on the wire; absent names and categories map to
/// empty strings rather than failing the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    artifact_uri: Option<String>,
    #[serde(default)]
    display_uri: Option<String>,
    #[serde(default)]
    thumbnail_uri: Option<String>,
    #[serde(default)]
    metadata_uri: Option<String>,
}

impl From<RecordDto> for RawRecord {
    fn from(dto: RecordDto) -> Self {
        RawRecord {
            name: dto.name.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
            artifact_uri: dto.artifact_uri,
            display_uri: dto.display_uri,
            thumbnail_uri: dto.thumbnail_uri,
            metadata_uri: dto.metadata_uri,
        }
    }
}
