//! Record discovery from the remote metadata service.
//!
//! The remote service supplies [`RawRecord`]s one page at a time, filtered
//! by a creator/holder address and paginated by a monotonically increasing
//! cursor. [`discover`] drives that pagination for a set of filters;
//! [`HttpRecordSource`] is the HTTP implementation of the collaborator.
//!
//! [`RawRecord`]: wharf_types::RawRecord

mod driver;
mod error;
mod http;

pub use driver::{discover, RecordSource};
pub use error::DiscoveryError;
pub use http::HttpRecordSource;
