//! Content-address extraction from raw records.

use std::collections::BTreeMap;

use wharf_types::{CidRef, FieldRole, RawRecord};

/// Extract the content-address references from a record.
///
/// Each role in [`FieldRole::ALL`] is checked in its fixed order; a role is
/// present in the result only when the record's value for it uses the
/// `ipfs://` scheme. Absent fields and non-content URIs (gateway links,
/// `https:` mirrors, malformed values) are omitted silently; they are not an
/// error condition and leave no trace in the output.
///
/// Pure: the result depends only on the record's field values.
pub fn extract_refs(record: &RawRecord) -> BTreeMap<FieldRole, CidRef> {
    let mut fields = BTreeMap::new();
    for role in FieldRole::ALL {
        if let Some(cid_ref) = record.uri(role).and_then(CidRef::parse) {
            fields.insert(role, cid_ref);
        }
    }
    fields
}
