//! Shared types for the wharf workspace.
//!
//! This crate defines the core data model used across wharf:
//! the content identifier ([`Cid`]), the content-address reference
//! ([`CidRef`]), the fixed set of record fields ([`FieldRole`]),
//! the external input record ([`RawRecord`]), and the persisted
//! manifest ([`Manifest`], [`ManifestEntry`]).

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The content-addressing URI scheme wharf recognizes.
///
/// The check is an exact, case-sensitive prefix match. No other schemes
/// (gateway URLs, `dweb:`, ...) are inferred: a value that does not start
/// with this token is simply not a content-address reference.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Whether a URI uses the content-addressing scheme.
pub fn is_content_uri(uri: &str) -> bool {
    uri.starts_with(IPFS_SCHEME)
}

// ---------------------------------------------------------------------------
// Content identifiers
// ---------------------------------------------------------------------------

/// An IPFS-style content identifier.
///
/// The identifier is derived deterministically from an object's bytes and is
/// used both to name the object in local storage and to verify it later.
/// wharf treats it as an opaque token; decoding or validating the CID
/// internals is delegated to the external tools.
#[derive(Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    /// Wrap a raw content-identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Field roles
// ---------------------------------------------------------------------------

/// The four record fields that may carry a content-address reference.
///
/// The order of [`FieldRole::ALL`] is the fixed extraction order and also the
/// key order of the persisted per-entry field map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    /// The primary asset payload.
    Artifact,
    /// The display rendition.
    Display,
    /// The thumbnail rendition.
    Thumbnail,
    /// Detached metadata document.
    Metadata,
}

impl FieldRole {
    /// All roles, in extraction order.
    pub const ALL: [FieldRole; 4] = [
        FieldRole::Artifact,
        FieldRole::Display,
        FieldRole::Thumbnail,
        FieldRole::Metadata,
    ];

    /// Stable lowercase name, matching the persisted key.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::Artifact => "artifact",
            FieldRole::Display => "display",
            FieldRole::Thumbnail => "thumbnail",
            FieldRole::Metadata => "metadata",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Content-address references
// ---------------------------------------------------------------------------

/// A parsed `ipfs://` URI: the original URI string plus the content address
/// it carries.
///
/// Two references with the same [`Cid`] denote the same object regardless of
/// which record or field they came from. Serializes as the exact original URI
/// string so the persisted manifest round-trips losslessly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CidRef {
    uri: String,
    cid: Cid,
}

impl CidRef {
    /// Parse an `ipfs://` URI into a reference.
    ///
    /// Returns `None` when the value does not use the content-addressing
    /// scheme or carries an empty address. The content address is the
    /// authority component: everything between the scheme and the first `/`.
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix(IPFS_SCHEME)?;
        let address = rest.split('/').next().unwrap_or(rest);
        if address.is_empty() {
            return None;
        }
        Some(Self {
            uri: uri.to_owned(),
            cid: Cid::new(address),
        })
    }

    /// The original URI string, unmodified.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The content address carried by the URI.
    pub fn cid(&self) -> &Cid {
        &self.cid
    }
}

impl TryFrom<String> for CidRef {
    type Error = String;

    fn try_from(uri: String) -> Result<Self, Self::Error> {
        CidRef::parse(&uri).ok_or_else(|| format!("not a content-address URI: {uri}"))
    }
}

impl From<CidRef> for String {
    fn from(r: CidRef) -> String {
        r.uri
    }
}

impl fmt::Debug for CidRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CidRef({})", self.uri)
    }
}

impl fmt::Display for CidRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// A metadata record as supplied by the discovery collaborator.
///
/// Owned by the external source and read-only to wharf: the core only ever
/// inspects the four role fields for content-address references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Display name of the record.
    pub name: String,
    /// Category label (e.g. a media kind).
    pub category: String,
    /// URI for [`FieldRole::Artifact`], if any.
    pub artifact_uri: Option<String>,
    /// URI for [`FieldRole::Display`], if any.
    pub display_uri: Option<String>,
    /// URI for [`FieldRole::Thumbnail`], if any.
    pub thumbnail_uri: Option<String>,
    /// URI for [`FieldRole::Metadata`], if any.
    pub metadata_uri: Option<String>,
}

impl RawRecord {
    /// The record's URI value for a given role, if present.
    pub fn uri(&self, role: FieldRole) -> Option<&str> {
        match role {
            FieldRole::Artifact => self.artifact_uri.as_deref(),
            FieldRole::Display => self.display_uri.as_deref(),
            FieldRole::Thumbnail => self.thumbnail_uri.as_deref(),
            FieldRole::Metadata => self.metadata_uri.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// One discovered record and its content-address references.
///
/// A role key is present only when the source field actually used the
/// content-addressing scheme; an entry with an empty field map is still a
/// valid entry (it records a discovered token with no addressable assets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Display name from the source record.
    pub name: String,
    /// Category label from the source record.
    pub category: String,
    /// Present content-address references, keyed by role.
    #[serde(default)]
    pub fields: BTreeMap<FieldRole, CidRef>,
}

/// The ordered, persisted record of discovered entries.
///
/// Entries appear in discovery order and are never reordered, merged or
/// mutated after construction. Deduplication happens only at the point of
/// consumption (sync, verify, export), never at the entry level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Discovered entries, in discovery order.
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Distinct content addresses appearing anywhere in the manifest,
    /// in first-seen order.
    ///
    /// Built by a single streaming pass; this order is the processing order
    /// for backup, verification and export.
    pub fn unique_cids(&self) -> Vec<Cid> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for entry in &self.entries {
            for cid_ref in entry.fields.values() {
                if seen.insert(cid_ref.cid().clone()) {
                    out.push(cid_ref.cid().clone());
                }
            }
        }
        out
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
