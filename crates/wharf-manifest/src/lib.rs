//! Manifest construction, persistence and CID export.
//!
//! This crate turns raw discovery records into the durable manifest artifact:
//! - [`extract_refs`] pulls content-address references out of one record.
//! - [`build_manifest`] aggregates records into an ordered [`Manifest`].
//! - [`save_manifest`] / [`load_manifest`] give a lossless JSON round-trip.
//! - [`export_cids`] projects the flat, deduplicated address list.
//!
//! The manifest is the single artifact decoupling discovery from backup and
//! verification: once persisted, sync and verify runs never re-query the
//! remote source.

mod build;
mod error;
mod export;
mod extract;
mod persist;

pub use build::build_manifest;
pub use error::ManifestError;
pub use export::{export_cids, format_cid_list};
pub use extract::extract_refs;
pub use persist::{load_manifest, save_manifest};
