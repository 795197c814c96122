//! Backup integrity verification.
//!
//! Trust in a backup is established purely by recomputing each object's
//! content address from the bytes on disk and comparing it to the address
//! recorded in the manifest at discovery time; no external authority is
//! consulted. [`Verifier`] performs that pass with per-run memoization;
//! [`VerifyReport`] exposes the result per unique address and per manifest
//! entry.

mod error;
mod report;
mod verify;

pub use error::VerifyError;
pub use report::{EntryStatus, VerifyReport, VerifyStatus, VerifySummary};
pub use verify::Verifier;
