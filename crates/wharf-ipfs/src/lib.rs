//! External tool seam for wharf.
//!
//! Backup and verification never touch object bytes themselves; they drive
//! two external capabilities behind traits:
//!
//! - [`ObjectFetcher`] retrieves the object for a content address into a
//!   local file.
//! - [`CidHasher`] recomputes the content address(es) for a local file.
//!
//! [`IpfsCli`] implements both by shelling out to the `ipfs` binary, and
//! probes its availability up front so a missing tool fails before any work
//! begins.

mod cli;
mod error;
mod traits;

pub use cli::IpfsCli;
pub use error::ToolError;
pub use traits::{CidHasher, ObjectFetcher};
