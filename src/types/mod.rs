//! Type definitions for the family router
//!
//! Snapshot types pushed in by the auth/session provider, the family
//! directory and the local store bootstrap.

mod profile;
mod snapshot;

pub use profile::*;
pub use snapshot::*;
