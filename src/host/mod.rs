//! Navigation host
//!
//! Reference consumer of the resolver:
//! - Parses snapshots pushed in by collaborators
//! - Applies them last-snapshot-wins, never redirecting twice for the
//!   same state
//! - Drives a live snapshot feed asynchronously

mod follow;
mod input;
mod navigator;

pub use follow::*;
pub use input::*;
pub use navigator::*;
