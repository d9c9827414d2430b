//! Route resolution
//!
//! Turns an [`AuthState`](crate::types::AuthState) snapshot into the single
//! screen the user should see next, or `None` while bootstrap is still in
//! flight.

mod resolver;
mod table;
mod types;

pub use resolver::*;
pub use table::*;
pub use types::*;
