//! Persona system: routing-only role classification.
//!
//! A persona is derived from, but distinct from, the stored profile role:
//! kids split into code-authenticated and email-authenticated participants.

pub mod derive;
pub mod types;

pub use derive::derive_persona;
pub use types::Persona;
