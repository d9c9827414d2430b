//! Persona derivation from an auth snapshot.

use crate::persona::Persona;
use crate::types::{AuthState, Role};

/// Classify the snapshot's user.
///
/// Returns `None` when there is no session or the profile has not loaded
/// yet. Guardians are always [`Persona::Guardian`] whatever their passcode
/// or family; kids split on whether a passcode is present.
pub fn derive_persona(state: &AuthState) -> Option<Persona> {
    if !state.session {
        return None;
    }

    let profile = state.profile.as_ref()?;

    Some(match profile.role {
        Role::Guardian => Persona::Guardian,
        Role::Kid if profile.passcode.is_some() => Persona::ParticipantCode,
        Role::Kid => Persona::ParticipantEmail,
    })
}
