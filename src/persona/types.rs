//! Core persona type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// The three routing personas. "No persona" (signed out or profile still
/// loading) is `Option::<Persona>::None`, never a variant.
///
/// The slugs are an external contract; downstream consumers match on them
/// literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Adult administering a family.
    Guardian,
    /// Kid signed in with an access code.
    ParticipantCode,
    /// Kid signed in with email.
    ParticipantEmail,
}

impl Persona {
    /// Wire identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Persona::Guardian => "guardian",
            Persona::ParticipantCode => "participant_code",
            Persona::ParticipantEmail => "participant_email",
        }
    }

    /// All personas in a stable order.
    pub fn all() -> &'static [Persona] {
        &[
            Persona::Guardian,
            Persona::ParticipantCode,
            Persona::ParticipantEmail,
        ]
    }

    /// Participants never administer a family.
    pub fn is_participant(&self) -> bool {
        matches!(self, Persona::ParticipantCode | Persona::ParticipantEmail)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guardian" => Ok(Persona::Guardian),
            "participant_code" => Ok(Persona::ParticipantCode),
            "participant_email" => Ok(Persona::ParticipantEmail),
            _ => Err(format!(
                "Unknown persona '{}'. Valid: guardian, participant_code, participant_email",
                s
            )),
        }
    }
}
