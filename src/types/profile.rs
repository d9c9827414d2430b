//! Profile and family records as supplied by the data store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────

/// Stored account role. Closed two-value set; anything else is rejected
/// when the profile is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Adult who administers a family and can create one.
    Guardian,
    /// Child account that completes tracked tasks.
    Kid,
}

impl Role {
    /// Wire identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Role::Guardian => "guardian",
            Role::Kid => "kid",
        }
    }

    /// All roles.
    pub fn all() -> &'static [Role] {
        &[Role::Guardian, Role::Kid]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guardian" => Ok(Role::Guardian),
            "kid" => Ok(Role::Kid),
            _ => Err(format!("Unknown role '{}'. Valid: guardian, kid", s)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────

/// A loaded user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Opaque profile identifier
    pub id: String,

    /// Stored role
    pub role: Role,

    /// Access code for code-authenticated kids. Only meaningful for
    /// [`Role::Kid`]; ignored for guardians.
    #[serde(default)]
    pub passcode: Option<String>,

    /// Family the profile claims to belong to
    #[serde(default)]
    pub family_id: Option<String>,
}

impl Profile {
    /// Guardian profile with no family.
    pub fn guardian(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Guardian,
            passcode: None,
            family_id: None,
        }
    }

    /// Kid profile with no passcode and no family (email sign-in).
    pub fn kid(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Kid,
            passcode: None,
            family_id: None,
        }
    }

    pub fn with_passcode(mut self, passcode: impl Into<String>) -> Self {
        self.passcode = Some(passcode.into());
        self
    }

    pub fn with_family_id(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    /// Whether this profile authenticates with an access code.
    pub fn uses_passcode(&self) -> bool {
        self.passcode.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────
// Family
// ─────────────────────────────────────────────────────────────────

/// A family group record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Family {
    /// Opaque family identifier
    pub id: String,
}

impl Family {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
