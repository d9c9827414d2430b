//! Route identifiers and decisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Route Path
// ─────────────────────────────────────────────────────────────────

/// Screens the resolver can send a user to. The kebab-case slugs are
/// matched literally by the navigation host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutePath {
    /// Sign-in screen
    SignIn,
    /// Create or join a family (guardians only)
    FamilySetup,
    /// Waiting for a guardian to approve family membership
    PendingApproval,
    /// Main application
    Today,
}

impl RoutePath {
    pub fn slug(&self) -> &'static str {
        match self {
            RoutePath::SignIn => "sign-in",
            RoutePath::FamilySetup => "family-setup",
            RoutePath::PendingApproval => "pending-approval",
            RoutePath::Today => "today",
        }
    }

    pub fn all() -> &'static [RoutePath] {
        &[
            RoutePath::SignIn,
            RoutePath::FamilySetup,
            RoutePath::PendingApproval,
            RoutePath::Today,
        ]
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RoutePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutePath::all()
            .iter()
            .find(|path| path.slug() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown route '{}'. Valid: sign-in, family-setup, pending-approval, today",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Route Decision
// ─────────────────────────────────────────────────────────────────

/// Where to navigate, with a diagnostic reason.
///
/// `reason` is for logs and telemetry only; nothing may branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub path: RoutePath,
    pub reason: String,
}

impl RouteDecision {
    pub fn new(path: RoutePath, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.reason)
    }
}
