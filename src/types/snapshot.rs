//! Auth state snapshots
//!
//! An [`AuthState`] is produced fresh by the host on every relevant event
//! (sign-in, sign-out, token refresh, profile/family load, pending-request
//! change, readiness change). Snapshots are never merged: the latest one
//! fully determines the routing decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Family, Profile};

// ─────────────────────────────────────────────────────────────────
// Auth State
// ─────────────────────────────────────────────────────────────────

/// Immutable snapshot of everything the route resolver looks at.
///
/// Field names on the wire follow the host's JSON contract
/// (`pendingJoinRequest`, `authReady`, `storeReady`). Missing booleans
/// decode as `false` and missing records as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthState {
    /// An authenticated session exists
    pub session: bool,

    /// Loaded profile; `None` while signed out or still loading
    pub profile: Option<Profile>,

    /// Family the user belongs to. Presence is the only signal the
    /// resolver trusts; `profile.family_id` is never consulted.
    pub family: Option<Family>,

    /// A join request is awaiting guardian approval
    pub pending_join_request: bool,

    /// Remote auth bootstrap finished
    pub auth_ready: bool,

    /// Local persisted-state bootstrap finished
    pub store_ready: bool,
}

impl AuthState {
    /// Empty snapshot: signed out, nothing loaded, neither bootstrap done.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed-out snapshot with both bootstraps finished.
    pub fn signed_out() -> Self {
        Self::new().bootstrapped()
    }

    /// Signed-in snapshot with a loaded profile and both bootstraps finished.
    pub fn signed_in(profile: Profile) -> Self {
        Self::new().with_session(true).with_profile(profile).bootstrapped()
    }

    pub fn with_session(mut self, session: bool) -> Self {
        self.session = session;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn without_profile(mut self) -> Self {
        self.profile = None;
        self
    }

    pub fn with_family(mut self, family: Family) -> Self {
        self.family = Some(family);
        self
    }

    pub fn without_family(mut self) -> Self {
        self.family = None;
        self
    }

    pub fn with_pending_join_request(mut self, pending: bool) -> Self {
        self.pending_join_request = pending;
        self
    }

    pub fn with_readiness(mut self, auth_ready: bool, store_ready: bool) -> Self {
        self.auth_ready = auth_ready;
        self.store_ready = store_ready;
        self
    }

    /// Mark both bootstrap subsystems as finished.
    pub fn bootstrapped(self) -> Self {
        self.with_readiness(true, true)
    }

    /// Both readiness gates are open.
    pub fn is_ready(&self) -> bool {
        self.auth_ready && self.store_ready
    }

    /// Report contract violations between the collaborators that built
    /// this snapshot. Routing never depends on the result.
    pub fn consistency_issues(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        if self.profile.is_some() && !self.session {
            issues.push(ConsistencyIssue::ProfileWithoutSession);
        }

        match (&self.profile, &self.family) {
            (None, Some(_)) if self.session => {
                issues.push(ConsistencyIssue::FamilyWithoutProfile);
            }
            (Some(profile), Some(family)) if profile.family_id.as_deref() != Some(family.id.as_str()) => {
                issues.push(ConsistencyIssue::FamilyMismatch {
                    profile_family_id: profile.family_id.clone(),
                    family_id: family.id.clone(),
                });
            }
            _ => {}
        }

        issues
    }
}

// ─────────────────────────────────────────────────────────────────
// Consistency Issues
// ─────────────────────────────────────────────────────────────────

/// A snapshot shape the collaborators should never produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// Profile populated although no session exists
    ProfileWithoutSession,
    /// Family loaded before the profile
    FamilyWithoutProfile,
    /// Family record does not match the profile's `family_id`
    FamilyMismatch {
        profile_family_id: Option<String>,
        family_id: String,
    },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::ProfileWithoutSession => {
                write!(f, "profile present without an active session")
            }
            ConsistencyIssue::FamilyWithoutProfile => {
                write!(f, "family present while profile is not loaded")
            }
            ConsistencyIssue::FamilyMismatch {
                profile_family_id,
                family_id,
            } => write!(
                f,
                "profile family_id {} does not match family {}",
                profile_family_id.as_deref().unwrap_or("(none)"),
                family_id
            ),
        }
    }
}
