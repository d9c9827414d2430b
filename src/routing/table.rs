//! Exhaustive decision table.
//!
//! Enumerates every combination of session, profile shape, family,
//! pending request and readiness gates. Backs the `matrix` command and the
//! property tests.

use serde::Serialize;

use crate::persona::{derive_persona, Persona};
use crate::routing::{resolve_route, RouteDecision};
use crate::types::{AuthState, Family, Profile, Role};

/// Family id used for every enumerated family record.
pub const TABLE_FAMILY_ID: &str = "f1";

/// One row of the decision table.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRow {
    pub state: AuthState,
    pub persona: Option<Persona>,
    pub decision: Option<RouteDecision>,
}

/// Every profile shape: absent, or each role with and without a passcode
/// and a `family_id`.
pub fn all_profiles() -> Vec<Option<Profile>> {
    let mut profiles = vec![None];
    for role in Role::all() {
        for passcode in [None, Some("1234")] {
            for family_id in [None, Some(TABLE_FAMILY_ID)] {
                profiles.push(Some(Profile {
                    id: format!("{}-1", role.slug()),
                    role: *role,
                    passcode: passcode.map(str::to_string),
                    family_id: family_id.map(str::to_string),
                }));
            }
        }
    }
    profiles
}

/// Every snapshot the table covers, including shapes that violate the
/// session/profile invariant.
pub fn all_snapshots() -> Vec<AuthState> {
    let bools = [false, true];
    let mut states = Vec::new();

    for session in bools {
        for profile in all_profiles() {
            for family in [None, Some(Family::new(TABLE_FAMILY_ID))] {
                for pending_join_request in bools {
                    for auth_ready in bools {
                        for store_ready in bools {
                            states.push(AuthState {
                                session,
                                profile: profile.clone(),
                                family: family.clone(),
                                pending_join_request,
                                auth_ready,
                                store_ready,
                            });
                        }
                    }
                }
            }
        }
    }

    states
}

/// Resolve every enumerated snapshot.
pub fn decision_table() -> Vec<DecisionRow> {
    all_snapshots()
        .into_iter()
        .map(|state| DecisionRow {
            persona: derive_persona(&state),
            decision: resolve_route(&state),
            state,
        })
        .collect()
}
