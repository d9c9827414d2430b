//! The route resolver.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Either readiness gate closed → `None` (keep loading)
//! 2. No session → sign-in
//! 3. Profile still loading → `None`
//! 4. Guardian → today / pending-approval / family-setup
//! 5. Participant → today / pending-approval
//!
//! Pure and synchronous: identical snapshots always produce identical
//! decisions.

use tracing::trace;

use crate::persona::{derive_persona, Persona};
use crate::routing::{RouteDecision, RoutePath};
use crate::types::AuthState;

/// Resolve the snapshot to a navigation directive.
///
/// `None` means "not yet decided": the caller keeps showing its loading
/// state and performs no navigation.
pub fn resolve_route(state: &AuthState) -> Option<RouteDecision> {
    // Both bootstraps must finish; either alone can't be trusted.
    if !state.auth_ready || !state.store_ready {
        trace!(
            auth_ready = state.auth_ready,
            store_ready = state.store_ready,
            "Readiness gate closed"
        );
        return None;
    }

    if !state.session {
        return Some(RouteDecision::new(RoutePath::SignIn, "No active session"));
    }

    let Some(persona) = derive_persona(state) else {
        trace!("Session active, profile not loaded");
        return None;
    };

    let decision = match persona {
        Persona::Guardian => guardian_route(state),
        Persona::ParticipantCode | Persona::ParticipantEmail => participant_route(persona, state),
    };

    trace!(persona = %persona, path = %decision.path, "Route resolved");
    Some(decision)
}

fn guardian_route(state: &AuthState) -> RouteDecision {
    if state.family.is_some() {
        RouteDecision::new(RoutePath::Today, "guardian has family access")
    } else if state.pending_join_request {
        RouteDecision::new(
            RoutePath::PendingApproval,
            "guardian is waiting for family approval",
        )
    } else {
        RouteDecision::new(
            RoutePath::FamilySetup,
            "guardian has no family; must create or join one",
        )
    }
}

// `pending_join_request` is intentionally not consulted here: participants
// wait for a guardian until a family is assigned.
fn participant_route(persona: Persona, state: &AuthState) -> RouteDecision {
    if state.family.is_some() {
        RouteDecision::new(RoutePath::Today, format!("{} has family access", persona))
    } else {
        RouteDecision::new(
            RoutePath::PendingApproval,
            "participant must wait for guardian approval; cannot self-create a family",
        )
    }
}
