//! Snapshot application and redirect suppression.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConsistencyPolicy, OutputFormat};
use crate::error::{Error, Result};
use crate::routing::{resolve_route, RouteDecision, RoutePath};
use crate::types::AuthState;

// ─────────────────────────────────────────────────────────────────
// Outcomes and Events
// ─────────────────────────────────────────────────────────────────

/// What the host does with one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// Replace the current screen
    Navigate(RouteDecision),
    /// Resolver said "not yet"; keep the loading state / current screen
    Hold,
    /// Same snapshot, or already on the resolved screen
    Unchanged,
}

impl NavigationOutcome {
    /// Hold and unchanged outcomes perform no navigation.
    pub fn is_idle(&self) -> bool {
        !matches!(self, NavigationOutcome::Navigate(_))
    }
}

/// One applied snapshot, as reported to the outside.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationEvent {
    /// 1-based count of snapshots applied by this host
    pub seq: u64,

    /// When the snapshot was applied
    pub at: DateTime<Utc>,

    #[serde(flatten)]
    pub outcome: NavigationOutcome,

    /// Screen shown after this event
    pub current: Option<RoutePath>,
}

impl NavigationEvent {
    /// Render for stdout.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

impl fmt::Display for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            NavigationOutcome::Navigate(decision) => {
                write!(f, "#{} navigate {}", self.seq, decision)
            }
            NavigationOutcome::Hold => match self.current {
                Some(path) => write!(f, "#{} hold (showing {})", self.seq, path),
                None => write!(f, "#{} hold (loading)", self.seq),
            },
            NavigationOutcome::Unchanged => match self.current {
                Some(path) => write!(f, "#{} unchanged {}", self.seq, path),
                None => write!(f, "#{} unchanged (loading)", self.seq),
            },
        }
    }
}

/// Running totals for a host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostStats {
    pub applied: u64,
    pub navigations: u64,
    pub holds: u64,
    pub unchanged: u64,
    pub rejected: u64,
}

// ─────────────────────────────────────────────────────────────────
// Navigation Host
// ─────────────────────────────────────────────────────────────────

/// Applies snapshots one at a time. The latest snapshot fully determines
/// the decision; earlier decisions are discarded.
#[derive(Debug, Clone)]
pub struct NavigationHost {
    policy: ConsistencyPolicy,
    last_snapshot: Option<AuthState>,
    current: Option<RoutePath>,
    last_reason: Option<String>,
    stats: HostStats,
}

impl NavigationHost {
    pub fn new(policy: ConsistencyPolicy) -> Self {
        Self {
            policy,
            last_snapshot: None,
            current: None,
            last_reason: None,
            stats: HostStats::default(),
        }
    }

    /// Screen currently shown, `None` while still on the loading state.
    pub fn current(&self) -> Option<RoutePath> {
        self.current
    }

    /// Reason behind the most recent non-null decision.
    pub fn last_reason(&self) -> Option<&str> {
        self.last_reason.as_deref()
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Back to the initial loading state. Counters are kept.
    pub fn reset(&mut self) {
        self.last_snapshot = None;
        self.current = None;
        self.last_reason = None;
    }

    /// Apply a snapshot and report what the host did with it.
    ///
    /// Fails only when the consistency policy is `reject` and the snapshot
    /// violates the collaborator contract; the host state is then untouched.
    pub fn apply(&mut self, snapshot: AuthState) -> Result<NavigationEvent> {
        self.check_consistency(&snapshot)?;
        self.stats.applied += 1;

        let outcome = if self.last_snapshot.as_ref() == Some(&snapshot) {
            debug!("Snapshot identical to previous, skipping resolution");
            NavigationOutcome::Unchanged
        } else {
            let decision = resolve_route(&snapshot);
            self.last_snapshot = Some(snapshot);
            self.outcome_for(decision)
        };

        match outcome {
            NavigationOutcome::Navigate(ref decision) => {
                self.stats.navigations += 1;
                info!(path = %decision.path, reason = %decision.reason, "Navigating");
            }
            NavigationOutcome::Hold => self.stats.holds += 1,
            NavigationOutcome::Unchanged => self.stats.unchanged += 1,
        }

        Ok(NavigationEvent {
            seq: self.stats.applied,
            at: Utc::now(),
            outcome,
            current: self.current,
        })
    }

    fn outcome_for(&mut self, decision: Option<RouteDecision>) -> NavigationOutcome {
        let Some(decision) = decision else {
            debug!(current = ?self.current, "Resolver undecided, holding");
            return NavigationOutcome::Hold;
        };

        self.last_reason = Some(decision.reason.clone());

        if self.current == Some(decision.path) {
            debug!(path = %decision.path, "Already on resolved screen");
            NavigationOutcome::Unchanged
        } else {
            self.current = Some(decision.path);
            NavigationOutcome::Navigate(decision)
        }
    }

    fn check_consistency(&mut self, snapshot: &AuthState) -> Result<()> {
        if self.policy == ConsistencyPolicy::Ignore {
            return Ok(());
        }

        let issues = snapshot.consistency_issues();
        if issues.is_empty() {
            return Ok(());
        }

        if self.policy == ConsistencyPolicy::Reject {
            self.stats.rejected += 1;
            return Err(Error::SnapshotInconsistent { issues });
        }

        for issue in &issues {
            warn!(issue = %issue, "Inconsistent snapshot");
        }
        Ok(())
    }
}

impl Default for NavigationHost {
    fn default() -> Self {
        Self::new(ConsistencyPolicy::Warn)
    }
}
