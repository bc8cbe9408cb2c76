//! Per-package toggle outcomes.
//!
//! Reconciliation is best-effort: a failure on one overlay never aborts the
//! remaining work, and nothing is rolled back. Instead of swallowing those
//! failures, every mutating operation returns a [`ToggleReport`] — the
//! ordered sequence of per-package outcomes — so callers and tests can
//! assert partial-failure behavior deterministically.

use crate::error::RegistryError;
use crate::registry::OverlayId;

/// Direction of a single overlay toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleAction {
    /// The overlay was to be enabled.
    Enable,
    /// The overlay was to be disabled.
    Disable,
}

impl ToggleAction {
    /// Returns the action matching a target enablement flag.
    pub fn from_enable(enable: bool) -> Self {
        if enable {
            Self::Enable
        } else {
            Self::Disable
        }
    }

    /// Returns `true` if this action enables the overlay.
    pub fn enables(self) -> bool {
        matches!(self, Self::Enable)
    }

    /// Returns the display name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl std::fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one overlay toggle attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    overlay: OverlayId,
    action: ToggleAction,
    result: Result<(), RegistryError>,
}

impl ToggleOutcome {
    /// Records the outcome of a single toggle.
    pub fn new(overlay: OverlayId, action: ToggleAction, result: Result<(), RegistryError>) -> Self {
        Self {
            overlay,
            action,
            result,
        }
    }

    /// The overlay that was toggled.
    pub fn overlay(&self) -> &OverlayId {
        &self.overlay
    }

    /// The requested direction.
    pub fn action(&self) -> ToggleAction {
        self.action
    }

    /// Returns `true` if the service accepted the toggle.
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// The communication error, if the toggle failed.
    pub fn error(&self) -> Option<&RegistryError> {
        self.result.as_ref().err()
    }
}

/// Ordered collection of toggle outcomes from one reconciliation call.
///
/// Outcomes appear in issue order, including the nested neutral-accent
/// corrections and legacy-overlay cleanups a theme mode change performs,
/// so the exact write sequence is observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleReport {
    outcomes: Vec<ToggleOutcome>,
}

impl ToggleReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one outcome.
    pub fn push(&mut self, outcome: ToggleOutcome) {
        self.outcomes.push(outcome);
    }

    /// Appends all outcomes of another report, preserving order.
    pub fn merge(&mut self, other: ToggleReport) {
        self.outcomes.extend(other.outcomes);
    }

    /// All outcomes in issue order.
    pub fn outcomes(&self) -> &[ToggleOutcome] {
        &self.outcomes
    }

    /// Number of toggles attempted.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if no toggles were attempted.
    ///
    /// An empty report is how the engine signals a defined no-op (an
    /// out-of-band accent slot, or a contradictory mode request).
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns `true` if every attempted toggle succeeded.
    pub fn fully_applied(&self) -> bool {
        self.outcomes.iter().all(ToggleOutcome::succeeded)
    }

    /// Iterates over the outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ToggleOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// Returns `true` if the report contains a toggle for the overlay.
    pub fn attempted(&self, overlay: &OverlayId) -> bool {
        self.outcomes.iter().any(|o| o.overlay() == overlay)
    }
}

impl IntoIterator for ToggleReport {
    type Item = ToggleOutcome;
    type IntoIter = std::vec::IntoIter<ToggleOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ToggleReport {
    type Item = &'a ToggleOutcome;
    type IntoIter = std::slice::Iter<'a, ToggleOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
