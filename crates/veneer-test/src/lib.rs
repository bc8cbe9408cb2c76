//! In-process test harness for veneer.
//!
//! [`MemoryRegistry`] is a deterministic [`OverlayRegistry`] backed by a
//! hash map: seed it with overlay state, hand it to a
//! [`Reconciler`](veneer::Reconciler), and assert on the resulting state,
//! the returned reports, or the recorded call log.
//!
//! Failure injection mirrors the ways a real overlay service misbehaves:
//!
//! - [`fail_writes_for`](MemoryRegistry::fail_writes_for) /
//!   [`fail_reads_for`](MemoryRegistry::fail_reads_for) reject calls for
//!   specific overlays;
//! - [`set_offline`](MemoryRegistry::set_offline) rejects everything;
//! - [`mark_unregistered`](MemoryRegistry::mark_unregistered) makes reads
//!   answer "unknown overlay".
//!
//! Real overlay services enforce exclusivity among overlays of the same
//! category; [`set_exclusive_group`](MemoryRegistry::set_exclusive_group)
//! reproduces that, so enabling one member of a group disables the rest.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use veneer::{OverlayId, OverlayInfo, OverlayRegistry, RegistryError, UserScope};

/// One recorded registry call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    /// A write: enable or disable one overlay.
    SetEnabled {
        overlay: OverlayId,
        enable: bool,
        scope: UserScope,
    },
    /// A read of one overlay's state.
    OverlayInfo { overlay: OverlayId, scope: UserScope },
}

#[derive(Debug, Default)]
struct Inner {
    enabled: HashMap<(UserScope, OverlayId), bool>,
    unregistered: HashSet<OverlayId>,
    failing_writes: HashSet<OverlayId>,
    failing_reads: HashSet<OverlayId>,
    exclusive_groups: Vec<Vec<OverlayId>>,
    offline: bool,
    calls: Vec<RegistryCall>,
}

/// Deterministic in-memory overlay registry.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    inner: Mutex<Inner>,
}

impl MemoryRegistry {
    /// Creates an empty registry: every overlay known, nothing enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the enablement of one overlay.
    pub fn seed(&self, scope: UserScope, overlay: impl Into<OverlayId>, enabled: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.enabled.insert((scope, overlay.into()), enabled);
    }

    /// Returns the current enablement of one overlay.
    pub fn is_enabled(&self, scope: UserScope, overlay: impl Into<OverlayId>) -> bool {
        let inner = self.inner.lock().unwrap();
        inner
            .enabled
            .get(&(scope, overlay.into()))
            .copied()
            .unwrap_or(false)
    }

    /// Returns every enabled overlay in the scope, sorted by id.
    pub fn enabled_overlays(&self, scope: UserScope) -> Vec<OverlayId> {
        let inner = self.inner.lock().unwrap();
        let mut ids: Vec<OverlayId> = inner
            .enabled
            .iter()
            .filter(|((s, _), enabled)| *s == scope && **enabled)
            .map(|((_, overlay), _)| overlay.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Makes reads of this overlay answer "unknown".
    pub fn mark_unregistered(&self, overlay: impl Into<OverlayId>) {
        let mut inner = self.inner.lock().unwrap();
        inner.unregistered.insert(overlay.into());
    }

    /// Makes writes to this overlay fail.
    pub fn fail_writes_for(&self, overlay: impl Into<OverlayId>) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing_writes.insert(overlay.into());
    }

    /// Makes reads of this overlay fail.
    pub fn fail_reads_for(&self, overlay: impl Into<OverlayId>) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing_reads.insert(overlay.into());
    }

    /// Rejects every call while set.
    pub fn set_offline(&self, offline: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.offline = offline;
    }

    /// Declares a set of mutually exclusive overlays: enabling one
    /// disables the other members, as a real overlay service does for
    /// overlays of the same category.
    pub fn set_exclusive_group(&self, overlays: Vec<OverlayId>) {
        let mut inner = self.inner.lock().unwrap();
        inner.exclusive_groups.push(overlays);
    }

    /// Every call recorded so far, reads and writes, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Only the writes recorded so far, in order.
    pub fn writes(&self) -> Vec<(OverlayId, bool)> {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter_map(|call| match call {
                RegistryCall::SetEnabled {
                    overlay, enable, ..
                } => Some((overlay.clone(), *enable)),
                RegistryCall::OverlayInfo { .. } => None,
            })
            .collect()
    }

    /// Clears the call log, keeping state and failure switches.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }
}

impl OverlayRegistry for MemoryRegistry {
    fn set_enabled(
        &self,
        overlay: &OverlayId,
        enable: bool,
        scope: UserScope,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::SetEnabled {
            overlay: overlay.clone(),
            enable,
            scope,
        });
        if inner.offline {
            return Err(RegistryError::new("registry offline"));
        }
        if inner.failing_writes.contains(overlay) {
            return Err(RegistryError::new(format!("write rejected for {overlay}")));
        }
        if enable {
            let siblings: Vec<OverlayId> = inner
                .exclusive_groups
                .iter()
                .filter(|group| group.contains(overlay))
                .flatten()
                .filter(|member| *member != overlay)
                .cloned()
                .collect();
            for member in siblings {
                inner.enabled.insert((scope, member), false);
            }
        }
        inner.enabled.insert((scope, overlay.clone()), enable);
        Ok(())
    }

    fn overlay_info(
        &self,
        overlay: &OverlayId,
        scope: UserScope,
    ) -> Result<Option<OverlayInfo>, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RegistryCall::OverlayInfo {
            overlay: overlay.clone(),
            scope,
        });
        if inner.offline {
            return Err(RegistryError::new("registry offline"));
        }
        if inner.failing_reads.contains(overlay) {
            return Err(RegistryError::new(format!("read rejected for {overlay}")));
        }
        if inner.unregistered.contains(overlay) {
            return Ok(None);
        }
        let enabled = inner
            .enabled
            .get(&(scope, overlay.clone()))
            .copied()
            .unwrap_or(false);
        Ok(Some(OverlayInfo { enabled }))
    }
}
