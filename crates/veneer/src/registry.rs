//! The overlay service boundary.
//!
//! The reconciliation engine never talks to a concrete overlay service.
//! Everything goes through the [`OverlayRegistry`] trait: one call to flip
//! a single overlay on or off, one call to ask whether an overlay is
//! currently enabled. Transport, permissions, and persistence are the
//! implementor's concern.
//!
//! # Manual Implementation
//!
//! ```
//! use std::cell::RefCell;
//! use std::collections::HashMap;
//! use veneer::{OverlayId, OverlayInfo, OverlayRegistry, RegistryError, UserScope};
//!
//! #[derive(Default)]
//! struct Service(RefCell<HashMap<(UserScope, OverlayId), bool>>);
//!
//! impl OverlayRegistry for Service {
//!     fn set_enabled(
//!         &self,
//!         overlay: &OverlayId,
//!         enable: bool,
//!         scope: UserScope,
//!     ) -> Result<(), RegistryError> {
//!         self.0.borrow_mut().insert((scope, overlay.clone()), enable);
//!         Ok(())
//!     }
//!
//!     fn overlay_info(
//!         &self,
//!         overlay: &OverlayId,
//!         scope: UserScope,
//!     ) -> Result<Option<OverlayInfo>, RegistryError> {
//!         let enabled = self
//!             .0
//!             .borrow()
//!             .get(&(scope, overlay.clone()))
//!             .copied()
//!             .unwrap_or(false);
//!         Ok(Some(OverlayInfo { enabled }))
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Identifier of a single overlay package.
///
/// Overlay ids are opaque names defined by the catalog the service ships;
/// this crate never interprets them beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(String);

impl OverlayId {
    /// Creates an overlay id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OverlayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&OverlayId> for OverlayId {
    fn from(id: &OverlayId) -> Self {
        id.clone()
    }
}

/// The per-user partition under which overlay enablement is tracked.
///
/// Every read and write is scoped to exactly one user; scopes never
/// interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserScope(u32);

impl UserScope {
    /// Creates a scope for the given user id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw user id.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Read-side record for a single overlay package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayInfo {
    /// Whether the overlay is currently enabled in the queried scope.
    pub enabled: bool,
}

/// External overlay service consumed by the reconciliation engine.
///
/// Implementations are expected to serialize conflicting writes for a
/// given [`UserScope`]; the engine holds no state of its own and provides
/// no such guarantee. The service is also expected to enforce exclusivity
/// among overlays of the same category (enabling one accent implicitly
/// disables the others).
pub trait OverlayRegistry {
    /// Enables or disables a single overlay for the given scope.
    fn set_enabled(
        &self,
        overlay: &OverlayId,
        enable: bool,
        scope: UserScope,
    ) -> Result<(), RegistryError>;

    /// Returns the current state of an overlay, or `Ok(None)` if the
    /// overlay is unknown or unregistered.
    ///
    /// Callers in this crate treat `Ok(None)` identically to "not
    /// enabled".
    fn overlay_info(
        &self,
        overlay: &OverlayId,
        scope: UserScope,
    ) -> Result<Option<OverlayInfo>, RegistryError>;
}

impl<T: OverlayRegistry + ?Sized> OverlayRegistry for &T {
    fn set_enabled(
        &self,
        overlay: &OverlayId,
        enable: bool,
        scope: UserScope,
    ) -> Result<(), RegistryError> {
        (**self).set_enabled(overlay, enable, scope)
    }

    fn overlay_info(
        &self,
        overlay: &OverlayId,
        scope: UserScope,
    ) -> Result<Option<OverlayInfo>, RegistryError> {
        (**self).overlay_info(overlay, scope)
    }
}
