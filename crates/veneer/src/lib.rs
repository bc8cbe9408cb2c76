//! Veneer - theme overlay reconciliation.
//!
//! Veneer decides which set of mutually-exclusive visual overlays (accent
//! color, dark variant, black variant) should be active for a user, and
//! issues the enable/disable calls through an external overlay service.
//! The service itself — installation, persistence, IPC — is out of scope;
//! it appears only as the [`OverlayRegistry`] trait.
//!
//! The interesting part is the reconciliation: a requested change in one
//! dimension produces the complete consistent target across all three:
//!
//! - **Mutual exclusion**: the dark and black theme sets are never both
//!   active; entering one force-disables the other.
//! - **Legacy cleanup**: the stock dark overlay is force-disabled whenever
//!   either set becomes active.
//! - **Neutral accent correction**: the black/white accent pair follows
//!   the active mode — white on dark surfaces, black on light ones — and
//!   is re-checked after every package of a theme set change.
//!
//! All of it is best-effort: failures are collected per package in a
//! [`ToggleReport`] and logged, never propagated, and reads fail open to
//! "not enabled".
//!
//! # Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::collections::HashMap;
//!
//! use veneer::{
//!     AccentSelection, OverlayId, OverlayInfo, OverlayRegistry, Reconciler, RegistryError,
//!     ThemeModeKind, UserScope,
//! };
//!
//! // Any overlay service works; here is a tiny in-memory one.
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
//!
//! let service = Service::default();
//! let themes = Reconciler::new(&service);
//! let scope = UserScope::new(0);
//!
//! // Ask for black mode: the dark set is force-disabled, the black set enabled.
//! let report = themes.set_light_dark_theme(scope, true, ThemeModeKind::Black);
//! assert!(report.fully_applied());
//! assert!(themes.is_using_black_theme(scope));
//! assert!(!themes.is_using_dark_theme(scope));
//!
//! // The neutral accent resolves against the active mode: white on dark surfaces.
//! themes.update_accents(scope, AccentSelection::NeutralBand);
//! assert!(themes.is_using_white_accent(scope));
//!
//! // Pure advisory predicate: would switching to dark change anything?
//! assert!(themes.should_change_dark_theme(scope, true, ThemeModeKind::Dark));
//! ```
//!
//! # Operations
//!
//! | Operation | Kind | Behavior |
//! |-----------|------|----------|
//! | [`Reconciler::update_accents`] | write | apply an [`AccentSelection`] |
//! | [`Reconciler::unload_accents`] | write | disable the whole accent band |
//! | [`Reconciler::set_light_dark_theme`] | write | enter/leave a theme mode |
//! | [`Reconciler::correct_neutral_accent`] | write | re-align the black/white pair |
//! | [`Reconciler::is_using_dark_theme`] | read | dark set active? |
//! | [`Reconciler::is_using_black_theme`] | read | black set active? |
//! | [`Reconciler::is_using_darker_themes`] | read | either set active? |
//! | [`Reconciler::is_using_white_accent`] | read | white accent enabled? |
//! | [`Reconciler::should_change_dark_theme`] | read | would a mode change change anything? |

mod catalog;
mod error;
mod mode;
mod reconciler;
mod registry;
mod report;

pub use catalog::{
    AccentCatalog, AccentSelection, HueAccent, HueIndex, ThemeCatalog, ThemeVariant,
    ThemedSubsystem,
};
pub use error::{CatalogError, RegistryError};
pub use mode::ThemeModeKind;
pub use reconciler::Reconciler;
pub use registry::{OverlayId, OverlayInfo, OverlayRegistry, UserScope};
pub use report::{ToggleAction, ToggleOutcome, ToggleReport};
