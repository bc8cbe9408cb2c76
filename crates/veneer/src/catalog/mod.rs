//! Overlay catalogs.
//!
//! Catalogs name the overlays the reconciliation engine is allowed to
//! touch. They are static data: the engine never installs, registers, or
//! discovers overlays, it only toggles the ids a catalog lists.
//!
//! Two catalogs exist:
//!
//! - [`AccentCatalog`] — the accent band: one default slot, an ordered
//!   list of named hue accents, and the neutral black/white pair.
//! - [`ThemeCatalog`] — the theme mode sets: for each themed subsystem,
//!   the dark and black overlay that cover it, plus the legacy stock dark
//!   overlay that must stay disabled while either set is active.
//!
//! Both ship a stock definition and can be loaded from YAML for systems
//! with a different overlay population:
//!
//! ```yaml
//! subsystems:
//!   - { name: system, dark: com.vendor.system.dark, black: com.vendor.system.black }
//! stock_dark: com.vendor.legacy.dark
//! ```

mod accent;
mod theme;

pub use accent::{AccentCatalog, AccentSelection, HueAccent, HueIndex};
pub use theme::{ThemeCatalog, ThemeVariant, ThemedSubsystem};
