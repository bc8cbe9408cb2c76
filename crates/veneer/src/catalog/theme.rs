//! The theme mode sets.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::registry::OverlayId;

/// The two darker theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeVariant {
    /// The dark theme set.
    Dark,
    /// The black (AMOLED) theme set.
    Black,
}

impl ThemeVariant {
    /// Returns the overlay covering a subsystem in this variant.
    pub fn overlay_of(self, subsystem: &ThemedSubsystem) -> &OverlayId {
        match self {
            Self::Dark => &subsystem.dark,
            Self::Black => &subsystem.black,
        }
    }

    /// Returns the display name of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One themed subsystem and the overlay pair that covers it.
///
/// A theme mode spans several independently-enabled overlays, one per
/// subsystem; pairing each subsystem with both of its variants keeps the
/// invariant "at most one of {dark, black} per subsystem" visible in the
/// data instead of being implied by parallel arrays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemedSubsystem {
    /// Subsystem name, unique within the catalog.
    pub name: String,
    /// The dark variant overlay.
    pub dark: OverlayId,
    /// The black variant overlay.
    pub black: OverlayId,
}

impl ThemedSubsystem {
    /// Creates a subsystem entry.
    pub fn new(
        name: impl Into<String>,
        dark: impl Into<OverlayId>,
        black: impl Into<OverlayId>,
    ) -> Self {
        Self {
            name: name.into(),
            dark: dark.into(),
            black: black.into(),
        }
    }
}

/// The theme mode sets plus the legacy stock dark overlay.
///
/// The first subsystem is the representative: the classifiers consult only
/// its overlays, relying on the reconciler to keep the rest of the set in
/// step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    subsystems: Vec<ThemedSubsystem>,
    stock_dark: OverlayId,
}

#[derive(Deserialize)]
struct RawThemeCatalog {
    subsystems: Vec<ThemedSubsystem>,
    stock_dark: OverlayId,
}

impl ThemeCatalog {
    /// Creates a catalog, validating that at least one subsystem exists
    /// (the representative) and that subsystem names are unique.
    pub fn new(
        subsystems: Vec<ThemedSubsystem>,
        stock_dark: impl Into<OverlayId>,
    ) -> Result<Self, CatalogError> {
        if subsystems.is_empty() {
            return Err(CatalogError::Invalid(
                "theme catalog needs at least one subsystem".to_string(),
            ));
        }
        for (i, subsystem) in subsystems.iter().enumerate() {
            if subsystems[..i].iter().any(|s| s.name == subsystem.name) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate subsystem name '{}'",
                    subsystem.name
                )));
            }
        }
        Ok(Self {
            subsystems,
            stock_dark: stock_dark.into(),
        })
    }

    /// The stock theme sets: system, settings, device UI, and keyboard.
    pub fn stock() -> Self {
        Self {
            subsystems: vec![
                ThemedSubsystem::new(
                    "system",
                    "com.android.system.theme.dark",
                    "com.android.system.theme.black",
                ),
                ThemedSubsystem::new(
                    "settings",
                    "com.android.settings.theme.dark",
                    "com.android.settings.theme.black",
                ),
                ThemedSubsystem::new(
                    "device-ui",
                    "com.android.dui.theme.dark",
                    "com.android.dui.theme.black",
                ),
                ThemedSubsystem::new(
                    "keyboard",
                    "com.android.gboard.theme.dark",
                    "com.android.gboard.theme.black",
                ),
            ],
            stock_dark: OverlayId::new("com.android.systemui.theme.dark"),
        }
    }

    /// Loads a catalog from YAML content.
    ///
    /// # Example
    ///
    /// ```
    /// use veneer::ThemeCatalog;
    ///
    /// let catalog = ThemeCatalog::from_yaml(r#"
    /// subsystems:
    ///   - { name: system, dark: com.vendor.system.dark, black: com.vendor.system.black }
    ///   - { name: launcher, dark: com.vendor.launcher.dark, black: com.vendor.launcher.black }
    /// stock_dark: com.vendor.legacy.dark
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.subsystems().len(), 2);
    /// assert_eq!(catalog.representative().name, "system");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: RawThemeCatalog = serde_yaml::from_str(yaml)?;
        Self::new(raw.subsystems, raw.stock_dark)
    }

    /// Loads a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// All subsystems, representative first.
    pub fn subsystems(&self) -> &[ThemedSubsystem] {
        &self.subsystems
    }

    /// The subsystem the classifiers consult.
    pub fn representative(&self) -> &ThemedSubsystem {
        &self.subsystems[0]
    }

    /// The legacy stock dark overlay, force-disabled whenever a theme set
    /// becomes active.
    pub fn stock_dark(&self) -> &OverlayId {
        &self.stock_dark
    }

    /// Iterates over one variant's overlays across all subsystems.
    pub fn overlays(&self, variant: ThemeVariant) -> impl Iterator<Item = &OverlayId> + '_ {
        self.subsystems.iter().map(move |s| variant.overlay_of(s))
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::stock()
    }
}
