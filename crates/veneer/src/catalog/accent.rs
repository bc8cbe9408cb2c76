//! The accent band.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::registry::OverlayId;

/// One-based position of a hue accent within an [`AccentCatalog`].
///
/// The zero slot of the band is the default accent, which is never
/// toggled; a `HueIndex` therefore cannot be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HueIndex(NonZeroUsize);

impl HueIndex {
    /// Creates a hue index, rejecting zero.
    pub fn new(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Self)
    }

    /// Returns the one-based index.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for HueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a caller wants the accent band to become.
///
/// The legacy integer setting encoded this as bands of magic numbers
/// (0, 1–19, 20, everything else silently ignored);
/// [`from_setting`](Self::from_setting) maps that representation so the
/// undefined bands stay at the boundary instead of leaking into the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentSelection {
    /// No accent: unload the entire band.
    None,
    /// A single hue accent from the catalog.
    Hue(HueIndex),
    /// The context-dependent neutral pair: black on light surfaces,
    /// white on dark ones.
    NeutralBand,
}

impl AccentSelection {
    /// Maps the legacy integer setting to a selection.
    ///
    /// `0` is "no accent", `1..=19` are the hue slots, `20` is the
    /// neutral band. Any other value — including `21`, which names the
    /// white accent directly and was never selectable — returns `None`;
    /// callers are expected to treat that as a no-op.
    pub fn from_setting(setting: u32) -> Option<Self> {
        match setting {
            0 => Some(Self::None),
            n @ 1..=19 => HueIndex::new(n as usize).map(Self::Hue),
            20 => Some(Self::NeutralBand),
            _ => Option::None,
        }
    }
}

/// A named hue accent slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HueAccent {
    /// Human-readable hue name, unique within the catalog.
    pub name: String,
    /// The overlay implementing this hue.
    pub overlay: OverlayId,
}

impl HueAccent {
    /// Creates a hue slot.
    pub fn new(name: impl Into<String>, overlay: impl Into<OverlayId>) -> Self {
        Self {
            name: name.into(),
            overlay: overlay.into(),
        }
    }
}

/// The full accent band: default slot, hue slots, and the neutral pair.
///
/// The default slot is tracked for completeness but never toggled; a full
/// unload leaves nothing in the band enabled rather than re-enabling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentCatalog {
    default: OverlayId,
    hues: Vec<HueAccent>,
    black: OverlayId,
    white: OverlayId,
}

#[derive(Deserialize)]
struct RawAccentCatalog {
    default: OverlayId,
    hues: Vec<HueAccent>,
    black: OverlayId,
    white: OverlayId,
}

impl AccentCatalog {
    /// Creates a catalog, validating that hue names are unique.
    pub fn new(
        default: impl Into<OverlayId>,
        hues: Vec<HueAccent>,
        black: impl Into<OverlayId>,
        white: impl Into<OverlayId>,
    ) -> Result<Self, CatalogError> {
        for (i, hue) in hues.iter().enumerate() {
            if hues[..i].iter().any(|h| h.name == hue.name) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate hue name '{}'",
                    hue.name
                )));
            }
        }
        Ok(Self {
            default: default.into(),
            hues,
            black: black.into(),
            white: white.into(),
        })
    }

    /// The stock accent band: nineteen hues plus the neutral pair.
    pub fn stock() -> Self {
        let hues = [
            ("red", "com.accents.red"),
            ("pink", "com.accents.pink"),
            ("purple", "com.accents.purple"),
            ("deep-purple", "com.accents.deeppurple"),
            ("indigo", "com.accents.indigo"),
            ("blue", "com.accents.blue"),
            ("light-blue", "com.accents.lightblue"),
            ("cyan", "com.accents.cyan"),
            ("teal", "com.accents.teal"),
            ("green", "com.accents.green"),
            ("light-green", "com.accents.lightgreen"),
            ("lime", "com.accents.lime"),
            ("yellow", "com.accents.yellow"),
            ("amber", "com.accents.amber"),
            ("orange", "com.accents.orange"),
            ("deep-orange", "com.accents.deeporange"),
            ("brown", "com.accents.brown"),
            ("grey", "com.accents.grey"),
            ("blue-grey", "com.accents.bluegrey"),
        ]
        .into_iter()
        .map(|(name, overlay)| HueAccent::new(name, overlay))
        .collect();

        Self {
            default: OverlayId::new("default_accent"),
            hues,
            black: OverlayId::new("com.accents.black"),
            white: OverlayId::new("com.accents.white"),
        }
    }

    /// Loads a catalog from YAML content.
    ///
    /// # Example
    ///
    /// ```
    /// use veneer::AccentCatalog;
    ///
    /// let catalog = AccentCatalog::from_yaml(r#"
    /// default: default_accent
    /// hues:
    ///   - { name: red, overlay: com.vendor.accent.red }
    ///   - { name: teal, overlay: com.vendor.accent.teal }
    /// black: com.vendor.accent.black
    /// white: com.vendor.accent.white
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.hues().len(), 2);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: RawAccentCatalog = serde_yaml::from_str(yaml)?;
        Self::new(raw.default, raw.hues, raw.black, raw.white)
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

    /// The default slot. Never toggled by the engine.
    pub fn default_overlay(&self) -> &OverlayId {
        &self.default
    }

    /// All hue slots, in band order.
    pub fn hues(&self) -> &[HueAccent] {
        &self.hues
    }

    /// Looks up a hue slot by its one-based band position.
    pub fn hue(&self, index: HueIndex) -> Option<&OverlayId> {
        self.hues.get(index.get() - 1).map(|h| &h.overlay)
    }

    /// Looks up a hue slot by name.
    pub fn hue_named(&self, name: &str) -> Option<HueIndex> {
        self.hues
            .iter()
            .position(|h| h.name == name)
            .and_then(|i| HueIndex::new(i + 1))
    }

    /// The black half of the neutral pair.
    pub fn black(&self) -> &OverlayId {
        &self.black
    }

    /// The white half of the neutral pair.
    pub fn white(&self) -> &OverlayId {
        &self.white
    }

    /// Every toggleable overlay in the band: hues in order, then black,
    /// then white. The default slot is excluded.
    pub fn toggleable(&self) -> impl Iterator<Item = &OverlayId> {
        self.hues
            .iter()
            .map(|h| &h.overlay)
            .chain([&self.black, &self.white])
    }
}

impl Default for AccentCatalog {
    fn default() -> Self {
        Self::stock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_band_shape() {
        let catalog = AccentCatalog::stock();
        assert_eq!(catalog.hues().len(), 19);
        assert_eq!(catalog.toggleable().count(), 21);
        assert_eq!(catalog.default_overlay().as_str(), "default_accent");
        assert_eq!(catalog.black().as_str(), "com.accents.black");
        assert_eq!(catalog.white().as_str(), "com.accents.white");
    }

    #[test]
    fn hue_lookup_is_one_based() {
        let catalog = AccentCatalog::stock();
        let first = HueIndex::new(1).unwrap();
        assert_eq!(catalog.hue(first).unwrap().as_str(), "com.accents.red");

        let last = HueIndex::new(19).unwrap();
        assert_eq!(catalog.hue(last).unwrap().as_str(), "com.accents.bluegrey");

        let out_of_band = HueIndex::new(20).unwrap();
        assert!(catalog.hue(out_of_band).is_none());
    }

    #[test]
    fn hue_lookup_by_name() {
        let catalog = AccentCatalog::stock();
        let teal = catalog.hue_named("teal").unwrap();
        assert_eq!(teal.get(), 9);
        assert_eq!(catalog.hue(teal).unwrap().as_str(), "com.accents.teal");
        assert!(catalog.hue_named("mauve").is_none());
    }

    #[test]
    fn toggleable_ends_with_neutral_pair() {
        let catalog = AccentCatalog::stock();
        let ids: Vec<&str> = catalog.toggleable().map(OverlayId::as_str).collect();
        assert_eq!(ids[0], "com.accents.red");
        assert_eq!(ids[19], "com.accents.black");
        assert_eq!(ids[20], "com.accents.white");
    }

    #[test]
    fn selection_from_setting_bands() {
        assert_eq!(AccentSelection::from_setting(0), Some(AccentSelection::None));
        assert_eq!(
            AccentSelection::from_setting(1),
            Some(AccentSelection::Hue(HueIndex::new(1).unwrap()))
        );
        assert_eq!(
            AccentSelection::from_setting(19),
            Some(AccentSelection::Hue(HueIndex::new(19).unwrap()))
        );
        assert_eq!(
            AccentSelection::from_setting(20),
            Some(AccentSelection::NeutralBand)
        );
        // 21 names the white accent directly and was never a valid setting.
        assert_eq!(AccentSelection::from_setting(21), None);
        assert_eq!(AccentSelection::from_setting(99), None);
    }

    #[test]
    fn hue_index_rejects_zero() {
        assert!(HueIndex::new(0).is_none());
        assert_eq!(HueIndex::new(3).unwrap().get(), 3);
    }

    #[test]
    fn duplicate_hue_names_rejected() {
        let result = AccentCatalog::new(
            "default_accent",
            vec![
                HueAccent::new("red", "a.red"),
                HueAccent::new("red", "b.red"),
            ],
            "a.black",
            "a.white",
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn from_yaml_parses_band() {
        let catalog = AccentCatalog::from_yaml(
            r#"
            default: default_accent
            hues:
              - { name: red, overlay: com.vendor.accent.red }
            black: com.vendor.accent.black
            white: com.vendor.accent.white
            "#,
        )
        .unwrap();

        assert_eq!(catalog.hues().len(), 1);
        assert_eq!(catalog.toggleable().count(), 3);
    }

    #[test]
    fn from_yaml_invalid_content() {
        assert!(AccentCatalog::from_yaml("hues: [").is_err());
    }
}
