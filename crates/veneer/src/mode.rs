//! Theme mode selection.

use std::fmt;

/// The kind of theme mode a caller is asking for.
///
/// Settings UIs historically stored this as a bare integer (0 through 3);
/// [`from_setting`](Self::from_setting) bridges that representation so the
/// rest of the crate never handles out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeModeKind {
    /// Let an external heuristic (wallpaper brightness, time of day)
    /// decide; behaves like [`Dark`](Self::Dark) when darkness is
    /// requested.
    AutoDefault,
    /// The default light mode.
    Light,
    /// The dark theme set.
    Dark,
    /// The black (AMOLED) theme set.
    Black,
}

impl ThemeModeKind {
    /// Maps the legacy integer setting to a mode kind.
    ///
    /// Returns `None` for values outside `0..=3`.
    pub fn from_setting(setting: u32) -> Option<Self> {
        match setting {
            0 => Some(Self::AutoDefault),
            1 => Some(Self::Light),
            2 => Some(Self::Dark),
            3 => Some(Self::Black),
            _ => None,
        }
    }

    /// Returns `true` for the modes that put the system in a darker theme.
    pub fn is_darker(self) -> bool {
        matches!(self, Self::Dark | Self::Black)
    }

    /// Returns the display name of this mode kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoDefault => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for ThemeModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
