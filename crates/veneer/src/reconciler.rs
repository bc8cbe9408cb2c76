//! The reconciliation engine.
//!
//! A single requested change — pick an accent, enter dark mode, leave
//! black mode — rarely maps to a single overlay toggle. The engine reads
//! the current enablement through the registry boundary, computes the
//! complete consistent target across all three dimensions (accent, dark,
//! black), and issues the individual enable/disable calls:
//!
//! - the dark and black sets are mutually exclusive: entering one
//!   force-disables the other;
//! - the legacy stock dark overlay is force-disabled whenever either set
//!   becomes active;
//! - the neutral accent pair follows the darker-theme classification
//!   (white on dark surfaces, black on light ones), re-checked after every
//!   package of a set so the correction always observes just-updated
//!   state.
//!
//! Everything is best-effort. A toggle that the service rejects is
//! recorded in the returned [`ToggleReport`] and logged as a warning, and
//! the remaining packages are still attempted; a read failure counts as
//! "not enabled". No failure is ever propagated as an error — a theme
//! switch is cosmetic, and availability wins over strict consistency.

use tracing::warn;

use crate::catalog::{AccentCatalog, AccentSelection, ThemeCatalog, ThemeVariant};
use crate::mode::ThemeModeKind;
use crate::registry::{OverlayId, OverlayRegistry, UserScope};
use crate::report::{ToggleAction, ToggleOutcome, ToggleReport};

/// Decides and applies consistent overlay enablement for one registry.
///
/// The engine holds the catalogs and a registry handle, nothing else; no
/// overlay state is cached across calls. Serializing concurrent callers
/// for the same [`UserScope`] is the caller's responsibility.
#[derive(Debug)]
pub struct Reconciler<R> {
    registry: R,
    accents: AccentCatalog,
    themes: ThemeCatalog,
}

impl<R: OverlayRegistry> Reconciler<R> {
    /// Creates an engine over the stock catalogs.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            accents: AccentCatalog::stock(),
            themes: ThemeCatalog::stock(),
        }
    }

    /// Creates an engine over custom catalogs.
    pub fn with_catalogs(registry: R, accents: AccentCatalog, themes: ThemeCatalog) -> Self {
        Self {
            registry,
            accents,
            themes,
        }
    }

    /// The accent band this engine manages.
    pub fn accents(&self) -> &AccentCatalog {
        &self.accents
    }

    /// The theme sets this engine manages.
    pub fn themes(&self) -> &ThemeCatalog {
        &self.themes
    }

    /// Returns `true` if the dark theme set is active.
    ///
    /// Only the representative subsystem is consulted; the reconciler
    /// keeps the rest of the set in step.
    pub fn is_using_dark_theme(&self, scope: UserScope) -> bool {
        self.is_enabled(scope, &self.themes.representative().dark)
    }

    /// Returns `true` if the black theme set is active.
    pub fn is_using_black_theme(&self, scope: UserScope) -> bool {
        self.is_enabled(scope, &self.themes.representative().black)
    }

    /// Returns `true` if either darker theme set is active.
    pub fn is_using_darker_themes(&self, scope: UserScope) -> bool {
        self.is_using_dark_theme(scope) || self.is_using_black_theme(scope)
    }

    /// Returns `true` if the white half of the neutral accent pair is
    /// enabled.
    pub fn is_using_white_accent(&self, scope: UserScope) -> bool {
        self.is_enabled(scope, self.accents.white())
    }

    /// Applies an accent selection.
    ///
    /// - [`AccentSelection::None`] unloads the entire band.
    /// - [`AccentSelection::Hue`] enables exactly that slot; the registry
    ///   is expected to disable whichever accent was active. A slot the
    ///   catalog does not define is a defined no-op (empty report).
    /// - [`AccentSelection::NeutralBand`] enables white when a darker
    ///   theme is active, black otherwise.
    pub fn update_accents(&self, scope: UserScope, selection: AccentSelection) -> ToggleReport {
        match selection {
            AccentSelection::None => self.unload_accents(scope),
            AccentSelection::Hue(index) => {
                let mut report = ToggleReport::new();
                if let Some(overlay) = self.accents.hue(index) {
                    self.toggle(scope, overlay, ToggleAction::Enable, &mut report);
                }
                report
            }
            AccentSelection::NeutralBand => {
                let mut report = ToggleReport::new();
                let overlay = if self.is_using_darker_themes(scope) {
                    self.accents.white()
                } else {
                    self.accents.black()
                };
                self.toggle(scope, overlay, ToggleAction::Enable, &mut report);
                report
            }
        }
    }

    /// Disables every toggleable accent in the band.
    ///
    /// One disable call per slot, best-effort: a failure is recorded and
    /// the remaining slots are still attempted. The default slot is not
    /// re-enabled; "nothing enabled" is the unloaded state.
    pub fn unload_accents(&self, scope: UserScope) -> ToggleReport {
        let mut report = ToggleReport::new();
        for overlay in self.accents.toggleable() {
            self.toggle(scope, overlay, ToggleAction::Disable, &mut report);
        }
        report
    }

    /// Keeps the neutral accent pair legible against the active theme.
    ///
    /// Darker theme with the black accent enabled: swap to white. Light
    /// theme with the white accent enabled: swap to black. Anything else
    /// is left untouched, which makes consecutive calls idempotent.
    pub fn correct_neutral_accent(&self, scope: UserScope) -> ToggleReport {
        let mut report = ToggleReport::new();
        if self.is_using_darker_themes(scope) {
            if self.is_enabled(scope, self.accents.black()) {
                self.toggle(scope, self.accents.black(), ToggleAction::Disable, &mut report);
                self.toggle(scope, self.accents.white(), ToggleAction::Enable, &mut report);
            }
        } else if self.is_enabled(scope, self.accents.white()) {
            self.toggle(scope, self.accents.white(), ToggleAction::Disable, &mut report);
            self.toggle(scope, self.accents.black(), ToggleAction::Enable, &mut report);
        }
        report
    }

    /// Moves the scope into or out of a darker theme mode.
    ///
    /// - `enable_dark == false` reverts fully to light: both sets are
    ///   disabled, dark first.
    /// - [`ThemeModeKind::AutoDefault`] and [`ThemeModeKind::Dark`]
    ///   force-disable the black set, then enable the dark set.
    /// - [`ThemeModeKind::Black`] force-disables the dark set, then
    ///   enables the black set.
    /// - [`ThemeModeKind::Light`] with `enable_dark == true` is a
    ///   contradictory request and a defined no-op.
    ///
    /// After any call the two sets are never both active.
    pub fn set_light_dark_theme(
        &self,
        scope: UserScope,
        enable_dark: bool,
        kind: ThemeModeKind,
    ) -> ToggleReport {
        let mut report = ToggleReport::new();

        if !enable_dark {
            self.apply_theme_set(scope, ThemeVariant::Dark, false, &mut report);
            self.apply_theme_set(scope, ThemeVariant::Black, false, &mut report);
            return report;
        }

        match kind {
            ThemeModeKind::AutoDefault | ThemeModeKind::Dark => {
                self.apply_theme_set(scope, ThemeVariant::Black, false, &mut report);
                self.apply_theme_set(scope, ThemeVariant::Dark, true, &mut report);
            }
            ThemeModeKind::Black => {
                self.apply_theme_set(scope, ThemeVariant::Dark, false, &mut report);
                self.apply_theme_set(scope, ThemeVariant::Black, true, &mut report);
            }
            // Light while asking for darkness: contradictory, ignored.
            ThemeModeKind::Light => {}
        }
        report
    }

    /// Decides whether a proposed mode change would change anything.
    ///
    /// Pure advisory predicate for callers such as an automatic
    /// wallpaper-driven dark-mode suggestion; no overlay is touched.
    pub fn should_change_dark_theme(
        &self,
        scope: UserScope,
        want_dark: bool,
        kind: ThemeModeKind,
    ) -> bool {
        match kind {
            ThemeModeKind::AutoDefault => {
                if want_dark {
                    !self.is_using_dark_theme(scope)
                } else {
                    self.is_using_darker_themes(scope)
                }
            }
            // Light while asking for darkness is contradictory by
            // construction and never a change.
            ThemeModeKind::Light => !want_dark && self.is_using_darker_themes(scope),
            ThemeModeKind::Dark => want_dark && !self.is_using_dark_theme(scope),
            ThemeModeKind::Black => want_dark && !self.is_using_black_theme(scope),
        }
    }

    /// Toggles one variant across every subsystem of the catalog.
    ///
    /// After each successful package toggle the neutral accent correction
    /// runs, and while enabling, the legacy stock dark overlay is cleaned
    /// up — per package, so the correction observes just-updated state. A
    /// failed toggle skips that package's follow-up but not the remaining
    /// packages.
    fn apply_theme_set(
        &self,
        scope: UserScope,
        variant: ThemeVariant,
        enable: bool,
        report: &mut ToggleReport,
    ) {
        let action = ToggleAction::from_enable(enable);
        for subsystem in self.themes.subsystems() {
            let overlay = variant.overlay_of(subsystem);
            if !self.toggle(scope, overlay, action, report) {
                continue;
            }
            report.merge(self.correct_neutral_accent(scope));
            if enable {
                self.unload_stock_dark(scope, report);
            }
        }
    }

    /// Disables the legacy stock dark overlay if it is still enabled.
    fn unload_stock_dark(&self, scope: UserScope, report: &mut ToggleReport) {
        let stock = self.themes.stock_dark();
        if self.is_enabled(scope, stock) {
            self.toggle(scope, stock, ToggleAction::Disable, report);
        }
    }

    /// Issues one toggle, records its outcome, and returns whether it
    /// succeeded.
    fn toggle(
        &self,
        scope: UserScope,
        overlay: &OverlayId,
        action: ToggleAction,
        report: &mut ToggleReport,
    ) -> bool {
        let result = self.registry.set_enabled(overlay, action.enables(), scope);
        if let Err(err) = &result {
            warn!(
                overlay = %overlay,
                scope = %scope,
                action = action.as_str(),
                error = %err,
                "overlay toggle failed, continuing"
            );
        }
        let succeeded = result.is_ok();
        report.push(ToggleOutcome::new(overlay.clone(), action, result));
        succeeded
    }

    /// Fail-open read: an unknown overlay or a communication failure both
    /// count as "not enabled".
    fn is_enabled(&self, scope: UserScope, overlay: &OverlayId) -> bool {
        match self.registry.overlay_info(overlay, scope) {
            Ok(Some(info)) => info.enabled,
            Ok(None) => false,
            Err(err) => {
                warn!(
                    overlay = %overlay,
                    scope = %scope,
                    error = %err,
                    "overlay state read failed, assuming disabled"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayInfo;
    use crate::RegistryError;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    const SCOPE: UserScope = UserScope::new(0);

    /// Minimal in-module registry: seeded state plus failure switches.
    #[derive(Default)]
    struct StubRegistry {
        state: RefCell<HashMap<OverlayId, bool>>,
        failing_reads: RefCell<HashSet<OverlayId>>,
        failing_writes: RefCell<HashSet<OverlayId>>,
    }

    impl StubRegistry {
        fn seed(&self, overlay: &str, enabled: bool) {
            self.state
                .borrow_mut()
                .insert(OverlayId::new(overlay), enabled);
        }

        fn fail_reads_for(&self, overlay: &str) {
            self.failing_reads
                .borrow_mut()
                .insert(OverlayId::new(overlay));
        }

        fn fail_writes_for(&self, overlay: &str) {
            self.failing_writes
                .borrow_mut()
                .insert(OverlayId::new(overlay));
        }

        fn enabled(&self, overlay: &str) -> bool {
            self.state
                .borrow()
                .get(&OverlayId::new(overlay))
                .copied()
                .unwrap_or(false)
        }
    }

    impl OverlayRegistry for StubRegistry {
        fn set_enabled(
            &self,
            overlay: &OverlayId,
            enable: bool,
            _scope: UserScope,
        ) -> Result<(), RegistryError> {
            if self.failing_writes.borrow().contains(overlay) {
                return Err(RegistryError::new("write rejected"));
            }
            self.state.borrow_mut().insert(overlay.clone(), enable);
            Ok(())
        }

        fn overlay_info(
            &self,
            overlay: &OverlayId,
            _scope: UserScope,
        ) -> Result<Option<OverlayInfo>, RegistryError> {
            if self.failing_reads.borrow().contains(overlay) {
                return Err(RegistryError::new("read rejected"));
            }
            let enabled = self.state.borrow().get(overlay).copied().unwrap_or(false);
            Ok(Some(OverlayInfo { enabled }))
        }
    }

    fn engine(registry: &StubRegistry) -> Reconciler<&StubRegistry> {
        Reconciler::new(registry)
    }

    #[test]
    fn classifier_reads_representative_only() {
        let registry = StubRegistry::default();
        // Enable a non-representative dark package only.
        registry.seed("com.android.settings.theme.dark", true);
        assert!(!engine(&registry).is_using_dark_theme(SCOPE));

        registry.seed("com.android.system.theme.dark", true);
        assert!(engine(&registry).is_using_dark_theme(SCOPE));
    }

    #[test]
    fn classifier_fails_open_on_read_error() {
        let registry = StubRegistry::default();
        registry.seed("com.android.system.theme.dark", true);
        registry.fail_reads_for("com.android.system.theme.dark");
        registry.fail_reads_for("com.android.system.theme.black");

        assert!(!engine(&registry).is_using_darker_themes(SCOPE));
    }

    #[test]
    fn neutral_band_picks_black_on_light() {
        let registry = StubRegistry::default();
        let report = engine(&registry).update_accents(SCOPE, AccentSelection::NeutralBand);
        assert!(report.fully_applied());
        assert!(registry.enabled("com.accents.black"));
        assert!(!registry.enabled("com.accents.white"));
    }

    #[test]
    fn neutral_band_picks_white_on_dark() {
        let registry = StubRegistry::default();
        registry.seed("com.android.system.theme.dark", true);
        engine(&registry).update_accents(SCOPE, AccentSelection::NeutralBand);
        assert!(registry.enabled("com.accents.white"));
        assert!(!registry.enabled("com.accents.black"));
    }

    #[test]
    fn hue_selection_enables_only_that_slot() {
        let registry = StubRegistry::default();
        let teal = AccentSelection::Hue(crate::HueIndex::new(9).unwrap());
        let report = engine(&registry).update_accents(SCOPE, teal);
        assert_eq!(report.len(), 1);
        assert!(registry.enabled("com.accents.teal"));
    }

    #[test]
    fn out_of_band_hue_is_silent_noop() {
        let registry = StubRegistry::default();
        let slot = AccentSelection::Hue(crate::HueIndex::new(25).unwrap());
        let report = engine(&registry).update_accents(SCOPE, slot);
        assert!(report.is_empty());
    }

    #[test]
    fn light_with_dark_request_is_defined_noop() {
        let registry = StubRegistry::default();
        let report = engine(&registry).set_light_dark_theme(SCOPE, true, ThemeModeKind::Light);
        assert!(report.is_empty());
    }

    #[test]
    fn correction_swaps_black_for_white_under_dark() {
        let registry = StubRegistry::default();
        registry.seed("com.android.system.theme.dark", true);
        registry.seed("com.accents.black", true);

        let report = engine(&registry).correct_neutral_accent(SCOPE);
        assert_eq!(report.len(), 2);
        assert!(!registry.enabled("com.accents.black"));
        assert!(registry.enabled("com.accents.white"));
    }

    #[test]
    fn correction_swaps_white_for_black_under_light() {
        let registry = StubRegistry::default();
        registry.seed("com.accents.white", true);

        engine(&registry).correct_neutral_accent(SCOPE);
        assert!(registry.enabled("com.accents.black"));
        assert!(!registry.enabled("com.accents.white"));
    }

    #[test]
    fn correction_is_noop_when_consistent() {
        let registry = StubRegistry::default();
        registry.seed("com.android.system.theme.dark", true);
        registry.seed("com.accents.white", true);

        let report = engine(&registry).correct_neutral_accent(SCOPE);
        assert!(report.is_empty());
    }

    #[test]
    fn failed_set_toggle_skips_followup_but_not_remaining_packages() {
        let registry = StubRegistry::default();
        registry.seed("com.android.systemui.theme.dark", true);
        registry.fail_writes_for("com.android.system.theme.dark");

        let report = engine(&registry).set_light_dark_theme(SCOPE, true, ThemeModeKind::Dark);

        // The representative's toggle failed but the other three dark
        // packages were still applied.
        assert_eq!(report.failures().count(), 1);
        assert!(registry.enabled("com.android.settings.theme.dark"));
        assert!(registry.enabled("com.android.dui.theme.dark"));
        assert!(registry.enabled("com.android.gboard.theme.dark"));
        // Stock cleanup ran for the successful packages.
        assert!(!registry.enabled("com.android.systemui.theme.dark"));
    }

    #[test]
    fn custom_catalogs_drive_the_engine() {
        let registry = StubRegistry::default();
        let accents = AccentCatalog::new(
            "default",
            vec![crate::HueAccent::new("red", "acc.red")],
            "acc.black",
            "acc.white",
        )
        .unwrap();
        let themes = ThemeCatalog::new(
            vec![crate::ThemedSubsystem::new("shell", "shell.dark", "shell.black")],
            "legacy.dark",
        )
        .unwrap();

        let engine = Reconciler::with_catalogs(&registry, accents, themes);
        engine.set_light_dark_theme(SCOPE, true, ThemeModeKind::Black);
        assert!(registry.enabled("shell.black"));
        assert!(!registry.enabled("shell.dark"));
        assert!(engine.is_using_black_theme(SCOPE));
    }
}
