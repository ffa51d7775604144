//! Switching between the background themes.

use flurry_config::{PreferenceStore, THEME_KEY, load_theme, save_theme};
use flurry_core::{Effect, StatusIcon, Theme};
use tracing::{debug, info, warn};

/// The switchable effects, either of which may be missing.
#[derive(Default)]
pub struct Effects<'a> {
    pub snow: Option<&'a mut dyn Effect>,
    pub liquid: Option<&'a mut dyn Effect>,
}

impl<'a> Effects<'a> {
    fn slot(&mut self, theme: Theme) -> Option<&mut (dyn Effect + 'a)> {
        match theme {
            Theme::Off => None,
            Theme::Snow => self.snow.as_deref_mut(),
            Theme::Liquid => self.liquid.as_deref_mut(),
        }
    }
}

/// Keeps exactly one theme active and remembers it across runs.
pub struct ThemeCoordinator {
    current: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemeCoordinator {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self {
            current: Theme::Off,
            store,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn icon(&self) -> StatusIcon {
        self.current.icon()
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn PreferenceStore {
        self.store.as_mut()
    }

    /// Whether a theme has ever been saved.
    pub fn has_stored_theme(&self) -> bool {
        matches!(self.store.get(THEME_KEY), Ok(Some(_)))
    }

    /// Apply the saved theme at startup.
    ///
    /// With reduced motion the effects stay off but the icon still reflects
    /// the saved theme.
    pub fn restore(&mut self, reduced_motion: bool, effects: &mut Effects<'_>) -> Theme {
        let theme = load_theme(self.store.as_ref());
        if reduced_motion {
            info!(%theme, "reduced motion requested, not starting effects");
            self.current = theme;
            return theme;
        }
        self.apply_theme(theme, effects)
    }

    /// Turn every effect off, turn `target` on, and save it.
    pub fn apply_theme(&mut self, target: Theme, effects: &mut Effects<'_>) -> Theme {
        self.disable_all(effects);

        if target.is_animated() {
            match effects.slot(target) {
                Some(effect) => {
                    if !effect.enable() {
                        warn!(effect = effect.name(), "effect refused to start");
                    }
                }
                None => debug!(%target, "no effect available for theme"),
            }
        }

        self.current = target;
        save_theme(self.store.as_mut(), target);
        info!(theme = %target, "theme applied");
        target
    }

    /// Alias of [`apply_theme`](Self::apply_theme).
    pub fn set_theme(&mut self, target: Theme, effects: &mut Effects<'_>) -> Theme {
        self.apply_theme(target, effects)
    }

    /// Advance to the next theme in the cycle.
    pub fn cycle(&mut self, effects: &mut Effects<'_>) -> Theme {
        self.apply_theme(self.current.next(), effects)
    }

    pub fn disable_all(&self, effects: &mut Effects<'_>) {
        for theme in [Theme::Snow, Theme::Liquid] {
            match effects.slot(theme) {
                Some(effect) => effect.disable(),
                None => debug!(%theme, "effect not present, skipping disable"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flurry_config::{FilePreferenceStore, MemoryPreferenceStore};

    #[derive(Default)]
    struct FakeEffect {
        enabled: bool,
        refuse: bool,
        disables: usize,
    }

    impl Effect for FakeEffect {
        fn name(&self) -> &'static str {
            "fake"
        }
        fn enable(&mut self) -> bool {
            if self.refuse {
                return false;
            }
            self.enabled = true;
            true
        }
        fn disable(&mut self) {
            self.enabled = false;
            self.disables += 1;
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    fn coordinator() -> ThemeCoordinator {
        ThemeCoordinator::new(Box::new(MemoryPreferenceStore::new()))
    }

    #[test]
    fn test_snow_then_liquid_leaves_only_liquid() {
        let mut theme = coordinator();
        let mut snow = FakeEffect::default();
        let mut liquid = FakeEffect::default();

        {
            let mut effects = Effects {
                snow: Some(&mut snow),
                liquid: Some(&mut liquid),
            };
            theme.apply_theme(Theme::Snow, &mut effects);
            theme.apply_theme(Theme::Liquid, &mut effects);
        }

        assert!(!snow.enabled);
        assert!(liquid.enabled);
        assert_eq!(theme.current(), Theme::Liquid);
        assert_eq!(theme.icon(), StatusIcon::Droplet);
    }

    #[test]
    fn test_cycle_order_and_persistence() {
        let mut theme = coordinator();
        let mut snow = FakeEffect::default();
        let mut liquid = FakeEffect::default();
        let mut effects = Effects {
            snow: Some(&mut snow),
            liquid: Some(&mut liquid),
        };

        assert_eq!(theme.cycle(&mut effects), Theme::Snow);
        assert_eq!(theme.store.get(THEME_KEY).unwrap().as_deref(), Some("snow"));
        assert_eq!(theme.cycle(&mut effects), Theme::Liquid);
        assert_eq!(theme.cycle(&mut effects), Theme::Off);
        assert_eq!(theme.store.get(THEME_KEY).unwrap().as_deref(), Some("none"));
        assert_eq!(theme.icon(), StatusIcon::Sun);
    }

    #[test]
    fn test_off_disables_everything() {
        let mut theme = coordinator();
        let mut snow = FakeEffect {
            enabled: true,
            ..FakeEffect::default()
        };
        let mut liquid = FakeEffect {
            enabled: true,
            ..FakeEffect::default()
        };
        let mut effects = Effects {
            snow: Some(&mut snow),
            liquid: Some(&mut liquid),
        };
        theme.set_theme(Theme::Off, &mut effects);
        drop(effects);
        assert!(!snow.enabled && !liquid.enabled);
    }

    #[test]
    fn test_missing_effects_are_skipped() {
        let mut theme = coordinator();
        let mut effects = Effects::default();
        assert_eq!(theme.apply_theme(Theme::Liquid, &mut effects), Theme::Liquid);
        assert_eq!(theme.icon(), StatusIcon::Droplet);
        theme.disable_all(&mut effects);
    }

    #[test]
    fn test_refused_enable_keeps_theme() {
        let mut theme = coordinator();
        let mut liquid = FakeEffect {
            refuse: true,
            ..FakeEffect::default()
        };
        let mut effects = Effects {
            snow: None,
            liquid: Some(&mut liquid),
        };
        assert_eq!(theme.apply_theme(Theme::Liquid, &mut effects), Theme::Liquid);
        drop(effects);
        assert!(!liquid.enabled);
        assert_eq!(liquid.disables, 1);
    }

    #[test]
    fn test_restore_reads_saved_theme() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "snow").unwrap();
        let mut theme = ThemeCoordinator::new(Box::new(store));
        assert!(theme.has_stored_theme());

        let mut snow = FakeEffect::default();
        let mut effects = Effects {
            snow: Some(&mut snow),
            liquid: None,
        };
        assert_eq!(theme.restore(false, &mut effects), Theme::Snow);
        drop(effects);
        assert!(snow.enabled);
    }

    #[test]
    fn test_restore_with_reduced_motion_only_sets_icon() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "liquid").unwrap();
        let mut theme = ThemeCoordinator::new(Box::new(store));

        let mut liquid = FakeEffect::default();
        let mut effects = Effects {
            snow: None,
            liquid: Some(&mut liquid),
        };
        assert_eq!(theme.restore(true, &mut effects), Theme::Liquid);
        drop(effects);
        assert!(!liquid.enabled);
        assert_eq!(theme.icon(), StatusIcon::Droplet);
    }

    #[test]
    fn test_restore_invalid_or_missing_is_off() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "aurora").unwrap();
        let mut theme = ThemeCoordinator::new(Box::new(store));
        assert_eq!(theme.restore(false, &mut Effects::default()), Theme::Off);

        let mut theme = coordinator();
        assert!(!theme.has_stored_theme());
        assert_eq!(theme.restore(false, &mut Effects::default()), Theme::Off);
    }

    #[test]
    fn test_unavailable_storage_does_not_break_switching() {
        let mut theme = ThemeCoordinator::new(Box::new(MemoryPreferenceStore::unavailable()));
        let mut snow = FakeEffect::default();
        let mut effects = Effects {
            snow: Some(&mut snow),
            liquid: None,
        };
        assert_eq!(theme.restore(false, &mut effects), Theme::Off);
        assert_eq!(theme.cycle(&mut effects), Theme::Snow);
        drop(effects);
        assert!(snow.enabled);
    }

    #[test]
    fn test_theme_survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut first = ThemeCoordinator::new(Box::new(FilePreferenceStore::new(&path)));
        first.apply_theme(Theme::Liquid, &mut Effects::default());

        let mut second = ThemeCoordinator::new(Box::new(FilePreferenceStore::new(&path)));
        assert_eq!(second.restore(true, &mut Effects::default()), Theme::Liquid);
    }
}
