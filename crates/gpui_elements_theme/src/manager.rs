use std::rc::Rc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::preference::SystemPreference;
use crate::registry::ThemeEntry;
use crate::root_style::{
    AppliedTheme, RootStyleHandle, apply_theme_style, apply_theme_with_appearance,
};
use crate::schema::{Appearance, ThemeFile, ThemeVariantKind};
use crate::storage::KeyValueStore;

/// Selection id reserved for a caller-provided theme file.
pub const CUSTOM_THEME_ID: &str = "custom";

/// Fixed configuration for a [`ThemeManager`].
#[derive(Debug, Clone)]
pub struct ThemeManagerConfig {
    /// Storage key the selection record is persisted under.
    pub storage_key: String,
    /// Theme id used when storage is empty or unreadable.
    pub default_theme_id: String,
    /// Registry the selection resolves against.
    pub bundled_themes: Vec<ThemeEntry>,
}

/// The persisted selection record.
///
/// Field names are bit-exact with the JSON other implementations of this
/// format write: `{"themeId": ..., "custom": ..., "appearance": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedSelection {
    pub theme_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<ThemeFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
}

/// Persisted theme selection plus application, behind injected storage.
///
/// The manager holds no mutable state of its own — every read goes to the
/// store, every transition is an atomic read-merge-write of the record, so
/// reads are always consistent with the last completed write. Construct one
/// per storage namespace; tests construct fresh instances over a
/// [`MemoryStore`](crate::MemoryStore).
pub struct ThemeManager {
    config: ThemeManagerConfig,
    store: Rc<dyn KeyValueStore>,
    root: RootStyleHandle,
    preference: SystemPreference,
}

impl ThemeManager {
    pub fn new(
        config: ThemeManagerConfig,
        store: Rc<dyn KeyValueStore>,
        root: RootStyleHandle,
        preference: SystemPreference,
    ) -> Self {
        Self {
            config,
            store,
            root,
            preference,
        }
    }

    pub fn config(&self) -> &ThemeManagerConfig {
        &self.config
    }

    pub fn root_style(&self) -> &RootStyleHandle {
        &self.root
    }

    pub fn preference(&self) -> &SystemPreference {
        &self.preference
    }

    fn saved(&self) -> SavedSelection {
        if let Some(raw) = self.store.get(&self.config.storage_key) {
            match serde_json::from_str(&raw) {
                Ok(saved) => return saved,
                Err(err) => debug!("ignoring malformed theme selection: {err}"),
            }
        }
        SavedSelection {
            theme_id: self.config.default_theme_id.clone(),
            custom: None,
            appearance: None,
        }
    }

    fn persist(&self, saved: &SavedSelection) {
        match serde_json::to_string(saved) {
            Ok(raw) => self.store.set(&self.config.storage_key, &raw),
            Err(err) => warn!("failed to serialize theme selection: {err}"),
        }
    }

    fn resolve_file(&self, saved: &SavedSelection) -> Option<ThemeFile> {
        if saved.theme_id == CUSTOM_THEME_ID {
            if let Some(custom) = &saved.custom {
                return Some(custom.clone());
            }
        }
        self.config
            .bundled_themes
            .iter()
            .find(|entry| entry.id == saved.theme_id)
            .map(|entry| entry.file.clone())
    }

    /// The persisted theme id, or the configured default when storage is
    /// empty or unparseable. Failure is silent.
    pub fn selected_id(&self) -> String {
        self.saved().theme_id
    }

    /// The persisted custom theme file, if the selection is a custom one.
    pub fn custom_file(&self) -> Option<ThemeFile> {
        self.saved().custom
    }

    /// Persists a theme selection, preserving the appearance setting.
    ///
    /// Selecting [`CUSTOM_THEME_ID`] with a file keeps that file; selecting
    /// anything else discards any previously stored custom file.
    pub fn set_selected(&self, id: &str, custom: Option<ThemeFile>) {
        let existing = self.saved();
        let saved = match custom {
            Some(file) if id == CUSTOM_THEME_ID => SavedSelection {
                theme_id: CUSTOM_THEME_ID.to_string(),
                custom: Some(file),
                appearance: existing.appearance,
            },
            _ => SavedSelection {
                theme_id: id.to_string(),
                custom: None,
                appearance: existing.appearance,
            },
        };
        self.persist(&saved);
    }

    /// The persisted appearance mode, defaulting to [`Appearance::System`].
    pub fn appearance(&self) -> Appearance {
        self.saved().appearance.unwrap_or_default()
    }

    /// Persists the appearance mode, preserving theme id and custom file.
    pub fn set_appearance(&self, appearance: Appearance) {
        let mut saved = self.saved();
        saved.appearance = Some(appearance);
        self.persist(&saved);
    }

    /// Resolves the effective theme file and applies it under the persisted
    /// appearance. A custom file takes precedence over a registry lookup; if
    /// neither resolves, the returned handle is inert.
    pub fn apply_selected(&self) -> AppliedTheme {
        let saved = self.saved();
        match self.resolve_file(&saved) {
            Some(file) => apply_theme_with_appearance(
                &self.root,
                &self.preference,
                &file,
                saved.appearance.unwrap_or_default(),
            ),
            None => AppliedTheme::inert(&self.root),
        }
    }

    /// Applies the light variant of the selected theme, ignoring the stored
    /// appearance and registering no watcher. For surfaces that must never
    /// flip dark, like print or embed previews.
    ///
    /// The returned handle is inert: unlike [`ThemeManager::apply_selected`],
    /// dropping it does not reverse the property writes. That asymmetry is
    /// inherited behavior pending a product decision; do not rely on it.
    pub fn apply_light(&self) -> AppliedTheme {
        let saved = self.saved();
        if let Some(file) = self.resolve_file(&saved) {
            if let Some(light) = file.variant(ThemeVariantKind::Light) {
                apply_theme_style(&self.root, &light.style);
            }
        }
        AppliedTheme::inert(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root_style::COLOR_SCHEME_PROPERTY;
    use crate::schema::ThemeVariant;
    use crate::storage::MemoryStore;
    use indexmap::IndexMap;
    use std::cell::Cell;

    fn style(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn fixture_file(name: &str, light_bg: &str, dark_bg: &str) -> ThemeFile {
        ThemeFile {
            schema: None,
            name: name.into(),
            author: None,
            themes: vec![
                ThemeVariant {
                    name: format!("{name} Light"),
                    appearance: ThemeVariantKind::Light,
                    style: style(&[("background", light_bg), ("text.muted", "#666666")]),
                },
                ThemeVariant {
                    name: format!("{name} Dark"),
                    appearance: ThemeVariantKind::Dark,
                    style: style(&[("background", dark_bg), ("text.muted", "#999999")]),
                },
            ],
        }
    }

    struct Fixture {
        manager: ThemeManager,
        store: Rc<MemoryStore>,
        root: RootStyleHandle,
        prefers_dark: Rc<Cell<bool>>,
        preference: SystemPreference,
    }

    fn fixture() -> Fixture {
        let store = Rc::new(MemoryStore::new());
        let root = RootStyleHandle::new();
        let prefers_dark = Rc::new(Cell::new(false));
        let detector_flag = prefers_dark.clone();
        let preference = SystemPreference::with_detector(move || detector_flag.get());
        let manager = ThemeManager::new(
            ThemeManagerConfig {
                storage_key: "test-theme".into(),
                default_theme_id: "bandley".into(),
                bundled_themes: vec![
                    ThemeEntry {
                        id: "bandley".into(),
                        name: "Bandley".into(),
                        file: fixture_file("Bandley", "#fafafa", "#1d1d1f"),
                    },
                    ThemeEntry {
                        id: "catppuccin".into(),
                        name: "Catppuccin".into(),
                        file: fixture_file("Catppuccin", "#eff1f5", "#1e1e2e"),
                    },
                ],
            },
            store.clone(),
            root.clone(),
            preference.clone(),
        );
        Fixture {
            manager,
            store,
            root,
            prefers_dark,
            preference,
        }
    }

    #[test]
    fn test_defaults_when_storage_empty() {
        let f = fixture();
        assert_eq!(f.manager.selected_id(), "bandley");
        assert_eq!(f.manager.appearance(), Appearance::System);
        assert_eq!(f.manager.custom_file(), None);
    }

    #[test]
    fn test_defaults_when_storage_malformed() {
        let f = fixture();
        f.store.set("test-theme", "{not json");
        assert_eq!(f.manager.selected_id(), "bandley");
        assert_eq!(f.manager.appearance(), Appearance::System);
        assert_eq!(f.manager.custom_file(), None);
    }

    #[test]
    fn test_set_selected_persists_expected_record() {
        let f = fixture();
        f.manager.set_selected("catppuccin", None);
        let raw = f.store.get("test-theme").unwrap();
        assert_eq!(raw, r#"{"themeId":"catppuccin"}"#);
        assert_eq!(f.manager.selected_id(), "catppuccin");
    }

    #[test]
    fn test_custom_file_roundtrip_and_overwrite() {
        let f = fixture();
        let custom = fixture_file("Custom", "#ffffff", "#000000");
        f.manager.set_selected(CUSTOM_THEME_ID, Some(custom.clone()));
        assert_eq!(f.manager.selected_id(), CUSTOM_THEME_ID);
        assert_eq!(f.manager.custom_file(), Some(custom));

        f.manager.set_selected("bandley", None);
        assert_eq!(f.manager.custom_file(), None);
    }

    #[test]
    fn test_custom_id_without_file_behaves_like_plain_id() {
        let f = fixture();
        f.manager.set_selected(CUSTOM_THEME_ID, None);
        assert_eq!(f.manager.selected_id(), CUSTOM_THEME_ID);
        assert_eq!(f.manager.custom_file(), None);
        // Nothing resolves, so applying yields an inert handle.
        let applied = f.manager.apply_selected();
        assert!(!applied.is_watching());
        assert!(f.root.read(|root| root.is_empty()));
    }

    #[test]
    fn test_selection_and_appearance_merge_independently() {
        let f = fixture();
        f.manager.set_appearance(Appearance::Dark);
        f.manager.set_selected("catppuccin", None);
        assert_eq!(f.manager.appearance(), Appearance::Dark);

        f.manager.set_appearance(Appearance::Light);
        assert_eq!(f.manager.selected_id(), "catppuccin");

        let custom = fixture_file("Custom", "#ffffff", "#000000");
        f.manager.set_selected(CUSTOM_THEME_ID, Some(custom.clone()));
        assert_eq!(f.manager.appearance(), Appearance::Light);
        f.manager.set_appearance(Appearance::System);
        assert_eq!(f.manager.custom_file(), Some(custom));
    }

    #[test]
    fn test_apply_selected_follows_system_preference() {
        let f = fixture();
        let applied = f.manager.apply_selected();
        assert_eq!(f.root.get("--background").as_deref(), Some("#fafafa"));
        assert_eq!(
            f.root.get(COLOR_SCHEME_PROPERTY).as_deref(),
            Some("light dark")
        );
        assert!(applied.is_watching());

        // A later OS flip re-applies the opposite variant without a new
        // apply_selected call.
        f.prefers_dark.set(true);
        f.preference.poll();
        assert_eq!(f.root.get("--background").as_deref(), Some("#1d1d1f"));
    }

    #[test]
    fn test_apply_selected_forced_dark_has_no_subscription() {
        let f = fixture();
        f.manager.set_appearance(Appearance::Dark);
        let applied = f.manager.apply_selected();
        assert_eq!(f.root.get(COLOR_SCHEME_PROPERTY).as_deref(), Some("dark"));
        assert!(!applied.is_watching());

        f.prefers_dark.set(true);
        f.preference.poll();
        f.prefers_dark.set(false);
        f.preference.poll();
        assert_eq!(f.root.get("--background").as_deref(), Some("#1d1d1f"));
    }

    #[test]
    fn test_apply_selected_light_variant_writes_exact_values() {
        let f = fixture();
        f.manager.set_selected("catppuccin", None);
        f.manager.set_appearance(Appearance::Light);
        let _applied = f.manager.apply_selected();

        let light = f.manager.config().bundled_themes[1]
            .file
            .variant(ThemeVariantKind::Light)
            .unwrap()
            .style
            .clone();
        for (key, value) in &light {
            assert_eq!(
                f.root.get(&crate::css_var_name(key)).as_deref(),
                Some(value.as_str()),
                "property for {key} should carry the exact themed value"
            );
        }
    }

    #[test]
    fn test_bundled_catppuccin_light_scenario() {
        let store = Rc::new(MemoryStore::new());
        let root = RootStyleHandle::new();
        let preference = SystemPreference::with_detector(|| true);
        let manager = ThemeManager::new(
            ThemeManagerConfig {
                storage_key: "test-theme".into(),
                default_theme_id: "bandley".into(),
                bundled_themes: crate::bundled_themes(),
            },
            store,
            root.clone(),
            preference,
        );

        manager.set_selected("catppuccin", None);
        manager.set_appearance(Appearance::Light);
        let _applied = manager.apply_selected();

        let entry = crate::bundled_themes()
            .into_iter()
            .find(|entry| entry.id == "catppuccin")
            .unwrap();
        let light = entry.file.variant(ThemeVariantKind::Light).unwrap();
        assert!(!light.style.is_empty());
        for (key, value) in &light.style {
            assert_eq!(
                root.get(&crate::css_var_name(key)).as_deref(),
                Some(value.as_str()),
                "{key} should be applied verbatim"
            );
        }
    }

    #[test]
    fn test_apply_selected_unknown_id_is_inert() {
        let f = fixture();
        f.manager.set_selected("does-not-exist", None);
        let applied = f.manager.apply_selected();
        assert!(f.root.read(|root| root.is_empty()));
        drop(applied);
        assert!(f.root.read(|root| root.is_empty()));
    }

    #[test]
    fn test_apply_selected_cleanup_restores_root() {
        let f = fixture();
        let before: Vec<(String, String)> = f.root.read(|root| {
            root.properties()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        });
        let applied = f.manager.apply_selected();
        drop(applied);
        let after: Vec<(String, String)> = f.root.read(|root| {
            root.properties()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_apply_light_forces_light_and_is_inert() {
        let f = fixture();
        f.manager.set_appearance(Appearance::Dark);
        let applied = f.manager.apply_light();
        assert_eq!(f.root.get("--background").as_deref(), Some("#fafafa"));
        assert!(!applied.is_watching());
        assert_eq!(f.preference.listener_count(), 0);

        // Inherited asymmetry: dropping the handle leaves the writes behind.
        drop(applied);
        assert_eq!(f.root.get("--background").as_deref(), Some("#fafafa"));
    }

    #[test]
    fn test_change_event_sees_selection_from_apply_time() {
        let f = fixture();
        let _applied = f.manager.apply_selected();
        // A selection change between apply and the flip is not reflected
        // until the next apply_selected.
        f.manager.set_selected("catppuccin", None);
        f.prefers_dark.set(true);
        f.preference.poll();
        assert_eq!(f.root.get("--background").as_deref(), Some("#1d1d1f"));
    }

    #[test]
    fn test_saved_selection_record_shape() {
        let saved = SavedSelection {
            theme_id: "custom".into(),
            custom: None,
            appearance: Some(Appearance::Dark),
        };
        assert_eq!(
            serde_json::to_string(&saved).unwrap(),
            r#"{"themeId":"custom","appearance":"dark"}"#
        );
    }
}
