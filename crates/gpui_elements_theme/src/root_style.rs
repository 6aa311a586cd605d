use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::preference::{PreferenceGuard, SystemPreference};
use crate::schema::{Appearance, ThemeFile, ThemeVariantKind};

/// Property name carrying the root-level color-scheme hint.
pub const COLOR_SCHEME_PROPERTY: &str = "color-scheme";

/// The inline style of the application's root surface: the custom-property
/// set themes are applied to, plus the color-scheme hint.
///
/// This is the document-root analog of the web theme stack; stylesheet-side
/// consumers read the properties back by variable name.
#[derive(Debug, Default)]
pub struct RootStyle {
    properties: IndexMap<String, String>,
}

impl RootStyle {
    /// Sets a property, overwriting any prior value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Removes a property. Missing names are ignored.
    pub fn remove_property(&mut self, name: &str) {
        self.properties.shift_remove(name);
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Shared, explicitly-constructed handle to a [`RootStyle`].
///
/// One handle is created at startup and injected into the theme manager and
/// the component layer; tests construct fresh handles per case.
#[derive(Debug, Clone, Default)]
pub struct RootStyleHandle(Rc<RefCell<RootStyle>>);

impl RootStyleHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones a property value out of the root style.
    pub fn get(&self, name: &str) -> Option<String> {
        self.0.borrow().get_property(name).map(str::to_string)
    }

    pub fn read<R>(&self, f: impl FnOnce(&RootStyle) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut RootStyle) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

/// Maps a style key to its custom-property name: `--` plus the key with `.`
/// and `_` replaced by `-`. `text.muted` becomes `--text-muted`.
pub fn css_var_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 2);
    name.push_str("--");
    for ch in key.chars() {
        name.push(match ch {
            '.' | '_' => '-',
            other => other,
        });
    }
    name
}

/// Writes every entry of a style mapping onto the root as a custom property.
///
/// Idempotent: re-applying overwrites prior values without requiring removal
/// first.
pub fn apply_theme_style(root: &RootStyleHandle, style: &IndexMap<String, String>) {
    root.update(|root| {
        for (key, value) in style {
            root.set_property(css_var_name(key), value.clone());
        }
    });
}

/// Removes exactly the properties [`apply_theme_style`] would have written
/// for this mapping, leaving everything else untouched.
pub fn remove_theme_style(root: &RootStyleHandle, style: &IndexMap<String, String>) {
    root.update(|root| {
        for key in style.keys() {
            root.remove_property(&css_var_name(key));
        }
    });
}

/// Literal values of the root-level `color-scheme` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
    LightDark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::LightDark => "light dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle over an applied theme; dropping it reverses the application.
///
/// Cleanup unsubscribes the preference watcher, clears the color-scheme
/// hint, and removes the properties of the variant that was active *at apply
/// time* — not necessarily the variant active after intervening preference
/// flips. That staleness is a documented limitation of the format's apply
/// semantics and is preserved here.
///
/// [`AppliedTheme::detach`] leaks the application intentionally, for themes
/// meant to stay applied for the rest of the process.
pub struct AppliedTheme {
    root: RootStyleHandle,
    style: Option<IndexMap<String, String>>,
    clear_color_scheme: bool,
    watch: Option<PreferenceGuard>,
    detached: bool,
}

impl AppliedTheme {
    /// A handle that owns nothing and cleans up nothing.
    pub fn inert(root: &RootStyleHandle) -> Self {
        Self {
            root: root.clone(),
            style: None,
            clear_color_scheme: false,
            watch: None,
            detached: false,
        }
    }

    /// Whether a preference-change subscription is attached.
    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Consumes the handle without cleaning up.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for AppliedTheme {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        self.watch.take();
        if self.clear_color_scheme {
            self.root.update(|root| root.remove_property(COLOR_SCHEME_PROPERTY));
        }
        if let Some(style) = self.style.take() {
            remove_theme_style(&self.root, &style);
        }
    }
}

/// Applies the variant matching the current OS preference and keeps the root
/// in sync with preference flips until the returned handle is dropped.
///
/// The color-scheme hint is set to `"light dark"`. On each flip the matching
/// variant is re-applied over the previous one — properties are overwritten,
/// not cleared, since variants of one file share a key set.
pub fn apply_theme(
    root: &RootStyleHandle,
    preference: &SystemPreference,
    file: &ThemeFile,
) -> AppliedTheme {
    let kind = if preference.prefers_dark() {
        ThemeVariantKind::Dark
    } else {
        ThemeVariantKind::Light
    };
    let applied = file.variant(kind).map(|variant| variant.style.clone());
    if let Some(style) = &applied {
        apply_theme_style(root, style);
    }
    root.update(|root| {
        root.set_property(COLOR_SCHEME_PROPERTY, ColorScheme::LightDark.as_str())
    });

    let watch = {
        let root = root.clone();
        let file = file.clone();
        preference.subscribe(move |prefers_dark| {
            let kind = if prefers_dark {
                ThemeVariantKind::Dark
            } else {
                ThemeVariantKind::Light
            };
            if let Some(next) = file.variant(kind) {
                apply_theme_style(&root, &next.style);
            }
        })
    };

    AppliedTheme {
        root: root.clone(),
        style: applied,
        clear_color_scheme: true,
        watch: Some(watch),
        detached: false,
    }
}

/// Applies a theme file under an explicit appearance mode.
///
/// `Light` and `Dark` force that variant and register no watcher; the
/// color-scheme hint is the literal mode. `System` delegates to
/// [`apply_theme`]. A file missing the requested variant applies nothing,
/// but the returned handle is still valid (a no-op remover).
pub fn apply_theme_with_appearance(
    root: &RootStyleHandle,
    preference: &SystemPreference,
    file: &ThemeFile,
    appearance: Appearance,
) -> AppliedTheme {
    let (kind, scheme) = match appearance {
        Appearance::System => return apply_theme(root, preference, file),
        Appearance::Light => (ThemeVariantKind::Light, ColorScheme::Light),
        Appearance::Dark => (ThemeVariantKind::Dark, ColorScheme::Dark),
    };

    let applied = file.variant(kind).map(|variant| variant.style.clone());
    if let Some(style) = &applied {
        apply_theme_style(root, style);
    }
    root.update(|root| root.set_property(COLOR_SCHEME_PROPERTY, scheme.as_str()));

    AppliedTheme {
        root: root.clone(),
        style: applied,
        clear_color_scheme: true,
        watch: None,
        detached: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ThemeVariant;
    use std::cell::Cell;

    fn style(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn two_variant_file() -> ThemeFile {
        ThemeFile {
            schema: None,
            name: "Fixture".into(),
            author: None,
            themes: vec![
                ThemeVariant {
                    name: "Fixture Light".into(),
                    appearance: ThemeVariantKind::Light,
                    style: style(&[("background", "#ffffff"), ("text.muted", "#666666")]),
                },
                ThemeVariant {
                    name: "Fixture Dark".into(),
                    appearance: ThemeVariantKind::Dark,
                    style: style(&[("background", "#000000"), ("text.muted", "#999999")]),
                },
            ],
        }
    }

    fn snapshot(root: &RootStyleHandle) -> Vec<(String, String)> {
        root.read(|root| {
            root.properties()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
    }

    #[test]
    fn test_css_var_name_replaces_separators() {
        assert_eq!(css_var_name("text.muted"), "--text-muted");
        assert_eq!(css_var_name("search.match_background"), "--search-match-background");
        assert_eq!(css_var_name("background"), "--background");
    }

    #[test]
    fn test_apply_is_idempotent_overwrite() {
        let root = RootStyleHandle::new();
        apply_theme_style(&root, &style(&[("text", "#111111")]));
        apply_theme_style(&root, &style(&[("text", "#222222")]));
        assert_eq!(root.get("--text").as_deref(), Some("#222222"));
        assert_eq!(root.read(|root| root.len()), 1);
    }

    #[test]
    fn test_remove_only_touches_given_mapping() {
        let root = RootStyleHandle::new();
        root.update(|root| root.set_property("--unrelated", "keep"));
        apply_theme_style(&root, &style(&[("text", "#111111")]));
        remove_theme_style(&root, &style(&[("text", "#111111")]));
        assert_eq!(root.get("--unrelated").as_deref(), Some("keep"));
        assert_eq!(root.get("--text"), None);
    }

    #[test]
    fn test_apply_then_drop_round_trips() {
        let root = RootStyleHandle::new();
        root.update(|root| root.set_property("--preexisting", "value"));
        let before = snapshot(&root);

        let preference = SystemPreference::with_detector(|| false);
        let applied = apply_theme(&root, &preference, &two_variant_file());
        assert_ne!(snapshot(&root), before);

        drop(applied);
        assert_eq!(snapshot(&root), before);
    }

    #[test]
    fn test_forced_appearance_round_trips() {
        let root = RootStyleHandle::new();
        let before = snapshot(&root);
        let preference = SystemPreference::with_detector(|| true);

        let applied = apply_theme_with_appearance(
            &root,
            &preference,
            &two_variant_file(),
            Appearance::Light,
        );
        assert_eq!(root.get("--background").as_deref(), Some("#ffffff"));
        drop(applied);
        assert_eq!(snapshot(&root), before);
    }

    #[test]
    fn test_system_mode_sets_light_dark_hint_and_watches() {
        let root = RootStyleHandle::new();
        let preference = SystemPreference::with_detector(|| true);
        let applied = apply_theme_with_appearance(
            &root,
            &preference,
            &two_variant_file(),
            Appearance::System,
        );
        assert_eq!(root.get(COLOR_SCHEME_PROPERTY).as_deref(), Some("light dark"));
        assert_eq!(root.get("--background").as_deref(), Some("#000000"));
        assert!(applied.is_watching());
        assert_eq!(preference.listener_count(), 1);
    }

    #[test]
    fn test_forced_mode_registers_no_watcher() {
        let root = RootStyleHandle::new();
        let flag = Rc::new(Cell::new(false));
        let detector_flag = flag.clone();
        let preference = SystemPreference::with_detector(move || detector_flag.get());

        let applied = apply_theme_with_appearance(
            &root,
            &preference,
            &two_variant_file(),
            Appearance::Dark,
        );
        assert_eq!(root.get(COLOR_SCHEME_PROPERTY).as_deref(), Some("dark"));
        assert!(!applied.is_watching());
        assert_eq!(preference.listener_count(), 0);

        // Flipping the OS signal must not change applied properties.
        flag.set(true);
        preference.poll();
        flag.set(false);
        preference.poll();
        assert_eq!(root.get("--background").as_deref(), Some("#000000"));
    }

    #[test]
    fn test_preference_flip_reapplies_matching_variant() {
        let root = RootStyleHandle::new();
        let flag = Rc::new(Cell::new(false));
        let detector_flag = flag.clone();
        let preference = SystemPreference::with_detector(move || detector_flag.get());

        let _applied = apply_theme(&root, &preference, &two_variant_file());
        assert_eq!(root.get("--background").as_deref(), Some("#ffffff"));

        flag.set(true);
        preference.poll();
        assert_eq!(root.get("--background").as_deref(), Some("#000000"));
        assert_eq!(root.get("--text-muted").as_deref(), Some("#999999"));
    }

    #[test]
    fn test_drop_unsubscribes_watcher() {
        let root = RootStyleHandle::new();
        let preference = SystemPreference::with_detector(|| false);
        let applied = apply_theme(&root, &preference, &two_variant_file());
        assert_eq!(preference.listener_count(), 1);
        drop(applied);
        assert_eq!(preference.listener_count(), 0);
    }

    #[test]
    fn test_missing_variant_applies_nothing_but_cleanup_stays_valid() {
        let mut file = two_variant_file();
        file.themes.retain(|theme| theme.appearance == ThemeVariantKind::Light);

        let root = RootStyleHandle::new();
        let preference = SystemPreference::with_detector(|| false);
        let applied = apply_theme_with_appearance(&root, &preference, &file, Appearance::Dark);
        assert_eq!(root.get("--background"), None);
        assert_eq!(root.get(COLOR_SCHEME_PROPERTY).as_deref(), Some("dark"));
        drop(applied);
        assert!(root.read(|root| root.is_empty()));
    }

    #[test]
    fn test_detach_leaves_application_in_place() {
        let root = RootStyleHandle::new();
        let preference = SystemPreference::with_detector(|| false);
        let applied = apply_theme(&root, &preference, &two_variant_file());
        applied.detach();
        assert_eq!(root.get("--background").as_deref(), Some("#ffffff"));
        assert_eq!(preference.listener_count(), 1);
    }

    #[test]
    fn test_cleanup_removes_apply_time_variant() {
        // The documented staleness limitation: cleanup removes the keys of
        // the variant captured at apply time, even after flips. With a shared
        // key set the distinction is invisible; with a divergent custom file
        // the stale key survives.
        let mut file = two_variant_file();
        file.themes[1]
            .style
            .insert("dark.only".into(), "#123456".into());

        let root = RootStyleHandle::new();
        let flag = Rc::new(Cell::new(false));
        let detector_flag = flag.clone();
        let preference = SystemPreference::with_detector(move || detector_flag.get());

        let applied = apply_theme(&root, &preference, &file);
        flag.set(true);
        preference.poll();
        assert_eq!(root.get("--dark-only").as_deref(), Some("#123456"));

        drop(applied);
        // Light-variant keys are gone, the dark-only extra leaks.
        assert_eq!(root.get("--background"), None);
        assert_eq!(root.get("--dark-only").as_deref(), Some("#123456"));
    }

    #[test]
    fn test_color_scheme_literals() {
        assert_eq!(ColorScheme::Light.to_string(), "light");
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
        assert_eq!(ColorScheme::LightDark.to_string(), "light dark");
    }
}
