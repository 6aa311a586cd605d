use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A theme file in the Zed editor export format.
///
/// The format is kept bit-exact so files exported from the editor can be
/// loaded without modification:
///
/// ```json
/// {
///   "$schema": "https://zed.dev/schema/themes/v0.2.0.json",
///   "name": "Example",
///   "author": "Someone",
///   "themes": [
///     { "name": "Example Light", "appearance": "light", "style": { "text.muted": "#6b6b6b" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFile {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub themes: Vec<ThemeVariant>,
}

impl ThemeFile {
    /// Parses a theme file from its JSON source.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json.as_ref())?)
    }

    /// Returns the first variant tagged with the given appearance.
    ///
    /// A file that has no variant for the requested appearance yields `None`;
    /// callers treat that as "nothing to apply". Duplicate tags are tolerated
    /// and the first match wins.
    pub fn variant(&self, kind: ThemeVariantKind) -> Option<&ThemeVariant> {
        self.themes.iter().find(|theme| theme.appearance == kind)
    }
}

/// One light or dark half of a theme file: a flat style mapping.
///
/// Keys are dotted or underscored semantic names; values are raw
/// CSS-acceptable strings. Ordering carries no meaning but is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeVariant {
    pub name: String,
    pub appearance: ThemeVariantKind,
    pub style: IndexMap<String, String>,
}

/// The light/dark tag on a theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariantKind {
    Light,
    Dark,
}

/// The user-facing appearance mode: a fixed variant or "follow the OS".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    System,
}

impl Appearance {
    /// Resolves this mode to a concrete variant tag, mapping `System`
    /// through the current OS preference.
    pub fn resolve(self, prefers_dark: bool) -> ThemeVariantKind {
        match self {
            Appearance::Light => ThemeVariantKind::Light,
            Appearance::Dark => ThemeVariantKind::Dark,
            Appearance::System => {
                if prefers_dark {
                    ThemeVariantKind::Dark
                } else {
                    ThemeVariantKind::Light
                }
            }
        }
    }
}

/// Errors surfaced by explicit theme parsing entry points.
///
/// Nothing on the manager path raises these; storage and lookup failures
/// there degrade to defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme file: {0}")]
    InvalidThemeFile(#[from] serde_json::Error),
}
