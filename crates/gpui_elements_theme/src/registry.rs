use std::sync::LazyLock;

use crate::schema::ThemeFile;

/// A registry entry pairing a stable id with a display name and theme file.
///
/// Entries are unique by `id` within a registry slice and immutable for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEntry {
    pub id: String,
    pub name: String,
    pub file: ThemeFile,
}

macro_rules! generate_bundled_themes {
    ( $( [$path:literal, $id:literal, $name:literal] ),+ $(,)? ) => {
        static BUNDLED: LazyLock<Vec<ThemeEntry>> = LazyLock::new(|| {
            vec![
                $(
                    ThemeEntry {
                        id: $id.into(),
                        name: $name.into(),
                        file: ThemeFile::from_json(include_str!($path)).unwrap(),
                    },
                )+
            ]
        });
    };
}

generate_bundled_themes!(
    ["../themes/bandley.json", "bandley", "Bandley"],
    ["../themes/catppuccin.json", "catppuccin", "Catppuccin"],
    ["../themes/flexoki.json", "flexoki", "Flexoki"],
    ["../themes/github.json", "github", "GitHub"],
    ["../themes/one.json", "one", "One L/D"],
    ["../themes/smooth.json", "smooth", "Smooth"],
);

/// Returns the bundled theme entries, parsed once and cloned per call.
pub fn bundled_themes() -> Vec<ThemeEntry> {
    BUNDLED.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ThemeVariantKind;

    #[test]
    fn test_bundled_themes_parse() {
        let themes = bundled_themes();
        let ids: Vec<&str> = themes.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(
            ids,
            ["bandley", "catppuccin", "flexoki", "github", "one", "smooth"]
        );
    }

    #[test]
    fn test_bundled_ids_unique() {
        let themes = bundled_themes();
        for (index, entry) in themes.iter().enumerate() {
            assert!(
                themes[index + 1..].iter().all(|other| other.id != entry.id),
                "duplicate bundled theme id {}",
                entry.id
            );
        }
    }

    #[test]
    fn test_bundled_themes_have_both_variants() {
        for entry in bundled_themes() {
            assert!(
                entry.file.variant(ThemeVariantKind::Light).is_some(),
                "{} is missing a light variant",
                entry.id
            );
            assert!(
                entry.file.variant(ThemeVariantKind::Dark).is_some(),
                "{} is missing a dark variant",
                entry.id
            );
        }
    }

    #[test]
    fn test_bundled_variants_share_key_set() {
        // Variants of one file are overwritten in place on preference flips,
        // which assumes a stable key set across variants.
        for entry in bundled_themes() {
            let light = entry.file.variant(ThemeVariantKind::Light).unwrap();
            let dark = entry.file.variant(ThemeVariantKind::Dark).unwrap();
            let light_keys: Vec<&String> = light.style.keys().collect();
            let dark_keys: Vec<&String> = dark.style.keys().collect();
            assert_eq!(light_keys, dark_keys, "{} variant key sets differ", entry.id);
        }
    }
}
