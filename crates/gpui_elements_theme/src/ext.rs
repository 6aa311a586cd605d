use gpui::{App, Global, Rgba};

use crate::color::parse_color;
use crate::root_style::{RootStyleHandle, css_var_name};

impl Global for RootStyleHandle {}

/// Extension trait for reaching the shared root style from GPUI contexts.
///
/// The handle is installed once at startup (dependency injection over an
/// implicit process-wide singleton); components resolve their colors from it
/// by semantic style key.
pub trait ThemeStyleExt {
    /// Installs the shared root style.
    fn set_root_style(&mut self, handle: RootStyleHandle);

    /// The installed root style, or a fresh empty one if none is installed.
    fn root_style(&self) -> RootStyleHandle;

    /// Resolves a style key (`text.muted`) to its applied color, if the
    /// matching custom property is present and parses as a hex color.
    fn theme_color(&self, key: &str) -> Option<Rgba>;

    /// Resolves a style key to its applied color, falling back when the
    /// property is absent or unparseable.
    fn theme_color_or(&self, key: &str, fallback: Rgba) -> Rgba;
}

impl ThemeStyleExt for App {
    fn set_root_style(&mut self, handle: RootStyleHandle) {
        self.set_global(handle);
    }

    fn root_style(&self) -> RootStyleHandle {
        self.try_global::<RootStyleHandle>()
            .cloned()
            .unwrap_or_default()
    }

    fn theme_color(&self, key: &str) -> Option<Rgba> {
        let handle = self.try_global::<RootStyleHandle>()?;
        let value = handle.get(&css_var_name(key))?;
        parse_color(&value)
    }

    fn theme_color_or(&self, key: &str, fallback: Rgba) -> Rgba {
        self.theme_color(key).unwrap_or(fallback)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_set_and_get_root_style(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let handle = RootStyleHandle::new();
            handle.update(|root| root.set_property("--text", "#112233"));
            cx.set_root_style(handle.clone());

            assert_eq!(cx.root_style().get("--text").as_deref(), Some("#112233"));
        });
    }

    #[gpui::test]
    fn test_theme_color_resolves_applied_property(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let handle = RootStyleHandle::new();
            handle.update(|root| root.set_property("--text-muted", "#666666"));
            cx.set_root_style(handle);

            let color = cx.theme_color("text.muted").expect("property should resolve");
            assert!((color.r - 0.4).abs() < 0.01, "expected #666666 red channel");
        });
    }

    #[gpui::test]
    fn test_theme_color_falls_back(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let fallback = Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            };

            // No root style installed at all.
            let color = cx.theme_color_or("text", fallback);
            assert_eq!(color.r, 1.0);

            // Installed, but the value is not a hex color.
            let handle = RootStyleHandle::new();
            handle.update(|root| root.set_property("--text", "not-a-color"));
            cx.set_root_style(handle);
            assert!(cx.theme_color("text").is_none());
        });
    }
}
