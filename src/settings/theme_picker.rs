use std::rc::Rc;

use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, Window, div,
};

use crate::settings::picker_pill;
use crate::theme::ThemeEntry;
use crate::tokens;
use crate::utils::ElementIdExt;

/// Row of bundled themes; the active one is highlighted.
#[derive(IntoElement)]
pub struct ThemePicker {
    id: ElementId,
    themes: Vec<ThemeEntry>,
    active_theme_id: SharedString,
    on_select: Option<Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
}

impl ThemePicker {
    pub fn new(id: impl Into<ElementId>, themes: Vec<ThemeEntry>) -> Self {
        Self {
            id: id.into(),
            themes,
            active_theme_id: SharedString::default(),
            on_select: None,
        }
    }

    pub fn active_theme_id(mut self, id: impl Into<SharedString>) -> Self {
        self.active_theme_id = id.into();
        self
    }

    /// Called with the picked theme id.
    pub fn on_select(
        mut self,
        on_select: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_select = Some(Rc::new(on_select));
        self
    }
}

impl RenderOnce for ThemePicker {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        div()
            .flex()
            .flex_wrap()
            .gap(tokens::spacing::xs())
            .children(self.themes.iter().map(|entry| {
                let active = entry.id.as_str() == self.active_theme_id.as_ref();
                let pill = picker_pill(
                    self.id.with_suffix(entry.id.clone()),
                    SharedString::from(entry.name.clone()),
                    active,
                    cx,
                );

                let on_select = self.on_select.clone();
                let theme_id = SharedString::from(entry.id.clone());
                pill.on_mouse_down(gpui::MouseButton::Left, move |_event, window, cx| {
                    if let Some(on_select) = &on_select {
                        (on_select)(&theme_id, window, cx);
                    }
                })
            }))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::bundled_themes;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_theme_picker_builder(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let picker = ThemePicker::new("theme-picker", bundled_themes())
                .active_theme_id("catppuccin")
                .on_select(|_id, _window, _cx| {});

            assert_eq!(picker.themes.len(), 6);
            assert_eq!(picker.active_theme_id.as_ref(), "catppuccin");
            assert!(picker.on_select.is_some());
        });
    }
}
