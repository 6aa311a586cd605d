use std::rc::Rc;

use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce, Styled, Window,
    div,
};

use crate::settings::picker_pill;
use crate::theme::Appearance;
use crate::tokens;
use crate::utils::ElementIdExt;

const OPTIONS: [(Appearance, &str); 3] = [
    (Appearance::Light, "Light"),
    (Appearance::Dark, "Dark"),
    (Appearance::System, "System"),
];

/// Light / Dark / System selector row.
#[derive(IntoElement)]
pub struct AppearancePicker {
    id: ElementId,
    appearance: Appearance,
    on_change: Option<Rc<dyn Fn(&Appearance, &mut Window, &mut App) + 'static>>,
}

impl AppearancePicker {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            appearance: Appearance::System,
            on_change: None,
        }
    }

    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&Appearance, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl RenderOnce for AppearancePicker {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        div()
            .flex()
            .flex_wrap()
            .gap(tokens::spacing::xs())
            .children(OPTIONS.iter().map(|(value, label)| {
                let active = *value == self.appearance;
                let pill = picker_pill(self.id.with_suffix(*label), (*label).into(), active, cx);

                let on_change = self.on_change.clone();
                let value = *value;
                pill.on_mouse_down(gpui::MouseButton::Left, move |_event, window, cx| {
                    if let Some(on_change) = &on_change {
                        (on_change)(&value, window, cx);
                    }
                })
            }))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_appearance_picker_defaults_to_system(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let picker = AppearancePicker::new("appearance-picker");
            assert_eq!(picker.appearance, Appearance::System);
            assert!(picker.on_change.is_none());
        });
    }

    #[gpui::test]
    fn test_appearance_picker_offers_all_modes(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let modes: Vec<Appearance> = OPTIONS.iter().map(|(value, _)| *value).collect();
            assert_eq!(
                modes,
                vec![Appearance::Light, Appearance::Dark, Appearance::System]
            );
        });
    }
}
