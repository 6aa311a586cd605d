use std::rc::Rc;

use gpui::{
    App, ClickEvent, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder,
};

use crate::components::Switch;
use crate::page;
use crate::tokens::{self, TokenKind};
use crate::utils::ElementIdExt;

/// Sync card: a toggle with state labels and optional help text.
#[derive(IntoElement)]
pub struct SyncSection {
    id: ElementId,
    enabled: bool,
    title: SharedString,
    help_text: Option<SharedString>,
    enabled_label: SharedString,
    disabled_label: SharedString,
    on_toggle: Option<Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl SyncSection {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            enabled: false,
            title: "Sync".into(),
            help_text: None,
            enabled_label: "Sync enabled".into(),
            disabled_label: "Sync disabled".into(),
            on_toggle: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    pub fn help_text(mut self, help_text: impl Into<SharedString>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn on_toggle(
        mut self,
        on_toggle: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_toggle = Some(Rc::new(on_toggle));
        self
    }
}

impl RenderOnce for SyncSection {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let on_toggle = self.on_toggle.clone();

        page::section(cx)
            .child(page::section_title(self.title.clone(), cx))
            .when_some(self.help_text.clone(), |this, help| {
                this.child(page::help_text(help, cx))
            })
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(tokens::spacing::xs())
                    .child(
                        Switch::new(self.id.with_suffix("switch"))
                            .checked(self.enabled)
                            .on_click(move |event, window, cx| {
                                if let Some(on_toggle) = &on_toggle {
                                    (on_toggle)(event, window, cx);
                                }
                            }),
                    )
                    .child(
                        div()
                            .text_size(tokens::text_size::step_minus1())
                            .text_color(TokenKind::Text.resolve(cx))
                            .child(if self.enabled {
                                self.enabled_label.clone()
                            } else {
                                self.disabled_label.clone()
                            }),
                    ),
            )
    }
}
