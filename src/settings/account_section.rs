use std::rc::Rc;

use gpui::{
    App, ClickEvent, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder,
};

use crate::components::{Button, ButtonVariant};
use crate::page;
use crate::store::Owner;
use crate::tokens::{self, TokenKind};
use crate::utils::ElementIdExt;

/// Account card: mnemonic reveal, restore and reset actions.
///
/// Restore and reset are delegated; prompting and confirmation live with the
/// caller.
#[derive(IntoElement)]
pub struct AccountSection {
    id: ElementId,
    owner: Option<Owner>,
    title: SharedString,
    show_label: SharedString,
    hide_label: SharedString,
    restore_label: SharedString,
    reset_label: SharedString,
    on_restore: Option<Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    on_reset: Option<Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl AccountSection {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            owner: None,
            title: "Account".into(),
            show_label: "Show Mnemonic".into(),
            hide_label: "Hide Mnemonic".into(),
            restore_label: "Restore Owner".into(),
            reset_label: "Reset Owner".into(),
            on_restore: None,
            on_reset: None,
        }
    }

    pub fn owner(mut self, owner: Option<Owner>) -> Self {
        self.owner = owner;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    pub fn on_restore(
        mut self,
        on_restore: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_restore = Some(Rc::new(on_restore));
        self
    }

    pub fn on_reset(
        mut self,
        on_reset: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_reset = Some(Rc::new(on_reset));
        self
    }
}

impl RenderOnce for AccountSection {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let show_state = window.use_keyed_state(
            self.id.with_suffix("state:show_mnemonic"),
            cx,
            |_window, _cx| false,
        );
        let show_mnemonic = *show_state.read(cx);

        let on_restore = self.on_restore.clone();
        let on_reset = self.on_reset.clone();

        page::section(cx)
            .child(page::section_title(self.title.clone(), cx))
            .child(
                div().child(
                    Button::new(self.id.with_suffix("toggle"))
                        .text(if show_mnemonic {
                            self.hide_label.clone()
                        } else {
                            self.show_label.clone()
                        })
                        .on_click(move |_event, _window, cx| {
                            show_state.update(cx, |show, _cx| *show = !*show);
                            cx.notify(show_state.entity_id());
                        }),
                ),
            )
            .when_some(
                self.owner.as_ref().filter(|_| show_mnemonic).cloned(),
                |this, owner| {
                    this.child(
                        div()
                            .text_size(tokens::text_size::step_minus1())
                            .text_color(TokenKind::TextMuted.resolve(cx))
                            .child(SharedString::from(owner.mnemonic)),
                    )
                },
            )
            .child(
                div().child(
                    Button::new(self.id.with_suffix("restore"))
                        .text(self.restore_label.clone())
                        .on_click(move |event, window, cx| {
                            if let Some(on_restore) = &on_restore {
                                (on_restore)(event, window, cx);
                            }
                        }),
                ),
            )
            .child(
                div().child(
                    Button::new(self.id.with_suffix("reset"))
                        .text(self.reset_label.clone())
                        .variant(ButtonVariant::Destructive)
                        .on_click(move |event, window, cx| {
                            if let Some(on_reset) = &on_reset {
                                (on_reset)(event, window, cx);
                            }
                        }),
                ),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_account_section_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let section = AccountSection::new("account");
            assert_eq!(section.title.as_ref(), "Account");
            assert_eq!(section.show_label.as_ref(), "Show Mnemonic");
            assert!(section.owner.is_none());
        });
    }

    #[gpui::test]
    fn test_account_section_callbacks(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let section = AccountSection::new("account")
                .owner(Some(Owner {
                    mnemonic: "abandon ability able".into(),
                }))
                .on_restore(|_event, _window, _cx| {})
                .on_reset(|_event, _window, _cx| {});

            assert!(section.owner.is_some());
            assert!(section.on_restore.is_some());
            assert!(section.on_reset.is_some());
        });
    }
}
