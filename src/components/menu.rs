use std::rc::Rc;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, deferred, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use smallvec::SmallVec;

use crate::tokens::{self, TokenKind};
use crate::utils::ElementIdExt;

/// One navigation target of a [`Menu`].
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: SharedString,
    pub href: SharedString,
}

impl MenuItem {
    pub fn new(label: impl Into<SharedString>, href: impl Into<SharedString>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Hamburger button with a dropdown of navigation items.
///
/// Navigation itself is delegated: activating an item closes the dropdown and
/// calls the injected `on_navigate` handler with the item's href, so the
/// routing provider stays outside this crate. The item matching
/// `current_path` renders inert.
#[derive(IntoElement)]
pub struct Menu {
    id: ElementId,
    items: SmallVec<[MenuItem; 4]>,
    current_path: SharedString,
    on_navigate: Option<Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
}

impl Menu {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            items: SmallVec::new(),
            current_path: SharedString::default(),
            on_navigate: None,
        }
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn current_path(mut self, path: impl Into<SharedString>) -> Self {
        self.current_path = path.into();
        self
    }

    pub fn on_navigate(
        mut self,
        on_navigate: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_navigate = Some(Rc::new(on_navigate));
        self
    }
}

impl RenderOnce for Menu {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let accent_color = TokenKind::TextAccent.resolve(cx);
        let surface_color = TokenKind::SurfaceBackground.resolve(cx);
        let elevated_color = TokenKind::ElevatedSurfaceBackground.resolve(cx);
        let border_color = TokenKind::Border.resolve(cx);
        let text_color = TokenKind::Text.resolve(cx);
        let muted_color = TokenKind::TextMuted.resolve(cx);
        let hover_color = TokenKind::ElementHover.resolve(cx);

        let open_state =
            window.use_keyed_state(self.id.with_suffix("state:open"), cx, |_window, _cx| false);
        let open = *open_state.read(cx);

        let bar = || {
            div()
                .w(px(22.))
                .h(px(2.))
                .bg(accent_color)
                .rounded(px(1.))
        };

        let toggle_state = open_state.clone();
        let close_state = open_state.clone();

        div()
            .id(self.id.clone())
            .relative()
            .child(
                div()
                    .id(self.id.with_suffix("button"))
                    .cursor(CursorStyle::PointingHand)
                    .p(px(10.))
                    .flex()
                    .flex_col()
                    .justify_center()
                    .gap(px(4.))
                    .child(squircle().absolute_expand().rounded(px(6.)).bg(surface_color))
                    .child(bar())
                    .child(bar())
                    .child(bar())
                    .on_mouse_down(gpui::MouseButton::Left, move |_event, window, cx| {
                        window.prevent_default();
                        toggle_state.update(cx, |open, _cx| *open = !*open);
                        cx.notify(toggle_state.entity_id());
                    }),
            )
            .when(open, |this| {
                let dropdown = div()
                    .id(self.id.with_suffix("dropdown"))
                    .absolute()
                    .right_0()
                    .top(px(46.))
                    .min_w(px(160.))
                    .flex()
                    .flex_col()
                    .child(
                        squircle()
                            .absolute_expand()
                            .rounded(px(8.))
                            .bg(elevated_color)
                            .border(px(1.))
                            .border_inside()
                            .border_color(border_color),
                    )
                    .children(self.items.iter().map(|item| {
                        let is_current = item.href == self.current_path;
                        let row = div()
                            .id(self.id.with_suffix(item.href.clone()))
                            .pl(tokens::spacing::s())
                            .pr(tokens::spacing::s())
                            .pt(tokens::spacing::xs())
                            .pb(tokens::spacing::xs())
                            .text_size(tokens::text_size::step_minus1())
                            .whitespace_nowrap()
                            .child(item.label.clone());

                        if is_current {
                            row.text_color(muted_color).cursor(CursorStyle::Arrow)
                        } else {
                            let on_navigate = self.on_navigate.clone();
                            let href = item.href.clone();
                            let open_state = open_state.clone();
                            row.text_color(text_color)
                                .cursor(CursorStyle::PointingHand)
                                .hover(|style| style.bg(hover_color))
                                .on_mouse_down(
                                    gpui::MouseButton::Left,
                                    move |_event, window, cx| {
                                        open_state.update(cx, |open, _cx| *open = false);
                                        cx.notify(open_state.entity_id());
                                        if let Some(on_navigate) = &on_navigate {
                                            (on_navigate)(&href, window, cx);
                                        }
                                    },
                                )
                        }
                    }))
                    .on_mouse_down_out(move |_event, _window, cx| {
                        close_state.update(cx, |open, _cx| *open = false);
                        cx.notify(close_state.entity_id());
                    });

                this.child(deferred(dropdown).priority(1))
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    fn fixture_items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Home", "/"),
            MenuItem::new("Settings", "/settings/preferences"),
            MenuItem::new("About", "/settings/about"),
        ]
    }

    #[gpui::test]
    fn test_menu_builder_collects_items(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let menu = Menu::new("app-menu")
                .items(fixture_items())
                .current_path("/");
            assert_eq!(menu.items.len(), 3);
            assert_eq!(menu.current_path.as_ref(), "/");
        });
    }

    #[gpui::test]
    fn test_menu_on_navigate_callback_presence(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let menu = Menu::new("app-menu");
            assert!(menu.on_navigate.is_none());

            let menu = menu.on_navigate(|_href, _window, _cx| {});
            assert!(menu.on_navigate.is_some());
        });
    }

    #[gpui::test]
    fn test_menu_item_equality_drives_current_detection(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let items = fixture_items();
            let current: SharedString = "/settings/preferences".into();
            let matching: Vec<&MenuItem> =
                items.iter().filter(|item| item.href == current).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].label.as_ref(), "Settings");
        });
    }
}
