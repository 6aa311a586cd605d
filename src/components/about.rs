use gpui::{
    AnyElement, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled, div,
    img, prelude::FluentBuilder, px,
};

use crate::page;
use crate::tokens::{self, TokenKind};

/// About page: app identity block over a description.
#[derive(IntoElement)]
pub struct About {
    app_name: SharedString,
    version: SharedString,
    description: SharedString,
    title: SharedString,
    icon: Option<SharedString>,
    menu: Option<AnyElement>,
}

impl About {
    pub fn new(
        app_name: impl Into<SharedString>,
        version: impl Into<SharedString>,
        description: impl Into<SharedString>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
            description: description.into(),
            title: "About".into(),
            icon: None,
            menu: None,
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    /// Asset path of the app icon.
    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Menu element rendered in the header.
    pub fn menu(mut self, menu: impl IntoElement) -> Self {
        self.menu = Some(menu.into_any_element());
        self
    }
}

impl RenderOnce for About {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        page::page()
            .child(
                page::header()
                    .child(page::title(self.title.clone(), cx))
                    .when_some(self.menu, |this, menu| this.child(menu)),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap(tokens::spacing::xs())
                    .pt(tokens::spacing::l())
                    .pb(tokens::spacing::l())
                    .when_some(self.icon.clone(), |this, icon| {
                        this.child(img(icon).w(px(128.)).h(px(128.)).rounded(px(10.)))
                    })
                    .child(
                        div()
                            .text_size(tokens::text_size::step3())
                            .font_weight(FontWeight::BOLD)
                            .text_color(TokenKind::Text.resolve(cx))
                            .child(self.app_name.clone()),
                    )
                    .child(
                        div()
                            .text_size(tokens::text_size::step0())
                            .text_color(TokenKind::TextMuted.resolve(cx))
                            .child(self.version.clone()),
                    ),
            )
            .child(
                div()
                    .text_size(tokens::text_size::step_minus1())
                    .text_color(TokenKind::TextMuted.resolve(cx))
                    .text_center()
                    .child(self.description.clone()),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_about_builder(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let about = About::new("Elements", "0.1.0", "A demo.")
                .title("About this app")
                .icon("icons/app_icon.svg");

            assert_eq!(about.app_name.as_ref(), "Elements");
            assert_eq!(about.version.as_ref(), "0.1.0");
            assert_eq!(about.title.as_ref(), "About this app");
            assert!(about.icon.is_some());
            assert!(about.menu.is_none());
        });
    }
}
