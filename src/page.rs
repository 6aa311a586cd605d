//! Shared page scaffolding: page column, header row, section cards.

use gpui::{App, Div, FontWeight, IntoElement, ParentElement, SharedString, Styled, div, px};
use gpui_squircle::{SquircleStyled, squircle};

use crate::tokens::{self, TokenKind};

/// Vertical page column with outer padding.
pub fn page() -> Div {
    div()
        .flex()
        .flex_col()
        .gap(tokens::spacing::m())
        .p(tokens::spacing::l())
        .size_full()
}

/// Header row holding the page title and the app menu.
pub fn header() -> Div {
    div()
        .flex()
        .justify_between()
        .items_center()
        .gap(tokens::spacing::s())
}

/// Page title text.
pub fn title(text: impl Into<SharedString>, cx: &App) -> Div {
    div()
        .text_size(tokens::text_size::step2())
        .font_weight(FontWeight::BOLD)
        .text_color(TokenKind::Text.resolve(cx))
        .child(text.into())
}

/// Section card over the surface background.
pub fn section(cx: &App) -> Div {
    div()
        .relative()
        .flex()
        .flex_col()
        .gap(tokens::spacing::s())
        .p(tokens::spacing::m())
        .child(
            squircle()
                .absolute_expand()
                .rounded(px(8.))
                .bg(TokenKind::SurfaceBackground.resolve(cx)),
        )
}

/// Section heading text.
pub fn section_title(text: impl Into<SharedString>, cx: &App) -> Div {
    div()
        .text_size(tokens::text_size::step1())
        .font_weight(FontWeight::SEMIBOLD)
        .text_color(TokenKind::Text.resolve(cx))
        .child(text.into())
}

/// Help paragraph inside a section.
pub fn help_text(text: impl Into<SharedString>, cx: &App) -> Div {
    div()
        .text_size(tokens::text_size::step_minus1())
        .text_color(TokenKind::TextMuted.resolve(cx))
        .child(text.into())
}
