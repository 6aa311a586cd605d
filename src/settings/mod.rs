//! Settings-page sections: theme and appearance pickers, account and sync.

mod theme_picker;
pub use theme_picker::*;

mod appearance_picker;
pub use appearance_picker::*;

mod account_section;
pub use account_section::*;

mod sync_section;
pub use sync_section::*;

use gpui::{
    App, CursorStyle, Div, ElementId, InteractiveElement, ParentElement, SharedString, Stateful,
    Styled, div, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::tokens::{self, TokenKind};

/// Pill-shaped option button shared by the pickers; the active option gets
/// accent border and text.
pub(crate) fn picker_pill(
    id: ElementId,
    label: SharedString,
    active: bool,
    cx: &App,
) -> Stateful<Div> {
    let text_color = if active {
        TokenKind::TextAccent.resolve(cx)
    } else {
        TokenKind::Text.resolve(cx)
    };
    let border_color = if active {
        TokenKind::TextAccent.resolve(cx)
    } else {
        TokenKind::Border.resolve(cx)
    };

    div()
        .id(id)
        .cursor(CursorStyle::PointingHand)
        .pl(tokens::spacing::s())
        .pr(tokens::spacing::s())
        .pt(tokens::spacing::xs())
        .pb(tokens::spacing::xs())
        .text_size(tokens::text_size::step_minus1())
        .text_color(text_color)
        .child(
            squircle()
                .absolute_expand()
                .rounded(px(6.))
                .bg(TokenKind::ElementBackground.resolve(cx))
                .border(px(1.))
                .border_inside()
                .border_color(border_color),
        )
        .child(label)
}
