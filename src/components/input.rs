use std::time::Duration;

use gpui::{
    App, ElementId, Entity, InteractiveElement, IntoElement, Length, ParentElement,
    RenderOnce, SharedString, Styled, Window, div, ease_out_quint, prelude::FluentBuilder, px,
    relative,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::{Lerp, TransitionExt};

use crate::conditional_transition;
use crate::primitives::FocusRing;
use crate::primitives::input::{Input as PrimitiveInput, InputState};
use crate::tokens::{self, TokenKind};
use crate::utils::{ElementIdExt, disabled_transition};

const MASK_CHAR: char = '\u{2022}';

/// Single-line text input with themed chrome.
///
/// State lives in a [`InputState`] entity owned by the caller, typically via
/// `window.use_keyed_state`.
#[derive(IntoElement)]
pub struct Input {
    id: ElementId,
    invalid: bool,
    disabled: bool,
    masked: bool,
    width: Length,
    state: Entity<InputState>,
    base: PrimitiveInput,
}

impl Input {
    pub fn new(id: impl Into<ElementId>, state: Entity<InputState>) -> Self {
        let id = id.into();
        Self {
            id: id.clone(),
            invalid: false,
            disabled: false,
            masked: false,
            width: Length::Auto,
            state: state.clone(),
            base: PrimitiveInput::new(id, state),
        }
    }

    /// Marks the value invalid, switching the chrome to the error color.
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Renders every character as a bullet, for secrets.
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.base = self.base.placeholder(text);
        self
    }

    pub fn w(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn w_full(mut self) -> Self {
        self.width = relative(100.).into();
        self
    }

    pub fn read_text(&self, cx: &mut App) -> SharedString {
        self.base.read_text(cx)
    }

    fn focus_handle(&self, cx: &App) -> gpui::FocusHandle {
        self.state.read(cx).focus_handle.clone()
    }
}

impl RenderOnce for Input {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let text_color = TokenKind::Text.resolve(cx);
        let accent_color = TokenKind::TextAccent.resolve(cx);
        let error_color = TokenKind::Error.resolve(cx);
        let background_color = TokenKind::ElementBackground.resolve(cx);
        let border_color = TokenKind::Border.resolve(cx);
        let border_hover_color = border_color.lerp(&text_color, 0.07);
        let placeholder_color = TokenKind::TextPlaceholder.resolve(cx);
        let corner_radius = px(6.);

        let is_invalid = self.invalid;
        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_cx, _window| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = self.focus_handle(cx);
        let is_focus = focus_handle.is_focused(window);

        let disabled_transition_state =
            disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let border_color_state = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(400),
            {
                is_invalid => error_color,
                is_focus => accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        let mut base = self
            .base
            .disabled(is_disabled)
            .placeholder_text_color(placeholder_color);
        if self.masked {
            base = base.transform_text(|_| MASK_CHAR);
        }

        div()
            .id(self.id.clone())
            .w(self.width)
            .pl(tokens::spacing::s())
            .pr(tokens::spacing::s())
            .pt(tokens::spacing::xs())
            .pb(tokens::spacing::xs())
            .flex()
            .flex_col()
            .with_transitions(disabled_transition_state, |_cx, this, opacity| {
                this.opacity(opacity)
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle)
                    .rounded(corner_radius)
                    .when(is_invalid, |this| this.color(error_color)),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .with_transitions(border_color_state, |_cx, this, border_color| {
                        this.border_color(border_color)
                    }),
            )
            .child(
                div()
                    .text_size(tokens::text_size::step_minus1())
                    .text_color(text_color)
                    .child(base),
            )
            .when(!is_disabled, |this| {
                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state.entity_id());
                })
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{AppContext, TestAppContext};

    #[gpui::test]
    fn test_input_builder_flags(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|cx| InputState::new(cx));
            let input = Input::new("test-input", state)
                .invalid(true)
                .disabled(true)
                .masked(true)
                .w_full();

            assert!(input.invalid, "Input should be invalid");
            assert!(input.disabled, "Input should be disabled");
            assert!(input.masked, "Input should be masked");
        });
    }

    #[gpui::test]
    fn test_input_reads_state_text(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|cx| InputState::new(cx).initial_value("hello"));
            let input = Input::new("test-input", state);
            assert_eq!(input.read_text(cx).as_ref(), "hello");
        });
    }
}
