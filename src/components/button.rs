use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled, Window, div,
    ease_out_quint, prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::{Lerp, TransitionExt};

use crate::conditional_transition;
use crate::primitives::FocusRing;
use crate::tokens::{self, TokenKind};
use crate::utils::{ElementIdExt, RgbaExt, disabled_transition, rgb_a};

/// Push button with themed chrome.
///
/// # Example
///
/// ```ignore
/// Button::new("save")
///     .text("Save")
///     .variant(ButtonVariant::Primary)
///     .on_click(|_event, _window, _cx| { /* ... */ })
/// ```
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    text: SharedString,
    variant: ButtonVariant,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

/// Visual emphasis of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Accent-filled, for the main action of a view.
    Primary,
    /// Bordered neutral surface.
    #[default]
    Secondary,
    /// Neutral surface with error-colored text, for irreversible actions.
    Destructive,
}

struct ButtonColors {
    bg: Rgba,
    text: Rgba,
    border: Rgba,
    border_hover: Rgba,
}

impl ButtonVariant {
    fn colors(&self, cx: &App) -> ButtonColors {
        let text = TokenKind::Text.resolve(cx);
        let accent = TokenKind::TextAccent.resolve(cx);
        let surface = TokenKind::ElementBackground.resolve(cx);
        let border = TokenKind::Border.resolve(cx);

        match self {
            ButtonVariant::Primary => ButtonColors {
                bg: accent,
                text: rgb_a(0xffffff, 1.),
                border: accent,
                border_hover: accent.lerp(&text, 0.2),
            },
            ButtonVariant::Secondary => ButtonColors {
                bg: surface,
                text,
                border,
                border_hover: accent,
            },
            ButtonVariant::Destructive => {
                let error = TokenKind::Error.resolve(cx);
                ButtonColors {
                    bg: surface,
                    text: error,
                    border: error.alpha(0.5),
                    border_hover: error,
                }
            }
        }
    }
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            text: SharedString::from("Button"),
            variant: ButtonVariant::default(),
            disabled: false,
            on_click: None,
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = text.into();
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let colors = self.variant.colors(cx);
        let hover_wash = TokenKind::ElementHover.resolve(cx);
        let bg_hover = colors.bg.lerp(&hover_wash.alpha(1.), hover_wash.a);
        let corner_radius = px(6.);

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_cx, _window| false);
        let is_hover = *is_hover_state.read(cx);

        let is_click_down_state = window.use_keyed_state(
            self.id.with_suffix("state:click_down"),
            cx,
            |_cx, _window| false,
        );
        let is_click_down = *is_click_down_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        let is_disabled = self.disabled;
        let disabled_transition_state =
            disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let bg_color_state = conditional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_hover || is_click_down => bg_hover,
                _ => colors.bg
            }
        )
        .with_easing(ease_out_quint());

        let border_color_state = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focus || is_click_down || is_hover => colors.border_hover,
                _ => colors.border
            }
        )
        .with_easing(ease_out_quint());

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
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
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .border(px(1.))
                    .border_inside()
                    .with_transitions(
                        (bg_color_state, border_color_state),
                        move |_cx, this, (bg_color, border_color)| {
                            this.bg(bg_color).border_color(border_color)
                        },
                    ),
            )
            .child(
                div()
                    .flex()
                    .justify_center()
                    .items_center()
                    .text_size(tokens::text_size::step_minus1())
                    .text_color(colors.text)
                    .child(self.text),
            )
            .when(!self.disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_click_down_state_on_click = is_click_down_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, cx| {
                    // Prevents focus ring from appearing when clicked.
                    window.prevent_default();

                    is_click_down_state.update(cx, |this, _cx| *this = true);
                    cx.notify(is_click_down_state.entity_id());
                })
                .on_click(move |event, window, cx| {
                    window.prevent_default();

                    is_click_down_state_on_click.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state_on_click.entity_id());

                    if let Some(on_click) = &self.on_click {
                        (on_click)(event, window, cx);
                    }
                })
                .track_focus(&focus_handle)
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_button_creation(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let button = Button::new("test-button");
            assert!(!button.disabled, "Button should start enabled");
            assert_eq!(button.variant, ButtonVariant::Secondary);
            assert!(button.on_click.is_none());
        });
    }

    #[gpui::test]
    fn test_button_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let button = Button::new("test-button")
                .text("Reset Owner")
                .variant(ButtonVariant::Destructive)
                .disabled(true)
                .on_click(|_event, _window, _cx| {});

            assert_eq!(button.text.as_ref(), "Reset Owner");
            assert_eq!(button.variant, ButtonVariant::Destructive);
            assert!(button.disabled, "Button should be disabled");
            assert!(button.on_click.is_some(), "Button should have on_click");
        });
    }

    #[gpui::test]
    fn test_button_variant_colors_differ(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let primary = ButtonVariant::Primary.colors(cx);
            let secondary = ButtonVariant::Secondary.colors(cx);
            assert_ne!(
                (primary.bg.r, primary.bg.g, primary.bg.b),
                (secondary.bg.r, secondary.bg.g, secondary.bg.b),
                "Primary and secondary backgrounds should differ"
            );
        });
    }
}
