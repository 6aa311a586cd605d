use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, StatefulInteractiveElement, Styled, Window, div, ease_out_quint,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::{Lerp, TransitionExt};

use crate::conditional_transition;
use crate::primitives::FocusRing;
use crate::tokens::TokenKind;
use crate::utils::{ElementIdExt, RgbaExt, checked_transition, disabled_transition};

/// Sliding two-state toggle.
#[derive(IntoElement)]
pub struct Switch {
    id: ElementId,
    checked: bool,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Switch {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            disabled: false,
            on_click: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
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

impl RenderOnce for Switch {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let inner_size = px(14.);
        let padding = px(3.);
        let width = (inner_size * 2) + (padding * 2);
        let height = inner_size + (padding * 2);
        let (start_offset, end_offset) = (
            padding.to_f64() as f32,
            (width - inner_size - padding).to_f64() as f32,
        );

        let accent_color = TokenKind::TextAccent.resolve(cx);
        let text_color = TokenKind::Text.resolve(cx);
        let background_color = TokenKind::ElementBackground.resolve(cx);
        let border_color = TokenKind::Border.resolve(cx);
        let border_hover_color = border_color.lerp(&text_color, 0.07);
        let knob_color = TokenKind::Background.resolve(cx);

        let checked_state = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(200),
            self.checked,
        );

        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_cx, _window| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
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
            Duration::from_millis(365),
            {
                is_focus => accent_color,
                is_hover => border_hover_color,
                _ => border_color
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
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .with_transitions(disabled_transition_state, |_cx, this, opacity| {
                this.opacity(opacity)
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(px(100.)),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(px(100.))
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .with_transitions(border_color_state, |_cx, this, border_color| {
                        this.border_color(border_color)
                    }),
            )
            .map(|this| {
                let checked_delta = *checked_state.evaluate(window, cx);
                let offset = start_offset + (end_offset - start_offset) * checked_delta;

                this.child(
                    squircle()
                        .absolute_expand()
                        .bg(accent_color.alpha(checked_delta))
                        .rounded(px(100.)),
                )
                .child(
                    div()
                        .w(inner_size)
                        .h(inner_size)
                        .top(padding)
                        .bg(knob_color)
                        .rounded(px(100.))
                        .left(px(offset)),
                )
            })
            .when(!is_disabled, |this| {
                let is_hover_state_on_click = is_hover_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state.entity_id());
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, _cx| {
                    // Prevents focus ring from appearing when clicked.
                    window.prevent_default();
                })
                .on_click(move |event, window, cx| {
                    window.prevent_default();
                    cx.stop_propagation();

                    // Keep hover state honest after the click re-renders.
                    cx.notify(is_hover_state_on_click.entity_id());

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
    fn test_switch_creation(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let switch = Switch::new("test-switch");
            assert!(!switch.checked, "Switch should start unchecked");
            assert!(!switch.disabled, "Switch should start enabled");
        });
    }

    #[gpui::test]
    fn test_switch_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let switch = Switch::new("test-switch")
                .checked(true)
                .disabled(true)
                .on_click(|_event, _window, _cx| {});

            assert!(switch.checked, "Switch should be checked");
            assert!(switch.disabled, "Switch should be disabled");
            assert!(switch.on_click.is_some(), "Switch should have on_click");
        });
    }
}
