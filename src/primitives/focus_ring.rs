use std::time::Duration;

use gpui::{CornersRefinement, ElementId, FocusHandle, IntoElement, Pixels, RenderOnce, prelude::*, px};
use gpui_squircle::{SquircleStyleRefinement, SquircleStyled, squircle};
use gpui_transitions::TransitionExt;

use crate::conditional_transition;
use crate::tokens::TokenKind;
use crate::utils::RgbaExt;

const SIZE_SCALE_FACTOR: f32 = 8.;

/// Animated ring drawn around a focused element.
///
/// Colored from the `border.focused` token unless overridden through
/// [`SquircleStyled`] styling.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    color: Option<gpui::Rgba>,
    style: SquircleStyleRefinement,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            color: None,
            style: SquircleStyleRefinement::default(),
        }
    }

    /// Overrides the ring color, e.g. for invalid inputs.
    pub fn color(mut self, color: gpui::Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

impl SquircleStyled for FocusRing {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style.inner
    }

    fn outer_style(&mut self) -> &mut SquircleStyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let ring_color = self
            .color
            .unwrap_or_else(|| TokenKind::BorderFocused.resolve(cx));

        let is_focused = self.focus_handle.is_focused(window) as u8 as f32;

        let ring_progress = conditional_transition!(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(365),
            is_focused
        );

        squircle()
            .absolute()
            .top_0()
            .bottom_0()
            .left_0()
            .right_0()
            .border(px(3.))
            .border_outside()
            .with_transitions(ring_progress, move |_cx, this, delta| {
                let size_factor = (1. - delta) * SIZE_SCALE_FACTOR;

                this.inset(px(-size_factor))
                    .border_color(ring_color.alpha(delta * 0.3))
                    .map(|mut this| {
                        this.outer_style().corner_radii = add_to_corner_radii(
                            &self.style.corner_radii,
                            px(8.),
                            px(size_factor + 1.),
                        );
                        this
                    })
            })
    }
}

fn add_to_corner_radii(
    corner_radii: &CornersRefinement<Pixels>,
    default: Pixels,
    num: Pixels,
) -> CornersRefinement<Pixels> {
    CornersRefinement {
        top_left: Some(corner_radii.top_left.unwrap_or(default) + num),
        top_right: Some(corner_radii.top_right.unwrap_or(default) + num),
        bottom_right: Some(corner_radii.bottom_right.unwrap_or(default) + num),
        bottom_left: Some(corner_radii.bottom_left.unwrap_or(default) + num),
    }
}
