//! Transient bottom-center notifications.
//!
//! A single [`Toasts`] view is installed at startup via [`init`] and embedded
//! near the root of the window; [`toast`] and [`toast_error`] replace the
//! current message from anywhere with app access. Messages dismiss
//! themselves after a short delay.

use std::time::Duration;

use gpui::{
    App, Context, Entity, Global, IntoElement, ParentElement, Render, SharedString, Styled,
    Window, div, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::tokens::{self, TokenKind};
use crate::utils::rgb_a;

const DISMISS_AFTER: Duration = Duration::from_millis(2000);

/// Tone of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

#[derive(Clone)]
struct ToastMessage {
    text: SharedString,
    variant: ToastVariant,
}

/// View holding the active toast, if any.
pub struct Toasts {
    message: Option<ToastMessage>,
    epoch: usize,
}

struct GlobalToasts(Entity<Toasts>);

impl Global for GlobalToasts {}

/// Creates the toast view and installs it for [`toast`] dispatch.
pub fn init(cx: &mut App) {
    let toasts = cx.new(|_cx| Toasts {
        message: None,
        epoch: 0,
    });
    cx.set_global(GlobalToasts(toasts));
}

/// The installed toast view, to embed near the root of a window.
pub fn view(cx: &App) -> Option<Entity<Toasts>> {
    cx.try_global::<GlobalToasts>().map(|global| global.0.clone())
}

/// Shows a success toast.
pub fn toast(cx: &mut App, text: impl Into<SharedString>) {
    show(cx, text.into(), ToastVariant::Success);
}

/// Shows an error toast.
pub fn toast_error(cx: &mut App, text: impl Into<SharedString>) {
    show(cx, text.into(), ToastVariant::Error);
}

fn show(cx: &mut App, text: SharedString, variant: ToastVariant) {
    let Some(toasts) = view(cx) else {
        log::warn!("toast dropped, layer not initialized: {text}");
        return;
    };
    toasts.update(cx, |toasts, cx| toasts.show(text, variant, cx));
}

impl Toasts {
    fn show(&mut self, text: SharedString, variant: ToastVariant, cx: &mut Context<Self>) {
        self.message = Some(ToastMessage { text, variant });
        self.epoch = self.epoch.wrapping_add(1);
        cx.notify();

        let epoch = self.epoch;
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(DISMISS_AFTER).await;
            if let Some(this) = this.upgrade() {
                this.update(cx, |toasts, cx| {
                    toasts.dismiss(epoch, cx);
                });
            }
        })
        .detach();
    }

    fn dismiss(&mut self, epoch: usize, cx: &mut Context<Self>) {
        // A newer message restarts the clock; only the matching epoch clears.
        if epoch == self.epoch {
            self.message = None;
            cx.notify();
        }
    }

    /// Whether a message is currently shown.
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

impl Render for Toasts {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let Some(message) = self.message.clone() else {
            return div();
        };

        let background = match message.variant {
            ToastVariant::Success => TokenKind::TextAccent.resolve(cx),
            ToastVariant::Error => TokenKind::Error.resolve(cx),
        };

        div()
            .absolute()
            .bottom(tokens::spacing::l())
            .left_0()
            .right_0()
            .flex()
            .justify_center()
            .child(
                div()
                    .flex()
                    .child(
                        div()
                            .pl(tokens::spacing::m())
                            .pr(tokens::spacing::m())
                            .pt(tokens::spacing::xs())
                            .pb(tokens::spacing::xs())
                            .text_size(tokens::text_size::step_minus1())
                            .text_color(rgb_a(0xffffff, 1.))
                            .child(squircle().absolute_expand().rounded(px(8.)).bg(background))
                            .child(message.text),
                    ),
            )
    }
}
