use std::rc::Rc;

use gpui::{
    App, AppContext, Context, CursorStyle, Entity, FontWeight, InteractiveElement, IntoElement,
    KeyDownEvent, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
    div,
};

use crate::components::Input;
use crate::primitives::input::InputState;
use crate::tokens::{self, TokenKind};

/// Page title that turns into an input on click.
///
/// The shown value reconciles three sources: a local optimistic value set on
/// save, the confirmed value from the backing store, and a fallback. The
/// optimistic value wins until the store converges to it, then clears — an
/// explicit two-field state instead of a render-cycle side effect.
pub struct EditableTitle {
    current_title: Option<SharedString>,
    pending: Option<SharedString>,
    default_title: SharedString,
    editing: bool,
    input: Entity<InputState>,
    on_save: Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>,
}

impl EditableTitle {
    pub fn new(
        default_title: impl Into<SharedString>,
        on_save: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
        cx: &mut Context<Self>,
    ) -> Self {
        Self {
            current_title: None,
            pending: None,
            default_title: default_title.into(),
            editing: false,
            input: cx.new(|cx| InputState::new(cx)),
            on_save: Rc::new(on_save),
        }
    }

    /// Feeds the confirmed value from the store. Clears the optimistic value
    /// once the store has caught up to it.
    pub fn set_current_title(&mut self, title: Option<SharedString>, cx: &mut Context<Self>) {
        self.current_title = title;
        if let (Some(pending), Some(current)) = (&self.pending, &self.current_title) {
            if pending == current {
                self.pending = None;
            }
        }
        cx.notify();
    }

    /// The title currently shown: optimistic value, then confirmed value,
    /// then the fallback.
    pub fn display_title(&self) -> SharedString {
        self.pending
            .clone()
            .or_else(|| self.current_title.clone())
            .unwrap_or_else(|| self.default_title.clone())
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn pending(&self) -> Option<&SharedString> {
        self.pending.as_ref()
    }

    fn begin_editing(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let title = self.display_title();
        self.editing = true;
        self.input.update(cx, |state, cx| {
            let end = title.len();
            state.value = Some(title);
            state.selected_range = 0..end;
            cx.notify();
        });
        let focus_handle = self.input.read(cx).focus_handle.clone();
        focus_handle.focus(window, cx);
        cx.notify();
    }

    /// Leaves editing mode; returns the accepted value, if any.
    ///
    /// Empty input and input equal to the shown title are no-ops.
    fn apply_commit(&mut self, raw: &str) -> Option<SharedString> {
        let trimmed = raw.trim();
        self.editing = false;
        if trimmed.is_empty() || trimmed == self.display_title().as_ref() {
            return None;
        }
        let value = SharedString::from(trimmed.to_string());
        self.pending = Some(value.clone());
        Some(value)
    }

    fn commit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let raw = self.input.read(cx).value().to_string();
        if let Some(value) = self.apply_commit(&raw) {
            let on_save = self.on_save.clone();
            (on_save)(&value, window, cx);
        }
        cx.notify();
    }

    fn cancel(&mut self, cx: &mut Context<Self>) {
        self.editing = false;
        cx.notify();
    }
}

impl Render for EditableTitle {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let text_color = TokenKind::Text.resolve(cx);
        let accent_color = TokenKind::TextAccent.resolve(cx);

        if self.editing {
            div()
                .id("editable-title:editing")
                .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                    match event.keystroke.key.as_str() {
                        "enter" => this.commit(window, cx),
                        "escape" => this.cancel(cx),
                        _ => {}
                    }
                }))
                // Clicking elsewhere saves, like an input losing focus.
                .on_mouse_down_out(cx.listener(|this, _event, window, cx| {
                    this.commit(window, cx);
                }))
                .child(Input::new("editable-title:input", self.input.clone()).w_full())
        } else {
            div()
                .id("editable-title:display")
                .cursor(CursorStyle::PointingHand)
                .text_size(tokens::text_size::step2())
                .font_weight(FontWeight::BOLD)
                .text_color(text_color)
                .hover(|style| style.text_color(accent_color))
                .on_mouse_down(
                    gpui::MouseButton::Left,
                    cx.listener(|this, _event, window, cx| {
                        this.begin_editing(window, cx);
                    }),
                )
                .child(self.display_title())
        }
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    fn title(cx: &mut TestAppContext) -> Entity<EditableTitle> {
        cx.update(|cx| cx.new(|cx| EditableTitle::new("Untitled", |_title, _window, _cx| {}, cx)))
    }

    #[gpui::test]
    fn test_display_falls_back_to_default(cx: &mut TestAppContext) {
        let title = title(cx);
        cx.update(|cx| {
            assert_eq!(title.read(cx).display_title().as_ref(), "Untitled");
        });
    }

    #[gpui::test]
    fn test_confirmed_value_overrides_default(cx: &mut TestAppContext) {
        let title = title(cx);
        title.update(cx, |title, cx| {
            title.set_current_title(Some("Stored".into()), cx);
        });
        cx.update(|cx| {
            assert_eq!(title.read(cx).display_title().as_ref(), "Stored");
        });
    }

    #[gpui::test]
    fn test_commit_sets_optimistic_value(cx: &mut TestAppContext) {
        let title = title(cx);
        title.update(cx, |title, cx| {
            title.set_current_title(Some("Stored".into()), cx);
            let accepted = title.apply_commit("  Renamed  ");
            assert_eq!(accepted.as_deref(), Some("Renamed"));
            assert_eq!(title.display_title().as_ref(), "Renamed");
            assert_eq!(title.current_title.as_deref(), Some("Stored"));
        });
    }

    #[gpui::test]
    fn test_commit_rejects_empty_and_unchanged(cx: &mut TestAppContext) {
        let title = title(cx);
        title.update(cx, |title, _cx| {
            assert!(title.apply_commit("   ").is_none());
            assert!(title.apply_commit("Untitled").is_none());
            assert!(title.pending().is_none());
        });
    }

    #[gpui::test]
    fn test_pending_clears_when_store_converges(cx: &mut TestAppContext) {
        let title = title(cx);
        title.update(cx, |title, cx| {
            title.apply_commit("Renamed");
            assert!(title.pending().is_some());

            // A stale echo of the old value keeps the optimistic title.
            title.set_current_title(Some("Old".into()), cx);
            assert_eq!(title.display_title().as_ref(), "Renamed");

            // Convergence clears it.
            title.set_current_title(Some("Renamed".into()), cx);
            assert!(title.pending().is_none());
            assert_eq!(title.display_title().as_ref(), "Renamed");
        });
    }
}
