use std::rc::Rc;
use std::time::Duration;

use gpui::{
    App, ClipboardItem, Context, Div, Entity, FontWeight, IntoElement, KeyDownEvent, ParentElement,
    Render, SharedString, Styled, Task, Window, div, prelude::FluentBuilder, px,
};
use gpui::InteractiveElement;
use gpui_squircle::{SquircleStyled, squircle};

use crate::components::{Button, ButtonVariant, Input};
use crate::primitives::input::InputState;
use crate::tokens::{self, TokenKind};
use crate::utils::rgb_a;

const COPIED_RESET_AFTER: Duration = Duration::from_millis(2000);

/// Steps of the first-run setup flow.
///
/// Forward edges: `Features -> YourData -> SyncChoice`, then either
/// `NoSyncDone` or `AccountChoice -> {Restore | NewAccount}`. Back always
/// moves along the direct reverse edge; there is no history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Features,
    YourData,
    SyncChoice,
    NoSyncDone,
    AccountChoice,
    Restore,
    NewAccount,
}

/// Outcome reported to the completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupResult {
    /// Keep data on this device only.
    NoSync,
    /// Enable sync; carries the entered phrase when an existing identity was
    /// restored.
    Sync {
        restored_mnemonic: Option<SharedString>,
    },
}

type ValidateMnemonic = Rc<dyn Fn(&str) -> bool + 'static>;
type CreateAccount = Rc<dyn Fn(&mut App) -> Task<anyhow::Result<String>> + 'static>;
type OnComplete = Rc<dyn Fn(&SetupResult, &mut Window, &mut App) + 'static>;

/// Modal first-run flow walking the user through sync and account setup.
pub struct SetupWizard {
    app_name: SharedString,
    tagline: Option<SharedString>,
    step: WizardStep,
    restore_input: Entity<InputState>,
    show_mnemonic: bool,
    restore_error: Option<SharedString>,
    mnemonic: Option<SharedString>,
    copied: bool,
    copied_epoch: usize,
    validate_mnemonic: Option<ValidateMnemonic>,
    on_create_account: Option<CreateAccount>,
    on_complete: OnComplete,
}

impl SetupWizard {
    pub fn new(
        app_name: impl Into<SharedString>,
        on_complete: impl Fn(&SetupResult, &mut Window, &mut App) + 'static,
        cx: &mut Context<Self>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            tagline: None,
            step: WizardStep::Features,
            restore_input: cx.new(|cx| InputState::new(cx)),
            show_mnemonic: false,
            restore_error: None,
            mnemonic: None,
            copied: false,
            copied_epoch: 0,
            validate_mnemonic: None,
            on_create_account: None,
            on_complete: Rc::new(on_complete),
        }
    }

    /// Short line shown on the welcome step.
    pub fn tagline(mut self, tagline: impl Into<SharedString>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    /// Validator for the restore step. Input failing it surfaces an inline
    /// error instead of completing.
    pub fn validate_mnemonic(mut self, validate: impl Fn(&str) -> bool + 'static) -> Self {
        self.validate_mnemonic = Some(Rc::new(validate));
        self
    }

    /// Account creation hook; the returned task resolves to the new
    /// identity phrase.
    pub fn on_create_account(
        mut self,
        create: impl Fn(&mut App) -> Task<anyhow::Result<String>> + 'static,
    ) -> Self {
        self.on_create_account = Some(Rc::new(create));
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn restore_error(&self) -> Option<&SharedString> {
        self.restore_error.as_ref()
    }

    fn go_to(&mut self, step: WizardStep, cx: &mut Context<Self>) {
        self.step = step;
        cx.notify();
    }

    /// Validates restore input without transitioning. `Err` carries the
    /// inline message.
    fn validate_restore(&self, raw: &str) -> Result<SharedString, SharedString> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Please enter your identity phrase.".into());
        }
        if let Some(validate) = &self.validate_mnemonic {
            if !validate(trimmed) {
                return Err("Invalid identity phrase. Please check and try again.".into());
            }
        }
        Ok(SharedString::from(trimmed.to_string()))
    }

    fn handle_restore(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let raw = self.restore_input.read(cx).value().to_string();
        match self.validate_restore(&raw) {
            Ok(mnemonic) => self.complete(
                SetupResult::Sync {
                    restored_mnemonic: Some(mnemonic),
                },
                window,
                cx,
            ),
            Err(message) => {
                self.restore_error = Some(message);
                cx.notify();
            }
        }
    }

    fn handle_new_account(&mut self, cx: &mut Context<Self>) {
        let Some(create) = self.on_create_account.clone() else {
            self.go_to(WizardStep::NewAccount, cx);
            return;
        };
        let task = (create)(cx);
        cx.spawn(async move |this, cx| {
            let result = task.await;
            if let Some(this) = this.upgrade() {
                this.update(cx, |wizard, cx| {
                    match result {
                        Ok(mnemonic) => wizard.mnemonic = Some(mnemonic.into()),
                        Err(err) => log::warn!("account creation failed: {err:#}"),
                    }
                    wizard.step = WizardStep::NewAccount;
                    cx.notify();
                });
            }
        })
        .detach();
    }

    fn copy_mnemonic(&mut self, cx: &mut Context<Self>) {
        let Some(mnemonic) = &self.mnemonic else {
            return;
        };
        cx.write_to_clipboard(ClipboardItem::new_string(mnemonic.to_string()));
        self.copied = true;
        self.copied_epoch = self.copied_epoch.wrapping_add(1);
        cx.notify();

        let epoch = self.copied_epoch;
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(COPIED_RESET_AFTER).await;
            if let Some(this) = this.upgrade() {
                this.update(cx, |wizard, cx| {
                    if wizard.copied_epoch == epoch {
                        wizard.copied = false;
                        cx.notify();
                    }
                });
            }
        })
        .detach();
    }

    fn complete(&mut self, result: SetupResult, window: &mut Window, cx: &mut Context<Self>) {
        let on_complete = self.on_complete.clone();
        (on_complete)(&result, window, cx);
    }

    fn leave_restore(&mut self, cx: &mut Context<Self>) {
        self.restore_input.update(cx, |state, cx| {
            state.clear();
            cx.notify();
        });
        self.restore_error = None;
        self.go_to(WizardStep::AccountChoice, cx);
    }

    fn heading(&self, text: impl Into<SharedString>, cx: &App) -> Div {
        div()
            .text_size(tokens::text_size::step2())
            .font_weight(FontWeight::BOLD)
            .text_color(TokenKind::Text.resolve(cx))
            .child(text.into())
    }

    fn body(&self, text: impl Into<SharedString>, cx: &App) -> Div {
        div()
            .text_size(tokens::text_size::step0())
            .text_color(TokenKind::TextMuted.resolve(cx))
            .child(text.into())
    }

    fn actions(&self) -> Div {
        div()
            .flex()
            .flex_wrap()
            .justify_end()
            .gap(tokens::spacing::xs())
    }

    fn render_step(&mut self, cx: &mut Context<Self>) -> Div {
        let content = div().flex().flex_col().gap(tokens::spacing::m());

        match self.step {
            WizardStep::Features => content
                .child(self.heading(format!("Welcome to {}", self.app_name), cx))
                .when_some(self.tagline.clone(), |this, tagline| {
                    this.child(self.body(tagline, cx))
                })
                .child(self.body(
                    format!(
                        "{} works offline, syncs across your devices with end-to-end \
                         encryption, and never locks you into a cloud service. Your data \
                         lives on your hardware — fast, private, and always available.",
                        self.app_name
                    ),
                    cx,
                ))
                .child(
                    self.actions().child(
                        Button::new("wizard:features:next")
                            .text("Next")
                            .variant(ButtonVariant::Primary)
                            .on_click(cx.listener(|this, _event, _window, cx| {
                                this.go_to(WizardStep::YourData, cx);
                            })),
                    ),
                ),

            WizardStep::YourData => content
                .child(self.heading("You control your data", cx))
                .child(self.body(
                    format!(
                        "{} is local-first. Everything is stored on your device by \
                         default — nothing is sent to a server unless you choose to \
                         enable sync.",
                        self.app_name
                    ),
                    cx,
                ))
                .child(
                    self.actions()
                        .child(Button::new("wizard:your-data:back").text("Back").on_click(
                            cx.listener(|this, _event, _window, cx| {
                                this.go_to(WizardStep::Features, cx);
                            }),
                        ))
                        .child(
                            Button::new("wizard:your-data:next")
                                .text("Next")
                                .variant(ButtonVariant::Primary)
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.go_to(WizardStep::SyncChoice, cx);
                                })),
                        ),
                ),

            WizardStep::SyncChoice => content
                .child(self.heading("Sync across devices?", cx))
                .child(self.body(
                    "Sync uses end-to-end encryption to securely replicate your data \
                     across devices. No one else can read it — not even the sync server.",
                    cx,
                ))
                .child(self.body(
                    "Your data is tied to an identity phrase — 24 words that uniquely \
                     identify you and your data. You can change this later in Settings.",
                    cx,
                ))
                .child(
                    self.actions()
                        .child(Button::new("wizard:sync-choice:back").text("Back").on_click(
                            cx.listener(|this, _event, _window, cx| {
                                this.go_to(WizardStep::YourData, cx);
                            }),
                        ))
                        .child(
                            Button::new("wizard:sync-choice:no-sync")
                                .text("Don't Sync")
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.go_to(WizardStep::NoSyncDone, cx);
                                })),
                        )
                        .child(
                            Button::new("wizard:sync-choice:sync")
                                .text("Sync")
                                .variant(ButtonVariant::Primary)
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.go_to(WizardStep::AccountChoice, cx);
                                })),
                        ),
                ),

            WizardStep::NoSyncDone => content
                .child(self.heading("All set!", cx))
                .child(self.body(
                    "Your data will stay on this device only. If you change your mind, \
                     you can enable sync anytime from Settings.",
                    cx,
                ))
                .child(
                    self.actions()
                        .child(Button::new("wizard:no-sync-done:back").text("Back").on_click(
                            cx.listener(|this, _event, _window, cx| {
                                this.go_to(WizardStep::SyncChoice, cx);
                            }),
                        ))
                        .child(
                            Button::new("wizard:no-sync-done:done")
                                .text("Done")
                                .variant(ButtonVariant::Primary)
                                .on_click(cx.listener(|this, _event, window, cx| {
                                    this.complete(SetupResult::NoSync, window, cx);
                                })),
                        ),
                ),

            WizardStep::AccountChoice => content
                .child(self.heading("Do you have an identity phrase?", cx))
                .child(self.body(
                    format!(
                        "If you've used {} on another device, enter your existing \
                         identity phrase to access your data. Otherwise, we'll create a \
                         new one for you.",
                        self.app_name
                    ),
                    cx,
                ))
                .child(
                    self.actions()
                        .child(
                            Button::new("wizard:account-choice:back").text("Back").on_click(
                                cx.listener(|this, _event, _window, cx| {
                                    this.go_to(WizardStep::SyncChoice, cx);
                                }),
                            ),
                        )
                        .child(
                            Button::new("wizard:account-choice:restore")
                                .text("I have one")
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.go_to(WizardStep::Restore, cx);
                                })),
                        )
                        .child(
                            Button::new("wizard:account-choice:create")
                                .text("Create new")
                                .variant(ButtonVariant::Primary)
                                .on_click(cx.listener(|this, _event, _window, cx| {
                                    this.handle_new_account(cx);
                                })),
                        ),
                ),

            WizardStep::Restore => {
                let error_color = TokenKind::Error.resolve(cx);
                content
                    .child(self.heading("Enter your identity phrase", cx))
                    .child(self.body(
                        "Enter your 24-word identity phrase to access your data and sync \
                         across devices.",
                        cx,
                    ))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(tokens::spacing::xs())
                            .on_key_down(cx.listener(|this, _event: &KeyDownEvent, _window, cx| {
                                // Typing clears the inline error.
                                if this.restore_error.take().is_some() {
                                    cx.notify();
                                }
                            }))
                            .child(
                                Input::new("wizard:restore:input", self.restore_input.clone())
                                    .masked(!self.show_mnemonic)
                                    .placeholder("Enter your 24-word identity phrase...")
                                    .w_full(),
                            )
                            .child(
                                Button::new("wizard:restore:toggle")
                                    .text(if self.show_mnemonic { "Hide" } else { "Show" })
                                    .on_click(cx.listener(|this, _event, _window, cx| {
                                        this.show_mnemonic = !this.show_mnemonic;
                                        cx.notify();
                                    })),
                            ),
                    )
                    .when_some(self.restore_error.clone(), |this, message| {
                        this.child(
                            div()
                                .text_size(tokens::text_size::step_minus1())
                                .text_color(error_color)
                                .child(message),
                        )
                    })
                    .child(
                        self.actions()
                            .child(Button::new("wizard:restore:back").text("Back").on_click(
                                cx.listener(|this, _event, _window, cx| {
                                    this.leave_restore(cx);
                                }),
                            ))
                            .child(
                                Button::new("wizard:restore:done")
                                    .text("Done")
                                    .variant(ButtonVariant::Primary)
                                    .on_click(cx.listener(|this, _event, window, cx| {
                                        this.handle_restore(window, cx);
                                    })),
                            ),
                    )
            }

            WizardStep::NewAccount => {
                let has_mnemonic = self.mnemonic.is_some();
                content
                    .child(self.heading("Here's your identity phrase", cx))
                    .child(self.body(
                        if has_mnemonic {
                            "This is the key to your data — treat it like a password. Save \
                             it somewhere safe. You'll need it to access your data on \
                             other devices."
                        } else {
                            "This is the key to your data — treat it like a password. You \
                             can find your identity phrase in Settings. Save it somewhere \
                             safe — you'll need it to access your data on other devices."
                        },
                        cx,
                    ))
                    .when_some(self.mnemonic.clone(), |this, mnemonic| {
                        this.child(
                            div()
                                .flex()
                                .flex_col()
                                .gap(tokens::spacing::xs())
                                .p(tokens::spacing::s())
                                .child(
                                    squircle()
                                        .absolute_expand()
                                        .rounded(px(6.))
                                        .bg(TokenKind::ElementBackground.resolve(cx))
                                        .border(px(1.))
                                        .border_inside()
                                        .border_color(TokenKind::Border.resolve(cx)),
                                )
                                .child(
                                    div()
                                        .text_size(tokens::text_size::step_minus1())
                                        .text_color(TokenKind::Text.resolve(cx))
                                        .child(mnemonic),
                                )
                                .child(
                                    Button::new("wizard:new-account:copy")
                                        .text(if self.copied { "Copied!" } else { "Copy" })
                                        .on_click(cx.listener(|this, _event, _window, cx| {
                                            this.copy_mnemonic(cx);
                                        })),
                                ),
                        )
                    })
                    .child(
                        self.actions()
                            .child(
                                Button::new("wizard:new-account:back").text("Back").on_click(
                                    cx.listener(|this, _event, _window, cx| {
                                        this.go_to(WizardStep::AccountChoice, cx);
                                    }),
                                ),
                            )
                            .child(
                                Button::new("wizard:new-account:done")
                                    .text("Done!")
                                    .variant(ButtonVariant::Primary)
                                    .on_click(cx.listener(|this, _event, window, cx| {
                                        this.complete(
                                            SetupResult::Sync {
                                                restored_mnemonic: None,
                                            },
                                            window,
                                            cx,
                                        );
                                    })),
                            ),
                    )
            }
        }
    }
}

impl Render for SetupWizard {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let dialog = div()
            .flex()
            .flex_col()
            .gap(tokens::spacing::m())
            .w(px(448.))
            .p(tokens::spacing::xl())
            .shadow_lg()
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(px(12.))
                    .bg(TokenKind::ElevatedSurfaceBackground.resolve(cx))
                    .border(px(1.))
                    .border_inside()
                    .border_color(TokenKind::Border.resolve(cx)),
            )
            .child(self.render_step(cx));

        div()
            .absolute()
            .top_0()
            .bottom_0()
            .left_0()
            .right_0()
            .flex()
            .items_center()
            .justify_center()
            .p(tokens::spacing::m())
            .bg(rgb_a(0x000000, 0.5))
            .child(dialog)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;
    use std::cell::RefCell;

    fn wizard(cx: &mut TestAppContext) -> Entity<SetupWizard> {
        cx.update(|cx| {
            cx.new(|cx| SetupWizard::new("Elements", |_result, _window, _cx| {}, cx))
        })
    }

    #[gpui::test]
    fn test_wizard_starts_on_features(cx: &mut TestAppContext) {
        let wizard = wizard(cx);
        cx.update(|cx| {
            assert_eq!(wizard.read(cx).step(), WizardStep::Features);
        });
    }

    #[gpui::test]
    fn test_forward_and_back_edges(cx: &mut TestAppContext) {
        let wizard = wizard(cx);
        wizard.update(cx, |wizard, cx| {
            wizard.go_to(WizardStep::YourData, cx);
            wizard.go_to(WizardStep::SyncChoice, cx);
            wizard.go_to(WizardStep::AccountChoice, cx);
            wizard.go_to(WizardStep::Restore, cx);
            assert_eq!(wizard.step(), WizardStep::Restore);

            // Back is a direct reverse edge, not a history pop.
            wizard.leave_restore(cx);
            assert_eq!(wizard.step(), WizardStep::AccountChoice);
            wizard.go_to(WizardStep::SyncChoice, cx);
            assert_eq!(wizard.step(), WizardStep::SyncChoice);
        });
    }

    #[gpui::test]
    fn test_restore_rejects_empty_input(cx: &mut TestAppContext) {
        let wizard = wizard(cx);
        wizard.update(cx, |wizard, _cx| {
            let result = wizard.validate_restore("   ");
            assert_eq!(
                result.unwrap_err().as_ref(),
                "Please enter your identity phrase."
            );
        });
    }

    #[gpui::test]
    fn test_restore_rejects_invalid_input(cx: &mut TestAppContext) {
        let wizard = cx.update(|cx| {
            cx.new(|cx| {
                SetupWizard::new("Elements", |_result, _window, _cx| {}, cx)
                    .validate_mnemonic(|value| value.split_whitespace().count() == 24)
            })
        });
        wizard.update(cx, |wizard, _cx| {
            assert!(wizard.validate_restore("too short").is_err());

            let valid = vec!["word"; 24].join(" ");
            assert_eq!(wizard.validate_restore(&valid).unwrap().as_ref(), valid);
        });
    }

    #[gpui::test]
    fn test_restore_trims_before_validating(cx: &mut TestAppContext) {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = seen.clone();
        let wizard = cx.update(|cx| {
            cx.new(|cx| {
                SetupWizard::new("Elements", |_result, _window, _cx| {}, cx).validate_mnemonic(
                    move |value| {
                        sink.borrow_mut().push(value.to_string());
                        true
                    },
                )
            })
        });
        wizard.update(cx, |wizard, _cx| {
            let accepted = wizard.validate_restore("  phrase words  ").unwrap();
            assert_eq!(accepted.as_ref(), "phrase words");
        });
        assert_eq!(*seen.borrow(), vec!["phrase words".to_string()]);
    }

    #[gpui::test]
    fn test_new_account_without_hook_advances(cx: &mut TestAppContext) {
        let wizard = wizard(cx);
        wizard.update(cx, |wizard, cx| {
            wizard.handle_new_account(cx);
            assert_eq!(wizard.step(), WizardStep::NewAccount);
            assert!(wizard.mnemonic.is_none());
        });
    }
}
