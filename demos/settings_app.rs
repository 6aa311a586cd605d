//! Demo application for the component library: a three-page settings app
//! over an in-memory local-first store, with first-run setup and theming.

use std::rc::Rc;
use std::time::Duration;

use gpui::{
    App, AppContext, Application, Bounds, Context, Entity, FocusHandle, IntoElement, ParentElement,
    Render, SharedString, Styled, Task, TitlebarOptions, Window, WindowBounds, WindowOptions,
    div, point, prelude::*, px, size,
};

use gpui_elements::{
    ElementIdExt, ElementsAssets, assets,
    components::{
        About, Button, ButtonVariant, EditableTitle, Input, Menu, MenuItem, SetupResult,
        SetupWizard, Switch, toast,
    },
    page,
    primitives::input::InputState,
    settings::{AccountSection, AppearancePicker, SyncSection, ThemePicker},
    store::{self, MemoryDb, SettingsStore, SyncMode},
    theme::{
        AppliedTheme, FileStore, RootStyleHandle, SystemPreference, ThemeManager,
        ThemeManagerConfig, ThemeStyleExt, bundled_themes, css_var_name,
    },
    tokens::{self, TokenKind},
};

const APP_NAME: &str = "Elements Demo";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const THEME_STORAGE_KEY: &str = "elements-demo-theme";
const SYNC_MODE_KEY: &str = "elements-demo-sync";
const DEFAULT_THEME_ID: &str = "bandley";
const PREFERENCE_POLL_INTERVAL: Duration = Duration::from_secs(2);

const MNEMONIC_WORDS: usize = 24;
const WORDLIST: [&str; 32] = [
    "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "harbor",
    "garden", "meadow", "lantern", "copper", "ember", "willow", "quartz", "summit", "hollow",
    "cedar", "drift", "fable", "grove", "heron", "inlet", "juniper", "kestrel", "lichen",
    "marble", "north", "orchid", "pebble", "quiver",
];

fn generate_mnemonic() -> String {
    use rand::seq::IndexedRandom;

    let mut rng = rand::rng();
    (0..MNEMONIC_WORDS)
        .map(|_| *WORDLIST.choose(&mut rng).unwrap_or(&WORDLIST[0]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn looks_like_mnemonic(value: &str) -> bool {
    value.split_whitespace().count() == MNEMONIC_WORDS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    Preferences,
    About,
}

impl Route {
    fn href(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Preferences => "/settings/preferences",
            Route::About => "/settings/about",
        }
    }

    fn from_href(href: &str) -> Option<Route> {
        match href {
            "/" => Some(Route::Home),
            "/settings" | "/settings/preferences" => Some(Route::Preferences),
            "/settings/about" => Some(Route::About),
            _ => None,
        }
    }
}

struct DemoApp {
    focus_handle: FocusHandle,
    route: Route,
    manager: Rc<ThemeManager>,
    storage: Rc<FileStore>,
    db: MemoryDb,
    title: Entity<EditableTitle>,
    wizard: Option<Entity<SetupWizard>>,
    applied: Option<AppliedTheme>,
    switch_specimen: bool,
}

impl DemoApp {
    fn new(
        manager: Rc<ThemeManager>,
        storage: Rc<FileStore>,
        applied: AppliedTheme,
        cx: &mut Context<Self>,
    ) -> Self {
        let db = MemoryDb::new();

        let title = {
            let db = db.clone();
            let this = cx.weak_entity();
            cx.new(|cx| {
                EditableTitle::new(
                    APP_NAME,
                    move |value, _window, cx| {
                        match db.settings() {
                            Some(row) => db.update_page_title(&row.id, value),
                            None => db.insert_settings(Some(value.to_string())),
                        }
                        // The title entity is mid-update here; reconcile it
                        // once this event settles.
                        let this = this.clone();
                        cx.defer(move |cx| {
                            if let Some(this) = this.upgrade() {
                                this.update(cx, |demo, cx| demo.sync_title(cx));
                            }
                        });
                    },
                    cx,
                )
            })
        };

        let wizard = if db.settings().is_none() {
            Some(Self::build_wizard(&db, &storage, cx))
        } else {
            None
        };

        // Keep applied properties following the OS preference.
        cx.spawn(async move |this, cx| {
            loop {
                cx.background_executor().timer(PREFERENCE_POLL_INTERVAL).await;
                let Some(this) = this.upgrade() else { break };
                this.update(cx, |demo, cx| {
                    demo.manager.preference().poll();
                    cx.notify();
                });
            }
        })
        .detach();

        Self {
            focus_handle: cx.focus_handle(),
            route: Route::Home,
            manager,
            storage,
            db,
            title,
            wizard,
            applied: Some(applied),
            switch_specimen: true,
        }
    }

    fn build_wizard(
        db: &MemoryDb,
        storage: &Rc<FileStore>,
        cx: &mut Context<Self>,
    ) -> Entity<SetupWizard> {
        let this = cx.weak_entity();
        let complete_db = db.clone();
        let complete_storage = storage.clone();
        let create_db = db.clone();

        cx.new(|cx| {
            SetupWizard::new(
                APP_NAME,
                move |result, _window, cx| {
                    let mode = match result {
                        SetupResult::NoSync => SyncMode::LocalOnly,
                        SetupResult::Sync { .. } => SyncMode::Enabled,
                    };
                    store::set_sync_mode(complete_storage.as_ref(), SYNC_MODE_KEY, mode);
                    if let SetupResult::Sync {
                        restored_mnemonic: Some(mnemonic),
                    } = result
                    {
                        complete_db.restore_owner(mnemonic);
                    }
                    complete_db.insert_settings(None);
                    toast(cx, "Setup complete");

                    // Dropping the wizard entity while it dispatches this
                    // callback would pull the rug out; do it after.
                    let this = this.clone();
                    cx.defer(move |cx| {
                        if let Some(this) = this.upgrade() {
                            this.update(cx, |demo, cx| {
                                demo.wizard = None;
                                demo.sync_title(cx);
                                cx.notify();
                            });
                        }
                    });
                },
                cx,
            )
            .tagline("A themable component library, demoed.")
            .validate_mnemonic(looks_like_mnemonic)
            .on_create_account(move |_cx| {
                let mnemonic = generate_mnemonic();
                create_db.restore_owner(&mnemonic);
                Task::ready(Ok(mnemonic))
            })
        })
    }

    fn sync_title(&mut self, cx: &mut Context<Self>) {
        let stored = self
            .db
            .settings()
            .and_then(|row| row.page_title)
            .map(SharedString::from);
        self.title.update(cx, |title, cx| {
            title.set_current_title(stored, cx);
        });
        cx.notify();
    }

    /// Drops the previous application before re-applying, so stale
    /// properties never survive a theme change.
    fn reapply_theme(&mut self, cx: &mut Context<Self>) {
        self.applied.take();
        self.applied = Some(self.manager.apply_selected());
        cx.notify();
    }

    fn sync_enabled(&self) -> bool {
        store::sync_mode(self.storage.as_ref(), SYNC_MODE_KEY) == SyncMode::Enabled
    }

    fn app_menu(&self, cx: &mut Context<Self>) -> Menu {
        Menu::new("app-menu")
            .items([
                MenuItem::new("Home", Route::Home.href()),
                MenuItem::new("Settings", Route::Preferences.href()),
                MenuItem::new("About", Route::About.href()),
            ])
            .current_path(self.route.href())
            .on_navigate(cx.listener(|this, href: &SharedString, _window, cx| {
                if let Some(route) = Route::from_href(href.as_ref()) {
                    this.route = route;
                    cx.notify();
                }
            }))
    }

    fn render_home(&mut self, window: &mut Window, cx: &mut Context<Self>) -> gpui::Div {
        let palette: [(TokenKind, &str); 15] = [
            (TokenKind::Background, "Page bg"),
            (TokenKind::SurfaceBackground, "Panel bg"),
            (TokenKind::ElevatedSurfaceBackground, "Dialog bg"),
            (TokenKind::Text, "Primary text"),
            (TokenKind::TextMuted, "Secondary text"),
            (TokenKind::TextPlaceholder, "Placeholder"),
            (TokenKind::TextAccent, "Accent"),
            (TokenKind::TextDisabled, "Disabled"),
            (TokenKind::Border, "Borders"),
            (TokenKind::BorderFocused, "Focus ring"),
            (TokenKind::ElementHover, "Hover bg"),
            (TokenKind::Error, "Error"),
            (TokenKind::Warning, "Warning"),
            (TokenKind::Success, "Success"),
            (TokenKind::SearchMatchBackground, "Search highlight"),
        ];

        let muted = TokenKind::TextMuted.resolve(cx);
        let disabled = TokenKind::TextDisabled.resolve(cx);
        let border = TokenKind::Border.resolve(cx);
        let text = TokenKind::Text.resolve(cx);

        let type_scale: [(gpui::Pixels, &str); 8] = [
            (tokens::text_size::step5(), "Step 5 — Display"),
            (tokens::text_size::step4(), "Step 4 — Large heading"),
            (tokens::text_size::step3(), "Step 3 — Heading"),
            (tokens::text_size::step2(), "Step 2 — Sub-heading"),
            (tokens::text_size::step1(), "Step 1 — Large body"),
            (tokens::text_size::step0(), "Step 0 — Body (base)"),
            (tokens::text_size::step_minus1(), "Step -1 — Small"),
            (tokens::text_size::step_minus2(), "Step -2 — Caption"),
        ];

        let input_state = window.use_keyed_state(
            gpui::ElementId::from("home-input").with_suffix("state"),
            cx,
            |_window, cx| InputState::new(cx),
        );

        page::page()
            .child(
                page::header()
                    .child(self.title.clone())
                    .child(self.app_menu(cx)),
            )
            .child(
                page::section(cx)
                    .child(page::section_title("Color Palette", cx))
                    .child(div().flex().flex_wrap().gap(tokens::spacing::xs()).children(
                        palette.into_iter().map(|(token, label)| {
                            div()
                                .flex()
                                .items_center()
                                .gap(tokens::spacing::xs())
                                .w(px(224.))
                                .child(
                                    div()
                                        .w(px(32.))
                                        .h(px(32.))
                                        .rounded(px(4.))
                                        .border_1()
                                        .border_color(border)
                                        .bg(token.resolve(cx)),
                                )
                                .child(
                                    div()
                                        .flex()
                                        .flex_col()
                                        .child(
                                            div()
                                                .text_size(tokens::text_size::step_minus1())
                                                .text_color(muted)
                                                .child(css_var_name(token.key())),
                                        )
                                        .child(
                                            div()
                                                .text_size(tokens::text_size::step_minus2())
                                                .text_color(disabled)
                                                .child(SharedString::from(label)),
                                        ),
                                )
                        }),
                    )),
            )
            .child(
                page::section(cx)
                    .child(page::section_title("Typography", cx))
                    .child(div().flex().flex_col().gap(tokens::spacing::xs()).children(
                        type_scale.into_iter().map(|(size, label)| {
                            div()
                                .text_size(size)
                                .text_color(text)
                                .child(SharedString::from(label))
                        }),
                    )),
            )
            .child(
                page::section(cx)
                    .child(page::section_title("Interactive Elements", cx))
                    .child(
                        div()
                            .flex()
                            .flex_wrap()
                            .gap(tokens::spacing::xs())
                            .child(
                                Button::new("home:show-toast")
                                    .text("Show Toast")
                                    .on_click(cx.listener(|_this, _event, _window, cx| {
                                        toast(cx, "Action completed");
                                    })),
                            )
                            .child(
                                Button::new("home:error-toast")
                                    .text("Error Toast")
                                    .variant(ButtonVariant::Destructive)
                                    .on_click(cx.listener(|_this, _event, _window, cx| {
                                        gpui_elements::components::toast_error(
                                            cx,
                                            "Something went wrong",
                                        );
                                    })),
                            ),
                    )
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(tokens::spacing::xs())
                            .child(
                                Input::new("home-input", input_state)
                                    .placeholder("Text input...")
                                    .w(px(240.)),
                            )
                            .child(
                                Switch::new("home:switch")
                                    .checked(self.switch_specimen)
                                    .on_click(cx.listener(|this, _event, _window, cx| {
                                        this.switch_specimen = !this.switch_specimen;
                                        cx.notify();
                                    })),
                            ),
                    ),
            )
    }

    fn render_preferences(&mut self, cx: &mut Context<Self>) -> gpui::Div {
        let sync_enabled = self.sync_enabled();

        page::page()
            .child(
                page::header()
                    .child(page::title("Settings", cx))
                    .child(self.app_menu(cx)),
            )
            .child(
                page::section(cx)
                    .child(page::section_title("Theme", cx))
                    .child(
                        ThemePicker::new("theme-picker", self.manager.config().bundled_themes.clone())
                            .active_theme_id(self.manager.selected_id())
                            .on_select(cx.listener(|this, id: &SharedString, _window, cx| {
                                this.manager.set_selected(id, None);
                                this.reapply_theme(cx);
                            })),
                    ),
            )
            .child(
                page::section(cx)
                    .child(page::section_title("Appearance", cx))
                    .child(
                        AppearancePicker::new("appearance-picker")
                            .appearance(self.manager.appearance())
                            .on_change(cx.listener(|this, appearance, _window, cx| {
                                this.manager.set_appearance(*appearance);
                                this.reapply_theme(cx);
                            })),
                    ),
            )
            .child(
                AccountSection::new("account-section")
                    .owner(self.db.owner())
                    .on_restore(cx.listener(|this, _event, _window, cx| {
                        this.db.restore_owner(&generate_mnemonic());
                        toast(cx, "Owner restored (demo)");
                        cx.notify();
                    }))
                    .on_reset(cx.listener(|this, _event, _window, cx| {
                        this.db.reset_owner();
                        this.wizard = Some(Self::build_wizard(&this.db, &this.storage, cx));
                        this.sync_title(cx);
                        toast(cx, "Owner reset (demo)");
                        cx.notify();
                    })),
            )
            .child(
                SyncSection::new("sync-section")
                    .enabled(sync_enabled)
                    .help_text("Sync uses encrypted CRDT replication for cross-device access.")
                    .on_toggle(cx.listener(move |this, _event, _window, cx| {
                        let next = if this.sync_enabled() {
                            SyncMode::LocalOnly
                        } else {
                            SyncMode::Enabled
                        };
                        store::set_sync_mode(this.storage.as_ref(), SYNC_MODE_KEY, next);
                        toast(
                            cx,
                            match next {
                                SyncMode::Enabled => "Sync enabled",
                                SyncMode::LocalOnly => "Sync disabled",
                            },
                        );
                        cx.notify();
                    })),
            )
    }

    fn render_about(&mut self, cx: &mut Context<Self>) -> About {
        About::new(
            APP_NAME,
            APP_VERSION,
            "A themable GPUI component library demo: menus, toasts, editable \
             titles, a setup wizard, and settings pickers over a local-first \
             store.",
        )
        .icon("icons/app_icon.svg")
        .menu(self.app_menu(cx))
    }
}

impl Render for DemoApp {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        gpui_elements::init_for_window(window, cx);

        let background = TokenKind::Background.resolve(cx);

        let content = match self.route {
            Route::Home => self.render_home(window, cx).into_any_element(),
            Route::Preferences => self.render_preferences(cx).into_any_element(),
            Route::About => self.render_about(cx).into_any_element(),
        };

        div()
            .id("demo-root")
            .tab_group()
            .track_focus(&self.focus_handle)
            .size_full()
            .overflow_y_scroll()
            .text_size(tokens::text_size::step0())
            .bg(background)
            .child(content)
            .children(toast::view(cx))
            .children(self.wizard.clone())
    }
}

fn main() {
    env_logger::init();

    Application::new()
        .with_quit_mode(gpui::QuitMode::LastWindowClosed)
        .with_assets(assets![ElementsAssets])
        .run(|cx: &mut App| {
            gpui_elements::init(cx);

            cx.set_menus(vec![gpui::Menu {
                name: APP_NAME.into(),
                items: vec![],
            }]);

            let storage = Rc::new(FileStore::new(
                std::env::temp_dir().join("gpui_elements_demo"),
            ));
            let root = RootStyleHandle::new();
            let preference = SystemPreference::new();
            let manager = Rc::new(ThemeManager::new(
                ThemeManagerConfig {
                    storage_key: THEME_STORAGE_KEY.into(),
                    default_theme_id: DEFAULT_THEME_ID.into(),
                    bundled_themes: bundled_themes(),
                },
                storage.clone(),
                root.clone(),
                preference,
            ));

            cx.set_root_style(root);
            let applied = manager.apply_selected();

            let bounds = Bounds::centered(None, size(px(760.), px(860.)), cx);

            cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        title: Some(APP_NAME.into()),
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(10.), px(10.))),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                |_window, cx| cx.new(|cx| DemoApp::new(manager, storage, applied, cx)),
            )
            .unwrap();

            cx.activate(true);
        });
}
