//! Local-first store boundary.
//!
//! The replicated store itself — CRDT engine, transports, encryption — lives
//! outside this crate. Components consume one settings row, an owner
//! identity, and a reactive query subscription through [`SettingsStore`];
//! [`MemoryDb`] backs the demo and tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::theme::KeyValueStore;

/// Whether the store replicates to other devices or stays on this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Enabled,
    LocalOnly,
}

impl SyncMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncMode::Enabled => "enabled",
            SyncMode::LocalOnly => "local-only",
        }
    }
}

/// Reads the persisted sync mode; anything missing or unknown means
/// [`SyncMode::Enabled`].
pub fn sync_mode(store: &dyn KeyValueStore, key: &str) -> SyncMode {
    match store.get(key).as_deref() {
        Some("local-only") => SyncMode::LocalOnly,
        _ => SyncMode::Enabled,
    }
}

pub fn set_sync_mode(store: &dyn KeyValueStore, key: &str, mode: SyncMode) {
    store.set(key, mode.as_str());
}

/// Identifier of the settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsId(pub String);

/// The single settings row the components read and write.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub id: SettingsId,
    pub page_title: Option<String>,
}

/// The store's owner identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub mnemonic: String,
}

/// Reactive access to the settings row and owner identity.
pub trait SettingsStore {
    /// The settings row, if one was created.
    fn settings(&self) -> Option<Settings>;

    /// Creates the settings row. A second insert is ignored.
    fn insert_settings(&self, page_title: Option<String>);

    fn update_page_title(&self, id: &SettingsId, title: &str);

    fn owner(&self) -> Option<Owner>;

    fn restore_owner(&self, mnemonic: &str);

    fn reset_owner(&self);

    /// Registers a listener fired after every committed write. Dropping the
    /// returned guard unsubscribes.
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> StoreSubscription;
}

type Listener = Rc<RefCell<dyn FnMut()>>;

struct DbState {
    settings: Option<Settings>,
    owner: Option<Owner>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    next_row_id: u64,
}

/// In-memory [`SettingsStore`] with synchronous writes and listener fan-out.
#[derive(Clone)]
pub struct MemoryDb {
    state: Rc<RefCell<DbState>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(DbState {
                settings: None,
                owner: None,
                listeners: Vec::new(),
                next_listener_id: 0,
                next_row_id: 0,
            })),
        }
    }

    pub fn with_owner(mnemonic: impl Into<String>) -> Self {
        let db = Self::new();
        db.state.borrow_mut().owner = Some(Owner {
            mnemonic: mnemonic.into(),
        });
        db
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = {
            let state = self.state.borrow();
            state.listeners.iter().map(|(_, listener)| listener.clone()).collect()
        };
        for listener in listeners {
            (listener.borrow_mut())();
        }
    }
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemoryDb {
    fn settings(&self) -> Option<Settings> {
        self.state.borrow().settings.clone()
    }

    fn insert_settings(&self, page_title: Option<String>) {
        {
            let mut state = self.state.borrow_mut();
            if state.settings.is_some() {
                return;
            }
            let id = SettingsId(format!("settings-{}", state.next_row_id));
            state.next_row_id += 1;
            state.settings = Some(Settings { id, page_title });
        }
        self.notify();
    }

    fn update_page_title(&self, id: &SettingsId, title: &str) {
        {
            let mut state = self.state.borrow_mut();
            match &mut state.settings {
                Some(settings) if settings.id == *id => {
                    settings.page_title = Some(title.to_string());
                }
                _ => return,
            }
        }
        self.notify();
    }

    fn owner(&self) -> Option<Owner> {
        self.state.borrow().owner.clone()
    }

    fn restore_owner(&self, mnemonic: &str) {
        self.state.borrow_mut().owner = Some(Owner {
            mnemonic: mnemonic.to_string(),
        });
        self.notify();
    }

    fn reset_owner(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.owner = None;
            state.settings = None;
        }
        self.notify();
    }

    fn subscribe(&self, listener: Box<dyn FnMut()>) -> StoreSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push((id, Rc::new(RefCell::new(listener))));
        StoreSubscription {
            state: Rc::downgrade(&self.state),
            id,
        }
    }
}

/// Guard for a [`SettingsStore::subscribe`] registration.
pub struct StoreSubscription {
    state: Weak<RefCell<DbState>>,
    id: u64,
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
