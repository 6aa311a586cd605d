use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(bool)>>;

struct PreferenceState {
    detector: Box<dyn Fn() -> bool>,
    last: bool,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// The OS "prefers dark" signal with change notifications.
///
/// The production detector wraps [`dark_light::detect`]; tests inject their
/// own detector and drive [`SystemPreference::poll`] by hand. Hosts are
/// expected to call `poll` from their event loop — the signal itself carries
/// no timer.
///
/// Clones share one listener registry, so a single instance can be handed to
/// both the theme manager and the polling task.
#[derive(Clone)]
pub struct SystemPreference {
    state: Rc<RefCell<PreferenceState>>,
}

impl SystemPreference {
    /// Creates a preference signal backed by OS theme detection.
    pub fn new() -> Self {
        Self::with_detector(os_prefers_dark)
    }

    /// Creates a preference signal with a custom detector.
    pub fn with_detector(detector: impl Fn() -> bool + 'static) -> Self {
        let last = detector();
        Self {
            state: Rc::new(RefCell::new(PreferenceState {
                detector: Box::new(detector),
                last,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Reads the current preference straight from the detector.
    pub fn prefers_dark(&self) -> bool {
        (self.state.borrow().detector)()
    }

    /// Registers a change listener.
    ///
    /// The listener fires on every observed flip until the returned guard is
    /// dropped. Callers keep at most one live subscription per applied theme;
    /// the discipline is by convention, not enforced here.
    pub fn subscribe(&self, listener: impl FnMut(bool) + 'static) -> PreferenceGuard {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, Rc::new(RefCell::new(listener))));
        PreferenceGuard {
            state: Rc::downgrade(&self.state),
            id,
        }
    }

    /// Re-reads the detector and notifies listeners if the value changed
    /// since the last observation.
    pub fn poll(&self) {
        let current = self.prefers_dark();
        let fired: Vec<Listener> = {
            let mut state = self.state.borrow_mut();
            if current == state.last {
                return;
            }
            state.last = current;
            state.listeners.iter().map(|(_, listener)| listener.clone()).collect()
        };
        for listener in fired {
            (listener.borrow_mut())(current);
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl Default for SystemPreference {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription handle returned by [`SystemPreference::subscribe`].
/// Dropping it unsubscribes the listener.
pub struct PreferenceGuard {
    state: Weak<RefCell<PreferenceState>>,
    id: u64,
}

impl Drop for PreferenceGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

fn os_prefers_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}
