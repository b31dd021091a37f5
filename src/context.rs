/// Page-wide state shared by every widget: the colour theme and the
/// readiness of the external player API. Widgets hold a cloned handle
/// and learn about changes through `PageContext::subscribe`.
use crate::domain::ColorTheme;
use crate::persistence::{load_record, persist_quietly, SharedStore, COLOR_THEME_KEY};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

/// Loading state of the player API. It is requested at most once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerApiState {
    NotRequested,
    Loading,
    Ready,
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextEvent {
    ThemeChanged(ColorTheme),
    PlayerApiReady,
    PlayerApiUnavailable(String),
}

#[derive(Debug)]
struct ContextState {
    theme: ColorTheme,
    player_api: PlayerApiState,
    subscribers: Vec<Sender<ContextEvent>>,
}

impl ContextState {
    fn broadcast(&mut self, event: ContextEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

fn lock(state: &Mutex<ContextState>) -> MutexGuard<'_, ContextState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone)]
pub struct PageContext {
    state: Arc<Mutex<ContextState>>,
    store: SharedStore,
}

impl PageContext {
    pub fn new(theme: ColorTheme, store: SharedStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(ContextState {
                theme,
                player_api: PlayerApiState::NotRequested,
                subscribers: Vec::new(),
            })),
            store,
        }
    }

    /// Build the context from the stored theme (default when missing or invalid)
    pub fn load(store: SharedStore) -> Self {
        let theme: ColorTheme = load_record(store.as_ref(), COLOR_THEME_KEY);
        Self::new(theme, store)
    }

    pub fn theme(&self) -> ColorTheme {
        lock(&self.state).theme
    }

    pub fn set_theme(&self, theme: ColorTheme) {
        persist_quietly(self.store.as_ref(), COLOR_THEME_KEY, &theme);
        let mut state = lock(&self.state);
        if state.theme != theme {
            state.theme = theme;
            state.broadcast(ContextEvent::ThemeChanged(theme));
        }
        tracing::info!("Theme set to {}", theme);
    }

    pub fn player_api(&self) -> PlayerApiState {
        lock(&self.state).player_api.clone()
    }

    pub fn is_player_api_ready(&self) -> bool {
        lock(&self.state).player_api == PlayerApiState::Ready
    }

    /// Start loading the player API. Only the first call runs `loader`;
    /// later calls return false and leave the state alone.
    pub fn request_player_api<F>(&self, loader: F) -> bool
    where
        F: FnOnce(ReadySignal),
    {
        {
            let mut state = lock(&self.state);
            if state.player_api != PlayerApiState::NotRequested {
                return false;
            }
            state.player_api = PlayerApiState::Loading;
        }
        tracing::debug!("Loading player API");
        loader(ReadySignal {
            state: Arc::clone(&self.state),
        });
        true
    }

    /// Receive every later context change
    pub fn subscribe(&self) -> Receiver<ContextEvent> {
        let (tx, rx) = mpsc::channel();
        lock(&self.state).subscribers.push(tx);
        rx
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).subscribers.len()
    }
}

/// Handed to the player API loader; resolves the loading state from any thread
pub struct ReadySignal {
    state: Arc<Mutex<ContextState>>,
}

impl ReadySignal {
    pub fn ready(self) {
        let mut state = lock(&self.state);
        if state.player_api == PlayerApiState::Loading {
            state.player_api = PlayerApiState::Ready;
            state.broadcast(ContextEvent::PlayerApiReady);
            tracing::info!("Player API ready");
        }
    }

    pub fn unavailable(self, reason: String) {
        let mut state = lock(&self.state);
        if state.player_api == PlayerApiState::Loading {
            tracing::warn!("Player API unavailable: {}", reason);
            state.player_api = PlayerApiState::Unavailable(reason.clone());
            state.broadcast(ContextEvent::PlayerApiUnavailable(reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::thread;

    #[test]
    fn test_theme_loads_with_fallback() {
        let store = MemoryStore::shared();
        store.put_raw(COLOR_THEME_KEY, "\"violet\"");
        assert_eq!(PageContext::load(store.clone()).theme(), ColorTheme::Violet);

        store.put_raw(COLOR_THEME_KEY, "\"chartreuse\"");
        assert_eq!(PageContext::load(store).theme(), ColorTheme::Green);
    }

    #[test]
    fn test_set_theme_persists_and_notifies() {
        let store = MemoryStore::shared();
        let ctx = PageContext::load(store.clone());
        let rx = ctx.subscribe();

        ctx.set_theme(ColorTheme::Amber);

        assert_eq!(ctx.theme(), ColorTheme::Amber);
        assert_eq!(store.raw(COLOR_THEME_KEY).as_deref(), Some("\"amber\""));
        assert_eq!(rx.try_recv(), Ok(ContextEvent::ThemeChanged(ColorTheme::Amber)));
    }

    #[test]
    fn test_player_api_requested_once() {
        let ctx = PageContext::load(MemoryStore::shared());
        let calls = Cell::new(0);

        assert!(ctx.request_player_api(|_signal| calls.set(calls.get() + 1)));
        assert!(!ctx.request_player_api(|_signal| calls.set(calls.get() + 1)));

        assert_eq!(calls.get(), 1);
        assert_eq!(ctx.player_api(), PlayerApiState::Loading);
    }

    #[test]
    fn test_ready_signal_from_another_thread() {
        let ctx = PageContext::load(MemoryStore::shared());
        let first = ctx.subscribe();
        let second = ctx.clone().subscribe();

        ctx.request_player_api(|signal| {
            thread::spawn(move || signal.ready()).join().unwrap();
        });

        assert!(ctx.is_player_api_ready());
        assert_eq!(first.try_recv(), Ok(ContextEvent::PlayerApiReady));
        assert_eq!(second.try_recv(), Ok(ContextEvent::PlayerApiReady));
    }

    #[test]
    fn test_unavailable_is_reported() {
        let ctx = PageContext::load(MemoryStore::shared());
        let rx = ctx.subscribe();

        ctx.request_player_api(|signal| signal.unavailable("mpv not found".to_string()));

        assert_eq!(ctx.player_api(), PlayerApiState::Unavailable("mpv not found".to_string()));
        assert_eq!(
            rx.try_recv(),
            Ok(ContextEvent::PlayerApiUnavailable("mpv not found".to_string()))
        );
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let ctx = PageContext::load(MemoryStore::shared());
        drop(ctx.subscribe());
        ctx.set_theme(ColorTheme::Rose);
        assert!(lock(&ctx.state).subscribers.is_empty());
    }
}
