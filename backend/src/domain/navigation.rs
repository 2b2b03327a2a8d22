use crate::state::Store;
use shared::Screen;

/// Screen-navigation state machine.
///
/// One current/previous pair: navigating records where we came from, going
/// back pops to it (or the dashboard when there is nothing to pop to).
/// Navigation is transient state and never persisted.
#[derive(Clone)]
pub struct Navigator {
    store: Store,
}

impl Navigator {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn current_screen(&self) -> Screen {
        self.store.read(|state| state.ui.current_screen)
    }

    pub fn go_to(&self, screen: Screen) {
        self.store.update(|state| {
            state.ui.previous_screen = Some(state.ui.current_screen);
            state.ui.current_screen = screen;
        });
    }

    /// Return to the previous screen, falling back to the dashboard.
    pub fn go_back(&self) {
        self.store.update(|state| {
            state.ui.current_screen = state.ui.previous_screen.unwrap_or(Screen::Dashboard);
            state.ui.previous_screen = None;
        });
    }

    pub fn select_jamiya(&self, jamiya_id: Option<String>) {
        self.store
            .update(|state| state.ui.selected_jamiya_id = jamiya_id);
    }

    pub fn select_booking(&self, booking_id: Option<String>) {
        self.store
            .update(|state| state.ui.selected_booking_id = booking_id);
    }

    pub fn set_loading(&self, loading: bool) {
        self.store.update(|state| state.ui.is_loading = loading);
    }
}
