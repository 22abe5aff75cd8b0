//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! cache of what the backend last returned; it is never edited ahead of a
//! reply, so a failed command leaves nothing to undo.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::models::{BoardSettings, CommandError, Trip};

/// Which screen is showing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Trips,
    Board(String),
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All trips, ordered by start date
    pub trips: Vec<Trip>,
    /// True until the backend has loaded stored trips
    pub loading: bool,
    /// Last backend failure, shown until dismissed
    pub error: Option<String>,
    /// Transient validation message
    pub warning: Option<String>,
    /// Bumped per warning so an older timer cannot clear a newer one
    pub warning_generation: u32,
    pub route: Route,
    pub settings: BoardSettings,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Pure list helpers
// ========================

/// Replace the trip with the same id, or insert it, keeping start-date order
pub fn upsert_trip(trips: &mut Vec<Trip>, trip: Trip) {
    match trips.iter_mut().find(|t| t.id == trip.id) {
        Some(slot) => *slot = trip,
        None => trips.push(trip),
    }
    sort_trips(trips);
}

pub fn sort_trips(trips: &mut [Trip]) {
    trips.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.title.cmp(&b.title)));
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_trips(store: &AppStore, mut trips: Vec<Trip>) {
    sort_trips(&mut trips);
    store.trips().set(trips);
    store.loading().set(false);
}

/// Take a trip returned by the backend as the new truth
pub fn store_upsert_trip(store: &AppStore, trip: Trip) {
    store.trips().update(|trips| upsert_trip(trips, trip));
}

pub fn store_remove_trip(store: &AppStore, trip_id: &str) {
    store.trips().write().retain(|t| t.id != trip_id);
}

pub fn store_set_error(store: &AppStore, error: Option<String>) {
    if let Some(msg) = &error {
        web_sys::console::error_1(&format!("[STORE] {}", msg).into());
    }
    store.error().set(error);
}

pub fn navigate(store: &AppStore, route: Route) {
    store.route().set(route);
}

/// Show a warning that clears itself after the configured delay
pub fn show_warning(store: &AppStore, message: impl Into<String>) {
    let generation = store.warning_generation().get_untracked().wrapping_add(1);
    store.warning_generation().set(generation);
    store.warning().set(Some(message.into()));

    let dismiss_ms = store.settings().get_untracked().warning_dismiss_ms;
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(dismiss_ms).await;
        if store.warning_generation().get_untracked() == generation {
            store.warning().set(None);
        }
    });
}

pub fn dismiss_warning(store: &AppStore) {
    store.warning().set(None);
}

/// Route a failed command: validation becomes a warning, a vanished trip
/// sends the user back to the list, anything else is stored as the error.
pub fn report_error(store: &AppStore, err: CommandError) {
    if err.is_warning() {
        show_warning(store, err.message());
    } else if err.is_missing_trip() {
        if let Some(id) = match store.route().get_untracked() {
            Route::Board(id) => Some(id),
            Route::Trips => None,
        } {
            store_remove_trip(store, &id);
        }
        navigate(store, Route::Trips);
        show_warning(store, err.message());
    } else {
        store_set_error(store, Some(err.message()));
    }
}
