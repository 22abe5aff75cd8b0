//! Trip Board Frontend App
//!
//! Root component: provides the store and drag state, loads trips once the
//! backend has hydrated, and switches between the trip list and a board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DragOutcome};
use reactive_stores::Store;

use crate::board;
use crate::commands::{self, TRIPS_HYDRATED, TRIPS_LOAD_FAILED};
use crate::components::{ErrorBanner, ItineraryBoard, LogPanel, TripList, WarningBanner};
use crate::context::AppContext;
use crate::models::CommandError;
use crate::store::{
    navigate, report_error, store_set_error, store_set_trips, store_upsert_trip, AppState, AppStateStoreFields,
    AppStore, Route,
};

async fn load_trips(store: AppStore) {
    match commands::list_trips().await {
        Ok(trips) => {
            web_sys::console::log_1(&format!("[APP] Loaded {} trips", trips.len()).into());
            store_set_trips(&store, trips);
        }
        // Hydration event will trigger another load
        Err(CommandError::NotReady) => {}
        Err(e) => report_error(&store, e),
    }
}

/// Send a finished drag to the backend and take its answer
fn handle_drag_outcome(store: AppStore, outcome: DragOutcome) {
    let DragOutcome::Dropped { item_id, target } = outcome else {
        return;
    };
    let Route::Board(trip_id) = store.route().get_untracked() else {
        return;
    };
    let drop = board::drop_point(&target);
    spawn_local(async move {
        match commands::drop_item(&trip_id, &item_id, &drop).await {
            Ok(trip) => store_upsert_trip(&store, trip),
            Err(e) => report_error(&store, e),
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    provide_context(store);

    let dnd = create_dnd_signals();
    provide_context(AppContext::new(dnd, board::today()));
    bind_global_mouseup(dnd, move |outcome| handle_drag_outcome(store, outcome));

    spawn_local(async move {
        match commands::get_board_settings().await {
            Ok(settings) => store.settings().set(settings),
            Err(e) => web_sys::console::warn_1(&format!("[APP] Using default board settings: {}", e).into()),
        }

        let subscribed = commands::listen_forever(TRIPS_HYDRATED, move |_| spawn_local(load_trips(store))).await;
        if let Err(e) = subscribed {
            web_sys::console::error_1(&format!("[APP] Cannot listen for {}: {}", TRIPS_HYDRATED, e).into());
        }
        let _ = commands::listen_forever(TRIPS_LOAD_FAILED, move |payload| {
            let msg = serde_wasm_bindgen::from_value::<CommandError>(payload)
                .map(|e| e.message())
                .unwrap_or_else(|_| "Could not open the trip store".to_string());
            store.loading().set(false);
            store_set_error(&store, Some(msg));
        })
        .await;

        // Hydration may have finished before we subscribed
        if commands::is_ready().await.unwrap_or(false) {
            load_trips(store).await;
        }
    });

    let (show_logs, set_show_logs) = signal(false);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="app-title" on:click=move |_| navigate(&store, Route::Trips)>"Trip Board"</h1>
                <button class="secondary-btn" on:click=move |_| set_show_logs.update(|open| *open = !*open)>
                    "Log"
                </button>
            </header>

            <Show when=move || show_logs.get()>
                <LogPanel on_close=move |_| set_show_logs.set(false) />
            </Show>

            <ErrorBanner />
            <WarningBanner />

            <main class="main-content">
                {move || match store.route().get() {
                    Route::Trips => view! { <TripList /> }.into_any(),
                    Route::Board(trip_id) => view! { <ItineraryBoard trip_id=trip_id /> }.into_any(),
                }}
            </main>
        </div>
    }
}
