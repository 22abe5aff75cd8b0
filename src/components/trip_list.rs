//! Trip List Component
//!
//! Cards for every trip with status, dates and counts, plus the create/edit form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::commands;
use crate::components::{DeleteConfirmButton, TripForm, TripFormMode};
use crate::context::use_app_context;
use crate::models::Trip;
use crate::store::{navigate, report_error, store_remove_trip, use_app_store, AppStateStoreFields, Route};

#[component]
fn TripCard(trip: Trip, set_form: WriteSignal<Option<TripFormMode>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let status = trip.status(ctx.today);
    let range = board::format_range(trip.start_date, trip.end_date);
    let summary = format!("{} · {} items", board::trip_length_label(&trip), trip.item_count());
    let open_id = trip.id.clone();
    let delete_id = trip.id.clone();
    let image = (!trip.image_url.is_empty()).then(|| trip.image_url.clone());
    let title = trip.title.clone();

    let on_delete = move |_| {
        let id = delete_id.clone();
        spawn_local(async move {
            match commands::delete_trip(&id).await {
                Ok(()) => store_remove_trip(&store, &id),
                Err(e) => report_error(&store, e),
            }
        });
    };

    view! {
        <article class="trip-card" on:click=move |_| navigate(&store, Route::Board(open_id.clone()))>
            {image.map(|url| view! { <img class="trip-cover" src=url alt="" /> })}
            <div class="trip-card-body">
                <div class="trip-card-header">
                    <h2 class="trip-title">{title}</h2>
                    <span class=status.css_class()>{status.label()}</span>
                </div>
                <p class="trip-range">{range}</p>
                <p class="trip-summary">{summary}</p>
            </div>
            <div class="trip-card-actions">
                <button
                    class="edit-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_form.set(Some(TripFormMode::Edit(trip.clone())));
                    }
                >
                    "Edit"
                </button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
        </article>
    }
}

#[component]
pub fn TripList() -> impl IntoView {
    let store = use_app_store();
    let (form, set_form) = signal::<Option<TripFormMode>>(None);

    view! {
        <section class="trip-list">
            <div class="trip-list-header">
                <h2>"My trips"</h2>
                <button class="primary-btn" on:click=move |_| set_form.set(Some(TripFormMode::Create))>
                    "New trip"
                </button>
            </div>

            {move || form.get().map(|mode| view! {
                <TripForm mode=mode on_close=move |_| set_form.set(None) />
            })}

            {move || {
                if store.loading().get() {
                    return view! { <p class="empty-state">"Loading trips..."</p> }.into_any();
                }
                let trips = store.trips().get();
                if trips.is_empty() {
                    return view! { <p class="empty-state">"No trips yet. Create one to start planning."</p> }.into_any();
                }
                view! {
                    <div class="trip-grid">
                        {trips.into_iter().map(|trip| view! { <TripCard trip=trip set_form=set_form /> }).collect_view()}
                    </div>
                }.into_any()
            }}
        </section>
    }
}
