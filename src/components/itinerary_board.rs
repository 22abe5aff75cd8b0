//! Itinerary Board Component
//!
//! One column per day. Cards are dragged with the mouse; the drop itself is
//! handled by the root drag listener, which sends it to the backend.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::commands;
use crate::components::{DayColumn, ItemForm, ItemFormTarget};
use crate::models::Item;
use crate::store::{navigate, report_error, show_warning, store_upsert_trip, use_app_store, AppStateStoreFields, Route};

#[component]
pub fn ItineraryBoard(trip_id: String) -> impl IntoView {
    let store = use_app_store();
    let (item_form, set_item_form) = signal::<Option<ItemFormTarget>>(None);

    let memo_id = trip_id.clone();
    let trip = Memo::new(move |_| {
        store
            .trips()
            .with(|trips| trips.iter().find(|t| t.id == memo_id).cloned())
    });

    // Refresh from the backend; NotFound sends us back to the list
    spawn_local(async move {
        match commands::get_trip(&trip_id).await {
            Ok(fresh) => store_upsert_trip(&store, fresh),
            Err(e) => report_error(&store, e),
        }
    });

    Effect::new(move |_| {
        if !store.loading().get() && trip.with(|t| t.is_none()) {
            web_sys::console::log_1(&"[BOARD] Trip missing, back to list".into());
            navigate(&store, Route::Trips);
            show_warning(&store, "That trip no longer exists");
        }
    });

    let add_day = move |before: bool| {
        let Some(current) = trip.get_untracked() else {
            return;
        };
        let (day_before, day_after) = board::extension_dates(&current);
        let Some(date) = (if before { day_before } else { day_after }) else {
            show_warning(&store, "The calendar ends here");
            return;
        };
        spawn_local(async move {
            match commands::add_day(&current.id, date).await {
                Ok(updated) => store_upsert_trip(&store, updated),
                Err(e) => report_error(&store, e),
            }
        });
    };

    let on_add_item = Callback::new(move |day_id: String| set_item_form.set(Some(ItemFormTarget::New { day_id })));
    let on_edit_item = Callback::new(move |(day_id, item): (String, Item)| {
        set_item_form.set(Some(ItemFormTarget::Edit { day_id, item }))
    });

    view! {
        <section class="board">
            <div class="board-header">
                <button class="back-btn" on:click=move |_| navigate(&store, Route::Trips)>"← Trips"</button>
                {move || trip.get().map(|t| view! {
                    <div class="board-title">
                        <h2>{t.title.clone()}</h2>
                        <span class="trip-range">{board::format_range(t.start_date, t.end_date)}</span>
                    </div>
                })}
                <div class="board-actions">
                    <button class="secondary-btn" on:click=move |_| add_day(true)>"+ Day before"</button>
                    <button class="secondary-btn" on:click=move |_| add_day(false)>"+ Day after"</button>
                </div>
            </div>

            <div class="board-columns">
                {move || trip.get().map(|t| {
                    let day_count = t.days.len();
                    let trip_id = t.id.clone();
                    t.days
                        .into_iter()
                        .enumerate()
                        .map(|(index, day)| {
                            let removable = day_count > 1 && (index == 0 || index + 1 == day_count);
                            view! {
                                <DayColumn
                                    trip_id=trip_id.clone()
                                    day=day
                                    removable=removable
                                    on_add_item=on_add_item
                                    on_edit_item=on_edit_item
                                />
                            }
                        })
                        .collect_view()
                })}
            </div>

            {move || match (item_form.get(), trip.get()) {
                (Some(target), Some(t)) => Some(view! {
                    <ItemForm trip=t target=target on_close=move |_| set_item_form.set(None) />
                }),
                _ => None,
            }}
        </section>
    }
}
