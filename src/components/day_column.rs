//! Day Column Component
//!
//! A drop container for one day: editable label, capacity counter, cards,
//! and an empty-day placeholder.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_container_mouseenter, make_on_container_mouseleave, DropTarget};

use crate::board;
use crate::commands;
use crate::components::{DeleteConfirmButton, ItemCard};
use crate::context::use_app_context;
use crate::models::{Day, DayPatch, Item};
use crate::store::{report_error, store_upsert_trip, use_app_store, AppStateStoreFields};

#[component]
pub fn DayColumn(
    trip_id: String,
    day: Day,
    /// Only the first and last day can be removed
    removable: bool,
    #[prop(into)] on_add_item: Callback<String>,
    #[prop(into)] on_edit_item: Callback<(String, Item)>,
) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;

    let settings = store.settings().get_untracked();
    let full = board::is_day_full(&day, &settings);
    let capacity = board::capacity_label(&day, &settings);
    let date_text = board::format_day_date(day.date);

    let day_id = day.id.clone();
    let container = DropTarget::Container(day_id.clone());
    let is_target = move || dnd.is_target(&container);
    let on_enter = make_on_container_mouseenter(dnd, day_id.clone());
    let on_leave = make_on_container_mouseleave(dnd);

    // Label editing
    let (editing, set_editing) = signal(false);
    let (label, set_label) = signal(day.label.clone());
    let save_label = {
        let trip_id = trip_id.clone();
        let day_id = day_id.clone();
        let original = day.label.clone();
        move || {
            if !editing.get_untracked() {
                return;
            }
            set_editing.set(false);
            let new_label = label.get_untracked().trim().to_string();
            if new_label.is_empty() || new_label == original {
                set_label.set(original.clone());
                return;
            }
            let (trip_id, day_id) = (trip_id.clone(), day_id.clone());
            spawn_local(async move {
                let patch = DayPatch { label: Some(new_label) };
                match commands::update_day(&trip_id, &day_id, &patch).await {
                    Ok(trip) => store_upsert_trip(&store, trip),
                    Err(e) => report_error(&store, e),
                }
            });
        }
    };
    let save_on_key = save_label.clone();

    let delete_day = {
        let trip_id = trip_id.clone();
        let day_id = day_id.clone();
        move |_: ()| {
            let (trip_id, day_id) = (trip_id.clone(), day_id.clone());
            spawn_local(async move {
                match commands::delete_day(&trip_id, &day_id).await {
                    Ok(trip) => store_upsert_trip(&store, trip),
                    Err(e) => report_error(&store, e),
                }
            });
        }
    };

    let add_day_id = day_id.clone();
    let edit_day_id = day_id.clone();
    let on_edit = Callback::new(move |item: Item| on_edit_item.run((edit_day_id.clone(), item)));

    let cards = if day.items.is_empty() {
        view! { <div class="drop-placeholder">"Drop here"</div> }.into_any()
    } else {
        day.items
            .into_iter()
            .map(|item| view! {
                <ItemCard trip_id=trip_id.clone() day_id=day_id.clone() item=item on_edit=on_edit />
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div
            class="day-column"
            class:drop-target=is_target
            class:full=full
            on:mouseenter=on_enter
            on:mouseleave=on_leave
        >
            <div class="day-header">
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <span class="day-label" title="Click to rename" on:click=move |_| set_editing.set(true)>
                            {move || label.get()}
                        </span>
                    }
                >
                    <input
                        class="day-label-input"
                        type="text"
                        prop:value=move || label.get()
                        on:input=move |ev| set_label.set(event_target_value(&ev))
                        on:blur={
                            let save = save_label.clone();
                            move |_| save()
                        }
                        on:keydown={
                            let save = save_on_key.clone();
                            move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    save();
                                }
                            }
                        }
                    />
                </Show>
                <span class="day-date">{date_text}</span>
                <span class="day-capacity">{capacity}</span>
                {removable.then(|| view! {
                    <DeleteConfirmButton button_class="day-delete-btn" prompt="Remove day?" on_confirm=delete_day />
                })}
            </div>

            <div class="day-items">{cards}</div>

            <button
                class="add-item-btn"
                disabled=full
                title=if full { "This day is full" } else { "Add an itinerary item" }
                on:click=move |_| on_add_item.run(add_day_id.clone())
            >
                "+ Add item"
            </button>
        </div>
    }
}
