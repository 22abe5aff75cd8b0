//! Item Form Component
//!
//! Add a card to a day, or edit one. Choosing another day on edit moves the
//! card to the end of that day.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::commands;
use crate::models::{Item, ItemCategory, ItemDraft, ItemPatch, Trip};
use crate::store::{report_error, show_warning, store_upsert_trip, use_app_store};

#[derive(Clone, Debug, PartialEq)]
pub enum ItemFormTarget {
    New { day_id: String },
    Edit { day_id: String, item: Item },
}

#[component]
pub fn ItemForm(trip: Trip, target: ItemFormTarget, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();

    let (source_day, existing) = match target {
        ItemFormTarget::New { day_id } => (day_id, None),
        ItemFormTarget::Edit { day_id, item } => (day_id, Some(item)),
    };
    let heading = if existing.is_some() { "Edit item" } else { "New item" };

    let (category, set_category) = signal(
        existing
            .as_ref()
            .map(|i| i.category)
            .unwrap_or_default()
            .as_str()
            .to_string(),
    );
    let (day, set_day) = signal(source_day.clone());
    let (title, set_title) = signal(existing.as_ref().map(|i| i.title.clone()).unwrap_or_default());
    let (details, set_details) = signal(existing.as_ref().map(|i| i.details.clone()).unwrap_or_default());
    let (saving, set_saving) = signal(false);

    let day_options: Vec<(String, String)> = trip
        .days
        .iter()
        .map(|d| (d.id.clone(), format!("{} · {}", d.label, board::format_day_date(d.date))))
        .collect();
    let trip_id = trip.id.clone();
    let initial_category = category.get_untracked();
    let initial_day = source_day.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let title = title.get_untracked().trim().to_string();
        if title.is_empty() {
            show_warning(&store, "Item title is required");
            return;
        }
        let category = ItemCategory::from_value(&category.get_untracked());
        let details = details.get_untracked();
        let to_day = day.get_untracked();
        let (trip_id, source_day, existing) = (trip_id.clone(), source_day.clone(), existing.clone());
        set_saving.set(true);

        spawn_local(async move {
            let result = match existing {
                None => {
                    let draft = ItemDraft {
                        category,
                        title,
                        details,
                        icon: None,
                        color: None,
                    };
                    commands::add_item(&trip_id, &to_day, &draft).await
                }
                Some(item) => {
                    let patch = ItemPatch {
                        category: (category != item.category).then_some(category),
                        title: Some(title),
                        details: Some(details),
                        ..Default::default()
                    };
                    let to_day = (to_day != source_day).then_some(to_day.as_str());
                    commands::edit_item(&trip_id, &source_day, &item.id, &patch, to_day).await
                }
            };

            set_saving.set(false);
            match result {
                Ok(updated) => {
                    store_upsert_trip(&store, updated);
                    on_close.run(());
                }
                Err(e) => report_error(&store, e),
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <form class="modal item-form" on:submit=on_submit>
                <h3>{heading}</h3>
                <div class="form-row">
                    <label>
                        "Category"
                        <select
                            prop:value=move || category.get()
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            {ItemCategory::ALL
                                .into_iter()
                                .map(|c| {
                                    let selected = c.as_str() == initial_category;
                                    view! { <option value=c.as_str() selected=selected>{c.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Day"
                        <select
                            prop:value=move || day.get()
                            on:change=move |ev| set_day.set(event_target_value(&ev))
                        >
                            {day_options
                                .into_iter()
                                .map(|(id, text)| {
                                    let selected = id == initial_day;
                                    view! { <option value=id selected=selected>{text}</option> }
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <label>
                    "Title"
                    <input
                        type="text"
                        placeholder="Lunch at the night market"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Details"
                    <textarea
                        rows="3"
                        prop:value=move || details.get()
                        on:input=move |ev| set_details.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>"Save"</button>
                </div>
            </form>
        </div>
    }
}
