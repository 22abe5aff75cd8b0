//! Trip Form Component
//!
//! Create or edit a trip. Narrowing the dates of an existing trip first asks
//! the backend what would be dropped and requires a second save to confirm.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::commands;
use crate::models::{Trip, TripDraft};
use crate::store::{report_error, show_warning, store_upsert_trip, use_app_store};

#[derive(Clone, Debug, PartialEq)]
pub enum TripFormMode {
    Create,
    Edit(Trip),
}

#[component]
pub fn TripForm(mode: TripFormMode, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();

    let (existing, initial) = match &mode {
        TripFormMode::Create => {
            let today = board::today();
            (None, (String::new(), today, today, String::new()))
        }
        TripFormMode::Edit(trip) => (
            Some(trip.clone()),
            (trip.title.clone(), trip.start_date, trip.end_date, trip.image_url.clone()),
        ),
    };
    let heading = if existing.is_some() { "Edit trip" } else { "New trip" };

    let (title, set_title) = signal(initial.0);
    let (start, set_start) = signal(board::input_date(initial.1));
    let (end, set_end) = signal(board::input_date(initial.2));
    let (image_url, set_image_url) = signal(initial.3);
    let (confirm_msg, set_confirm_msg) = signal::<Option<String>>(None);
    // Range the user already agreed to narrow to
    let (confirmed, set_confirmed) = signal::<Option<(NaiveDate, NaiveDate)>>(None);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let title = title.get_untracked();
        let (Some(start_date), Some(end_date)) = (
            board::parse_input_date(&start.get_untracked()),
            board::parse_input_date(&end.get_untracked()),
        ) else {
            show_warning(&store, "Please pick both dates");
            return;
        };
        if title.trim().is_empty() {
            show_warning(&store, "Trip title is required");
            return;
        }
        if start_date > end_date {
            show_warning(&store, "Start date must not be after end date");
            return;
        }

        let draft = TripDraft {
            title: title.trim().to_string(),
            start_date,
            end_date,
            image_url: image_url.get_untracked().trim().to_string(),
        };
        let existing = existing.clone();
        set_saving.set(true);

        spawn_local(async move {
            let result = match existing {
                None => commands::create_trip(&draft).await,
                Some(trip) => {
                    let range_changed = trip.start_date != start_date || trip.end_date != end_date;
                    if range_changed && confirmed.get_untracked() != Some((start_date, end_date)) {
                        match commands::preview_date_change(&trip.id, start_date, end_date).await {
                            Ok(preview) => {
                                if let Some(msg) = board::narrowing_warning(preview.days_removed, preview.items_removed) {
                                    set_confirm_msg.set(Some(msg));
                                    set_confirmed.set(Some((start_date, end_date)));
                                    set_saving.set(false);
                                    return;
                                }
                            }
                            Err(e) => {
                                report_error(&store, e);
                                set_saving.set(false);
                                return;
                            }
                        }
                    }
                    commands::update_trip(&trip.id, &draft).await
                }
            };

            set_saving.set(false);
            match result {
                Ok(trip) => {
                    store_upsert_trip(&store, trip);
                    on_close.run(());
                }
                Err(e) => report_error(&store, e),
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <form class="modal trip-form" on:submit=on_submit>
                <h3>{heading}</h3>
                <label>
                    "Title"
                    <input
                        type="text"
                        placeholder="Summer in Kyoto"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>
                <div class="form-row">
                    <label>
                        "Start"
                        <input
                            type="date"
                            prop:value=move || start.get()
                            on:input=move |ev| set_start.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "End"
                        <input
                            type="date"
                            prop:value=move || end.get()
                            on:input=move |ev| set_end.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                <label>
                    "Cover image URL"
                    <input
                        type="url"
                        placeholder="https://..."
                        prop:value=move || image_url.get()
                        on:input=move |ev| set_image_url.set(event_target_value(&ev))
                    />
                </label>

                {move || confirm_msg.get().map(|msg| view! { <p class="form-confirm">{msg}</p> })}

                <div class="form-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>"Save"</button>
                </div>
            </form>
        </div>
    }
}
