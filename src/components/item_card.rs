//! Item Card Component
//!
//! A draggable itinerary card. Click opens the editor unless a drag just ended.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_item_mouseenter, make_on_item_mouseleave, make_on_mousedown, DropTarget};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{Item, ItemCategory};
use crate::store::{report_error, store_upsert_trip, use_app_store};

fn category_glyph(category: ItemCategory) -> &'static str {
    match category {
        ItemCategory::Flight => "✈",
        ItemCategory::Transportation => "🚆",
        ItemCategory::Hotel => "🛏",
        ItemCategory::Meal => "🍴",
        ItemCategory::Activity => "📍",
        ItemCategory::Shopping => "🛍",
        ItemCategory::Note => "📝",
        ItemCategory::Other => "•",
    }
}

#[component]
pub fn ItemCard(
    trip_id: String,
    day_id: String,
    item: Item,
    #[prop(into)] on_edit: Callback<Item>,
) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_app_context().dnd;

    let item_id = item.id.clone();
    let on_mousedown = make_on_mousedown(dnd, item_id.clone());
    let on_enter = make_on_item_mouseenter(dnd, item_id.clone());
    let on_leave = make_on_item_mouseleave(dnd, day_id.clone());

    let drag_id = item_id.clone();
    let is_dragging = move || dnd.dragging_id().as_deref() == Some(drag_id.as_str());
    let target = DropTarget::Item(item_id.clone());
    let is_target = move || dnd.is_target(&target);

    let on_click = {
        let item = item.clone();
        move |_| {
            // Ignore the click that ends a drag
            if !dnd.drag_just_ended_read.get_untracked() {
                on_edit.run(item.clone());
            }
        }
    };

    let on_delete = move |_: ()| {
        let (trip_id, day_id, item_id) = (trip_id.clone(), day_id.clone(), item_id.clone());
        spawn_local(async move {
            match commands::delete_item(&trip_id, &day_id, &item_id).await {
                Ok(trip) => store_upsert_trip(&store, trip),
                Err(e) => report_error(&store, e),
            }
        });
    };

    let details = (!item.details.trim().is_empty()).then(|| item.details.clone());

    view! {
        <div
            class="item-card"
            class:dragging=is_dragging
            class:drop-before=is_target
            data-color=item.color.clone()
            on:mousedown=on_mousedown
            on:mouseenter=on_enter
            on:mouseleave=on_leave
            on:click=on_click
        >
            <span class="item-icon" data-icon=item.icon.clone()>{category_glyph(item.category)}</span>
            <div class="item-body">
                <span class="item-category">{item.category.label()}</span>
                <span class="item-title">{item.title.clone()}</span>
                {details.map(|text| view! { <p class="item-details">{text}</p> })}
            </div>
            <DeleteConfirmButton button_class="item-delete-btn" on_confirm=on_delete />
        </div>
    }
}
