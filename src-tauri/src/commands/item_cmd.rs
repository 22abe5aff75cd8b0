//! Tauri Commands for Itinerary Items
//!
//! Every command returns the whole updated trip so the frontend can replace
//! its copy in one step.

use tauri::State;

use crate::domain::{DomainError, DropPoint, ItemDraft, ItemPatch, Trip};
use crate::AppState;

#[tauri::command]
pub async fn add_item(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    draft: ItemDraft,
) -> Result<Trip, DomainError> {
    state.service.add_item(&trip_id, &day_id, draft).await
}

#[tauri::command]
pub async fn update_item(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    item_id: String,
    patch: ItemPatch,
) -> Result<Trip, DomainError> {
    state.service.update_item(&trip_id, &day_id, &item_id, patch).await
}

/// Save the item form: patch the item and, if another day was picked, move
/// it to the end of that day. Nothing is saved when either part is refused.
#[tauri::command]
pub async fn edit_item(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    item_id: String,
    patch: ItemPatch,
    to_day_id: Option<String>,
) -> Result<Trip, DomainError> {
    state
        .service
        .edit_item(&trip_id, &day_id, &item_id, patch, to_day_id.as_deref())
        .await
}

#[tauri::command]
pub async fn delete_item(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    item_id: String,
) -> Result<Trip, DomainError> {
    state.service.delete_item(&trip_id, &day_id, &item_id).await
}

/// Move an item to a new position inside its day
#[tauri::command]
pub async fn reorder_item(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    item_id: String,
    index: usize,
) -> Result<Trip, DomainError> {
    state.service.reorder_item(&trip_id, &day_id, &item_id, index).await
}

/// Move an item to another day at the given position
#[tauri::command]
pub async fn move_item(
    state: State<'_, AppState>,
    trip_id: String,
    from_day_id: String,
    to_day_id: String,
    item_id: String,
    index: usize,
) -> Result<Trip, DomainError> {
    state
        .service
        .move_item(&trip_id, &from_day_id, &to_day_id, &item_id, index)
        .await
}

/// Resolve a drag-and-drop release into a reorder or move
#[tauri::command]
pub async fn drop_item(
    state: State<'_, AppState>,
    trip_id: String,
    item_id: String,
    drop: DropPoint,
) -> Result<Trip, DomainError> {
    state.service.drop_item(&trip_id, &item_id, drop).await
}
