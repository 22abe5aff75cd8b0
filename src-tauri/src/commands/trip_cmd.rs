//! Tauri Commands for Trip CRUD
//!
//! Errors are returned as the serialized `DomainError` so the frontend can
//! tell validation warnings from real failures.

use chrono::NaiveDate;
use tauri::State;

use crate::domain::{DomainError, Trip, TripDraft};
use crate::service::DateChangePreview;
use crate::AppState;

/// List all trips, ordered by start date
#[tauri::command]
pub async fn list_trips(state: State<'_, AppState>) -> Result<Vec<Trip>, DomainError> {
    state.service.list_trips().await
}

#[tauri::command]
pub async fn get_trip(state: State<'_, AppState>, id: String) -> Result<Trip, DomainError> {
    state.service.get_trip(&id).await
}

/// Create a trip; its days are generated from the date range
#[tauri::command]
pub async fn create_trip(state: State<'_, AppState>, draft: TripDraft) -> Result<Trip, DomainError> {
    state.service.create_trip(draft).await
}

/// Edit title, image or dates. A date change regenerates the days and keeps
/// the items of every date still in range.
#[tauri::command]
pub async fn update_trip(state: State<'_, AppState>, id: String, draft: TripDraft) -> Result<Trip, DomainError> {
    state.service.update_trip(&id, draft).await
}

#[tauri::command]
pub async fn delete_trip(state: State<'_, AppState>, id: String) -> Result<(), DomainError> {
    state.service.delete_trip(&id).await
}

#[tauri::command]
pub async fn preview_date_change(
    state: State<'_, AppState>,
    id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<DateChangePreview, DomainError> {
    state.service.preview_date_change(&id, start_date, end_date).await
}
