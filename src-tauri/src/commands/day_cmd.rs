//! Tauri Commands for Days

use chrono::NaiveDate;
use tauri::State;

use crate::domain::{DayPatch, DomainError, Trip};
use crate::AppState;

/// Extend the trip by one day; the date must sit right before or after the range
#[tauri::command]
pub async fn add_day(state: State<'_, AppState>, trip_id: String, date: NaiveDate) -> Result<Trip, DomainError> {
    state.service.add_day(&trip_id, date).await
}

#[tauri::command]
pub async fn update_day(
    state: State<'_, AppState>,
    trip_id: String,
    day_id: String,
    patch: DayPatch,
) -> Result<Trip, DomainError> {
    state.service.update_day(&trip_id, &day_id, patch).await
}

/// Remove the first or last day, shrinking the range
#[tauri::command]
pub async fn delete_day(state: State<'_, AppState>, trip_id: String, day_id: String) -> Result<Trip, DomainError> {
    state.service.delete_day(&trip_id, &day_id).await
}
