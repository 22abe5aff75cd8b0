//! Tauri Commands for board settings and diagnostics

use tauri::State;

use crate::config::BoardSettings;
use crate::AppState;

#[tauri::command]
pub fn get_board_settings(state: State<'_, AppState>) -> BoardSettings {
    state.settings
}

/// Whether the stored trips have been loaded yet
#[tauri::command]
pub async fn is_ready(state: State<'_, AppState>) -> Result<bool, ()> {
    Ok(state.service.is_hydrated().await)
}

/// Tail of the application log, newest last
#[tauri::command]
pub fn get_recent_logs() -> Vec<String> {
    rolling_logger::recent_lines()
}
