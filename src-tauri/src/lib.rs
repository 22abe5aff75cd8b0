//! Trip Board Backend
//!
//! Layered architecture:
//! - domain: Trips, days, items and the rules that reshape them
//! - repository: Persistence adapters (SQLite, in-memory)
//! - service: Staged mutations over the hydrated trip collection
//! - commands: Tauri command handlers

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{Emitter, Manager};

mod config;
mod domain;
mod repository;
mod service;
mod commands;

use config::{BoardSettings, PlannerConfig};
use repository::{DbState, SqliteTripRepository};
use service::TripService;

/// Event emitted once stored trips are loaded
pub const TRIPS_HYDRATED_EVENT: &str = "trips-hydrated";
/// Event emitted when the store could not be opened
pub const TRIPS_LOAD_FAILED_EVENT: &str = "trips-load-failed";

/// Application state shared across commands
pub struct AppState {
    pub service: Arc<TripService>,
    pub settings: BoardSettings,
}

fn app_dir(dir: tauri::Result<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = dir?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            let config_dir = app_dir(app_handle.path().app_config_dir())?;
            let config = PlannerConfig::load(&config_dir)?;

            rolling_logger::init_logger_with(
                app_dir(app_handle.path().app_log_dir())?,
                "TripBoard",
                config.logger_config()?,
            )?;
            tracing::info!(
                max_items_per_day = config.max_items_per_day,
                require_non_empty_day = config.require_non_empty_day,
                log_level = %config.log_level,
                "config loaded"
            );

            let db_path = app_dir(app_handle.path().app_data_dir())?.join(&config.db_file);
            let db_state = DbState::new(db_path);
            let repo = Arc::new(SqliteTripRepository::new(db_state.conn.clone(), config.owner_id.clone()));
            let service = Arc::new(TripService::new(repo, config.policy()));

            // Manage state immediately; commands answer NotReady until hydration
            app.manage(AppState {
                service: service.clone(),
                settings: config.board_settings(),
            });

            tauri::async_runtime::spawn(async move {
                let loaded = match db_state.initialize().await {
                    Ok(()) => service.hydrate().await,
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok(count) => {
                        rolling_logger::info(&format!("Loaded {} trips from {}", count, db_state.path.display()));
                        if let Err(e) = app_handle.emit(TRIPS_HYDRATED_EVENT, count) {
                            tracing::error!("Failed to emit {}: {}", TRIPS_HYDRATED_EVENT, e);
                        }
                    }
                    Err(e) => {
                        rolling_logger::error(&format!("Trip store init failed: {}", e));
                        let _ = app_handle.emit(TRIPS_LOAD_FAILED_EVENT, e);
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Trips
            commands::list_trips,
            commands::get_trip,
            commands::create_trip,
            commands::update_trip,
            commands::delete_trip,
            commands::preview_date_change,
            // Days
            commands::add_day,
            commands::update_day,
            commands::delete_day,
            // Items
            commands::add_item,
            commands::update_item,
            commands::edit_item,
            commands::delete_item,
            commands::reorder_item,
            commands::move_item,
            commands::drop_item,
            // Settings and diagnostics
            commands::get_board_settings,
            commands::is_ready,
            commands::get_recent_logs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
