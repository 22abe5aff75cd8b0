//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to the trip service.

mod trip_cmd;
mod day_cmd;
mod item_cmd;
mod settings_cmd;

pub use trip_cmd::*;
pub use day_cmd::*;
pub use item_cmd::*;
pub use settings_cmd::*;
