//! Settings and diagnostics commands

use wasm_bindgen::JsValue;

use super::call;
use crate::models::{BoardSettings, CommandError};

pub async fn get_board_settings() -> Result<BoardSettings, CommandError> {
    call("get_board_settings", JsValue::NULL).await
}

pub async fn is_ready() -> Result<bool, CommandError> {
    call("is_ready", JsValue::NULL).await
}

pub async fn get_recent_logs() -> Result<Vec<String>, CommandError> {
    call("get_recent_logs", JsValue::NULL).await
}
