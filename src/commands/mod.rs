//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod trip;
mod day;
mod item;
mod settings;
mod events;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::CommandError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Serialize command arguments; Tauri expects camelCase keys at the top level
fn to_args<A: Serialize>(args: &A) -> Result<JsValue, CommandError> {
    serde_wasm_bindgen::to_value(args).map_err(|e| CommandError::Bridge(format!("Serialization error: {}", e)))
}

/// Map a rejected invoke to the backend error it carries
fn decode_error(err: JsValue) -> CommandError {
    if let Ok(domain) = serde_wasm_bindgen::from_value::<CommandError>(err.clone()) {
        return domain;
    }
    match err.as_string() {
        Some(msg) => CommandError::Bridge(msg),
        None => CommandError::Bridge(format!("{:?}", err)),
    }
}

async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, CommandError> {
    let result = invoke(cmd, args).await.map_err(decode_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| CommandError::Bridge(format!("Response error: {}", e)))
}

// Re-export all public items
pub use trip::*;
pub use day::*;
pub use item::*;
pub use settings::*;
pub use events::*;
