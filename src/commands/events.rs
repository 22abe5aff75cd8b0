//! Backend event subscriptions

use wasm_bindgen::prelude::*;

pub const TRIPS_HYDRATED: &str = "trips-hydrated";
pub const TRIPS_LOAD_FAILED: &str = "trips-load-failed";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

/// Subscribe for the lifetime of the app; the handler gets the event payload
pub async fn listen_forever<F>(event: &str, mut handler: F) -> Result<(), String>
where
    F: FnMut(JsValue) + 'static,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let payload = js_sys::Reflect::get(&event, &JsValue::from_str("payload")).unwrap_or(JsValue::UNDEFINED);
        handler(payload);
    });
    listen(event, &closure).await.map_err(|e| format!("{:?}", e))?;
    closure.forget();
    Ok(())
}
