//! Message banners
//!
//! Warnings fade on their own; errors stay until dismissed.

use leptos::prelude::*;

use crate::store::{dismiss_warning, store_set_error, use_app_store, AppStateStoreFields};

#[component]
pub fn WarningBanner() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || store.warning().get().map(|msg| view! {
            <div class="banner warning-banner" role="alert">
                <span class="banner-text">{msg}</span>
                <button class="banner-close" on:click=move |_| dismiss_warning(&store)>"×"</button>
            </div>
        })}
    }
}

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || store.error().get().map(|msg| view! {
            <div class="banner error-banner" role="alert">
                <span class="banner-text">{msg}</span>
                <button class="banner-close" on:click=move |_| store_set_error(&store, None)>"×"</button>
            </div>
        })}
    }
}
