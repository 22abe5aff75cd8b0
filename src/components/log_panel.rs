//! Recent backend log lines, for troubleshooting without opening the log dir.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

#[component]
pub fn LogPanel(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let lines = RwSignal::new(Vec::<String>::new());
    let failure = RwSignal::new(None::<String>);

    let refresh = move || {
        spawn_local(async move {
            match commands::get_recent_logs().await {
                Ok(fetched) => {
                    failure.set(None);
                    lines.set(fetched);
                }
                Err(e) => failure.set(Some(e.message())),
            }
        });
    };
    refresh();

    view! {
        <aside class="log-panel">
            <div class="log-panel-header">
                <h3>"Recent log"</h3>
                <button class="secondary-btn" on:click=move |_| refresh()>"Refresh"</button>
                <button class="banner-close" aria-label="Close" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            {move || failure.get().map(|msg| view! { <p class="log-panel-error">{msg}</p> })}
            <pre class="log-lines">
                {move || {
                    let lines = lines.get();
                    if lines.is_empty() { "No log lines yet.".to_string() } else { lines.join("\n") }
                }}
            </pre>
        </aside>
    }
}
