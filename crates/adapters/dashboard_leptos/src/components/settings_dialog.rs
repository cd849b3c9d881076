//! Modal settings viewer with per-key secret reveal.

use std::collections::BTreeSet;

use leptos::prelude::*;

use aini_domain::settings::{SECRET_MASK, STATIC_ENDPOINTS, SettingsSnapshot};

/// Read-only view of the backend settings.
///
/// Secrets start masked. Reveal state is local to the dialog and is reset
/// every time it is reopened.
#[component]
pub fn SettingsDialog(
    settings: SettingsSnapshot,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let revealed = RwSignal::new(BTreeSet::<String>::new());

    let env_rows = settings
        .entries()
        .map(|entry| {
            let key = entry.key.to_string();
            let value = entry.value.to_string();
            let secret = entry.secret;
            let toggle_key = key.clone();
            let shown_key = key.clone();
            let is_revealed = move || revealed.with(|keys| keys.contains(&shown_key));
            let is_revealed_icon = is_revealed.clone();
            let display = move || {
                if !secret || is_revealed() {
                    value.clone()
                } else {
                    SECRET_MASK.to_string()
                }
            };
            view! {
                <div class="settings-row">
                    <span class="mono">{key}</span>
                    <span class="mono">{display}</span>
                    {secret.then(|| view! {
                        <button
                            type="button"
                            class="btn-reveal"
                            on:click=move |_| revealed.update(|keys| {
                                if !keys.remove(&toggle_key) {
                                    keys.insert(toggle_key.clone());
                                }
                            })
                        >
                            {move || if is_revealed_icon() { "Hide" } else { "Show" }}
                        </button>
                    })}
                </div>
            }
        })
        .collect_view();

    let endpoint_rows = STATIC_ENDPOINTS
        .into_iter()
        .map(|endpoint| {
            let value = if endpoint.link {
                view! { <a href=endpoint.value target="_blank" rel="noopener noreferrer">{endpoint.value}</a> }
                    .into_any()
            } else {
                view! { <span>{endpoint.value}</span> }.into_any()
            };
            view! {
                <div class="settings-row">
                    <span>{endpoint.label}</span>
                    {value}
                </div>
            }
        })
        .collect_view();

    let service_rows = settings
        .services
        .into_iter()
        .map(|(name, endpoint)| {
            let state = if endpoint.connected { "connected" } else { "disconnected" };
            view! {
                <div class="settings-row">
                    <span>{name}</span>
                    <span>{format!("{} ({state})", endpoint.url)}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="dialog-backdrop">
            <div class="dialog" role="dialog" aria-modal="true">
                <div class="dialog-header">
                    <h2>"Settings"</h2>
                    <button type="button" class="dialog-close" on:click=move |_| on_close.run(())>
                        "\u{00D7}"
                    </button>
                </div>
                <section>
                    <h3>"Environment Variables"</h3>
                    {env_rows}
                </section>
                <section>
                    <h3>"Service Configuration"</h3>
                    {endpoint_rows}
                    {service_rows}
                </section>
            </div>
        </div>
    }
}
