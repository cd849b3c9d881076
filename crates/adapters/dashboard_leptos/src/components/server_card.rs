//! Card for one managed server with its start/stop button.

use leptos::prelude::*;

use aini_app::session::PendingAction;
use aini_domain::action::ServerAction;
use aini_domain::server::{ServerKind, ServerState};

use super::Spinner;

/// A server's running state plus the button that toggles it.
#[component]
pub fn ServerCard(
    kind: ServerKind,
    #[prop(into)] server: Signal<ServerState>,
    /// Action in flight anywhere on the page; every button is disabled while set.
    #[prop(into)]
    pending: Signal<Option<PendingAction>>,
    /// Invoked with the action matching the server's current state.
    #[prop(into)]
    on_action: Callback<ServerAction>,
) -> impl IntoView {
    let title = format!("{} Server", kind.as_str().to_uppercase());
    let is_pending_here = move || pending.get().is_some_and(|p| p.server == kind);

    let on_click = move |_| {
        on_action.run(ServerAction::toggle_for(&server.get_untracked()));
    };

    view! {
        <div class="server-card">
            <div class="server-info">
                <span class=move || {
                    if server.get().is_running() { "server-icon running" } else { "server-icon stopped" }
                }></span>
                <div>
                    <h3>{title}</h3>
                    <p class="server-label">
                        {move || server.get().connection_label.unwrap_or_else(|| "Not running".to_string())}
                    </p>
                </div>
            </div>
            <button
                type="button"
                class=move || if server.get().is_running() { "btn-power btn-stop" } else { "btn-power btn-start" }
                on:click=on_click
                disabled=move || pending.get().is_some()
                title=move || ServerAction::toggle_for(&server.get()).to_string()
            >
                {move || if is_pending_here() { view! { <Spinner/> }.into_any() } else { view! { <span>"\u{23FB}"</span> }.into_any() }}
            </button>
        </div>
    }
}
