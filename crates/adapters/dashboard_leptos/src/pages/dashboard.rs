//! The dashboard page: server cards, service badges, settings viewer.
//!
//! The page owns one [`DashboardSession`] for its lifetime. Polling starts on
//! mount; the [`ViewHandle`](aini_app::services::poll_scheduler::ViewHandle)
//! is dropped on cleanup, which stops the ticker and discards any response
//! still in flight.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use aini_app::services::action_dispatcher::ActionDispatcher;
use aini_app::services::poll_scheduler::{POLL_INTERVAL, PollScheduler};
use aini_app::services::status_client::StatusClient;
use aini_app::session::{DashboardSession, DashboardState};
use aini_domain::action::ServerAction;
use aini_domain::server::ServerKind;
use aini_domain::service::ServiceKind;
use aini_domain::settings::STATIC_ENDPOINTS;
use aini_domain::time::clock_label;

use crate::api::GlooStatusApi;
use crate::components::{Notification, ServerCard, ServiceBadge, SettingsDialog, Spinner};
use crate::runtime::TimeoutTicker;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = RwSignal::new(DashboardState::default());
    let session = DashboardSession::new();
    session.on_change(move |next| state.set(next.clone()));

    let client = StatusClient::new(GlooStatusApi);
    let scheduler = PollScheduler::new(client.clone(), session.clone());
    let dispatcher = StoredValue::new_local(ActionDispatcher::new(client, session));

    let (handle, task) = scheduler.activate(TimeoutTicker::new(POLL_INTERVAL));
    spawn_local(task);
    let handle = StoredValue::new_local(Some(handle));
    let scheduler = StoredValue::new_local(scheduler);
    on_cleanup(move || {
        if let Some(Some(handle)) = handle.try_update_value(Option::take) {
            handle.deactivate();
        }
    });

    let refreshing = Memo::new(move |_| state.with(DashboardState::is_refreshing));
    let pending = Signal::derive(move || state.with(|s| s.pending_action));
    let last_error = Signal::derive(move || state.with(|s| s.last_error.clone()));
    let last_updated = move || state.with(|s| s.last_updated.map(clock_label));
    let settings = Memo::new(move |_| state.with(|s| s.settings.clone()));
    let (show_settings, set_show_settings) = signal(false);

    let refresh = move |_| {
        if let Some(scheduler) = scheduler.try_get_value() {
            spawn_local(async move {
                if let Err(err) = scheduler.refresh_now().await {
                    warn!("refresh failed: {err}");
                }
            });
        }
    };

    let run_action = move |server: ServerKind, action: ServerAction| {
        if let Some(dispatcher) = dispatcher.try_get_value() {
            spawn_local(async move {
                if let Err(err) = dispatcher.perform_action(server, action).await {
                    warn!("{err}");
                }
            });
        }
    };

    let server = move |kind: ServerKind| {
        Signal::derive(move || state.with(|s| s.status.server(kind).clone()))
    };
    let service = move |kind: ServiceKind| {
        Signal::derive(move || state.with(|s| *s.status.service(kind)))
    };
    let consul_href = STATIC_ENDPOINTS[0].value;

    view! {
        <Notification error=last_error/>

        <div class="toolbar">
            {move || last_updated().map(|at| view! {
                <span class="last-updated">"Last updated: " {at}</span>
            })}
            <button type="button" class="btn-refresh" on:click=refresh disabled=move || refreshing.get()>
                {move || refreshing.get().then(|| view! { <Spinner/> })}
                "Refresh"
            </button>
        </div>

        <section class="server-grid">
            <ServerCard
                kind=ServerKind::App
                server=server(ServerKind::App)
                pending=pending
                on_action=move |action| run_action(ServerKind::App, action)
            />
            <ServerCard
                kind=ServerKind::Gpu
                server=server(ServerKind::Gpu)
                pending=pending
                on_action=move |action| run_action(ServerKind::Gpu, action)
            />
        </section>

        <section>
            <h2>"State Management"</h2>
            <div class="service-grid">
                <ServiceBadge service=service(ServiceKind::Consul) href=consul_href/>
                <ServiceBadge service=service(ServiceKind::S3)/>
            </div>
        </section>

        <section>
            <h2>"Quick Actions"</h2>
            <button type="button" class="btn-quick" on:click=move |_| set_show_settings.set(true)>
                "Settings"
            </button>
        </section>

        {move || {
            show_settings
                .get()
                .then(|| settings.get())
                .flatten()
                .map(|settings| view! {
                    <SettingsDialog settings on_close=move |()| set_show_settings.set(false)/>
                })
        }}
    }
}
