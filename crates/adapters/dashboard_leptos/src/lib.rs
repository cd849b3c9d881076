//! Browser dashboard for the AINI app and gpu servers.
//!
//! Client-side rendered with Leptos. All backend traffic goes through
//! [`api::GlooStatusApi`]; polling and actions are driven by the services in
//! `aini-app`, this crate only mirrors the session state into signals.

use leptos::prelude::*;

pub mod api;
mod components;
mod pages;
pub mod runtime;

use components::ThemeToggle;
use pages::Dashboard;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <header class="app-header">
            <h1>"AINI Dashboard"</h1>
            <ThemeToggle/>
        </header>
        <main>
            <Dashboard/>
        </main>
    }
}
