use leptos::prelude::*;

/// Inline animated spinner, shown next to a label while a visible load runs.
#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span class="spinner" aria-hidden="true"></span> }
}
