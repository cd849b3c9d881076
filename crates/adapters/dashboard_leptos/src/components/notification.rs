//! Fixed-position error notification.

use leptos::prelude::*;

/// Shows the last recorded error until the next successful poll clears it.
#[component]
pub fn Notification(
    /// The message to display, if any.
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="notification-container">
            {move || error.get().map(|message| view! {
                <div class="notification notification-error" role="alert">
                    "Error: " {message}
                </div>
            })}
        </div>
    }
}
