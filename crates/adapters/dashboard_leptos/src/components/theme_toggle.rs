//! Dark/light theme toggle, persisted in `localStorage`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

const STORAGE_KEY: &str = "aini-theme";
const DARK: &str = "dark";
const LIGHT: &str = "light";

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// The saved theme, or the system preference when nothing was saved yet.
fn initial_theme() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .unwrap_or_else(|| if prefers_dark() { DARK } else { LIGHT }.to_string())
}

/// Set `data-theme` on `<html>`.
fn apply_theme(theme: &str) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.document_element());
    if let Some(el) = root {
        let _ = el.unchecked_into::<web_sys::HtmlElement>().dataset().set("theme", theme);
    }
}

fn save_theme(theme: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(STORAGE_KEY, theme);
    }
}

/// Button switching between light and dark themes.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let initial = initial_theme();
    apply_theme(&initial);

    let (is_dark, set_is_dark) = signal(initial == DARK);

    let toggle = move |_| {
        let dark = !is_dark.get_untracked();
        let theme = if dark { DARK } else { LIGHT };
        apply_theme(theme);
        save_theme(theme);
        set_is_dark.set(dark);
    };

    view! {
        <button type="button" class="theme-toggle" on:click=toggle aria-label="Toggle theme">
            {move || if is_dark.get() { "\u{263E}" } else { "\u{2600}" }}
        </button>
    }
}
