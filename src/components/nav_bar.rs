//! Navigation Bar Component
//!
//! Page links, wallpaper settings and the theme toggle.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::dashboard::Action;
use crate::navigation::{set_hash, Page};
use crate::store::{open_modal, use_ui_store, Modal, UiStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let navigate = move |page: Page| {
        store.page().set(page);
        set_hash(page);
    };

    let toggle_icon = move || ctx.dashboard.with(|d| d.theme().toggle_icon());

    view! {
        <header class="header">
            <div class="logo">"Dashboard"</div>
            <nav class="main-nav">
                {Page::ALL.into_iter().map(|page| view! {
                    <a
                        href=format!("#{}", page.hash())
                        class=move || if store.page().get() == page { "nav-link active" } else { "nav-link" }
                        on:click=move |ev| {
                            ev.prevent_default();
                            navigate(page);
                        }
                    >
                        {page.label()}
                    </a>
                }).collect_view()}
            </nav>
            <div class="header-actions">
                <button
                    class="btn-icon"
                    title="Change wallpaper"
                    on:click=move |_| open_modal(&store, Modal::Wallpaper)
                >
                    <i class="fas fa-image"></i>
                </button>
                <button
                    class="btn-icon"
                    title="Toggle theme"
                    on:click=move |_| { ctx.apply(Action::ToggleTheme); }
                >
                    <i class=toggle_icon></i>
                </button>
            </div>
        </header>
    }
}
