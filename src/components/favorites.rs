//! Favorites Components
//!
//! Link tiles on the home page and the form that adds them.

use leptos::prelude::*;
use web_sys::SubmitEvent;

use super::ModalFrame;
use crate::context::use_app_context;
use crate::dashboard::{Action, Outcome};
use crate::store::{close_modal, open_modal, use_ui_store, Modal};
use crate::view::EMPTY_FAVORITES;

#[component]
pub fn FavoritesGrid() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let favorites = move || ctx.dashboard.with(|d| d.favorites().to_vec());

    view! {
        <section class="widget">
            <div class="widget-header">
                <h2>"Favorites"</h2>
                <button class="btn-icon" title="Add favorite" on:click=move |_| open_modal(&store, Modal::Favorite)>
                    <i class="fas fa-plus"></i>
                </button>
            </div>
            <div class="favorites-grid">
                <Show
                    when=move || ctx.dashboard.with(|d| !d.favorites().is_empty())
                    fallback=|| view! { <p class="empty-state">{EMPTY_FAVORITES}</p> }
                >
                    <For each=favorites key=|fav| fav.id let:fav>
                        <div class="favorite-item">
                            <button
                                class="favorite-delete"
                                title="Remove"
                                on:click=move |_| { ctx.apply(Action::RemoveFavorite(fav.id)); }
                            >
                                <i class="fas fa-times"></i>
                            </button>
                            <a href=fav.url.clone() target="_blank" rel="noopener noreferrer" class="favorite-link">
                                <div class="favorite-icon"><i class=fav.icon.clone()></i></div>
                                <div class="favorite-label">{fav.label.clone()}</div>
                            </a>
                        </div>
                    </For>
                </Show>
            </div>
        </section>
    }
}

#[component]
pub fn FavoriteForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let (label, set_label) = signal(String::new());
    let (url, set_url) = signal(String::new());
    let (icon, set_icon) = signal(String::new());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let action = Action::AddFavorite {
            label: label.get(),
            url: url.get(),
            icon: icon.get(),
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title="Add Favorite">
            <form on:submit=submit>
                <div class="form-group">
                    <label for="favoriteLabel">"Label"</label>
                    <input
                        id="favoriteLabel"
                        type="text"
                        required
                        prop:value=move || label.get()
                        on:input=move |ev| set_label.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="favoriteUrl">"URL"</label>
                    <input
                        id="favoriteUrl"
                        type="url"
                        required
                        prop:value=move || url.get()
                        on:input=move |ev| set_url.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="favoriteIcon">"Icon class (optional)"</label>
                    <input
                        id="favoriteIcon"
                        type="text"
                        placeholder="fas fa-globe"
                        prop:value=move || icon.get()
                        on:input=move |ev| set_icon.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </ModalFrame>
    }
}
