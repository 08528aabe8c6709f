//! New-Tab Dashboard App
//!
//! Root component: loads persisted state, applies theme and wallpaper, follows
//! the url fragment and keeps the aggregated feeds current.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{BookmarksPage, FeedsPage, HomePage, ModalHost, NavBar};
use crate::config::FeedConfig;
use crate::context::AppContext;
use crate::dashboard::Dashboard;
use crate::feeds::{aggregate, combined_sources, Rss2JsonClient};
use crate::navigation::{current_hash, Page};
use crate::preview::PreviewGate;
use crate::storage::PageStorage;
use crate::store::{UiState, UiStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let dashboard = Dashboard::load(PageStorage::detect());
    log::info!(
        "[APP] Loaded {} favorites, {} notes, {} todos, {} folders, {} custom feeds",
        dashboard.favorites().len(),
        dashboard.notes().len(),
        dashboard.todos().len(),
        dashboard.folders().len(),
        dashboard.custom_feeds().len()
    );

    let (feeds_trigger, set_feeds_trigger) = signal(0u32);
    let ctx = AppContext::new(dashboard, (feeds_trigger, set_feeds_trigger));
    provide_context(ctx);

    let store = Store::new(UiState::new(Page::from_hash(&current_hash())));
    provide_context(store);

    // Theme lives on <body> so the stylesheet variables switch globally
    Effect::new(move |_| {
        let theme = ctx.dashboard.with(|d| d.theme());
        if let Some(body) = document().body() {
            if let Err(e) = body.set_attribute("data-theme", theme.as_str()) {
                log::warn!("[APP] Failed to apply theme: {:?}", e);
            }
        }
    });

    // Back/forward and manual fragment edits
    let hash_listener = window_event_listener(leptos::ev::hashchange, move |_| {
        store.page().set(Page::from_hash(&current_hash()));
    });
    on_cleanup(move || hash_listener.remove());

    // Aggregate feeds on load, on refresh and whenever the custom list changes.
    // Only the newest run may publish its cards.
    let config = FeedConfig::default();
    let runs = PreviewGate::new();
    Effect::new(move |_| {
        let trigger = ctx.feeds_trigger.get();
        let custom = ctx.dashboard.with_untracked(|d| d.custom_feeds().to_vec());
        let sources = combined_sources(&custom, &config.builtin_sources);
        log::debug!("[FEEDS] Aggregating {} sources, trigger={}", sources.len(), trigger);

        let ticket = runs.begin();
        let runs = runs.clone();
        let client = Rss2JsonClient::new(&config);
        let max_items = config.max_items;
        store.feeds_loading().set(true);

        spawn_local(async move {
            let cards = aggregate(&client, &sources, max_items).await;
            if runs.is_current(ticket) {
                store.feed_cards().set(cards);
                store.feeds_loading().set(false);
            }
        });
    });

    let wallpaper_style = move || {
        ctx.dashboard.with(|d| {
            d.wallpaper()
                .map(|url| format!("background-image: url(\"{}\");", url.replace('"', "%22")))
                .unwrap_or_default()
        })
    };
    let has_wallpaper = move || ctx.dashboard.with(|d| d.wallpaper().is_some());

    view! {
        <div
            class=move || if has_wallpaper() { "wallpaper-overlay visible" } else { "wallpaper-overlay" }
            style=wallpaper_style
        />
        <div class=move || if has_wallpaper() { "app-shell with-wallpaper" } else { "app-shell" }>
            <NavBar />
            <main class="container">
                {move || match store.page().get() {
                    Page::Home => view! { <HomePage /> }.into_any(),
                    Page::Bookmarks => view! { <BookmarksPage /> }.into_any(),
                    Page::Feeds => view! { <FeedsPage /> }.into_any(),
                }}
            </main>
        </div>
        <ModalHost />
    }
}
