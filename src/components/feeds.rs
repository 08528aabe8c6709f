//! Feed Components
//!
//! Aggregated feed cards, the custom source list and the add-feed form with
//! its debounced preview.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

use super::{DeleteConfirmButton, ModalFrame};
use crate::config::{DebounceConfig, FeedConfig};
use crate::context::{use_app_context, AppContext};
use crate::dashboard::{Action, Outcome};
use crate::feeds::{preview_feed, FeedCard, PreviewOutcome, Rss2JsonClient};
use crate::models::FeedSource;
use crate::preview::{settle, PreviewGate};
use crate::store::{close_modal, open_modal, store_remove_feed_card, use_ui_store, Modal, UiStateStoreFields, UiStore};
use crate::view::{format_pub_date, FEED_UNAVAILABLE};

const REMOVE_FEED_PROMPT: &str = "Remove this feed?";

// ========================
// Cards
// ========================

/// Every aggregated source, or a spinner while a run is in flight
#[component]
pub fn FeedGrid() -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="feed-grid">
            <Show
                when=move || !store.feeds_loading().get()
                fallback=|| view! {
                    <div class="loading"><div class="spinner"></div>"Loading feeds..."</div>
                }
            >
                {move || store.feed_cards().get().into_iter().map(|card| view! { <FeedCardView card=card /> }).collect_view()}
            </Show>
        </div>
    }
}

#[component]
fn FeedCardView(card: FeedCard) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    match card {
        FeedCard::Loaded { source, feed } => {
            let remove = source.custom_id().map(|id| remove_button(ctx, store, id.to_string()));
            view! {
                <div class="feed-source">
                    <div class="feed-source-header">
                        <SourceIcon url=source.icon.clone() icon_class="feed-source-icon" />
                        <div class="feed-source-title">
                            <a href=feed.link target="_blank" rel="noopener noreferrer">{feed.title}</a>
                        </div>
                        {remove}
                    </div>
                    {feed.items.into_iter().map(|item| view! {
                        <div class="feed-item">
                            <div class="feed-item-title">
                                <a href=item.link target="_blank" rel="noopener noreferrer">{item.title}</a>
                            </div>
                            <div class="feed-item-meta">{format_pub_date(&item.published_date)}</div>
                        </div>
                    }).collect_view()}
                </div>
            }
            .into_any()
        }
        FeedCard::Unavailable { source, reason } => view! {
            <div class="feed-source unavailable" title=reason>
                <div class="feed-source-header">{source.name}</div>
                <p>{FEED_UNAVAILABLE}</p>
            </div>
        }
        .into_any(),
    }
}

fn remove_button(ctx: AppContext, store: UiStore, id: String) -> impl IntoView {
    let on_confirm = Callback::new(move |_| {
        store_remove_feed_card(&store, &id);
        ctx.apply(Action::RemoveCustomFeed(id.clone()));
    });
    view! { <DeleteConfirmButton prompt=REMOVE_FEED_PROMPT on_confirm=on_confirm /> }
}

/// Source icon that disappears when the image fails to load
#[component]
fn SourceIcon(url: String, icon_class: &'static str) -> impl IntoView {
    let (broken, set_broken) = signal(url.trim().is_empty());

    view! {
        <Show when=move || !broken.get()>
            <img src=url.clone() alt="" class=icon_class on:error=move |_| set_broken.set(true) />
        </Show>
    }
}

// ========================
// Custom sources
// ========================

/// Management list for user-added sources. Hidden when there are none.
#[component]
pub fn CustomFeedsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let sources = move || ctx.dashboard.with(|d| d.custom_feed_sources());

    view! {
        <Show when=move || ctx.dashboard.with(|d| !d.custom_feeds().is_empty())>
            <div class="feed-source custom-feeds">
                <div class="feed-source-header">
                    <div class="feed-source-title">"Custom Feeds"</div>
                </div>
                <div class="custom-feed-list">
                    <For each=sources key=|source: &FeedSource| source.id.clone() let:source>
                        <div class="custom-feed-row">
                            <div class="custom-feed-name">
                                <SourceIcon url=source.icon.clone() icon_class="custom-feed-icon" />
                                {source.name.clone()}
                            </div>
                            {source.custom_id().map(|id| remove_button(ctx, store, id.to_string()))}
                        </div>
                    </For>
                </div>
            </div>
        </Show>
    }
}

// ========================
// Add-feed form
// ========================

#[component]
pub fn FeedForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let config = StoredValue::new(FeedConfig::default());
    let debounce = DebounceConfig::default();

    let (name, set_name) = signal(String::new());
    let (url, set_url) = signal(String::new());
    let (icon, set_icon) = signal(String::new());
    let (checking, set_checking) = signal(false);
    let preview = RwSignal::new(None::<PreviewOutcome>);

    // Closing the form must drop any pending preview
    let gate = PreviewGate::new();
    on_cleanup({
        let gate = gate.clone();
        move || gate.invalidate()
    });

    let on_url_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        set_url.set(value.clone());
        preview.set(None);
        set_checking.set(false);

        let ticket = gate.begin();
        let gate = gate.clone();
        spawn_local(async move {
            if !settle(&gate, ticket, debounce.feed_preview_ms).await || value.trim().is_empty() {
                return;
            }
            set_checking.set(true);
            let (client, headlines) = config.with_value(|c| (Rss2JsonClient::new(c), c.preview_items));
            let outcome = preview_feed(&client, &value, &name.get_untracked(), headlines).await;
            if gate.is_current(ticket) {
                set_checking.set(false);
                preview.set(Some(outcome));
            }
        });
    };

    let can_save = move || preview.with(|p| p.as_ref().is_some_and(PreviewOutcome::can_save));

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !can_save() {
            return;
        }
        let action = Action::AddCustomFeed {
            name: name.get(),
            url: url.get(),
            icon: icon.get(),
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title="Add RSS Feed">
            <form on:submit=submit>
                <div class="form-group">
                    <label for="feedNameInput">"Name"</label>
                    <input
                        id="feedNameInput"
                        type="text"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="feedUrlInput">"RSS URL"</label>
                    <input
                        id="feedUrlInput"
                        type="url"
                        required
                        prop:value=move || url.get()
                        on:input=on_url_input
                    />
                </div>
                <div class="form-group">
                    <label for="feedIconInput">"Icon URL (optional)"</label>
                    <input
                        id="feedIconInput"
                        type="url"
                        prop:value=move || icon.get()
                        on:input=move |ev| set_icon.set(event_target_value(&ev))
                    />
                </div>

                <Show when=move || checking.get()>
                    <div class="feed-preview"><div class="feed-preview-title">"Checking..."</div></div>
                </Show>
                {move || match preview.get() {
                    Some(PreviewOutcome::Ready(found)) => Some(view! {
                        <div class="feed-preview">
                            <div class="feed-preview-title">{found.title}</div>
                            <div class="feed-preview-items">
                                {found.headlines.into_iter().map(|h| view! { <div>"• " {h}</div> }).collect_view()}
                            </div>
                        </div>
                    }.into_any()),
                    Some(PreviewOutcome::Failed(message)) => Some(view! {
                        <div class="feed-preview-error">{message}</div>
                    }.into_any()),
                    Some(PreviewOutcome::Skipped) | None => None,
                }}

                <button type="submit" class="btn btn-primary" prop:disabled=move || !can_save()>
                    "Save Feed"
                </button>
            </form>
        </ModalFrame>
    }
}

/// Refresh and add-feed buttons for a feed section header
#[component]
pub fn FeedActions(#[prop(optional)] with_add: bool) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    view! {
        <div class="widget-actions">
            {with_add.then(|| view! {
                <button class="btn btn-small" on:click=move |_| open_modal(&store, Modal::Feed)>
                    <i class="fas fa-plus"></i>" Add Feed"
                </button>
            })}
            <button class="btn-icon" title="Refresh feeds" on:click=move |_| ctx.reload_feeds()>
                <i class="fas fa-sync-alt"></i>
            </button>
        </div>
    }
}
