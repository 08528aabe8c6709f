//! Page Components
//!
//! One component per navigation target.

use leptos::prelude::*;

use super::{BookmarkFolders, CustomFeedsPanel, FavoritesGrid, FeedActions, FeedGrid, NotesList, TodoList};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page active" id="homePage">
            <FavoritesGrid />
            <div class="home-columns">
                <NotesList />
                <TodoList />
            </div>
            <section class="widget">
                <div class="widget-header">
                    <h2>"Latest Feeds"</h2>
                    <FeedActions />
                </div>
                <FeedGrid />
            </section>
        </div>
    }
}

#[component]
pub fn BookmarksPage() -> impl IntoView {
    view! {
        <div class="page active" id="bookmarksPage">
            <BookmarkFolders />
        </div>
    }
}

#[component]
pub fn FeedsPage() -> impl IntoView {
    view! {
        <div class="page active" id="feedsPage">
            <section class="widget">
                <div class="widget-header">
                    <h2>"RSS Feeds"</h2>
                    <FeedActions with_add=true />
                </div>
                <CustomFeedsPanel />
                <FeedGrid />
            </section>
        </div>
    }
}
