//! Page Navigation
//!
//! The visible page follows the url fragment (`#home`, `#bookmarks`, `#feeds`).

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Bookmarks,
    Feeds,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Bookmarks, Page::Feeds];

    /// Unknown or empty fragments resolve to Home
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#') {
            "bookmarks" => Page::Bookmarks,
            "feeds" => Page::Feeds,
            _ => Page::Home,
        }
    }

    pub fn hash(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Bookmarks => "bookmarks",
            Page::Feeds => "feeds",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Bookmarks => "Bookmarks",
            Page::Feeds => "Feeds",
        }
    }
}

/// Current `location.hash`, empty outside a browser window
pub fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Reflect the page in the url fragment
pub fn set_hash(page: Page) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(page.hash()) {
            log::warn!("[APP] Failed to update location hash: {:?}", e);
        }
    }
}
