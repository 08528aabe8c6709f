//! Theme & Wallpaper
//!
//! Scalar settings stored as raw text, read once at startup and written on
//! every change.

use crate::models::Theme;
use crate::storage::{KeyValueStore, KEY_THEME, KEY_WALLPAPER};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    theme: Theme,
    /// Empty when no wallpaper is set
    wallpaper: String,
}

impl AppSettings {
    /// Defaults: light theme, no wallpaper
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let theme = match store.get(KEY_THEME) {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("[STORE] Unknown theme '{}', using light", raw);
                Theme::default()
            }),
            None => Theme::default(),
        };
        let wallpaper = store.get(KEY_WALLPAPER).unwrap_or_default();
        Self { theme, wallpaper }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn wallpaper(&self) -> Option<&str> {
        Some(self.wallpaper.as_str()).filter(|w| !w.is_empty())
    }

    /// Flip light/dark and persist. Returns the new theme.
    pub fn toggle_theme<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = store.set(KEY_THEME, self.theme.as_str()) {
            log::error!("[STORE] {}", e);
        }
        self.theme
    }

    /// Set the wallpaper url. A blank url is ignored.
    pub fn set_wallpaper<S: KeyValueStore + ?Sized>(&mut self, store: &S, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.wallpaper = url.to_string();
        if let Err(e) = store.set(KEY_WALLPAPER, url) {
            log::error!("[STORE] {}", e);
        }
        true
    }

    /// Remove the wallpaper (and its storage key)
    pub fn clear_wallpaper<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> bool {
        let had_wallpaper = !self.wallpaper.is_empty();
        self.wallpaper.clear();
        if let Err(e) = store.remove(KEY_WALLPAPER) {
            log::error!("[STORE] {}", e);
        }
        had_wallpaper
    }
}
