//! Dashboard Models
//!
//! Records persisted to browser storage. Field names follow the stored JSON
//! shape so data written by earlier versions of the page still loads.

use serde::{Deserialize, Deserializer, Serialize};

/// Icon class used when a favorite is saved without one
pub const DEFAULT_FAVORITE_ICON: &str = "fas fa-globe";

/// Name given to folders whose export carried no header
pub const UNNAMED_FOLDER: &str = "Unnamed";

/// Favorite link tile on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default = "default_icon", deserialize_with = "null_as_default_icon")]
    pub icon: String,
}

/// Free-text note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// To-do entry. An empty `due_date` means no due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn due(&self) -> Option<&str> {
        Some(self.due_date.as_str()).filter(|d| !d.is_empty())
    }
}

/// Named, ordered container of bookmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkFolder {
    pub id: String,
    #[serde(default = "default_folder_name", deserialize_with = "null_as_folder_name")]
    pub name: String,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

/// Bookmark inside a folder. `favicon` is derived from the url's host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub favicon: String,
}

/// User-added RSS source. An empty `icon` means no icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFeedSource {
    pub id: String,
    pub name: String,
    pub rss_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,
}

/// A feed the aggregator fetches: built-in or custom
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSource {
    /// Present only for custom sources (used for deletion)
    pub id: Option<String>,
    pub name: String,
    pub rss_url: String,
    pub icon: String,
}

impl FeedSource {
    pub fn builtin(name: &str, rss_url: &str, icon: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            rss_url: rss_url.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Id of the stored custom source; `None` for built-in sources
    pub fn custom_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl From<&CustomFeedSource> for FeedSource {
    fn from(custom: &CustomFeedSource) -> Self {
        Self {
            id: Some(custom.id.clone()),
            name: custom.name.clone(),
            rss_url: custom.rss_url.clone(),
            icon: custom.icon.clone(),
        }
    }
}

/// Color theme, stored as raw text (`light` / `dark`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button: offers the opposite theme
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

fn default_icon() -> String {
    DEFAULT_FAVORITE_ICON.to_string()
}

fn default_folder_name() -> String {
    UNNAMED_FOLDER.to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_icon<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|icon| !icon.is_empty())
        .unwrap_or_else(default_icon))
}

fn null_as_folder_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_folder_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_uses_camel_case_due_date() {
        let todo = Todo {
            id: 7,
            text: "Patch servers".to_string(),
            due_date: "2024-05-01".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["dueDate"], "2024-05-01");
        assert_eq!(todo.due(), Some("2024-05-01"));
    }

    #[test]
    fn test_legacy_records_with_nulls_load() {
        let folders: Vec<BookmarkFolder> = serde_json::from_str(
            r#"[{"id":"folder_1700000000000.42","name":null,"bookmarks":[
                {"id":"bm_1","title":"Docs","url":null,"favicon":""}]}]"#,
        )
        .unwrap();
        assert_eq!(folders[0].name, UNNAMED_FOLDER);
        assert_eq!(folders[0].bookmarks[0].url, "");

        let favorites: Vec<Favorite> =
            serde_json::from_str(r#"[{"id":1,"label":"Mail","url":"https://mail.example","icon":""}]"#).unwrap();
        assert_eq!(favorites[0].icon, DEFAULT_FAVORITE_ICON);
    }

    #[test]
    fn test_custom_feed_stores_rss_url_key() {
        let feed = CustomFeedSource {
            id: "cf_1".to_string(),
            name: "Blog".to_string(),
            rss_url: "https://blog.example/rss".to_string(),
            icon: String::new(),
        };
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["rssUrl"], "https://blog.example/rss");
        assert_eq!(FeedSource::from(&feed).custom_id(), Some("cf_1"));
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggle_icon(), "fas fa-moon");
    }
}
