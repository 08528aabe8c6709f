//! View Helpers
//!
//! Pure formatting used by the components.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Bookmark;

pub const EMPTY_FAVORITES: &str = "No favorites yet. Add one!";
pub const EMPTY_NOTES: &str = "No notes yet.";
pub const EMPTY_TODOS: &str = "No tasks yet.";
pub const EMPTY_BOOKMARKS: &str = "No bookmarks found. Create a folder or import your 'bookmarks.html' file.";
pub const EMPTY_FOLDER: &str = "This folder is empty.";
pub const FEED_UNAVAILABLE: &str = "Could not load feed.";
pub const IMPORT_FAILED: &str = "Error parsing bookmarks file.";

const DISPLAY_DATE: &str = "%-m/%-d/%Y";

/// Due date as `M/D/YYYY`. `None` when there is no due date; text that is not
/// an ISO date is shown as entered.
pub fn format_due_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => raw.to_string(),
    })
}

/// Feed item date as `M/D/YYYY`. Accepts the service's `YYYY-MM-DD HH:MM:SS`,
/// RFC 3339 and RFC 2822; anything else is shown as-is.
pub fn format_pub_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| DateTime::parse_from_rfc2822(raw).map(|dt| dt.date_naive()));

    match date {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Note content split on newlines, one entry per rendered line
pub fn note_lines(content: &str) -> Vec<String> {
    content.split('\n').map(|line| line.trim_end_matches('\r').to_string()).collect()
}

/// Text shown for a bookmark: its title, or the url when untitled
pub fn bookmark_label(bookmark: &Bookmark) -> &str {
    if bookmark.title.trim().is_empty() {
        &bookmark.url
    } else {
        &bookmark.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_due_date() {
        assert_eq!(format_due_date(""), None);
        assert_eq!(format_due_date("2024-07-04").as_deref(), Some("7/4/2024"));
        assert_eq!(format_due_date("next week").as_deref(), Some("next week"));
    }

    #[test]
    fn test_format_pub_date_variants() {
        assert_eq!(format_pub_date("2024-01-15 09:30:00"), "1/15/2024");
        assert_eq!(format_pub_date("2024-01-15T09:30:00Z"), "1/15/2024");
        assert_eq!(format_pub_date("Mon, 15 Jan 2024 09:30:00 +0000"), "1/15/2024");
        assert_eq!(format_pub_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_note_lines() {
        assert_eq!(note_lines("a\r\nb\n\nc"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_bookmark_label_falls_back_to_url() {
        let bookmark = Bookmark {
            id: "bm_1".to_string(),
            title: " ".to_string(),
            url: "https://example.com".to_string(),
            favicon: String::new(),
        };
        assert_eq!(bookmark_label(&bookmark), "https://example.com");
    }
}
