//! Bookmark Import
//!
//! Reads a browser bookmark export (Netscape bookmark file: nested `<DL>`
//! lists, `<DT>` entries, `<H3>` folder headers, `<A HREF>` bookmarks) into a
//! flat list of folders. Nested folders become top-level siblings.

use scraper::{ElementRef, Html, Selector};

use crate::error::ImportError;
use crate::ids::{IdGenerator, BOOKMARK_PREFIX, FOLDER_PREFIX};
use crate::models::{Bookmark, BookmarkFolder, UNNAMED_FOLDER};

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Favicon reference for a bookmark url, derived from its host.
/// Empty when the url does not parse or has no host.
pub fn favicon_url(raw: &str) -> String {
    let Ok(parsed) = url::Url::parse(raw.trim()) else {
        return String::new();
    };
    match parsed.host_str() {
        Some(host) if !host.is_empty() => format!("{}?domain={}&sz=32", FAVICON_SERVICE, host),
        _ => String::new(),
    }
}

/// Folder as seen during the walk, before the keep/drop decision
#[derive(Debug)]
struct ParsedFolder {
    id: String,
    /// Header text; `None` when absent, blank or the default name
    name: Option<String>,
    /// Whether the folder had an entry list at all
    has_list: bool,
    bookmarks: Vec<Bookmark>,
}

impl ParsedFolder {
    fn new(ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_prefixed(FOLDER_PREFIX),
            name: None,
            has_list: false,
            bookmarks: Vec::new(),
        }
    }

    /// Empty folders survive only when they carry a real name and a list
    fn is_kept(&self) -> bool {
        !self.bookmarks.is_empty() || (self.name.is_some() && self.has_list)
    }

    fn into_folder(self) -> BookmarkFolder {
        BookmarkFolder {
            id: self.id,
            name: self.name.unwrap_or_else(|| UNNAMED_FOLDER.to_string()),
            bookmarks: self.bookmarks,
        }
    }
}

/// Parse an export into folders, in document order with nested folders placed
/// before the folder that contained them.
///
/// A document without a top-level `<DL>` under `<body>` yields an empty list.
pub fn parse_bookmarks_html(html: &str, ids: &mut IdGenerator) -> Result<Vec<BookmarkFolder>, ImportError> {
    let document = Html::parse_document(html);
    let root_selector = Selector::parse("body > dl").map_err(|e| ImportError::Parse(format!("{:?}", e)))?;

    let Some(root) = document.select(&root_selector).next() else {
        log::info!("[IMPORT] No top-level bookmark list found");
        return Ok(Vec::new());
    };

    let mut parsed = Vec::new();
    for entry in root.child_elements().filter(|el| is_tag(el, "dt")) {
        let (folder, nested) = parse_folder(entry, ids);
        parsed.extend(nested);
        parsed.push(folder);
    }

    let total = parsed.len();
    let folders: Vec<BookmarkFolder> = parsed
        .into_iter()
        .filter(ParsedFolder::is_kept)
        .map(ParsedFolder::into_folder)
        .collect();
    log::info!("[IMPORT] Parsed {} folders ({} dropped as empty and unnamed)", folders.len(), total - folders.len());

    Ok(folders)
}

/// Walk one folder node. Returns the folder and every folder found beneath it,
/// already flattened.
fn parse_folder(node: ElementRef<'_>, ids: &mut IdGenerator) -> (ParsedFolder, Vec<ParsedFolder>) {
    let mut folder = ParsedFolder::new(ids);
    let mut nested = Vec::new();

    for child in node.child_elements() {
        match child.value().name() {
            "h3" => {
                let name = element_text(child);
                folder.name = Some(name).filter(|n| !n.is_empty() && n != UNNAMED_FOLDER);
            }
            "dl" => {
                folder.has_list = true;
                for entry in child.child_elements().filter(|el| is_tag(el, "dt")) {
                    if let Some(anchor) = first_child(entry, "a") {
                        match parse_bookmark(anchor, ids) {
                            Some(bookmark) => folder.bookmarks.push(bookmark),
                            None => log::debug!("[IMPORT] Skipping bookmark without href"),
                        }
                    } else if first_child(entry, "dl").is_some() {
                        // header is optional; `is_kept` drops unnamed empty lists
                        let (sub_folder, deeper) = parse_folder(entry, ids);
                        nested.extend(deeper);
                        nested.push(sub_folder);
                    }
                }
            }
            _ => {}
        }
    }

    (folder, nested)
}

fn parse_bookmark(anchor: ElementRef<'_>, ids: &mut IdGenerator) -> Option<Bookmark> {
    let url = anchor.attr("href").map(str::trim).filter(|href| !href.is_empty())?;
    Some(Bookmark {
        id: ids.next_prefixed(BOOKMARK_PREFIX),
        title: element_text(anchor),
        url: url.to_string(),
        favicon: favicon_url(url),
    })
}

fn is_tag(element: &ElementRef<'_>, name: &str) -> bool {
    element.value().name() == name
}

fn first_child<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element.child_elements().find(|el| is_tag(el, name))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(body: &str) -> String {
        format!(
            r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file. -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
{}
</DL><p>
"#,
            body
        )
    }

    fn parse(html: &str) -> Vec<BookmarkFolder> {
        parse_bookmarks_html(html, &mut IdGenerator::new()).unwrap()
    }

    #[test]
    fn test_favicon_from_host() {
        assert_eq!(
            favicon_url("https://docs.rs/serde/latest"),
            "https://www.google.com/s2/favicons?domain=docs.rs&sz=32"
        );
        assert_eq!(favicon_url("not a url"), "");
        assert_eq!(favicon_url("mailto:someone@example.com"), "");
    }

    #[test]
    fn test_named_empty_folder_is_kept() {
        let html = export(
            r#"    <DT><H3 ADD_DATE="1700000000">Work</H3>
    <DL><p>
        <DT><A HREF="https://github.com/" ADD_DATE="1700000000">GitHub</A>
    </DL><p>
    <DT><H3>Reading List</H3>
    <DL><p>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].name, "Work");
        assert_eq!(folders[0].bookmarks.len(), 1);
        assert_eq!(folders[0].bookmarks[0].title, "GitHub");
        assert_eq!(folders[0].bookmarks[0].url, "https://github.com/");
        assert_eq!(folders[0].bookmarks[0].favicon, favicon_url("https://github.com/"));
        assert_eq!(folders[1].name, "Reading List");
        assert!(folders[1].bookmarks.is_empty());
    }

    #[test]
    fn test_unnamed_empty_folder_is_dropped() {
        let html = export(
            r#"    <DT><H3>Tools</H3>
    <DL><p>
        <DT><A HREF="https://crates.io/">crates.io</A>
    </DL><p>
    <DT><DL><p>
    </DL><p>
    <DT><H3></H3>
    <DL><p>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Tools");
    }

    #[test]
    fn test_unnamed_folder_with_bookmarks_is_kept() {
        let html = export(
            r#"    <DT><DL><p>
        <DT><A HREF="https://example.com/">Example</A>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, UNNAMED_FOLDER);
        assert_eq!(folders[0].bookmarks.len(), 1);
    }

    #[test]
    fn test_nested_list_without_header_keeps_its_bookmarks() {
        let html = export(
            r#"    <DT><H3>Parent</H3>
    <DL><p>
        <DT><DL><p>
            <DT><A HREF="https://nested.example/">Nested</A>
        </DL><p>
        <DT><DL><p>
        </DL><p>
    </DL><p>
    <DT><DL><p>
        <DT><A HREF="https://top.example/">Top</A>
    </DL><p>"#,
        );
        let folders = parse(&html);
        let summary: Vec<(&str, Vec<&str>)> = folders
            .iter()
            .map(|f| (f.name.as_str(), f.bookmarks.iter().map(|b| b.title.as_str()).collect()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (UNNAMED_FOLDER, vec!["Nested"]),
                ("Parent", vec![]),
                (UNNAMED_FOLDER, vec!["Top"]),
            ]
        );
    }

    #[test]
    fn test_missing_href_is_skipped() {
        let html = export(
            r#"    <DT><H3>Mixed</H3>
    <DL><p>
        <DT><A>No link here</A>
        <DT><A HREF="">Empty link</A>
        <DT><A HREF="https://www.rust-lang.org/">Rust</A>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].bookmarks.len(), 1);
        assert_eq!(folders[0].bookmarks[0].title, "Rust");
    }

    #[test]
    fn test_unparseable_url_keeps_bookmark_with_empty_favicon() {
        let html = export(
            r#"    <DT><H3>Local</H3>
    <DL><p>
        <DT><A HREF="relative/page.html">Relative</A>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders[0].bookmarks.len(), 1);
        assert_eq!(folders[0].bookmarks[0].favicon, "");
    }

    #[test]
    fn test_nested_folders_are_flattened_before_parent() {
        let html = export(
            r#"    <DT><H3>Dev</H3>
    <DL><p>
        <DT><A HREF="https://doc.rust-lang.org/">Rust Docs</A>
        <DT><H3>Frontend</H3>
        <DL><p>
            <DT><H3>CSS</H3>
            <DL><p>
                <DT><A HREF="https://developer.mozilla.org/">MDN</A>
            </DL><p>
            <DT><A HREF="https://leptos.dev/">Leptos</A>
        </DL><p>
        <DT><A HREF="https://crates.io/">Crates</A>
    </DL><p>
    <DT><H3>News</H3>
    <DL><p>
        <DT><A HREF="https://lwn.net/">LWN</A>
    </DL><p>"#,
        );
        let folders = parse(&html);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["CSS", "Frontend", "Dev", "News"]);
        let dev = &folders[2];
        let titles: Vec<&str> = dev.bookmarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust Docs", "Crates"]);
        assert_eq!(folders[1].bookmarks[0].title, "Leptos");
    }

    #[test]
    fn test_header_without_list_is_dropped() {
        let html = export(
            r#"    <DT><H3>Orphan header</H3>
    <DT><H3>Real</H3>
    <DL><p>
        <DT><H3>Nested orphan</H3>
        <DT><A HREF="https://example.org/">Example</A>
    </DL><p>"#,
        );
        let folders = parse(&html);

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Real");
    }

    #[test]
    fn test_no_root_list_yields_empty_result() {
        let folders = parse("<html><body><p>Not a bookmark file</p></body></html>");
        assert!(folders.is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let html = export(
            r#"    <DT><H3>A</H3>
    <DL><p>
        <DT><A HREF="https://a.example/">A1</A>
        <DT><A HREF="https://a.example/2">A2</A>
    </DL><p>
    <DT><H3>B</H3>
    <DL><p>
        <DT><A HREF="https://b.example/">B1</A>
    </DL><p>"#,
        );
        let folders = parse(&html);
        let mut ids: Vec<&str> = folders
            .iter()
            .flat_map(|f| std::iter::once(f.id.as_str()).chain(f.bookmarks.iter().map(|b| b.id.as_str())))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(folders[0].id.starts_with(FOLDER_PREFIX));
        assert!(folders[0].bookmarks[0].id.starts_with(BOOKMARK_PREFIX));
    }
}
