//! Resource extraction from rendered list and table fragments.
//!
//! Two entry points produce [`Resource`] records:
//!
//! - [`from_list`]: one resource per direct `<li>` child of a `<ul>`/`<ol>`
//! - [`from_table`]: one resource per `<tr>` that contains a link
//!
//! Items without a usable link are skipped and logged; they never abort the
//! surrounding document.

use crate::models::Resource;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node, Selector};
use tracing::{debug, warn};

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());

/// Extract resources from the direct `<li>` children of a list element.
///
/// Nested sub-lists are not visited as separate items, so their entries are
/// never counted twice. Their text still ends up in the parent item's
/// description.
pub fn from_list(list: ElementRef<'_>) -> Vec<Resource> {
    let items = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li");
    from_items(items)
}

/// Extract one resource per list item, in order.
pub fn from_items<'a>(items: impl IntoIterator<Item = ElementRef<'a>>) -> Vec<Resource> {
    items.into_iter().filter_map(from_item).collect()
}

fn from_item(item: ElementRef<'_>) -> Option<Resource> {
    let full_text = flatten_text(item);
    let Some((name, url, link_text)) = link_parts(item) else {
        warn!(item = %truncate_for_log(&full_text, 120), "List item without a link");
        return None;
    };

    let description = describe(&full_text, &link_text);
    let tags = extract_tags(&description);
    Some(Resource {
        name,
        url,
        description,
        tags,
    })
}

/// Extract resources from the rows of a table.
///
/// The first cell holding a link supplies the name and URL; the text of
/// every other cell is joined into the description.
pub fn from_table(table: ElementRef<'_>) -> Vec<Resource> {
    let mut resources = Vec::new();

    for row in table.select(&ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        if cells.is_empty() {
            continue;
        }

        let mut link = None;
        let mut description = String::new();
        for cell in cells {
            if link.is_none() {
                if let Some(parts) = link_parts(cell) {
                    link = Some(parts);
                    continue;
                }
            }
            description.push(' ');
            description.push_str(&flatten_text(cell));
        }

        match link {
            Some((name, url, _)) => {
                let description = trim_decoration(&description).to_string();
                let tags = extract_tags(&description);
                resources.push(Resource {
                    name,
                    url,
                    description,
                    tags,
                });
            }
            None => debug!("Table row without a link"),
        }
    }

    resources
}

/// Name, URL and flattened text of the first link inside `el`.
///
/// A link whose visible text is blank is not usable as a resource name and
/// is treated as absent.
fn link_parts(el: ElementRef<'_>) -> Option<(String, String, String)> {
    let link = el.select(&LINK).next()?;
    let name = link.text().collect::<String>().trim().to_string();
    if name.is_empty() {
        return None;
    }
    let url = link.value().attr("href").unwrap_or_default().trim().to_string();
    Some((name, url, flatten_text(link)))
}

/// Build a description by removing the link text from the item text.
///
/// Only the first occurrence of `link_text` is removed. If the link text
/// shows up again later in the item it stays in the description.
pub fn describe(full_text: &str, link_text: &str) -> String {
    let remainder = if link_text.is_empty() {
        full_text.to_string()
    } else {
        full_text.replacen(link_text, "", 1)
    };
    trim_decoration(&remainder).to_string()
}

/// Every backtick-delimited span in `description`, duplicates retained.
pub fn extract_tags(description: &str) -> Vec<String> {
    TAG.captures_iter(description)
        .map(|c| c[1].to_string())
        .collect()
}

fn trim_decoration(s: &str) -> &str {
    s.trim_matches(|c: char| c == '-' || c.is_whitespace())
}

/// Visible text of an element: every non-blank text fragment, trimmed and
/// joined by a single space. Inline code is kept wrapped in backticks so it
/// can be recovered as tags.
fn flatten_text(el: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(el, &mut parts);
    parts.join(" ")
}

fn collect_text(el: ElementRef<'_>, parts: &mut Vec<String>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                if child_el.value().name() == "code" {
                    let code = child_el.text().collect::<String>();
                    let code = code.trim();
                    if !code.is_empty() {
                        parts.push(format!("`{code}`"));
                    }
                } else {
                    collect_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_describe_removes_first_occurrence_only() {
        assert_eq!(describe("serde - serde helpers", "serde"), "serde helpers");
        assert_eq!(describe("foo - A tool", "foo"), "A tool");
        assert_eq!(describe("- foo -", "foo"), "");
    }

    #[test]
    fn test_extract_tags_in_order_with_duplicates() {
        assert_eq!(
            extract_tags("`cli` `database` and `cli` again"),
            vec!["cli", "database", "cli"]
        );
        assert!(extract_tags("no code here").is_empty());
        assert!(extract_tags("unbalanced ` tick").is_empty());
    }

    #[test]
    fn test_list_item_with_link_and_description() {
        let doc = Html::parse_fragment(
            r#"<ul><li><a href=" https://github.com/tokio-rs/tokio ">tokio</a> - An async runtime.</li></ul>"#,
        );
        let resources = from_list(first(&doc, "ul"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "tokio");
        assert_eq!(resources[0].url, "https://github.com/tokio-rs/tokio");
        assert_eq!(resources[0].description, "An async runtime.");
        assert!(resources[0].tags.is_empty());
    }

    #[test]
    fn test_list_item_without_link_is_skipped() {
        let doc = Html::parse_fragment(
            r#"<ul><li>Just text</li><li><a href="https://a.com">A</a></li></ul>"#,
        );
        let resources = from_list(first(&doc, "ul"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "A");
        assert_eq!(resources[0].description, "");
    }

    #[test]
    fn test_nested_items_are_not_double_counted() {
        let doc = Html::parse_fragment(
            r#"<ul>
                <li><a href="https://parent.com">Parent</a> - top
                    <ul><li><a href="https://child.com">Child</a> - nested</li></ul>
                </li>
            </ul>"#,
        );
        let resources = from_list(first(&doc, "ul"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "Parent");
        assert_eq!(resources[0].url, "https://parent.com");
    }

    #[test]
    fn test_code_spans_become_tags() {
        let doc = Html::parse_fragment(
            r#"<ul><li><code>cli</code> <code>database</code> <a href="https://x.io">a neat tool</a></li></ul>"#,
        );
        let resources = from_list(first(&doc, "ul"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "a neat tool");
        assert_eq!(resources[0].tags, vec!["cli", "database"]);
        assert!(!resources[0].description.contains("a neat tool"));
        assert_eq!(resources[0].description, "`cli` `database`");
    }

    #[test]
    fn test_link_with_blank_text_is_skipped() {
        let doc = Html::parse_fragment(
            r#"<ul><li><a href="https://badge.io"><img src="b.svg"></a> badge only</li></ul>"#,
        );
        assert!(from_list(first(&doc, "ul")).is_empty());
    }

    #[test]
    fn test_missing_href_keeps_empty_url() {
        let doc = Html::parse_fragment(r#"<ul><li><a name="anchor">Anchor</a> text</li></ul>"#);
        let resources = from_list(first(&doc, "ul"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].url, "");
        assert_eq!(resources[0].description, "text");
    }

    #[test]
    fn test_table_rows() {
        let doc = Html::parse_fragment(
            r#"<table>
                <thead><tr><th>Name</th><th>URL</th></tr></thead>
                <tbody>
                    <tr><td><a href="https://a.com">Foo</a></td><td>desc</td></tr>
                    <tr><td>no link</td><td>here</td></tr>
                </tbody>
            </table>"#,
        );
        let resources = from_table(first(&doc, "table"));
        assert_eq!(resources.len(), 1);
        assert_eq!(
            resources[0],
            Resource {
                name: "Foo".to_string(),
                url: "https://a.com".to_string(),
                description: "desc".to_string(),
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_table_second_link_goes_to_description() {
        let doc = Html::parse_fragment(
            r#"<table><tr>
                <td>`rust`</td>
                <td><a href="https://one.com">One</a></td>
                <td><a href="https://two.com">Two</a></td>
            </tr></table>"#,
        );
        let resources = from_table(first(&doc, "table"));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "One");
        assert_eq!(resources[0].url, "https://one.com");
        assert_eq!(resources[0].description, "`rust` Two");
        assert_eq!(resources[0].tags, vec!["rust"]);
    }
}
