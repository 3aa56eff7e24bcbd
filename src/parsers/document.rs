//! Awesome-list README parsing.
//!
//! A README is rendered from Markdown to HTML and then split into
//! categories using the first strategy that matches the document's shape:
//!
//! 1. **Header-sectioned**: any `<h2>`/`<h3>` exists. Each heading opens a
//!    category that absorbs the sibling lists following it, up to the next
//!    `<h1>`–`<h3>` or the end of the heading's container.
//! 2. **Tables**: no headings but at least one `<table>`. Each table with
//!    resources becomes a `"Resources"` category.
//! 3. **Flat list**: every `<li>` in the document goes into a single
//!    `"Resources"` category.
//!
//! Tables nested under a heading are not extracted by the header-sectioned
//! strategy.

use super::resources;
use crate::error::{Error, Result};
use crate::models::{AwesomeList, Category};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Headings that never become categories (compared trimmed and lowercased).
pub const IGNORED_CATEGORIES: [&str; 3] = ["contents", "contributing", "license"];

/// Name of the synthetic category used by the fallback strategies.
pub const FALLBACK_CATEGORY: &str = "Resources";

static SECTION_HEADINGS: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3").unwrap());
static TABLES: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

/// Kind of a block in the flattened document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(u8),
    List,
    Other,
}

impl BlockKind {
    fn of(el: ElementRef<'_>) -> Self {
        match el.value().name() {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "ul" | "ol" => Self::List,
            _ => Self::Other,
        }
    }
}

/// One element of the document in document order, tagged with its kind and
/// the container it sits in. Lists are leaves; other elements are expanded.
#[derive(Debug, Clone, Copy)]
struct Block<'a> {
    kind: BlockKind,
    container: usize,
    element: ElementRef<'a>,
}

/// Flatten the element tree of `document` into blocks.
///
/// Every expanded element gets a fresh container id, so siblings share an
/// id and a nested container never shares one with its parent.
fn flatten(document: &Html) -> (Vec<Block<'_>>, usize) {
    fn walk<'a>(
        parent: ElementRef<'a>,
        container: usize,
        containers: &mut usize,
        out: &mut Vec<Block<'a>>,
    ) {
        for element in parent.children().filter_map(ElementRef::wrap) {
            let kind = BlockKind::of(element);
            out.push(Block { kind, container, element });
            if kind == BlockKind::Other {
                *containers += 1;
                let nested = *containers;
                walk(element, nested, containers, out);
            }
        }
    }

    let mut blocks = Vec::new();
    let mut containers = 0;
    walk(document.root_element(), 0, &mut containers, &mut blocks);
    (blocks, containers + 1)
}

/// Read a README from disk and parse it into an [`AwesomeList`].
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read. Malformed content
/// inside the document never fails the parse.
#[instrument(level = "info", skip_all, fields(path = %readme_path.display(), %list_name))]
pub async fn parse_awesome_list(readme_path: &Path, list_name: &str) -> Result<AwesomeList> {
    info!("Parsing file");
    let content = fs::read_to_string(readme_path)
        .await
        .map_err(|e| Error::io(readme_path, e))?;
    Ok(parse_markdown(&content, list_name))
}

/// Render Markdown to HTML with table support enabled.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Parse Markdown source into an [`AwesomeList`] named `list_name`.
pub fn parse_markdown(markdown: &str, list_name: &str) -> AwesomeList {
    parse_html(&render_markdown(markdown), list_name)
}

/// Parse rendered HTML into an [`AwesomeList`] named `list_name`.
pub fn parse_html(html: &str, list_name: &str) -> AwesomeList {
    let document = Html::parse_document(html);

    let categories = if document.select(&SECTION_HEADINGS).next().is_some() {
        debug!("Using header-sectioned strategy");
        sectioned_categories(&document)
    } else if document.select(&TABLES).next().is_some() {
        debug!("Using table strategy");
        table_categories(&document)
    } else {
        debug!("Using flat list strategy");
        flat_list_categories(&document)
    };

    AwesomeList {
        name: list_name.to_string(),
        categories,
    }
}

fn is_ignored(category_name: &str) -> bool {
    let folded = category_name.trim().to_lowercase();
    IGNORED_CATEGORIES.iter().any(|ignored| *ignored == folded)
}

/// One category per section heading, in document order.
///
/// A single pass over the flattened blocks keeps the open category of each
/// container. A list joins the category open in its own container; an
/// `<h1>`–`<h3>` replaces it, so headings nested in `<details>` or a
/// blockquote collect the lists next to them and stop at the container's end.
fn sectioned_categories(document: &Html) -> Vec<Category> {
    let (blocks, containers) = flatten(document);
    let mut open: Vec<Option<usize>> = vec![None; containers];
    let mut categories: Vec<Category> = Vec::new();

    for block in blocks {
        match block.kind {
            BlockKind::Heading(1) => open[block.container] = None,
            BlockKind::Heading(2 | 3) => {
                let name = block.element.text().collect::<String>().trim().to_string();
                if is_ignored(&name) {
                    debug!(category = %name, "Skipping ignored section");
                    open[block.container] = None;
                    continue;
                }
                open[block.container] = Some(categories.len());
                categories.push(Category::new(name));
            }
            BlockKind::List => {
                if let Some(index) = open[block.container] {
                    categories[index]
                        .resources
                        .extend(resources::from_list(block.element));
                }
            }
            BlockKind::Heading(_) | BlockKind::Other => {}
        }
    }

    categories
}

fn table_categories(document: &Html) -> Vec<Category> {
    document
        .select(&TABLES)
        .map(resources::from_table)
        .filter(|found| !found.is_empty())
        .map(|found| Category {
            name: FALLBACK_CATEGORY.to_string(),
            resources: found,
        })
        .collect()
}

fn flat_list_categories(document: &Html) -> Vec<Category> {
    let found = resources::from_items(document.select(&LIST_ITEMS));
    if found.is_empty() {
        return Vec::new();
    }
    vec![Category {
        name: FALLBACK_CATEGORY.to_string(),
        resources: found,
    }]
}
