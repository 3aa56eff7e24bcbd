//! Corpus collection, URL filtering and URL statistics.
//!
//! The collector walks a source directory for awesome-list checkouts,
//! parses each README and aggregates the results into a [`Corpus`].
//!
//! # Post-processing
//!
//! | Mode | Drops anything | Produces [`UrlStats`] |
//! |------|----------------|-----------------------|
//! | none | no | no |
//! | stats | no | yes |
//! | filter | invalid resources, then empty categories and lists | yes |
//!
//! When both flags are set, filtering wins and its counts are reported.

use crate::error::{Error, Result};
use crate::models::{AwesomeList, Category, Corpus, FilterReport, UrlStats};
use crate::parsers::parse_awesome_list;
use crate::utils::list_name_from_dir;
use crate::validate::is_valid_url;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Directory-name prefix that marks an awesome-list checkout.
pub const LIST_DIR_PREFIX: &str = "awesome-";

/// Entry document looked up inside each checkout.
pub const README_FILE: &str = "README.md";

/// What to do with the URLs of collected resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Drop resources with invalid URLs, then empty categories and lists.
    pub filter_urls: bool,
    /// Count valid and invalid URLs without dropping anything.
    pub url_stats: bool,
}

/// Output of a collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub corpus: Corpus,
    /// Present when filtering or statistics were requested.
    pub stats: Option<UrlStats>,
}

/// Find checkout directories under `source_dir`, sorted by name.
///
/// # Errors
///
/// Returns [`Error::Io`] if `source_dir` itself cannot be listed.
#[instrument(level = "info", skip_all, fields(source_dir = %source_dir.display()))]
pub async fn discover_list_dirs(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(source_dir)
        .await
        .map_err(|e| Error::io(source_dir, e))?;

    let mut dirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io(source_dir, e))?
    {
        // Follows symlinks, so a linked checkout counts as a directory
        let is_dir = fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let named = entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(LIST_DIR_PREFIX));
        if is_dir && named {
            dirs.push(entry.path());
        }
    }

    dirs.sort();
    info!(count = dirs.len(), "Discovered awesome-list checkouts");
    Ok(dirs)
}

/// Parse every checkout under `source_dir` and aggregate the results.
///
/// A README that cannot be read is logged and skipped; only failing to list
/// `source_dir` is an error.
#[instrument(level = "info", skip_all, fields(source_dir = %source_dir.display(), ?options))]
pub async fn collect(source_dir: &Path, options: CollectOptions) -> Result<Collection> {
    let mut corpus = Corpus::new();

    for dir in discover_list_dirs(source_dir).await? {
        let readme = dir.join(README_FILE);
        if !fs::try_exists(&readme).await.unwrap_or(false) {
            continue;
        }

        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let list_name = list_name_from_dir(&dir_name);
        info!(list = %list_name, "Processing awesome list");

        match parse_awesome_list(&readme, &list_name).await {
            Ok(list) => {
                info!(
                    list = %list.name,
                    resources = list.resource_count(),
                    categories = list.categories.len(),
                    "Parsed awesome list"
                );
                corpus.push(list);
            }
            Err(e) => error!(list = %list_name, error = %e, "Failed to process awesome list"),
        }
    }

    let (corpus, stats) = if options.filter_urls {
        let (filtered, stats) = filter_corpus(corpus);
        (filtered, Some(stats))
    } else if options.url_stats {
        let stats = url_stats(&corpus);
        (corpus, Some(stats))
    } else {
        (corpus, None)
    };

    info!(lists = corpus.len(), "Collection complete");
    Ok(Collection { corpus, stats })
}

/// Drop resources with invalid URLs, then categories and lists left empty.
///
/// The returned statistics count every resource seen before filtering.
pub fn filter_corpus(corpus: Corpus) -> (Corpus, UrlStats) {
    let mut valid = 0;
    let mut invalid = 0;

    let filtered = corpus
        .into_iter()
        .filter_map(|list| {
            let categories: Vec<Category> = list
                .categories
                .into_iter()
                .filter_map(|category| {
                    let resources: Vec<_> = category
                        .resources
                        .into_iter()
                        .filter(|resource| {
                            if is_valid_url(resource.url.as_str()) {
                                valid += 1;
                                true
                            } else {
                                invalid += 1;
                                info!(
                                    resource = %resource.name,
                                    url = %resource.url,
                                    "Filtering out resource with invalid URL"
                                );
                                false
                            }
                        })
                        .collect();
                    (!resources.is_empty()).then(|| Category {
                        name: category.name,
                        resources,
                    })
                })
                .collect();
            (!categories.is_empty()).then(|| AwesomeList {
                name: list.name,
                categories,
            })
        })
        .collect();

    (filtered, UrlStats::from_counts(valid, invalid))
}

/// Filter a corpus and summarize what was removed.
pub fn filter_with_report(corpus: Corpus) -> (Corpus, FilterReport) {
    let (filtered, stats) = filter_corpus(corpus);
    (filtered, FilterReport::from(stats))
}

/// Count valid and invalid URLs without modifying the corpus.
pub fn url_stats(corpus: &Corpus) -> UrlStats {
    let (valid, invalid) = corpus
        .iter()
        .flat_map(|list| &list.categories)
        .flat_map(|category| &category.resources)
        .fold((0, 0), |(valid, invalid), resource| {
            if is_valid_url(resource.url.as_str()) {
                (valid + 1, invalid)
            } else {
                (valid, invalid + 1)
            }
        });
    UrlStats::from_counts(valid, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;
    use std::fs as stdfs;

    fn resource(name: &str, url: &str) -> Resource {
        Resource {
            name: name.to_string(),
            url: url.to_string(),
            description: String::new(),
            tags: vec![],
        }
    }

    fn category(name: &str, resources: Vec<Resource>) -> Category {
        Category {
            name: name.to_string(),
            resources,
        }
    }

    fn sample_corpus() -> Corpus {
        vec![
            AwesomeList {
                name: "Awesome Mixed".to_string(),
                categories: vec![
                    category(
                        "Good",
                        vec![resource("a", "https://a.com"), resource("b", "#anchor")],
                    ),
                    category("Bad", vec![resource("c", "/relative")]),
                    category("Empty", vec![]),
                ],
            },
            AwesomeList {
                name: "Awesome Broken".to_string(),
                categories: vec![category("Only", vec![resource("d", "")])],
            },
        ]
    }

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("awesome_lists_collect_{}_{}", name, std::process::id()));
        let _ = stdfs::remove_dir_all(&p);
        stdfs::create_dir_all(&p).unwrap();
        p
    }

    fn write_readme(root: &Path, dir: &str, content: &str) {
        let d = root.join(dir);
        stdfs::create_dir_all(&d).unwrap();
        stdfs::write(d.join(README_FILE), content).unwrap();
    }

    #[test]
    fn test_filter_drops_invalid_and_propagates_emptiness() {
        let (filtered, stats) = filter_corpus(sample_corpus());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Awesome Mixed");
        assert_eq!(filtered[0].categories.len(), 1);
        assert_eq!(filtered[0].categories[0].name, "Good");
        assert_eq!(filtered[0].categories[0].resources, vec![resource("a", "https://a.com")]);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.invalid, 3);
        assert_eq!(stats.valid_percent, 25.0);
        assert_eq!(stats.invalid_percent, 75.0);
    }

    #[test]
    fn test_filter_is_a_subset_of_valid_resources() {
        let original = sample_corpus();
        let before: usize = original.iter().map(AwesomeList::resource_count).sum();
        let (filtered, _) = filter_corpus(original);
        let after: usize = filtered.iter().map(AwesomeList::resource_count).sum();

        assert!(after <= before);
        for list in &filtered {
            for category in &list.categories {
                assert!(!category.resources.is_empty());
                for r in &category.resources {
                    assert!(is_valid_url(r.url.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_url_stats_does_not_drop() {
        let corpus = sample_corpus();
        let stats = url_stats(&corpus);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.invalid, 3);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_stats_for_empty_corpus() {
        let stats = url_stats(&Corpus::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.valid_percent, 0.0);
        assert_eq!(stats.invalid_percent, 0.0);

        let (filtered, stats) = filter_corpus(Corpus::new());
        assert!(filtered.is_empty());
        assert_eq!(stats.invalid_percent, 0.0);
    }

    #[test]
    fn test_filter_with_report() {
        let (_, report) = filter_with_report(sample_corpus());
        assert_eq!(report.total_resources, 4);
        assert_eq!(report.removed_resources, 3);
        assert_eq!(report.percentage_removed, 75.0);
    }

    #[tokio::test]
    async fn test_discover_only_prefixed_dirs_sorted() {
        let root = tmp_dir("discover");
        write_readme(&root, "awesome-zig", "- [z](https://z.com)");
        write_readme(&root, "awesome-ada", "- [a](https://a.com)");
        write_readme(&root, "open-source-ios-apps", "- [o](https://o.com)");
        stdfs::write(root.join("awesome-file"), "not a dir").unwrap();

        let dirs = discover_list_dirs(&root).await.unwrap();
        let names: Vec<String> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["awesome-ada", "awesome-zig"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_discover_follows_symlinked_checkouts() {
        let root = tmp_dir("symlink");
        let elsewhere = tmp_dir("symlink_target");
        write_readme(&elsewhere, "checkout", "- [a](https://a.com)");
        std::os::unix::fs::symlink(elsewhere.join("checkout"), root.join("awesome-linked")).unwrap();

        let dirs = discover_list_dirs(&root).await.unwrap();
        assert_eq!(dirs, vec![root.join("awesome-linked")]);

        let collection = collect(&root, CollectOptions::default()).await.unwrap();
        assert_eq!(collection.corpus.len(), 1);
        assert_eq!(collection.corpus[0].name, "Awesome Linked");
    }

    #[tokio::test]
    async fn test_collect_without_post_processing() {
        let root = tmp_dir("plain");
        write_readme(
            &root,
            "awesome-rust",
            "## Tools\n\n- [ripgrep](https://github.com/BurntSushi/ripgrep) - grep\n- [local](./docs.md)\n",
        );
        write_readme(&root, "awesome-go", "## Empty\n\nNothing.\n");
        stdfs::create_dir_all(root.join("awesome-no-readme")).unwrap();

        let collection = collect(&root, CollectOptions::default()).await.unwrap();
        assert!(collection.stats.is_none());

        let names: Vec<&str> = collection.corpus.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Awesome Go", "Awesome Rust"]);
        assert_eq!(collection.corpus[0].categories.len(), 1);
        assert!(collection.corpus[0].categories[0].resources.is_empty());
        assert_eq!(collection.corpus[1].resource_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_with_filter() {
        let root = tmp_dir("filter");
        write_readme(
            &root,
            "awesome-rust",
            "## Tools\n\n- [ripgrep](https://github.com/BurntSushi/ripgrep) - grep\n- [local](./docs.md)\n",
        );
        write_readme(&root, "awesome-go", "## Empty\n\nNothing.\n");

        let options = CollectOptions {
            filter_urls: true,
            url_stats: true,
        };
        let collection = collect(&root, options).await.unwrap();

        assert_eq!(collection.corpus.len(), 1);
        assert_eq!(collection.corpus[0].name, "Awesome Rust");
        assert_eq!(collection.corpus[0].resource_count(), 1);

        let stats = collection.stats.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.invalid, 1);
    }

    #[tokio::test]
    async fn test_collect_with_stats_only() {
        let root = tmp_dir("stats");
        write_readme(&root, "awesome-x", "- [bad](ftp://x.com)\n");

        let options = CollectOptions {
            filter_urls: false,
            url_stats: true,
        };
        let collection = collect(&root, options).await.unwrap();
        assert_eq!(collection.corpus.len(), 1);
        assert_eq!(collection.stats.unwrap().invalid, 1);
    }

    #[tokio::test]
    async fn test_collect_missing_source_dir_is_an_error() {
        let root = std::env::temp_dir().join("awesome_lists_collect_does_not_exist");
        let _ = stdfs::remove_dir_all(&root);
        assert!(collect(&root, CollectOptions::default()).await.is_err());
    }
}
