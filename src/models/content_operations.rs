use crate::helper::metadata_helpers;
use crate::models::content_store::ContentStore;
use crate::models::{Article, RawFrontmatter, TagTaxonomy};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content directory error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Frontmatter YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Invalid frontmatter in '{slug}': {reason}")]
    InvalidFrontmatter { slug: String, reason: String },
    #[error("Content not found: {0}")]
    NotFound(String),
}

/// Order in which the accessor returns articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrder {
    /// Newest first by `date`.
    #[default]
    NewestFirst,
    /// File-name order, as found in the content directory.
    Discovered,
}

/// Splits a content file into its YAML frontmatter and Markdown body.
/// Without a `---` delimited block at the very top the whole input is body.
pub fn split_frontmatter(input: &str) -> (&str, &str) {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = input.split_inclusive('\n');
    let start = match lines.next() {
        Some(first) if first.trim_end() == "---" => first.len(),
        _ => return ("", input),
    };

    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return (&input[start..offset], &input[offset + line.len()..]);
        }
        offset += line.len();
    }
    ("", input)
}

pub fn parse_frontmatter(yaml: &str) -> Result<RawFrontmatter, ContentError> {
    if yaml.trim().is_empty() {
        return Ok(RawFrontmatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

fn read_content_file(
    store: &ContentStore,
    path: &Path,
    slug: &str,
    include_content: bool,
) -> Result<Article, ContentError> {
    let raw = fs::read_to_string(path)?;
    let (yaml, body) = split_frontmatter(&raw);
    let frontmatter = parse_frontmatter(yaml).map_err(|e| ContentError::InvalidFrontmatter {
        slug: slug.to_string(),
        reason: e.to_string(),
    })?;
    metadata_helpers::normalize_article(frontmatter, body, slug, store.defaults(), include_content)
}

/// Reads one article, body included.
pub fn read_article(store: &ContentStore, slug: &str) -> Result<Article, ContentError> {
    let path = store
        .path_for_slug(slug)
        .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;
    read_content_file(store, &path, slug, true)
}

/// Lists the content files in file-name order, paired with their slugs.
pub fn list_content_files(store: &ContentStore) -> Result<Vec<(String, std::path::PathBuf)>, ContentError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(store.root())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(slug) = store.slug_for_path(entry.path()) {
            files.push((slug, entry.into_path()));
        }
    }
    Ok(files)
}

/// Reads the metadata of every article, optionally keeping only one category.
///
/// An unreadable content directory fails the whole call. A single file that
/// cannot be read or normalized is logged and left out.
pub fn read_article_summaries(
    store: &ContentStore,
    category: Option<&str>,
    order: ArticleOrder,
) -> Result<Vec<Article>, ContentError> {
    let category = category.filter(|c| !c.is_empty());
    let mut articles = Vec::new();

    for (slug, path) in list_content_files(store)? {
        match read_content_file(store, &path, &slug, false) {
            Ok(article) => {
                if category.map_or(true, |c| article.category == c) {
                    articles.push(article);
                }
            }
            Err(e) => log::warn!("Skipping content file '{}': {}", path.display(), e),
        }
    }

    if order == ArticleOrder::NewestFirst {
        articles.sort_by(metadata_helpers::compare_newest_first);
    }
    Ok(articles)
}

pub fn read_tag_taxonomy(store: &ContentStore) -> Result<TagTaxonomy, ContentError> {
    let raw = fs::read_to_string(store.tags_file())?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            write(dir.path(), name, body);
        }
        let store = ContentStore::new(dir.path(), dir.path().join("tags.json"));
        (dir, store)
    }

    #[test]
    fn split_frontmatter_separates_yaml_and_body() {
        let (yaml, body) = split_frontmatter("---\ntitle: A\n---\n# Heading\ntext\n");
        assert_eq!(yaml, "title: A\n");
        assert_eq!(body, "# Heading\ntext\n");
    }

    #[test]
    fn split_frontmatter_handles_crlf_and_missing_block() {
        let (yaml, body) = split_frontmatter("---\r\ntitle: A\r\n---\r\nbody");
        assert_eq!(yaml, "title: A\r\n");
        assert_eq!(body, "body");

        let (yaml, body) = split_frontmatter("no frontmatter here");
        assert_eq!(yaml, "");
        assert_eq!(body, "no frontmatter here");

        let (yaml, body) = split_frontmatter("---\ntitle: unterminated\n");
        assert_eq!(yaml, "");
        assert_eq!(body, "---\ntitle: unterminated\n");
    }

    #[test]
    fn tags_accept_list_or_comma_separated_string() {
        let fm = parse_frontmatter("title: A\ntags: [framework, future]\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["framework".to_string(), "future".to_string()]));

        let fm = parse_frontmatter("title: A\ntags: \"framework, future\"\n").unwrap();
        assert_eq!(fm.tags, Some(vec!["framework".to_string(), "future".to_string()]));
    }

    #[test]
    fn slug_comes_from_file_name_not_frontmatter() {
        let (_dir, store) = store_with(&[(
            "real-slug.md",
            "---\ntitle: A\ndate: 2024-01-01\nslug: fake-slug\n---\nbody\n",
        )]);
        let article = read_article(&store, "real-slug").unwrap();
        assert_eq!(article.slug, "real-slug");
        assert!(matches!(read_article(&store, "fake-slug"), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn summaries_filter_by_exact_category() {
        let (_dir, store) = store_with(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\ncategory: ai-collaboration\n---\n"),
            ("b.md", "---\ntitle: B\ndate: 2024-02-01\ncategory: product-vision\n---\n"),
            ("c.md", "---\ntitle: C\ndate: 2024-03-01\ncategory: entrepreneurship\n---\n"),
        ]);

        let matched = read_article_summaries(&store, Some("ai-collaboration"), ArticleOrder::NewestFirst).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].slug, "a");

        let all = read_article_summaries(&store, None, ArticleOrder::NewestFirst).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|a| a.content.is_none()));

        let empty_filter = read_article_summaries(&store, Some(""), ArticleOrder::NewestFirst).unwrap();
        assert_eq!(empty_filter.len(), 3);

        let wrong_case = read_article_summaries(&store, Some("AI-Collaboration"), ArticleOrder::NewestFirst).unwrap();
        assert!(wrong_case.is_empty());
    }

    #[test]
    fn summaries_sort_newest_first_unless_discovered_order_requested() {
        let (_dir, store) = store_with(&[
            ("a-old.md", "---\ntitle: Old\ndate: 2023-01-01\n---\n"),
            ("b-new.md", "---\ntitle: New\ndate: 2024-06-01\n---\n"),
            ("c-undated.md", "---\ntitle: Odd\ndate: soon\n---\n"),
        ]);

        let sorted = read_article_summaries(&store, None, ArticleOrder::NewestFirst).unwrap();
        let slugs: Vec<&str> = sorted.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b-new", "a-old", "c-undated"]);

        let discovered = read_article_summaries(&store, None, ArticleOrder::Discovered).unwrap();
        let slugs: Vec<&str> = discovered.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-old", "b-new", "c-undated"]);
    }

    #[test]
    fn invalid_files_are_skipped_and_other_extensions_ignored() {
        let (_dir, store) = store_with(&[
            ("good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\n"),
            ("no-title.md", "---\ndate: 2024-01-01\n---\n"),
            ("broken.md", "---\ntitle: [unclosed\n---\n"),
            ("notes.txt", "---\ntitle: Txt\ndate: 2024-01-01\n---\n"),
        ]);
        let all = read_article_summaries(&store, None, ArticleOrder::NewestFirst).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].slug, "good");
    }

    #[test]
    fn missing_content_directory_fails_the_listing() {
        let store = ContentStore::new("/definitely/not/here", "/definitely/not/tags.json");
        assert!(read_article_summaries(&store, None, ArticleOrder::NewestFirst).is_err());
    }

    #[test]
    fn tag_taxonomy_requires_all_three_groups() {
        let (dir, store) = store_with(&[]);
        write(dir.path(), "tags.json", r#"{"theme":["ai"],"type":["essay"],"time":["2024"]}"#);
        let taxonomy = read_tag_taxonomy(&store).unwrap();
        assert_eq!(taxonomy.r#type, vec!["essay".to_string()]);

        write(dir.path(), "tags.json", r#"{"theme":["ai"]}"#);
        assert!(matches!(read_tag_taxonomy(&store), Err(ContentError::SerdeJson(_))));
    }
}
