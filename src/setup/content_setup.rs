use crate::models::content_operations::{self, ContentError};
use crate::models::content_store::ContentStore;
use crate::models::TagTaxonomy;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("'{0}' already exists")]
    AlreadyExists(String),
    #[error("Invalid slug '{0}': use lowercase letters, digits and hyphens, and avoid 'tags' and 'listing'")]
    InvalidSlug(String),
}

/// Creates the content directory and an empty tag taxonomy, leaving existing files alone.
/// Returns the paths that were created.
pub fn setup_content_store(store: &ContentStore) -> Result<Vec<PathBuf>, SetupError> {
    let mut created = Vec::new();

    if !store.root().is_dir() {
        fs::create_dir_all(store.root())?;
        created.push(store.root().to_path_buf());
    }

    let tags_file = store.tags_file();
    if !tags_file.exists() {
        if let Some(parent) = tags_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let empty = TagTaxonomy { theme: Vec::new(), r#type: Vec::new(), time: Vec::new() };
        fs::write(tags_file, serde_json::to_string_pretty(&empty)?)?;
        created.push(tags_file.to_path_buf());
    }

    Ok(created)
}

/// Outcome of normalizing one content file.
#[derive(Debug)]
pub struct FileReport {
    pub slug: String,
    pub result: Result<String, String>,
}

/// Normalizes every content file and reports each one individually.
pub fn check_content(store: &ContentStore) -> Result<Vec<FileReport>, SetupError> {
    let reports = content_operations::list_content_files(store)?
        .into_iter()
        .map(|(slug, _)| {
            let result = content_operations::read_article(store, &slug)
                .map(|a| format!("{} ({}, {}, {})", a.title, a.date, a.category, a.read_time))
                .map_err(|e| e.to_string());
            FileReport { slug, result }
        })
        .collect();
    Ok(reports)
}

/// Slugs taken by fixed routes next to `/api/insights/{slug}`.
pub const RESERVED_SLUGS: [&str; 2] = ["tags", "listing"];

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !RESERVED_SLUGS.contains(&slug)
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Writes a new article skeleton. Never overwrites an existing file.
pub fn scaffold_article(
    store: &ContentStore,
    slug: &str,
    title: &str,
    category: Option<&str>,
    tags: &[String],
    date: NaiveDate,
) -> Result<PathBuf, SetupError> {
    if !is_valid_slug(slug) {
        return Err(SetupError::InvalidSlug(slug.to_string()));
    }
    let path = store.root().join(format!("{}.{}", slug, store.extension()));
    if path.exists() {
        return Err(SetupError::AlreadyExists(path.display().to_string()));
    }

    let mut frontmatter = format!(
        "---\ntitle: {}\ndate: \"{}\"\nexcerpt: \"\"\n",
        yaml_string(title),
        date.format("%Y-%m-%d")
    );
    if let Some(category) = category {
        frontmatter.push_str(&format!("category: {}\n", yaml_string(category)));
    }
    if !tags.is_empty() {
        frontmatter.push_str("tags:\n");
        for tag in tags {
            frontmatter.push_str(&format!("  - {}\n", yaml_string(tag)));
        }
    }
    frontmatter.push_str("featured: false\n---\n\n");
    frontmatter.push_str(&format!("# {}\n", title));

    fs::create_dir_all(store.root())?;
    fs::write(&path, frontmatter)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("insights"), dir.path().join("data").join("tags.json"));
        (dir, store)
    }

    #[test]
    fn setup_creates_directory_and_taxonomy_once() {
        let (_dir, store) = temp_store();
        let created = setup_content_store(&store).unwrap();
        assert_eq!(created.len(), 2);
        assert!(content_operations::read_tag_taxonomy(&store).unwrap().theme.is_empty());

        assert!(setup_content_store(&store).unwrap().is_empty());
    }

    #[test]
    fn scaffolded_article_normalizes_and_is_not_overwritten() {
        let (_dir, store) = temp_store();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let tags = vec!["framework".to_string(), "future".to_string()];
        scaffold_article(&store, "new-post", "A \"quoted\" title", Some("product-vision"), &tags, date).unwrap();

        let article = content_operations::read_article(&store, "new-post").unwrap();
        assert_eq!(article.title, "A \"quoted\" title");
        assert_eq!(article.date, "2024-06-01");
        assert_eq!(article.category, "product-vision");
        assert_eq!(article.tags, Some(tags.clone()));
        assert_eq!(article.featured, Some(false));

        let again = scaffold_article(&store, "new-post", "Other", None, &[], date);
        assert!(matches!(again, Err(SetupError::AlreadyExists(_))));
    }

    #[test]
    fn scaffold_rejects_bad_slugs() {
        let (_dir, store) = temp_store();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        for slug in ["", "Upper", "../escape", "-lead", "with space", "tags", "listing"] {
            assert!(matches!(
                scaffold_article(&store, slug, "T", None, &[], date),
                Err(SetupError::InvalidSlug(_))
            ));
        }
    }

    #[test]
    fn check_reports_each_file() {
        let (_dir, store) = temp_store();
        setup_content_store(&store).unwrap();
        fs::write(store.root().join("good.md"), "---\ntitle: Good\ndate: 2024-01-01\n---\nbody").unwrap();
        fs::write(store.root().join("bad.md"), "---\ntitle: Bad\n---\n").unwrap();

        let reports = check_content(&store).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].slug, "bad");
        assert!(reports[0].result.is_err());
        assert!(reports[1].result.is_ok());
    }
}
