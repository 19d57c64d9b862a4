use crate::config::{Config, SiteDefaults, DEFAULT_CONTENT_EXTENSION};
use std::path::{Path, PathBuf};

/// Location of the flat-file content: one Markdown file per article plus the
/// tag taxonomy JSON file. Never written to while serving requests.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    tags_file: PathBuf,
    extension: String,
    defaults: SiteDefaults,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, tags_file: impl Into<PathBuf>) -> Self {
        ContentStore {
            root: root.into(),
            tags_file: tags_file.into(),
            extension: DEFAULT_CONTENT_EXTENSION.to_string(),
            defaults: SiteDefaults::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        ContentStore::new(config.content_dir(), config.tags_file())
            .with_extension(&config.content_extension)
            .with_defaults(config.site.clone())
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_defaults(mut self, defaults: SiteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tags_file(&self) -> &Path {
        &self.tags_file
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn defaults(&self) -> &SiteDefaults {
        &self.defaults
    }

    /// Returns the slug for a content file, or `None` if the path is not one.
    pub fn slug_for_path(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }

    /// Maps a slug to the single file it names. Slugs that could escape the
    /// content directory resolve to nothing.
    pub fn path_for_slug(&self, slug: &str) -> Option<PathBuf> {
        let is_plain = !slug.is_empty()
            && !slug.starts_with('.')
            && !slug.contains(|c: char| c == '/' || c == '\\' || c == '\0');
        if !is_plain {
            return None;
        }
        let path = self.root.join(format!("{}.{}", slug, self.extension));
        if path.is_file() { Some(path) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn slug_is_the_file_stem() {
        let store = ContentStore::new("/content", "/tags.json");
        assert_eq!(store.slug_for_path(Path::new("/content/future-of-work.md")), Some("future-of-work".to_string()));
        assert_eq!(store.slug_for_path(Path::new("/content/notes.txt")), None);
    }

    #[test]
    fn path_for_slug_rejects_traversal_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.md"), "---\ntitle: Hello\n---\n").unwrap();
        let store = ContentStore::new(dir.path(), dir.path().join("tags.json"));

        assert!(store.path_for_slug("hello").is_some());
        assert!(store.path_for_slug("hell").is_none());
        assert!(store.path_for_slug("../hello").is_none());
        assert!(store.path_for_slug("").is_none());
    }

    #[test]
    fn custom_extension_is_normalized() {
        let store = ContentStore::new("/content", "/tags.json").with_extension(".mdx");
        assert_eq!(store.extension(), "mdx");
        assert_eq!(store.slug_for_path(Path::new("/content/a.mdx")), Some("a".to_string()));
    }
}
