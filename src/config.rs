use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::env;
use config; // Explicitly import the config crate

pub const DEFAULT_AUTHOR: &str = "Mustafa";
pub const DEFAULT_CATEGORY: &str = "ai-collaboration";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/insights/placeholder.jpg";
pub const DEFAULT_CONTENT_EXTENSION: &str = "md";

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Values the metadata normalizer falls back to when frontmatter omits a field.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteDefaults {
    pub author: String,
    pub category: String,
    pub placeholder_image: String,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        SiteDefaults {
            author: DEFAULT_AUTHOR.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub site: SiteDefaults,
    // These fields are populated from the .env file
    pub content_path: String,
    pub tags_path: String,
    pub static_path: String,
    pub content_extension: String,
    pub allowed_origins: String,
    pub log_level: String,
}

fn required_var(name: &str) -> Result<String, config::ConfigError> {
    env::var(name).map_err(|_| config::ConfigError::Message(format!(
        "FATAL: Environment variable '{}' is not set in your .env file.", name
    )))
}

fn require_absolute(name: &str, value: &str) -> Result<(), config::ConfigError> {
    if Path::new(value).is_relative() {
        return Err(config::ConfigError::Message(format!(
            "FATAL: The '{}' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
            name, value
        )));
    }
    Ok(())
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        dotenvy::from_path(env_path)
            .map_err(|e| config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}", env_path.display(), e
            )))?;

        let content_path = required_var("CONTENT_PATH")?;
        let tags_path = required_var("TAGS_PATH")?;
        require_absolute("CONTENT_PATH", &content_path)?;
        require_absolute("TAGS_PATH", &tags_path)?;

        // Static images default to a sibling of the content directory.
        let static_path = env::var("STATIC_PATH").unwrap_or_else(|_| {
            PathBuf::from(&content_path)
                .parent()
                .map(|p| p.join("images"))
                .unwrap_or_else(|| PathBuf::from("/images"))
                .to_string_lossy()
                .into_owned()
        });
        require_absolute("STATIC_PATH", &static_path)?;

        let content_extension = env::var("CONTENT_EXTENSION")
            .unwrap_or_else(|_| DEFAULT_CONTENT_EXTENSION.to_string())
            .trim_start_matches('.')
            .to_string();
        if content_extension.is_empty() || !content_extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(config::ConfigError::Message(
                "FATAL: 'CONTENT_EXTENSION' must be a non-empty alphanumeric file extension.".to_string()
            ));
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = SiteDefaults::default();
        let author = env::var("SITE_AUTHOR").unwrap_or(defaults.author);
        let category = env::var("DEFAULT_CATEGORY").unwrap_or(defaults.category);
        let placeholder_image = env::var("PLACEHOLDER_IMAGE").unwrap_or(defaults.placeholder_image);

        let builder = config::Config::builder()
            // Base settings (web host/port) come from the TOML file.
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml).required(false))
            .set_default("web.host", "127.0.0.1")?
            .set_default("web.port", 8080)?
            .set_override("content_path", content_path)?
            .set_override("tags_path", tags_path)?
            .set_override("static_path", static_path)?
            .set_override("content_extension", content_extension)?
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .set_override("site.author", author)?
            .set_override("site.category", category)?
            .set_override("site.placeholder_image", placeholder_image)?
            .build()?;

        builder.try_deserialize()
    }

    /// Directory holding one Markdown file per article.
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.content_path)
    }

    /// JSON file holding the static tag taxonomy.
    pub fn tags_file(&self) -> PathBuf {
        PathBuf::from(&self.tags_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_defaults_use_owner_name_and_default_category() {
        let defaults = SiteDefaults::default();
        assert_eq!(defaults.author, DEFAULT_AUTHOR);
        assert_eq!(defaults.category, "ai-collaboration");
        assert!(defaults.placeholder_image.starts_with("/images/"));
    }

    #[test]
    fn relative_paths_are_rejected() {
        assert!(require_absolute("CONTENT_PATH", "content/insights").is_err());
        assert!(require_absolute("CONTENT_PATH", "/srv/content/insights").is_ok());
    }
}
