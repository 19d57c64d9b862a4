use crate::config::SiteDefaults;
use crate::models::content_operations::ContentError;
use crate::models::{Article, RawFrontmatter};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time for a Markdown body, e.g. `"5 min read"`.
pub fn compute_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_field(value: Option<String>, field: &str, slug: &str) -> Result<String, ContentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ContentError::InvalidFrontmatter {
            slug: slug.to_string(),
            reason: format!("missing required field '{}'", field),
        }),
    }
}

/// Turns the raw frontmatter of one content file into a fully populated Article.
///
/// The slug always comes from the file name; a `slug` key in the frontmatter is
/// ignored. `content` is only attached when `include_content` is set, list views
/// leave it out.
pub fn normalize_article(
    raw: RawFrontmatter,
    body: &str,
    slug: &str,
    defaults: &SiteDefaults,
    include_content: bool,
) -> Result<Article, ContentError> {
    if !raw.unknown.is_empty() {
        let keys: Vec<&str> = raw.unknown.keys().map(String::as_str).collect();
        log::debug!("Ignoring unknown frontmatter keys in '{}': {:?}", slug, keys);
    }

    let title = required_field(raw.title, "title", slug)?;
    let date = required_field(raw.date, "date", slug)?;

    let read_time = non_blank(raw.read_time).unwrap_or_else(|| compute_read_time(body));

    Ok(Article {
        slug: slug.to_string(),
        title,
        date,
        excerpt: raw.excerpt,
        content: include_content.then(|| body.to_string()),
        category: non_blank(raw.category).unwrap_or_else(|| defaults.category.clone()),
        author: non_blank(raw.author).unwrap_or_else(|| defaults.author.clone()),
        read_time,
        image: non_blank(raw.image).unwrap_or_else(|| defaults.placeholder_image.clone()),
        image_alt: raw.image_alt,
        tags: raw.tags,
        featured: raw.featured,
    })
}

/// Parses the ISO-like date strings used in frontmatter.
pub fn parse_article_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Orders articles newest first. Unparseable dates sort after every parseable one.
pub fn compare_newest_first(a: &Article, b: &Article) -> Ordering {
    match (parse_article_date(&a.date), parse_article_date(&b.date)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
