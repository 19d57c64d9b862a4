use crate::helper::{listing_helpers, sanitization_helpers};
use crate::models::content_operations::{self, ArticleOrder, ContentError};
use crate::models::content_store::ContentStore;
use crate::models::{Article, ArticleDetail, ListingView, TagTaxonomy};

pub fn fetch_insights(store: &ContentStore, category: Option<&str>) -> Result<Vec<Article>, ContentError> {
    content_operations::read_article_summaries(store, category, ArticleOrder::NewestFirst)
}

pub fn fetch_insight_detail(store: &ContentStore, slug: &str) -> Result<ArticleDetail, ContentError> {
    let article = content_operations::read_article(store, slug)?;
    let html = sanitization_helpers::render_markdown(article.content.as_deref().unwrap_or_default());
    Ok(ArticleDetail { article, html })
}

/// Fetches every article and applies the listing-page filter to it.
pub fn fetch_listing(
    store: &ContentStore,
    filter: &listing_helpers::ListingFilter,
) -> Result<ListingView, ContentError> {
    let articles = fetch_insights(store, None)?;
    Ok(listing_helpers::build_listing(&articles, filter))
}

pub fn fetch_tag_taxonomy(store: &ContentStore) -> Result<TagTaxonomy, ContentError> {
    content_operations::read_tag_taxonomy(store)
}
