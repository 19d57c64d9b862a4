use crate::helper::metadata_helpers::compare_newest_first;
use crate::models::{Article, ListingView};
use serde::Deserialize;
use std::cmp::Ordering;

/// Query parameters of a listing page. A category takes precedence over a tag.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl ListingFilter {
    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = self.category() {
            article.category == category
        } else if let Some(tag) = self.tag() {
            article.has_tag(tag)
        } else {
            true
        }
    }
}

pub fn filter_articles(articles: &[Article], filter: &ListingFilter) -> Vec<Article> {
    articles.iter().filter(|a| filter.matches(a)).cloned().collect()
}

/// Index of the hero article: the first one flagged `featured`, otherwise the
/// most recent by date (the earliest in the list on ties).
fn featured_index(articles: &[Article]) -> Option<usize> {
    if let Some(i) = articles.iter().position(Article::is_featured) {
        return Some(i);
    }
    articles
        .iter()
        .enumerate()
        .reduce(|best, candidate| match compare_newest_first(candidate.1, best.1) {
            Ordering::Less => candidate,
            _ => best,
        })
        .map(|(i, _)| i)
}

/// Computes what a listing page shows for the given filter.
pub fn build_listing(articles: &[Article], filter: &ListingFilter) -> ListingView {
    let mut visible = filter_articles(articles, filter);
    let featured = featured_index(&visible).map(|i| visible.remove(i));
    ListingView { featured, articles: visible }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, date: &str, category: &str, tags: &[&str], featured: Option<bool>) -> Article {
        Article {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: date.to_string(),
            excerpt: None,
            content: None,
            category: category.to_string(),
            author: "Mustafa".to_string(),
            read_time: "1 min read".to_string(),
            image: "/images/placeholder.jpg".to_string(),
            image_alt: None,
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            featured,
        }
    }

    fn sample() -> Vec<Article> {
        vec![
            article("first", "2024-01-01", "ai-collaboration", &["framework"], None),
            article("second", "2024-05-01", "product-vision", &["future"], None),
            article("third", "2024-03-01", "ai-collaboration", &["future", "framework"], Some(false)),
        ]
    }

    #[test]
    fn tag_filter_keeps_exact_matches() {
        let articles = vec![
            article("a", "2024-01-01", "x", &["framework"], None),
            article("b", "2024-01-02", "x", &["future"], None),
        ];
        let filter = ListingFilter { category: None, tag: Some("framework".to_string()) };
        let visible = filter_articles(&articles, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].slug, "a");

        let partial = ListingFilter { category: None, tag: Some("frame".to_string()) };
        assert!(filter_articles(&articles, &partial).is_empty());
    }

    #[test]
    fn category_takes_precedence_over_tag() {
        let filter = ListingFilter {
            category: Some("product-vision".to_string()),
            tag: Some("framework".to_string()),
        };
        let visible = filter_articles(&sample(), &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].slug, "second");
    }

    #[test]
    fn empty_parameters_keep_everything() {
        let filter = ListingFilter { category: Some(String::new()), tag: Some(String::new()) };
        assert_eq!(filter_articles(&sample(), &filter).len(), 3);
    }

    #[test]
    fn featured_flag_wins_over_recency() {
        let mut articles = sample();
        articles[0].featured = Some(true);
        let view = build_listing(&articles, &ListingFilter::default());
        assert_eq!(view.featured.unwrap().slug, "first");
        let rest: Vec<&str> = view.articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(rest, vec!["second", "third"]);
    }

    #[test]
    fn most_recent_is_featured_when_none_flagged() {
        let view = build_listing(&sample(), &ListingFilter::default());
        assert_eq!(view.featured.unwrap().slug, "second");
        assert_eq!(view.articles.len(), 2);

        let filter = ListingFilter { category: Some("ai-collaboration".to_string()), tag: None };
        let view = build_listing(&sample(), &filter);
        assert_eq!(view.featured.unwrap().slug, "third");
        assert_eq!(view.articles.len(), 1);
    }

    #[test]
    fn empty_selection_has_no_featured_article() {
        let filter = ListingFilter { category: Some("nothing".to_string()), tag: None };
        let view = build_listing(&sample(), &filter);
        assert!(view.featured.is_none());
        assert!(view.articles.is_empty());
    }
}
