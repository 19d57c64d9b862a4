use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Accepts tags either as a YAML list or as a comma-separated string.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
    }

    match Option::<StringOrVec>::deserialize(deserializer)? {
        Some(StringOrVec::String(s)) => Ok(Some(
            s.split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )),
        Some(StringOrVec::Vec(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

/// Frontmatter exactly as written in a content file, before defaults are applied.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawFrontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(alias = "read_time")]
    pub read_time: Option<String>,
    pub image: Option<String>,
    #[serde(alias = "image_alt")]
    pub image_alt: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    // Keys with no Article counterpart (including `slug`) land here and are dropped.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub category: String,
    pub author: String,
    pub read_time: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Article {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .map_or(false, |tags| tags.iter().any(|t| t == tag))
    }
}

/// Detail view of an article: the metadata and raw body plus rendered HTML.
#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub html: String,
}

/// The subset of articles shown on a listing page, with the hero article split out.
#[derive(Debug, Serialize, PartialEq)]
pub struct ListingView {
    pub featured: Option<Article>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TagTaxonomy {
    pub theme: Vec<String>,
    #[serde(rename = "type")]
    pub r#type: Vec<String>,
    pub time: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ContactReason {
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Speaking Engagement")]
    SpeakingEngagement,
    #[serde(rename = "Consulting Opportunity")]
    ConsultingOpportunity,
    #[serde(rename = "Media Request")]
    MediaRequest,
}

impl ContactReason {
    pub const ALL: [ContactReason; 4] = [
        ContactReason::GeneralInquiry,
        ContactReason::SpeakingEngagement,
        ContactReason::ConsultingOpportunity,
        ContactReason::MediaRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactReason::GeneralInquiry => "General Inquiry",
            ContactReason::SpeakingEngagement => "Speaking Engagement",
            ContactReason::ConsultingOpportunity => "Consulting Opportunity",
            ContactReason::MediaRequest => "Media Request",
        }
    }

    pub fn parse(value: &str) -> Option<ContactReason> {
        Self::ALL.into_iter().find(|reason| reason.as_str() == value)
    }
}

/// Contact form payload as submitted. Missing fields are read as empty strings
/// so that validation can report every problem at once.
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub reason: String,
    pub message: String,
    pub honeypot: Option<String>,
    pub token: Option<String>,
    pub user_agent: Option<String>,
}

/// A contact form that passed validation.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub reason: ContactReason,
    pub message: String,
    pub honeypot: Option<String>,
    pub token: Option<String>,
    pub user_agent: Option<String>,
}

impl ContactSubmission {
    /// A populated honeypot marks the submission as automated.
    pub fn is_automated(&self) -> bool {
        self.honeypot.as_deref().map_or(false, |h| !h.trim().is_empty())
    }
}

/// Field name to the messages describing why that field was rejected.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl FormResponse {
    pub fn ok(message: &str) -> Self {
        FormResponse { success: true, message: message.to_string(), errors: None }
    }

    pub fn failure(message: &str) -> Self {
        FormResponse { success: false, message: message.to_string(), errors: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
}

pub mod content_store;
pub mod content_operations;
