use crate::helper::listing_helpers::ListingFilter;
use crate::helper::public_helpers;
use crate::models::content_operations::ContentError;
use crate::models::content_store::ContentStore;
use crate::models::ErrorEnvelope;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct InsightsQuery {
    category: Option<String>,
}

fn error_response(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorEnvelope { error: message.to_string() })
}

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/is_server_active", web::get().to(is_server_active))
            .route("/insights", web::get().to(get_insights))
            .route("/insights/tags", web::get().to(get_insight_tags))
            .route("/insights/listing", web::get().to(get_insight_listing))
            .route("/insights/{slug}", web::get().to(get_insight_by_slug))
            .configure(super::forms::config_api),
    );
}

async fn is_server_active() -> impl Responder {
    HttpResponse::Ok().body("active")
}

async fn get_insights(store: web::Data<ContentStore>, query: web::Query<InsightsQuery>) -> impl Responder {
    let category = query.category.as_deref();

    match public_helpers::fetch_insights(&store, category) {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(e) => {
            log::error!("Failed to fetch insights (category: {:?}): {}", category, e);
            error_response("Failed to fetch insights")
        }
    }
}

async fn get_insight_tags(store: web::Data<ContentStore>) -> impl Responder {
    match public_helpers::fetch_tag_taxonomy(&store) {
        Ok(taxonomy) => HttpResponse::Ok().json(taxonomy),
        Err(e) => {
            log::error!("Failed to fetch tags from '{}': {}", store.tags_file().display(), e);
            error_response("Failed to fetch tags")
        }
    }
}

/// Handles requests to the GET /api/insights/listing endpoint.
async fn get_insight_listing(store: web::Data<ContentStore>, query: web::Query<ListingFilter>) -> impl Responder {
    match public_helpers::fetch_listing(&store, &query) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => {
            log::error!(
                "Failed to build insights listing (category: {:?}, tag: {:?}): {}",
                query.category, query.tag, e
            );
            error_response("Failed to fetch insights")
        }
    }
}

async fn get_insight_by_slug(slug: web::Path<String>, store: web::Data<ContentStore>) -> impl Responder {
    match public_helpers::fetch_insight_detail(&store, &slug) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(ContentError::NotFound(_)) => {
            HttpResponse::NotFound().json(ErrorEnvelope { error: "Insight not found".to_string() })
        }
        Err(e) => {
            log::error!("Failed to fetch insight '{}': {}", slug, e);
            error_response("Failed to fetch insight")
        }
    }
}
