use actix_web::web;
use std::sync::Arc;

use crate::models::content_store::ContentStore;
use crate::notifier::Notifier;

pub mod config;
pub mod helper;
pub mod models;
pub mod notifier;
pub mod routes;
pub mod setup;

/// Shared, read-only data handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub store: web::Data<ContentStore>,
    pub notifier: web::Data<dyn Notifier>,
}

impl AppState {
    pub fn new(store: ContentStore, notifier: Arc<dyn Notifier>) -> Self {
        AppState {
            store: web::Data::new(store),
            notifier: web::Data::from(notifier),
        }
    }

    /// Registers the shared data and every API route on an app or scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.store.clone())
            .app_data(self.notifier.clone())
            .configure(routes::public::config_api);
    }
}
