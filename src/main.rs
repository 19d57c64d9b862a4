use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware::{Logger, DefaultHeaders}, HttpResponse, Responder};
use insights_backend::{
    config::Config,
    models::content_store::ContentStore,
    notifier::LogNotifier,
    AppState,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// A simple handler for the root URL.
async fn root_handler() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

#[derive(Parser, Debug)]
#[command(name = "insights_server", author, version, about = "Starts the insights web server.")]
struct Cli {
    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

fn build_cors(allowed_origins: &str) -> Cors {
    let cors = if allowed_origins.trim() == "*" {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![actix_web::http::header::ACCEPT, actix_web::http::header::CONTENT_TYPE])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env(&cli.env_file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let store = ContentStore::from_config(&config);
    if !store.root().is_dir() {
        log::warn!(
            "Content directory '{}' does not exist. Run 'content_cli --env-file <path> content init'.",
            store.root().display()
        );
    }
    let state = AppState::new(store, Arc::new(LogNotifier));

    let server_address = format!("{}:{}", config.web.host, config.web.port);
    log::info!("Server starting at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.allowed_origins))
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block"))
            )
            .configure(|cfg| state.configure(cfg))
            .service(actix_files::Files::new("/images", &config.static_path))
            .route("/", web::get().to(root_handler))
    })
    .bind(server_address)?
    .run()
    .await
}
