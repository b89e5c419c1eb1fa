use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use eventscript::completion::CompletionClient;
use eventscript::config;
use eventscript::handlers;
use eventscript::models::workspace::WorkspaceStore;
use eventscript::session::rate_limit::GenerationLimiter;
use eventscript::sweeper;

/// Session encryption key from SESSION_KEY, or a random one (sessions lost on restart).
fn session_key(configured: Option<&str>) -> Key {
    match configured {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = config::load_settings();
    let secret_key = session_key(settings.session_key.as_deref());

    let client = CompletionClient::new(&settings.completion)
        .map_err(|e| std::io::Error::other(format!("Failed to build completion client: {e}")))?;
    if settings.completion.api_key.is_none() {
        log::warn!("OPENAI_API_KEY not set, script generation will fail until it is configured");
    }
    log::info!(
        "Completion endpoint {} (model {})",
        settings.completion.base_url,
        settings.completion.model
    );

    let store = WorkspaceStore::new();
    let limiter = GenerationLimiter::new(settings.generation_limit);
    sweeper::spawn_sweeper(
        store.clone(),
        limiter.clone(),
        Duration::from_secs(settings.workspace_idle_minutes * 60),
    );

    log::info!("Starting server at http://{}", settings.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::routes)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&settings.bind_addr)?
    .run()
    .await
}
