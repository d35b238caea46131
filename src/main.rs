use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use coursebridge::auth;
use coursebridge::db;
use coursebridge::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/app.db".to_string());
    if let Some(dir) = std::path::Path::new(&database_path).parent() {
        std::fs::create_dir_all(dir).expect("Failed to create data directory");
    }

    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    // Initial platform admin (no-op once any user exists)
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let admin_hash = auth::password::hash_password(&admin_password)
        .expect("Failed to hash admin password");
    db::seed(&pool, &admin_hash);

    if std::env::var("SEED_DEMO").is_ok_and(|v| v == "1") {
        db::seed_demo(&pool, &admin_hash);
    }

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

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
            .app_data(web::Data::new(pool.clone()))
            // Auth
            .route("/api/auth/login", web::post().to(handlers::auth_handlers::login))
            .route("/api/auth/logout", web::post().to(handlers::auth_handlers::logout))
            .route("/api/auth/me", web::get().to(handlers::auth_handlers::me))
            // Public catalog
            .route("/api/courses", web::get().to(handlers::course_handlers::list))
            .route("/api/courses/{id}", web::get().to(handlers::course_handlers::detail))
            .route("/api/badges", web::get().to(handlers::course_handlers::badges))
            .route("/api/organizations", web::get().to(handlers::organization_handlers::list))
            .route(
                "/api/organizations/{id}",
                web::get().to(handlers::organization_handlers::detail),
            )
            .route("/api/advocates", web::get().to(handlers::advocate_handlers::public_list))
            .route("/api/images/{id}", web::get().to(handlers::image_handlers::serve))
            // Authenticated API
            .service(
                web::scope("/api")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .wrap(actix_web::middleware::from_fn(
                        auth::middleware::require_mutation_guard,
                    ))
                    // Drafts
                    .route("/drafts", web::get().to(handlers::draft_handlers::list))
                    .route("/drafts", web::post().to(handlers::draft_handlers::create))
                    .route("/drafts/{id}", web::get().to(handlers::draft_handlers::detail))
                    .route("/drafts/{id}", web::patch().to(handlers::draft_handlers::update))
                    .route("/drafts/{id}", web::delete().to(handlers::draft_handlers::delete))
                    .route("/drafts/{id}/copy", web::post().to(handlers::draft_handlers::copy))
                    // Advocate self-service
                    .route("/advocate/profile", web::get().to(handlers::advocate_handlers::profile))
                    .route(
                        "/advocate/profile",
                        web::put().to(handlers::advocate_handlers::upsert_profile),
                    )
                    .route(
                        "/advocate/profile",
                        web::patch().to(handlers::advocate_handlers::toggle_visibility),
                    )
                    .route("/advocate/stats", web::get().to(handlers::advocate_handlers::stats))
                    .route("/advocate/rank", web::get().to(handlers::advocate_handlers::rank))
                    // Profile review — /advocates/pending BEFORE /advocates/{id}
                    .route(
                        "/advocates/pending",
                        web::get().to(handlers::advocate_handlers::pending_list),
                    )
                    .route(
                        "/advocates/{id}",
                        web::patch().to(handlers::advocate_handlers::review),
                    )
                    // Admin catalog management
                    .route("/courses", web::post().to(handlers::course_handlers::create))
                    .route("/courses/{id}", web::patch().to(handlers::course_handlers::update))
                    .route("/courses/{id}", web::delete().to(handlers::course_handlers::delete))
                    .route(
                        "/organizations",
                        web::post().to(handlers::organization_handlers::create),
                    )
                    .route(
                        "/organizations/{id}",
                        web::patch().to(handlers::organization_handlers::update),
                    )
                    .route(
                        "/organizations/{id}",
                        web::delete().to(handlers::organization_handlers::delete),
                    ),
            )
            // Default 404 (registered last)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
