#![allow(clippy::too_many_arguments)] // Repository signatures mirror their table columns

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod repository;
mod services;
mod utils;

use config::Config;
use database::create_pool;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let config = Arc::new(config);

    info!("Starting TACKLE Backend on port {}", config.port);

    // Initialize database pool
    let db_pool = create_pool(&config)
        .await
        .expect("Failed to create database pool");

    // Run migrations
    database::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    // Initialize repositories
    let workspace_repo = Arc::new(repository::WorkspaceRepository::new(db_pool.clone()));
    let board_repo = Arc::new(repository::BoardRepository::new(db_pool.clone()));
    let list_repo = Arc::new(repository::ListRepository::new(db_pool.clone()));
    let card_repo = Arc::new(repository::CardRepository::new(db_pool.clone()));
    let label_repo = Arc::new(repository::LabelRepository::new(db_pool.clone()));
    let field_repo = Arc::new(repository::CustomFieldRepository::new(db_pool.clone()));
    let automation_repo = Arc::new(repository::AutomationRepository::new(db_pool.clone()));

    // Initialize services
    let automation_service = Arc::new(services::AutomationService::new(
        automation_repo.clone(),
        card_repo.clone(),
        list_repo.clone(),
        label_repo.clone(),
    ));
    let card_service = Arc::new(services::CardService::new(
        card_repo.clone(),
        list_repo.clone(),
        label_repo.clone(),
        field_repo.clone(),
        automation_service.clone(),
    ));

    // Create application state
    let app_state = web::Data::new(handlers::AppState {
        config: config.clone(),
        db_pool: db_pool.clone(),
        workspace_repo,
        board_repo,
        list_repo,
        card_repo,
        label_repo,
        field_repo,
        automation_repo,
        card_service,
        automation_service,
    });

    // Rate limiter shared by the middleware and its cleanup task
    let rate_limiter = Arc::new(middleware::RateLimiter::new(
        middleware::RateLimitConfig::per_minute(config.rate_limit_per_minute),
    ));
    middleware::spawn_cleanup_task(rate_limiter.clone());

    let server_port = config.port;
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                if cors_origins_inner == "*" {
                    return true;
                }
                cors_origins_inner
                    .split(',')
                    .any(|o| o.trim() == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        // Custom JSON error handler
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            let message = format!("{}", err);
            actix_web::error::InternalError::from_response(
                err,
                actix_web::HttpResponse::BadRequest()
                    .json(utils::ResponseData::message(400, &message)),
            )
            .into()
        });

        App::new()
            .app_data(app_state.clone())
            .app_data(json_cfg)
            .wrap(Logger::default())
            .wrap(cors)
            // Health check
            .route("/health", web::get().to(handlers::health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    .wrap(middleware::AuthMiddleware::new(config.clone()))
                    .wrap(middleware::RateLimitMiddleware::new(rate_limiter.clone()))
                    // Workspace routes
                    .service(
                        web::scope("/workspaces")
                            .route(
                                "",
                                web::post().to(handlers::workspace::create_workspace),
                            )
                            .route("", web::get().to(handlers::workspace::list_workspaces))
                            .route(
                                "/{id}",
                                web::get().to(handlers::workspace::get_workspace),
                            )
                            .route(
                                "/{id}",
                                web::put().to(handlers::workspace::update_workspace),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(handlers::workspace::delete_workspace),
                            )
                            .route("/{id}/boards", web::post().to(handlers::board::create_board))
                            .route("/{id}/boards", web::get().to(handlers::board::list_boards)),
                    )
                    // Board routes
                    .service(
                        web::scope("/boards")
                            .route("/{id}", web::get().to(handlers::board::get_board))
                            .route("/{id}", web::put().to(handlers::board::update_board))
                            .route("/{id}", web::delete().to(handlers::board::delete_board))
                            .route("/{id}/lists", web::post().to(handlers::list::create_list))
                            .route("/{id}/lists", web::get().to(handlers::list::get_board_lists))
                            .route("/{id}/cards", web::get().to(handlers::card::search_cards))
                            .route("/{id}/labels", web::post().to(handlers::label::create_label))
                            .route(
                                "/{id}/labels",
                                web::get().to(handlers::label::get_board_labels),
                            )
                            .route(
                                "/{id}/custom-fields",
                                web::post().to(handlers::custom_field::create_custom_field),
                            )
                            .route(
                                "/{id}/custom-fields",
                                web::get().to(handlers::custom_field::get_board_custom_fields),
                            )
                            .route(
                                "/{id}/automations",
                                web::post().to(handlers::automation::create_rule),
                            )
                            .route(
                                "/{id}/automations",
                                web::get().to(handlers::automation::get_board_rules),
                            ),
                    )
                    // List routes
                    .service(
                        web::scope("/lists")
                            .route("/{id}", web::put().to(handlers::list::update_list))
                            .route("/{id}", web::delete().to(handlers::list::delete_list))
                            .route("/{id}/cards", web::post().to(handlers::card::create_card))
                            .route("/{id}/cards", web::get().to(handlers::card::get_list_cards)),
                    )
                    // Card routes
                    .service(
                        web::scope("/cards")
                            .route("/{id}", web::get().to(handlers::card::get_card))
                            .route("/{id}", web::put().to(handlers::card::update_card))
                            .route("/{id}", web::delete().to(handlers::card::delete_card))
                            .route("/{id}/move", web::post().to(handlers::card::move_card))
                            .route(
                                "/{id}/labels/{label_id}",
                                web::post().to(handlers::card::attach_label),
                            )
                            .route(
                                "/{id}/labels/{label_id}",
                                web::delete().to(handlers::card::detach_label),
                            )
                            .route(
                                "/{id}/custom-fields/{field_id}",
                                web::put().to(handlers::card::set_field_value),
                            )
                            .route(
                                "/{id}/custom-fields/{field_id}",
                                web::delete().to(handlers::card::clear_field_value),
                            ),
                    )
                    // Label routes
                    .service(
                        web::scope("/labels")
                            .route("/{id}", web::put().to(handlers::label::update_label))
                            .route("/{id}", web::delete().to(handlers::label::delete_label)),
                    )
                    // Custom field routes
                    .service(
                        web::scope("/custom-fields")
                            .route(
                                "/{id}",
                                web::put().to(handlers::custom_field::update_custom_field),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(handlers::custom_field::delete_custom_field),
                            ),
                    )
                    // Automation routes
                    .service(
                        web::scope("/automations")
                            .route("/{id}", web::put().to(handlers::automation::update_rule))
                            .route(
                                "/{id}",
                                web::delete().to(handlers::automation::delete_rule),
                            ),
                    ),
            )
    })
    .bind(format!("0.0.0.0:{}", server_port))?
    .run()
    .await
}
