//! Namgail Tours Server - tour booking backend
//!
//! REST API server for the Namgail tour-booking website.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use namgail_tours_server::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};

// Form uploads carry an image of up to 5 MiB plus the text fields.
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "namgail_tours_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Namgail Tours Server v{}", env!("CARGO_PKG_VERSION"));

    // Log panics through tracing instead of stderr so they reach the
    // same sink as the rest of the logs.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Panic: {}", info);
    }));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config).expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Tours
        .route("/tour/add", post(api::tours::add_tour))
        .route("/tour/update/:id", put(api::tours::update_tour))
        .route("/tour/delete/:id", delete(api::tours::delete_tour))
        .route("/tour/all", get(api::tours::list_tours))
        .route("/tour/type/:tour_type", get(api::tours::list_tours_by_type))
        // Bookings (registered before /tour/:id so the static segments win)
        .route("/tour/booking/add", post(api::bookings::create_booking))
        .route("/tour/booking/status", put(api::bookings::update_booking_status))
        .route(
            "/tour/booking/count/:tour_id",
            get(api::bookings::count_tour_bookings),
        )
        .route("/tour/booking/:tour_id", get(api::bookings::list_tour_bookings))
        .route("/tour/bookings/all", get(api::bookings::list_all_bookings))
        .route("/tour/:id", get(api::tours::get_tour))
        // Admin authentication
        .route("/user/admin", post(api::auth::admin_login))
        // Payments
        .route("/payment/create-order", post(api::payments::create_order))
        .route("/payment/verify", post(api::payments::verify_payment))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
