use std::net::SocketAddr;
use std::sync::Arc;

use layang_api::{
    app,
    state::{AppState, AuthConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "layang_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = layang_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Layang API on port {}", config.server.port);

    let db = layang_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let pool = db.pool.clone();
    let app_state = AppState {
        route_repo: Arc::new(layang_store::PostgresRouteRepository { pool: pool.clone() }),
        city_repo: Arc::new(layang_store::PostgresCityRepository { pool: pool.clone() }),
        payment_repo: Arc::new(layang_store::PostgresPaymentRepository { pool: pool.clone() }),
        bank_account_repo: Arc::new(layang_store::PostgresBankAccountRepository {
            pool: pool.clone(),
        }),
        popular_repo: Arc::new(layang_store::PostgresPopularRouteRepository {
            pool: pool.clone(),
        }),
        review_repo: Arc::new(layang_store::PostgresReviewRepository { pool: pool.clone() }),
        admin_repo: Arc::new(layang_store::PostgresAdminRepository { pool }),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        search: config.search.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
