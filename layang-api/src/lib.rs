use axum::{
    extract::State,
    http::Method,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bank_accounts;
pub mod cities;
pub mod error;
pub mod flight_routes;
pub mod middleware;
pub mod payments;
pub mod popular_routes;
pub mod reviews;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let public = Router::new()
        .route("/api/flight-routes", get(flight_routes::list_flight_routes))
        .route("/api/flight-routes/{id}", get(flight_routes::get_flight_route))
        .route(
            "/api/flight-routes/{id}/similar",
            get(flight_routes::similar_flight_routes),
        )
        .route("/api/cities", get(cities::list_cities))
        .route("/api/cities/{id}", get(cities::get_city))
        .route("/api/bank-accounts", get(bank_accounts::list_bank_accounts))
        .route(
            "/api/popular-flight-routes",
            get(popular_routes::list_popular_routes),
        )
        .route("/api/reviews", get(reviews::list_reviews))
        .route("/api/payments", post(payments::create_payment))
        .route("/api/settings", get(search_settings));

    // Mutations are admin-only; the role gate is the only auth split.
    let admin = Router::new()
        .route("/api/flight-routes", post(flight_routes::create_flight_route))
        .route(
            "/api/flight-routes/{id}",
            put(flight_routes::update_flight_route).delete(flight_routes::delete_flight_route),
        )
        .route("/api/cities", post(cities::create_city))
        .route(
            "/api/cities/{id}",
            put(cities::update_city).delete(cities::delete_city),
        )
        .route("/api/payments", get(payments::list_payments))
        .route("/api/payments/{id}", put(payments::update_payment_status))
        .route("/api/bank-accounts", post(bank_accounts::create_bank_account))
        .route("/api/bank-accounts/{id}", delete(bank_accounts::delete_bank_account))
        .route(
            "/api/popular-flight-routes",
            post(popular_routes::create_popular_route),
        )
        .route(
            "/api/popular-flight-routes/{id}",
            put(popular_routes::update_popular_route)
                .delete(popular_routes::delete_popular_route),
        )
        .route("/api/reviews", post(reviews::create_review))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::admin_auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(public)
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Search defaults the frontend seeds its filter sidebar with.
async fn search_settings(
    State(state): State<AppState>,
) -> Json<layang_store::app_config::SearchDefaults> {
    Json(state.search.clone())
}
