use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tower::util::ServiceExt;
use uuid::Uuid;

use layang_api::middleware::auth::AdminClaims;
use layang_api::state::{AppState, AuthConfig};
use layang_core::content::{CustomerReview, PopularRoute};
use layang_core::payment::{AdminUser, BankAccount, Payment, PaymentStatus};
use layang_core::repository::{
    AdminRepository, BankAccountRepository, CityRepository, PaymentRepository,
    PopularRouteRepository, ReviewRepository, RouteQuery, RouteRepository,
};
use layang_core::route::{City, FeeItem, FlightClass, FlightRoute};
use layang_store::app_config::SearchDefaults;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

struct InMemoryRoutes {
    routes: Vec<FlightRoute>,
}

#[async_trait]
impl RouteRepository for InMemoryRoutes {
    async fn search_routes(&self, query: &RouteQuery) -> Result<Vec<FlightRoute>, RepoError> {
        Ok(self
            .routes
            .iter()
            .filter(|r| {
                query
                    .departure_city_id
                    .map_or(true, |id| r.departure_city_id == id)
                    && query
                        .arrival_city_id
                        .map_or(true, |id| r.arrival_city_id == id)
                    && query.departure_date.map_or(true, |d| r.departure_date == d)
                    && query.min_price.map_or(true, |p| r.total_price >= p)
                    && query.max_price.map_or(true, |p| r.total_price <= p)
                    && query.airline.as_ref().map_or(true, |a| &r.airline == a)
                    && query.min_rating.map_or(true, |m| r.rating >= m)
            })
            .cloned()
            .collect())
    }

    async fn get_route(&self, id: Uuid) -> Result<Option<FlightRoute>, RepoError> {
        Ok(self.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn create_route(&self, route: &FlightRoute) -> Result<Uuid, RepoError> {
        Ok(route.id)
    }

    async fn update_route(&self, _id: Uuid, _route: &FlightRoute) -> Result<(), RepoError> {
        Ok(())
    }

    async fn delete_route(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

struct NoCities;

#[async_trait]
impl CityRepository for NoCities {
    async fn list_cities(&self) -> Result<Vec<City>, RepoError> {
        Ok(Vec::new())
    }
    async fn get_city(&self, _id: Uuid) -> Result<Option<City>, RepoError> {
        Ok(None)
    }
    async fn create_city(&self, city: &City) -> Result<Uuid, RepoError> {
        Ok(city.id)
    }
    async fn update_city(&self, _id: Uuid, _city: &City) -> Result<(), RepoError> {
        Ok(())
    }
    async fn delete_city(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

struct NoPayments;

#[async_trait]
impl PaymentRepository for NoPayments {
    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError> {
        Ok(Vec::new())
    }
    async fn create_payment(&self, payment: &Payment) -> Result<Uuid, RepoError> {
        Ok(payment.id)
    }
    async fn update_payment_status(
        &self,
        _id: Uuid,
        _status: PaymentStatus,
    ) -> Result<(), RepoError> {
        Ok(())
    }
}

struct NoBankAccounts;

#[async_trait]
impl BankAccountRepository for NoBankAccounts {
    async fn list_bank_accounts(&self) -> Result<Vec<BankAccount>, RepoError> {
        Ok(Vec::new())
    }
    async fn create_bank_account(&self, account: &BankAccount) -> Result<Uuid, RepoError> {
        Ok(account.id)
    }
    async fn delete_bank_account(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

struct InMemoryPopular {
    entries: Vec<PopularRoute>,
}

#[async_trait]
impl PopularRouteRepository for InMemoryPopular {
    async fn list_popular_routes(&self) -> Result<Vec<PopularRoute>, RepoError> {
        let mut active: Vec<PopularRoute> = self
            .entries
            .iter()
            .filter(|e| e.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|e| e.display_order);
        Ok(active)
    }

    async fn find_popular_by_route(
        &self,
        flight_route_id: Uuid,
    ) -> Result<Option<PopularRoute>, RepoError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.flight_route_id == flight_route_id)
            .cloned())
    }

    async fn create_popular_route(&self, entry: &PopularRoute) -> Result<Uuid, RepoError> {
        Ok(entry.id)
    }

    async fn update_popular_route(
        &self,
        _id: Uuid,
        _display_order: i32,
        _is_active: bool,
    ) -> Result<(), RepoError> {
        Ok(())
    }

    async fn delete_popular_route(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

struct NoReviews;

#[async_trait]
impl ReviewRepository for NoReviews {
    async fn list_reviews(&self) -> Result<Vec<CustomerReview>, RepoError> {
        Ok(Vec::new())
    }
    async fn create_review(&self, review: &CustomerReview) -> Result<Uuid, RepoError> {
        Ok(review.id)
    }
}

struct NoAdmins;

#[async_trait]
impl AdminRepository for NoAdmins {
    async fn find_by_email(&self, _email: &str) -> Result<Option<AdminUser>, RepoError> {
        Ok(None)
    }
    async fn create_admin(&self, admin: &AdminUser) -> Result<Uuid, RepoError> {
        Ok(admin.id)
    }
}

fn route(airline: &str, total_price: i64, rating: i32, departure_time: &str) -> FlightRoute {
    FlightRoute {
        id: Uuid::new_v4(),
        departure_city_id: Uuid::new_v4(),
        arrival_city_id: Uuid::new_v4(),
        departure_city: None,
        arrival_city: None,
        departure_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        return_date: None,
        airline: airline.to_string(),
        departure_time: departure_time.to_string(),
        arrival_time: "12:00".to_string(),
        duration: "2h 0m".to_string(),
        rating,
        available_seats: 12,
        flight_class: FlightClass::Economy,
        image_url: String::new(),
        description: String::new(),
        other_fees: vec![FeeItem::new("Base Fare", total_price)],
        discount: 0,
        total_price,
    }
}

fn test_state(routes: Vec<FlightRoute>) -> AppState {
    AppState {
        route_repo: Arc::new(InMemoryRoutes { routes }),
        city_repo: Arc::new(NoCities),
        payment_repo: Arc::new(NoPayments),
        bank_account_repo: Arc::new(NoBankAccounts),
        popular_repo: Arc::new(InMemoryPopular {
            entries: Vec::new(),
        }),
        review_repo: Arc::new(NoReviews),
        admin_repo: Arc::new(NoAdmins),
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
        search: SearchDefaults::default(),
    }
}

fn test_app(routes: Vec<FlightRoute>) -> axum::Router {
    layang_api::app(test_state(routes))
}

fn mint_token(role: &str) -> String {
    let claims = AdminClaims {
        sub: Uuid::new_v4().to_string(),
        email: "ops@example.com".to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn search_filters_sorts_and_limits() {
    let app = test_app(vec![
        route("Garuda Indonesia", 900_000, 4, "08:00"),
        route("Citilink", 300_000, 5, "09:00"),
        route("Lion Air", 500_000, 5, "21:00"),
        route("Batik Air", 450_000, 5, "10:00"),
    ]);

    // Five-star routes departing in the morning window, cheapest first.
    let (status, body) = get_json(
        app,
        "/api/flight-routes?ratings=5&minDepartureHour=6&maxDepartureHour=12&sort=cheapest",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["airline"], "Citilink");
    assert_eq!(results[1]["airline"], "Batik Air");
    // The wire shape exposes the total under both names.
    assert_eq!(results[0]["price"], 300_000);
    assert_eq!(results[0]["totalPrice"], 300_000);
}

#[tokio::test]
async fn limit_takes_a_prefix_of_the_full_ordering() {
    let app = test_app(vec![
        route("Garuda Indonesia", 900_000, 4, "08:00"),
        route("Citilink", 300_000, 5, "09:00"),
        route("Lion Air", 500_000, 5, "21:00"),
    ]);

    let (status, body) = get_json(app, "/api/flight-routes?sort=cheapest&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["airline"], "Citilink");
    assert_eq!(results[1]["airline"], "Lion Air");
}

#[tokio::test]
async fn unparseable_departure_time_is_not_excluded() {
    let mut broken = route("Garuda Indonesia", 400_000, 4, "??");
    broken.departure_time = "not-a-time".to_string();
    let app = test_app(vec![broken, route("Citilink", 300_000, 5, "21:00")]);

    let (status, body) = get_json(
        app,
        "/api/flight-routes?minDepartureHour=6&maxDepartureHour=12",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["airline"], "Garuda Indonesia");
}

#[tokio::test]
async fn similar_routes_exclude_the_reference() {
    let reference = route("Garuda Indonesia", 500_000, 4, "08:00");
    let mut sibling = reference.clone();
    sibling.id = Uuid::new_v4();
    sibling.airline = "Citilink".to_string();
    let unrelated = route("Lion Air", 400_000, 5, "09:00");

    let uri = format!("/api/flight-routes/{}/similar", reference.id);
    let app = test_app(vec![reference, sibling, unrelated]);

    let (status, body) = get_json(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["airline"], "Citilink");
}

#[tokio::test]
async fn mutations_require_an_admin_token() {
    let app = test_app(Vec::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/flight-routes")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_token_is_forbidden_with_a_json_body() {
    let app = test_app(Vec::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/flight-routes")
                .header("Authorization", format!("Bearer {}", mint_token("EDITOR")))
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Admin access required");
}

#[tokio::test]
async fn registration_reports_the_same_role_as_the_token() {
    let app = test_app(Vec::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/register")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"email":"ops@example.com","password":"hunter2","name":"Ops"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["role"], "ADMIN");

    let claims = decode::<AdminClaims>(
        body["token"].as_str().unwrap(),
        &DecodingKey::from_secret(b"test-secret"),
        &Validation::default(),
    )
    .unwrap()
    .claims;
    assert_eq!(claims.role, body["user"]["role"].as_str().unwrap());
}

fn popular_entry(route_id: Uuid, display_order: i32, is_active: bool) -> PopularRoute {
    PopularRoute {
        id: Uuid::new_v4(),
        flight_route_id: route_id,
        display_order,
        is_active,
        image_url: String::new(),
        flight_route: None,
    }
}

#[tokio::test]
async fn popular_routes_nest_their_route_in_display_order() {
    let first = route("Garuda Indonesia", 900_000, 4, "08:00");
    let second = route("Citilink", 300_000, 5, "09:00");
    let hidden = route("Lion Air", 500_000, 5, "10:00");

    let mut state = test_state(vec![first.clone(), second.clone(), hidden.clone()]);
    state.popular_repo = Arc::new(InMemoryPopular {
        entries: vec![
            popular_entry(second.id, 2, true),
            popular_entry(first.id, 1, true),
            popular_entry(hidden.id, 0, false),
        ],
    });
    let app = layang_api::app(state);

    let (status, body) = get_json(app, "/api/popular-flight-routes").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["flightRoute"]["airline"], "Garuda Indonesia");
    assert_eq!(results[0]["flightRoute"]["price"], 900_000);
    assert_eq!(results[1]["flightRoute"]["airline"], "Citilink");
}

#[tokio::test]
async fn marking_a_route_popular_twice_conflicts() {
    let promoted = route("Garuda Indonesia", 900_000, 4, "08:00");

    let mut state = test_state(vec![promoted.clone()]);
    state.popular_repo = Arc::new(InMemoryPopular {
        entries: vec![popular_entry(promoted.id, 0, true)],
    });
    let app = layang_api::app(state);

    let payload = serde_json::json!({ "flightRouteId": promoted.id });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/popular-flight-routes")
                .header("Authorization", format!("Bearer {}", mint_token("ADMIN")))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reviews_list_is_public_and_creation_is_gated() {
    let app = test_app(Vec::new());
    let (status, body) = get_json(app, "/api/reviews").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let app = test_app(Vec::new());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reviews")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"customerName":"Siti","comment":"Smooth booking"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = test_app(Vec::new());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reviews")
                .header("Authorization", format!("Bearer {}", mint_token("ADMIN")))
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"customerName":"Siti","comment":"Smooth booking"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["rating"], 5);
    assert_eq!(created["isActive"], true);
}

#[tokio::test]
async fn settings_expose_the_search_defaults() {
    let app = test_app(Vec::new());
    let (status, body) = get_json(app, "/api/settings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["minPrice"], 100_000);
    assert_eq!(body["maxPrice"], 100_000_000);
}

#[tokio::test]
async fn unknown_route_is_a_json_404() {
    let app = test_app(Vec::new());
    let (status, body) = get_json(
        app,
        &format!("/api/flight-routes/{}", Uuid::new_v4()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Flight route not found");
}
