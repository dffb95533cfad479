use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::content::{CustomerReview, PopularRoute};
use crate::payment::{AdminUser, BankAccount, Payment, PaymentStatus};
use crate::route::{City, FlightRoute};

/// Storage-side narrowing applied before the in-memory filter engine runs.
/// Mirrors the public search endpoint's optional query parameters.
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub departure_city_id: Option<Uuid>,
    pub arrival_city_id: Option<Uuid>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub airline: Option<String>,
    pub min_rating: Option<i32>,
}

/// Repository trait for flight-route data access
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn search_routes(
        &self,
        query: &RouteQuery,
    ) -> Result<Vec<FlightRoute>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_route(
        &self,
        id: Uuid,
    ) -> Result<Option<FlightRoute>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_route(
        &self,
        route: &FlightRoute,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    /// Persists the route including its derived `total_price` and
    /// `duration` in a single statement, so no reader can observe a route
    /// whose total is stale relative to its fees and discount.
    async fn update_route(
        &self,
        id: Uuid,
        route: &FlightRoute,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_route(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for city reference data
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn list_cities(&self)
        -> Result<Vec<City>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_city(
        &self,
        id: Uuid,
    ) -> Result<Option<City>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_city(
        &self,
        city: &City,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_city(
        &self,
        id: Uuid,
        city: &City,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_city(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for manual bank-transfer payment records
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list_payments(
        &self,
    ) -> Result<Vec<Payment>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_payment(
        &self,
        payment: &Payment,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the payment-settings bank accounts
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    async fn list_bank_accounts(
        &self,
    ) -> Result<Vec<BankAccount>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_bank_account(
        &self,
        account: &BankAccount,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_bank_account(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the homepage "popular destinations" promotions
#[async_trait]
pub trait PopularRouteRepository: Send + Sync {
    /// Active entries only, ascending display order.
    async fn list_popular_routes(
        &self,
    ) -> Result<Vec<PopularRoute>, Box<dyn std::error::Error + Send + Sync>>;

    /// At most one promotion exists per flight route.
    async fn find_popular_by_route(
        &self,
        flight_route_id: Uuid,
    ) -> Result<Option<PopularRoute>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_popular_route(
        &self,
        entry: &PopularRoute,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_popular_route(
        &self,
        id: Uuid,
        display_order: i32,
        is_active: bool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_popular_route(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for customer testimonials
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Newest first.
    async fn list_reviews(
        &self,
    ) -> Result<Vec<CustomerReview>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_review(
        &self,
        review: &CustomerReview,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for admin accounts
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_admin(
        &self,
        admin: &AdminUser,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;
}
