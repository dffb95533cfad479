use std::sync::Arc;

use layang_core::repository::{
    AdminRepository, BankAccountRepository, CityRepository, PaymentRepository,
    PopularRouteRepository, ReviewRepository, RouteRepository,
};
use layang_store::app_config::SearchDefaults;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub route_repo: Arc<dyn RouteRepository>,
    pub city_repo: Arc<dyn CityRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub bank_account_repo: Arc<dyn BankAccountRepository>,
    pub popular_repo: Arc<dyn PopularRouteRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub auth: AuthConfig,
    pub search: SearchDefaults,
}
