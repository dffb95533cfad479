pub mod admin_repo;
pub mod app_config;
pub mod bank_account_repo;
pub mod city_repo;
pub mod database;
pub mod payment_repo;
pub mod popular_route_repo;
pub mod review_repo;
pub mod route_repo;

pub use admin_repo::PostgresAdminRepository;
pub use bank_account_repo::PostgresBankAccountRepository;
pub use city_repo::PostgresCityRepository;
pub use database::DbClient;
pub use payment_repo::PostgresPaymentRepository;
pub use popular_route_repo::PostgresPopularRouteRepository;
pub use review_repo::PostgresReviewRepository;
pub use route_repo::PostgresRouteRepository;
