pub mod content;
pub mod fare;
pub mod filter;
pub mod payment;
pub mod repository;
pub mod route;

pub use content::{CustomerReview, PopularRoute};
pub use fare::{amount_or_zero, compute_duration, compute_total_price, duration_minutes};
pub use filter::{filter_and_sort, similar_routes, FilterSpec, SortMode};
pub use payment::{AdminUser, BankAccount, Payment, PaymentStatus};
pub use repository::{
    AdminRepository, BankAccountRepository, CityRepository, PaymentRepository,
    PopularRouteRepository, ReviewRepository, RouteQuery, RouteRepository,
};
pub use route::{validate_itinerary, validate_rating, City, FeeItem, FlightClass, FlightRoute, ValidationError};
