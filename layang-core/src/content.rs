//! Editorial records shown on the homepage: routes an admin promotes into
//! the "popular destinations" strip, and customer testimonials for the
//! review carousel. Both are plain records; no derived fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::route::FlightRoute;

/// A promotion of one flight route onto the homepage. At most one entry per
/// route; `display_order` is ascending, lowest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularRoute {
    pub id: Uuid,
    pub flight_route_id: Uuid,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: String,
    /// Filled in by the read path; never persisted from the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_route: Option<FlightRoute>,
}

/// A curated customer testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReview {
    pub id: Uuid,
    pub customer_name: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_rating() -> i32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popular_route_defaults_to_active_at_order_zero() {
        let entry: PopularRoute = serde_json::from_value(serde_json::json!({
            "id": "6a0f9db0-9c7e-4d2a-8f31-111111111111",
            "flightRouteId": "6a0f9db0-9c7e-4d2a-8f31-222222222222"
        }))
        .unwrap();

        assert!(entry.is_active);
        assert_eq!(entry.display_order, 0);
        assert!(entry.flight_route.is_none());
    }

    #[test]
    fn review_rating_defaults_to_five() {
        let review: CustomerReview = serde_json::from_value(serde_json::json!({
            "id": "6a0f9db0-9c7e-4d2a-8f31-111111111111",
            "customerName": "Siti",
            "comment": "Smooth booking",
            "createdAt": "2025-06-10T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(review.rating, 5);
        assert!(review.is_active);
    }
}
