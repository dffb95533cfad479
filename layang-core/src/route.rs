use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fare;

/// A named charge contributing to a route's price. Fees are owned by exactly
/// one route and stored as an ordered list; the order is display order only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeItem {
    /// Assigned server-side when the admin form submits a fee without one.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Whole Rupiah. Lenient on the wire: a blank or malformed amount from
    /// the admin form deserializes to 0 rather than erroring.
    #[serde(deserialize_with = "fare::lenient_amount", default)]
    pub amount: i64,
}

impl FeeItem {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightClass {
    Economy,
    Business,
    First,
}

impl Default for FlightClass {
    fn default() -> Self {
        FlightClass::Economy
    }
}

impl std::str::FromStr for FlightClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(FlightClass::Economy),
            "business" => Ok(FlightClass::Business),
            "first" => Ok(FlightClass::First),
            other => Err(format!("unknown flight class: {}", other)),
        }
    }
}

impl std::fmt::Display for FlightClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlightClass::Economy => "economy",
            FlightClass::Business => "business",
            FlightClass::First => "first",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// A sellable itinerary. `total_price` and `duration` are derived fields:
/// they are recomputed from fees/discount and the two times on every edit
/// and are never hand-edited independently of their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRoute {
    pub id: Uuid,
    pub departure_city_id: Uuid,
    pub arrival_city_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_city: Option<City>,
    /// Calendar date, stored timezone-free to avoid off-by-one-day shifts.
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub airline: String,
    /// Time of day as "HH:MM". Kept as text and parsed leniently; a value
    /// that fails to parse degrades per-predicate instead of erroring.
    pub departure_time: String,
    pub arrival_time: String,
    /// Derived "{h}h {m}m" elapsed time, overnight wraparound included.
    #[serde(default)]
    pub duration: String,
    pub rating: i32,
    pub available_seats: i32,
    #[serde(default)]
    pub flight_class: FlightClass,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub other_fees: Vec<FeeItem>,
    #[serde(deserialize_with = "fare::lenient_amount", default)]
    pub discount: i64,
    /// Authoritative total: sum of fee amounts minus discount. May be
    /// negative when the discount exceeds the fee subtotal.
    #[serde(deserialize_with = "fare::lenient_amount", default)]
    pub total_price: i64,
}

impl FlightRoute {
    /// Recompute the derived fields from their inputs. Callers persist the
    /// result in the same update as the fee/discount edit so a stale
    /// `total_price` never reaches the store.
    pub fn recompute_derived(&mut self) {
        self.total_price = fare::compute_total_price(&self.other_fees, self.discount);
        self.duration = fare::compute_duration(&self.departure_time, &self.arrival_time);
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("return date must be after departure date")]
    ReturnBeforeDeparture,
    #[error("departure and arrival city must differ")]
    SameCity,
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// Admin-boundary checks. The filter/sort engine assumes already-validated
/// chronology and does not re-check any of this.
pub fn validate_itinerary(
    departure_city_id: Uuid,
    arrival_city_id: Uuid,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if departure_city_id == arrival_city_id {
        return Err(ValidationError::SameCity);
    }
    if let Some(ret) = return_date {
        if ret <= departure_date {
            return Err(ValidationError::ReturnBeforeDeparture);
        }
    }
    Ok(())
}

pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}
