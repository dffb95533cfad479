//! Route filtering, ranking, and similar-route matching.
//!
//! The engine takes candidate routes already carrying a materialized
//! `total_price` and a filter specification, and returns the full ordered
//! survivor set. Ordering is deterministic and stable so callers can take
//! growing prefixes ("load more") of the same result without re-fetching.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fare;
use crate::route::FlightRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Cheapest,
    Fastest,
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Cheapest
    }
}

/// User-chosen search constraints. Request-scoped, never persisted.
/// Empty rating/airline sets mean "no filter on that field".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Closed interval on `total_price`, whole Rupiah.
    pub price_range: (i64, i64),
    /// Closed interval in fractional hours of day, within a single calendar
    /// day (no cross-midnight window).
    pub departure_time_range: (f64, f64),
    pub ratings: Vec<i32>,
    pub airlines: Vec<String>,
    pub sort: SortMode,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            price_range: (0, i64::MAX),
            departure_time_range: (0.0, 24.0),
            ratings: Vec::new(),
            airlines: Vec::new(),
            sort: SortMode::Cheapest,
        }
    }
}

/// Three-valued predicate result. `Indeterminate` means the condition could
/// not be evaluated (a field failed to parse); such routes are admitted
/// rather than silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
    Indeterminate,
}

impl Outcome {
    pub fn admits(self) -> bool {
        !matches!(self, Outcome::Fail)
    }
}

fn price_outcome(route: &FlightRoute, spec: &FilterSpec) -> Outcome {
    let (min, max) = spec.price_range;
    if route.total_price >= min && route.total_price <= max {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

fn departure_time_outcome(route: &FlightRoute, spec: &FilterSpec) -> Outcome {
    let Some(hours) = fare::fractional_hours(&route.departure_time) else {
        debug!(
            route_id = %route.id,
            departure_time = %route.departure_time,
            "unparseable departure time, admitting route"
        );
        return Outcome::Indeterminate;
    };
    let (min, max) = spec.departure_time_range;
    if hours >= min && hours <= max {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

fn rating_outcome(route: &FlightRoute, spec: &FilterSpec) -> Outcome {
    if spec.ratings.is_empty() || spec.ratings.contains(&route.rating) {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

fn airline_outcome(route: &FlightRoute, spec: &FilterSpec) -> Outcome {
    // Exact, case-sensitive match against the stored airline name.
    if spec.airlines.is_empty() || spec.airlines.iter().any(|a| a == &route.airline) {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

fn survives(route: &FlightRoute, spec: &FilterSpec) -> bool {
    price_outcome(route, spec).admits()
        && departure_time_outcome(route, spec).admits()
        && rating_outcome(route, spec).admits()
        && airline_outcome(route, spec).admits()
}

/// Evaluate every candidate against the spec and rank the survivors.
/// A malformed field on one route never aborts the pass; at worst that
/// route is mis-sorted or admitted by a predicate it could not be
/// evaluated against.
pub fn filter_and_sort(routes: Vec<FlightRoute>, spec: &FilterSpec) -> Vec<FlightRoute> {
    let mut survivors: Vec<FlightRoute> = routes
        .into_iter()
        .filter(|route| survives(route, spec))
        .collect();

    // Vec::sort_by_key is stable: ties keep their original relative order.
    match spec.sort {
        SortMode::Cheapest => survivors.sort_by_key(|r| r.total_price),
        SortMode::Fastest => survivors.sort_by_key(|r| fare::duration_minutes(&r.duration)),
    }

    survivors
}

/// Routes shown on a detail page alongside the reference route: same city
/// pair, same dates where the reference has them, the reference itself
/// excluded.
pub fn similar_routes(routes: &[FlightRoute], reference: &FlightRoute) -> Vec<FlightRoute> {
    routes
        .iter()
        .filter(|r| r.id != reference.id)
        .filter(|r| {
            r.departure_city_id == reference.departure_city_id
                && r.arrival_city_id == reference.arrival_city_id
        })
        .filter(|r| r.departure_date == reference.departure_date)
        .filter(|r| match reference.return_date {
            Some(ret) => r.return_date == Some(ret),
            None => true,
        })
        .cloned()
        .collect()
}
