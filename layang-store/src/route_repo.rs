use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use layang_core::repository::{RouteQuery, RouteRepository};
use layang_core::route::{City, FeeItem, FlightRoute};

pub struct PostgresRouteRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    departure_city_id: Uuid,
    arrival_city_id: Uuid,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    airline: String,
    departure_time: String,
    arrival_time: String,
    duration: String,
    rating: i32,
    available_seats: i32,
    flight_class: String,
    image_url: String,
    description: String,
    other_fees: serde_json::Value,
    discount: i64,
    total_price: i64,
    departure_city_name: String,
    departure_city_description: String,
    departure_city_image_url: String,
    arrival_city_name: String,
    arrival_city_description: String,
    arrival_city_image_url: String,
}

/// Decode the JSONB fee list one element at a time so a single malformed
/// entry drops that entry, not the whole route.
fn decode_fees(value: serde_json::Value) -> Vec<FeeItem> {
    let serde_json::Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<FeeItem>(item) {
            Ok(fee) => Some(fee),
            Err(e) => {
                warn!("skipping undecodable fee entry: {}", e);
                None
            }
        })
        .collect()
}

impl From<RouteRow> for FlightRoute {
    fn from(row: RouteRow) -> Self {
        FlightRoute {
            id: row.id,
            departure_city_id: row.departure_city_id,
            arrival_city_id: row.arrival_city_id,
            departure_city: Some(City {
                id: row.departure_city_id,
                name: row.departure_city_name,
                description: row.departure_city_description,
                image_url: row.departure_city_image_url,
            }),
            arrival_city: Some(City {
                id: row.arrival_city_id,
                name: row.arrival_city_name,
                description: row.arrival_city_description,
                image_url: row.arrival_city_image_url,
            }),
            departure_date: row.departure_date,
            return_date: row.return_date,
            airline: row.airline,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            duration: row.duration,
            rating: row.rating,
            available_seats: row.available_seats,
            flight_class: row.flight_class.parse().unwrap_or_default(),
            image_url: row.image_url,
            description: row.description,
            other_fees: decode_fees(row.other_fees),
            discount: row.discount,
            total_price: row.total_price,
        }
    }
}

const SELECT_ROUTE: &str = r#"
    SELECT
        fr.id, fr.departure_city_id, fr.arrival_city_id,
        fr.departure_date, fr.return_date, fr.airline,
        fr.departure_time, fr.arrival_time, fr.duration,
        fr.rating, fr.available_seats, fr.flight_class,
        fr.image_url, fr.description, fr.other_fees,
        fr.discount, fr.total_price,
        dc.name AS departure_city_name,
        dc.description AS departure_city_description,
        dc.image_url AS departure_city_image_url,
        ac.name AS arrival_city_name,
        ac.description AS arrival_city_description,
        ac.image_url AS arrival_city_image_url
    FROM flight_routes fr
    JOIN cities dc ON fr.departure_city_id = dc.id
    JOIN cities ac ON fr.arrival_city_id = ac.id
"#;

#[async_trait]
impl RouteRepository for PostgresRouteRepository {
    async fn search_routes(
        &self,
        query: &RouteQuery,
    ) -> Result<Vec<FlightRoute>, Box<dyn std::error::Error + Send + Sync>> {
        let sql = format!(
            r#"{SELECT_ROUTE}
            WHERE ($1::uuid IS NULL OR fr.departure_city_id = $1)
              AND ($2::uuid IS NULL OR fr.arrival_city_id = $2)
              AND ($3::date IS NULL OR fr.departure_date = $3)
              AND ($4::date IS NULL OR fr.return_date = $4)
              AND ($5::bigint IS NULL OR fr.total_price >= $5)
              AND ($6::bigint IS NULL OR fr.total_price <= $6)
              AND ($7::text IS NULL OR fr.airline = $7)
              AND ($8::int IS NULL OR fr.rating >= $8)
            ORDER BY fr.departure_date ASC, fr.created_at ASC
            "#
        );

        let rows: Vec<RouteRow> = sqlx::query_as(&sql)
            .bind(query.departure_city_id)
            .bind(query.arrival_city_id)
            .bind(query.departure_date)
            .bind(query.return_date)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(query.airline.as_deref())
            .bind(query.min_rating)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FlightRoute::from).collect())
    }

    async fn get_route(
        &self,
        id: Uuid,
    ) -> Result<Option<FlightRoute>, Box<dyn std::error::Error + Send + Sync>> {
        let sql = format!("{SELECT_ROUTE} WHERE fr.id = $1");
        let row: Option<RouteRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(FlightRoute::from))
    }

    async fn create_route(
        &self,
        route: &FlightRoute,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let fees = serde_json::to_value(&route.other_fees)?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO flight_routes (
                id, departure_city_id, arrival_city_id, departure_date,
                return_date, airline, departure_time, arrival_time, duration,
                rating, available_seats, flight_class, image_url, description,
                other_fees, discount, total_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(route.id)
        .bind(route.departure_city_id)
        .bind(route.arrival_city_id)
        .bind(route.departure_date)
        .bind(route.return_date)
        .bind(&route.airline)
        .bind(&route.departure_time)
        .bind(&route.arrival_time)
        .bind(&route.duration)
        .bind(route.rating)
        .bind(route.available_seats)
        .bind(route.flight_class.to_string())
        .bind(&route.image_url)
        .bind(&route.description)
        .bind(fees)
        .bind(route.discount)
        .bind(route.total_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_route(
        &self,
        id: Uuid,
        route: &FlightRoute,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let fees = serde_json::to_value(&route.other_fees)?;

        // Fees, discount, total_price and duration land in one statement:
        // readers never observe a total that is stale against its inputs.
        sqlx::query(
            r#"
            UPDATE flight_routes SET
                departure_city_id = $2, arrival_city_id = $3,
                departure_date = $4, return_date = $5, airline = $6,
                departure_time = $7, arrival_time = $8, duration = $9,
                rating = $10, available_seats = $11, flight_class = $12,
                image_url = $13, description = $14, other_fees = $15,
                discount = $16, total_price = $17, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(route.departure_city_id)
        .bind(route.arrival_city_id)
        .bind(route.departure_date)
        .bind(route.return_date)
        .bind(&route.airline)
        .bind(&route.departure_time)
        .bind(&route.arrival_time)
        .bind(&route.duration)
        .bind(route.rating)
        .bind(route.available_seats)
        .bind(route.flight_class.to_string())
        .bind(&route.image_url)
        .bind(&route.description)
        .bind(fees)
        .bind(route.discount)
        .bind(route.total_price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_route(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("DELETE FROM flight_routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
