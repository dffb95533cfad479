use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::content::PopularRoute;
use layang_core::repository::PopularRouteRepository;

pub struct PostgresPopularRouteRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PopularRow {
    id: Uuid,
    flight_route_id: Uuid,
    display_order: i32,
    is_active: bool,
    image_url: String,
}

impl From<PopularRow> for PopularRoute {
    fn from(row: PopularRow) -> Self {
        PopularRoute {
            id: row.id,
            flight_route_id: row.flight_route_id,
            display_order: row.display_order,
            is_active: row.is_active,
            image_url: row.image_url,
            // The read path joins the route in at the handler level.
            flight_route: None,
        }
    }
}

#[async_trait]
impl PopularRouteRepository for PostgresPopularRouteRepository {
    async fn list_popular_routes(
        &self,
    ) -> Result<Vec<PopularRoute>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PopularRow> = sqlx::query_as(
            r#"
            SELECT id, flight_route_id, display_order, is_active, image_url
            FROM popular_flight_routes
            WHERE is_active = TRUE
            ORDER BY display_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PopularRoute::from).collect())
    }

    async fn find_popular_by_route(
        &self,
        flight_route_id: Uuid,
    ) -> Result<Option<PopularRoute>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<PopularRow> = sqlx::query_as(
            r#"
            SELECT id, flight_route_id, display_order, is_active, image_url
            FROM popular_flight_routes
            WHERE flight_route_id = $1
            "#,
        )
        .bind(flight_route_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PopularRoute::from))
    }

    async fn create_popular_route(
        &self,
        entry: &PopularRoute,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO popular_flight_routes (id, flight_route_id, display_order, is_active, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(entry.id)
        .bind(entry.flight_route_id)
        .bind(entry.display_order)
        .bind(entry.is_active)
        .bind(&entry.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_popular_route(
        &self,
        id: Uuid,
        display_order: i32,
        is_active: bool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            "UPDATE popular_flight_routes SET display_order = $2, is_active = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(display_order)
        .bind(is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_popular_route(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("DELETE FROM popular_flight_routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
