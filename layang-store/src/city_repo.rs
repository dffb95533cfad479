use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::repository::CityRepository;
use layang_core::route::City;

pub struct PostgresCityRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct CityRow {
    id: Uuid,
    name: String,
    description: String,
    image_url: String,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl CityRepository for PostgresCityRepository {
    async fn list_cities(
        &self,
    ) -> Result<Vec<City>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<CityRow> =
            sqlx::query_as("SELECT id, name, description, image_url FROM cities ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn get_city(
        &self,
        id: Uuid,
    ) -> Result<Option<City>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<CityRow> =
            sqlx::query_as("SELECT id, name, description, image_url FROM cities WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(City::from))
    }

    async fn create_city(
        &self,
        city: &City,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO cities (id, name, description, image_url) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(city.id)
        .bind(&city.name)
        .bind(&city.description)
        .bind(&city.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_city(
        &self,
        id: Uuid,
        city: &City,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE cities SET name = $2, description = $3, image_url = $4 WHERE id = $1")
            .bind(id)
            .bind(&city.name)
            .bind(&city.description)
            .bind(&city.image_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_city(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
