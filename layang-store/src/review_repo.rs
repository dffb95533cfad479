use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::content::CustomerReview;
use layang_core::repository::ReviewRepository;

pub struct PostgresReviewRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    customer_name: String,
    rating: i32,
    comment: String,
    image_url: String,
    location: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for CustomerReview {
    fn from(row: ReviewRow) -> Self {
        CustomerReview {
            id: row.id,
            customer_name: row.customer_name,
            rating: row.rating,
            comment: row.comment,
            image_url: row.image_url,
            location: row.location,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn list_reviews(
        &self,
    ) -> Result<Vec<CustomerReview>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, customer_name, rating, comment, image_url, location, is_active, created_at
            FROM customer_reviews
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerReview::from).collect())
    }

    async fn create_review(
        &self,
        review: &CustomerReview,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO customer_reviews (id, customer_name, rating, comment, image_url, location, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(review.id)
        .bind(&review.customer_name)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(&review.image_url)
        .bind(&review.location)
        .bind(review.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
