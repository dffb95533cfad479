use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::payment::{Payment, PaymentStatus};
use layang_core::repository::PaymentRepository;

pub struct PostgresPaymentRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    route_id: Uuid,
    user_email: String,
    user_name: String,
    amount: i64,
    status: String,
    proof_image_url: String,
    created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            route_id: row.route_id,
            user_email: row.user_email,
            user_name: row.user_name,
            amount: row.amount,
            status: row.status.parse().unwrap_or(PaymentStatus::Pending),
            proof_image_url: row.proof_image_url,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn list_payments(
        &self,
    ) -> Result<Vec<Payment>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, route_id, user_email, user_name, amount, status, proof_image_url, created_at
            FROM payments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn create_payment(
        &self,
        payment: &Payment,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO payments (id, route_id, user_email, user_name, amount, status, proof_image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(payment.id)
        .bind(payment.route_id)
        .bind(&payment.user_email)
        .bind(&payment.user_name)
        .bind(payment.amount)
        .bind(payment.status.to_string())
        .bind(&payment.proof_image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE payments SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
