use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::payment::AdminUser;
use layang_core::repository::AdminRepository;

pub struct PostgresAdminRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for AdminUser {
    fn from(row: AdminRow) -> Self {
        AdminUser {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, email, name, password_hash, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AdminUser::from))
    }

    async fn create_admin(
        &self,
        admin: &AdminUser,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO admins (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(admin.id)
        .bind(&admin.email)
        .bind(&admin.name)
        .bind(&admin.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
