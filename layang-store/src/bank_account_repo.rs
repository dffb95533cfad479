use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use layang_core::payment::BankAccount;
use layang_core::repository::BankAccountRepository;

pub struct PostgresBankAccountRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct BankAccountRow {
    id: Uuid,
    bank_name: String,
    account_number: String,
    account_holder: String,
    is_active: bool,
}

impl From<BankAccountRow> for BankAccount {
    fn from(row: BankAccountRow) -> Self {
        BankAccount {
            id: row.id,
            bank_name: row.bank_name,
            account_number: row.account_number,
            account_holder: row.account_holder,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl BankAccountRepository for PostgresBankAccountRepository {
    async fn list_bank_accounts(
        &self,
    ) -> Result<Vec<BankAccount>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<BankAccountRow> = sqlx::query_as(
            "SELECT id, bank_name, account_number, account_holder, is_active FROM bank_accounts ORDER BY bank_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BankAccount::from).collect())
    }

    async fn create_bank_account(
        &self,
        account: &BankAccount,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO bank_accounts (id, bank_name, account_number, account_holder, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(account.id)
        .bind(&account.bank_name)
        .bind(&account.account_number)
        .bind(&account.account_holder)
        .bind(account.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_bank_account(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("DELETE FROM bank_accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
