//! Database queries for the Warpline daemon.

use super::db::{DatabaseError, WarplineDatabase};
use super::models::{Account, AccountUpdate, EndpointRecord};

impl WarplineDatabase {
    // =========================================================================
    // Account queries
    // =========================================================================

    /// Insert a fully assembled account.
    pub async fn create_account(&self, account: &Account) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO accounts (account_id, account_type, created_at, updated_at, model, referrer, private_key, license_key, token, premium_data, quota, usage) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.account_id)
        .bind(&account.account_type)
        .bind(&account.created_at)
        .bind(&account.updated_at)
        .bind(&account.model)
        .bind(&account.referrer)
        .bind(&account.private_key)
        .bind(&account.license_key)
        .bind(&account.token)
        .bind(account.premium_data)
        .bind(account.quota)
        .bind(account.usage)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get an account by ID.
    pub async fn get_account(&self, account_id: &str) -> Result<Account, DatabaseError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {account_id}")))
    }

    /// The most recently created account, if any.
    pub async fn fetch_latest_account(&self) -> Result<Option<Account>, DatabaseError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts ORDER BY created_at DESC, rowid DESC LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await?;

        Ok(account)
    }

    /// Overwrite the mutable fields of one account.
    ///
    /// Returns the number of rows affected; zero when `account_id` is unknown.
    pub async fn update_account(&self, update: &AccountUpdate) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE accounts SET license_key = ?, premium_data = ?, quota = ?, usage = ?, updated_at = ? WHERE account_id = ?",
        )
        .bind(&update.license_key)
        .bind(update.premium_data)
        .bind(update.quota)
        .bind(update.usage)
        .bind(&update.updated_at)
        .bind(&update.account_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Endpoint queries
    // =========================================================================

    /// All endpoints in catalog (insertion) order.
    pub async fn fetch_endpoints(&self) -> Result<Vec<EndpointRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, EndpointRecord>(
            "SELECT address, loss, delay, name, unique_name FROM endpoints ORDER BY rowid",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    /// Insert or refresh an endpoint. An existing row keeps its catalog position.
    pub async fn upsert_endpoint(&self, endpoint: &EndpointRecord) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO endpoints (address, loss, delay, name, unique_name) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(address) DO UPDATE SET loss = excluded.loss, delay = excluded.delay, name = excluded.name, unique_name = excluded.unique_name",
        )
        .bind(&endpoint.address)
        .bind(&endpoint.loss)
        .bind(&endpoint.delay)
        .bind(&endpoint.name)
        .bind(&endpoint.unique_name)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
