//! Collaborator trait implementations backed by `SQLite`.

use async_trait::async_trait;

use super::db::{DatabaseError, WarplineDatabase};
use super::models::{Account, AccountUpdate, EndpointRecord};
use crate::account::AccountStore;
use crate::endpoints::EndpointCatalog;

#[async_trait]
impl AccountStore for WarplineDatabase {
    async fn latest_by_created_at(&self) -> Result<Option<Account>, DatabaseError> {
        self.fetch_latest_account().await
    }

    async fn insert(&self, account: &Account) -> Result<(), DatabaseError> {
        self.create_account(account).await
    }

    async fn update_fields(&self, update: &AccountUpdate) -> Result<u64, DatabaseError> {
        self.update_account(update).await
    }
}

#[async_trait]
impl EndpointCatalog for WarplineDatabase {
    async fn list_all(&self) -> Result<Vec<EndpointRecord>, DatabaseError> {
        self.fetch_endpoints().await
    }
}
