//! Local account provisioning.
//!
//! The daemon keeps exactly one account. [`AccountProvisioner`] returns it,
//! registering a fresh one with the remote service the first time it is
//! asked, and applies updates to its mutable fields.

mod provisioner;


use async_trait::async_trait;

pub use provisioner::AccountProvisioner;

use crate::registration::Registration;
use crate::storage::{Account, AccountUpdate, DatabaseError};

/// Persistence for the account record.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// The account with the greatest `created_at`, if any.
    async fn latest_by_created_at(&self) -> Result<Option<Account>, DatabaseError>;

    async fn insert(&self, account: &Account) -> Result<(), DatabaseError>;

    /// Single-statement update of the mutable fields. Returns rows affected.
    async fn update_fields(&self, update: &AccountUpdate) -> Result<u64, DatabaseError>;
}

impl Account {
    /// Assemble an account from a registration response and the locally
    /// generated private key.
    ///
    /// Absent `quota`/`usage` become 0 and `referrer` starts empty.
    pub fn from_registration(registration: Registration, private_key: &str) -> Self {
        let Registration {
            id,
            account_type,
            account,
            model,
            token,
        } = registration;

        Self {
            account_id: id,
            account_type,
            created_at: account.created,
            updated_at: account.updated,
            model,
            referrer: String::new(),
            private_key: private_key.to_string(),
            license_key: account.license,
            token,
            premium_data: account.premium_data,
            quota: account.quota.unwrap_or(0),
            usage: account.usage.unwrap_or(0),
        }
    }
}
