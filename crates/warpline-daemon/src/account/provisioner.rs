//! Get-or-create over the account store.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use warpline_crypto::KeyPairGenerator;

use super::AccountStore;
use crate::error::ServiceError;
use crate::registration::RegistrationClient;
use crate::storage::{Account, AccountUpdate};

/// Owns the path from "no account" to "registered account".
///
/// Calls to [`get_or_create_current_account`](Self::get_or_create_current_account)
/// are serialized, so two callers in one process never both register.
/// Processes sharing a database file are not coordinated.
pub struct AccountProvisioner<S, G, R> {
    store: S,
    keys: G,
    registration: R,
    provision_lock: Mutex<()>,
}

impl<S, G, R> AccountProvisioner<S, G, R>
where
    S: AccountStore,
    G: KeyPairGenerator,
    R: RegistrationClient,
{
    pub fn new(store: S, keys: G, registration: R) -> Self {
        Self {
            store,
            keys,
            registration,
            provision_lock: Mutex::new(()),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn keys(&self) -> &G {
        &self.keys
    }

    pub const fn registration(&self) -> &R {
        &self.registration
    }

    /// Return the current account, registering one if the store is empty.
    ///
    /// A store read failure aborts before any registration attempt. The new
    /// record is inserted only once it is complete.
    pub async fn get_or_create_current_account(&self) -> Result<Account, ServiceError> {
        let _guard = self.provision_lock.lock().await;

        if let Some(account) = self.store.latest_by_created_at().await? {
            debug!(account_id = %account.account_id, "Using existing account");
            return Ok(account);
        }

        info!("No account found, registering a new one");
        let keypair = self.keys.generate();
        let registration = self
            .registration
            .register(&keypair.public_key_base64())
            .await?;

        let private_key = keypair.private_key_base64();
        let account = Account::from_registration(registration, &private_key);
        self.store.insert(&account).await?;

        info!(
            account_id = %account.account_id,
            account_type = %account.account_type,
            fingerprint = %keypair.fingerprint(),
            "Registered new account"
        );
        Ok(account)
    }

    /// Apply `update` to the matching account.
    ///
    /// Returns rows affected. Zero means no account has that id, which is
    /// reported, not treated as an error.
    pub async fn save_account(&self, update: &AccountUpdate) -> Result<u64, ServiceError> {
        let rows = self.store.update_fields(update).await?;
        if rows == 0 {
            warn!(account_id = %update.account_id, "No account matched update");
        } else {
            info!(
                account_id = %update.account_id,
                quota = update.quota,
                usage = update.usage,
                "Account updated"
            );
        }
        Ok(rows)
    }
}
