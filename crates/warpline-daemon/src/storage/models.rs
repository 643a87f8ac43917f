//! Database models for the Warpline daemon.

use serde::{Deserialize, Serialize};

/// The local account record.
///
/// Timestamps are ISO-8601 strings exactly as the registration service
/// returned them; they sort lexicographically.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub account_id: String,
    pub account_type: String,
    pub created_at: String,
    pub updated_at: String,
    pub model: String,
    pub referrer: String,
    pub private_key: String,
    pub license_key: String,
    pub token: String,
    pub premium_data: i64,
    pub quota: i64,
    pub usage: i64,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("account_id", &self.account_id)
            .field("account_type", &self.account_type)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("model", &self.model)
            .field("referrer", &self.referrer)
            .field("private_key", &"[REDACTED]")
            .field("license_key", &self.license_key)
            .field("token", &"[REDACTED]")
            .field("premium_data", &self.premium_data)
            .field("quota", &self.quota)
            .field("usage", &self.usage)
            .finish()
    }
}

/// The mutable subset of an [`Account`], addressed by `account_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub account_id: String,
    pub license_key: String,
    pub premium_data: i64,
    pub quota: i64,
    pub usage: i64,
    pub updated_at: String,
}

/// Endpoint catalog row, with metrics still in their stored string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EndpointRecord {
    /// `host:port`
    pub address: String,
    /// Packet loss, e.g. `"3.5%"`.
    pub loss: String,
    /// Round-trip delay, e.g. `"120ms"`.
    pub delay: String,
    pub name: String,
    pub unique_name: String,
}
