//! Wire types for the registration API.

use serde::{Deserialize, Serialize};

use super::client::RegistrationError;

/// Body of `POST /{version}/reg`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub key: &'a str,
    pub install_id: &'a str,
    pub fcm_token: &'a str,
    /// Terms-of-service acceptance time, RFC 3339.
    pub tos: String,
    #[serde(rename = "type")]
    pub device_type: &'a str,
    pub locale: &'a str,
}

impl<'a> RegisterRequest<'a> {
    pub fn new(public_key: &'a str, tos: String) -> Self {
        Self {
            key: public_key,
            install_id: "",
            fcm_token: "",
            tos,
            device_type: "Android",
            locale: "en_US",
        }
    }
}

/// Fields of the registration response this service keeps.
///
/// The remote payload carries much more (device config, peers, flags);
/// unknown fields are ignored.
#[derive(Clone, Deserialize)]
pub struct Registration {
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub account: RegisteredAccount,
    pub model: String,
    pub token: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("account_type", &self.account_type)
            .field("account", &self.account)
            .field("model", &self.model)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// The nested `account` object of a registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredAccount {
    pub created: String,
    pub updated: String,
    pub license: String,
    pub premium_data: i64,
    /// Omitted (or null) for accounts without a data quota.
    #[serde(default)]
    pub quota: Option<i64>,
    #[serde(default)]
    pub usage: Option<i64>,
}

impl Registration {
    /// Reject responses that decode but cannot become a usable account.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.id.trim().is_empty() {
            return Err(RegistrationError::InvalidResponse(
                "missing account id".into(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(RegistrationError::InvalidResponse("missing token".into()));
        }
        if self.account.created.trim().is_empty() {
            return Err(RegistrationError::InvalidResponse(
                "missing creation timestamp".into(),
            ));
        }
        for (field, value) in [("quota", self.account.quota), ("usage", self.account.usage)] {
            if value.is_some_and(|v| v < 0) {
                return Err(RegistrationError::InvalidResponse(format!(
                    "negative {field}"
                )));
            }
        }
        Ok(())
    }
}
