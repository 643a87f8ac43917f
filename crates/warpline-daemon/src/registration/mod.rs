//! Remote account registration.
//!
//! [`RegistrationClient`] is the seam the provisioner calls through;
//! [`CloudflareClient`] talks to the real provisioning API over HTTPS.

mod client;
mod types;


use async_trait::async_trait;

pub use client::{CloudflareClient, RegistrationError};
pub use types::{RegisterRequest, RegisteredAccount, Registration};

/// Registers a public key with the remote provisioning service.
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    /// One registration attempt; no retries.
    async fn register(&self, public_key: &str) -> Result<Registration, RegistrationError>;
}
