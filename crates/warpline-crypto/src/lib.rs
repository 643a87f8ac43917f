//! Warpline tunnel key library
//!
//! Generates the X25519 keypair an account registers with the remote
//! provisioning service. Keys are rendered the way WireGuard expects them:
//! 32 raw bytes, standard base64 with padding (44 characters).

pub mod error;
pub mod keypair;

pub use error::CryptoError;
pub use keypair::{KeyPairGenerator, OsKeyPairGenerator, TunnelKeyPair, fingerprint_of};
