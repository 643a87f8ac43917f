//! Tunnel keypair generation.
//!
//! Each account owns one long-lived X25519 keypair. The public half is sent
//! to the registration service; the private half never leaves the local
//! store.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptoError;

const KEY_LEN: usize = 32;

/// An X25519 keypair for a WireGuard tunnel.
pub struct TunnelKeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl std::fmt::Debug for TunnelKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TunnelKeyPair")
            .field("public", &self.public_key_base64())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TunnelKeyPair {
    /// Generate a new random keypair from the OS RNG.
    ///
    /// The private scalar is clamped before storage so the exported key is
    /// byte-identical to what `wg genkey` would produce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        clamp(&mut bytes);
        let secret = StaticSecret::from(bytes);
        bytes.zeroize();
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Reconstruct from raw 32-byte secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_LEN];
        arr.copy_from_slice(bytes);
        let secret = StaticSecret::from(arr);
        let public = PublicKey::from(&secret);
        arr.zeroize();
        Ok(Self { secret, public })
    }

    /// Reconstruct from a base64 private key as stored on an account.
    pub fn from_private_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?,
        );
        Self::from_secret_bytes(&bytes)
    }

    /// Get the public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Get the public key as raw bytes.
    pub fn public_bytes(&self) -> [u8; KEY_LEN] {
        *self.public.as_bytes()
    }

    /// Public key in WireGuard's base64 form.
    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.public.as_bytes())
    }

    /// Private key in WireGuard's base64 form. Handle with care.
    pub fn private_key_base64(&self) -> Zeroizing<String> {
        let bytes = Zeroizing::new(self.secret.to_bytes());
        Zeroizing::new(STANDARD.encode(&*bytes))
    }

    /// Colon-separated SHA-256 fingerprint of the public key, safe to log.
    pub fn fingerprint(&self) -> String {
        fingerprint_of(self.public.as_bytes())
    }
}

/// Source of fresh tunnel keypairs.
pub trait KeyPairGenerator: Send + Sync {
    fn generate(&self) -> TunnelKeyPair;
}

/// Generates keypairs from the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyPairGenerator;

impl KeyPairGenerator for OsKeyPairGenerator {
    fn generate(&self) -> TunnelKeyPair {
        TunnelKeyPair::generate()
    }
}

/// Compute a colon-separated hex fingerprint from raw public key bytes.
pub fn fingerprint_of(pubkey_bytes: &[u8; KEY_LEN]) -> String {
    use sha2::{Digest, Sha256};
    let hash = Sha256::digest(pubkey_bytes);
    hash.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(":")
}

/// Curve25519 scalar clamping.
const fn clamp(bytes: &mut [u8; KEY_LEN]) {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
}
