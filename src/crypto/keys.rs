use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use super::CryptoError;
use super::encryption::EncryptedData;

pub const KEY_LENGTH: usize = 32; // AES-256
pub const SALT_LENGTH: usize = 16;

/// HKDF context string; bump the version if the token layout ever changes.
const KEY_CONTEXT: &[u8] = b"intake/name-cipher/v1";

/// Shared secret supplied by the environment, zeroed on drop
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct EncryptionSecret {
    bytes: Vec<u8>,
}

impl EncryptionSecret {
    /// An empty secret is treated the same as a missing one.
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        if secret.is_empty() {
            return Err(CryptoError::MissingKey);
        }
        Ok(Self {
            bytes: secret.as_bytes().to_vec(),
        })
    }
}

impl fmt::Debug for EncryptionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionSecret(<redacted>)")
    }
}

/// Per-token AES key, zeroed on drop
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct NameKey {
    pub(super) key_bytes: [u8; KEY_LENGTH],
}

impl NameKey {
    /// Derive from secret + salt using HKDF-SHA256
    pub fn derive(secret: &EncryptionSecret, salt: &[u8; SALT_LENGTH]) -> Result<Self, CryptoError> {
        let hk = Hkdf::<Sha256>::new(Some(salt), &secret.bytes);
        let mut key_bytes = [0u8; KEY_LENGTH];
        hk.expand(KEY_CONTEXT, &mut key_bytes)
            .map_err(|_| CryptoError::EncryptionFailed)?;
        Ok(Self { key_bytes })
    }

    /// Encrypt data using AES-256-GCM, recording the salt this key came from
    pub fn encrypt(
        &self,
        salt: [u8; SALT_LENGTH],
        plaintext: &[u8],
    ) -> Result<EncryptedData, CryptoError> {
        EncryptedData::encrypt(&self.key_bytes, salt, plaintext)
    }

    /// Decrypt data using AES-256-GCM
    pub fn decrypt(&self, encrypted: &EncryptedData) -> Result<Vec<u8>, CryptoError> {
        encrypted.decrypt(&self.key_bytes)
    }
}

/// Generate a cryptographically random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
