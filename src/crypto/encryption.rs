use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;

use super::CryptoError;
use super::keys::{generate_salt, EncryptionSecret, NameKey, KEY_LENGTH, SALT_LENGTH};

const NONCE_LENGTH: usize = 12;
const TAG_LENGTH: usize = 16;

/// Encrypted data container: salt + nonce + ciphertext (includes AES-GCM auth tag)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    pub salt: [u8; SALT_LENGTH],
    pub nonce: [u8; NONCE_LENGTH],
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Encrypt plaintext using AES-256-GCM with a random nonce
    pub(crate) fn encrypt(
        key_bytes: &[u8; KEY_LENGTH],
        salt: [u8; SALT_LENGTH],
        plaintext: &[u8],
    ) -> Result<Self, CryptoError> {
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        let cipher = Aes256Gcm::new(key);

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)?;

        Ok(Self {
            salt,
            nonce: nonce_bytes,
            ciphertext,
        })
    }

    /// Decrypt ciphertext using AES-256-GCM
    pub(crate) fn decrypt(&self, key_bytes: &[u8; KEY_LENGTH]) -> Result<Vec<u8>, CryptoError> {
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        let cipher = Aes256Gcm::new(key);
        let nonce = Nonce::from_slice(&self.nonce);

        cipher
            .decrypt(nonce, self.ciphertext.as_ref())
            .map_err(|_| CryptoError::DecryptionFailed)
    }

    /// Serialize to bytes: [16-byte salt][12-byte nonce][ciphertext...]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_LENGTH + NONCE_LENGTH + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Deserialize from bytes: [16-byte salt][12-byte nonce][ciphertext...]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < SALT_LENGTH + NONCE_LENGTH + TAG_LENGTH {
            return Err(CryptoError::MalformedToken);
        }

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(&bytes[..SALT_LENGTH]);
        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(&bytes[SALT_LENGTH..SALT_LENGTH + NONCE_LENGTH]);
        let ciphertext = bytes[SALT_LENGTH + NONCE_LENGTH..].to_vec();

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Text form stored in the `name` column.
    pub fn to_token(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    pub fn from_token(token: &str) -> Result<Self, CryptoError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(token.trim())
            .map_err(|_| CryptoError::MalformedToken)?;
        Self::from_bytes(&bytes)
    }
}

/// Symmetric cipher for the questionnaire name.
///
/// Every call to [`NameCipher::encrypt`] draws a fresh salt and nonce, so the
/// same name encrypts to a different token each time.
#[derive(Debug)]
pub struct NameCipher {
    secret: EncryptionSecret,
}

impl NameCipher {
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            secret: EncryptionSecret::new(secret)?,
        })
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let salt = generate_salt();
        let key = NameKey::derive(&self.secret, &salt)?;
        let encrypted = key.encrypt(salt, plaintext.as_bytes())?;
        Ok(encrypted.to_token())
    }

    pub fn decrypt(&self, token: &str) -> Result<String, CryptoError> {
        let encrypted = EncryptedData::from_token(token)?;
        let key = NameKey::derive(&self.secret, &encrypted.salt)?;
        let plaintext = key.decrypt(&encrypted)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

/// Encrypt `plaintext` under `key`, returning a base64 token.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String, CryptoError> {
    NameCipher::new(key)?.encrypt(plaintext)
}

/// Decrypt a token produced by [`encrypt`] with the same `key`.
pub fn decrypt(token: &str, key: &str) -> Result<String, CryptoError> {
    NameCipher::new(key)?.decrypt(token)
}
