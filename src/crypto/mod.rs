//! Name cipher: symmetric protection of the questionnaire `name` at rest.
//!
//! The secret is always passed in explicitly; nothing in this module reads
//! the process environment.

pub mod keys;
pub mod encryption;

pub use keys::*;
pub use encryption::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Encryption key is missing")]
    MissingKey,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Malformed cipher token")]
    MalformedToken,

    #[error("Decrypted name is not valid UTF-8")]
    InvalidUtf8,
}
